use std::ops::Range;

/// Sampling primitives of a state space. Samplers own their random number generator.
pub trait StateSampler: Send + Sync {
    fn sample_uniform(&mut self, state: &mut [f64]);
    fn sample_uniform_near(&mut self, state: &mut [f64], near: &[f64], distance: f64);
    fn sample_gaussian(&mut self, state: &mut [f64], mean: &[f64], std_dev: f64);
}

pub struct CompoundStateSampler {
    pub samplers: Vec<(Box<dyn StateSampler>, f64, Range<usize>)>,
}

impl Default for CompoundStateSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundStateSampler {
    pub fn new() -> CompoundStateSampler {
        CompoundStateSampler {
            samplers: Vec::new(),
        }
    }

    pub fn add_sampler(&mut self, sampler: Box<dyn StateSampler>, weight: f64, range: Range<usize>) {
        self.samplers.push((sampler, weight, range));
    }
}

impl StateSampler for CompoundStateSampler {
    fn sample_uniform(&mut self, state: &mut [f64]) {
        for (sampler, _, range) in self.samplers.iter_mut() {
            sampler.sample_uniform(&mut state[range.clone()]);
        }
    }

    /// A component with weight `w` moves at most `distance / w` so the weighted metric
    /// of the sample stays comparable to `distance`.
    fn sample_uniform_near(&mut self, state: &mut [f64], near: &[f64], distance: f64) {
        for (sampler, weight, range) in self.samplers.iter_mut() {
            if *weight > f64::EPSILON {
                sampler.sample_uniform_near(
                    &mut state[range.clone()],
                    &near[range.clone()],
                    distance / *weight,
                );
            } else {
                sampler.sample_uniform(&mut state[range.clone()]);
            }
        }
    }

    fn sample_gaussian(&mut self, state: &mut [f64], mean: &[f64], std_dev: f64) {
        for (sampler, weight, range) in self.samplers.iter_mut() {
            sampler.sample_gaussian(
                &mut state[range.clone()],
                &mean[range.clone()],
                std_dev * *weight,
            );
        }
    }
}

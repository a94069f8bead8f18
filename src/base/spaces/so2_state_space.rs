use std::f64::consts::PI;
use std::fmt;

use quotient_cover_derive::WithStateSpaceData;

use crate::base::state_sampler::StateSampler;
use crate::base::statespace::{StateSpace, StateSpaceCommonData};
use crate::randomness::RNG;

/// Wrap an angle into `[-pi, pi)`.
pub fn wrap_angle(value: f64) -> f64 {
    let v = (value + PI).rem_euclid(2.0 * PI);
    v - PI
}

/// Planar rotations, one angle in `[-pi, pi)`.
#[derive(WithStateSpaceData)]
pub struct SO2StateSpace {
    state_space_data: StateSpaceCommonData,
}

impl fmt::Debug for SO2StateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SO2StateSpace")
            .field("name", &self.state_space_data.name)
            .finish()
    }
}

impl Default for SO2StateSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl SO2StateSpace {
    pub fn new() -> Self {
        Self {
            state_space_data: StateSpaceCommonData::default(),
        }
    }
}

impl StateSpace for SO2StateSpace {
    fn get_dimension(&self) -> usize {
        1
    }

    fn get_maximum_extent(&self) -> f64 {
        PI
    }

    fn get_measure(&self) -> f64 {
        2.0 * PI
    }

    fn enforce_bounds(&self, state: &mut [f64]) {
        state[0] = wrap_angle(state[0]);
    }

    fn satisfies_bounds(&self, state: &[f64]) -> bool {
        state[0] >= -PI && state[0] < PI
    }

    fn distance(&self, state1: &[f64], state2: &[f64]) -> f64 {
        let d = (state1[0] - state2[0]).abs().rem_euclid(2.0 * PI);
        d.min(2.0 * PI - d)
    }

    fn equal_states(&self, state1: &[f64], state2: &[f64]) -> bool {
        self.distance(state1, state2) <= f64::EPSILON * 2.0
    }

    /// Follows the shorter arc.
    fn interpolate(&self, from: &[f64], to: &[f64], t: f64, state: &mut [f64]) {
        let diff = wrap_angle(to[0] - from[0]);
        state[0] = wrap_angle(from[0] + diff * t);
    }

    fn alloc_default_state_sampler(&self) -> Box<dyn StateSampler> {
        Box::new(SO2StateSampler { rng: RNG::new() })
    }
}

pub struct SO2StateSampler {
    rng: RNG,
}

impl StateSampler for SO2StateSampler {
    fn sample_uniform(&mut self, state: &mut [f64]) {
        state[0] = self.rng.uniform_real(-PI, PI);
    }

    fn sample_uniform_near(&mut self, state: &mut [f64], near: &[f64], distance: f64) {
        if distance >= PI {
            return self.sample_uniform(state);
        }
        state[0] = wrap_angle(self.rng.uniform_real(near[0] - distance, near[0] + distance));
    }

    fn sample_gaussian(&mut self, state: &mut [f64], mean: &[f64], std_dev: f64) {
        state[0] = wrap_angle(self.rng.gaussian(mean[0], std_dev));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_distance() {
        let space = SO2StateSpace::new();
        let d = space.distance(&[PI - 0.1], &[-PI + 0.1]);
        assert!((d - 0.2).abs() < 1e-12);
        assert!((space.distance(&[0.0], &[PI / 2.0]) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_shorter_arc() {
        let space = SO2StateSpace::new();
        let mut out = [0.0];
        space.interpolate(&[PI - 0.1], &[-PI + 0.1], 0.5, &mut out);
        assert!(space.distance(&out, &[PI]) < 1e-12);
    }

    #[test]
    fn test_sampler_wraps() {
        let space = SO2StateSpace::new();
        let mut sampler = space.alloc_default_state_sampler();
        let mut out = [0.0];
        for _ in 0..100 {
            sampler.sample_gaussian(&mut out, &[PI - 0.01], 1.0);
            assert!(space.satisfies_bounds(&out));
            sampler.sample_uniform_near(&mut out, &[0.0], 0.2);
            assert!(space.distance(&out, &[0.0]) <= 0.2 + 1e-12);
        }
    }
}

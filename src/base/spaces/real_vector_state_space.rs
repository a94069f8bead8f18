use std::fmt;

use anyhow::{anyhow, Result};
use itertools::izip;
use quotient_cover_derive::WithStateSpaceData;

use crate::base::state_sampler::StateSampler;
use crate::base::statespace::{StateSpace, StateSpaceCommonData};
use crate::randomness::RNG;

use super::real_vector_bounds::RealVectorBounds;

#[derive(WithStateSpaceData)]
pub struct RealVectorStateSpace {
    state_space_data: StateSpaceCommonData,
    pub(crate) dimension: usize,
    pub(crate) bounds: RealVectorBounds,
}

impl fmt::Debug for RealVectorStateSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealVectorStateSpace")
            .field("name", &self.state_space_data.name)
            .field("dimension", &self.dimension)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl Default for RealVectorStateSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl RealVectorStateSpace {
    pub fn new() -> Self {
        Self {
            state_space_data: StateSpaceCommonData::default(),
            dimension: 0,
            bounds: RealVectorBounds::new(0),
        }
    }

    pub fn with_bounds(low: &[f64], high: &[f64]) -> Self {
        let mut space = Self::new();
        for (l, h) in low.iter().zip(high) {
            space.add_dimension(*l, *h);
        }
        space
    }

    pub fn from_bounds(bounds: &RealVectorBounds) -> Self {
        Self::with_bounds(bounds.low(), bounds.high())
    }

    pub fn add_dimension(&mut self, min_bound: f64, max_bound: f64) {
        self.dimension += 1;
        self.bounds.low.push(min_bound);
        self.bounds.high.push(max_bound);
    }

    pub fn set_bounds(&mut self, bounds: RealVectorBounds) -> Result<()> {
        if !bounds.check() {
            return Err(anyhow!("High bounds must be greater than low bounds"));
        }
        if bounds.dimension() != self.dimension {
            return Err(anyhow!("Bounds do not match dimension of state space"));
        }
        self.bounds = bounds;
        Ok(())
    }

    pub fn get_bounds(&self) -> &RealVectorBounds {
        &self.bounds
    }
}

impl StateSpace for RealVectorStateSpace {
    fn get_dimension(&self) -> usize {
        self.dimension
    }

    fn get_maximum_extent(&self) -> f64 {
        self.bounds
            .low
            .iter()
            .zip(&self.bounds.high)
            .map(|(low, high)| (high - low).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn get_measure(&self) -> f64 {
        self.bounds.get_volume()
    }

    fn enforce_bounds(&self, state: &mut [f64]) {
        for (s, low, high) in izip!(state, &self.bounds.low, &self.bounds.high) {
            *s = s.clamp(*low, *high);
        }
    }

    fn satisfies_bounds(&self, state: &[f64]) -> bool {
        izip!(state, &self.bounds.low, &self.bounds.high)
            .all(|(s, low, high)| *s >= *low && *s <= *high)
    }

    fn distance(&self, state1: &[f64], state2: &[f64]) -> f64 {
        state1
            .iter()
            .zip(state2)
            .map(|(s1, s2)| (s1 - s2).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn equal_states(&self, state1: &[f64], state2: &[f64]) -> bool {
        state1
            .iter()
            .zip(state2)
            .all(|(s1, s2)| (s1 - s2).abs() <= f64::EPSILON * 2.0)
    }

    fn interpolate(&self, from: &[f64], to: &[f64], time: f64, state: &mut [f64]) {
        for (s, f, t) in izip!(state, from, to) {
            *s = f + (t - f) * time;
        }
    }

    fn alloc_default_state_sampler(&self) -> Box<dyn StateSampler> {
        Box::new(RealVectorStateSampler::new(self))
    }
}

pub struct RealVectorStateSampler {
    bounds: RealVectorBounds,
    rng: RNG,
}

impl RealVectorStateSampler {
    pub fn new(space: &RealVectorStateSpace) -> Self {
        Self {
            bounds: space.bounds.clone(),
            rng: RNG::new(),
        }
    }
}

impl StateSampler for RealVectorStateSampler {
    fn sample_uniform(&mut self, state: &mut [f64]) {
        for (state, low, high) in izip!(state, &self.bounds.low, &self.bounds.high) {
            *state = self.rng.uniform_real(*low, *high);
        }
    }

    fn sample_uniform_near(&mut self, state: &mut [f64], near: &[f64], distance: f64) {
        for (state, near, low, high) in izip!(state, near, &self.bounds.low, &self.bounds.high) {
            *state = self.rng.uniform_real(
                f64::max(*low, near - distance),
                f64::min(*high, near + distance),
            );
        }
    }

    fn sample_gaussian(&mut self, state: &mut [f64], mean: &[f64], std_dev: f64) {
        for (state, mean, low, high) in izip!(state, mean, &self.bounds.low, &self.bounds.high) {
            *state = self.rng.gaussian(*mean, std_dev).clamp(*low, *high);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_interpolate() {
        let space = RealVectorStateSpace::with_bounds(&[-1.0, -1.0], &[1.0, 1.0]);
        assert_eq!(space.distance(&[0.0, 0.0], &[0.3, 0.4]), 0.5);
        let mut out = space.alloc_state();
        space.interpolate(&[0.0, 0.0], &[1.0, 1.0], 0.25, &mut out);
        assert_eq!(&out[..], &[0.25, 0.25]);
        assert!((space.get_maximum_extent() - 8f64.sqrt()).abs() < 1e-12);
        assert_eq!(space.get_measure(), 4.0);
    }

    #[test]
    fn test_sampler_respects_bounds() {
        let space = RealVectorStateSpace::with_bounds(&[0.0, 2.0], &[1.0, 3.0]);
        let mut sampler = space.alloc_default_state_sampler();
        let mut state = space.alloc_state();
        for _ in 0..100 {
            sampler.sample_uniform(&mut state);
            assert!(space.satisfies_bounds(&state));
            sampler.sample_uniform_near(&mut state, &[0.5, 2.5], 0.1);
            assert!(space.distance(&state, &[0.5, 2.5]) <= 0.1 * 2f64.sqrt() + 1e-12);
            sampler.sample_gaussian(&mut state, &[0.5, 2.5], 10.0);
            assert!(space.satisfies_bounds(&state));
        }
    }

    #[test]
    fn test_set_bounds_checks_dimension() {
        let mut space = RealVectorStateSpace::with_bounds(&[0.0], &[1.0]);
        assert!(space
            .set_bounds(RealVectorBounds::from_low_high(&[0.0, 0.0], &[1.0, 1.0]))
            .is_err());
        assert!(space
            .set_bounds(RealVectorBounds::from_low_high(&[1.0], &[0.0]))
            .is_err());
        assert!(space
            .set_bounds(RealVectorBounds::from_low_high(&[-2.0], &[2.0]))
            .is_ok());
    }
}

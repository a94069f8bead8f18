use std::fmt;
use std::sync::Arc;

use super::motion_validator::discrete_motion_validator::DiscreteMotionValidator;
use super::motion_validator::{MotionCheckStats, MotionValidator};
use super::state::State;
use super::state_sampler::StateSampler;
use super::state_validity_checker::StateValidityChecker;
use super::statespace::StateSpace;

/// A state space bundled with the validity and motion checking that goes with it.
pub struct SpaceInformation {
    state_space: Arc<dyn StateSpace>,
    checker: Arc<dyn StateValidityChecker>,
    motion_validator: Box<dyn MotionValidator>,
}

impl fmt::Debug for SpaceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceInformation")
            .field("state_space", &self.state_space)
            .field("has_sufficiency", &self.checker.has_sufficiency())
            .finish()
    }
}

impl SpaceInformation {
    pub fn new(state_space: Arc<dyn StateSpace>, checker: Arc<dyn StateValidityChecker>) -> Self {
        let motion_validator = Box::new(DiscreteMotionValidator::new(
            state_space.clone(),
            checker.clone(),
        ));
        Self {
            state_space,
            checker,
            motion_validator,
        }
    }

    pub fn get_state_space(&self) -> &Arc<dyn StateSpace> {
        &self.state_space
    }

    pub fn get_state_validity_checker(&self) -> &Arc<dyn StateValidityChecker> {
        &self.checker
    }

    pub fn get_state_dimension(&self) -> usize {
        self.state_space.get_dimension()
    }

    pub fn get_maximum_extent(&self) -> f64 {
        self.state_space.get_maximum_extent()
    }

    pub fn get_space_measure(&self) -> f64 {
        self.state_space.get_measure()
    }

    pub fn is_valid(&self, state: &[f64]) -> bool {
        self.state_space.satisfies_bounds(state) && self.checker.is_valid(state)
    }

    /// Clearance of the exact robot; `None` when the checker cannot tell.
    pub fn clearance(&self, state: &[f64]) -> Option<f64> {
        self.checker.clearance(state)
    }

    pub fn has_sufficiency(&self) -> bool {
        self.checker.has_sufficiency()
    }

    pub fn is_sufficient(&self, state: &[f64]) -> bool {
        self.checker.has_sufficiency() && self.checker.is_sufficient(state)
    }

    pub fn sufficient_clearance(&self, state: &[f64]) -> Option<f64> {
        self.checker.sufficient_clearance(state)
    }

    pub fn distance(&self, s1: &[f64], s2: &[f64]) -> f64 {
        self.state_space.distance(s1, s2)
    }

    pub fn interpolate(&self, from: &[f64], to: &[f64], t: f64, state: &mut [f64]) {
        self.state_space.interpolate(from, to, t, state)
    }

    pub fn satisfies_bounds(&self, state: &[f64]) -> bool {
        self.state_space.satisfies_bounds(state)
    }

    pub fn enforce_bounds(&self, state: &mut [f64]) {
        self.state_space.enforce_bounds(state)
    }

    pub fn alloc_state(&self) -> State {
        self.state_space.alloc_state()
    }

    pub fn alloc_state_sampler(&self) -> Box<dyn StateSampler> {
        self.state_space.alloc_default_state_sampler()
    }

    pub fn check_motion(&self, s1: &[f64], s2: &[f64]) -> bool {
        self.motion_validator.check_motion(s1, s2)
    }

    pub fn check_motion_with_last_valid(
        &self,
        s1: &[f64],
        s2: &[f64],
        last_valid: &mut (Option<&mut [f64]>, f64),
    ) -> bool {
        self.motion_validator
            .check_motion_with_last_valid(s1, s2, last_valid)
    }

    pub fn motion_check_stats(&self) -> MotionCheckStats {
        self.motion_validator.motion_check_stats()
    }

    /// Random walk from `start`: `steps` times, move towards a uniform sample and stop at
    /// the last valid state of that motion. Every reached state is appended to `states`.
    /// Returns the number of states added.
    pub fn random_bounce_motion(
        &self,
        sampler: &mut dyn StateSampler,
        start: &[f64],
        steps: usize,
        states: &mut Vec<State>,
    ) -> usize {
        let mut previous = State::from_slice(start);
        let mut target = self.alloc_state();
        let added_before = states.len();

        for _ in 0..steps {
            sampler.sample_uniform(&mut target);
            let mut reached = self.alloc_state();
            let (valid, time) = {
                let mut last_valid = (Some(&mut reached[..]), 0.0);
                let valid = self.check_motion_with_last_valid(&previous, &target, &mut last_valid);
                (valid, last_valid.1)
            };
            if valid {
                reached.copy_from_slice(&target);
            }
            if valid || time > 0.0 {
                previous = reached.clone();
                states.push(reached);
            }
        }
        states.len() - added_before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::state_validity_checker::StateValidityCheckerFn;

    fn si() -> SpaceInformation {
        let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::with_bounds(&[-1.0, -1.0], &[1.0, 1.0]));
        let f: StateValidityCheckerFn = Box::new(|s: &[f64]| s[0] < 0.5);
        let checker: Box<dyn StateValidityChecker> = f.into();
        SpaceInformation::new(space, Arc::from(checker))
    }

    #[test]
    fn test_validity_respects_bounds() {
        let si = si();
        assert!(si.is_valid(&[0.0, 0.0]));
        assert!(!si.is_valid(&[0.7, 0.0]));
        assert!(!si.is_valid(&[0.0, 1.5]));
        assert!(!si.is_sufficient(&[0.0, 0.0]));
    }

    #[test]
    fn test_bounce_motion_stays_valid() {
        let si = si();
        let mut sampler = si.alloc_state_sampler();
        let mut states = Vec::new();
        let added = si.random_bounce_motion(sampler.as_mut(), &[0.0, 0.0], 5, &mut states);
        assert_eq!(added, states.len());
        assert!(added <= 5);
        for s in &states {
            assert!(si.is_valid(s));
        }
    }
}

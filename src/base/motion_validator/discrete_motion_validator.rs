use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::base::{state_validity_checker::StateValidityChecker, statespace::StateSpace};

use super::{MotionCheckStats, MotionValidator};

/// Checks motions by discretizing them into `valid_segment_count` pieces and testing the
/// intermediate states, bisection order first so collisions are found early.
pub struct DiscreteMotionValidator {
    state_space: Arc<dyn StateSpace>,
    checker: Arc<dyn StateValidityChecker>,
    stats: Mutex<MotionCheckStats>,
}

impl DiscreteMotionValidator {
    fn is_valid(&self, state: &[f64]) -> bool {
        self.state_space.satisfies_bounds(state) && self.checker.is_valid(state)
    }

    fn record(&self, valid: bool) {
        let mut stats = self.stats.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if valid {
            stats.valid += 1;
        } else {
            stats.invalid += 1;
        }
    }
}

impl MotionValidator for DiscreteMotionValidator {
    fn new(state_space: Arc<dyn StateSpace>, checker: Arc<dyn StateValidityChecker>) -> Self
    where
        Self: Sized,
    {
        Self {
            state_space,
            checker,
            stats: Mutex::new(MotionCheckStats::default()),
        }
    }

    fn motion_check_stats(&self) -> MotionCheckStats {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn check_motion(&self, s1: &[f64], s2: &[f64]) -> bool {
        if !self.is_valid(s2) {
            self.record(false);
            return false;
        }

        let mut result = true;
        let nd = self.state_space.valid_segment_count(s1, s2);

        let mut pos = VecDeque::new();
        if nd >= 2 {
            pos.push_back((1, nd - 1));

            let mut test = self.state_space.alloc_state();

            while let Some((first, second)) = pos.pop_front() {
                let mid = (first + second) / 2;
                self.state_space
                    .interpolate(s1, s2, mid as f64 / nd as f64, &mut test);

                if !self.is_valid(&test) {
                    result = false;
                    break;
                }

                if first < mid {
                    pos.push_back((first, mid - 1));
                }
                if second > mid {
                    pos.push_back((mid + 1, second));
                }
            }
        }

        self.record(result);
        result
    }

    fn check_motion_with_last_valid(
        &self,
        s1: &[f64],
        s2: &[f64],
        last_valid: &mut (Option<&mut [f64]>, f64),
    ) -> bool {
        // assume motion starts in a valid configuration

        let mut result = true;
        let nd = self.state_space.valid_segment_count(s1, s2);

        if nd > 1 {
            let mut test = self.state_space.alloc_state();

            for j in 1..nd {
                self.state_space
                    .interpolate(s1, s2, j as f64 / nd as f64, &mut test);

                if !self.is_valid(&test) {
                    last_valid.1 = (j - 1) as f64 / nd as f64;
                    if let Some(s) = &mut last_valid.0 {
                        self.state_space.interpolate(s1, s2, last_valid.1, s);
                    }

                    result = false;
                    break;
                }
            }
        }

        if result && !self.is_valid(s2) {
            last_valid.1 = (nd - 1) as f64 / nd as f64;
            if let Some(s) = &mut last_valid.0 {
                self.state_space.interpolate(s1, s2, last_valid.1, s);
            }
            result = false;
        }

        self.record(result);
        result
    }

    fn reset_motion_counter(&self) {
        self.stats
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::state_validity_checker::StateValidityCheckerFn;

    fn validator() -> DiscreteMotionValidator {
        let space: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::with_bounds(&[-1.0], &[1.0]));
        // a wall around zero
        let f: StateValidityCheckerFn = Box::new(|s: &[f64]| s[0].abs() > 0.05);
        let checker: Box<dyn StateValidityChecker> = f.into();
        DiscreteMotionValidator::new(space, Arc::from(checker))
    }

    #[test]
    fn test_motion_through_wall() {
        let validator = validator();
        assert!(!validator.check_motion(&[-0.5], &[0.5]));
        assert!(validator.check_motion(&[0.2], &[0.9]));
        let stats = validator.motion_check_stats();
        assert_eq!(stats.valid_motion_count(), 1);
        assert_eq!(stats.invalid_motion_count(), 1);
        validator.reset_motion_counter();
        assert_eq!(validator.motion_check_stats().checked_motion_count(), 0);
    }

    #[test]
    fn test_last_valid_before_wall() {
        let validator = validator();
        let mut last = [0.0];
        let mut last_valid = (Some(&mut last[..]), 0.0);
        assert!(!validator.check_motion_with_last_valid(&[-0.5], &[0.5], &mut last_valid));
        let time = last_valid.1;
        assert!(time > 0.0 && time < 0.5);
        assert!(last[0] < -0.05);
    }
}

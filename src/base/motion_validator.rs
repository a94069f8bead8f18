use std::sync::Arc;

use super::state_validity_checker::StateValidityChecker;
use super::statespace::StateSpace;

pub mod discrete_motion_validator;

#[derive(Clone, Debug, Default)]
pub struct MotionCheckStats {
    pub valid: u32,
    pub invalid: u32,
}

impl MotionCheckStats {
    pub fn valid_motion_count(&self) -> u32 {
        self.valid
    }

    pub fn invalid_motion_count(&self) -> u32 {
        self.invalid
    }

    pub fn checked_motion_count(&self) -> u32 {
        self.valid + self.invalid
    }

    pub fn reset(&mut self) {
        self.valid = 0;
        self.invalid = 0;
    }
}

pub trait MotionValidator: Send + Sync {
    fn new(state_space: Arc<dyn StateSpace>, checker: Arc<dyn StateValidityChecker>) -> Self
    where
        Self: Sized;

    fn motion_check_stats(&self) -> MotionCheckStats;

    /// Check if the path between two states (from s1 to s2) is valid. This function assumes s1
    /// is valid.
    ///
    /// This function updates the number of valid and invalid segments.
    fn check_motion(&self, s1: &[f64], s2: &[f64]) -> bool;

    /// Check if the path between two states is valid. Also compute the last state that was
    /// valid and the time of that state. The time is used to parametrize the motion from s1 to s2, s1
    /// being at t = 0 and s2 being at t = 1. This function assumes s1 is valid.
    ///
    /// `last_valid.0`, when given, receives the last valid state and `last_valid.1` its time.
    /// If the function returns true, `last_valid` is not modified.
    ///
    /// This function updates the number of valid and invalid segments.
    fn check_motion_with_last_valid(
        &self,
        s1: &[f64],
        s2: &[f64],
        last_valid: &mut (Option<&mut [f64]>, f64),
    ) -> bool;

    fn reset_motion_counter(&self);
}

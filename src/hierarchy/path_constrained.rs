use std::sync::Arc;

use crate::base::state::State;
use crate::base::state_validity_checker::StateValidityChecker;
use crate::util::arc_length_path::ArcLengthPath;

/// Validity of states `(s, rest...)` whose first coordinate is the arc length along a
/// fixed path. The state is checked as `(path(s), rest...)` by the wrapped checker.
///
/// The path is parametrized by arc length, so a clearance of the lifted state is also a
/// clearance of `(s, rest...)`.
pub struct PathConstrainedStateValidityChecker {
    path: Arc<ArcLengthPath>,
    inner: Arc<dyn StateValidityChecker>,
}

impl PathConstrainedStateValidityChecker {
    pub fn new(path: Arc<ArcLengthPath>, inner: Arc<dyn StateValidityChecker>) -> Self {
        Self { path, inner }
    }

    pub fn lift(&self, state: &[f64]) -> State {
        lift(&self.path, state)
    }
}

pub fn lift(path: &ArcLengthPath, state: &[f64]) -> State {
    State::concat(&path.point_at(state[0]), &state[1..])
}

pub fn lift_path(path: &ArcLengthPath, states: &[State]) -> Vec<State> {
    states.iter().map(|state| lift(path, state)).collect()
}

impl StateValidityChecker for PathConstrainedStateValidityChecker {
    fn is_valid(&self, state: &[f64]) -> bool {
        self.inner.is_valid(&self.lift(state))
    }

    fn clearance(&self, state: &[f64]) -> Option<f64> {
        self.inner.clearance(&self.lift(state))
    }

    fn has_sufficiency(&self) -> bool {
        self.inner.has_sufficiency()
    }

    fn is_sufficient(&self, state: &[f64]) -> bool {
        self.inner.is_sufficient(&self.lift(state))
    }

    fn sufficient_clearance(&self, state: &[f64]) -> Option<f64> {
        self.inner.sufficient_clearance(&self.lift(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::robot_world::RobotWorld;
    use crate::util::disk_world::{DiskWorld, RobotShape};

    #[test]
    fn test_checks_lifted_states() {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.8], 0.5);
        let robot = world.add_robot("stick", RobotShape::Stick { half_length: 0.4 });
        let path = Arc::new(
            ArcLengthPath::new(vec![State::from_slice(&[-2.0, 0.0]), State::from_slice(&[2.0, 0.0])]).unwrap(),
        );
        let checker = PathConstrainedStateValidityChecker::new(path.clone(), world.configuration_checker(robot).unwrap());

        assert_eq!(&checker.lift(&[2.0, 0.3])[..], &[0.0, 0.0, 0.3]);
        // horizontal stick passes below the obstacle, the vertical one hits it
        assert!(checker.is_valid(&[2.0, 0.0]));
        assert!(!checker.is_valid(&[2.0, std::f64::consts::FRAC_PI_2]));
        assert!((checker.clearance(&[2.0, 0.0]).unwrap() - 0.3).abs() < 1e-12);

        let lifted = lift_path(&path, &[State::from_slice(&[0.0, 0.1]), State::from_slice(&[4.0, 0.2])]);
        assert_eq!(&lifted[1][..], &[2.0, 0.0, 0.2]);
    }
}

/// Validity oracle of a state space.
///
/// Besides the plain validity test, a checker may report the clearance of a state (the
/// radius of a ball around it, measured in the metric of the state space, that is free of
/// collisions) and may support a second, conservative robot approximation. A state that is
/// valid for the conservative (outer) robot is called sufficiently feasible.
pub trait StateValidityChecker: Send + Sync {
    fn is_valid(&self, state: &[f64]) -> bool;

    /// Distance to the nearest invalid state, if it can be computed. `f64::INFINITY` means
    /// nothing can ever be in collision.
    fn clearance(&self, _state: &[f64]) -> Option<f64> {
        None
    }

    /// Check if the state is valid and return the clearance.
    fn is_valid_with_distance(&self, state: &[f64]) -> (bool, Option<f64>) {
        (self.is_valid(state), self.clearance(state))
    }

    /// Flag indicating that this checker also evaluates an outer robot approximation.
    fn has_sufficiency(&self) -> bool {
        false
    }

    fn is_sufficient(&self, _state: &[f64]) -> bool {
        false
    }

    /// Clearance of the outer robot approximation.
    fn sufficient_clearance(&self, _state: &[f64]) -> Option<f64> {
        None
    }
}

pub type StateValidityCheckerFn = Box<dyn Fn(&[f64]) -> bool + Send + Sync>;

/// A state validity checker that uses a functional approach.
struct FunctionalStateValidityChecker(StateValidityCheckerFn);

impl StateValidityChecker for FunctionalStateValidityChecker {
    fn is_valid(&self, state: &[f64]) -> bool {
        (self.0)(state)
    }
}

// impl that turns function into checker
impl From<StateValidityCheckerFn> for Box<dyn StateValidityChecker> {
    fn from(checker: StateValidityCheckerFn) -> Box<dyn StateValidityChecker> {
        Box::new(FunctionalStateValidityChecker(checker))
    }
}

/// The simplest state validity checker: all states are valid, at infinite clearance.
pub struct AllValidStateValidityChecker;

impl StateValidityChecker for AllValidStateValidityChecker {
    fn is_valid(&self, _state: &[f64]) -> bool {
        true
    }

    fn clearance(&self, _state: &[f64]) -> Option<f64> {
        Some(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_functional_checker() {
        let f: StateValidityCheckerFn = Box::new(|state: &[f64]| state[0] > 0.0);
        let checker: Box<dyn StateValidityChecker> = f.into();
        assert!(checker.is_valid(&[1.0]));
        assert!(!checker.is_valid(&[-1.0]));
        assert_eq!(checker.clearance(&[1.0]), None);
        assert!(!checker.has_sufficiency());
    }

    #[test]
    fn test_all_valid() {
        let checker = AllValidStateValidityChecker;
        assert_eq!(checker.is_valid_with_distance(&[0.0]), (true, Some(f64::INFINITY)));
    }
}

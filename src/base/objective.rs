use std::fmt;

use super::statespace::StateSpace;

/// Cost of a motion or a path.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Cost(pub f64);

impl Cost {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Defines how motions are costed and how costs compare and combine. Graph searches only
/// talk to costs through this trait.
pub trait OptimizationObjective: Send + Sync {
    fn is_cost_better_than(&self, c1: Cost, c2: Cost) -> bool {
        c1.0 < c2.0
    }

    fn combine_costs(&self, c1: Cost, c2: Cost) -> Cost {
        Cost(c1.0 + c2.0)
    }

    fn identity_cost(&self) -> Cost {
        Cost(0.0)
    }

    fn infinite_cost(&self) -> Cost {
        Cost(f64::INFINITY)
    }

    fn motion_cost(&self, s1: &[f64], s2: &[f64]) -> Cost;

    /// Admissible estimate of `motion_cost`.
    fn motion_cost_heuristic(&self, s1: &[f64], s2: &[f64]) -> Cost {
        self.motion_cost(s1, s2)
    }

    fn is_satisfied(&self, cost: Cost) -> bool;
}

/// Path length in the metric of a state space.
pub struct PathLengthOptimizationObjective<'a> {
    space: &'a dyn StateSpace,
    cost_threshold: Cost,
}

impl<'a> PathLengthOptimizationObjective<'a> {
    pub fn new(space: &'a dyn StateSpace) -> Self {
        Self {
            space,
            cost_threshold: Cost(f64::INFINITY),
        }
    }

    pub fn set_cost_threshold(&mut self, threshold: Cost) {
        self.cost_threshold = threshold;
    }
}

impl OptimizationObjective for PathLengthOptimizationObjective<'_> {
    fn motion_cost(&self, s1: &[f64], s2: &[f64]) -> Cost {
        Cost(self.space.distance(s1, s2))
    }

    /// Any path satisfies an infinite threshold.
    fn is_satisfied(&self, cost: Cost) -> bool {
        cost.0 <= self.cost_threshold.0
    }
}

use crate::base::planner_data::PlannerData;
use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::state::State;
use crate::error::Result;

pub mod level_planner;
pub mod multi_quotient;
pub mod planner_common;
pub mod quotient;
pub mod quotient_cover;
pub mod quotient_roadmap;
pub mod strategy;

/// Stable handle of a configuration inside a cover. Handles are never reused, so a handle
/// that outlived its configuration fails to resolve instead of aliasing a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigurationId(pub usize);

impl ConfigurationId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    ExactSolution,
    Timeout,
}

impl PlannerStatus {
    pub fn is_solved(&self) -> bool {
        matches!(self, PlannerStatus::ExactSolution)
    }
}

/// A complete query planner: given a problem it was constructed with, produce a path.
pub trait MotionPlannerInterface {
    fn solve(&mut self, ptc: &PlannerTerminationCondition) -> Result<PlannerStatus>;

    /// The solution of the last successful `solve`, in the finest space.
    fn path(&self) -> Option<&[State]>;

    fn get_planner_data(&self) -> PlannerData;

    fn clear(&mut self);
}

#[macro_use]
pub mod macros;

pub mod base;
pub mod datastructure;
pub mod error;
pub mod hierarchy;
pub mod planners;
pub mod randomness;
pub mod tools;
pub mod util;

pub mod prelude {
    pub use crate::base::space_information::SpaceInformation;
    pub use crate::base::state::State;
    pub use crate::base::state_validity_checker::StateValidityChecker;
    pub use crate::base::statespace::{HasStateSpaceData, StateSpace};
    pub use crate::error::{PlannerError, Result};
    pub use crate::planners::level_planner::LevelPlanner;
    pub use crate::planners::planner_common::HasPlannerData;
    pub use crate::planners::{MotionPlannerInterface, PlannerStatus};
}

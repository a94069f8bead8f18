//! Interactive exploration of a hierarchy of robot approximations: every level plans a
//! path for a finer robot, constrained by the path selected on the level above.

pub mod hierarchical_planner;
pub mod path_constrained;
pub mod path_tree;
pub mod planner_input;
pub mod robot_world;

pub use hierarchical_planner::HierarchicalMotionPlanner;
pub use planner_input::{Layer, PlannerInput};
pub use robot_world::RobotWorld;

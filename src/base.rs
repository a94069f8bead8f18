pub mod motion_validator;
pub mod objective;
pub mod param;
pub mod planner_data;
pub mod planner_termination;
pub mod space_information;
pub mod spaces;
pub mod state;
pub mod state_sampler;
pub mod state_validity_checker;
pub mod statespace;

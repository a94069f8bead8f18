use std::sync::Arc;

use crate::base::state_validity_checker::StateValidityChecker;
use crate::error::InputError;

/// The robots and obstacles a hierarchy plans in.
pub trait RobotWorld: Send + Sync {
    fn robot_count(&self) -> usize;

    fn robot_name(&self, robot: usize) -> Option<&str>;

    /// Checker for states `(x, y)` of the robot reference point. Clearance is the radius
    /// of a free ball around the point for the inner robot approximation; sufficiency
    /// refers to the outer approximation.
    fn position_checker(&self, robot: usize) -> Result<Arc<dyn StateValidityChecker>, InputError>;

    /// Checker for full configurations `(x, y, yaw)`.
    fn configuration_checker(&self, robot: usize) -> Result<Arc<dyn StateValidityChecker>, InputError>;

    /// Weight of the rotation in the configuration metric, so that the metric bounds the
    /// displacement of every point of the body.
    fn rotation_weight(&self, robot: usize) -> Result<f64, InputError>;
}

use std::sync::Arc;

use anyhow::Result;

use self::real_vector_bounds::RealVectorBounds;
use self::real_vector_state_space::RealVectorStateSpace;
use self::so2_state_space::SO2StateSpace;
use super::statespace::{CompoundStateSpace, StateSpace};

pub mod real_vector_bounds;
pub mod real_vector_state_space;
pub mod so2_state_space;

/// R^n x SO(2). The rotation component is weighted by `rotation_weight`, which makes the
/// metric an upper bound on the displacement of any point within `rotation_weight` of
/// the origin of the body frame.
pub fn rn_so2_state_space(bounds: &RealVectorBounds, rotation_weight: f64) -> Result<CompoundStateSpace> {
    let position: Arc<dyn StateSpace> = Arc::new(RealVectorStateSpace::from_bounds(bounds));
    let rotation: Arc<dyn StateSpace> = Arc::new(SO2StateSpace::new());
    let mut space = CompoundStateSpace::from_components(vec![position, rotation], vec![1.0, rotation_weight])?;
    space.lock();
    Ok(space)
}

/// Planar rigid body configurations (x, y, yaw).
pub fn se2_state_space(bounds: &RealVectorBounds, rotation_weight: f64) -> Result<CompoundStateSpace> {
    rn_so2_state_space(&bounds.slice(0..2), rotation_weight)
}

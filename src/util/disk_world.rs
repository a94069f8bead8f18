use std::sync::Arc;

use nalgebra::Vector2;

use crate::base::state_validity_checker::StateValidityChecker;
use crate::error::InputError;
use crate::hierarchy::robot_world::RobotWorld;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiskObstacle {
    pub center: Vector2<f64>,
    pub radius: f64,
}

impl DiskObstacle {
    /// Signed distance from `p` to the obstacle boundary.
    fn distance(&self, p: &Vector2<f64>) -> f64 {
        (p - self.center).norm() - self.radius
    }

    fn segment_distance(&self, a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
        let ab = b - a;
        let length_squared = ab.norm_squared();
        let t = if length_squared > 0.0 {
            ((self.center - a).dot(&ab) / length_squared).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = a + ab * t;
        (closest - self.center).norm() - self.radius
    }
}

/// Planar robot bodies. The reference point of a body is its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RobotShape {
    Disk { radius: f64 },
    /// Segment of length `2 * half_length`, oriented along the yaw.
    Stick { half_length: f64 },
}

impl RobotShape {
    /// Largest disk around the reference point contained in the body for every yaw.
    pub fn inner_radius(&self) -> f64 {
        match *self {
            RobotShape::Disk { radius } => radius,
            RobotShape::Stick { .. } => 0.0,
        }
    }

    /// Smallest disk around the reference point containing the body for every yaw.
    pub fn outer_radius(&self) -> f64 {
        match *self {
            RobotShape::Disk { radius } => radius,
            RobotShape::Stick { half_length } => half_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    pub name: String,
    pub shape: RobotShape,
}

/// Circular obstacles in the plane.
#[derive(Debug, Clone, Default)]
pub struct DiskWorld {
    obstacles: Arc<Vec<DiskObstacle>>,
    robots: Vec<Robot>,
}

impl DiskWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_obstacle(mut self, center: [f64; 2], radius: f64) -> Self {
        Arc::make_mut(&mut self.obstacles).push(DiskObstacle {
            center: Vector2::new(center[0], center[1]),
            radius,
        });
        self
    }

    /// Returns the index of the new robot.
    pub fn add_robot(&mut self, name: &str, shape: RobotShape) -> usize {
        self.robots.push(Robot {
            name: name.to_string(),
            shape,
        });
        self.robots.len() - 1
    }

    pub fn obstacles(&self) -> &[DiskObstacle] {
        &self.obstacles
    }

    pub fn robot(&self, robot: usize) -> Result<&Robot, InputError> {
        self.robots.get(robot).ok_or(InputError::UnknownRobot(robot))
    }

    /// Distance from `p` to the nearest obstacle, infinite in an empty world.
    pub fn point_clearance(&self, p: &Vector2<f64>) -> f64 {
        point_clearance(&self.obstacles, p)
    }

    /// Distance from the body placed at `(x, y, yaw)` to the nearest obstacle.
    pub fn shape_clearance(&self, shape: RobotShape, position: &Vector2<f64>, yaw: f64) -> f64 {
        shape_clearance(&self.obstacles, shape, position, yaw)
    }
}

fn point_clearance(obstacles: &[DiskObstacle], p: &Vector2<f64>) -> f64 {
    obstacles
        .iter()
        .map(|o| o.distance(p))
        .fold(f64::INFINITY, f64::min)
}

fn shape_clearance(obstacles: &[DiskObstacle], shape: RobotShape, position: &Vector2<f64>, yaw: f64) -> f64 {
    match shape {
        RobotShape::Disk { radius } => point_clearance(obstacles, position) - radius,
        RobotShape::Stick { half_length } => {
            let direction = Vector2::new(yaw.cos(), yaw.sin()) * half_length;
            let (a, b) = (position - direction, position + direction);
            obstacles
                .iter()
                .map(|o| o.segment_distance(&a, &b))
                .fold(f64::INFINITY, f64::min)
        }
    }
}

/// Validity of the robot reference point in the plane, state `(x, y)`. A position is
/// necessary if the inner disk fits, sufficient if the outer disk fits.
pub struct PositionChecker {
    obstacles: Arc<Vec<DiskObstacle>>,
    shape: RobotShape,
}

impl PositionChecker {
    fn position_clearance(&self, state: &[f64]) -> f64 {
        point_clearance(&self.obstacles, &Vector2::new(state[0], state[1]))
    }
}

impl StateValidityChecker for PositionChecker {
    fn is_valid(&self, state: &[f64]) -> bool {
        self.position_clearance(state) - self.shape.inner_radius() > 0.0
    }

    fn clearance(&self, state: &[f64]) -> Option<f64> {
        Some(self.position_clearance(state) - self.shape.inner_radius())
    }

    fn has_sufficiency(&self) -> bool {
        true
    }

    fn is_sufficient(&self, state: &[f64]) -> bool {
        self.position_clearance(state) - self.shape.outer_radius() > 0.0
    }

    fn sufficient_clearance(&self, state: &[f64]) -> Option<f64> {
        Some(self.position_clearance(state) - self.shape.outer_radius())
    }
}

/// Validity of the full body, state `(x, y, yaw)`.
pub struct ConfigurationChecker {
    obstacles: Arc<Vec<DiskObstacle>>,
    shape: RobotShape,
}

impl StateValidityChecker for ConfigurationChecker {
    fn is_valid(&self, state: &[f64]) -> bool {
        self.clearance(state).map_or(false, |c| c > 0.0)
    }

    fn clearance(&self, state: &[f64]) -> Option<f64> {
        let position = Vector2::new(state[0], state[1]);
        Some(shape_clearance(&self.obstacles, self.shape, &position, state[2]))
    }
}

impl RobotWorld for DiskWorld {
    fn robot_count(&self) -> usize {
        self.robots.len()
    }

    fn robot_name(&self, robot: usize) -> Option<&str> {
        self.robots.get(robot).map(|r| r.name.as_str())
    }

    fn position_checker(&self, robot: usize) -> Result<Arc<dyn StateValidityChecker>, InputError> {
        Ok(Arc::new(PositionChecker {
            obstacles: self.obstacles.clone(),
            shape: self.robot(robot)?.shape,
        }))
    }

    fn configuration_checker(&self, robot: usize) -> Result<Arc<dyn StateValidityChecker>, InputError> {
        Ok(Arc::new(ConfigurationChecker {
            obstacles: self.obstacles.clone(),
            shape: self.robot(robot)?.shape,
        }))
    }

    fn rotation_weight(&self, robot: usize) -> Result<f64, InputError> {
        Ok(self.robot(robot)?.shape.outer_radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> DiskWorld {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        world.add_robot("disk", RobotShape::Disk { radius: 0.25 });
        world.add_robot("stick", RobotShape::Stick { half_length: 0.5 });
        world
    }

    #[test]
    fn test_point_clearance() {
        let world = world();
        assert!((world.point_clearance(&Vector2::new(-2.0, 0.0)) - 1.0).abs() < 1e-12);
        assert!(DiskWorld::new().point_clearance(&Vector2::new(0.0, 0.0)).is_infinite());
    }

    #[test]
    fn test_position_checker_sufficiency() {
        let world = world();
        let stick = world.position_checker(1).unwrap();
        // reference point free, but the stick may hit the obstacle for some yaw
        assert!(stick.is_valid(&[-1.3, 0.0]));
        assert!(!stick.is_sufficient(&[-1.3, 0.0]));
        assert!(stick.is_sufficient(&[-2.0, 0.0]));
        assert!((stick.sufficient_clearance(&[-2.0, 0.0]).unwrap() - 0.5).abs() < 1e-12);

        let disk = world.position_checker(0).unwrap();
        assert!(!disk.is_valid(&[-1.2, 0.0]));
        assert!((disk.clearance(&[-2.0, 0.0]).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_stick_orientation_matters() {
        let world = world();
        let stick = world.configuration_checker(1).unwrap();
        // pointing at the obstacle
        assert!(!stick.is_valid(&[-1.3, 0.0, 0.0]));
        // tangential
        assert!(stick.is_valid(&[-1.3, 0.0, std::f64::consts::FRAC_PI_2]));
        assert_eq!(world.rotation_weight(1).unwrap(), 0.5);
        assert!(world.configuration_checker(7).is_err());
    }
}

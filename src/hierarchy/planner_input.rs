use std::fmt;

use crate::error::InputError;
use crate::planners::strategy::StrategyKind;

const HIERARCHICAL_PREFIX: &str = "hierarchical:";

/// One level of a robot hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub level: usize,
    /// Robot planned with on this level.
    pub inner_index: usize,
    /// Robot used as outer approximation, the inner robot if there is none.
    pub outer_index: usize,
    pub is_inner_outer: bool,
    pub kind: String,
}

/// Query and settings of a hierarchical planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerInput {
    /// Expected as `hierarchical:<strategy>`.
    pub algorithm: String,
    pub q_init: Vec<f64>,
    pub q_goal: Vec<f64>,
    pub se3_min: Vec<f64>,
    pub se3_max: Vec<f64>,
    pub free_floating: bool,
    pub timestep_min: f64,
    pub timestep_max: f64,
    pub max_planning_time: f64,
    pub epsilon_goal_region: f64,
    pub layers: Vec<Layer>,
}

impl Default for PlannerInput {
    fn default() -> Self {
        Self {
            algorithm: String::new(),
            q_init: Vec::new(),
            q_goal: Vec::new(),
            se3_min: Vec::new(),
            se3_max: Vec::new(),
            free_floating: true,
            timestep_min: 0.01,
            timestep_max: 0.1,
            max_planning_time: 10.0,
            epsilon_goal_region: 0.01,
            layers: Vec::new(),
        }
    }
}

impl PlannerInput {
    pub fn new(algorithm: &str, q_init: Vec<f64>, q_goal: Vec<f64>) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            q_init,
            q_goal,
            ..Self::default()
        }
    }

    pub fn with_workspace_bounds(mut self, min: Vec<f64>, max: Vec<f64>) -> Self {
        self.se3_min = min;
        self.se3_max = max;
        self
    }

    /// Append a level. Without `outer_index` the robot is its own outer approximation.
    pub fn with_layer(mut self, inner_index: usize, outer_index: Option<usize>, kind: &str) -> Self {
        self.layers.push(Layer {
            level: self.layers.len(),
            inner_index,
            outer_index: outer_index.unwrap_or(inner_index),
            is_inner_outer: outer_index.is_some(),
            kind: kind.to_string(),
        });
        self
    }

    /// Robot index of every level, coarse to fine.
    pub fn robot_idxs(&self) -> Vec<usize> {
        self.layers.iter().map(|layer| layer.inner_index).collect()
    }

    /// Strategy named after the `hierarchical:` prefix.
    pub fn strategy(&self) -> Result<StrategyKind, InputError> {
        if self.algorithm.is_empty() || self.algorithm == "NONE" {
            return Err(InputError::MissingAlgorithm);
        }
        match self.algorithm.strip_prefix(HIERARCHICAL_PREFIX) {
            Some(name) if !name.is_empty() => name.parse(),
            _ => Err(InputError::MalformedAlgorithm(self.algorithm.clone())),
        }
    }

    /// Everything a hierarchical planner needs before it can start.
    pub fn validate(&self) -> Result<StrategyKind, InputError> {
        let strategy = self.strategy()?;
        if !self.free_floating {
            return Err(InputError::NotFreeFloating);
        }
        if self.q_init.len() != self.q_goal.len() {
            return Err(InputError::ConfigurationSizeMismatch {
                init: self.q_init.len(),
                goal: self.q_goal.len(),
            });
        }
        if self.layers.is_empty() {
            return Err(InputError::NoLevels);
        }
        Ok(strategy)
    }
}

impl fmt::Display for PlannerInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[PlannerInput] {}", self.algorithm)?;
        writeln!(f, "  q_init             : {:?}", self.q_init)?;
        writeln!(f, "  q_goal             : {:?}", self.q_goal)?;
        writeln!(f, "  se3 bounds         : {:?} .. {:?}", self.se3_min, self.se3_max)?;
        writeln!(f, "  timestep           : [{}, {}]", self.timestep_min, self.timestep_max)?;
        writeln!(f, "  max planning time  : {} s", self.max_planning_time)?;
        writeln!(f, "  epsilon goalregion : {}", self.epsilon_goal_region)?;
        write!(f, "  robot indices      : {:?}", self.robot_idxs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(algorithm: &str) -> PlannerInput {
        PlannerInput::new(algorithm, vec![-2.0, 0.0, 0.0], vec![2.0, 0.0, 0.0])
            .with_layer(0, None, "R2")
            .with_layer(1, Some(2), "SE2")
    }

    #[test]
    fn test_layers() {
        let input = input("hierarchical:cover");
        assert_eq!(input.robot_idxs(), vec![0, 1]);
        assert!(!input.layers[0].is_inner_outer);
        assert_eq!(input.layers[0].outer_index, 0);
        assert!(input.layers[1].is_inner_outer);
        assert_eq!(input.layers[1].level, 1);
        assert_eq!(input.validate(), Ok(StrategyKind::QuotientCover));
        assert!(input.to_string().contains("robot indices"));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(input("").validate(), Err(InputError::MissingAlgorithm));
        assert_eq!(
            input("hierarchical").validate(),
            Err(InputError::MalformedAlgorithm("hierarchical".to_string()))
        );
        assert_eq!(
            input("hierarchical:").validate(),
            Err(InputError::MalformedAlgorithm("hierarchical:".to_string()))
        );
        assert_eq!(
            input("hierarchical:rrt").validate(),
            Err(InputError::UnknownAlgorithm("rrt".to_string()))
        );

        let mut fixed = input("hierarchical:qsp");
        fixed.free_floating = false;
        assert_eq!(fixed.validate(), Err(InputError::NotFreeFloating));

        let mut mismatch = input("hierarchical:qsp");
        mismatch.q_goal.pop();
        assert_eq!(
            mismatch.validate(),
            Err(InputError::ConfigurationSizeMismatch { init: 3, goal: 2 })
        );

        let empty = PlannerInput::new("hierarchical:qsp", vec![0.0], vec![1.0]);
        assert_eq!(empty.validate(), Err(InputError::NoLevels));
    }
}

use thiserror::Error;

use crate::planners::ConfigurationId;

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;

/// Invariant violations of the planners. These are unrecoverable for the planner that
/// raised them and are handed back to whoever drives it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("goal bias ({goal_bias}) plus voronoi bias ({voronoi_bias}) must stay below {max_bias}")]
    BiasTooLarge {
        goal_bias: f64,
        voronoi_bias: f64,
        max_bias: f64,
    },
    #[error("{0}: could not add start state")]
    InvalidStart(String),
    #[error("{0}: could not add goal state")]
    InvalidGoal(String),
    #[error("{0}: no problem definition (start and goal) was given")]
    MissingProblemDefinition(String),
    #[error("no coset found for configuration {0:?}")]
    MissingCoset(Option<ConfigurationId>),
    #[error("configuration {0:?} equals its own neighbor")]
    NeighborhoodEqualsNeighbor(ConfigurationId),
    #[error("NaN distance between configurations {0:?} and {1:?}")]
    NaNDistance(Option<ConfigurationId>, Option<ConfigurationId>),
    #[error("neighborhood radius {radius} is below the minimum {minimum}")]
    NeighborhoodTooSmall { radius: f64, minimum: f64 },
    #[error("configuration {0:?} is not part of the cover")]
    UnknownConfiguration(ConfigurationId),
    #[error("parent level cannot serve as quotient for {0}")]
    IncompatibleParent(String),
    #[error("graph of {0} has no vertices to sample from")]
    EmptyGraph(String),
    #[error("no path between {0:?} and {1:?}")]
    NoPath(ConfigurationId, ConfigurationId),
    #[error(transparent)]
    StateSpace(#[from] StateSpaceError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateSpaceError {
    #[error("state has dimension {found}, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("cannot build a quotient of {q1} by {q0}")]
    UnsupportedQuotient { q1: String, q0: String },
}

/// Problems with the declarative planner input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("no planner algorithm given")]
    MissingAlgorithm,
    #[error("usage hierarchical:<algorithm>, got `{0}`")]
    MalformedAlgorithm(String),
    #[error("unknown planner algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("hierarchical planning requires a free-floating robot")]
    NotFreeFloating,
    #[error("init configuration has {init} entries but goal configuration has {goal}")]
    ConfigurationSizeMismatch { init: usize, goal: usize },
    #[error("planner input declares no hierarchy levels")]
    NoLevels,
    #[error("workspace bounds need at least two matching coordinates")]
    MissingWorkspaceBounds,
    #[error("robot index {0} does not exist in the world")]
    UnknownRobot(usize),
}

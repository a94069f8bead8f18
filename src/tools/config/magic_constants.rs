/// We strive to minimize the use of constants in the code, but at
/// places, this is necessary. These constants typically do not
/// have to be changed, but we chose to expose their functionality
/// for the more curious user.
pub mod magic {
    use std::time::Duration;

    /// Upper bound (exclusive) on the sum of goal bias and voronoi bias of the cover
    /// planner. The rest of the probability mass goes to boundary sampling.
    pub const MAX_BIAS: f64 = 0.9;

    /// The goal is absorbed into the cover once the neighborhood of its nearest cover
    /// configuration is closer than this.
    pub const GOAL_CONNECTION_EPSILON: f64 = 1e-10;

    /// Seconds spent in one roadmap construction phase. Growing takes twice this value,
    /// expanding takes it once.
    pub const ROADMAP_BUILD_TIME: f64 = 0.2;

    /// Number of neighbors a new roadmap milestone tries to connect to.
    pub const DEFAULT_NEAREST_NEIGHBORS: usize = 10;

    /// Number of steps of a random bounce motion when expanding a roadmap.
    pub const MAX_RANDOM_BOUNCE_STEPS: usize = 5;

    /// Maximum number of sampling attempts to find a valid state,
    /// without checking whether the allowed time elapsed. This value
    /// should not really be changed.
    pub const FIND_VALID_STATE_ATTEMPTS_WITHOUT_TERMINATION_CHECK: u32 = 2;

    /// Standard deviation of the Gaussian used to pick a direction when sampling on the
    /// boundary of a neighborhood. Only the direction of the draw matters.
    pub const BOUNDARY_SAMPLING_STD_DEV: f64 = 1.0;

    /// For planners: if default values are to be used for
    /// the maximum length of motions, this constant defines what
    /// fraction of the space extent is to be used as the maximum
    /// length of a motion
    pub const MAX_MOTION_LENGTH_AS_SPACE_EXTENT_FRACTION: f64 = 0.2;

    /// Number of levels the hierarchical planner expands at most.
    pub const DEFAULT_HIERARCHY_MAX_DEPTH: usize = 3;

    /// Sleep of the thread polling a roadmap for a start-goal connection.
    pub const SOLUTION_POLLING_INTERVAL: Duration = Duration::from_millis(1);
}

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

type TerminationFn = dyn Fn() -> bool + Send + Sync;

/// A predicate that planners poll at each iteration of their outer loops. Evaluating to
/// `true` means the planner should stop as soon as possible.
///
/// Termination is cooperative: a long validity check in progress is never interrupted.
#[derive(Clone)]
pub struct PlannerTerminationCondition {
    condition: Arc<TerminationFn>,
}

impl fmt::Debug for PlannerTerminationCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerTerminationCondition")
            .field("terminated", &self.eval())
            .finish()
    }
}

impl PlannerTerminationCondition {
    pub fn new<F>(condition: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Arc::new(condition),
        }
    }

    /// Terminates once `duration` has elapsed from now.
    pub fn timed(duration: Duration) -> Self {
        let deadline = Instant::now() + duration;
        Self::new(move || Instant::now() >= deadline)
    }

    pub fn timed_secs(seconds: f64) -> Self {
        Self::timed(Duration::from_secs_f64(seconds.max(0.0)))
    }

    /// Terminates once `flag` is raised, e.g. by a thread that found a solution.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self::new(move || flag.load(Ordering::Acquire))
    }

    pub fn never() -> Self {
        Self::new(|| false)
    }

    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Terminates as soon as either condition does.
    pub fn or(first: &Self, second: &Self) -> Self {
        let first = first.condition.clone();
        let second = second.condition.clone();
        Self::new(move || first() || second())
    }

    pub fn eval(&self) -> bool {
        (self.condition)()
    }
}

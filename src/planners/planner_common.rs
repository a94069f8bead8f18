use crate::randomness::RNG;

/// Access to the bookkeeping every level planner carries. Implemented through
/// `#[derive(WithPlannerData)]`.
pub trait HasPlannerData {
    fn planner_name_prefix() -> &'static str
    where
        Self: Sized;

    fn planner_data(&self) -> &PlannerCommonData;

    fn planner_data_mut(&mut self) -> &mut PlannerCommonData;
}

#[derive(Debug, Clone)]
pub struct PlannerCommonData {
    /// Prefix plus level, e.g. `QuotientCover2`.
    pub name: String,
    pub level: usize,
    pub iterations: u64,
    pub rng: RNG,
}

impl PlannerCommonData {
    pub fn new(prefix: &str, level: usize) -> Self {
        Self {
            name: format!("{}{}", prefix, level),
            level,
            iterations: 0,
            rng: RNG::new(),
        }
    }

    /// Replace the planner generator with a deterministic one.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = RNG::with_seed(seed);
    }
}

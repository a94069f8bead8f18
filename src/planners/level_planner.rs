use downcast_rs::{impl_downcast, DowncastSync};

use crate::base::param::{ParamSet, ParamValue};
use crate::base::planner_data::PlannerData;
use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::state::State;
use crate::base::state_sampler::StateSampler;
use crate::error::{PlannerError, Result};
use crate::randomness::RNG;

use super::planner_common::HasPlannerData;
use super::quotient::Quotient;
use super::ConfigurationId;

/// One level of a quotient hierarchy.
///
/// Levels never hold on to each other. Every call that needs the coarser levels receives
/// them as `ancestors`, ordered coarse to fine; the direct parent is the last entry.
pub trait LevelPlanner: HasPlannerData + DowncastSync {
    fn quotient(&self) -> &Quotient;

    fn set_problem_definition(&mut self, start: State, goal: State);

    fn setup(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()>;

    /// Spend effort on improving the level data structure, until `ptc` fires at the latest.
    fn grow(
        &mut self,
        ancestors: &[Box<dyn LevelPlanner>],
        ptc: &PlannerTerminationCondition,
    ) -> Result<()>;

    fn has_solution(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<bool>;

    /// Start to goal states, if start and goal are connected.
    fn get_solution(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<Option<Vec<State>>>;

    fn get_planner_data(&self) -> PlannerData;

    fn clear(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()>;

    /// Draw a state of this level near its data structure into `out`, so that a finer
    /// level can lift it. `rng` and `sampler` belong to the caller. Returns the
    /// configuration the sample was drawn around, when it has one.
    fn sample_from_graph(
        &self,
        rng: &mut RNG,
        sampler: &mut dyn StateSampler,
        out: &mut [f64],
    ) -> Result<Option<ConfigurationId>>;

    fn params(&self) -> &ParamSet;

    /// Returns false for unknown names and mistyped values.
    fn set_param(&mut self, name: &str, value: ParamValue) -> bool;

    fn level(&self) -> usize {
        self.planner_data().level
    }

    fn get_name(&self) -> &str {
        &self.planner_data().name
    }
}
impl_downcast!(sync LevelPlanner);

/// Checks shared by every level planner at setup: the first level has no quotient and no
/// ancestors, every other level has both.
pub fn check_ancestry(planner: &dyn LevelPlanner, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()> {
    let atomic = planner.quotient().is_atomic();
    if atomic != ancestors.is_empty() {
        fatal!(
            PlannerError::IncompatibleParent(planner.get_name().to_string()),
            "{}: level {} has {} ancestors but quotient {:?}",
            planner.get_name(),
            planner.level(),
            ancestors.len(),
            planner.quotient().kind()
        );
    }
    Ok(())
}

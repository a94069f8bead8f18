use std::sync::Arc;

use tracing::{info, warn};

use crate::base::planner_data::PlannerData;
use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::space_information::SpaceInformation;
use crate::base::state::State;
use crate::error::{PlannerError, Result};

use super::level_planner::LevelPlanner;
use super::quotient::Quotient;
use super::strategy::{create_level_planner, StrategyKind, StrategyParams};
use super::{MotionPlannerInterface, PlannerStatus};

/// Solves a query level by level, coarse to fine. Each level starts once the level below
/// it connected start and goal, and uses that level to guide its sampling.
pub struct MultiQuotient {
    levels: Vec<Box<dyn LevelPlanner>>,
    level_paths: Vec<Vec<State>>,
}

impl MultiQuotient {
    /// `levels` ordered coarse to fine. Start and goal are given in the finest space and
    /// projected down to every coarser level.
    pub fn new(levels: Vec<Box<dyn LevelPlanner>>, start: State, goal: State) -> Result<Self> {
        if levels.is_empty() {
            fatal!(PlannerError::MissingProblemDefinition("MultiQuotient".to_string()));
        }
        let mut levels = levels;
        let (mut start, mut goal) = (start, goal);
        for level in levels.iter_mut().rev() {
            let quotient = level.quotient();
            let (start_below, goal_below) = if quotient.is_atomic() {
                (None, None)
            } else {
                (Some(project(quotient, &start)), Some(project(quotient, &goal)))
            };
            level.set_problem_definition(start, goal);
            match (start_below, goal_below) {
                (Some(s), Some(g)) => {
                    start = s;
                    goal = g;
                }
                _ => break,
            }
        }
        Ok(Self {
            levels,
            level_paths: Vec::new(),
        })
    }

    /// One level planner of `kind` per space, spaces ordered coarse to fine.
    pub fn from_spaces(
        kind: StrategyKind,
        spaces: Vec<SpaceInformation>,
        params: &StrategyParams,
        start: State,
        goal: State,
    ) -> Result<Self> {
        let mut levels = Vec::with_capacity(spaces.len());
        let mut below = None;
        for (level, si) in spaces.into_iter().enumerate() {
            let space = Arc::clone(si.get_state_space());
            let quotient = Quotient::new(si, below.take())?;
            levels.push(create_level_planner(kind, quotient, params, level));
            below = Some(space);
        }
        Self::new(levels, start, goal)
    }

    pub fn levels(&self) -> &[Box<dyn LevelPlanner>] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Solutions of the levels solved by the last `solve`, coarse to fine.
    pub fn level_paths(&self) -> &[Vec<State>] {
        &self.level_paths
    }
}

fn project(quotient: &Quotient, state: &[f64]) -> State {
    let mut projected = State::zeros(quotient.q0_dimension());
    quotient.extract_q0_subspace(state, &mut projected);
    projected
}

impl MotionPlannerInterface for MultiQuotient {
    fn solve(&mut self, ptc: &PlannerTerminationCondition) -> Result<PlannerStatus> {
        self.level_paths.clear();
        for k in 0..self.levels.len() {
            let (ancestors, rest) = self.levels.split_at_mut(k);
            let ancestors: &[Box<dyn LevelPlanner>] = ancestors;
            let level = &mut rest[0];

            level.setup(ancestors)?;
            while !level.has_solution(ancestors)? {
                if ptc.eval() {
                    info!("{}: no solution before termination", level.get_name());
                    return Ok(PlannerStatus::Timeout);
                }
                level.grow(ancestors, ptc)?;
            }
            match level.get_solution(ancestors)? {
                Some(path) => {
                    info!("{}: found solution with {} states", level.get_name(), path.len());
                    self.level_paths.push(path);
                }
                None => return Ok(PlannerStatus::Timeout),
            }
        }
        Ok(PlannerStatus::ExactSolution)
    }

    fn path(&self) -> Option<&[State]> {
        if self.level_paths.len() < self.levels.len() {
            return None;
        }
        self.level_paths.last().map(Vec::as_slice)
    }

    fn get_planner_data(&self) -> PlannerData {
        let mut data = PlannerData::default();
        for level in &self.levels {
            data.extend(level.get_planner_data());
        }
        data
    }

    fn clear(&mut self) {
        self.level_paths.clear();
        for k in 0..self.levels.len() {
            let (ancestors, rest) = self.levels.split_at_mut(k);
            if let Err(err) = rest[0].clear(ancestors) {
                warn!("{}: clear failed: {}", rest[0].get_name(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::spaces::real_vector_bounds::RealVectorBounds;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::spaces::se2_state_space;
    use crate::base::state_validity_checker::StateValidityChecker;
    use crate::hierarchy::robot_world::RobotWorld;
    use crate::planners::quotient_cover::QuotientCover;
    use crate::util::disk_world::{DiskWorld, RobotShape};

    fn spaces(world: &DiskWorld, robot: usize) -> Vec<SpaceInformation> {
        let bounds = RealVectorBounds::from_low_high(&[-4.0, -4.0], &[4.0, 4.0]);
        let r2 = SpaceInformation::new(
            Arc::new(RealVectorStateSpace::from_bounds(&bounds)),
            world.position_checker(robot).unwrap(),
        );
        let weight = world.rotation_weight(robot).unwrap();
        let se2 = SpaceInformation::new(
            Arc::new(se2_state_space(&bounds, weight).unwrap()),
            world.configuration_checker(robot).unwrap(),
        );
        vec![r2, se2]
    }

    fn world() -> (DiskWorld, usize) {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        let robot = world.add_robot("stick", RobotShape::Stick { half_length: 0.3 });
        (world, robot)
    }

    #[test]
    fn test_projects_problem_to_every_level() {
        let (world, robot) = world();
        let planner = MultiQuotient::from_spaces(
            StrategyKind::QuotientCover,
            spaces(&world, robot),
            &StrategyParams::default(),
            State::from_slice(&[-2.0, 0.0, 0.5]),
            State::from_slice(&[2.0, 0.0, 0.0]),
        )
        .unwrap();
        assert_eq!(planner.level_count(), 2);
        assert!(planner.levels()[0].quotient().is_atomic());
        assert_eq!(planner.levels()[1].quotient().q0_dimension(), 2);
        assert!(planner.path().is_none());
    }

    #[test]
    fn test_cover_hierarchy_solves_r2_then_se2() {
        let (world, robot) = world();
        let mut planner = MultiQuotient::from_spaces(
            StrategyKind::QuotientCover,
            spaces(&world, robot),
            &StrategyParams::default(),
            State::from_slice(&[-2.0, 0.0, 0.5]),
            State::from_slice(&[2.0, 0.0, 0.0]),
        )
        .unwrap();
        let status = planner.solve(&PlannerTerminationCondition::timed_secs(30.0)).unwrap();
        assert_eq!(status, PlannerStatus::ExactSolution);
        assert_eq!(planner.level_paths().len(), 2);
        assert_eq!(&planner.level_paths()[0][0][..], &[-2.0, 0.0]);

        let path = planner.path().unwrap();
        assert_eq!(&path[0][..], &[-2.0, 0.0, 0.5]);
        assert_eq!(&path[path.len() - 1][..], &[2.0, 0.0, 0.0]);
        let checker = world.configuration_checker(robot).unwrap();
        assert!(path.iter().all(|s| checker.is_valid(s)));

        let fine = planner.levels()[1].as_ref().downcast_ref::<QuotientCover>().unwrap();
        assert!(fine.configurations().all(|q| q.coset.is_some()));

        let data = planner.get_planner_data();
        assert_eq!(data.start_vertices().count(), 2);

        planner.clear();
        assert!(planner.path().is_none());
    }

    #[test]
    fn test_roadmap_hierarchy_lifts_parent_samples() {
        let (world, robot) = world();
        let mut planner = MultiQuotient::from_spaces(
            StrategyKind::QuotientRoadmap,
            spaces(&world, robot),
            &StrategyParams::default(),
            State::from_slice(&[-2.0, 0.0, 0.5]),
            State::from_slice(&[2.0, 0.0, 0.0]),
        )
        .unwrap();
        let status = planner.solve(&PlannerTerminationCondition::timed_secs(30.0)).unwrap();
        assert_eq!(status, PlannerStatus::ExactSolution);
        let path = planner.path().unwrap();
        assert_eq!(&path[0][..], &[-2.0, 0.0, 0.5]);
        assert_eq!(&path[path.len() - 1][..], &[2.0, 0.0, 0.0]);
    }

    /// Free line of constant clearance.
    struct OpenLine;

    impl StateValidityChecker for OpenLine {
        fn is_valid(&self, _state: &[f64]) -> bool {
            true
        }

        fn clearance(&self, _state: &[f64]) -> Option<f64> {
            Some(0.5)
        }
    }

    #[test]
    fn test_three_level_cover_links_cosets_through_grandparent() {
        let (world, robot) = world();
        let line = SpaceInformation::new(
            Arc::new(RealVectorStateSpace::with_bounds(&[-4.0], &[4.0])),
            Arc::new(OpenLine),
        );
        let mut levels = vec![line];
        levels.extend(spaces(&world, robot));
        let mut planner = MultiQuotient::from_spaces(
            StrategyKind::QuotientCover,
            levels,
            &StrategyParams::default(),
            State::from_slice(&[-2.0, 0.0, 0.5]),
            State::from_slice(&[2.0, 0.0, 0.0]),
        )
        .unwrap();
        assert!(planner.levels()[0].quotient().is_atomic());
        assert_eq!(planner.levels()[1].quotient().q0_dimension(), 1);

        let status = planner.solve(&PlannerTerminationCondition::timed_secs(30.0)).unwrap();
        assert_eq!(status, PlannerStatus::ExactSolution);
        assert_eq!(&planner.level_paths()[0][0][..], &[-2.0]);
        for level in &planner.levels()[1..] {
            let cover = level.as_ref().downcast_ref::<QuotientCover>().unwrap();
            assert!(cover.configurations().all(|q| q.coset.is_some()));
        }
        let path = planner.path().unwrap();
        assert_eq!(&path[path.len() - 1][..], &[2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_timeout() {
        let (world, robot) = world();
        let mut planner = MultiQuotient::from_spaces(
            StrategyKind::QuotientRoadmap,
            spaces(&world, robot),
            &StrategyParams::default(),
            State::from_slice(&[-2.0, 0.0, 0.5]),
            State::from_slice(&[2.0, 0.0, 0.0]),
        )
        .unwrap();
        let status = planner.solve(&PlannerTerminationCondition::always()).unwrap();
        assert_eq!(status, PlannerStatus::Timeout);
        assert!(planner.path().is_none());
    }

    #[test]
    fn test_rejects_empty_hierarchy() {
        let result = MultiQuotient::new(Vec::new(), State::zeros(2), State::zeros(2));
        assert!(matches!(result, Err(PlannerError::MissingProblemDefinition(_))));
    }
}

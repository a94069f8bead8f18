use tracing::trace;

use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::state::State;
use crate::error::{PlannerError, Result};
use crate::planners::level_planner::LevelPlanner;
use crate::tools::config::magic_constants::magic;

use super::{Configuration, CoverParams, ParentCover, QuotientCover};

/// Where the next sample of a cover comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Step from the nearest neighborhood towards the goal.
    Goal,
    /// Step from the nearest neighborhood towards a uniform sample.
    Voronoi,
    /// Sample on the boundary of a neighborhood picked by importance.
    Boundary,
}

impl SamplingStrategy {
    /// Pick the strategy for a uniform draw `r` in `[0, 1)`.
    pub fn choose(r: f64, params: &CoverParams) -> Self {
        if r < params.goal_bias {
            SamplingStrategy::Goal
        } else if r < params.goal_bias + params.voronoi_bias {
            SamplingStrategy::Voronoi
        } else {
            SamplingStrategy::Boundary
        }
    }
}

impl QuotientCover {
    /// Draw candidates until one has a neighborhood worth adding, or `ptc` fires.
    pub(super) fn sample_valid(
        &mut self,
        parent: ParentCover,
        ptc: &PlannerTerminationCondition,
    ) -> Result<Option<Configuration>> {
        while !ptc.eval() {
            for _ in 0..magic::FIND_VALID_STATE_ATTEMPTS_WITHOUT_TERMINATION_CHECK {
                if let Some(mut q) = self.sample(parent)? {
                    if self.compute_neighborhood(&mut q, parent)? {
                        return Ok(Some(q));
                    }
                }
            }
        }
        Ok(None)
    }

    fn sample(&mut self, parent: ParentCover) -> Result<Option<Configuration>> {
        let r = self.planner_data.rng.uniform01();
        let strategy = SamplingStrategy::choose(r, &self.cover_params);
        trace!("{}: sampling with {:?}", self.get_name(), strategy);
        match strategy {
            SamplingStrategy::Goal => {
                let goal = match &self.goal_state {
                    Some(goal) => goal.clone(),
                    None => fatal!(PlannerError::MissingProblemDefinition(self.get_name().to_string())),
                };
                self.step_from_nearest(Configuration::new(goal), parent)
            }
            SamplingStrategy::Voronoi => {
                let random = self.sample_uniform(parent)?;
                self.step_from_nearest(Configuration::new(random), parent)
            }
            SamplingStrategy::Boundary => self.sample_boundary(parent),
        }
    }

    /// Uniform state of this level. With a parent, the projection is drawn near the parent
    /// cover and the fiber uniformly.
    fn sample_uniform(&mut self, parent: ParentCover) -> Result<State> {
        let mut random = self.quotient.get_q1().alloc_state();
        let (parent, x1_sampler, q0_sampler) = match (parent, &mut self.x1_sampler, &mut self.q0_sampler) {
            (Some((parent, _)), Some(x1_sampler), Some(q0_sampler)) => (parent, x1_sampler, q0_sampler),
            _ => {
                self.q1_sampler.sample_uniform(&mut random);
                return Ok(random);
            }
        };
        let mut x1 = State::zeros(self.quotient.x1_dimension());
        x1_sampler.sample_uniform(&mut x1);
        let mut q0 = State::zeros(self.quotient.q0_dimension());
        let coset = parent.sample_from_graph(&mut self.planner_data.rng, q0_sampler.as_mut(), &mut q0)?;
        if coset.is_none() {
            fatal!(PlannerError::MissingCoset(None));
        }
        self.quotient.merge_states(&q0, &x1, &mut random);
        Ok(random)
    }

    /// Move `target` onto the boundary of the nearest neighborhood, in its direction.
    fn step_from_nearest(&mut self, mut target: Configuration, parent: ParentCover) -> Result<Option<Configuration>> {
        let nearest = match self.nearest(&target, parent)? {
            Some(nearest) => nearest,
            None => fatal!(PlannerError::EmptyGraph(self.get_name().to_string())),
        };
        if !self.connect(self.get(nearest)?, &mut target) {
            return Ok(None);
        }
        target.parent_neighbor = Some(nearest);
        self.resolve_coset(&mut target, parent)?;
        Ok(Some(target))
    }

    /// Place `to` on the boundary of the ball of `from`, on the ray towards `to`. Fails for
    /// coincident states and for unbounded balls.
    fn connect(&self, from: &Configuration, to: &mut Configuration) -> bool {
        let si = self.quotient.get_q1();
        let d = si.distance(&from.state, &to.state);
        if !(d > 0.0) || !from.radius.is_finite() {
            return false;
        }
        let target = to.state.clone();
        si.interpolate(&from.state, &target, from.radius / d, &mut to.state);
        true
    }

    fn sample_boundary(&mut self, parent: ParentCover) -> Result<Option<Configuration>> {
        let center_id = match self.pdf_all.sample(self.planner_data.rng.uniform01()) {
            Some(id) => id,
            None => fatal!(PlannerError::EmptyGraph(self.get_name().to_string())),
        };
        let center = {
            let center = self.get_mut(center_id)?;
            center.number_attempted_expansions += 1;
            center.clone()
        };
        if let Some(element) = center.pdf_all_element {
            let weight = center.importance / (1.0 + center.number_attempted_expansions as f64);
            self.pdf_all.update(element, weight);
        }

        let mut q = match self.sample_neighborhood_boundary(&center)? {
            Some(state) => Configuration::new(state),
            None => return Ok(None),
        };
        self.mirror_away_from_parent_neighbor(&center, &mut q, parent)?;
        q.parent_neighbor = Some(center_id);
        self.resolve_coset(&mut q, parent)?;
        Ok(Some(q))
    }

    /// Uniform direction from the center, scaled to the radius of the ball.
    fn sample_neighborhood_boundary(&mut self, center: &Configuration) -> Result<Option<State>> {
        let minimum = self.cover_params.minimum_neighborhood_radius;
        if center.radius <= minimum {
            fatal!(
                PlannerError::NeighborhoodTooSmall {
                    radius: center.radius,
                    minimum
                },
                "{}: boundary sampling around {:?}",
                self.get_name(),
                center.index
            );
        }
        if center.radius.is_infinite() {
            return Ok(None);
        }
        let si = self.quotient.get_q1();
        let mut direction = si.alloc_state();
        let mut d = 0.0;
        while !(d > minimum) {
            self.q1_sampler
                .sample_gaussian(&mut direction, &center.state, magic::BOUNDARY_SAMPLING_STD_DEV);
            d = si.distance(&center.state, &direction);
        }
        let mut boundary = si.alloc_state();
        si.interpolate(&center.state, &direction, center.radius / d, &mut boundary);
        Ok(Some(boundary))
    }

    /// Keep boundary samples out of the half ball facing the neighborhood the center was
    /// expanded from, by reflecting them through the center.
    fn mirror_away_from_parent_neighbor(
        &self,
        center: &Configuration,
        q: &mut Configuration,
        parent: ParentCover,
    ) -> Result<()> {
        let origin = match center.parent_neighbor.map(|id| self.get(id)) {
            Some(Ok(origin)) => origin,
            _ => return Ok(()),
        };
        if 2.0 * origin.radius < center.radius {
            return Ok(());
        }
        let d_center = self.distance(q, center, parent)?;
        let d_origin = self.distance(origin, q, parent)?;
        if d_origin > d_center {
            return Ok(());
        }
        let sample = q.state.clone();
        self.quotient
            .get_q1()
            .interpolate(&sample, &center.state, 2.0, &mut q.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::base::space_information::SpaceInformation;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::base::state_validity_checker::StateValidityChecker;
    use crate::planners::planner_common::HasPlannerData;
    use crate::planners::quotient::Quotient;

    const NO_ANCESTORS: &[Box<dyn LevelPlanner>] = &[];

    /// Free everywhere, clearance grows with the distance from the y axis.
    struct Wedge;

    impl StateValidityChecker for Wedge {
        fn is_valid(&self, _state: &[f64]) -> bool {
            true
        }

        fn clearance(&self, state: &[f64]) -> Option<f64> {
            Some(0.2 + 0.1 * state[0].abs())
        }
    }

    fn cover() -> QuotientCover {
        let space = Arc::new(RealVectorStateSpace::with_bounds(&[-5.0, -5.0], &[5.0, 5.0]));
        let quotient = Quotient::atomic(SpaceInformation::new(space, Arc::new(Wedge)));
        let mut cover = QuotientCover::new(quotient, CoverParams::default(), 0);
        cover.planner_data_mut().reseed(7);
        cover.set_problem_definition(State::from_slice(&[-2.0, 0.0]), State::from_slice(&[2.0, 0.0]));
        cover.setup(NO_ANCESTORS).unwrap();
        cover
    }

    #[test]
    fn test_choose_strategy() {
        let params = CoverParams::default();
        assert_eq!(SamplingStrategy::choose(0.05, &params), SamplingStrategy::Goal);
        assert_eq!(SamplingStrategy::choose(0.25, &params), SamplingStrategy::Voronoi);
        assert_eq!(SamplingStrategy::choose(0.35, &params), SamplingStrategy::Boundary);
        // a draw right at the end of the voronoi share already samples the boundary
        let edge = params.goal_bias + params.voronoi_bias;
        assert_eq!(SamplingStrategy::choose(edge, &params), SamplingStrategy::Boundary);
        assert_eq!(SamplingStrategy::choose(0.99, &params), SamplingStrategy::Boundary);
    }

    #[test]
    fn test_connect_places_on_boundary() {
        let cover = cover();
        let start = cover.get(cover.start_configuration().unwrap()).unwrap().clone();
        let mut far = Configuration::new(State::from_slice(&[2.0, 0.0]));
        assert!(cover.connect(&start, &mut far));
        assert!((cover.distance_q1(&start, &far) - start.radius).abs() < 1e-12);

        let mut same = Configuration::new(start.state.clone());
        assert!(!cover.connect(&start, &mut same));
    }

    #[test]
    fn test_boundary_samples_lie_on_sphere() {
        let mut cover = cover();
        let start = cover.get(cover.start_configuration().unwrap()).unwrap().clone();
        for _ in 0..20 {
            let state = cover.sample_neighborhood_boundary(&start).unwrap().unwrap();
            let d = cover.quotient.get_q1().distance(&start.state, &state);
            assert!((d - start.radius).abs() < 1e-9);
        }

        let mut unbounded = start.clone();
        unbounded.radius = f64::INFINITY;
        assert!(cover.sample_neighborhood_boundary(&unbounded).unwrap().is_none());

        let mut tiny = start;
        tiny.radius = 0.001;
        assert!(cover.sample_neighborhood_boundary(&tiny).is_err());
    }

    #[test]
    fn test_boundary_sampling_decays_importance() {
        let mut cover = cover();
        cover.cover_params.goal_bias = 0.0;
        cover.cover_params.voronoi_bias = 0.0;
        let start_id = cover.start_configuration().unwrap();
        let before = cover.get(start_id).unwrap().importance;

        let q = cover.sample(None).unwrap().unwrap();
        assert_eq!(q.parent_neighbor, Some(start_id));
        let start = cover.get(start_id).unwrap();
        assert_eq!(start.number_attempted_expansions, 1);
        let element = start.pdf_all_element.unwrap();
        assert!((cover.pdf_all.weight(element).unwrap() - before / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_keeps_samples_away_from_origin() {
        let cover = cover();
        let start_id = cover.start_configuration().unwrap();
        let radius = cover.get(start_id).unwrap().radius;
        assert!((radius - 0.4).abs() < 1e-12);

        let mut child = Configuration::new(State::from_slice(&[-1.6, 0.0]));
        child.radius = radius;
        child.parent_neighbor = Some(start_id);

        // on the boundary of the child, facing the start
        let mut facing = Configuration::new(State::from_slice(&[-1.84, 0.32]));
        cover.mirror_away_from_parent_neighbor(&child, &mut facing, None).unwrap();
        assert!((facing.state[0] + 1.36).abs() < 1e-12 && (facing.state[1] + 0.32).abs() < 1e-12);

        let mut away = Configuration::new(State::from_slice(&[-1.36, 0.32]));
        cover.mirror_away_from_parent_neighbor(&child, &mut away, None).unwrap();
        assert_eq!(&away.state[..], &[-1.36, 0.32]);
    }
}

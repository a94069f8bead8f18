use std::collections::BTreeMap;

use itertools::Itertools;
use quotient_cover_derive::WithPlannerData;
use tracing::{debug, info, trace};

use crate::base::objective::{Cost, PathLengthOptimizationObjective};
use crate::base::param::{ParamSet, ParamValue};
use crate::base::planner_data::{FeasibilityType, PlannerData, PlannerDataVertexAnnotated};
use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::state::State;
use crate::base::state_sampler::StateSampler;
use crate::datastructure::astar::astar;
use crate::datastructure::graph::UndirectedGraph;
use crate::datastructure::nearest_neighbours::NearestNeighbors;
use crate::datastructure::pdf::Pdf;
use crate::error::{PlannerError, Result};
use crate::randomness::RNG;
use crate::tools::config::magic_constants::magic;
use crate::tools::config::self_config::SelfConfig;

use super::level_planner::{check_ancestry, LevelPlanner};
use super::planner_common::{HasPlannerData, PlannerCommonData};
use super::quotient::Quotient;
use super::ConfigurationId;

pub mod configuration;
mod metric;
mod sampling;

pub use configuration::Configuration;
pub use sampling::SamplingStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct CoverParams {
    /// Probability of sampling towards the goal.
    pub goal_bias: f64,
    /// Probability of sampling towards a uniform state.
    pub voronoi_bias: f64,
    /// Neighborhoods at or below this radius are never admitted.
    pub minimum_neighborhood_radius: f64,
}

impl Default for CoverParams {
    fn default() -> Self {
        Self {
            goal_bias: 0.1,
            voronoi_bias: 0.2,
            minimum_neighborhood_radius: 0.01,
        }
    }
}

/// The coarser cover of a level and the levels above it.
pub type ParentCover<'a> = Option<(&'a QuotientCover, &'a [Box<dyn LevelPlanner>])>;

/// Split `ancestors` into the direct parent, which has to be a cover, and its own ancestors.
pub fn parent_cover<'a>(name: &str, ancestors: &'a [Box<dyn LevelPlanner>]) -> Result<ParentCover<'a>> {
    match ancestors.split_last() {
        None => Ok(None),
        Some((parent, rest)) => match parent.as_ref().downcast_ref::<QuotientCover>() {
            Some(parent) => Ok(Some((parent, rest))),
            None => fatal!(
                PlannerError::IncompatibleParent(name.to_string()),
                "{}: parent level {} is not a cover",
                name,
                parent.get_name()
            ),
        },
    }
}

/// Covers the free space of a quotient with overlapping free balls, grown outwards from
/// the start until a ball touches the goal ball.
#[derive(WithPlannerData)]
#[planner(name = "QuotientCover")]
pub struct QuotientCover {
    planner_data: PlannerCommonData,
    quotient: Quotient,
    cover_params: CoverParams,
    param_set: ParamSet,

    configurations: Vec<Option<Configuration>>,
    graph: UndirectedGraph<ConfigurationId, f64>,
    /// Queried with the neighborhood to neighborhood distance.
    nearest_neighborhood: Box<dyn NearestNeighbors<ConfigurationId>>,
    /// Queried with the center to center distance.
    nearest_vertex: Box<dyn NearestNeighbors<ConfigurationId>>,
    pdf_all: Pdf<ConfigurationId>,
    pdf_necessary: Pdf<ConfigurationId>,
    total_volume: f64,

    start_state: Option<State>,
    goal_state: Option<State>,
    start_template: Option<Configuration>,
    goal_template: Option<Configuration>,
    v_start: Option<ConfigurationId>,
    v_goal: Option<ConfigurationId>,
    saturated: bool,
    is_connected: bool,

    q1_sampler: Box<dyn StateSampler>,
    x1_sampler: Option<Box<dyn StateSampler>>,
    q0_sampler: Option<Box<dyn StateSampler>>,

    solution_path: Vec<ConfigurationId>,
    necessary_vertices: Vec<ConfigurationId>,
}

impl QuotientCover {
    pub fn new(quotient: Quotient, cover_params: CoverParams, level: usize) -> Self {
        let self_config = SelfConfig::new(quotient.get_q1(), Self::planner_name_prefix());
        let nearest_neighborhood = self_config.default_nearest_neighbors();
        let nearest_vertex = self_config.default_nearest_neighbors();
        let q1_sampler = quotient.get_q1().alloc_state_sampler();
        let x1_sampler = quotient.get_x1().map(|x1| x1.alloc_default_state_sampler());
        let q0_sampler = quotient.get_q0().map(|q0| q0.alloc_default_state_sampler());

        Self {
            planner_data: PlannerCommonData::new(Self::planner_name_prefix(), level),
            param_set: declare_params(&cover_params),
            quotient,
            cover_params,
            configurations: Vec::new(),
            graph: UndirectedGraph::new(),
            nearest_neighborhood,
            nearest_vertex,
            pdf_all: Pdf::new(),
            pdf_necessary: Pdf::new(),
            total_volume: 0.0,
            start_state: None,
            goal_state: None,
            start_template: None,
            goal_template: None,
            v_start: None,
            v_goal: None,
            saturated: false,
            is_connected: false,
            q1_sampler,
            x1_sampler,
            q0_sampler,
            solution_path: Vec::new(),
            necessary_vertices: Vec::new(),
        }
    }

    pub fn cover_params(&self) -> &CoverParams {
        &self.cover_params
    }

    pub fn get(&self, id: ConfigurationId) -> Result<&Configuration> {
        self.configurations
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(PlannerError::UnknownConfiguration(id))
    }

    fn get_mut(&mut self, id: ConfigurationId) -> Result<&mut Configuration> {
        self.configurations
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(PlannerError::UnknownConfiguration(id))
    }

    pub fn contains(&self, id: ConfigurationId) -> bool {
        self.get(id).is_ok()
    }

    /// Configurations currently in the cover.
    pub fn configurations(&self) -> impl Iterator<Item = &Configuration> {
        self.configurations.iter().flatten()
    }

    pub fn graph(&self) -> &UndirectedGraph<ConfigurationId, f64> {
        &self.graph
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected
    }

    pub fn start_configuration(&self) -> Option<ConfigurationId> {
        self.v_start
    }

    pub fn goal_configuration(&self) -> Option<ConfigurationId> {
        self.v_goal
    }

    pub fn solution_path(&self) -> &[ConfigurationId] {
        &self.solution_path
    }

    /// Vertices of the last solution that are not sufficiently feasible.
    pub fn necessary_vertices(&self) -> &[ConfigurationId] {
        &self.necessary_vertices
    }

    pub fn number_of_necessary_configurations(&self) -> usize {
        self.pdf_necessary.size()
    }

    fn importance(&self) -> f64 {
        1.0 / (self.total_volume + 1.0)
    }

    fn add_edge(&mut self, a: ConfigurationId, b: ConfigurationId) -> Result<()> {
        let weight = self.distance_q1(self.get(a)?, self.get(b)?);
        self.graph.add_edge(a, b, weight);
        Ok(())
    }

    fn add_configuration_without_edges(&mut self, mut q: Configuration) -> Result<ConfigurationId> {
        let minimum = self.cover_params.minimum_neighborhood_radius;
        if q.radius < minimum {
            fatal!(
                PlannerError::NeighborhoodTooSmall {
                    radius: q.radius,
                    minimum
                },
                "{}: refusing to add {:?} to the cover",
                self.get_name(),
                q.state
            );
        }
        self.total_volume += q.radius;

        let id = ConfigurationId(self.configurations.len());
        q.index = Some(id);
        q.number_attempted_expansions = 0;
        q.number_successful_expansions = 0;
        q.goal_distance = self
            .goal_state
            .as_ref()
            .map_or(f64::INFINITY, |goal| self.quotient.get_q1().distance(&q.state, goal));
        q.importance = self.importance();
        q.pdf_all_element = Some(self.pdf_all.add(id, q.importance));
        if !q.is_sufficient_feasible {
            q.pdf_necessary_element = Some(self.pdf_necessary.add(id, q.radius));
        }
        self.nearest_neighborhood.add(id);
        self.nearest_vertex.add(id);
        self.graph.add_vertex(id);
        debug!(
            "{}: add configuration {} (radius {:.4}) at {:?}",
            self.get_name(),
            id.0,
            q.radius,
            q.state
        );

        let parent_neighbor = q.parent_neighbor;
        self.configurations.push(Some(q));
        if let Some(parent_neighbor) = parent_neighbor.filter(|&p| self.contains(p)) {
            self.add_edge(id, parent_neighbor)?;
            self.get_mut(parent_neighbor)?.number_successful_expansions += 1;
        }
        Ok(id)
    }

    /// Insert `q`, connect it to the configurations whose centers it contains and drop
    /// those whose balls it swallows.
    pub fn add_configuration_to_cover(&mut self, q: Configuration, parent: ParentCover) -> Result<ConfigurationId> {
        let neighbors = self.configurations_inside_neighborhood(&q, parent)?;
        let parent_neighbor = q.parent_neighbor;
        let id = self.add_configuration_without_edges(q)?;

        for qn_id in neighbors {
            if qn_id == id {
                fatal!(PlannerError::NeighborhoodEqualsNeighbor(id));
            }
            if Some(qn_id) == parent_neighbor {
                continue;
            }
            let (inside, protected) = {
                let qn = self.get(qn_id)?;
                (
                    self.is_neighborhood_inside_neighborhood(qn, self.get(id)?)?,
                    qn.is_start || qn.is_goal,
                )
            };
            if inside && !protected {
                let targets: Vec<ConfigurationId> = self
                    .graph
                    .neighbors(qn_id)
                    .map(|(target, _)| target)
                    .filter(|&target| target != id)
                    .collect();
                debug!(
                    "{}: rewire {} edges of {} onto {}",
                    self.get_name(),
                    targets.len(),
                    qn_id.0,
                    id.0
                );
                for target in targets {
                    self.add_edge(target, id)?;
                }
                self.remove_configuration(qn_id)?;
            } else {
                self.add_edge(id, qn_id)?;
            }
        }
        Ok(id)
    }

    fn remove_configuration(&mut self, id: ConfigurationId) -> Result<Configuration> {
        let q = match self.configurations.get_mut(id.0).and_then(Option::take) {
            Some(q) => q,
            None => fatal!(PlannerError::UnknownConfiguration(id)),
        };
        self.total_volume -= q.radius;
        if let Some(element) = q.pdf_all_element {
            self.pdf_all.remove(element);
        }
        if let Some(element) = q.pdf_necessary_element {
            self.pdf_necessary.remove(element);
        }
        self.nearest_neighborhood.remove(&id);
        self.nearest_vertex.remove(&id);
        self.graph.remove_vertex(id);
        debug!("{}: remove configuration {}", self.get_name(), id.0);
        Ok(q)
    }

    /// Configurations whose centers lie in the ball of `q`.
    fn configurations_inside_neighborhood(
        &self,
        q: &Configuration,
        parent: ParentCover,
    ) -> Result<Vec<ConfigurationId>> {
        self.nearest_vertex.nearest_r(
            &mut |id: &ConfigurationId| -> Result<f64> { self.distance(q, self.get(*id)?, parent) },
            q.radius,
        )
    }

    /// Whether the ball of `lhs` lies strictly inside the ball of `rhs`.
    pub fn is_neighborhood_inside_neighborhood(&self, lhs: &Configuration, rhs: &Configuration) -> Result<bool> {
        let minimum = self.cover_params.minimum_neighborhood_radius;
        for radius in [lhs.radius, rhs.radius] {
            if radius < minimum {
                fatal!(
                    PlannerError::NeighborhoodTooSmall { radius, minimum },
                    "{}: inclusion test between {:?} and {:?}",
                    self.get_name(),
                    lhs.index,
                    rhs.index
                );
            }
        }
        Ok(rhs.radius > lhs.radius + self.distance_q1(lhs, rhs))
    }

    /// Whether `q` lies in the balls of its two nearest neighborhoods.
    fn is_configuration_inside_cover(&self, q: &Configuration, parent: ParentCover) -> Result<bool> {
        let nearest = self.nearest_neighborhood.nearest_k(
            &mut |id: &ConfigurationId| -> Result<f64> {
                self.distance_neighborhood_neighborhood(q, self.get(*id)?, parent)
            },
            2,
        )?;
        if nearest.len() < 2 {
            return Ok(false);
        }
        for id in nearest {
            if self.distance_configuration_neighborhood(q, self.get(id)?, parent)? > 0.0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fill in feasibility, radii and coset of a fresh sample. Returns false if the sample
    /// has to be dropped.
    pub fn compute_neighborhood(&self, q: &mut Configuration, parent: ParentCover) -> Result<bool> {
        if self.is_configuration_inside_cover(q, parent)? {
            trace!("{}: sample rejected, inside cover", self.get_name());
            return Ok(false);
        }
        let si = self.quotient.get_q1();
        if !si.is_valid(&q.state) {
            trace!("{}: sample rejected, infeasible", self.get_name());
            return Ok(false);
        }
        if si.has_sufficiency() && si.is_sufficient(&q.state) {
            q.is_sufficient_feasible = true;
            q.outer_radius = si.sufficient_clearance(&q.state).unwrap_or(0.0);
        }
        q.radius = si.clearance(&q.state).unwrap_or(0.0);
        if q.radius <= self.cover_params.minimum_neighborhood_radius {
            trace!(
                "{}: sample rejected, radius {} too small",
                self.get_name(),
                q.radius
            );
            return Ok(false);
        }
        q.is_feasible = true;
        if q.coset.is_none() {
            self.resolve_coset(q, parent)?;
        }
        Ok(true)
    }

    /// Link `q` to the configuration of the parent cover nearest to its projection.
    fn resolve_coset(&self, q: &mut Configuration, parent: ParentCover) -> Result<()> {
        if let Some((parent, grandparents)) = parent {
            let mut projected = State::zeros(self.quotient.q0_dimension());
            self.quotient.extract_q0_subspace(&q.state, &mut projected);
            let grandparent = parent_cover(parent.get_name(), grandparents)?;
            q.coset = parent.nearest(&Configuration::new(projected), grandparent)?;
        }
        Ok(())
    }

    /// Configuration whose neighborhood is closest to the neighborhood of `q`.
    pub fn nearest(&self, q: &Configuration, parent: ParentCover) -> Result<Option<ConfigurationId>> {
        self.nearest_neighborhood
            .nearest(&mut |id: &ConfigurationId| -> Result<f64> {
                self.distance_neighborhood_neighborhood(q, self.get(*id)?, parent)
            })
    }

    /// Shortest vertex sequence from `source` to `sink` in the cover graph. Empty if both
    /// are equal or if they are not connected.
    pub fn get_cover_path(&self, source: ConfigurationId, sink: ConfigurationId) -> Result<Vec<ConfigurationId>> {
        if source == sink {
            return Ok(Vec::new());
        }
        self.get(source)?;
        let sink_state = &self.get(sink)?.state;

        let space = self.quotient.get_q1().get_state_space();
        let objective = PathLengthOptimizationObjective::new(space.as_ref());
        let found = astar(
            source,
            |v| {
                self.graph
                    .neighbors(v)
                    .map(|(n, weight)| (n, Cost(weight)))
                    .collect::<Vec<_>>()
            },
            |v| {
                Cost(
                    self.get(v)
                        .map_or(0.0, |q| space.distance(&q.state, sink_state)),
                )
            },
            |v| v == sink,
            &objective,
        );
        Ok(found.map(|(path, _)| path).unwrap_or_default())
    }

    /// Sum of the edge weights along `path`.
    pub fn path_cost(&self, path: &[ConfigurationId]) -> f64 {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.graph.edge_weight(*a, *b).unwrap_or(f64::INFINITY))
            .sum()
    }

    /// Absorb the goal into the cover once its ball touches the cover.
    fn try_connect_goal(&mut self, parent: ParentCover) -> Result<bool> {
        if self.is_connected {
            return Ok(true);
        }
        let mut goal = match &self.goal_template {
            Some(goal) => goal.clone(),
            None => fatal!(PlannerError::MissingProblemDefinition(self.get_name().to_string())),
        };
        let nearest = match self.nearest(&goal, parent)? {
            Some(nearest) => nearest,
            None => return Ok(false),
        };
        let gap = self.distance_neighborhood_neighborhood(self.get(nearest)?, &goal, parent)?;
        if gap < magic::GOAL_CONNECTION_EPSILON {
            goal.parent_neighbor = Some(nearest);
            self.v_goal = Some(self.add_configuration_without_edges(goal)?);
            self.is_connected = true;
            info!(
                "{}: goal connected after {} iterations ({} configurations)",
                self.get_name(),
                self.planner_data.iterations,
                self.graph.num_vertices()
            );
        }
        Ok(self.is_connected)
    }

    /// Reset every data structure. Configuration ids handed out so far stay invalid.
    fn clear_structures(&mut self) {
        self.configurations.iter_mut().for_each(|slot| *slot = None);
        self.graph.clear();
        self.nearest_neighborhood.clear();
        self.nearest_vertex.clear();
        self.pdf_all.clear();
        self.pdf_necessary.clear();
        self.total_volume = 0.0;
        self.v_start = None;
        self.v_goal = None;
        self.is_connected = false;
        self.saturated = false;
        self.solution_path.clear();
        self.necessary_vertices.clear();
    }

    fn insert_start(&mut self, start: Configuration, parent: ParentCover) -> Result<()> {
        let saturated = start.is_saturated();
        self.v_start = Some(self.add_configuration_to_cover(start, parent)?);
        self.saturated = saturated;
        if saturated {
            info!("{}: start state covers the whole quotient space", self.get_name());
        }
        Ok(())
    }

    fn annotated_vertex(&self, q: &Configuration) -> PlannerDataVertexAnnotated {
        let feasibility = if q.is_sufficient_feasible {
            FeasibilityType::SufficientFeasible
        } else {
            FeasibilityType::Feasible
        };
        let mut vertex = PlannerDataVertexAnnotated::new(q.state.clone(), self.level(), q.radius, feasibility);
        vertex.is_start = q.is_start;
        vertex.is_goal = q.is_goal;
        vertex
    }
}

fn declare_params(params: &CoverParams) -> ParamSet {
    let mut set = ParamSet::default();
    set.declare_param("goal_bias", ParamValue::Real(params.goal_bias), "0.:.05:1.");
    set.declare_param("voronoi_bias", ParamValue::Real(params.voronoi_bias), "0.:.05:1.");
    set.declare_param(
        "minimum_neighborhood_radius",
        ParamValue::Real(params.minimum_neighborhood_radius),
        "0.:.01:1.",
    );
    set
}

impl LevelPlanner for QuotientCover {
    fn quotient(&self) -> &Quotient {
        &self.quotient
    }

    fn set_problem_definition(&mut self, start: State, goal: State) {
        self.start_state = Some(start);
        self.goal_state = Some(goal);
    }

    fn setup(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()> {
        check_ancestry(&*self, ancestors)?;
        let parent = parent_cover(self.get_name(), ancestors)?;
        let name = self.get_name().to_string();

        let CoverParams {
            goal_bias,
            voronoi_bias,
            ..
        } = self.cover_params;
        if goal_bias + voronoi_bias >= magic::MAX_BIAS {
            fatal!(PlannerError::BiasTooLarge {
                goal_bias,
                voronoi_bias,
                max_bias: magic::MAX_BIAS
            });
        }

        let (start_state, goal_state) = match (&self.start_state, &self.goal_state) {
            (Some(start), Some(goal)) => (start.clone(), goal.clone()),
            _ => fatal!(PlannerError::MissingProblemDefinition(name)),
        };
        self.clear_structures();

        let mut start = Configuration::new(start_state);
        if !self.compute_neighborhood(&mut start, parent)? {
            fatal!(
                PlannerError::InvalidStart(name.clone()),
                "{}: start {:?} is infeasible or too close to an obstacle",
                name,
                start.state
            );
        }
        let mut goal = Configuration::new(goal_state);
        if !self.compute_neighborhood(&mut goal, parent)? {
            fatal!(
                PlannerError::InvalidGoal(name.clone()),
                "{}: goal {:?} is infeasible or too close to an obstacle",
                name,
                goal.state
            );
        }
        if let Some((parent, _)) = parent {
            start.coset = parent.start_configuration();
            goal.coset = parent.goal_configuration();
            if start.coset.is_none() || goal.coset.is_none() {
                fatal!(
                    PlannerError::MissingCoset(None),
                    "{}: parent {} has no connected start and goal",
                    name,
                    parent.get_name()
                );
            }
        }
        start.is_start = true;
        goal.is_goal = true;

        self.start_template = Some(start.clone());
        self.goal_template = Some(goal);
        self.insert_start(start, parent)?;
        info!(
            "{}: ready with {} states already in datastructure",
            name,
            self.nearest_neighborhood.size()
        );
        Ok(())
    }

    fn grow(&mut self, ancestors: &[Box<dyn LevelPlanner>], ptc: &PlannerTerminationCondition) -> Result<()> {
        if self.saturated {
            return Ok(());
        }
        let parent = parent_cover(self.get_name(), ancestors)?;
        self.planner_data.iterations += 1;
        if let Some(q) = self.sample_valid(parent, ptc)? {
            self.add_configuration_to_cover(q, parent)?;
        }
        Ok(())
    }

    fn has_solution(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<bool> {
        let parent = parent_cover(self.get_name(), ancestors)?;
        self.try_connect_goal(parent)
    }

    fn get_solution(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<Option<Vec<State>>> {
        let parent = parent_cover(self.get_name(), ancestors)?;
        if !self.try_connect_goal(parent)? {
            return Ok(None);
        }
        let (start, goal) = match (self.v_start, self.v_goal) {
            (Some(start), Some(goal)) => (start, goal),
            _ => fatal!(PlannerError::MissingProblemDefinition(self.get_name().to_string())),
        };
        let path = self.get_cover_path(start, goal)?;
        if path.is_empty() {
            fatal!(PlannerError::NoPath(start, goal));
        }

        let mut necessary = Vec::new();
        let mut states = Vec::with_capacity(path.len());
        for &id in &path {
            let q = self.get(id)?;
            if !q.is_sufficient_feasible {
                necessary.push(id);
            }
            states.push(q.state.clone());
        }
        self.solution_path = path;
        self.necessary_vertices = necessary;
        Ok(Some(states))
    }

    fn get_planner_data(&self) -> PlannerData {
        let mut data = PlannerData::default();
        let goal = self.v_goal.filter(|_| self.is_connected);
        let ordered = self
            .v_start
            .into_iter()
            .chain(goal)
            .chain(self.graph.vertices())
            .unique();

        let mut index_of = BTreeMap::new();
        for id in ordered {
            if let Ok(q) = self.get(id) {
                index_of.insert(id, data.add_vertex(self.annotated_vertex(q)));
            }
        }
        for (u, v, _) in self.graph.edges() {
            if let (Some(&a), Some(&b)) = (index_of.get(&u), index_of.get(&v)) {
                data.add_edge(a, b);
            }
        }
        data
    }

    fn clear(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()> {
        let parent = parent_cover(self.get_name(), ancestors)?;
        self.clear_structures();
        if let Some(start) = &self.start_template {
            let start = start.clone();
            self.insert_start(start, parent)?;
        }
        Ok(())
    }

    fn sample_from_graph(
        &self,
        rng: &mut RNG,
        sampler: &mut dyn StateSampler,
        out: &mut [f64],
    ) -> Result<Option<ConfigurationId>> {
        let id = match self.pdf_all.sample(rng.uniform01()) {
            Some(id) => id,
            None => fatal!(PlannerError::EmptyGraph(self.get_name().to_string())),
        };
        let q = self.get(id)?;
        sampler.sample_uniform_near(out, &q.state, q.radius);

        // push the sample out of the sufficient ball, into the shell up to the necessary ball
        let shell = q.is_sufficient_feasible
            && q.radius.is_finite()
            && q.outer_radius.is_finite()
            && q.outer_radius < q.radius;
        if shell {
            let r_shell = q.outer_radius + rng.uniform01() * (q.radius - q.outer_radius);
            let si = self.quotient.get_q1();
            let d = si.distance(&q.state, out);
            if d > 0.0 {
                let sample = State::from_slice(out);
                si.interpolate(&q.state, &sample, r_shell / d, out);
            }
        }
        Ok(Some(id))
    }

    fn params(&self) -> &ParamSet {
        &self.param_set
    }

    fn set_param(&mut self, name: &str, value: ParamValue) -> bool {
        let real = value.as_real();
        if !self.param_set.set(name, value) {
            return false;
        }
        match (name, real) {
            ("goal_bias", Some(v)) => self.cover_params.goal_bias = v,
            ("voronoi_bias", Some(v)) => self.cover_params.voronoi_bias = v,
            ("minimum_neighborhood_radius", Some(v)) => self.cover_params.minimum_neighborhood_radius = v,
            _ => {}
        }
        true
    }
}

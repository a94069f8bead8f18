use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use quotient_cover_derive::WithPlannerData;
use tracing::{debug, info};

use crate::base::objective::{Cost, PathLengthOptimizationObjective};
use crate::base::param::{ParamSet, ParamValue};
use crate::base::planner_data::{FeasibilityType, PlannerData, PlannerDataVertexAnnotated};
use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::space_information::SpaceInformation;
use crate::base::state::State;
use crate::base::state_sampler::StateSampler;
use crate::datastructure::astar::astar;
use crate::datastructure::disjoint_sets::DisjointSets;
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

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapParams {
    /// Number of nearest milestones a new milestone tries to connect to.
    pub max_nearest_neighbors: usize,
    /// Seconds of one expansion phase. Each growing phase takes twice as long.
    pub build_time: f64,
}

impl Default for RoadmapParams {
    fn default() -> Self {
        Self {
            max_nearest_neighbors: magic::DEFAULT_NEAREST_NEIGHBORS,
            build_time: magic::ROADMAP_BUILD_TIME,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoadmapVertex {
    pub state: State,
    pub total_connection_attempts: u32,
    pub successful_connection_attempts: u32,
    pub is_feasible: bool,
    pub is_sufficient: bool,
    /// Sufficient clearance for sufficient vertices, clearance otherwise.
    pub radius: f64,
}

impl RoadmapVertex {
    fn new(state: State) -> Self {
        Self {
            state,
            total_connection_attempts: 0,
            successful_connection_attempts: 0,
            is_feasible: false,
            is_sufficient: false,
            radius: 0.0,
        }
    }

    fn feasibility(&self) -> FeasibilityType {
        match (self.is_feasible, self.is_sufficient) {
            (false, _) => FeasibilityType::Infeasible,
            (true, false) => FeasibilityType::Feasible,
            (true, true) => FeasibilityType::SufficientFeasible,
        }
    }
}

/// Everything shared between the growing thread and the solution poller.
struct Roadmap {
    vertices: Vec<RoadmapVertex>,
    graph: UndirectedGraph<usize, f64>,
    components: DisjointSets,
    /// Feasible vertices only.
    nn: Box<dyn NearestNeighbors<usize>>,
    /// Feasible vertices that are not sufficient.
    pdf_necessary: Pdf<usize>,
}

impl Roadmap {
    fn new(nn: Box<dyn NearestNeighbors<usize>>) -> Self {
        Self {
            vertices: Vec::new(),
            graph: UndirectedGraph::new(),
            components: DisjointSets::new(),
            nn,
            pdf_necessary: Pdf::new(),
        }
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.graph.clear();
        self.components.clear();
        self.nn.clear();
        self.pdf_necessary.clear();
    }

    fn push_vertex(&mut self, vertex: RoadmapVertex) -> usize {
        let v = self.vertices.len();
        self.vertices.push(vertex);
        self.graph.add_vertex(v);
        self.components.make_set(v);
        v
    }

    /// Feasible vertex with radius and sufficiency filled in, not yet connected.
    fn add_feasible_vertex(&mut self, si: &SpaceInformation, state: State) -> usize {
        let mut vertex = RoadmapVertex::new(state);
        vertex.is_feasible = true;
        if si.has_sufficiency() && si.is_sufficient(&vertex.state) {
            vertex.is_sufficient = true;
            vertex.radius = si.sufficient_clearance(&vertex.state).unwrap_or(0.0);
        } else {
            vertex.radius = si.clearance(&vertex.state).unwrap_or(0.0);
        }
        let necessary = !vertex.is_sufficient;
        let v = self.push_vertex(vertex);
        if necessary {
            self.pdf_necessary.add(v, 1.0);
        }
        self.nn.add(v);
        v
    }

    fn connect(&mut self, si: &SpaceInformation, a: usize, b: usize) {
        let weight = si.distance(&self.vertices[a].state, &self.vertices[b].state);
        self.graph.add_edge(a, b, weight);
        self.components.union_set(a, b);
    }

    /// Add a valid state and try straight motions to its nearest milestones.
    fn add_milestone(&mut self, si: &SpaceInformation, state: State, k: usize) -> Result<usize> {
        let neighbors = {
            let vertices = &self.vertices;
            self.nn.nearest_k(
                &mut |v: &usize| -> Result<f64> { Ok(si.distance(&vertices[*v].state, &state)) },
                k,
            )?
        };
        let m = self.add_feasible_vertex(si, state);
        for n in neighbors {
            self.vertices[m].total_connection_attempts += 1;
            self.vertices[n].total_connection_attempts += 1;
            if si.check_motion(&self.vertices[n].state, &self.vertices[m].state) {
                self.vertices[m].successful_connection_attempts += 1;
                self.vertices[n].successful_connection_attempts += 1;
                self.connect(si, m, n);
            }
        }
        Ok(m)
    }

    /// Invalid samples stay in the roadmap as isolated vertices.
    fn add_infeasible(&mut self, state: State) -> usize {
        self.push_vertex(RoadmapVertex::new(state))
    }

    fn same_component(&mut self, a: usize, b: usize) -> bool {
        self.components.same_component(a, b)
    }

    /// Feasible vertex to expand, favouring vertices whose connections tend to fail.
    fn pick_expansion_vertex(&self, rng: &mut RNG) -> Option<usize> {
        let mut pdf = Pdf::new();
        for (v, vertex) in self.vertices.iter().enumerate().filter(|(_, vertex)| vertex.is_feasible) {
            let total = vertex.total_connection_attempts as f64;
            let failed = total - vertex.successful_connection_attempts as f64;
            let weight = if total > 0.0 { failed / total } else { 1.0 };
            pdf.add(v, weight);
        }
        pdf.sample(rng.uniform01())
    }

    fn milestone_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_feasible).count()
    }
}

fn lock(roadmap: &Mutex<Roadmap>) -> MutexGuard<'_, Roadmap> {
    roadmap.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Samples states of a level, lifting samples of the parent level when there is one.
struct LevelSampler<'a> {
    quotient: &'a Quotient,
    rng: &'a mut RNG,
    q1_sampler: &'a mut (dyn StateSampler + 'static),
    lift: Option<(
        &'a dyn LevelPlanner,
        &'a mut (dyn StateSampler + 'static),
        &'a mut (dyn StateSampler + 'static),
    )>,
}

impl LevelSampler<'_> {
    fn sample(&mut self, out: &mut [f64]) -> Result<()> {
        match &mut self.lift {
            None => self.q1_sampler.sample_uniform(out),
            Some((parent, x1_sampler, q0_sampler)) => {
                let mut x1 = State::zeros(self.quotient.x1_dimension());
                x1_sampler.sample_uniform(&mut x1);
                let mut q0 = State::zeros(self.quotient.q0_dimension());
                parent.sample_from_graph(self.rng, &mut **q0_sampler, &mut q0)?;
                self.quotient.merge_states(&q0, &x1, out);
            }
        }
        Ok(())
    }
}

/// Probabilistic roadmap of a level. Growing runs next to a thread that watches for a
/// start to goal connection.
#[derive(WithPlannerData)]
#[planner(name = "QuotientRoadmap")]
pub struct QuotientRoadmap {
    planner_data: PlannerCommonData,
    quotient: Quotient,
    roadmap_params: RoadmapParams,
    param_set: ParamSet,
    roadmap: Mutex<Roadmap>,
    start_state: Option<State>,
    goal_state: Option<State>,
    start_vertex: Option<usize>,
    goal_vertex: Option<usize>,
    q1_sampler: Box<dyn StateSampler>,
    x1_sampler: Option<Box<dyn StateSampler>>,
    q0_sampler: Option<Box<dyn StateSampler>>,
}

impl QuotientRoadmap {
    pub fn new(quotient: Quotient, roadmap_params: RoadmapParams, level: usize) -> Self {
        let nn = SelfConfig::new(quotient.get_q1(), Self::planner_name_prefix()).default_nearest_neighbors();
        let mut param_set = ParamSet::default();
        param_set.declare_param(
            "max_nearest_neighbors",
            ParamValue::Int(roadmap_params.max_nearest_neighbors as i32),
            "1:1:50",
        );
        param_set.declare_param("build_time", ParamValue::Real(roadmap_params.build_time), "0.:.05:2.");
        Self {
            planner_data: PlannerCommonData::new(Self::planner_name_prefix(), level),
            q1_sampler: quotient.get_q1().alloc_state_sampler(),
            x1_sampler: quotient.get_x1().map(|x1| x1.alloc_default_state_sampler()),
            q0_sampler: quotient.get_q0().map(|q0| q0.alloc_default_state_sampler()),
            quotient,
            roadmap_params,
            param_set,
            roadmap: Mutex::new(Roadmap::new(nn)),
            start_state: None,
            goal_state: None,
            start_vertex: None,
            goal_vertex: None,
        }
    }

    pub fn milestone_count(&self) -> usize {
        lock(&self.roadmap).milestone_count()
    }

    pub fn vertex_count(&self) -> usize {
        lock(&self.roadmap).vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        lock(&self.roadmap).graph.num_edges()
    }

    fn insert_terminals(&mut self) -> Result<()> {
        let name = self.get_name().to_string();
        let (start, goal) = match (&self.start_state, &self.goal_state) {
            (Some(start), Some(goal)) => (start.clone(), goal.clone()),
            _ => fatal!(PlannerError::MissingProblemDefinition(name)),
        };
        let si = self.quotient.get_q1();
        if !si.is_valid(&start) {
            fatal!(PlannerError::InvalidStart(name.clone()), "{}: start {:?} is invalid", name, start);
        }
        if !si.is_valid(&goal) {
            fatal!(PlannerError::InvalidGoal(name.clone()), "{}: goal {:?} is invalid", name, goal);
        }
        let k = self.roadmap_params.max_nearest_neighbors;
        let roadmap = self.roadmap.get_mut().unwrap_or_else(PoisonError::into_inner);
        self.start_vertex = Some(roadmap.add_milestone(si, start, k)?);
        self.goal_vertex = Some(roadmap.add_milestone(si, goal, k)?);
        Ok(())
    }

    fn terminals(&self) -> Option<(usize, usize)> {
        self.start_vertex.zip(self.goal_vertex)
    }
}

/// Add samples as milestones until `ptc` fires.
fn grow_roadmap(
    si: &SpaceInformation,
    roadmap: &Mutex<Roadmap>,
    sampler: &mut LevelSampler,
    k: usize,
    ptc: &PlannerTerminationCondition,
) -> Result<()> {
    let mut state = si.alloc_state();
    while !ptc.eval() {
        sampler.sample(&mut state)?;
        let mut roadmap = lock(roadmap);
        if si.is_valid(&state) {
            roadmap.add_milestone(si, state.clone(), k)?;
        } else {
            roadmap.add_infeasible(state.clone());
        }
    }
    Ok(())
}

/// Random bounce walks out of hard to connect milestones, until `ptc` fires.
fn expand_roadmap(
    si: &SpaceInformation,
    roadmap: &Mutex<Roadmap>,
    rng: &mut RNG,
    walk_sampler: &mut dyn StateSampler,
    k: usize,
    ptc: &PlannerTerminationCondition,
) -> Result<()> {
    let mut walk = Vec::with_capacity(magic::MAX_RANDOM_BOUNCE_STEPS);
    while !ptc.eval() {
        let (v, start) = {
            let roadmap = lock(roadmap);
            match roadmap.pick_expansion_vertex(rng) {
                Some(v) => (v, roadmap.vertices[v].state.clone()),
                None => return Ok(()),
            }
        };
        walk.clear();
        if si.random_bounce_motion(walk_sampler, &start, magic::MAX_RANDOM_BOUNCE_STEPS, &mut walk) == 0 {
            continue;
        }
        let mut roadmap = lock(roadmap);
        let (intermediate, last) = walk.split_at(walk.len() - 1);
        let last = roadmap.add_milestone(si, last[0].clone(), k)?;
        if !intermediate.is_empty() || !roadmap.same_component(v, last) {
            let mut previous = v;
            for state in intermediate {
                let w = roadmap.add_feasible_vertex(si, state.clone());
                roadmap.connect(si, previous, w);
                previous = w;
            }
            roadmap.connect(si, previous, last);
        }
    }
    Ok(())
}

impl LevelPlanner for QuotientRoadmap {
    fn quotient(&self) -> &Quotient {
        &self.quotient
    }

    fn set_problem_definition(&mut self, start: State, goal: State) {
        self.start_state = Some(start);
        self.goal_state = Some(goal);
    }

    fn setup(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<()> {
        check_ancestry(&*self, ancestors)?;
        self.roadmap.get_mut().unwrap_or_else(PoisonError::into_inner).clear();
        self.insert_terminals()?;
        info!(
            "{}: ready with {} states already in datastructure",
            self.get_name(),
            self.vertex_count()
        );
        Ok(())
    }

    fn grow(&mut self, ancestors: &[Box<dyn LevelPlanner>], ptc: &PlannerTerminationCondition) -> Result<()> {
        let (start, goal) = match self.terminals() {
            Some(terminals) => terminals,
            None => fatal!(PlannerError::MissingProblemDefinition(self.get_name().to_string())),
        };
        self.planner_data.iterations += 1;
        let Self {
            planner_data,
            quotient,
            roadmap_params,
            roadmap,
            q1_sampler,
            x1_sampler,
            q0_sampler,
            ..
        } = self;
        let roadmap: &Mutex<Roadmap> = roadmap;
        let quotient: &Quotient = quotient;
        let si = quotient.get_q1();
        let k = roadmap_params.max_nearest_neighbors;
        let build_time = roadmap_params.build_time;

        let lift = match (ancestors.last(), x1_sampler, q0_sampler) {
            (Some(parent), Some(x1), Some(q0)) => Some((parent.as_ref(), x1.as_mut(), q0.as_mut())),
            _ => None,
        };
        let mut walk_sampler = si.alloc_state_sampler();
        let mut sampler = LevelSampler {
            quotient,
            rng: &mut planner_data.rng,
            q1_sampler: q1_sampler.as_mut(),
            lift,
        };

        let found = Arc::new(AtomicBool::new(false));
        let finished = AtomicBool::new(false);
        let stop = PlannerTerminationCondition::or(ptc, &PlannerTerminationCondition::from_flag(found.clone()));
        thread::scope(|scope| {
            scope.spawn(|| {
                while !ptc.eval() && !found.load(Ordering::Acquire) && !finished.load(Ordering::Acquire) {
                    if lock(roadmap).same_component(start, goal) {
                        found.store(true, Ordering::Release);
                        break;
                    }
                    thread::sleep(magic::SOLUTION_POLLING_INTERVAL);
                }
            });

            let mut build = || -> Result<()> {
                while !stop.eval() {
                    let growing = PlannerTerminationCondition::timed_secs(2.0 * build_time);
                    grow_roadmap(si, roadmap, &mut sampler, k, &PlannerTerminationCondition::or(&stop, &growing))?;
                    let expanding = PlannerTerminationCondition::timed_secs(build_time);
                    expand_roadmap(
                        si,
                        roadmap,
                        sampler.rng,
                        walk_sampler.as_mut(),
                        k,
                        &PlannerTerminationCondition::or(&stop, &expanding),
                    )?;
                }
                Ok(())
            };
            let built = build();
            finished.store(true, Ordering::Release);
            built
        })?;

        let roadmap = lock(roadmap);
        debug!(
            "{}: {} milestones, {} edges",
            planner_data.name,
            roadmap.milestone_count(),
            roadmap.graph.num_edges()
        );
        Ok(())
    }

    fn has_solution(&mut self, _ancestors: &[Box<dyn LevelPlanner>]) -> Result<bool> {
        Ok(match self.terminals() {
            Some((start, goal)) => lock(&self.roadmap).same_component(start, goal),
            None => false,
        })
    }

    fn get_solution(&mut self, ancestors: &[Box<dyn LevelPlanner>]) -> Result<Option<Vec<State>>> {
        if !self.has_solution(ancestors)? {
            return Ok(None);
        }
        let (start, goal) = match self.terminals() {
            Some(terminals) => terminals,
            None => return Ok(None),
        };
        let space = self.quotient.get_q1().get_state_space();
        let objective = PathLengthOptimizationObjective::new(space.as_ref());
        let roadmap = lock(&self.roadmap);
        let goal_state = &roadmap.vertices[goal].state;
        let found = astar(
            start,
            |v| roadmap.graph.neighbors(v).map(|(n, w)| (n, Cost(w))).collect::<Vec<_>>(),
            |v| Cost(space.distance(&roadmap.vertices[v].state, goal_state)),
            |v| v == goal,
            &objective,
        );
        match found {
            Some((path, cost)) => {
                info!("{}: solution with {} states, cost {:.4}", self.get_name(), path.len(), cost.0);
                Ok(Some(path.into_iter().map(|v| roadmap.vertices[v].state.clone()).collect()))
            }
            None => fatal!(PlannerError::NoPath(ConfigurationId(start), ConfigurationId(goal))),
        }
    }

    fn get_planner_data(&self) -> PlannerData {
        let roadmap = lock(&self.roadmap);
        let mut data = PlannerData::default();
        for (v, vertex) in roadmap.vertices.iter().enumerate() {
            let mut annotated =
                PlannerDataVertexAnnotated::new(vertex.state.clone(), self.level(), vertex.radius, vertex.feasibility());
            annotated.is_start = Some(v) == self.start_vertex;
            annotated.is_goal = Some(v) == self.goal_vertex;
            data.add_vertex(annotated);
        }
        for (u, v, _) in roadmap.graph.edges() {
            data.add_edge(u, v);
        }
        data
    }

    fn clear(&mut self, _ancestors: &[Box<dyn LevelPlanner>]) -> Result<()> {
        self.roadmap.get_mut().unwrap_or_else(PoisonError::into_inner).clear();
        self.start_vertex = None;
        self.goal_vertex = None;
        if self.start_state.is_some() && self.goal_state.is_some() {
            self.insert_terminals()?;
        }
        Ok(())
    }

    /// Draws near necessary milestones first, near any milestone otherwise. A roadmap has
    /// no configurations to hand out as cosets.
    fn sample_from_graph(
        &self,
        rng: &mut RNG,
        sampler: &mut dyn StateSampler,
        out: &mut [f64],
    ) -> Result<Option<ConfigurationId>> {
        let roadmap = lock(&self.roadmap);
        let picked = roadmap.pdf_necessary.sample(rng.uniform01()).or_else(|| {
            let feasible: Vec<usize> = (0..roadmap.vertices.len())
                .filter(|&v| roadmap.vertices[v].is_feasible)
                .collect();
            (!feasible.is_empty()).then(|| feasible[rng.uniform_int(0, feasible.len() - 1)])
        });
        let vertex = match picked {
            Some(v) => &roadmap.vertices[v],
            None => fatal!(PlannerError::EmptyGraph(self.get_name().to_string())),
        };
        sampler.sample_uniform_near(out, &vertex.state, vertex.radius);
        Ok(None)
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
            ("max_nearest_neighbors", Some(v)) => self.roadmap_params.max_nearest_neighbors = v.max(1.0) as usize,
            ("build_time", Some(v)) => self.roadmap_params.build_time = v,
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::hierarchy::robot_world::RobotWorld;
    use crate::util::disk_world::{DiskWorld, RobotShape};

    const NO_ANCESTORS: &[Box<dyn LevelPlanner>] = &[];

    fn roadmap(world: &DiskWorld, robot: usize) -> QuotientRoadmap {
        let space = Arc::new(RealVectorStateSpace::with_bounds(&[-4.0, -4.0], &[4.0, 4.0]));
        let si = SpaceInformation::new(space, world.position_checker(robot).unwrap());
        let params = RoadmapParams {
            build_time: 0.05,
            ..RoadmapParams::default()
        };
        let mut planner = QuotientRoadmap::new(Quotient::atomic(si), params, 0);
        planner.planner_data_mut().reseed(5);
        planner
    }

    #[test]
    fn test_solves_around_obstacle() {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        let robot = world.add_robot("disk", RobotShape::Disk { radius: 0.1 });
        let mut planner = roadmap(&world, robot);
        planner.set_problem_definition(State::from_slice(&[-2.0, 0.0]), State::from_slice(&[2.0, 0.0]));
        planner.setup(NO_ANCESTORS).unwrap();
        assert_eq!(planner.milestone_count(), 2);
        assert!(!planner.has_solution(NO_ANCESTORS).unwrap());
        assert!(planner.get_solution(NO_ANCESTORS).unwrap().is_none());

        let ptc = PlannerTerminationCondition::timed_secs(20.0);
        while !planner.has_solution(NO_ANCESTORS).unwrap() {
            assert!(!ptc.eval(), "no solution in time");
            planner.grow(NO_ANCESTORS, &ptc).unwrap();
        }
        let path = planner.get_solution(NO_ANCESTORS).unwrap().unwrap();
        assert_eq!(&path[0][..], &[-2.0, 0.0]);
        assert_eq!(&path[path.len() - 1][..], &[2.0, 0.0]);
        let checker = world.position_checker(robot).unwrap();
        assert!(path.iter().all(|s| checker.is_valid(s)));

        let data = planner.get_planner_data();
        assert_eq!(data.num_vertices(), planner.vertex_count());
        assert_eq!(data.num_edges(), planner.edge_count());
        assert_eq!(data.start_vertices().count(), 1);
        assert_eq!(data.goal_vertices().count(), 1);
    }

    #[test]
    fn test_setup_rejects_invalid_terminals() {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        let robot = world.add_robot("disk", RobotShape::Disk { radius: 0.1 });
        let mut planner = roadmap(&world, robot);
        assert!(matches!(
            planner.setup(NO_ANCESTORS),
            Err(PlannerError::MissingProblemDefinition(_))
        ));
        planner.set_problem_definition(State::from_slice(&[0.0, 0.0]), State::from_slice(&[2.0, 0.0]));
        assert!(matches!(planner.setup(NO_ANCESTORS), Err(PlannerError::InvalidStart(_))));
        planner.set_problem_definition(State::from_slice(&[-2.0, 0.0]), State::from_slice(&[0.5, 0.0]));
        assert!(matches!(planner.setup(NO_ANCESTORS), Err(PlannerError::InvalidGoal(_))));
    }

    #[test]
    fn test_sample_from_graph_prefers_necessary() {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        let robot = world.add_robot("stick", RobotShape::Stick { half_length: 0.5 });
        let mut planner = roadmap(&world, robot);
        // start is necessary only, goal is sufficient
        planner.set_problem_definition(State::from_slice(&[-1.3, 0.0]), State::from_slice(&[3.0, 3.0]));
        planner.setup(NO_ANCESTORS).unwrap();

        let mut rng = RNG::with_seed(1);
        let mut sampler = planner.quotient().get_q1().alloc_state_sampler();
        let mut out = [0.0; 2];
        for _ in 0..20 {
            let coset = planner.sample_from_graph(&mut rng, sampler.as_mut(), &mut out).unwrap();
            assert!(coset.is_none());
            assert!((out[0] + 1.3).abs() <= 0.3 + 1e-9);
            assert!(out[1].abs() <= 0.3 + 1e-9);
        }
    }

    #[test]
    fn test_clear_keeps_terminals() {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        let robot = world.add_robot("disk", RobotShape::Disk { radius: 0.1 });
        let mut planner = roadmap(&world, robot);
        planner.set_problem_definition(State::from_slice(&[-2.0, 0.0]), State::from_slice(&[2.0, 0.0]));
        planner.setup(NO_ANCESTORS).unwrap();
        planner
            .grow(NO_ANCESTORS, &PlannerTerminationCondition::timed_secs(0.05))
            .unwrap();
        assert!(planner.vertex_count() > 2);
        planner.clear(NO_ANCESTORS).unwrap();
        assert_eq!(planner.vertex_count(), 2);
        assert_eq!(planner.edge_count(), 0);

        assert!(planner.set_param("max_nearest_neighbors", ParamValue::Int(3)));
        assert!(!planner.set_param("max_nearest_neighbors", ParamValue::Real(3.0)));
        assert_eq!(planner.roadmap_params.max_nearest_neighbors, 3);
    }
}

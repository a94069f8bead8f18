use super::state::State;

/// How much of a vertex neighborhood is known to be collision free.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeasibilityType {
    Infeasible,
    /// Valid for the exact robot.
    Feasible,
    /// Valid for the outer robot approximation.
    SufficientFeasible,
}

#[derive(Clone, Debug)]
pub struct PlannerDataVertexAnnotated {
    pub state: State,
    pub level: usize,
    pub radius: f64,
    pub feasibility: FeasibilityType,
    pub is_start: bool,
    pub is_goal: bool,
}

impl PlannerDataVertexAnnotated {
    pub fn new(state: State, level: usize, radius: f64, feasibility: FeasibilityType) -> Self {
        Self {
            state,
            level,
            radius,
            feasibility,
            is_start: false,
            is_goal: false,
        }
    }
}

/// Read-only snapshot of a planner graph, for visualization and inspection.
#[derive(Clone, Debug, Default)]
pub struct PlannerData {
    vertices: Vec<PlannerDataVertexAnnotated>,
    edges: Vec<(usize, usize)>,
}

impl PlannerData {
    pub fn add_vertex(&mut self, vertex: PlannerDataVertexAnnotated) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, v1: usize, v2: usize) -> bool {
        if v1 >= self.vertices.len() || v2 >= self.vertices.len() || v1 == v2 {
            return false;
        }
        self.edges.push((v1, v2));
        true
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[PlannerDataVertexAnnotated] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn start_vertices(&self) -> impl Iterator<Item = &PlannerDataVertexAnnotated> {
        self.vertices.iter().filter(|v| v.is_start)
    }

    pub fn goal_vertices(&self) -> impl Iterator<Item = &PlannerDataVertexAnnotated> {
        self.vertices.iter().filter(|v| v.is_goal)
    }

    /// Append `other`, shifting its vertex indices.
    pub fn extend(&mut self, other: PlannerData) {
        let offset = self.vertices.len();
        self.vertices.extend(other.vertices);
        self.edges
            .extend(other.edges.into_iter().map(|(a, b)| (a + offset, b + offset)));
    }
}

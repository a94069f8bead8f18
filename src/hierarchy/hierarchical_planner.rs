use std::fmt;
use std::sync::Arc;

use anyhow::{ensure, Context};
use tracing::{info, warn};

use crate::base::planner_termination::PlannerTerminationCondition;
use crate::base::space_information::SpaceInformation;
use crate::base::spaces::real_vector_bounds::RealVectorBounds;
use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
use crate::base::spaces::rn_so2_state_space;
use crate::base::state::State;
use crate::error::InputError;
use crate::planners::multi_quotient::MultiQuotient;
use crate::planners::strategy::{StrategyKind, StrategyParams};
use crate::planners::MotionPlannerInterface;
use crate::tools::config::magic_constants::magic;
use crate::util::arc_length_path::ArcLengthPath;

use super::path_constrained::{lift_path, PathConstrainedStateValidityChecker};
use super::path_tree::PathNode;
use super::planner_input::PlannerInput;
use super::robot_world::RobotWorld;

/// Builds a tree of paths level by level and lets the user walk it like a folder
/// hierarchy. Level 0 plans the reference point of the coarsest robot in the plane, level
/// 1 plans the orientation of the next robot along the selected level 0 path.
pub struct HierarchicalMotionPlanner {
    world: Arc<dyn RobotWorld>,
    input: PlannerInput,
    strategy: StrategyKind,
    params: StrategyParams,
    robot_idxs: Vec<usize>,
    workspace: RealVectorBounds,
    max_depth: usize,
    tree: PathNode,
    current_level: usize,
    current_level_node: usize,
    current_path: Vec<usize>,
}

impl HierarchicalMotionPlanner {
    pub fn new(world: Arc<dyn RobotWorld>, input: PlannerInput) -> Result<Self, InputError> {
        let strategy = input.validate()?;
        if input.se3_min.len() < 2 || input.se3_min.len() != input.se3_max.len() {
            return Err(InputError::MissingWorkspaceBounds);
        }
        let robot_idxs = input.robot_idxs();
        if let Some(&missing) = robot_idxs.iter().find(|&&idx| world.robot_name(idx).is_none()) {
            return Err(InputError::UnknownRobot(missing));
        }
        let workspace = RealVectorBounds::from_low_high(&input.se3_min, &input.se3_max).slice(0..2);
        info!("{}", input);

        Ok(Self {
            world,
            input,
            strategy,
            params: StrategyParams::default(),
            robot_idxs,
            workspace,
            max_depth: magic::DEFAULT_HIERARCHY_MAX_DEPTH,
            tree: PathNode::root(),
            current_level: 0,
            current_level_node: 0,
            current_path: Vec::new(),
        })
    }

    pub fn with_params(mut self, params: StrategyParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Plan the level below the node at `path_idxs` and append every path found as a
    /// child of that node. `Ok(false)` when there is nothing to plan or planning failed.
    pub fn solve(&mut self, path_idxs: &[usize]) -> anyhow::Result<bool> {
        let level = match self.tree.node_from_path(path_idxs) {
            Some(node) => node.level(),
            None => return Ok(false),
        };
        if level + 1 >= self.robot_idxs.len() {
            info!("reached bottom level {}, nothing more to solve", level);
            return Ok(false);
        }

        let robot = self.robot_idxs[level];
        info!(
            "planning level {} with robot {} ({})",
            level,
            robot,
            self.world.robot_name(robot).unwrap_or("unnamed")
        );
        let paths = match level {
            0 => self.solve_rotation_invariant(robot)?,
            1 => {
                let constraint = self.tree.node_from_path(path_idxs).map(|n| n.path().to_vec());
                self.solve_along_path(robot, constraint.unwrap_or_default())?
            }
            _ => return Ok(true),
        };

        let node = self
            .tree
            .node_from_path_mut(path_idxs)
            .context("planned node vanished from the path tree")?;
        match paths {
            Some(path) => {
                node.add_path(path);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reference point of the robot in the plane.
    fn solve_rotation_invariant(&self, robot: usize) -> anyhow::Result<Option<Vec<State>>> {
        let si = SpaceInformation::new(
            Arc::new(RealVectorStateSpace::from_bounds(&self.workspace)),
            self.world.position_checker(robot)?,
        );
        self.plan(vec![si], self.init_config(0), self.goal_config(0))
    }

    /// Arc length along `constraint` first, then the orientation along it. The result is
    /// lifted back to `(x, y, yaw)`.
    fn solve_along_path(&self, robot: usize, constraint: Vec<State>) -> anyhow::Result<Option<Vec<State>>> {
        let path = Arc::new(ArcLengthPath::new(constraint).context("level 0 node carries no path")?);
        let length = path.length();
        ensure!(length > 0.0, "constraint path has zero length");

        let bounds = RealVectorBounds::from_low_high(&[0.0], &[length]);
        let along = SpaceInformation::new(
            Arc::new(RealVectorStateSpace::from_bounds(&bounds)),
            Arc::new(PathConstrainedStateValidityChecker::new(
                path.clone(),
                self.world.position_checker(robot)?,
            )),
        );
        let with_roll = SpaceInformation::new(
            Arc::new(rn_so2_state_space(&bounds, self.world.rotation_weight(robot)?)?),
            Arc::new(PathConstrainedStateValidityChecker::new(
                path.clone(),
                self.world.configuration_checker(robot)?,
            )),
        );

        let start = State::from_slice(&[0.0, self.init_config(1)[2]]);
        let goal = State::from_slice(&[length, self.goal_config(1)[2]]);
        let solution = self.plan(vec![along, with_roll], start, goal)?;
        Ok(solution.map(|states| lift_path(&path, &states)))
    }

    fn plan(&self, spaces: Vec<SpaceInformation>, start: State, goal: State) -> anyhow::Result<Option<Vec<State>>> {
        let mut planner = MultiQuotient::from_spaces(self.strategy, spaces, &self.params, start, goal)?;
        let ptc = PlannerTerminationCondition::timed_secs(self.input.max_planning_time);
        let status = planner.solve(&ptc)?;
        if !status.is_solved() {
            return Ok(None);
        }
        Ok(planner.path().map(<[State]>::to_vec))
    }

    /// Plan below the selected path and descend to its first child. Returns false and
    /// keeps the cursor when the maximum depth is reached or planning fails.
    pub fn expand_path(&mut self) -> bool {
        if self.current_level + 1 >= self.max_depth {
            return false;
        }
        let path_idxs = self.current_path.clone();
        match self.solve(&path_idxs) {
            Ok(true) => {
                self.current_level += 1;
                self.current_level_node = 0;
                self.current_path.push(0);
                true
            }
            Ok(false) => {
                warn!("path could not be expanded");
                false
            }
            Err(err) => {
                warn!("path could not be expanded: {:#}", err);
                false
            }
        }
    }

    /// Go back up one level, dropping the paths planned below the selection.
    pub fn collapse_path(&mut self) -> bool {
        if self.current_level == 0 {
            return false;
        }
        self.current_path.pop();
        self.tree.collapse(&self.current_path);
        self.current_level -= 1;
        self.current_level_node = self.current_path.last().copied().unwrap_or(0);
        true
    }

    pub fn next_path(&mut self) {
        let count = self.tree.sibling_count(&self.current_path);
        self.current_level_node = if self.current_level_node + 1 < count {
            self.current_level_node + 1
        } else {
            0
        };
        self.select_node();
    }

    pub fn previous_path(&mut self) {
        let count = self.tree.sibling_count(&self.current_path);
        self.current_level_node = if self.current_level_node > 0 {
            self.current_level_node - 1
        } else {
            count.saturating_sub(1)
        };
        self.select_node();
    }

    fn select_node(&mut self) {
        if let Some(last) = self.current_path.last_mut() {
            *last = self.current_level_node;
        }
    }

    pub fn tree(&self) -> &PathNode {
        &self.tree
    }

    pub fn selected_path(&self) -> &[State] {
        self.tree
            .node_from_path(&self.current_path)
            .map(PathNode::path)
            .unwrap_or(&[])
    }

    /// Paths of the other children of the selected node's parent.
    pub fn sibling_paths(&self) -> Vec<&[State]> {
        let parent = match self.current_path.split_last() {
            Some((_, parent)) => parent,
            None => return Vec::new(),
        };
        self.tree
            .node_from_path(parent)
            .map(|p| {
                p.children()
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != self.current_level_node)
                    .map(|(_, c)| c.path())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn selected_path_indices(&self) -> &[usize] {
        &self.current_path
    }

    /// Robot of the selected level, `None` past the last robot.
    pub fn selected_path_robot(&self) -> Option<usize> {
        self.robot_idxs.get(self.current_level).copied()
    }

    pub fn selected_path_init_config(&self) -> State {
        self.init_config(self.current_level)
    }

    pub fn selected_path_goal_config(&self) -> State {
        self.goal_config(self.current_level)
    }

    /// Start of `level`, the input configuration cut or padded to the level's dimension.
    pub fn init_config(&self, level: usize) -> State {
        resized(&self.input.q_init, level_dimension(level))
    }

    pub fn goal_config(&self, level: usize) -> State {
        resized(&self.input.q_goal, level_dimension(level))
    }

    pub fn robot_idx(&self, level: usize) -> Option<usize> {
        self.robot_idxs.get(level).copied()
    }

    pub fn number_of_levels(&self) -> usize {
        self.robot_idxs.len()
    }

    pub fn number_of_nodes_on_selected_level(&self) -> usize {
        self.tree.count_at_depth(self.current_level)
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn selected_node(&self) -> usize {
        self.current_level_node
    }
}

/// Planar reference point on level 0, full planar configuration below.
fn level_dimension(level: usize) -> usize {
    if level == 0 {
        2
    } else {
        3
    }
}

fn resized(q: &[f64], dimension: usize) -> State {
    let mut values = q.to_vec();
    values.resize(dimension, 0.0);
    State::from(values)
}

impl fmt::Display for HierarchicalMotionPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "hierarchical planner ({})", self.strategy)?;
        for (level, &robot) in self.robot_idxs.iter().enumerate() {
            writeln!(
                f,
                "  level {} : robot {} {} with {} nodes",
                level,
                robot,
                self.world.robot_name(robot).unwrap_or("unnamed"),
                self.tree.count_at_depth(level + 1)
            )?;
        }
        writeln!(f, "  current level : {}", self.current_level)?;
        writeln!(f, "  current node  : {}", self.current_level_node)?;
        write!(f, "  current path  : ")?;
        for k in &self.current_path {
            write!(f, "->{}", k)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::disk_world::{DiskWorld, RobotShape};
    use std::f64::consts::PI;

    fn world() -> Arc<DiskWorld> {
        let mut world = DiskWorld::new().with_obstacle([0.0, 0.0], 1.0);
        world.add_robot("disk", RobotShape::Disk { radius: 0.2 });
        world.add_robot("stick", RobotShape::Stick { half_length: 0.25 });
        world.add_robot("stick_full", RobotShape::Stick { half_length: 0.25 });
        Arc::new(world)
    }

    fn input(q_init: Vec<f64>) -> PlannerInput {
        let mut input = PlannerInput::new("hierarchical:cover", q_init, vec![2.0, 0.0, 0.0])
            .with_workspace_bounds(vec![-4.0, -4.0, -PI], vec![4.0, 4.0, PI])
            .with_layer(0, None, "R2")
            .with_layer(1, None, "SE2")
            .with_layer(2, None, "SE2");
        input.max_planning_time = 30.0;
        input
    }

    fn planner() -> HierarchicalMotionPlanner {
        HierarchicalMotionPlanner::new(world(), input(vec![-2.0, 0.0, 0.0])).unwrap()
    }

    fn straight(x: f64) -> Vec<State> {
        vec![State::from_slice(&[x, -1.0]), State::from_slice(&[x, 1.0])]
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut missing_bounds = input(vec![-2.0, 0.0, 0.0]);
        missing_bounds.se3_min.clear();
        assert_eq!(
            HierarchicalMotionPlanner::new(world(), missing_bounds).err(),
            Some(InputError::MissingWorkspaceBounds)
        );
        let unknown_robot = input(vec![-2.0, 0.0, 0.0]).with_layer(7, None, "SE2");
        assert_eq!(
            HierarchicalMotionPlanner::new(world(), unknown_robot).err(),
            Some(InputError::UnknownRobot(7))
        );
    }

    #[test]
    fn test_level_configs() {
        let planner = planner();
        assert_eq!(&planner.init_config(0)[..], &[-2.0, 0.0]);
        assert_eq!(&planner.goal_config(1)[..], &[2.0, 0.0, 0.0]);
        assert_eq!(&planner.selected_path_init_config()[..], &[-2.0, 0.0]);
        assert_eq!(planner.selected_path_robot(), Some(0));
        assert_eq!(planner.number_of_levels(), 3);
        assert_eq!(planner.number_of_nodes_on_selected_level(), 1);
        assert!(planner.selected_path().is_empty());
        assert!(planner.sibling_paths().is_empty());
        assert!(planner.to_string().contains("level 2 : robot 2 stick_full"));
    }

    #[test]
    fn test_cycles_through_siblings() {
        let mut planner = planner();
        for x in 0..3 {
            planner.tree.add_path(straight(x as f64));
        }
        planner.current_level = 1;
        planner.current_path = vec![0];

        planner.next_path();
        assert_eq!(planner.selected_path_indices(), &[1]);
        assert_eq!(planner.selected_path()[0][0], 1.0);
        let siblings = planner.sibling_paths();
        assert_eq!(siblings.len(), 2);
        assert!(siblings.iter().all(|p| p[0][0] != 1.0));

        planner.next_path();
        planner.next_path();
        assert_eq!(planner.selected_node(), 0);
        planner.previous_path();
        assert_eq!(planner.selected_node(), 2);
        assert_eq!(planner.selected_path_indices(), &[2]);

        assert!(planner.collapse_path());
        assert_eq!(planner.current_level(), 0);
        assert!(planner.selected_path_indices().is_empty());
        assert!(!planner.collapse_path());

        // at the root the only sibling is the root itself
        planner.next_path();
        assert_eq!(planner.selected_node(), 0);
    }

    #[test]
    fn test_failed_expansion_keeps_cursor() {
        // start inside the obstacle
        let mut planner = HierarchicalMotionPlanner::new(world(), input(vec![0.0, 0.0, 0.0])).unwrap();
        assert!(!planner.expand_path());
        assert_eq!(planner.current_level(), 0);
        assert!(planner.selected_path_indices().is_empty());
        assert!(planner.tree().children().is_empty());
    }

    #[test]
    fn test_expand_and_collapse_hierarchy() {
        let mut planner = planner();
        assert!(planner.expand_path());
        assert_eq!(planner.current_level(), 1);
        assert_eq!(planner.selected_path_indices(), &[0]);
        let planar = planner.selected_path().to_vec();
        assert_eq!(&planar[0][..], &[-2.0, 0.0]);
        assert_eq!(&planar[planar.len() - 1][..], &[2.0, 0.0]);

        assert!(planner.expand_path());
        assert_eq!(planner.current_level(), 2);
        assert_eq!(planner.selected_path_indices(), &[0, 0]);
        let full = planner.selected_path();
        assert_eq!(full[0].dimension(), 3);
        assert!((full[0][0] + 2.0).abs() < 1e-9);
        assert!((full[full.len() - 1][0] - 2.0).abs() < 1e-9);
        let checker = world().configuration_checker(1).unwrap();
        assert!(full.iter().all(|q| checker.is_valid(q)));

        // maximum depth reached
        assert!(!planner.expand_path());
        assert_eq!(planner.current_level(), 2);
        assert_eq!(planner.selected_path_indices(), &[0, 0]);

        assert!(planner.collapse_path());
        assert_eq!(planner.current_level(), 1);
        assert_eq!(planner.selected_path_indices(), &[0]);
        assert_eq!(planner.number_of_nodes_on_selected_level(), 1);
        assert!(planner.tree().node_from_path(&[0]).unwrap().children().is_empty());
    }
}

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::base::objective::{Cost, OptimizationObjective};

/// Priority queue item, smallest estimated total cost first.
struct QueueItem<N> {
    estimate: Cost,
    node: N,
}

impl<N> PartialEq for QueueItem<N> {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.0.total_cmp(&other.estimate.0) == Ordering::Equal
    }
}

impl<N> Eq for QueueItem<N> {}

impl<N> Ord for QueueItem<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for a min-heap
        other.estimate.0.total_cmp(&self.estimate.0)
    }
}

impl<N> PartialOrd for QueueItem<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search from `start` until `is_goal` accepts a node. Edge costs are combined and
/// compared by `objective`. Returns the node sequence start to goal and its cost, or
/// `None` if no goal node is reachable.
pub fn astar<N, FN, IN, FH, FG>(
    start: N,
    mut successors: FN,
    mut heuristic: FH,
    mut is_goal: FG,
    objective: &dyn OptimizationObjective,
) -> Option<(Vec<N>, Cost)>
where
    N: Ord + Copy,
    FN: FnMut(N) -> IN,
    IN: IntoIterator<Item = (N, Cost)>,
    FH: FnMut(N) -> Cost,
    FG: FnMut(N) -> bool,
{
    let mut best: BTreeMap<N, (Cost, Option<N>)> = BTreeMap::new();
    let mut closed = BTreeSet::new();
    let mut open = BinaryHeap::new();

    best.insert(start, (objective.identity_cost(), None));
    open.push(QueueItem {
        estimate: heuristic(start),
        node: start,
    });

    while let Some(QueueItem { node, .. }) = open.pop() {
        if !closed.insert(node) {
            continue;
        }
        let g = best
            .get(&node)
            .map_or(objective.infinite_cost(), |(cost, _)| *cost);

        if is_goal(node) {
            let mut path = vec![node];
            let mut current = node;
            while let Some((_, Some(predecessor))) = best.get(&current) {
                path.push(*predecessor);
                current = *predecessor;
            }
            path.reverse();
            return Some((path, g));
        }

        for (next, edge_cost) in successors(node) {
            if closed.contains(&next) {
                continue;
            }
            let tentative = objective.combine_costs(g, edge_cost);
            let improves = best
                .get(&next)
                .map_or(true, |(known, _)| objective.is_cost_better_than(tentative, *known));
            if improves {
                best.insert(next, (tentative, Some(node)));
                open.push(QueueItem {
                    estimate: objective.combine_costs(tentative, heuristic(next)),
                    node: next,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::objective::PathLengthOptimizationObjective;
    use crate::base::spaces::real_vector_state_space::RealVectorStateSpace;
    use crate::datastructure::graph::UndirectedGraph;

    #[test]
    fn test_shortest_path_on_diamond() {
        let space = RealVectorStateSpace::with_bounds(&[0.0], &[1.0]);
        let objective = PathLengthOptimizationObjective::new(&space);
        let mut g: UndirectedGraph<usize, f64> = UndirectedGraph::new();
        for v in 0..5 {
            g.add_vertex(v);
        }
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 3, 1.0);
        g.add_edge(0, 2, 0.5);
        g.add_edge(2, 3, 2.0);

        let search = |from: usize, to: usize| {
            astar(
                from,
                |n| g.neighbors(n).map(|(m, w)| (m, Cost(w))).collect::<Vec<_>>(),
                |_| Cost(0.0),
                |n| n == to,
                &objective,
            )
        };
        let (path, cost) = search(0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
        assert_eq!(cost, Cost(2.0));

        let (path, _) = search(3, 0).unwrap();
        assert_eq!(path, vec![3, 1, 0]);

        let (path, cost) = search(2, 2).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(cost, Cost(0.0));

        assert!(search(0, 4).is_none());
    }
}

use crate::base::state::State;

/// Node of the tree of paths found by a hierarchical planner. The root carries no path;
/// a node at depth `k` holds a path planned on level `k - 1`, and its children are the
/// paths of the next finer level constrained to it.
#[derive(Debug, Clone, Default)]
pub struct PathNode {
    level: usize,
    path: Vec<State>,
    children: Vec<PathNode>,
}

impl PathNode {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn path(&self) -> &[State] {
        &self.path
    }

    pub fn children(&self) -> &[PathNode] {
        &self.children
    }

    /// Append `path` as a child and return its index among the children.
    pub fn add_path(&mut self, path: Vec<State>) -> usize {
        self.children.push(PathNode {
            level: self.level + 1,
            path,
            children: Vec::new(),
        });
        self.children.len() - 1
    }

    /// Node reached from here by choosing child `idxs[0]`, then `idxs[1]`, and so on.
    pub fn node_from_path(&self, idxs: &[usize]) -> Option<&PathNode> {
        idxs.iter().try_fold(self, |node, &k| node.children.get(k))
    }

    pub fn node_from_path_mut(&mut self, idxs: &[usize]) -> Option<&mut PathNode> {
        idxs.iter().try_fold(self, |node, &k| node.children.get_mut(k))
    }

    /// Number of nodes sharing the parent of the node at `idxs`, the node included. The
    /// root counts as its own single sibling.
    pub fn sibling_count(&self, idxs: &[usize]) -> usize {
        match idxs.split_last() {
            None => 1,
            Some((_, parent)) => self.node_from_path(parent).map_or(0, |p| p.children.len()),
        }
    }

    /// Drop everything below the node at `idxs`. Returns false if there is no such node.
    pub fn collapse(&mut self, idxs: &[usize]) -> bool {
        match self.node_from_path_mut(idxs) {
            Some(node) => {
                node.children.clear();
                true
            }
            None => false,
        }
    }

    /// Number of nodes of the subtree at `depth` below this node.
    pub fn count_at_depth(&self, depth: usize) -> usize {
        if depth == 0 {
            return 1;
        }
        self.children.iter().map(|c| c.count_at_depth(depth - 1)).sum()
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(PathNode::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(x: f64) -> Vec<State> {
        vec![State::from_slice(&[x, 0.0]), State::from_slice(&[x, 1.0])]
    }

    #[test]
    fn test_add_and_lookup() {
        let mut root = PathNode::root();
        assert_eq!(root.add_path(path(0.0)), 0);
        assert_eq!(root.add_path(path(1.0)), 1);
        let child = root.node_from_path_mut(&[1]).unwrap();
        child.add_path(path(2.0));

        assert_eq!(root.node_from_path(&[]).unwrap().level(), 0);
        let grandchild = root.node_from_path(&[1, 0]).unwrap();
        assert_eq!(grandchild.level(), 2);
        assert_eq!(grandchild.path()[0][0], 2.0);
        assert!(root.node_from_path(&[0, 0]).is_none());
        assert!(root.node_from_path(&[5]).is_none());

        assert_eq!(root.sibling_count(&[]), 1);
        assert_eq!(root.sibling_count(&[0]), 2);
        assert_eq!(root.sibling_count(&[1, 0]), 1);
        assert_eq!(root.count_at_depth(1), 2);
        assert_eq!(root.count_at_depth(2), 1);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_collapse_prunes_subtree() {
        let mut root = PathNode::root();
        root.add_path(path(0.0));
        root.node_from_path_mut(&[0]).unwrap().add_path(path(1.0));
        assert!(root.collapse(&[0]));
        assert!(root.node_from_path(&[0]).unwrap().children().is_empty());
        assert_eq!(root.node_count(), 2);
        assert!(!root.collapse(&[3]));
    }
}

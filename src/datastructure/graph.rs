use std::collections::BTreeMap;

/// Undirected weighted graph keyed by vertex handles. Vertices and edges can be removed
/// without invalidating the remaining handles. Iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct UndirectedGraph<V, W> {
    adjacency: BTreeMap<V, BTreeMap<V, W>>,
    edge_count: usize,
}

impl<V, W> Default for UndirectedGraph<V, W> {
    fn default() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }
}

impl<V: Ord + Copy, W: Copy> UndirectedGraph<V, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        self.adjacency.insert(v, BTreeMap::new());
        true
    }

    /// Removes `v` and all its incident edges.
    pub fn remove_vertex(&mut self, v: V) -> bool {
        let Some(neighbors) = self.adjacency.remove(&v) else {
            return false;
        };
        for u in neighbors.keys() {
            if let Some(adj) = self.adjacency.get_mut(u) {
                adj.remove(&v);
            }
        }
        self.edge_count -= neighbors.len();
        true
    }

    pub fn contains_vertex(&self, v: V) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Adds or re-weights the edge `{u, v}`. Self loops and unknown vertices are refused.
    pub fn add_edge(&mut self, u: V, v: V, weight: W) -> bool {
        if u == v || !self.contains_vertex(u) || !self.contains_vertex(v) {
            return false;
        }
        let fresh = self
            .adjacency
            .get_mut(&u)
            .map(|adj| adj.insert(v, weight).is_none())
            .unwrap_or(false);
        if let Some(adj) = self.adjacency.get_mut(&v) {
            adj.insert(u, weight);
        }
        if fresh {
            self.edge_count += 1;
        }
        true
    }

    pub fn remove_edge(&mut self, u: V, v: V) -> bool {
        let removed = self
            .adjacency
            .get_mut(&u)
            .map(|adj| adj.remove(&v).is_some())
            .unwrap_or(false);
        if removed {
            if let Some(adj) = self.adjacency.get_mut(&v) {
                adj.remove(&u);
            }
            self.edge_count -= 1;
        }
        removed
    }

    pub fn edge_weight(&self, u: V, v: V) -> Option<W> {
        self.adjacency.get(&u)?.get(&v).copied()
    }

    pub fn neighbors(&self, v: V) -> impl Iterator<Item = (V, W)> + '_ {
        self.adjacency
            .get(&v)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(u, w)| (*u, *w)))
    }

    pub fn degree(&self, v: V) -> usize {
        self.adjacency.get(&v).map_or(0, BTreeMap::len)
    }

    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adjacency.keys().copied()
    }

    /// Every edge once, as `(u, v, weight)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (V, V, W)> + '_ {
        self.adjacency.iter().flat_map(|(u, adj)| {
            adj.iter()
                .filter(move |(v, _)| *u < **v)
                .map(move |(v, w)| (*u, *v, *w))
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edge_count = 0;
    }
}

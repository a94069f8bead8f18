/// Union-find over dense `usize` keys, with path compression and union by rank.
#[derive(Debug, Clone, Default)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `x` its own set. Keys in between that were never added become singletons.
    pub fn make_set(&mut self, x: usize) {
        while self.parent.len() <= x {
            self.parent.push(self.parent.len());
            self.rank.push(0);
        }
        self.parent[x] = x;
        self.rank[x] = 0;
    }

    pub fn find_set(&mut self, x: usize) -> Option<usize> {
        if x >= self.parent.len() {
            return None;
        }
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        Some(root)
    }

    pub fn union_set(&mut self, a: usize, b: usize) {
        let (Some(ra), Some(rb)) = (self.find_set(a), self.find_set(b)) else {
            return;
        };
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn same_component(&mut self, a: usize, b: usize) -> bool {
        match (self.find_set(a), self.find_set(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.parent.clear();
        self.rank.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find() {
        let mut sets = DisjointSets::new();
        for i in 0..6 {
            sets.make_set(i);
        }
        sets.union_set(0, 1);
        sets.union_set(2, 3);
        sets.union_set(1, 3);
        assert!(sets.same_component(0, 2));
        assert!(!sets.same_component(0, 4));
        assert!(!sets.same_component(0, 42));
        sets.clear();
        assert_eq!(sets.find_set(0), None);
    }
}

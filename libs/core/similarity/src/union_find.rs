// [libs/core/similarity/src/union_find.rs]
//! Disjoint-set over `i64` archive ids, union-by-rank with path compression.

use std::collections::HashMap;

pub struct UnionFind {
    parent: HashMap<i64, i64>,
    rank: HashMap<i64, u32>,
}

impl Default for UnionFind {
    fn default() -> Self {
        Self::new()
    }
}

impl UnionFind {
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
        }
    }

    /// Registers `id` as a singleton component if it has not been seen
    /// before. No-op otherwise.
    pub fn make_set(&mut self, id: i64) {
        self.parent.entry(id).or_insert(id);
        self.rank.entry(id).or_insert(0);
    }

    /// Finds the representative of `id`'s component, path-compressing along
    /// the way. Registers `id` as a singleton first if unseen.
    pub fn find(&mut self, id: i64) -> i64 {
        self.make_set(id);
        let parent = self.parent[&id];
        if parent == id {
            return id;
        }
        let root = self.find(parent);
        self.parent.insert(id, root);
        root
    }

    /// Unions the components containing `a` and `b`.
    pub fn union(&mut self, a: i64, b: i64) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }

        let rank_a = self.rank[&root_a];
        let rank_b = self.rank[&root_b];
        match rank_a.cmp(&rank_b) {
            std::cmp::Ordering::Less => {
                self.parent.insert(root_a, root_b);
            }
            std::cmp::Ordering::Greater => {
                self.parent.insert(root_b, root_a);
            }
            std::cmp::Ordering::Equal => {
                self.parent.insert(root_b, root_a);
                self.rank.insert(root_a, rank_a + 1);
            }
        }
    }

    /// Enumerates every known element grouped by connected component. Order
    /// of components and of elements within a component is unspecified.
    pub fn components(&mut self) -> Vec<Vec<i64>> {
        let ids: Vec<i64> = self.parent.keys().copied().collect();
        let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
        for id in ids {
            let root = self.find(id);
            grouped.entry(root).or_default().push(id);
        }
        grouped.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn singleton_stays_its_own_component() {
        let mut uf = UnionFind::new();
        uf.make_set(1);
        let mut components = uf.components();
        assert_eq!(components.len(), 1);
        components[0].sort();
        assert_eq!(components[0], vec![1]);
    }

    #[test]
    fn union_merges_components_transitively() {
        let mut uf = UnionFind::new();
        uf.union(1, 2);
        uf.union(2, 3);
        uf.make_set(4);

        assert_eq!(uf.find(1), uf.find(3));
        assert_ne!(uf.find(1), uf.find(4));

        let mut components = uf.components();
        for component in components.iter_mut() {
            component.sort();
        }
        components.sort();
        assert_eq!(components, vec![vec![1, 2, 3], vec![4]]);
    }

    #[test]
    fn union_is_idempotent_on_repeated_calls() {
        let mut uf = UnionFind::new();
        uf.union(10, 20);
        uf.union(10, 20);
        uf.union(20, 10);
        assert_eq!(uf.components().len(), 1);
    }

    proptest! {
        #[test]
        fn all_union_pairs_end_up_same_root(pairs in proptest::collection::vec((0i64..50, 0i64..50), 0..100)) {
            let mut uf = UnionFind::new();
            for (a, b) in &pairs {
                uf.union(*a, *b);
            }
            for (a, b) in &pairs {
                prop_assert_eq!(uf.find(*a), uf.find(*b));
            }
        }
    }
}

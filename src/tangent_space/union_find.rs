use alloc::vec::Vec;

/// Disjoint-set forest over the indices `0..len`.
///
/// Roots are always the smallest index of their set, which keeps the
/// representative of each group independent of the order unions happen in.
pub(super) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub(super) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub(super) fn find(&mut self, mut i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // path compression
        while self.parent[i] != root {
            i = core::mem::replace(&mut self.parent[i], root);
        }

        root
    }

    pub(super) fn union(&mut self, a: usize, b: usize) {
        let (a, b) = (self.find(a), self.find(b));
        let (root, child) = if a < b { (a, b) } else { (b, a) };
        self.parent[child] = root;
    }
}

//! Graph algorithms for interaction network analysis.
//!
//! Connected-component detection over node ids, used by network inspection
//! to report how many disjoint sub-networks a panel holds.

use std::collections::{BTreeMap, HashMap};

/// Union-Find (Disjoint Set Union) over string ids.
///
/// Ids are interned to indices on insertion; path compression and union by
/// rank keep operations effectively constant time.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    index: HashMap<String, usize>,
    ids: Vec<String>,
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element. Adding an existing element is a no-op.
    pub fn make_set(&mut self, id: &str) {
        if self.index.contains_key(id) {
            return;
        }
        let i = self.ids.len();
        self.index.insert(id.to_string(), i);
        self.ids.push(id.to_string());
        self.parent.push(i);
        self.rank.push(0);
    }

    fn root(&mut self, mut i: usize) -> usize {
        let mut top = i;
        while self.parent[top] != top {
            top = self.parent[top];
        }
        // Path compression
        while self.parent[i] != top {
            let next = self.parent[i];
            self.parent[i] = top;
            i = next;
        }
        top
    }

    /// Representative of the set containing `id`, or `None` if unknown.
    pub fn find(&mut self, id: &str) -> Option<String> {
        let i = *self.index.get(id)?;
        let root = self.root(i);
        Some(self.ids[root].clone())
    }

    /// Union the sets containing `a` and `b`.
    ///
    /// Returns `true` if two sets were merged, `false` if they were already
    /// one set or either id is unknown.
    pub fn union(&mut self, a: &str, b: &str) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(a), self.index.get(b)) else {
            return false;
        };
        let (ra, rb) = (self.root(ia), self.root(ib));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: &str, b: &str) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// All components, each sorted, ordered by their smallest id.
    pub fn components(&mut self) -> Vec<Vec<String>> {
        let mut groups: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for i in 0..self.ids.len() {
            let root = self.root(i);
            groups.entry(root).or_default().push(self.ids[i].clone());
        }
        let mut components: Vec<Vec<String>> = groups
            .into_values()
            .map(|mut c| {
                c.sort();
                c
            })
            .collect();
        components.sort();
        components
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Connected components of an undirected view of `edges` over `nodes`.
pub fn connected_components<'a>(
    nodes: impl IntoIterator<Item = &'a str>,
    edges: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Vec<Vec<String>> {
    let mut uf = UnionFind::new();
    for id in nodes {
        uf.make_set(id);
    }
    for (a, b) in edges {
        uf.union(a, b);
    }
    uf.components()
}

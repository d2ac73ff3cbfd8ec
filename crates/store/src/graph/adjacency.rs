use bitvec::prelude::*;

/// A plain undirected graph over integer vertices.
///
/// Vertices are identified by their insertion index; the neighbor list of a
/// vertex preserves the order in which its edges were added. Unlike
/// [`DrawingGraph`](crate::DrawingGraph), vertices can be removed again or
/// contracted into one another, which makes this the representation of
/// choice for derived graphs whose structure is simplified step by step.
///
/// Removal keeps identifiers stable: a removed vertex leaves a hole that is
/// skipped by [`vertices`](AdjacencyGraph::vertices) but still counts towards
/// [`vertex_bound`](AdjacencyGraph::vertex_bound).
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraph {
    adj: Vec<Vec<usize>>,
    removed: BitVec,
    edge_count: usize,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `vertex_count` vertices and no edges.
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertex_count],
            removed: BitVec::repeat(false, vertex_count),
            edge_count: 0,
        }
    }

    pub fn add_vertex(&mut self) -> usize {
        self.adj.push(Vec::new());
        self.removed.push(false);
        self.adj.len() - 1
    }

    /// Adds the undirected edge `{u, v}` and returns `true` if it was not
    /// present yet. Self-loops and duplicate edges are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || self.adj[u].contains(&v) {
            return false;
        }
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.edge_count += 1;
        true
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].contains(&v)
    }

    /// Upper bound (exclusive) on vertex identifiers, including removed ones.
    pub fn vertex_bound(&self) -> usize {
        self.adj.len()
    }

    /// Number of vertices that have not been removed.
    pub fn vertex_count(&self) -> usize {
        self.adj.len() - self.removed.count_ones()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_removed(&self, v: usize) -> bool {
        self.removed[v]
    }

    /// Iterates all vertices that have not been removed, in id order.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.adj.len()).filter(move |&v| !self.removed[v])
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    pub fn max_degree(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Removes `v` and every edge incident to it.
    pub fn remove_vertex(&mut self, v: usize) {
        let neighbors = std::mem::take(&mut self.adj[v]);
        self.edge_count -= neighbors.len();
        for w in neighbors {
            self.adj[w].retain(|&x| x != v);
        }
        self.removed.set(v, true);
    }

    /// Contracts `merged` into `keep`: every neighbor of `merged` becomes a
    /// neighbor of `keep` (without duplicates or self-loops), then `merged`
    /// is removed.
    pub fn contract(&mut self, keep: usize, merged: usize) {
        let neighbors = self.adj[merged].clone();
        for w in neighbors {
            self.add_edge(keep, w);
        }
        self.remove_vertex(merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut g = AdjacencyGraph::with_vertices(4);
        g.add_edge(0, 2);
        g.add_edge(0, 1);
        g.add_edge(0, 3);

        assert_eq!(g.neighbors(0), &[2, 1, 3]);
        assert_eq!(g.degree(0), 3);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn duplicate_and_self_edges_are_ignored() {
        let mut g = AdjacencyGraph::with_vertices(2);
        assert!(g.add_edge(0, 1));
        assert!(!g.add_edge(1, 0));
        assert!(!g.add_edge(1, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn remove_vertex_clears_incident_edges() {
        let mut g = AdjacencyGraph::with_vertices(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.remove_vertex(1);

        assert!(g.is_removed(1));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors(0).is_empty());
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn contract_merges_neighborhoods() {
        let mut g = AdjacencyGraph::with_vertices(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(1, 3);
        g.add_edge(0, 3);
        g.contract(0, 1);

        assert!(g.is_removed(1));
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(0, 3));
        assert_eq!(g.degree(0), 2);
    }
}

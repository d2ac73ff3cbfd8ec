use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::graph::adjacency::AdjacencyGraph;

/// A borrowed view of an [`AdjacencyGraph`] restricted to an alive bitset.
///
/// Recursive decompositions need to reason about a graph minus a few
/// vertices. Instead of cloning the topology for every such step, a view
/// keeps a reference to the underlying graph and a mask of the vertices
/// that are still part of the subproblem; narrowing the view is a bitset
/// copy. The view never outlives the graph it indexes.
#[derive(Debug, Clone)]
pub struct Subgraph<'g> {
    graph: &'g AdjacencyGraph,
    alive: BitVec,
}

impl<'g> Subgraph<'g> {
    /// A view of every vertex that is present in `graph`.
    pub fn new(graph: &'g AdjacencyGraph) -> Self {
        let mut alive = BitVec::repeat(false, graph.vertex_bound());
        for v in graph.vertices() {
            alive.set(v, true);
        }
        Self { graph, alive }
    }

    /// A view restricted to the vertices set in `alive`.
    pub fn with_mask(&self, alive: BitVec) -> Subgraph<'g> {
        Subgraph {
            graph: self.graph,
            alive,
        }
    }

    /// The same view with one more vertex taken out.
    pub fn without(&self, v: usize) -> Subgraph<'g> {
        let mut alive = self.alive.clone();
        alive.set(v, false);
        Subgraph {
            graph: self.graph,
            alive,
        }
    }

    pub fn contains(&self, v: usize) -> bool {
        self.alive[v]
    }

    /// Upper bound (exclusive) on vertex identifiers in the underlying graph.
    pub fn vertex_bound(&self) -> usize {
        self.alive.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.alive.count_ones()
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.alive.iter_ones()
    }

    pub fn first(&self) -> Option<usize> {
        self.alive.first_one()
    }

    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(v)
            .iter()
            .copied()
            .filter(move |&w| self.alive[w])
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.alive[u] && self.alive[v] && self.graph.has_edge(u, v)
    }

    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).count()
    }

    pub fn max_degree(&self) -> usize {
        self.vertices().map(|v| self.degree(v)).max().unwrap_or(0)
    }

    fn reach(&self, start: usize) -> BitVec {
        let mut visited = BitVec::repeat(false, self.alive.len());
        let mut queue = VecDeque::from_iter([start]);
        visited.set(start, true);

        while let Some(v) = queue.pop_front() {
            for w in self.neighbors(v) {
                if !visited.replace(w, true) {
                    queue.push_back(w);
                }
            }
        }

        visited
    }

    /// Whether every pair of alive vertices is connected by a path inside
    /// the view. Empty views count as connected.
    pub fn is_connected(&self) -> bool {
        match self.first() {
            None => true,
            Some(start) => self.reach(start).count_ones() == self.vertex_count(),
        }
    }

    /// Whether the view stays connected after removing any single vertex.
    pub fn is_biconnected(&self) -> bool {
        if self.vertex_count() < 2 || !self.is_connected() {
            return false;
        }
        self.vertices().all(|v| self.without(v).is_connected())
    }

    /// The alive masks of the view's connected components, in order of
    /// their smallest vertex.
    pub fn components(&self) -> Vec<BitVec> {
        let mut components = Vec::new();
        let mut seen: BitVec = BitVec::repeat(false, self.alive.len());

        for v in self.vertices() {
            if seen[v] {
                continue;
            }
            let mask = self.reach(v);
            for w in mask.iter_ones() {
                seen.set(w, true);
            }
            components.push(mask);
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: usize) -> AdjacencyGraph {
        let mut g = AdjacencyGraph::with_vertices(n);
        for v in 0..n {
            g.add_edge(v, (v + 1) % n);
        }
        g
    }

    #[test]
    fn cycle_is_biconnected() {
        let g = cycle(5);
        let view = Subgraph::new(&g);

        assert!(view.is_connected());
        assert!(view.is_biconnected());
        assert_eq!(view.components().len(), 1);
    }

    #[test]
    fn removing_a_vertex_narrows_the_view() {
        let g = cycle(5);
        let view = Subgraph::new(&g).without(2);

        assert_eq!(view.vertex_count(), 4);
        assert!(view.is_connected());
        assert!(!view.is_biconnected());
        assert_eq!(view.degree(1), 1);
        assert_eq!(view.neighbors(3).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn two_removals_disconnect_a_cycle() {
        let g = cycle(6);
        let view = Subgraph::new(&g).without(0).without(3);

        assert!(!view.is_connected());
        let components = view.components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].iter_ones().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(components[1].iter_ones().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn path_has_cut_vertices() {
        let mut g = AdjacencyGraph::with_vertices(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        let view = Subgraph::new(&g);

        assert!(view.is_connected());
        assert!(!view.is_biconnected());
        assert!(!view.without(1).is_connected());
    }

    #[test]
    fn removed_vertices_start_dead() {
        let mut g = cycle(4);
        g.remove_vertex(0);
        let view = Subgraph::new(&g);

        assert!(!view.contains(0));
        assert_eq!(view.vertex_count(), 3);
        assert!(view.is_connected());
    }
}

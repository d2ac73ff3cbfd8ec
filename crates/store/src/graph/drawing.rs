use fxhash::FxHashMap;

use crate::graph::adjacency::AdjacencyGraph;

/// A point on the integer lattice, indexed by axis.
pub type Point = [i32; 3];

/// The (axis, direction) pair through which an arc leaves its start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Port {
    /// Axis index in `0..3`.
    pub axis: usize,
    /// Direction along the axis, `-1` or `+1`.
    pub sign: i32,
}

/// One of the two oriented views of an undirected edge.
///
/// `color` and `orientation` stay unset until port assignment has run;
/// `anchor` is rewritten whenever the owning edge is re-routed.
#[derive(Debug, Clone)]
pub struct Arc {
    pub start: usize,
    pub end: usize,
    /// Axis index in `0..3` the arc initially travels along.
    pub color: Option<usize>,
    /// `-1` or `+1` along the color axis.
    pub orientation: Option<i32>,
    /// The arc's endpoints must become colinear on its color axis.
    pub movement: bool,
    /// The arc is excluded from the sibling-arc color conflict.
    pub special: bool,
    /// The route spends an extra unit step leaving `start`.
    pub anchor: bool,
}

impl Arc {
    fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            color: None,
            orientation: None,
            movement: false,
            special: false,
            anchor: false,
        }
    }

    /// The assigned (axis, direction) pair, once both halves are set.
    pub fn port(&self) -> Option<Port> {
        Some(Port {
            axis: self.color?,
            sign: self.orientation?,
        })
    }
}

/// An undirected edge together with its two arcs and, once routed, the
/// axis-aligned polyline connecting its endpoint positions.
///
/// `arcs[0]` runs from the first endpoint passed to
/// [`DrawingGraph::add_edge`] to the second, `arcs[1]` the other way.
#[derive(Debug, Clone)]
pub struct Edge {
    pub arcs: [Arc; 2],
    pub route: Option<Vec<Point>>,
}

impl Edge {
    /// Endpoints in insertion orientation.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.arcs[0].start, self.arcs[0].end)
    }
}

/// A simple undirected graph plus the attributes of its orthogonal drawing.
///
/// Vertices are identified by their insertion index and enumerate in
/// insertion order; the same holds for edges and for the neighbor lists.
/// Adding an edge creates its two arcs with defaulted attributes. Arcs are
/// addressed by a dense id: the arcs of edge `e` are `2 * e` and
/// `2 * e + 1`, so arc ids can serve as the vertices of derived graphs.
#[derive(Debug, Clone, Default)]
pub struct DrawingGraph {
    topology: AdjacencyGraph,
    positions: Vec<Option<Point>>,
    edges: Vec<Edge>,
    arc_table: FxHashMap<(usize, usize), usize>,
}

impl DrawingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self) -> usize {
        self.positions.push(None);
        self.topology.add_vertex()
    }

    /// Adds the undirected edge `{u, v}` and creates its two arcs.
    ///
    /// Returns the edge id. Adding an existing edge returns the id of the
    /// present edge instead of creating a parallel one.
    ///
    /// # Panics
    ///
    /// Panics if `u == v`; self-loops cannot be drawn.
    pub fn add_edge(&mut self, u: usize, v: usize) -> usize {
        assert!(u != v, "self-loops are not supported");
        if let Some(&arc) = self.arc_table.get(&(u, v)) {
            return arc >> 1;
        }
        let edge = self.edges.len();
        self.edges.push(Edge {
            arcs: [Arc::new(u, v), Arc::new(v, u)],
            route: None,
        });
        self.arc_table.insert((u, v), 2 * edge);
        self.arc_table.insert((v, u), 2 * edge + 1);
        self.topology.add_edge(u, v);
        edge
    }

    pub fn vertex_count(&self) -> usize {
        self.topology.vertex_bound()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn arc_count(&self) -> usize {
        self.edges.len() * 2
    }

    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.vertex_count()
    }

    /// Edge ids in insertion order.
    pub fn edge_ids(&self) -> std::ops::Range<usize> {
        0..self.edges.len()
    }

    /// Arc ids in insertion order; the two arcs of an edge are adjacent.
    pub fn arc_ids(&self) -> std::ops::Range<usize> {
        0..self.arc_count()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.topology.neighbors(v)
    }

    pub fn degree(&self, v: usize) -> usize {
        self.topology.degree(v)
    }

    pub fn max_degree(&self) -> usize {
        self.topology.max_degree()
    }

    pub fn position(&self, v: usize) -> Option<Point> {
        self.positions[v]
    }

    pub fn set_position(&mut self, v: usize, position: Point) {
        self.positions[v] = Some(position);
    }

    pub fn edge(&self, edge: usize) -> &Edge {
        &self.edges[edge]
    }

    pub fn edge_mut(&mut self, edge: usize) -> &mut Edge {
        &mut self.edges[edge]
    }

    /// Mutable access to all edges at once, for routing them independently.
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn edge_between(&self, u: usize, v: usize) -> Option<usize> {
        self.arc_table.get(&(u, v)).map(|&arc| arc >> 1)
    }

    /// The id of the arc `(start, end)`, if that edge exists.
    pub fn arc_id(&self, start: usize, end: usize) -> Option<usize> {
        self.arc_table.get(&(start, end)).copied()
    }

    /// The edge owning the given arc.
    pub fn edge_of_arc(arc: usize) -> usize {
        arc >> 1
    }

    pub fn arc(&self, arc: usize) -> &Arc {
        &self.edges[arc >> 1].arcs[arc & 1]
    }

    pub fn arc_mut(&mut self, arc: usize) -> &mut Arc {
        &mut self.edges[arc >> 1].arcs[arc & 1]
    }

    pub fn arc_between(&self, start: usize, end: usize) -> Option<&Arc> {
        self.arc_id(start, end).map(|arc| self.arc(arc))
    }

    pub fn arc_between_mut(&mut self, start: usize, end: usize) -> Option<&mut Arc> {
        let arc = self.arc_id(start, end)?;
        Some(self.arc_mut(arc))
    }
}

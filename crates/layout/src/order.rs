//! Balanced linear ordering of the vertices.
//!
//! The drawing uses one linear order of all vertices as the vertex ranking
//! along each of the three axes. The order is computed by iterative local
//! repair: a worklist of edges is processed until no edge admits a move
//! that reduces the imbalance between the neighbors a vertex sees before
//! and after itself. Each move removes one or two vertices from the order
//! and reinserts them next to a reference vertex, so the sum of imbalances
//! decreases monotonically and the repair terminates.

use std::collections::VecDeque;
use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use log::info;

use orthodraw_store::prelude::*;

/// How the worklist is refilled after a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requeue {
    /// Re-enqueue every edge incident to a neighbor of one of the moved
    /// vertices.
    #[default]
    NeighborEdges,
    /// Re-enqueue the processed edge itself, once per affected edge that
    /// is not already queued.
    ProcessedEdge,
}

#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderingConfig {
    pub requeue: Requeue,
}

/// The type of a vertex at the current order: how many of its neighbors
/// rank after it and how many rank before it.
pub fn vertex_type(v: usize, ordered: &[usize]) -> (usize, usize) {
    let pos = position_in(ordered, v);
    (ordered.len() - 1 - pos, pos)
}

pub(crate) fn rank_of(order: &[usize], vertex_count: usize) -> Vec<usize> {
    let mut rank = vec![0; vertex_count];
    for (i, &v) in order.iter().enumerate() {
        rank[v] = i;
    }
    rank
}

/// The neighbors of `v` plus `v` itself, sorted by rank.
pub(crate) fn ordered_neighbors(graph: &DrawingGraph, rank: &[usize], v: usize) -> Vec<usize> {
    let mut list = graph.neighbors(v).to_vec();
    list.push(v);
    list.sort_by_key(|&x| rank[x]);
    list
}

pub(crate) fn position_in(ordered: &[usize], v: usize) -> usize {
    ordered.iter().position(|&x| x == v).unwrap_or(ordered.len())
}

fn excess(ty: (usize, usize)) -> isize {
    ty.0 as isize - ty.1 as isize
}

/// `k = ⌊|succ − pred| / 2⌋`, the move-distance bound of a vertex.
fn half_excess(ty: (usize, usize)) -> usize {
    (excess(ty).unsigned_abs()) / 2
}

/// `w` ranks after `v`, `v` leans right and `w` leans left.
fn opposite(v: usize, w: usize, tv: (usize, usize), tw: (usize, usize), rank: &[usize]) -> bool {
    rank[w] > rank[v] && excess(tv) > 0 && excess(tw) < 0
}

/// How many places `w` sits to the right of `v` in `v`'s ordered list.
fn succ_index(v: usize, w: usize, ordered: &[usize]) -> Option<usize> {
    let delta = position_in(ordered, w) as isize - position_in(ordered, v) as isize;
    (delta > 0).then(|| delta as usize)
}

/// How many places `w` sits to the left of `v` in `v`'s ordered list.
fn pred_index(v: usize, w: usize, ordered: &[usize]) -> Option<usize> {
    let delta = position_in(ordered, v) as isize - position_in(ordered, w) as isize;
    (delta > 0).then(|| delta as usize)
}

struct Order {
    seq: Vec<usize>,
    rank: Vec<usize>,
}

impl Order {
    fn new(seq: Vec<usize>, vertex_count: usize) -> Self {
        let rank = rank_of(&seq, vertex_count);
        Self { seq, rank }
    }

    fn ranks(&self) -> &[usize] {
        &self.rank
    }

    fn rank(&self, v: usize) -> usize {
        self.rank[v]
    }

    fn reindex(&mut self) {
        for (i, &v) in self.seq.iter().enumerate() {
            self.rank[v] = i;
        }
    }

    fn move_after(&mut self, v: usize, w: usize) {
        self.seq.retain(|&x| x != v);
        let at = position_in(&self.seq, w) + 1;
        self.seq.insert(at, v);
        self.reindex();
    }

    fn move_before(&mut self, v: usize, w: usize) {
        self.seq.retain(|&x| x != v);
        let at = position_in(&self.seq, w);
        self.seq.insert(at, v);
        self.reindex();
    }

    fn slide_after(&mut self, v: usize, distance: usize) {
        let target = self.seq[self.rank(v) + distance];
        self.move_after(v, target);
    }

    fn slide_before(&mut self, v: usize, distance: usize) {
        let target = self.seq[self.rank(v) - distance];
        self.move_before(v, target);
    }
}

/// Computes the balanced ordering starting from insertion order.
pub fn balanced_order(graph: &DrawingGraph, config: OrderingConfig) -> Vec<usize> {
    refine_order(graph, graph.vertices().collect(), config)
}

/// Refines an arbitrary starting order until no edge admits a move.
///
/// A fixed point of the repair: refining the returned order again yields
/// the same order.
pub fn refine_order(graph: &DrawingGraph, initial: Vec<usize>, config: OrderingConfig) -> Vec<usize> {
    let start = Instant::now();
    let max_degree = graph.max_degree();
    let mut order = Order::new(initial, graph.vertex_count());

    let mut check: VecDeque<usize> = graph.edge_ids().collect();
    let mut queued: AHashMap<usize, usize> = check.iter().map(|&e| (e, 1)).collect();
    let mut moves = 0_usize;

    while let Some(&edge) = check.front() {
        let (v, w) = graph.edge(edge).endpoints();

        if try_moves(graph, &mut order, v, w, max_degree) {
            moves += 1;
            let mut seen = AHashSet::new();
            for &x in graph.neighbors(v).iter().chain(graph.neighbors(w)) {
                if !seen.insert(x) {
                    continue;
                }
                for &y in graph.neighbors(x) {
                    let Some(affected) = graph.edge_between(x, y) else {
                        continue;
                    };
                    if queued.get(&affected).copied().unwrap_or(0) > 0 {
                        continue;
                    }
                    let requeued = match config.requeue {
                        Requeue::NeighborEdges => affected,
                        Requeue::ProcessedEdge => edge,
                    };
                    *queued.entry(requeued).or_insert(0) += 1;
                    check.push_back(requeued);
                }
            }
        } else {
            check.pop_front();
            if let Some(count) = queued.get_mut(&edge) {
                *count -= 1;
            }
        }
    }

    info!(
        "Balanced ordering converged after {} moves in {:?}",
        moves,
        start.elapsed()
    );

    order.seq
}

/// Attempts the first applicable move for the edge `{v, w}`; the guard of
/// the first matching case decides, even if its search then comes up empty.
fn try_moves(
    graph: &DrawingGraph,
    order: &mut Order,
    v: usize,
    w: usize,
    max_degree: usize,
) -> bool {
    let ov = ordered_neighbors(graph, order.ranks(), v);
    let ow = ordered_neighbors(graph, order.ranks(), w);
    let tv = vertex_type(v, &ov);
    let tw = vertex_type(w, &ow);
    let v_in_v = position_in(&ov, v);
    let w_in_v = position_in(&ov, w);
    let w_in_w = position_in(&ow, w);
    let v_in_w = position_in(&ow, v);
    let kv = half_excess(tv);
    let kw = half_excess(tw);

    if opposite(v, w, tv, tw, order.ranks())
        && succ_index(v, w, &ov).map_or(false, |i| (1..=kv).contains(&i))
    {
        order.move_after(v, w);
        return true;
    }

    if opposite(w, v, tw, tv, order.ranks())
        && pred_index(v, w, &ov).map_or(false, |i| (1..=kw).contains(&i))
    {
        order.move_before(v, w);
        return true;
    }

    if opposite(v, w, tv, tw, order.ranks()) && w_in_v > v_in_v + 2 {
        for &vi in &ov[v_in_v..w_in_v] {
            for &wj in &ow[..w_in_w] {
                if !(order.rank(v) < order.rank(wj) && order.rank(wj) < order.rank(vi)) {
                    continue;
                }
                let (Some(i), Some(j)) = (succ_index(v, vi, &ov), pred_index(w, wj, &ow)) else {
                    continue;
                };
                if (1..=kv).contains(&i) && (1..=kw).contains(&j) {
                    order.move_before(v, vi);
                    order.move_after(w, wj);
                    return true;
                }
            }
        }
        return false;
    }

    if opposite(w, v, tw, tv, order.ranks()) && v_in_w > w_in_w + 2 {
        for &wj in &ow[w_in_w..v_in_w] {
            for &vi in &ov[..v_in_v] {
                if !(order.rank(w) < order.rank(vi) && order.rank(vi) < order.rank(wj)) {
                    continue;
                }
                let (Some(i), Some(j)) = (pred_index(v, vi, &ov), succ_index(w, wj, &ow)) else {
                    continue;
                };
                if (1..=kv).contains(&i) && (1..=kw).contains(&j) {
                    order.move_before(w, wj);
                    order.move_after(v, vi);
                    return true;
                }
            }
        }
        return false;
    }

    if opposite(v, w, tv, tw, order.ranks()) && w_in_v > v_in_v + 1 {
        for &vi in &ov[v_in_v + 1..w_in_v] {
            if !ow.contains(&vi) {
                continue;
            }
            let (Some(i), Some(j)) = (succ_index(v, vi, &ov), pred_index(w, vi, &ow)) else {
                continue;
            };
            if (1..=kv.saturating_sub(1)).contains(&i) && (1..=kw.saturating_sub(1)).contains(&j) {
                order.move_after(v, vi);
                order.move_before(w, vi);
                return true;
            }
        }
        return false;
    }

    if opposite(w, v, tw, tv, order.ranks()) && v_in_w > w_in_w + 1 {
        for &wj in &ow[w_in_w + 1..v_in_w] {
            if !ov.contains(&wj) {
                continue;
            }
            let (Some(j), Some(i)) = (succ_index(w, wj, &ow), pred_index(v, wj, &ov)) else {
                continue;
            };
            if (1..=kv.saturating_sub(1)).contains(&i) && (1..=kw.saturating_sub(1)).contains(&j) {
                order.move_after(w, wj);
                order.move_before(v, wj);
                return true;
            }
        }
        return false;
    }

    if ov.len() - 1 == max_degree {
        return try_slide(graph, order, v, &ov, tv, v_in_v);
    }

    if ow.len() - 1 == max_degree {
        return try_slide(graph, order, w, &ow, tw, w_in_w);
    }

    false
}

/// The slide move for a vertex of maximum degree: if none of the nearest
/// neighbors in the excess direction is balanced, move past half of them.
fn try_slide(
    graph: &DrawingGraph,
    order: &mut Order,
    v: usize,
    ov: &[usize],
    tv: (usize, usize),
    v_in_v: usize,
) -> bool {
    let exc = excess(tv);
    let k = half_excess(tv);
    if exc == 0 || k == 0 {
        return false;
    }

    for i in 1..=k {
        let vi = if exc > 0 {
            ov[v_in_v + i]
        } else {
            ov[v_in_v - i]
        };
        let ovi = ordered_neighbors(graph, order.ranks(), vi);
        if excess(vertex_type(vi, &ovi)) == 0 {
            return false;
        }
    }

    if exc > 0 {
        order.slide_after(v, k);
    } else {
        order.slide_before(v, k);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(edges: Vec<(usize, usize)>) -> Vec<usize> {
        let graph = GraphBuilder::new().edges(edges).build();
        balanced_order(&graph, OrderingConfig::default())
    }

    #[test]
    fn path_keeps_insertion_order() {
        assert_eq!(order_of(vec![(0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn triangle_keeps_insertion_order() {
        assert_eq!(order_of(vec![(0, 1), (0, 2), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn six_cycle_keeps_cyclic_order() {
        let edges = vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)];
        assert_eq!(order_of(edges), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn star_center_slides_to_the_middle() {
        let edges = (1..=6).map(|leaf| (0, leaf)).collect::<Vec<_>>();
        assert_eq!(order_of(edges), vec![1, 2, 3, 0, 4, 5, 6]);
    }

    #[test]
    fn result_is_a_fixed_point() {
        for edges in [
            (1..=6).map(|leaf| (0, leaf)).collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)],
            vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)],
        ] {
            let graph = GraphBuilder::new().edges(edges).build();
            let order = balanced_order(&graph, OrderingConfig::default());
            let refined = refine_order(&graph, order.clone(), OrderingConfig::default());
            assert_eq!(refined, order);
        }
    }

    #[test]
    fn requeue_variants_agree_on_the_star() {
        let edges = (1..=6).map(|leaf| (0, leaf)).collect::<Vec<_>>();
        let graph = GraphBuilder::new().edges(edges).build();

        let neighbors = balanced_order(
            &graph,
            OrderingConfig {
                requeue: Requeue::NeighborEdges,
            },
        );
        let processed = balanced_order(
            &graph,
            OrderingConfig {
                requeue: Requeue::ProcessedEdge,
            },
        );
        assert_eq!(neighbors, processed);
    }

    #[test]
    fn types_reflect_the_order() {
        let graph = GraphBuilder::new().edges(vec![(0, 1), (1, 2)]).build();
        let order = balanced_order(&graph, OrderingConfig::default());
        let rank = rank_of(&order, graph.vertex_count());

        let ordered = ordered_neighbors(&graph, &rank, 1);
        assert_eq!(ordered, vec![0, 1, 2]);
        assert_eq!(vertex_type(1, &ordered), (1, 1));
        assert_eq!(vertex_type(0, &ordered_neighbors(&graph, &rank, 0)), (1, 0));
    }
}

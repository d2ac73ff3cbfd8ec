//! Three-coloring of graphs with maximum degree three.
//!
//! Brooks' theorem guarantees a 3-coloring for every connected graph of
//! maximum degree three that is not the complete graph on four vertices.
//! The constructive argument used here follows Lovász: find two
//! non-adjacent vertices `a`, `b` with a common neighbor `x` whose removal
//! keeps the graph connected, give `a` and `b` the same color, and color
//! the rest against a traversal order rooted at `x`. Every vertex then sees
//! at most two distinct colors among its already-colored neighbors when it
//! is its turn, and `x` sees the duplicated color on `a` and `b` last.
//!
//! Graphs that do not submit to the main argument are decomposed instead:
//! per connected component, or at a cut vertex with a color rotation to
//! reconcile the pieces.

use std::collections::VecDeque;

use bitvec::prelude::*;

use orthodraw_store::prelude::*;

use crate::Error;

/// Colors every present vertex of `graph` with one of three colors such
/// that no edge is monochromatic.
///
/// Fails if some subproblem contains a complete graph on four vertices or
/// a vertex runs out of colors, which indicates an unsupported input.
pub fn three_color(graph: &AdjacencyGraph) -> Result<Vec<Option<usize>>, Error> {
    let mut colors = vec![None; graph.vertex_bound()];
    color_view(&Subgraph::new(graph), &mut colors)?;
    Ok(colors)
}

fn color_view(view: &Subgraph<'_>, colors: &mut [Option<usize>]) -> Result<(), Error> {
    if view.vertex_count() == 0 {
        return Ok(());
    }

    let max_degree = view.max_degree();
    if max_degree < 3 {
        return color_greedily(view, colors);
    }

    reject_clique(view, max_degree)?;

    if !view.is_connected() {
        for mask in view.components() {
            color_view(&view.with_mask(mask), colors)?;
        }
        return Ok(());
    }

    if let Some((a, x, b)) = anchor_pair(view) {
        return color_rooted(view, a, x, b, colors);
    }

    if view.is_biconnected() {
        if let Some((a, x, b)) = anchor_pair_biconnected(view) {
            return color_rooted(view, a, x, b, colors);
        }
        let node = view.first().unwrap_or(0);
        return Err(Error::Uncolorable { node });
    }

    color_at_cut_vertex(view, colors)
}

/// Sequential coloring for views of maximum degree at most two; every
/// vertex has a free color no matter the order.
fn color_greedily(view: &Subgraph<'_>, colors: &mut [Option<usize>]) -> Result<(), Error> {
    let mut vertices = view.vertices();
    if let Some(first) = vertices.next() {
        colors[first] = Some(0);
    }
    for v in vertices {
        colors[v] = Some(free_color(view.neighbors(v), colors).ok_or(Error::Uncolorable { node: v })?);
    }
    Ok(())
}

/// A complete subgraph on `max_degree + 1` vertices cannot be colored with
/// `max_degree` colors.
fn reject_clique(view: &Subgraph<'_>, max_degree: usize) -> Result<(), Error> {
    for v in view.vertices() {
        if view.degree(v) != max_degree {
            continue;
        }
        let neighbors: Vec<usize> = view.neighbors(v).collect();
        let clique = neighbors
            .iter()
            .enumerate()
            .all(|(i, &u)| neighbors[i + 1..].iter().all(|&w| view.has_edge(u, w)));
        if clique {
            return Err(Error::ForbiddenClique {
                size: max_degree + 1,
            });
        }
    }
    Ok(())
}

/// Two non-adjacent vertices with a common neighbor whose joint removal
/// keeps the view connected, returned as `(a, x, b)` with `x` the common
/// neighbor.
fn anchor_pair(view: &Subgraph<'_>) -> Option<(usize, usize, usize)> {
    for a in view.vertices() {
        for x in view.neighbors(a) {
            for b in view.neighbors(x) {
                if b == a || view.has_edge(a, b) {
                    continue;
                }
                if view.without(a).without(b).is_connected() {
                    return Some((a, x, b));
                }
            }
        }
    }
    None
}

/// Fallback for biconnected views where no pair passes the connectivity
/// test directly: start from a minimum-degree vertex whose removal keeps
/// the view biconnected, or pick the pair inside such a vertex's
/// neighborhood.
fn anchor_pair_biconnected(view: &Subgraph<'_>) -> Option<(usize, usize, usize)> {
    for v in view.vertices() {
        if view.degree(v) != 3 || view.vertex_count() <= 3 {
            continue;
        }
        if view.without(v).is_biconnected() {
            for x in view.neighbors(v) {
                for b in view.neighbors(x) {
                    if b != v && !view.has_edge(v, b) {
                        return Some((v, x, b));
                    }
                }
            }
        } else {
            let x = v;
            let neighbors: Vec<usize> = view.neighbors(x).collect();
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if !view.has_edge(a, b) && view.without(a).without(b).is_connected() {
                        return Some((a, x, b));
                    }
                }
            }
        }
    }
    None
}

/// Colors `a` and `b` alike, orders the remaining vertices by a traversal
/// from `x`, and colors them in reverse traversal order.
fn color_rooted(
    view: &Subgraph<'_>,
    a: usize,
    x: usize,
    b: usize,
    colors: &mut [Option<usize>],
) -> Result<(), Error> {
    colors[a] = Some(0);
    colors[b] = Some(0);

    let rest = view.without(a).without(b);
    let mut order = Vec::with_capacity(rest.vertex_count());
    let mut visited = BitVec::<usize>::repeat(false, view.vertex_bound());
    let mut queue = VecDeque::from_iter([x]);
    visited.set(x, true);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        for w in rest.neighbors(v) {
            if !visited.replace(w, true) {
                queue.push_back(w);
            }
        }
    }

    if order.len() != rest.vertex_count() {
        return Err(Error::OrderingIncomplete {
            remaining: rest.vertex_count() - order.len(),
        });
    }

    for &v in order.iter().rev() {
        colors[v] =
            Some(free_color(view.neighbors(v), colors).ok_or(Error::Uncolorable { node: v })?);
    }

    Ok(())
}

/// Splits the view at a cut vertex, colors each piece recursively, and
/// rotates the colors of the last piece if the cut vertex ends up blocked.
fn color_at_cut_vertex(view: &Subgraph<'_>, colors: &mut [Option<usize>]) -> Result<(), Error> {
    let cut = view
        .vertices()
        .find(|&a| !view.without(a).is_connected())
        .ok_or_else(|| Error::Uncolorable {
            node: view.first().unwrap_or(0),
        })?;

    let rest = view.without(cut);
    let components = rest.components();
    for mask in &components {
        color_view(&view.with_mask(mask.clone()), colors)?;
    }

    if free_color(view.neighbors(cut), colors).is_none() {
        if let Some(last) = components.last() {
            for v in last.iter_ones() {
                colors[v] = colors[v].map(|c| (c + 1) % 3);
            }
        }
    }

    colors[cut] = Some(
        free_color(view.neighbors(cut), colors).ok_or(Error::Uncolorable { node: cut })?,
    );

    Ok(())
}

/// The largest of the three colors not used by any colored neighbor.
pub(crate) fn free_color<I>(neighbors: I, colors: &[Option<usize>]) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut used = [false; 3];
    for w in neighbors {
        if let Some(c) = colors[w] {
            used[c] = true;
        }
    }
    (0..3).rev().find(|&c| !used[c])
}

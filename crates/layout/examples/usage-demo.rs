use log::info;

use orthodraw::prelude::*;

type AppResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> AppResult {
    // Prepare logging so the stage timings show up.
    env_logger::init();

    // Build a small graph; the builder infers the vertex count from the
    // edge list. Drawings support any simple graph of maximum degree six.
    let mut graph: DrawingGraph = GraphBuilder::new()
        .edges(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)])
        .build();

    // Compute the drawing in place: lattice positions for the vertices,
    // (axis, direction) ports for the arcs, and a crossing-free
    // axis-aligned route for every edge.
    draw(&mut graph)?;

    for v in graph.vertices() {
        info!("vertex {v} at {:?}", graph.position(v).unwrap());
    }
    for e in graph.edge_ids() {
        let edge = graph.edge(e);
        let (u, v) = edge.endpoints();
        info!("edge ({u}, {v}) routed as {:?}", edge.route.as_ref().unwrap());
    }

    Ok(())
}

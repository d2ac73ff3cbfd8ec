use orthodraw::prelude::*;

fn drawn(edges: Vec<(usize, usize)>) -> DrawingGraph {
    let mut graph = GraphBuilder::new().edges(edges).build();
    draw(&mut graph).unwrap();
    graph
}

/// No two arcs at a vertex leave through the same (axis, direction) port.
fn assert_distinct_ports(graph: &DrawingGraph) {
    for v in graph.vertices() {
        let ports: Vec<Port> = graph
            .neighbors(v)
            .iter()
            .map(|&w| {
                graph
                    .arc_between(v, w)
                    .and_then(|arc| arc.port())
                    .unwrap_or_else(|| panic!("arc ({v}, {w}) has no port"))
            })
            .collect();
        for (i, a) in ports.iter().enumerate() {
            assert!(a.axis < 3);
            assert!(a.sign == -1 || a.sign == 1);
            for b in &ports[i + 1..] {
                assert_ne!(a, b, "vertex {v} uses one port twice");
            }
        }
    }
}

/// Every route connects its endpoint positions through unit-axis steps.
fn assert_valid_routes(graph: &DrawingGraph) {
    for e in graph.edge_ids() {
        let edge = graph.edge(e);
        let route = edge.route.as_ref().expect("every edge is routed");
        assert!((4..=6).contains(&route.len()));
        assert_eq!(route.first(), graph.position(edge.arcs[0].start).as_ref());
        assert_eq!(route.last(), graph.position(edge.arcs[0].end).as_ref());
        for pair in route.windows(2) {
            let changed = (0..3).filter(|&c| pair[0][c] != pair[1][c]).count();
            assert_eq!(changed, 1, "route step {pair:?} must change one axis");
        }
    }
}

/// No segments of distinct edges cross; edge pairs with a common endpoint
/// are judged by the classifier, disjoint pairs segment by segment.
fn assert_no_crossings(graph: &DrawingGraph) {
    for e in graph.edge_ids() {
        for f in graph.edge_ids() {
            if e == f {
                continue;
            }
            let (first, second) = (graph.edge(e), graph.edge(f));
            let adjacent = {
                let (a, b) = first.endpoints();
                let (c, d) = second.endpoints();
                a == c || a == d || b == c || b == d
            };
            if adjacent {
                assert_eq!(
                    cross_check(first, second),
                    None,
                    "edges {e} and {f} still collide"
                );
            } else {
                let r1 = first.route.as_ref().unwrap();
                let r2 = second.route.as_ref().unwrap();
                for s1 in r1.windows(2) {
                    for s2 in r2.windows(2) {
                        assert!(
                            !segment_cross((s1[0], s1[1]), (s2[0], s2[1])),
                            "edges {e} and {f} cross at {s1:?} / {s2:?}"
                        );
                    }
                }
            }
        }
    }
}

fn assert_drawing(graph: &DrawingGraph) {
    assert_distinct_ports(graph);
    assert_valid_routes(graph);
    assert_no_crossings(graph);
}

#[test]
fn draws_a_path() {
    let graph = drawn(vec![(0, 1), (1, 2)]);

    // the ordering keeps the path order, so the vertices sit on the diagonal
    assert_eq!(graph.position(0), Some([3, 3, 3]));
    assert_eq!(graph.position(1), Some([6, 6, 6]));
    assert_eq!(graph.position(2), Some([9, 9, 9]));

    // the middle vertex sees one neighbor on each side
    let a1 = graph.arc_between(1, 0).unwrap();
    let a2 = graph.arc_between(1, 2).unwrap();
    assert_eq!(a1.orientation, Some(-1));
    assert_eq!(a2.orientation, Some(1));

    assert_drawing(&graph);
}

#[test]
fn draws_a_triangle() {
    let graph = drawn(vec![(0, 1), (0, 2), (1, 2)]);

    for v in graph.vertices() {
        assert_eq!(graph.position(v), Some([3 * (v as i32 + 1); 3]));
    }
    for e in graph.edge_ids() {
        assert_eq!(graph.edge(e).route.as_ref().unwrap().len(), 4);
    }

    assert_drawing(&graph);
}

#[test]
fn draws_the_diamond() {
    // K4 minus one edge
    let graph = drawn(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    assert_drawing(&graph);
}

#[test]
fn draws_a_six_cycle() {
    let graph = drawn(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);

    // the cyclic order survives balancing
    for v in graph.vertices() {
        assert_eq!(graph.position(v), Some([3 * (v as i32 + 1); 3]));
    }
    for e in graph.edge_ids() {
        assert_eq!(graph.edge(e).route.as_ref().unwrap().len(), 4);
    }

    assert_drawing(&graph);
}

#[test]
fn draws_a_six_star() {
    let graph = drawn((1..=6).map(|leaf| (0, leaf)).collect());

    // the center is pulled into the middle of the order and balances out
    assert_eq!(graph.position(0), Some([12, 12, 12]));

    assert_drawing(&graph);
}

#[test]
fn drawing_is_deterministic() {
    let edges = vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)];
    let first = drawn(edges.clone());
    let second = drawn(edges);

    for v in first.vertices() {
        assert_eq!(first.position(v), second.position(v));
    }
    for e in first.edge_ids() {
        assert_eq!(first.edge(e).route, second.edge(e).route);
        for side in 0..2 {
            let a = &first.edge(e).arcs[side];
            let b = &second.edge(e).arcs[side];
            assert_eq!((a.color, a.orientation), (b.color, b.orientation));
        }
    }
}

#[test]
fn ordering_is_stable_on_the_result() {
    let graph = GraphBuilder::new()
        .edges(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)])
        .build();
    let order = balanced_order(&graph, OrderingConfig::default());
    let refined = refine_order(&graph, order.clone(), OrderingConfig::default());
    assert_eq!(order, refined);
}

#[test]
fn crossing_removal_recovers_from_a_port_swap() {
    let mut graph = drawn(vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);

    // disturb the drawing: exchange the ports of two arcs at vertex 1 and
    // re-route their edges
    let swap = |graph: &mut DrawingGraph, u: usize, w: usize| {
        let first = graph.arc_between(1, u).unwrap().clone();
        let second = graph.arc_between(1, w).unwrap().clone();
        {
            let arc = graph.arc_between_mut(1, u).unwrap();
            arc.color = second.color;
            arc.orientation = second.orientation;
        }
        {
            let arc = graph.arc_between_mut(1, w).unwrap();
            arc.color = first.color;
            arc.orientation = first.orientation;
        }
    };
    swap(&mut graph, 0, 3);
    route_edges(&mut graph).unwrap();

    remove_crossings(&mut graph).unwrap();

    assert_distinct_ports(&graph);
    assert_no_crossings(&graph);
}

#[test]
fn rejects_high_degree_vertices() {
    let mut graph = GraphBuilder::new()
        .edges((1..=7).map(|leaf| (0, leaf)))
        .build();

    assert_eq!(
        draw(&mut graph).unwrap_err(),
        Error::DegreeTooLarge {
            vertex: 0,
            degree: 7
        }
    );
}

#[test]
fn draws_isolated_vertices() {
    let mut graph = GraphBuilder::new()
        .edges(vec![(0, 1)])
        .node_count(3)
        .build();
    draw(&mut graph).unwrap();

    assert!(graph.position(2).is_some());
    assert_drawing(&graph);
}

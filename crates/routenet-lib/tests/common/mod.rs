//! Common test utilities and fixture networks.

#![allow(dead_code)]

use routenet_lib::{
    BuildOptions, EdgeId, EdgeInput, GraphBuilder, NodeId, NodeInput, Point, RouteNetwork,
};
use uuid::Uuid;

/// Deterministic node id for fixtures.
pub fn node(n: u128) -> NodeId {
    NodeId::from(Uuid::from_u128(n))
}

/// Deterministic edge id for fixtures. Offset so edge ids never collide
/// with node ids built from the same number.
pub fn edge(n: u128) -> EdgeId {
    EdgeId::from(Uuid::from_u128((1u128 << 64) + n))
}

pub fn straight(id: u128, from: (f64, f64), to: (f64, f64)) -> EdgeInput {
    EdgeInput::straight(edge(id), Point::new(from.0, from.1), Point::new(to.0, to.1))
}

/// Build a network from explicit nodes `(id, x, y)` and straight edges
/// `(id, from, to, length)`.
pub fn network(
    nodes: &[(u128, f64, f64)],
    edges: &[(u128, (f64, f64), (f64, f64), f64)],
) -> RouteNetwork {
    let mut builder = GraphBuilder::new(BuildOptions::default());
    for &(id, x, y) in nodes {
        builder
            .add_node(NodeInput::new(node(id), x, y))
            .expect("fixture node");
    }
    for &(id, from, to, length) in edges {
        builder
            .add_edge(straight(id, from, to).with_length(length))
            .expect("fixture edge");
    }
    builder.finalize()
}

/// A(0,0) -e1- B(10,0) -e2- C(20,0).
pub fn chain_abc() -> RouteNetwork {
    network(
        &[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 20.0, 0.0)],
        &[
            (1, (0.0, 0.0), (10.0, 0.0), 10.0),
            (2, (10.0, 0.0), (20.0, 0.0), 10.0),
        ],
    )
}

/// Linear A-B-C-D with unit lengths; nodes 1..=4, edges 1..=3.
pub fn linear_abcd() -> RouteNetwork {
    network(
        &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 2.0, 0.0), (4, 3.0, 0.0)],
        &[
            (1, (0.0, 0.0), (1.0, 0.0), 1.0),
            (2, (1.0, 0.0), (2.0, 0.0), 1.0),
            (3, (2.0, 0.0), (3.0, 0.0), 1.0),
        ],
    )
}

/// Three edges meeting at node 1 with distinct far ends ("Y" shape).
pub fn y_shape() -> RouteNetwork {
    network(
        &[(1, 0.0, 0.0), (2, 0.0, 10.0), (3, -10.0, -10.0), (4, 10.0, -10.0)],
        &[
            (1, (0.0, 0.0), (0.0, 10.0), 10.0),
            (2, (0.0, 0.0), (-10.0, -10.0), 14.0),
            (3, (0.0, 0.0), (10.0, -10.0), 14.0),
        ],
    )
}

/// Closed triangle of three edges.
pub fn triangle() -> RouteNetwork {
    network(
        &[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 5.0, 8.0)],
        &[
            (1, (0.0, 0.0), (10.0, 0.0), 10.0),
            (2, (10.0, 0.0), (5.0, 8.0), 9.4),
            (3, (5.0, 8.0), (0.0, 0.0), 9.4),
        ],
    )
}

/// Five-edge chain whose edges alternate digitizing direction.
/// Nodes 1..=6 at x = 0, 10, ..., 50; edges 1..=5.
pub fn zigzag_chain() -> RouteNetwork {
    let nodes: Vec<(u128, f64, f64)> = (1..=6).map(|n| (n, (n as f64 - 1.0) * 10.0, 0.0)).collect();
    let edges: Vec<(u128, (f64, f64), (f64, f64), f64)> = (1..=5)
        .map(|n| {
            let left = ((n as f64 - 1.0) * 10.0, 0.0);
            let right = (n as f64 * 10.0, 0.0);
            if n % 2 == 0 {
                (n, right, left, 10.0)
            } else {
                (n, left, right, 10.0)
            }
        })
        .collect();
    network(&nodes, &edges)
}

/// Square grid of `size x size` nodes with unit spacing and unit edge lengths.
pub fn grid(size: u128) -> RouteNetwork {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut next_edge = 1;
    for row in 0..size {
        for col in 0..size {
            let id = row * size + col + 1;
            nodes.push((id, col as f64, row as f64));
            if col + 1 < size {
                edges.push((
                    next_edge,
                    (col as f64, row as f64),
                    (col as f64 + 1.0, row as f64),
                    1.0,
                ));
                next_edge += 1;
            }
            if row + 1 < size {
                edges.push((
                    next_edge,
                    (col as f64, row as f64),
                    (col as f64, row as f64 + 1.0),
                    1.0,
                ));
                next_edge += 1;
            }
        }
    }
    network(&nodes, &edges)
}

/// Every ordering of `items`.
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for index in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(index);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

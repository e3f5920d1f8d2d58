mod common;

use std::sync::Arc;
use std::thread;

use routenet_lib::{Error, NodeId, RouteNetwork};

use common::{edge, grid, linear_abcd, network, node};

/// Two routes from node 1 to node 4: a direct but long edge and a
/// three-edge detour that is shorter in total.
fn diamond() -> RouteNetwork {
    network(
        &[(1, 0.0, 0.0), (2, 1.0, 1.0), (3, 2.0, 1.0), (4, 3.0, 0.0)],
        &[
            (1, (0.0, 0.0), (3.0, 0.0), 10.0),
            (2, (0.0, 0.0), (1.0, 1.0), 2.0),
            (3, (1.0, 1.0), (2.0, 1.0), 2.0),
            (4, (2.0, 1.0), (3.0, 0.0), 2.0),
        ],
    )
}

#[test]
fn full_graph_path_follows_the_line() {
    let network = linear_abcd();
    let path = network.shortest_path(node(1), node(4)).unwrap();
    assert_eq!(path, vec![edge(1), edge(2), edge(3)]);
}

#[test]
fn path_is_undirected() {
    let network = linear_abcd();
    let path = network.shortest_path(node(4), node(1)).unwrap();
    assert_eq!(path, vec![edge(3), edge(2), edge(1)]);
}

#[test]
fn weighted_search_prefers_lower_total_length() {
    let network = diamond();
    let path = network.shortest_path(node(1), node(4)).unwrap();
    assert_eq!(path, vec![edge(2), edge(3), edge(4)]);
    assert_eq!(network.path_length(&path).unwrap(), 6.0);
}

#[test]
fn same_node_yields_empty_path() {
    let network = linear_abcd();
    assert!(network.shortest_path(node(2), node(2)).unwrap().is_empty());
}

#[test]
fn disconnected_nodes_yield_empty_path() {
    let network = network(
        &[(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 5.0, 0.0), (4, 6.0, 0.0)],
        &[
            (1, (0.0, 0.0), (1.0, 0.0), 1.0),
            (2, (5.0, 0.0), (6.0, 0.0), 1.0),
        ],
    );
    assert!(network.shortest_path(node(1), node(4)).unwrap().is_empty());
}

#[test]
fn unknown_node_is_an_error() {
    let network = linear_abcd();
    let missing = node(99);
    assert!(matches!(
        network.shortest_path(node(1), missing),
        Err(Error::UnknownNode { id }) if id == missing
    ));
    assert!(matches!(
        network.shortest_path(missing, node(1)),
        Err(Error::UnknownNode { .. })
    ));
}

#[test]
fn repeated_queries_reuse_the_search_graph() {
    let network = grid(6);
    let first = network.shortest_path(node(1), node(36)).unwrap();
    let second = network.shortest_path(node(1), node(36)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 10, "manhattan distance across a 6x6 grid");
}

#[test]
fn grid_paths_are_minimal() {
    let network = grid(5);
    for target in 1..=25u128 {
        let path = network.shortest_path(node(1), node(target)).unwrap();
        let row = (target - 1) / 5;
        let col = (target - 1) % 5;
        assert_eq!(path.len() as u128, row + col, "target {target}");
    }
}

#[test]
fn subset_excluding_destination_yields_empty_path() {
    let network = linear_abcd();
    let full = network.shortest_path(node(1), node(4)).unwrap();
    assert_eq!(full.len(), 3);

    let subset = [node(1), node(2), node(3)];
    let restricted = network
        .shortest_path_in_subset(node(1), node(4), &subset)
        .unwrap();
    assert!(restricted.is_empty());
}

#[test]
fn subset_hides_shorter_routes() {
    let network = diamond();
    let subset = [node(1), node(2), node(4)];
    let path = network
        .shortest_path_in_subset(node(1), node(4), &subset)
        .unwrap();
    assert_eq!(path, vec![edge(1)], "detour via node 3 is invisible");

    let all = [node(1), node(2), node(3), node(4)];
    let path = network
        .shortest_path_in_subset(node(1), node(4), &all)
        .unwrap();
    assert_eq!(path, vec![edge(2), edge(3), edge(4)]);
}

#[test]
fn subset_origin_must_be_member() {
    let network = linear_abcd();
    let subset = [node(2), node(3)];
    assert!(matches!(
        network.shortest_path_in_subset(node(1), node(3), &subset),
        Err(Error::UnknownNode { id }) if id == node(1)
    ));
}

#[test]
fn subset_with_unknown_member_is_rejected() {
    let network = linear_abcd();
    let subset = [node(1), node(2), node(42)];
    assert!(matches!(
        network.shortest_path_in_subset(node(1), node(2), &subset),
        Err(Error::UnknownNode { id }) if id == node(42)
    ));
}

#[test]
fn concurrent_queries_share_one_network() {
    let network = Arc::new(grid(8));
    let handles: Vec<_> = (0..4u128)
        .map(|offset| {
            let network = Arc::clone(&network);
            thread::spawn(move || {
                let goal: NodeId = node(64 - offset);
                network.shortest_path(node(1), goal).map(|p| p.len())
            })
        })
        .collect();

    let lengths: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().expect("thread completes").expect("path found"))
        .collect();
    assert_eq!(lengths, vec![14, 13, 12, 11]);
}

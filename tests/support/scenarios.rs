//! Small hand-built topologies

#![allow(dead_code)]

use qnet_reliability::topology::{Edge, Network, Node};
use qnet_reliability::Path;

/// `hops` quantum links of `distance` each, named n0..n{hops}
pub fn uniform_chain(hops: usize, distance: f64) -> (Network, Path) {
    let mut network = Network::new();
    let names: Vec<String> = (0..=hops).map(|i| format!("n{}", i)).collect();

    for name in &names {
        network.add_node(Node::quantum(name.as_str())).unwrap();
    }
    for pair in names.windows(2) {
        network
            .add_edge(Edge::new(pair[0].as_str(), pair[1].as_str(), distance))
            .unwrap();
    }

    let path = Path::new(names.iter().map(String::as_str)).unwrap();
    (network, path)
}

/// Three quantum hops of 20 units each
pub fn three_hop_chain() -> (Network, Path) {
    uniform_chain(3, 20.0)
}

/// A direct 40-unit link `s - t` next to a `s - m - t` detour of 25 + 25
///
/// Distance-only routing takes the direct link; the reliability-weighted
/// cost prefers the two shorter hops.
pub fn detour_network() -> Network {
    let mut network = Network::new();
    for name in ["s", "m", "t"] {
        network.add_node(Node::quantum(name)).unwrap();
    }
    network.add_edge(Edge::new("s", "t", 40.0)).unwrap();
    network.add_edge(Edge::new("s", "m", 25.0)).unwrap();
    network.add_edge(Edge::new("m", "t", 25.0)).unwrap();
    network
}

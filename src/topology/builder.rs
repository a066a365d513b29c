//! Reference topologies
//!
//! The fixed topology is a 12-node hybrid network (two quantum hubs with
//! quantum spurs, bridged to a classical mesh). The chain topology puts a
//! configurable number of quantum repeaters between a fixed source and
//! destination and is what the scalability sweep runs over.

use super::error::TopologyResult;
use super::network::Network;
use super::types::{Edge, Node};

/// Packet loss attached to every classical link of the fixed topology
pub const FIXED_CLASSICAL_PACKET_LOSS: f64 = 0.005;

pub const CHAIN_SOURCE: &str = "Source_Node";
pub const CHAIN_DESTINATION: &str = "Destination_Node";
/// Distance between two consecutive repeaters
pub const CHAIN_HOP_DISTANCE: f64 = 50.0;
/// Distance from source (or destination) to its nearest repeater
pub const CHAIN_SPUR_DISTANCE: f64 = 25.0;

const QUANTUM_NODES: [&str; 6] = [
    "Q_Node_1", "Q_Node_2", "Q_Hub_A", "Q_Hub_B", "Q_Node_3", "Q_Node_4",
];
const CLASSICAL_NODES: [&str; 6] = [
    "C_Node_A", "C_Node_B", "C_Node_C", "C_Node_D", "C_Node_E", "C_Node_F",
];

/// (a, b, distance)
const QUANTUM_LINKS: [(&str, &str, f64); 5] = [
    ("Q_Hub_A", "Q_Hub_B", 50.0),
    ("Q_Hub_A", "Q_Node_1", 20.0),
    ("Q_Hub_A", "Q_Node_2", 20.0),
    ("Q_Hub_B", "Q_Node_3", 30.0),
    ("Q_Hub_B", "Q_Node_4", 30.0),
];

/// (a, b, distance, latency)
const CLASSICAL_LINKS: [(&str, &str, f64, f64); 7] = [
    ("Q_Hub_A", "C_Node_A", 5.0, 2.0),
    ("Q_Hub_B", "C_Node_B", 5.0, 2.0),
    ("C_Node_A", "C_Node_C", 100.0, 10.0),
    ("C_Node_B", "C_Node_D", 100.0, 10.0),
    ("C_Node_C", "C_Node_D", 40.0, 4.0),
    ("C_Node_C", "C_Node_E", 40.0, 4.0),
    ("C_Node_D", "C_Node_F", 40.0, 4.0),
];

pub fn build_fixed_topology() -> TopologyResult<Network> {
    let mut network = Network::new();

    for name in QUANTUM_NODES {
        network.add_node(Node::quantum(name))?;
    }
    for name in CLASSICAL_NODES {
        network.add_node(Node::classical(name))?;
    }

    for (a, b, distance) in QUANTUM_LINKS {
        network.add_edge(Edge::new(a, b, distance))?;
    }
    for (a, b, distance, latency) in CLASSICAL_LINKS {
        network.add_edge(
            Edge::new(a, b, distance).with_classical(latency, FIXED_CLASSICAL_PACKET_LOSS),
        )?;
    }

    Ok(network)
}

/// Name of the `index`-th repeater in a chain topology
pub fn chain_hub_name(index: usize) -> String {
    format!("Q_Hub_{}", index)
}

/// Source, `hub_count` repeaters, destination, all quantum
///
/// With zero hubs source and destination are linked directly over
/// `2 * CHAIN_SPUR_DISTANCE`.
pub fn build_chain_topology(hub_count: usize) -> TopologyResult<Network> {
    let mut network = Network::new();

    for i in 0..hub_count {
        network.add_node(Node::quantum(chain_hub_name(i)))?;
        if i > 0 {
            network.add_edge(Edge::new(
                chain_hub_name(i - 1),
                chain_hub_name(i),
                CHAIN_HOP_DISTANCE,
            ))?;
        }
    }

    network.add_node(Node::quantum(CHAIN_SOURCE))?;
    network.add_node(Node::quantum(CHAIN_DESTINATION))?;

    if hub_count > 0 {
        network.add_edge(Edge::new(CHAIN_SOURCE, chain_hub_name(0), CHAIN_SPUR_DISTANCE))?;
        network.add_edge(Edge::new(
            chain_hub_name(hub_count - 1),
            CHAIN_DESTINATION,
            CHAIN_SPUR_DISTANCE,
        ))?;
    } else {
        network.add_edge(Edge::new(
            CHAIN_SOURCE,
            CHAIN_DESTINATION,
            2.0 * CHAIN_SPUR_DISTANCE,
        ))?;
    }

    Ok(network)
}

/// Total source-to-destination distance of a chain with `hub_count` repeaters
pub fn chain_distance(hub_count: usize) -> f64 {
    if hub_count == 0 {
        2.0 * CHAIN_SPUR_DISTANCE
    } else {
        2.0 * CHAIN_SPUR_DISTANCE + (hub_count - 1) as f64 * CHAIN_HOP_DISTANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{NodeKind, Path};

    #[test]
    fn test_fixed_topology_shape() {
        let network = build_fixed_topology().unwrap();

        assert_eq!(network.node_count(), 12);
        assert_eq!(network.edge_count(), 12);
        assert_eq!(network.node("Q_Hub_A").unwrap().kind, NodeKind::Quantum);
        assert_eq!(network.node("C_Node_E").unwrap().kind, NodeKind::Classical);

        let bridge = network.edge_between("C_Node_A", "Q_Hub_A").unwrap();
        assert_eq!(bridge.latency, Some(2.0));
        assert_eq!(bridge.packet_loss_probability, Some(FIXED_CLASSICAL_PACKET_LOSS));

        let quantum = network.edge_between("Q_Hub_B", "Q_Hub_A").unwrap();
        assert_eq!(quantum.distance, 50.0);
        assert!(quantum.latency.is_none());
    }

    #[test]
    fn test_chain_without_hubs() {
        let network = build_chain_topology(0).unwrap();

        assert_eq!(network.node_count(), 2);
        assert_eq!(
            network.edge_between(CHAIN_SOURCE, CHAIN_DESTINATION).unwrap().distance,
            50.0
        );
    }

    #[test]
    fn test_chain_with_hubs() {
        let network = build_chain_topology(3).unwrap();

        assert_eq!(network.node_count(), 5);
        assert_eq!(network.edge_count(), 4);

        let path = Path::new([
            CHAIN_SOURCE,
            "Q_Hub_0",
            "Q_Hub_1",
            "Q_Hub_2",
            CHAIN_DESTINATION,
        ])
        .unwrap();
        let distance = network.path_distance(&path).unwrap();
        assert!((distance - chain_distance(3)).abs() < 1e-9);
        assert!((distance - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_chain_distance_grows_with_hubs() {
        assert_eq!(chain_distance(0), 50.0);
        assert_eq!(chain_distance(1), 50.0);
        assert_eq!(chain_distance(2), 100.0);
        assert_eq!(chain_distance(10), 500.0);
    }
}

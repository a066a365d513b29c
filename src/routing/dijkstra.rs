//! Shortest paths over the derived edge weights
//!
//! Plain Dijkstra with a binary heap; all weights are positive. Ties are
//! broken deterministically: among frontier entries of equal cost the node
//! inserted into the network first is settled first, neighbours are relaxed
//! in edge insertion order, and a predecessor is only replaced by a strictly
//! cheaper one.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::cost::{edge_weight, path_cost, WeightKind};
use super::error::{RoutingError, RoutingResult};
use crate::metrics::record_route;
use crate::reliability::ReliabilityModel;
use crate::topology::{Network, Path, TopologyError};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    cost: f64,
    index: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: invert so the cheapest, earliest node pops first
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `source` to `destination` under `kind`
pub fn shortest_path(
    network: &Network,
    model: &ReliabilityModel,
    source: &str,
    destination: &str,
    kind: WeightKind,
) -> RoutingResult<Path> {
    model.validate()?;
    let src = network
        .node_index(source)
        .ok_or_else(|| TopologyError::UnknownNode(source.to_string()))?;
    let dst = network
        .node_index(destination)
        .ok_or_else(|| TopologyError::UnknownNode(destination.to_string()))?;
    if src == dst {
        return Err(TopologyError::InvalidPath(format!(
            "source and destination are both {}",
            source
        ))
        .into());
    }

    let n = network.node_count();
    let mut best = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    best[src] = 0.0;
    heap.push(Frontier {
        cost: 0.0,
        index: src,
    });

    while let Some(Frontier { cost, index }) = heap.pop() {
        if settled[index] {
            continue;
        }
        settled[index] = true;
        if index == dst {
            break;
        }

        let Some(node) = network.node_at(index) else {
            continue;
        };
        for (neighbour, edge) in network.neighbours(&node.name)? {
            let Some(j) = network.node_index(neighbour) else {
                continue;
            };
            if settled[j] {
                continue;
            }
            let candidate = cost + edge_weight(edge, model, kind);
            if candidate < best[j] {
                best[j] = candidate;
                prev[j] = Some(index);
                heap.push(Frontier {
                    cost: candidate,
                    index: j,
                });
            }
        }
    }

    if !best[dst].is_finite() {
        return Err(RoutingError::Disconnected {
            source_node: source.to_string(),
            destination: destination.to_string(),
        });
    }

    let mut names = Vec::new();
    let mut cursor = Some(dst);
    while let Some(index) = cursor {
        if let Some(node) = network.node_at(index) {
            names.push(node.name.clone());
        }
        cursor = prev[index];
    }
    names.reverse();

    tracing::debug!(
        "{} route {} -> {}: {} hops, cost {:.3}",
        kind,
        source,
        destination,
        names.len() - 1,
        best[dst]
    );
    record_route(kind.as_str(), names.len() - 1);

    Ok(Path::new(names)?)
}

/// Distance and both costs of one routed path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSummary {
    pub weight: WeightKind,
    pub path: Path,
    pub total_distance: f64,
    pub quantum_cost: f64,
    pub classical_cost: f64,
}

impl RouteSummary {
    fn for_path(
        network: &Network,
        model: &ReliabilityModel,
        weight: WeightKind,
        path: Path,
    ) -> RoutingResult<Self> {
        Ok(Self {
            weight,
            total_distance: network.path_distance(&path)?,
            quantum_cost: path_cost(network, &path, model, WeightKind::Quantum)?,
            classical_cost: path_cost(network, &path, model, WeightKind::Classical)?,
            path,
        })
    }
}

/// Quantum-aware route next to the distance-only fallback route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteComparison {
    pub quantum: RouteSummary,
    pub classical: RouteSummary,
}

impl RouteComparison {
    pub fn paths_differ(&self) -> bool {
        self.quantum.path != self.classical.path
    }
}

pub fn compare_routes(
    network: &Network,
    model: &ReliabilityModel,
    source: &str,
    destination: &str,
) -> RoutingResult<RouteComparison> {
    let quantum = shortest_path(network, model, source, destination, WeightKind::Quantum)?;
    let classical = shortest_path(network, model, source, destination, WeightKind::Classical)?;

    Ok(RouteComparison {
        quantum: RouteSummary::for_path(network, model, WeightKind::Quantum, quantum)?,
        classical: RouteSummary::for_path(network, model, WeightKind::Classical, classical)?,
    })
}

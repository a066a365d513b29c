use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::RoutingResult;
use crate::reliability::ReliabilityModel;
use crate::topology::{Edge, Network, Path, TopologyError};

/// Guard against dividing by a link success probability that underflowed to 0
pub const COST_EPSILON: f64 = 1e-9;

/// Which edge weight a route is optimised for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeightKind {
    /// `distance / (link_success + COST_EPSILON)`
    Quantum,
    /// Raw distance
    Classical,
}

impl WeightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightKind::Quantum => "quantum",
            WeightKind::Classical => "classical",
        }
    }
}

impl fmt::Display for WeightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightKind {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quantum" => Ok(WeightKind::Quantum),
            "classical" => Ok(WeightKind::Classical),
            other => Err(TopologyError::InvalidParameter(format!(
                "unknown weight kind '{}'",
                other
            ))),
        }
    }
}

/// Derived per-edge routing weights; never stored on the graph
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EdgeCosts {
    pub quantum_cost: f64,
    pub classical_cost: f64,
}

impl EdgeCosts {
    pub fn get(&self, kind: WeightKind) -> f64 {
        match kind {
            WeightKind::Quantum => self.quantum_cost,
            WeightKind::Classical => self.classical_cost,
        }
    }
}

pub fn edge_costs(edge: &Edge, model: &ReliabilityModel) -> EdgeCosts {
    let success = model.link_success_probability(edge.distance);
    EdgeCosts {
        quantum_cost: edge.distance / (success + COST_EPSILON),
        classical_cost: edge.distance,
    }
}

pub(crate) fn edge_weight(edge: &Edge, model: &ReliabilityModel, kind: WeightKind) -> f64 {
    edge_costs(edge, model).get(kind)
}

/// Total cost of `path` under `kind`
pub fn path_cost(
    network: &Network,
    path: &Path,
    model: &ReliabilityModel,
    kind: WeightKind,
) -> RoutingResult<f64> {
    let resolved = network.resolve(path)?;
    Ok(resolved
        .hops()
        .iter()
        .map(|edge| edge_weight(edge, model, kind))
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classical_cost_is_distance() {
        let edge = Edge::new("a", "b", 42.0);
        let costs = edge_costs(&edge, &ReliabilityModel::default());
        assert_eq!(costs.classical_cost, 42.0);
        assert_eq!(costs.get(WeightKind::Classical), 42.0);
    }

    #[test]
    fn test_quantum_cost_penalises_distance() {
        let model = ReliabilityModel::default();
        let short = edge_costs(&Edge::new("a", "b", 20.0), &model);
        let long = edge_costs(&Edge::new("a", "b", 50.0), &model);

        let expected = 20.0 / (0.95f64.powi(20) + COST_EPSILON);
        assert!((short.quantum_cost - expected).abs() < 1e-9);
        // 50 / 0.0769 vs 20 / 0.3585: reliability dominates
        assert!(long.quantum_cost / short.quantum_cost > 5.0);
    }

    #[test]
    fn test_quantum_cost_finite_when_success_underflows() {
        let model = ReliabilityModel::default().with_alpha(0.9).unwrap();
        let costs = edge_costs(&Edge::new("a", "b", 1.0e6), &model);

        assert!(costs.quantum_cost.is_finite());
        assert!((costs.quantum_cost - 1.0e6 / COST_EPSILON).abs() < 1.0);
    }

    #[test]
    fn test_weight_kind_parse() {
        assert_eq!("Quantum".parse::<WeightKind>().unwrap(), WeightKind::Quantum);
        assert!("latency".parse::<WeightKind>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{TopologyError, TopologyResult};

/// What a node is able to do when it sits in the middle of a path
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Quantum repeater: relays by entanglement swapping
    Quantum,
    /// Classical node: never relays a quantum signal
    Classical,
}

impl NodeKind {
    pub fn is_quantum(&self) -> bool {
        matches!(self, NodeKind::Quantum)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Quantum => "quantum",
            NodeKind::Classical => "classical",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn quantum(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Quantum,
        }
    }

    pub fn classical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Classical,
        }
    }
}

/// Undirected link between two nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub a: String,
    pub b: String,
    /// Link length in distance units (km in the reference topology)
    pub distance: f64,
    /// Classical latency in milliseconds, if known
    pub latency: Option<f64>,
    /// Per-hop packet loss, only meaningful on classical links
    pub packet_loss_probability: Option<f64>,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>, distance: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            distance,
            latency: None,
            packet_loss_probability: None,
        }
    }

    /// Attach classical link characteristics
    pub fn with_classical(mut self, latency: f64, packet_loss_probability: f64) -> Self {
        self.latency = Some(latency);
        self.packet_loss_probability = Some(packet_loss_probability);
        self
    }

    /// Check the edge's own invariants (endpoints and numeric ranges)
    pub fn validate(&self) -> TopologyResult<()> {
        if self.a == self.b {
            return Err(TopologyError::InvalidParameter(format!(
                "edge {} -> {} connects a node to itself",
                self.a, self.b
            )));
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(TopologyError::InvalidParameter(format!(
                "edge {} - {} has non-positive distance {}",
                self.a, self.b, self.distance
            )));
        }
        if let Some(latency) = self.latency {
            if !latency.is_finite() || latency < 0.0 {
                return Err(TopologyError::InvalidParameter(format!(
                    "edge {} - {} has negative latency {}",
                    self.a, self.b, latency
                )));
            }
        }
        if let Some(p) = self.packet_loss_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(TopologyError::InvalidParameter(format!(
                    "edge {} - {} has packet loss probability {} outside [0, 1]",
                    self.a, self.b, p
                )));
            }
        }
        Ok(())
    }

    /// The endpoint opposite to `name`, if `name` is an endpoint
    pub fn other(&self, name: &str) -> Option<&str> {
        if self.a == name {
            Some(&self.b)
        } else if self.b == name {
            Some(&self.a)
        } else {
            None
        }
    }
}

/// Ordered sequence of node names, at least two long
///
/// Adjacency is only checked against a concrete [`Network`](super::Network)
/// via `Network::resolve`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Path {
    nodes: Vec<String>,
}

impl TryFrom<Vec<String>> for Path {
    type Error = TopologyError;

    fn try_from(nodes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(nodes)
    }
}

impl From<Path> for Vec<String> {
    fn from(path: Path) -> Self {
        path.nodes
    }
}

impl Path {
    pub fn new<I, S>(nodes: I) -> TopologyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: Vec<String> = nodes.into_iter().map(Into::into).collect();
        if nodes.len() < 2 {
            return Err(TopologyError::InvalidPath(format!(
                "path needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn source(&self) -> &str {
        &self.nodes[0]
    }

    pub fn destination(&self) -> &str {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Nodes strictly between source and destination
    pub fn intermediates(&self) -> &[String] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Consecutive (from, to) pairs
    pub fn hops(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes.join(" -> "))
    }
}

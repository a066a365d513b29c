//! Hybrid network graph
//!
//! Nodes and adjacency are held in insertion-ordered maps so every traversal
//! (routing relaxation, report output) is deterministic.

use indexmap::IndexMap;

use super::error::{TopologyError, TopologyResult};
use super::types::{Edge, Node, NodeKind, Path};

#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
    /// node -> (neighbour -> index into `edges`)
    adjacency: IndexMap<String, IndexMap<String, usize>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> TopologyResult<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(TopologyError::DuplicateNode(node.name));
        }
        self.adjacency.insert(node.name.clone(), IndexMap::new());
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> TopologyResult<()> {
        edge.validate()?;

        for endpoint in [&edge.a, &edge.b] {
            if !self.nodes.contains_key(endpoint) {
                return Err(TopologyError::UnknownNode(endpoint.clone()));
            }
        }
        if self.edge_between(&edge.a, &edge.b).is_some() {
            return Err(TopologyError::DuplicateEdge(edge.a, edge.b));
        }

        let index = self.edges.len();
        if let Some(neighbours) = self.adjacency.get_mut(&edge.a) {
            neighbours.insert(edge.b.clone(), index);
        }
        if let Some(neighbours) = self.adjacency.get_mut(&edge.b) {
            neighbours.insert(edge.a.clone(), index);
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Builder-style variant of [`add_node`](Self::add_node)
    pub fn with_node(mut self, node: Node) -> TopologyResult<Self> {
        self.add_node(node)?;
        Ok(self)
    }

    /// Builder-style variant of [`add_edge`](Self::add_edge)
    pub fn with_edge(mut self, edge: Edge) -> TopologyResult<Self> {
        self.add_edge(edge)?;
        Ok(self)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Insertion position of a node; used as the routing tie-break
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.get_index_of(name)
    }

    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_between(&self, a: &str, b: &str) -> Option<&Edge> {
        self.adjacency
            .get(a)
            .and_then(|neighbours| neighbours.get(b))
            .map(|&index| &self.edges[index])
    }

    /// Neighbours of `name` with the connecting edge, in edge insertion order
    pub fn neighbours<'a>(
        &'a self,
        name: &str,
    ) -> TopologyResult<impl Iterator<Item = (&'a str, &'a Edge)> + 'a> {
        let neighbours = self
            .adjacency
            .get(name)
            .ok_or_else(|| TopologyError::UnknownNode(name.to_string()))?;
        Ok(neighbours
            .iter()
            .map(move |(other, &index)| (other.as_str(), &self.edges[index])))
    }

    /// Validate `path` against this network and pin down its hops
    ///
    /// Every node must exist and every consecutive pair must share an edge.
    pub fn resolve<'a>(&'a self, path: &'a Path) -> TopologyResult<ResolvedPath<'a>> {
        for name in path.nodes() {
            if !self.contains(name) {
                return Err(TopologyError::UnknownNode(name.clone()));
            }
        }

        let mut hops = Vec::with_capacity(path.hop_count());
        for (from, to) in path.hops() {
            let edge = self.edge_between(from, to).ok_or_else(|| {
                TopologyError::InvalidPath(format!("no edge between {} and {}", from, to))
            })?;
            hops.push(edge);
        }

        let kinds = path
            .nodes()
            .iter()
            .filter_map(|name| self.node(name).map(|node| node.kind))
            .collect();

        Ok(ResolvedPath { path, hops, kinds })
    }

    pub fn path_distance(&self, path: &Path) -> TopologyResult<f64> {
        Ok(self.resolve(path)?.total_distance())
    }
}

/// A path that has been checked against a network
///
/// Holds the edge of every hop and the kind of every node on it, so
/// protocols can run many trials without repeating lookups.
#[derive(Debug, Clone)]
pub struct ResolvedPath<'a> {
    path: &'a Path,
    hops: Vec<&'a Edge>,
    kinds: Vec<NodeKind>,
}

impl<'a> ResolvedPath<'a> {
    pub fn path(&self) -> &'a Path {
        self.path
    }

    pub fn hops(&self) -> &[&'a Edge] {
        &self.hops
    }

    /// Kinds of the intermediate nodes, in path order
    pub fn relays(&self) -> &[NodeKind] {
        &self.kinds[1..self.kinds.len() - 1]
    }

    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    pub fn total_distance(&self) -> f64 {
        self.hops.iter().map(|edge| edge.distance).sum()
    }

    /// Sum of the known hop latencies
    pub fn total_latency(&self) -> f64 {
        self.hops.iter().filter_map(|edge| edge.latency).sum()
    }

    pub fn has_classical_relay(&self) -> bool {
        self.relays().iter().any(|kind| !kind.is_quantum())
    }

    /// True when no node on the path is quantum
    pub fn is_all_classical(&self) -> bool {
        self.kinds.iter().all(|kind| !kind.is_quantum())
    }
}

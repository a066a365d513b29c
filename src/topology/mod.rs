pub mod builder;
pub mod error;
pub mod network;
pub mod types;

pub use builder::{
    build_chain_topology, build_fixed_topology, chain_distance, chain_hub_name,
    CHAIN_DESTINATION, CHAIN_HOP_DISTANCE, CHAIN_SOURCE, CHAIN_SPUR_DISTANCE,
    FIXED_CLASSICAL_PACKET_LOSS,
};
pub use error::{TopologyError, TopologyResult};
pub use network::{Network, ResolvedPath};
pub use types::{Edge, Node, NodeKind, Path};

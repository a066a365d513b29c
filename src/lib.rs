//! Reliability simulation for hybrid quantum/classical networks
//!
//! Builds small network topologies, estimates how often a transfer over a
//! path succeeds under different transmission protocols, and routes over
//! either a reliability-weighted or a plain-distance edge metric.

pub mod metrics;
pub mod protocol;
pub mod reliability;
pub mod routing;
pub mod simulation;
pub mod topology;

pub use protocol::{Protocol, ProtocolKind, TransmissionProtocol};
pub use reliability::ReliabilityModel;
pub use routing::{compare_routes, shortest_path, WeightKind};
pub use simulation::{SimulationConfig, SimulationError, SimulationOutcome, Simulator, SweepPoint};
pub use topology::{build_chain_topology, build_fixed_topology, Network, Path};

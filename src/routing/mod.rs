//! Dual-metric routing
//!
//! Every edge gets a reliability-weighted quantum cost and a plain-distance
//! classical cost; shortest paths are computed under either weight.

pub mod cost;
pub mod dijkstra;
pub mod error;

pub use cost::{edge_costs, path_cost, EdgeCosts, WeightKind, COST_EPSILON};
pub use dijkstra::{compare_routes, shortest_path, RouteComparison, RouteSummary};
pub use error::{RoutingError, RoutingResult};

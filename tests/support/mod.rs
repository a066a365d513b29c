//! Shared topologies and statistics helpers for the integration tests

pub mod scenarios;
pub mod stats;

// Not every test binary uses every helper
#[allow(unused_imports)]
pub use scenarios::{detour_network, three_hop_chain, uniform_chain};
#[allow(unused_imports)]
pub use stats::{assert_close, binomial_tolerance};

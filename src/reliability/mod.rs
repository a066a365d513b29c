//! Failure models for links and repeater nodes
//!
//! Everything here is deterministic; random draws happen at the trial
//! boundary in the protocol layer.

pub mod error;
pub mod model;

pub use error::{ReliabilityError, ReliabilityResult};
pub use model::{
    link_loss_probability, link_success_probability, ReliabilityModel,
    DEFAULT_CLASSICAL_PACKET_LOSS, DEFAULT_MAX_RETRIES, DEFAULT_QUBIT_LOSS_ALPHA,
    DEFAULT_SWAP_SUCCESS_PROBABILITY,
};

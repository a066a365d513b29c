use thiserror::Error;

use crate::reliability::ReliabilityError;
use crate::topology::TopologyError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("No path from {source_node} to {destination}")]
    Disconnected {
        source_node: String,
        destination: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

impl From<ReliabilityError> for RoutingError {
    fn from(err: ReliabilityError) -> Self {
        match err {
            ReliabilityError::InvalidParameter(msg) => RoutingError::InvalidParameter(msg),
        }
    }
}

pub type RoutingResult<T> = Result<T, RoutingError>;

use thiserror::Error;

use crate::reliability::ReliabilityError;
use crate::topology::TopologyError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

impl From<ReliabilityError> for ProtocolError {
    fn from(err: ReliabilityError) -> Self {
        match err {
            ReliabilityError::InvalidParameter(msg) => ProtocolError::InvalidParameter(msg),
        }
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

use thiserror::Error;

use crate::protocol::ProtocolError;
use crate::reliability::ReliabilityError;
use crate::routing::RoutingError;
use crate::topology::TopologyError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimulationError {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidParameter(_)
                | SimulationError::Topology(TopologyError::InvalidParameter(_))
                | SimulationError::Routing(RoutingError::InvalidParameter(_))
        )
    }

    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            SimulationError::Topology(TopologyError::InvalidPath(_))
                | SimulationError::Routing(RoutingError::Topology(TopologyError::InvalidPath(_)))
        )
    }

    pub fn is_unknown_node(&self) -> bool {
        matches!(
            self,
            SimulationError::Topology(TopologyError::UnknownNode(_))
                | SimulationError::Routing(RoutingError::Topology(TopologyError::UnknownNode(_)))
        )
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(
            self,
            SimulationError::Routing(RoutingError::Disconnected { .. })
        )
    }
}

impl From<ProtocolError> for SimulationError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidParameter(msg) => SimulationError::InvalidParameter(msg),
            ProtocolError::Topology(e) => SimulationError::Topology(e),
        }
    }
}

impl From<ReliabilityError> for SimulationError {
    fn from(err: ReliabilityError) -> Self {
        match err {
            ReliabilityError::InvalidParameter(msg) => SimulationError::InvalidParameter(msg),
        }
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SimulationError {
    fn from(err: tokio::task::JoinError) -> Self {
        SimulationError::Worker(err.to_string())
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;

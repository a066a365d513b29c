use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopologyError {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    #[error("Duplicate edge between {0} and {1}")]
    DuplicateEdge(String, String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type TopologyResult<T> = Result<T, TopologyError>;

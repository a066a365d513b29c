use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReliabilityError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type ReliabilityResult<T> = Result<T, ReliabilityError>;

//! `dt-flow` error type.

use thiserror::Error;

/// Errors raised by a topology or flow oracle.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand result type for `dt-flow`.
pub type FlowResult<T> = Result<T, FlowError>;

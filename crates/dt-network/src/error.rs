//! `dt-network` error type.

use thiserror::Error;

/// Errors raised while building street curves, intersection areas, or
/// traffic-way/intersection IR.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A probe-to-probe segment failed to produce exactly one intersection
    /// with an intersection-area boundary circle — fatal, indicates upstream
    /// geometry inconsistency.
    #[error("precondition violated: {0}")]
    PreconditionViolated(String),
}

/// Shorthand result type for `dt-network`.
pub type NetworkResult<T> = Result<T, NetworkError>;

//! `dt-population` error type.

use thiserror::Error;

/// Errors raised while sampling probes or estimating density.
#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand result type for `dt-population`.
pub type PopulationResult<T> = Result<T, PopulationError>;

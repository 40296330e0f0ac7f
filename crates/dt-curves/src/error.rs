//! `dt-curves` error type: the shared error kinds, specialized for
//! curve/lane-piece preconditions.

use thiserror::Error;

/// Errors raised while building or evaluating curves and lane pieces.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("t = {t} outside curve domain [{t1}, {t2}]")]
    OutOfDomain { t: f64, t1: f64, t2: f64 },

    #[error("lane piece has no points")]
    EmptyLanePiece,
}

/// Shorthand result type for `dt-curves`.
pub type CurveResult<T> = Result<T, CurveError>;

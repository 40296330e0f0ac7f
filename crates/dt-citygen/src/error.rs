//! `CityGenError` — the orchestrator's error type.
//!
//! Every stage error is fatal to the run — there is no retry path; this
//! type just tags which stage produced it so a caller can log a useful
//! message before giving up.

use dt_flow::FlowError;
use dt_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CityGenError {
    #[error("topology/flow oracle error: {0}")]
    Flow(#[from] FlowError),

    #[error("street/intersection IR error: {0}")]
    Network(#[from] NetworkError),

    #[error("flow oracle returned a connection referencing an out-of-range probe index")]
    InvalidConnection,
}

pub type CityGenResult<T> = Result<T, CityGenError>;

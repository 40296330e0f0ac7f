//! `dt-flow` — the topology/flow oracle contract.
//!
//! The real topology optimizer and iterative flow simulation are external
//! collaborators outside this core's scope. This crate pins the call
//! contract (`TopologyOracle`, `FlowOracle`) and ships one reference
//! baseline adapter, [`NearestNeighborOracle`], so examples and tests can
//! exercise the full pipeline without a native solver dependency.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|-----------------------------------------------------------|
//! | [`oracle`]  | `TopologyOracle`, `FlowOracle`, `TopologyResult`       |
//! | [`baseline`]| `NearestNeighborOracle` — k-NN + gravity-model reference|
//! | [`error`]   | `FlowError`, `FlowResult<T>`                           |

pub mod baseline;
pub mod error;
pub mod oracle;


pub use baseline::NearestNeighborOracle;
pub use error::{FlowError, FlowResult};
pub use oracle::{FlowOracle, TopologyOracle, TopologyResult};

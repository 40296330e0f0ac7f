//! `dt-core` — foundational types for the procedural street-network
//! generator.
//!
//! This crate is a dependency of every other `dt-*` crate.  It intentionally
//! has no `dt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `ProbeIndex`, `LaneCurveIndex`, `LaneIndex`           |
//! | [`geo`]    | `Point2`, `Point3`, `Basis2`, `approx_eq`             |
//! | [`config`] | `GenerationConfig` — every tunable parameter of a run |
//! | [`rng`]    | `RngHandle` — explicit, single-threaded determinism   |
//! | [`error`]  | `DtError`, `DtResult`                                 |
//! | [`model`]  | `PopulationProbe`, `ProbeConnection`, `ProbeConnectionFlow` |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::GenerationConfig;
pub use error::{DtError, DtResult};
pub use geo::{Basis2, Point2, Point3};
pub use ids::{LaneCurveIndex, LaneIndex, ProbeIndex};
pub use model::{PopulationProbe, ProbeConnection, ProbeConnectionFlow};
pub use rng::RngHandle;

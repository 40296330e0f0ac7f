//! `dt-citygen` — pipeline orchestrator for the procedural street-network
//! generator.
//!
//! # Data flow
//!
//! ```text
//! GenerateProbes -> FlowOracle -> BuildStreetCurves -> IntersectionAreas
//!   -> TrafficWayIR -> IntersectionIR      (and -> StreetIR, in parallel
//!                                           with TrafficWayIR)
//! ```
//!
//! [`CityGenerator::generate`] runs every stage in order, reporting
//! progress through a [`GenerationObserver`], and returns a
//! [`GeneratedCity`] holding the probes, streets, and intersections the run
//! produced.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | Forwards to `dt-population`/`dt-network`'s associative stages. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on IR types (via `dt-network/serde`). |
//!
//! # Quick-start
//!
//! ```rust
//! use dt_citygen::{CityGenBuilder, NoopObserver};
//! use dt_core::GenerationConfig;
//! use dt_flow::NearestNeighborOracle;
//!
//! let generator = CityGenBuilder::new(
//!     NearestNeighborOracle::default(),
//!     NearestNeighborOracle::default(),
//! )
//! .config(GenerationConfig::new(3_000.0))
//! .build();
//!
//! let city = generator.generate(&mut NoopObserver).unwrap();
//! assert!(!city.probes.is_empty());
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod model;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::CityGenBuilder;
pub use error::{CityGenError, CityGenResult};
pub use generator::CityGenerator;
pub use model::GeneratedCity;
pub use observer::{GenerationObserver, NoopObserver};

//! `dt-population` — stratified, density-weighted probe sampling.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`city_core`]| `CityCore`, `CityCores` (internal anchors)            |
//! | [`sampler`]  | `generate_probes` — the full seven-step pipeline      |
//! | [`error`]    | `PopulationError`, `PopulationResult<T>`              |
//!
//! # Determinism
//!
//! All randomness is drawn from a single [`dt_core::RngHandle`] passed in by
//! the caller, in a fixed order: city-core locations, orientations, and
//! importance scores, then per-probe core choice and local offset. No
//! process-wide RNG is ever touched.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Dispatches the per-probe Riemann integration over Rayon. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on `dt-core` model types (via `dt-core/serde`). |

pub mod city_core;
pub mod error;
pub mod sampler;


pub use city_core::{generate_city_cores, CityCore, CityCores};
pub use error::{PopulationError, PopulationResult};
pub use sampler::generate_probes;

//! `dt-curves` — centripetal Catmull-Rom curves and the lane-piece spatial
//! index used throughout the street-network generator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`curve`]      | `CatmulRomCurve3` — evaluation, tangents, arc length    |
//! | [`lane_piece`] | `LanePiece`, `SegmentProjection` — polyline + R-tree     |
//! | [`error`]      | `CurveError`, `CurveResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.         |

pub mod curve;
pub mod error;
pub mod lane_piece;


pub use curve::CatmulRomCurve3;
pub use error::{CurveError, CurveResult};
pub use lane_piece::{LanePiece, SegmentProjection};

//! `dt-network` — street-curve, intersection-area, and traffic-way /
//! intersection IR builders.
//!
//! # Crate layout
//!
//! | Module               | Contents                                            |
//! |-----------------------|-----------------------------------------------------|
//! | [`curve_builder`]     | Component F — per-connection street curves          |
//! | [`intersection_area`] | Component G — per-probe intersection-area circles    |
//! | [`traffic_way`]       | Component H — lane geometry and markings             |
//! | [`street`]            | Component I — bidirectional street assembly          |
//! | [`intersection`]      | Component J — inbound-to-outbound lane routing       |
//! | [`model`]             | `TrafficWay`, `Street`, `Intersection`, and friends  |
//! | [`error`]             | `NetworkError`, `NetworkResult<T>`                   |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                   |
//! |------------|-----------------------------------------------------------|
//! | `serde`    | Adds `Serialize`/`Deserialize` to all public IR types.   |
//! | `parallel` | Dispatches per-connection/per-probe IR stages over rayon.|

pub mod curve_builder;
pub mod error;
pub mod intersection;
pub mod intersection_area;
pub mod model;
pub mod street;
pub mod traffic_way;

#[cfg(test)]
mod tests;

pub use curve_builder::build_street_curves;
pub use error::{NetworkError, NetworkResult};
pub use intersection::generate_intersections;
pub use intersection_area::{compute_intersection_areas, IntersectionArea};
pub use model::{
    ArcInterval, Intersection, MarkedCurve, MarkingType, Street, TrafficConnection, TrafficLane,
    TrafficMarking, TrafficWay,
};
pub use street::generate_streets;
pub use traffic_way::generate_traffic_ways;

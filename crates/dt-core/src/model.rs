//! Cross-crate record types: the probe, connection, and flow
//! records that `dt-population`, `dt-flow`, and `dt-network` all share.
//!
//! These live in `dt-core` (rather than, say, `dt-population`) because every
//! downstream crate needs `ProbeConnection`/`ProbeConnectionFlow` without
//! depending on the population sampler itself.

use crate::{Point3, ProbeIndex};

/// A stratified spatial sample of residential density.
///
/// Positions are unique within a generation run and immutable once
/// produced — probes are generated once by `dt-population` and shared
/// read-only by every downstream stage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationProbe {
    pub location: Point3,
    /// Expected residents in the centered 200x200 m square.
    pub pop200: f64,
    /// Expected residents in the centered 1000x1000 m square.
    pub pop1000: f64,
}

/// An unordered pair identifier with directional fields.
///
/// Two `ProbeConnection`s with swapped endpoints refer to the two directed
/// traffic ways of the same bidirectional street.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeConnection {
    pub src_idx: ProbeIndex,
    pub dst_idx: ProbeIndex,
}

impl ProbeConnection {
    pub fn new(src_idx: ProbeIndex, dst_idx: ProbeIndex) -> Self {
        Self { src_idx, dst_idx }
    }

    /// The connection with `src`/`dst` swapped.
    pub fn reversed(self) -> Self {
        Self { src_idx: self.dst_idx, dst_idx: self.src_idx }
    }
}

/// A directed connection extended with the flow oracle's output.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeConnectionFlow {
    pub connection: ProbeConnection,
    /// Real, non-negative estimated flow (persons or vehicles, oracle-defined).
    pub flow: f64,
    /// Integer, >= 1.
    pub lane_count: u32,
}

impl ProbeConnectionFlow {
    pub fn src_idx(&self) -> ProbeIndex {
        self.connection.src_idx
    }

    pub fn dst_idx(&self) -> ProbeIndex {
        self.connection.dst_idx
    }
}

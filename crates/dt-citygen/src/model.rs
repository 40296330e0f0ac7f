//! The orchestrator's single output type: everything a generation run
//! produces, gathered in one place.

use std::collections::HashMap;

use dt_core::{PopulationProbe, ProbeConnection, ProbeConnectionFlow};
use dt_network::{Intersection, Street, TrafficWay};

/// Everything one call to [`crate::CityGenerator::generate`] produces.
///
/// Probes are generated once and shared read-only by every downstream
/// collection; each `Street` owns its one or two `TrafficWay`s;
/// `Intersection`s reference traffic ways by id string, not by direct
/// ownership, to avoid a cyclic graph. `traffic_ways`
/// keeps the per-direction map alongside the paired-up `streets` view —
/// both are cheap `Clone`s of the same underlying IR, and callers that only
/// care about one direction at a time (e.g. an output writer keyed by
/// `TrafficWay::id`) don't need to unpack `streets` to get it.
#[derive(Clone, Debug, Default)]
pub struct GeneratedCity {
    pub probes: Vec<PopulationProbe>,
    pub connection_flows: Vec<ProbeConnectionFlow>,
    pub traffic_ways: HashMap<ProbeConnection, TrafficWay>,
    pub streets: HashMap<ProbeConnection, Street>,
    pub intersections: Vec<Intersection>,
}

impl GeneratedCity {
    /// The output of a run where the city was too small to host a single
    /// population core (`core_count == 0`).
    pub fn empty() -> Self {
        Self::default()
    }
}

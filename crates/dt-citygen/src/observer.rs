//! Generation observer trait for progress reporting and data collection.
//!
//! A set of default-no-op callbacks invoked at each pipeline stage
//! boundary, so a caller can hook in progress printers, output writers, or
//! test probes without the orchestrator knowing anything about them.

use std::collections::HashMap;

use dt_core::{PopulationProbe, ProbeConnection, ProbeConnectionFlow};
use dt_curves::CatmulRomCurve3;
use dt_network::{Intersection, IntersectionArea, Street, TrafficWay};

/// Callbacks invoked by [`crate::CityGenerator::generate`] at each stage
/// boundary of the pipeline:
/// `GenerateProbes → FlowOracle → BuildStreetCurves → IntersectionAreas →
/// TrafficWayIR → IntersectionIR` (and `→ StreetIR` in parallel with
/// `TrafficWayIR`).
///
/// All methods have default no-op implementations so implementors only
/// need to override what they care about.
pub trait GenerationObserver {
    /// Called once the population sampler has produced every probe
    /// (component D).
    fn on_probes_generated(&mut self, _probes: &[PopulationProbe]) {}

    /// Called once the topology oracle has returned the connection set.
    fn on_topology_computed(&mut self, _connections: &[ProbeConnection], _score: f64) {}

    /// Called once the flow oracle has estimated per-connection flow and
    /// lane counts (component E).
    fn on_flow_estimated(&mut self, _flows: &[ProbeConnectionFlow]) {}

    /// Called once every directed connection has a street curve
    /// (component F).
    fn on_street_curves_built(&mut self, _curves: &HashMap<ProbeConnection, CatmulRomCurve3>) {}

    /// Called once every probe's intersection-area circle is known
    /// (component G).
    fn on_intersection_areas_computed(&mut self, _areas: &[IntersectionArea]) {}

    /// Called once the traffic-way IR builder has produced every way
    /// (component H).
    fn on_traffic_ways_generated(&mut self, _traffic_ways: &HashMap<ProbeConnection, TrafficWay>) {}

    /// Called once opposing traffic ways have been paired into streets
    /// (component I).
    fn on_streets_assembled(&mut self, _streets: &HashMap<ProbeConnection, Street>) {}

    /// Called once the intersection IR builder has produced every probe's
    /// routing assignments (component J).
    fn on_intersections_generated(&mut self, _intersections: &[Intersection]) {}

    /// Called once generation has finished, successfully or not.
    fn on_generation_end(&mut self) {}
}

/// A [`GenerationObserver`] that does nothing.
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

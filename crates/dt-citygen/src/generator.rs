//! `CityGenerator` — the pipeline driver.
//!
//! Runs the full data flow in one call:
//!
//! ```text
//! GenerateProbes -> FlowOracle -> BuildStreetCurves -> IntersectionAreas
//!   -> TrafficWayIR -> IntersectionIR      (and -> StreetIR, built from the
//!                                           same traffic ways)
//! ```
//!
//! The generator is itself single-threaded and deterministic given a fixed
//! seed and inputs; whatever parallelism the `parallel` feature
//! enables lives inside `dt-population`/`dt-network`'s own associative
//! stages, not here.

use dt_core::{GenerationConfig, RngHandle};
use dt_flow::{FlowOracle, TopologyOracle};
use dt_network::{
    build_street_curves, compute_intersection_areas, generate_intersections, generate_streets,
    generate_traffic_ways,
};

use crate::model::GeneratedCity;
use crate::observer::GenerationObserver;
use crate::{CityGenError, CityGenResult};

/// Wires one [`TopologyOracle`] and one [`FlowOracle`] implementation to the
/// rest of the pipeline. Both oracles are external collaborators — the
/// generator calls them synchronously and blocks until they return, with
/// no timeout and no retry.
pub struct CityGenerator<T: TopologyOracle, F: FlowOracle> {
    config: GenerationConfig,
    topology_oracle: T,
    flow_oracle: F,
}

impl<T: TopologyOracle, F: FlowOracle> CityGenerator<T, F> {
    pub fn new(config: GenerationConfig, topology_oracle: T, flow_oracle: F) -> Self {
        Self { config, topology_oracle, flow_oracle }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run one full generation pass, reporting progress through `observer`.
    ///
    /// Returns [`GeneratedCity::empty`] without calling either oracle if
    /// the city is too small to host a single population core.
    pub fn generate<O: GenerationObserver>(&self, observer: &mut O) -> CityGenResult<GeneratedCity> {
        let mut rng = RngHandle::new(self.config.seed);

        log::debug!("dt-citygen: sampling population probes (city_size={})", self.config.city_size);
        let probes = dt_population::generate_probes(&self.config, &mut rng);
        observer.on_probes_generated(&probes);

        if probes.is_empty() {
            log::debug!("dt-citygen: city too small to host a population core, returning empty city");
            observer.on_generation_end();
            return Ok(GeneratedCity::empty());
        }
        log::debug!("dt-citygen: sampled {} probes", probes.len());

        let topology = self.topology_oracle.compute_topology(
            &probes,
            self.config.regularity_optimization_steps,
            self.config.efficiency_optimization_steps,
        )?;
        observer.on_topology_computed(&topology.connections, topology.score);
        log::debug!(
            "dt-citygen: topology oracle returned {} connections (score={})",
            topology.connections.len(),
            topology.score
        );

        let connection_flows =
            self.flow_oracle
                .estimate(&probes, &topology.connections, self.config.flow_iteration_count)?;
        observer.on_flow_estimated(&connection_flows);
        log::debug!("dt-citygen: flow oracle estimated {} directed flows", connection_flows.len());

        for flow in &connection_flows {
            if flow.src_idx().index() >= probes.len() || flow.dst_idx().index() >= probes.len() {
                return Err(CityGenError::InvalidConnection);
            }
        }

        let intersection_areas = compute_intersection_areas(&probes, &connection_flows, &self.config);
        observer.on_intersection_areas_computed(&intersection_areas);

        let street_curves = build_street_curves(&probes, &intersection_areas, &connection_flows)?;
        observer.on_street_curves_built(&street_curves);
        log::debug!("dt-citygen: built {} street curves", street_curves.len());

        let traffic_ways = generate_traffic_ways(&street_curves, &connection_flows, &self.config)?;
        observer.on_traffic_ways_generated(&traffic_ways);

        let streets = generate_streets(&street_curves, &traffic_ways);
        observer.on_streets_assembled(&streets);
        log::debug!("dt-citygen: assembled {} streets", streets.len());

        let intersections = generate_intersections(&probes, &traffic_ways);
        observer.on_intersections_generated(&intersections);
        log::debug!("dt-citygen: built {} intersections", intersections.len());

        observer.on_generation_end();

        Ok(GeneratedCity { probes, connection_flows, traffic_ways, streets, intersections })
    }
}

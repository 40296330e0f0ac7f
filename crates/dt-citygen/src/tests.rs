//! Integration tests for dt-citygen.

use std::collections::HashMap;

use dt_core::{GenerationConfig, PopulationProbe, ProbeConnection, ProbeConnectionFlow, ProbeIndex};
use dt_flow::{FlowOracle, FlowResult, NearestNeighborOracle, TopologyOracle, TopologyResult};

use crate::{CityGenBuilder, CityGenError, GenerationObserver, NoopObserver};

fn small_city_config() -> GenerationConfig {
    // 3 km square comfortably clears the single-core threshold
    // (sqm_per_core defaults to 7e6, so a 3000x3000 = 9e6 sqm city hosts
    // exactly one core) while staying fast enough for a test run.
    GenerationConfig::new(3_000.0)
}

// ── Full pipeline smoke test ───────────────────────────────────────────────

#[test]
fn full_pipeline_produces_consistent_city() {
    let generator = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
        .config(small_city_config())
        .build();

    let city = generator.generate(&mut NoopObserver).unwrap();

    assert!(!city.probes.is_empty());
    assert!(!city.connection_flows.is_empty(), "nearest-neighbor oracle should connect a 3km probe cloud");
    assert_eq!(city.traffic_ways.len(), city.connection_flows.len());
    assert_eq!(city.intersections.len(), city.probes.len());

    // Every street's traffic way count is 1 (one-way) or 2 (opposing pair).
    for street in city.streets.values() {
        assert!(street.traffic_ways.len() == 1 || street.traffic_ways.len() == 2);
    }

    // Every traffic way referenced by an intersection connection actually
    // exists in the flat map (ids are unique "{src}_{dst}" strings).
    let known_ids: std::collections::HashSet<&str> =
        city.traffic_ways.values().map(|w| w.id.as_str()).collect();
    for intersection in &city.intersections {
        for conn in &intersection.connections {
            assert!(known_ids.contains(conn.inbound_traffic_way_id.as_str()));
            assert!(known_ids.contains(conn.outbound_traffic_way_id.as_str()));
        }
    }
}

#[test]
fn same_seed_reproduces_identical_probe_count() {
    let config = small_city_config();
    let gen1 = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
        .config(config.clone())
        .build();
    let gen2 = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
        .config(config)
        .build();

    let city1 = gen1.generate(&mut NoopObserver).unwrap();
    let city2 = gen2.generate(&mut NoopObserver).unwrap();

    assert_eq!(city1.probes.len(), city2.probes.len());
    for (p1, p2) in city1.probes.iter().zip(&city2.probes) {
        assert_eq!(p1.location, p2.location);
    }
}

// ── Empty-city path ─────────────────────────────────────────────────────────

#[test]
fn tiny_city_returns_empty_without_calling_oracles() {
    struct PanicOracle;
    impl TopologyOracle for PanicOracle {
        fn compute_topology(&self, _: &[PopulationProbe], _: u32, _: u32) -> FlowResult<TopologyResult> {
            panic!("topology oracle should not be called for a city with zero cores");
        }
    }
    impl FlowOracle for PanicOracle {
        fn estimate(&self, _: &[PopulationProbe], _: &[ProbeConnection], _: u32) -> FlowResult<Vec<ProbeConnectionFlow>> {
            panic!("flow oracle should not be called for a city with zero cores");
        }
    }

    // sqm_per_core defaults to 7e6; a 100x100 city has far too little area
    // to host even one core (core_count = floor(size^2/sqm_per_core)).
    let generator = CityGenBuilder::new(PanicOracle, PanicOracle)
        .config(GenerationConfig::new(100.0))
        .build();

    let city = generator.generate(&mut NoopObserver).unwrap();
    assert!(city.probes.is_empty());
    assert!(city.connection_flows.is_empty());
    assert!(city.streets.is_empty());
    assert!(city.intersections.is_empty());
}

// ── Observer hooks ──────────────────────────────────────────────────────────

#[derive(Default)]
struct CountingObserver {
    probes_calls: usize,
    topology_calls: usize,
    flow_calls: usize,
    street_curve_calls: usize,
    area_calls: usize,
    traffic_way_calls: usize,
    street_calls: usize,
    intersection_calls: usize,
    end_calls: usize,
}

impl GenerationObserver for CountingObserver {
    fn on_probes_generated(&mut self, _probes: &[PopulationProbe]) {
        self.probes_calls += 1;
    }
    fn on_topology_computed(&mut self, _connections: &[ProbeConnection], _score: f64) {
        self.topology_calls += 1;
    }
    fn on_flow_estimated(&mut self, _flows: &[ProbeConnectionFlow]) {
        self.flow_calls += 1;
    }
    fn on_street_curves_built(&mut self, _curves: &HashMap<ProbeConnection, dt_curves::CatmulRomCurve3>) {
        self.street_curve_calls += 1;
    }
    fn on_intersection_areas_computed(&mut self, _areas: &[dt_network::IntersectionArea]) {
        self.area_calls += 1;
    }
    fn on_traffic_ways_generated(&mut self, _traffic_ways: &HashMap<ProbeConnection, dt_network::TrafficWay>) {
        self.traffic_way_calls += 1;
    }
    fn on_streets_assembled(&mut self, _streets: &HashMap<ProbeConnection, dt_network::Street>) {
        self.street_calls += 1;
    }
    fn on_intersections_generated(&mut self, _intersections: &[dt_network::Intersection]) {
        self.intersection_calls += 1;
    }
    fn on_generation_end(&mut self) {
        self.end_calls += 1;
    }
}

#[test]
fn observer_hooks_fire_exactly_once_each() {
    let generator = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
        .config(small_city_config())
        .build();

    let mut observer = CountingObserver::default();
    generator.generate(&mut observer).unwrap();

    assert_eq!(observer.probes_calls, 1);
    assert_eq!(observer.topology_calls, 1);
    assert_eq!(observer.flow_calls, 1);
    assert_eq!(observer.street_curve_calls, 1);
    assert_eq!(observer.area_calls, 1);
    assert_eq!(observer.traffic_way_calls, 1);
    assert_eq!(observer.street_calls, 1);
    assert_eq!(observer.intersection_calls, 1);
    assert_eq!(observer.end_calls, 1);
}

// ── Error propagation ────────────────────────────────────────────────────────

#[test]
fn out_of_range_connection_from_oracle_is_rejected() {
    struct BadFlowOracle;
    impl TopologyOracle for BadFlowOracle {
        fn compute_topology(&self, probes: &[PopulationProbe], _: u32, _: u32) -> FlowResult<TopologyResult> {
            // Fabricate a connection pointing one index past the probe array.
            let bogus = ProbeIndex(probes.len() as u32);
            Ok(TopologyResult {
                connections: vec![ProbeConnection::new(ProbeIndex(0), bogus)],
                score: 0.0,
            })
        }
    }
    impl FlowOracle for BadFlowOracle {
        fn estimate(
            &self,
            _probes: &[PopulationProbe],
            connections: &[ProbeConnection],
            _: u32,
        ) -> FlowResult<Vec<ProbeConnectionFlow>> {
            Ok(connections
                .iter()
                .map(|&connection| ProbeConnectionFlow { connection, flow: 1.0, lane_count: 1 })
                .collect())
        }
    }

    let generator = CityGenBuilder::new(BadFlowOracle, BadFlowOracle)
        .config(small_city_config())
        .build();

    let result = generator.generate(&mut NoopObserver);
    assert!(matches!(result, Err(CityGenError::InvalidConnection)));
}

// ── Integration with dt-output ──────────────────────────────────────────────

#[test]
fn generated_city_feeds_a_csv_output_writer() {
    use dt_output::{CsvWriter, GenerationObserver as OutputObserver};

    let generator = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
        .config(small_city_config())
        .build();
    let city = generator.generate(&mut NoopObserver).unwrap();

    let dir = tempfile_dir();
    let writer = CsvWriter::new(dir.path()).unwrap();
    let mut obs = OutputObserver::new(writer);
    obs.on_probes_generated(&city.probes);
    obs.on_traffic_ways_generated(&city.traffic_ways);
    obs.on_intersections_generated(&city.intersections);
    obs.on_generation_end();

    assert!(obs.take_error().is_none());
    assert!(dir.path().join("probes.csv").exists());
    assert!(dir.path().join("traffic_ways.csv").exists());
    assert!(dir.path().join("connections.csv").exists());
}

fn tempfile_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

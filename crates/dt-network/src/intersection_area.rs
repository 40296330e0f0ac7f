//! Intersection-area computation.
//!
//! Approximates the planar region around each probe where traffic ways join
//! as a circle: gather every traffic way incident to the probe, merge
//! same-direction pairs into "streets", and size the circle off the
//! widest-surviving street.

use dt_core::{GenerationConfig, Point2, Point3, PopulationProbe, ProbeConnectionFlow};

/// The approximate geometry of the intersection at one probe.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionArea {
    pub center: Point2,
    pub radius: f64,
}

#[derive(Clone, Copy, Debug)]
struct IncidentWay {
    dir: Point3,
    lane_count: u32,
}

#[derive(Clone, Copy, Debug)]
struct OrderedStreet {
    dir: Point3,
    lane_count: u32,
}

/// For every probe, the traffic ways pointing away from it: direction
/// `d - s` recorded at `s`, `s - d` recorded at `d`.
fn collect_incident_ways(probes: &[PopulationProbe], connection_flows: &[ProbeConnectionFlow]) -> Vec<Vec<IncidentWay>> {
    let mut result = vec![Vec::new(); probes.len()];

    for flow in connection_flows {
        let forward = probes[flow.dst_idx().index()].location - probes[flow.src_idx().index()].location;
        let backward = Point3::ZERO - forward;

        result[flow.src_idx().index()].push(IncidentWay { dir: forward, lane_count: flow.lane_count });
        result[flow.dst_idx().index()].push(IncidentWay { dir: backward, lane_count: flow.lane_count });
    }

    result
}

fn same_direction(a: Point3, b: Point3, rtol: f64) -> bool {
    // Mirrors `numpy.allclose(a, b, rtol=1e-3)` componentwise, including
    // numpy's default absolute tolerance of 1e-8.
    const ATOL: f64 = 1e-8;
    (a.x - b.x).abs() <= ATOL + rtol * b.x.abs()
        && (a.y - b.y).abs() <= ATOL + rtol * b.y.abs()
        && (a.z - b.z).abs() <= ATOL + rtol * b.z.abs()
}

/// Merge same-direction traffic ways into streets, then sort
/// counter-clockwise by `atan2(dir.x, dir.y)` — note the swapped argument
/// order, deliberate (see DESIGN.md).
fn to_ordered_streets(mut ways: Vec<IncidentWay>) -> Vec<OrderedStreet> {
    const SAME_DIRECTION_RTOL: f64 = 1e-3;

    let mut streets = Vec::new();
    let mut i = 0;
    while i < ways.len() {
        let pair = (i + 1..ways.len()).find(|&j| same_direction(ways[i].dir, ways[j].dir, SAME_DIRECTION_RTOL));

        match pair {
            Some(j) => {
                let total_lane_count = ways[i].lane_count + ways[j].lane_count;
                streets.push(OrderedStreet { dir: ways[i].dir, lane_count: total_lane_count });
                ways.swap(i + 1, j);
                i += 2;
            }
            None => {
                streets.push(OrderedStreet { dir: ways[i].dir, lane_count: ways[i].lane_count });
                i += 1;
            }
        }
    }

    streets.sort_by(|a, b| a.dir.x.atan2(a.dir.y).partial_cmp(&b.dir.x.atan2(b.dir.y)).unwrap());
    streets
}

fn intersection_radius(streets: &[OrderedStreet], config: &GenerationConfig) -> f64 {
    let max_lane_count = streets.iter().map(|s| s.lane_count).max().unwrap_or(0);
    max_lane_count as f64 * config.lane_width / 2.0 * config.intersection_area_scaling_factor
}

/// Compute an approximate intersection-area circle at every probe. A
/// probe with no incident traffic ways gets a zero-radius area.
pub fn compute_intersection_areas(
    probes: &[PopulationProbe],
    connection_flows: &[ProbeConnectionFlow],
    config: &GenerationConfig,
) -> Vec<IntersectionArea> {
    let incident_ways = collect_incident_ways(probes, connection_flows);

    probes
        .iter()
        .zip(incident_ways)
        .map(|(probe, ways)| {
            let ordered_streets = to_ordered_streets(ways);
            IntersectionArea {
                center: probe.location.to_2d(),
                radius: intersection_radius(&ordered_streets, config),
            }
        })
        .collect()
}

//! Traffic-way IR builder.
//!
//! Turns one street-curve builder result into the full lane geometry: `N+1`
//! marked boundary curves offset from the centerline, `N` travel lanes, and
//! the lane-change windows threaded through each interior dashed marking.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dt_core::{GenerationConfig, LaneCurveIndex, LaneIndex, Point3, ProbeConnection, ProbeConnectionFlow};
use dt_curves::CatmulRomCurve3;

use crate::model::{ArcInterval, MarkedCurve, MarkingType, TrafficLane, TrafficMarking, TrafficWay};
use crate::{NetworkError, NetworkResult};

/// Sample density for arc-length <-> parameter conversions.
/// `t_to_arc_length`/`arc_length_to_t` both take a `sample_count`; the
/// builder fixes one fine enough for meter-scale marking placement.
const MARKING_SAMPLE_COUNT: usize = 64;

/// Unit vector orthogonal to the curve's middle segment `p1 -> p2`:
/// `(dy, -dx, dz) / norm`. The `dz` leak is a known idiosyncrasy, kept
/// intentionally rather than special-cased to zero; `dz = 0` whenever
/// elevation is flat, so this matches the 2D left-normal exactly.
fn central_normal(curve: &CatmulRomCurve3) -> Point3 {
    let dx = curve.p2.x - curve.p1.x;
    let dy = curve.p2.y - curve.p1.y;
    let dz = curve.p2.z - curve.p1.z;
    let v = Point3::new(dy, -dx, dz);
    v.normalize()
}

fn translate_curve(curve: &CatmulRomCurve3, dir: Point3, distance: f64) -> CatmulRomCurve3 {
    let offset = dir * distance;
    CatmulRomCurve3::new(curve.p0 + offset, curve.p1 + offset, curve.p2 + offset, curve.p3 + offset)
}

fn standard_markings(curve: &CatmulRomCurve3, curve_index: usize, lane_count: usize, config: &GenerationConfig) -> NetworkResult<Vec<TrafficMarking>> {
    let (t1, t2) = curve.domain();

    if curve_index == 0 {
        return Ok(vec![TrafficMarking {
            arc_interval: ArcInterval { start: t1, stop: t2 },
            marking_type: MarkingType::SolidYellow,
        }]);
    }
    if curve_index == lane_count {
        return Ok(vec![TrafficMarking {
            arc_interval: ArcInterval { start: t1, stop: t2 },
            marking_type: MarkingType::SolidWhite,
        }]);
    }

    let t_dash_start = curve
        .arc_length_to_t(config.solid_line_length_before_intersection, MARKING_SAMPLE_COUNT)
        .map_err(|e| NetworkError::InvalidArgument(e.to_string()))?;
    let t_dash_end = t2 - (t_dash_start - t1);

    Ok(vec![
        TrafficMarking {
            arc_interval: ArcInterval { start: t1, stop: t_dash_start },
            marking_type: MarkingType::SolidWhite,
        },
        TrafficMarking {
            arc_interval: ArcInterval { start: t_dash_start, stop: t_dash_end },
            marking_type: MarkingType::DashedWhite,
        },
        TrafficMarking {
            arc_interval: ArcInterval { start: t_dash_end, stop: t2 },
            marking_type: MarkingType::SolidWhite,
        },
    ])
}

/// Build the `N+1` lane-boundary curves. Each boundary is offset
/// `i * LANE_WIDTH` from the original, undeviated centerline — NOT
/// cumulatively from the previous boundary, which would drift every
/// boundary further out than it should be.
fn generate_standard_marked_curves(curve: &CatmulRomCurve3, lane_count: usize, config: &GenerationConfig) -> NetworkResult<Vec<MarkedCurve>> {
    let normal = central_normal(curve);

    (0..=lane_count)
        .map(|i| {
            let boundary = translate_curve(curve, normal, i as f64 * config.lane_width);
            let markings = standard_markings(&boundary, i, lane_count, config)?;
            Ok(MarkedCurve { curve: boundary, markings })
        })
        .collect()
}

fn generate_standard_entrance_lanes(lane_count: usize, marked_curves: &[MarkedCurve]) -> Vec<TrafficLane> {
    debug_assert!(lane_count > 0);
    debug_assert_eq!(marked_curves.len(), lane_count + 1);

    let mut lanes: Vec<TrafficLane> = (0..lane_count)
        .map(|i| TrafficLane {
            left_curve_index: LaneCurveIndex(i as u16),
            right_curve_index: LaneCurveIndex((i + 1) as u16),
            left_lane_change_windows: Vec::new(),
            left_adjacent_lane_indices: Vec::new(),
            right_lane_change_windows: Vec::new(),
            right_adjacent_lane_indices: Vec::new(),
        })
        .collect();

    for i in 0..lane_count {
        if i > 0 {
            let window = dashed_window(&marked_curves[i]);
            lanes[i].left_lane_change_windows.push(window);
            lanes[i].left_adjacent_lane_indices.push(LaneIndex((i - 1) as u16));
        }
        if i < lane_count - 1 {
            let window = dashed_window(&marked_curves[i + 1]);
            lanes[i].right_lane_change_windows.push(window);
            lanes[i].right_adjacent_lane_indices.push(LaneIndex((i + 1) as u16));
        }
    }

    lanes
}

fn dashed_window(marked_curve: &MarkedCurve) -> ArcInterval {
    debug_assert_eq!(marked_curve.markings.len(), 3);
    debug_assert_eq!(marked_curve.markings[1].marking_type, MarkingType::DashedWhite);
    marked_curve.markings[1].arc_interval
}

fn generate_traffic_way(
    src_probe_index: u32,
    dst_probe_index: u32,
    curve: &CatmulRomCurve3,
    lane_count: usize,
    flow_percentile: f64,
    config: &GenerationConfig,
) -> NetworkResult<TrafficWay> {
    let marked_curves = generate_standard_marked_curves(curve, lane_count, config)?;
    let lanes = generate_standard_entrance_lanes(lane_count, &marked_curves);
    let lane_indices: Vec<LaneIndex> = (0..lanes.len() as u16).map(LaneIndex).collect();

    Ok(TrafficWay {
        id: format!("{src_probe_index}_{dst_probe_index}"),
        leftmost_curve: *curve,
        marked_curves,
        lanes,
        entrance_lane_indices: lane_indices.clone(),
        exit_lane_indices: lane_indices,
        flow_percentile,
    })
}

/// Generate the traffic-way IR for every street curve. Runs
/// over a thread pool when the `parallel` feature is enabled; per-connection
/// results are independent, so ordering is preserved either way.
pub fn generate_traffic_ways(
    street_curves: &HashMap<ProbeConnection, CatmulRomCurve3>,
    connection_flows: &[ProbeConnectionFlow],
    config: &GenerationConfig,
) -> NetworkResult<HashMap<ProbeConnection, TrafficWay>> {
    let build_one = |flow: &ProbeConnectionFlow| -> NetworkResult<(ProbeConnection, TrafficWay)> {
        let conn = flow.connection;
        let curve = street_curves.get(&conn).ok_or_else(|| {
            NetworkError::InvalidArgument(format!("no street curve for connection {conn:?}"))
        })?;
        let traffic_way = generate_traffic_way(
            conn.src_idx.0,
            conn.dst_idx.0,
            curve,
            flow.lane_count as usize,
            flow.flow,
            config,
        )?;
        Ok((conn, traffic_way))
    };

    #[cfg(feature = "parallel")]
    let pairs: Vec<NetworkResult<(ProbeConnection, TrafficWay)>> =
        connection_flows.par_iter().map(build_one).collect();
    #[cfg(not(feature = "parallel"))]
    let pairs: Vec<NetworkResult<(ProbeConnection, TrafficWay)>> =
        connection_flows.iter().map(build_one).collect();

    pairs.into_iter().collect()
}

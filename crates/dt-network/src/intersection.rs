//! Intersection IR builder.
//!
//! For every probe, orders its incident traffic ways counter-clockwise and
//! routes each inbound lane to an outbound way: a U-turn back the way it
//! came (always lane 0), plus a fan of forward/cross connections spread
//! evenly across whichever of {inbound lane count, outbound way count} is
//! smaller.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use dt_core::{PopulationProbe, ProbeConnection, ProbeIndex};

use crate::model::{Intersection, TrafficConnection, TrafficWay};

struct TrafficWayIo<'a> {
    inbound: Option<&'a TrafficWay>,
    outbound: Option<&'a TrafficWay>,
}

/// Per probe, per external neighbor, the inbound/outbound traffic ways
/// linking them — ordered counter-clockwise by `atan2(dir.y, dir.x)` (note
/// this is the opposite argument order from the intersection-area merge's
/// own polar ordering — see DESIGN.md).
fn compute_traffic_way_ios<'a>(
    probes: &[PopulationProbe],
    traffic_ways: &'a HashMap<ProbeConnection, TrafficWay>,
) -> Vec<Vec<TrafficWayIo<'a>>> {
    let mut probe_to_ios: Vec<HashMap<ProbeIndex, TrafficWayIo<'a>>> = (0..probes.len()).map(|_| HashMap::new()).collect();

    for (conn, traffic_way) in traffic_ways {
        probe_to_ios[conn.src_idx.index()]
            .entry(conn.dst_idx)
            .or_insert(TrafficWayIo { inbound: None, outbound: None })
            .outbound = Some(traffic_way);
        probe_to_ios[conn.dst_idx.index()]
            .entry(conn.src_idx)
            .or_insert(TrafficWayIo { inbound: None, outbound: None })
            .inbound = Some(traffic_way);
    }

    probe_to_ios
        .into_iter()
        .enumerate()
        .map(|(i, ios)| {
            let mut theta_and_ios: Vec<(f64, TrafficWayIo<'a>)> = ios
                .into_iter()
                .map(|(external_idx, io)| {
                    let dir = probes[external_idx.index()].location - probes[i].location;
                    (dir.y.atan2(dir.x), io)
                })
                .collect();
            theta_and_ios.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            theta_and_ios.into_iter().map(|(_, io)| io).collect()
        })
        .collect()
}

/// Every outbound way reachable from `inbound_idx` other than itself,
/// walked clockwise from `inbound_idx`: `(j-1) mod k` backwards to
/// `(j+1) mod k`.
fn collect_outbounds<'a>(inbound_idx: usize, ios: &[TrafficWayIo<'a>]) -> Vec<&'a TrafficWay> {
    let len = ios.len();
    let mut result = Vec::new();
    for k in 1..len {
        let idx = (inbound_idx + len - k) % len;
        if let Some(outbound) = ios[idx].outbound {
            result.push(outbound);
        }
    }
    result
}

fn round_half_up(x: f64) -> usize {
    (x + 0.5).floor() as usize
}

fn assign_connectivities(ios: &[TrafficWayIo<'_>]) -> Vec<TrafficConnection> {
    let mut connections = Vec::new();

    for (j, io) in ios.iter().enumerate() {
        let Some(inbound) = io.inbound else { continue };

        let exit_lane_count = inbound.exit_lane_indices.len();
        debug_assert!(exit_lane_count > 0);

        if let Some(outbound) = io.outbound {
            // U-turn: always lane 0.
            connections.push(TrafficConnection {
                inbound_traffic_way_id: inbound.id.clone(),
                inbound_lane_number: 0,
                outbound_traffic_way_id: outbound.id.clone(),
            });
        }

        let outbounds = collect_outbounds(j, ios);
        if outbounds.is_empty() {
            // Dead end.
            continue;
        }

        let outbound_stride = if outbounds.len() >= exit_lane_count {
            1.0
        } else {
            (outbounds.len() - 1) as f64 / (exit_lane_count - 1) as f64
        };
        let lane_stride = if exit_lane_count >= outbounds.len() {
            1.0
        } else {
            (exit_lane_count - 1) as f64 / (outbounds.len() - 1) as f64
        };

        let num_assignments = exit_lane_count.max(outbounds.len());
        for k in 0..num_assignments {
            let inbound_lane_number = round_half_up(k as f64 * lane_stride);
            let outbound = outbounds[round_half_up(k as f64 * outbound_stride)];

            connections.push(TrafficConnection {
                inbound_traffic_way_id: inbound.id.clone(),
                inbound_lane_number: inbound_lane_number as u32,
                outbound_traffic_way_id: outbound.id.clone(),
            });
        }
    }

    connections
}

/// Generate the intersection IR at every probe. Runs over a
/// thread pool when the `parallel` feature is enabled — each probe's
/// routing is independent of every other's.
pub fn generate_intersections(probes: &[PopulationProbe], traffic_ways: &HashMap<ProbeConnection, TrafficWay>) -> Vec<Intersection> {
    let probe_to_ios = compute_traffic_way_ios(probes, traffic_ways);

    let build_one = |(probe, ios): (&PopulationProbe, &Vec<TrafficWayIo<'_>>)| Intersection {
        center: probe.location,
        connections: assign_connectivities(ios),
    };

    #[cfg(feature = "parallel")]
    {
        probes.par_iter().zip(probe_to_ios.par_iter()).map(build_one).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        probes.iter().zip(probe_to_ios.iter()).map(build_one).collect()
    }
}

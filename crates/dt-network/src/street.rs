//! Street IR assembler.
//!
//! Pairs opposing directed traffic ways between the same probe pair into a
//! bidirectional `Street`. A connection with no reverse counterpart in the
//! flow set becomes a one-way street with a single traffic way.

use std::collections::HashMap;

use dt_core::ProbeConnection;
use dt_curves::CatmulRomCurve3;

use crate::model::{Street, TrafficWay};

/// Assemble streets from the traffic-way IR and the street curves they were
/// built from, keyed by the connection the street was first discovered at.
pub fn generate_streets(
    street_curves: &HashMap<ProbeConnection, CatmulRomCurve3>,
    traffic_ways: &HashMap<ProbeConnection, TrafficWay>,
) -> HashMap<ProbeConnection, Street> {
    let mut result: HashMap<ProbeConnection, Street> = HashMap::new();

    // Deterministic order: connections sorted by (src, dst) so output
    // doesn't depend on the traversal order of the backing hash maps.
    let mut connections: Vec<&ProbeConnection> = traffic_ways.keys().collect();
    connections.sort_by_key(|c| (c.src_idx.0, c.dst_idx.0));

    for &conn in &connections {
        let traffic_way = traffic_ways[conn].clone();
        let reverse = conn.reversed();

        if let Some(existing) = result.get_mut(&reverse) {
            existing.traffic_ways.push(traffic_way);
            continue;
        }

        let center_curve = street_curves[conn];
        result.insert(
            *conn,
            Street { center_curve, traffic_ways: vec![traffic_way] },
        );
    }

    result
}

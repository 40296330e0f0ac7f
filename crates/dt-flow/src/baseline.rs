//! `NearestNeighborOracle` — a reference baseline adapter.
//!
//! The real topology/flow solver (an iterative probe-graph optimization and
//! traffic simulation) lives outside this core entirely. This
//! adapter is a stand-in for testing and small examples: it connects each
//! probe to its `k` nearest neighbors and estimates flow with a simple
//! gravity model. It does **not** attempt to reproduce the original
//! solver's regularity/efficiency objective — `regularity_steps` and
//! `efficiency_steps` are accepted for contract compatibility and ignored.

use std::collections::HashSet;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use dt_core::{PopulationProbe, ProbeConnection, ProbeConnectionFlow, ProbeIndex};

use crate::oracle::{FlowOracle, TopologyOracle, TopologyResult};
use crate::FlowResult;

#[derive(Clone, Copy, Debug)]
struct ProbeEntry {
    xy: [f64; 2],
    index: usize,
}

impl RTreeObject for ProbeEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.xy)
    }
}

impl PointDistance for ProbeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.xy[0] - point[0];
        let dy = self.xy[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Connects each probe to its `k` nearest neighbors (capped by
/// `max_degree`), then estimates flow as a gravity model
/// (`pop200[src] * pop200[dst] / distance^2`), quantizing the flow
/// distribution into 4 lane-count buckets by percentile.
pub struct NearestNeighborOracle {
    pub k: usize,
    pub max_degree: usize,
}

impl Default for NearestNeighborOracle {
    fn default() -> Self {
        Self { k: 4, max_degree: 6 }
    }
}

impl TopologyOracle for NearestNeighborOracle {
    fn compute_topology(
        &self,
        probes: &[PopulationProbe],
        _regularity_steps: u32,
        _efficiency_steps: u32,
    ) -> FlowResult<TopologyResult> {
        if probes.is_empty() {
            return Ok(TopologyResult { connections: vec![], score: 0.0 });
        }

        let entries: Vec<ProbeEntry> = probes
            .iter()
            .enumerate()
            .map(|(index, p)| ProbeEntry { xy: [p.location.x, p.location.y], index })
            .collect();
        let tree = RTree::bulk_load(entries);

        let mut degree = vec![0usize; probes.len()];
        let mut seen_edges: HashSet<(usize, usize)> = HashSet::new();
        let mut connections = Vec::new();
        let mut total_inv_distance = 0.0;

        for (i, probe) in probes.iter().enumerate() {
            if degree[i] >= self.max_degree {
                continue;
            }
            let candidates = tree
                .nearest_neighbor_iter(&[probe.location.x, probe.location.y])
                .filter(|entry| entry.index != i)
                .take(self.k);

            for entry in candidates {
                let j = entry.index;
                if degree[i] >= self.max_degree || degree[j] >= self.max_degree {
                    continue;
                }
                let edge = (i.min(j), i.max(j));
                if !seen_edges.insert(edge) {
                    continue;
                }

                let dist = probe.location.distance(probes[j].location);
                if dist > 0.0 {
                    total_inv_distance += 1.0 / dist;
                }

                connections.push(ProbeConnection::new(ProbeIndex(i as u32), ProbeIndex(j as u32)));
                connections.push(ProbeConnection::new(ProbeIndex(j as u32), ProbeIndex(i as u32)));
                degree[i] += 1;
                degree[j] += 1;
            }
        }

        Ok(TopologyResult { connections, score: total_inv_distance })
    }
}

impl FlowOracle for NearestNeighborOracle {
    fn estimate(
        &self,
        probes: &[PopulationProbe],
        connections: &[ProbeConnection],
        _iteration_count: u32,
    ) -> FlowResult<Vec<ProbeConnectionFlow>> {
        if connections.is_empty() {
            return Ok(vec![]);
        }

        let mut raw_flows: Vec<f64> = connections
            .iter()
            .map(|c| {
                let src = &probes[c.src_idx.index()];
                let dst = &probes[c.dst_idx.index()];
                let dist = src.location.distance(dst.location).max(1.0);
                src.pop200 * dst.pop200 / (dist * dist)
            })
            .collect();

        let lane_counts = quantize_to_lane_counts(&raw_flows);

        let flows = connections
            .iter()
            .zip(raw_flows.drain(..))
            .zip(lane_counts)
            .map(|((&connection, flow), lane_count)| ProbeConnectionFlow { connection, flow, lane_count })
            .collect();

        Ok(flows)
    }
}

/// Quantize a flow distribution into lane counts `{1, 2, 3, 4}` by
/// percentile rank (quartiles of the sorted distribution).
fn quantize_to_lane_counts(flows: &[f64]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..flows.len()).collect();
    order.sort_by(|&a, &b| flows[a].partial_cmp(&flows[b]).unwrap());

    let n = flows.len();
    let mut lane_counts = vec![1u32; n];
    for (rank, &idx) in order.iter().enumerate() {
        let percentile = (rank + 1) as f64 / n as f64;
        lane_counts[idx] = if percentile <= 0.25 {
            1
        } else if percentile <= 0.5 {
            2
        } else if percentile <= 0.75 {
            3
        } else {
            4
        };
    }
    lane_counts
}

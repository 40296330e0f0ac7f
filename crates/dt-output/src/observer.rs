//! `GenerationObserver<W>` — bridges the generation pipeline's stage outputs
//! to an `OutputWriter`, and the row conversions it drives.

use std::collections::HashMap;

use dt_core::{PopulationProbe, ProbeConnection};
use dt_network::{Intersection, TrafficWay};

use crate::row::{ConnectionRow, ProbeRow, TrafficWayRow};
use crate::writer::OutputWriter;
use crate::OutputError;

fn probe_rows(probes: &[PopulationProbe]) -> Vec<ProbeRow> {
    probes
        .iter()
        .enumerate()
        .map(|(i, probe)| ProbeRow {
            index:   i as u32,
            x:       probe.location.x,
            y:       probe.location.y,
            z:       probe.location.z,
            pop200:  probe.pop200,
            pop1000: probe.pop1000,
        })
        .collect()
}

fn traffic_way_rows(traffic_ways: &HashMap<ProbeConnection, TrafficWay>) -> Vec<TrafficWayRow> {
    let mut conns: Vec<&ProbeConnection> = traffic_ways.keys().collect();
    conns.sort_by_key(|c| (c.src_idx.0, c.dst_idx.0));

    conns
        .into_iter()
        .map(|conn| {
            let way = &traffic_ways[conn];
            TrafficWayRow {
                id:              way.id.clone(),
                src_probe_index: conn.src_idx.0,
                dst_probe_index: conn.dst_idx.0,
                lane_count:      way.lane_count() as u32,
                flow_percentile: way.flow_percentile,
            }
        })
        .collect()
}

fn connection_rows(intersections: &[Intersection]) -> Vec<ConnectionRow> {
    intersections
        .iter()
        .enumerate()
        .flat_map(|(i, intersection)| {
            intersection.connections.iter().map(move |c| ConnectionRow {
                probe_index:             i as u32,
                inbound_traffic_way_id:  c.inbound_traffic_way_id.clone(),
                inbound_lane_number:     c.inbound_lane_number,
                outbound_traffic_way_id: c.outbound_traffic_way_id.clone(),
            })
        })
        .collect()
}

/// Drives an [`OutputWriter`] from the generation pipeline's stage outputs.
///
/// Errors from the writer are stored internally because the pipeline's
/// stage callbacks have no return value — check for errors with
/// [`take_error`][Self::take_error] once generation finishes.
pub struct GenerationObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> GenerationObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after generation finishes.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after generation).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    /// Called once the population sampler has produced every probe.
    pub fn on_probes_generated(&mut self, probes: &[PopulationProbe]) {
        let rows = probe_rows(probes);
        let result = self.writer.write_probes(&rows);
        self.store_err(result);
    }

    /// Called once the traffic-way IR builder has produced every way.
    pub fn on_traffic_ways_generated(&mut self, traffic_ways: &HashMap<ProbeConnection, TrafficWay>) {
        let rows = traffic_way_rows(traffic_ways);
        let result = self.writer.write_traffic_ways(&rows);
        self.store_err(result);
    }

    /// Called once the intersection IR builder has produced every probe's
    /// routing assignments.
    pub fn on_intersections_generated(&mut self, intersections: &[Intersection]) {
        let rows = connection_rows(intersections);
        let result = self.writer.write_connections(&rows);
        self.store_err(result);
    }

    /// Called once generation has finished, successfully or not.
    pub fn on_generation_end(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

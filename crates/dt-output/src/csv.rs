//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `probes.csv`
//! - `traffic_ways.csv`
//! - `connections.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ConnectionRow, OutputResult, ProbeRow, TrafficWayRow};

/// Writes generation output to three CSV files.
pub struct CsvWriter {
    probes:       Writer<File>,
    traffic_ways: Writer<File>,
    connections:  Writer<File>,
    finished:     bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut probes = Writer::from_path(dir.join("probes.csv"))?;
        probes.write_record(["index", "x", "y", "z", "pop200", "pop1000"])?;

        let mut traffic_ways = Writer::from_path(dir.join("traffic_ways.csv"))?;
        traffic_ways.write_record(["id", "src_probe_index", "dst_probe_index", "lane_count", "flow_percentile"])?;

        let mut connections = Writer::from_path(dir.join("connections.csv"))?;
        connections.write_record(["probe_index", "inbound_traffic_way_id", "inbound_lane_number", "outbound_traffic_way_id"])?;

        Ok(Self { probes, traffic_ways, connections, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_probes(&mut self, rows: &[ProbeRow]) -> OutputResult<()> {
        for row in rows {
            self.probes.write_record(&[
                row.index.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.pop200.to_string(),
                row.pop1000.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_traffic_ways(&mut self, rows: &[TrafficWayRow]) -> OutputResult<()> {
        for row in rows {
            self.traffic_ways.write_record(&[
                row.id.clone(),
                row.src_probe_index.to_string(),
                row.dst_probe_index.to_string(),
                row.lane_count.to_string(),
                row.flow_percentile.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()> {
        for row in rows {
            self.connections.write_record(&[
                row.probe_index.to_string(),
                row.inbound_traffic_way_id.clone(),
                row.inbound_lane_number.to_string(),
                row.outbound_traffic_way_id.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.probes.flush()?;
        self.traffic_ways.flush()?;
        self.connections.flush()?;
        Ok(())
    }
}

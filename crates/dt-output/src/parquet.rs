//! Parquet output backend (feature `parquet`).
//!
//! Creates three files in the configured output directory:
//! - `probes.parquet`
//! - `traffic_ways.parquet`
//! - `connections.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, StringBuilder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{ConnectionRow, OutputResult, ProbeRow, TrafficWayRow};

fn probe_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("index",   DataType::UInt32, false),
        Field::new("x",       DataType::Float64, false),
        Field::new("y",       DataType::Float64, false),
        Field::new("z",       DataType::Float64, false),
        Field::new("pop200",  DataType::Float64, false),
        Field::new("pop1000", DataType::Float64, false),
    ]))
}

fn traffic_way_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id",               DataType::Utf8, false),
        Field::new("src_probe_index",  DataType::UInt32, false),
        Field::new("dst_probe_index",  DataType::UInt32, false),
        Field::new("lane_count",       DataType::UInt32, false),
        Field::new("flow_percentile",  DataType::Float64, false),
    ]))
}

fn connection_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("probe_index",             DataType::UInt32, false),
        Field::new("inbound_traffic_way_id",  DataType::Utf8, false),
        Field::new("inbound_lane_number",     DataType::UInt32, false),
        Field::new("outbound_traffic_way_id", DataType::Utf8, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes generation output to three Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    probes:       Option<ArrowWriter<File>>,
    traffic_ways: Option<ArrowWriter<File>>,
    connections:  Option<ArrowWriter<File>>,
    probe_schema: Arc<Schema>,
    way_schema:   Arc<Schema>,
    conn_schema:  Arc<Schema>,
}

impl ParquetWriter {
    /// Create all three Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let probe_schema = probe_schema();
        let way_schema = traffic_way_schema();
        let conn_schema = connection_schema();

        let probes = ArrowWriter::try_new(
            File::create(dir.join("probes.parquet"))?,
            Arc::clone(&probe_schema),
            Some(snappy_props()),
        )?;
        let traffic_ways = ArrowWriter::try_new(
            File::create(dir.join("traffic_ways.parquet"))?,
            Arc::clone(&way_schema),
            Some(snappy_props()),
        )?;
        let connections = ArrowWriter::try_new(
            File::create(dir.join("connections.parquet"))?,
            Arc::clone(&conn_schema),
            Some(snappy_props()),
        )?;

        Ok(Self {
            probes: Some(probes),
            traffic_ways: Some(traffic_ways),
            connections: Some(connections),
            probe_schema,
            way_schema,
            conn_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_probes(&mut self, rows: &[ProbeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.probes.as_mut() else {
            return Ok(());
        };

        let mut indices  = UInt32Builder::new();
        let mut xs       = Float64Builder::new();
        let mut ys       = Float64Builder::new();
        let mut zs       = Float64Builder::new();
        let mut pop200s  = Float64Builder::new();
        let mut pop1000s = Float64Builder::new();

        for row in rows {
            indices.append_value(row.index);
            xs.append_value(row.x);
            ys.append_value(row.y);
            zs.append_value(row.z);
            pop200s.append_value(row.pop200);
            pop1000s.append_value(row.pop1000);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.probe_schema),
            vec![
                Arc::new(indices.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(zs.finish()),
                Arc::new(pop200s.finish()),
                Arc::new(pop1000s.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_traffic_ways(&mut self, rows: &[TrafficWayRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.traffic_ways.as_mut() else {
            return Ok(());
        };

        let mut ids   = StringBuilder::new();
        let mut srcs  = UInt32Builder::new();
        let mut dsts  = UInt32Builder::new();
        let mut lanes = UInt32Builder::new();
        let mut flows = Float64Builder::new();

        for row in rows {
            ids.append_value(&row.id);
            srcs.append_value(row.src_probe_index);
            dsts.append_value(row.dst_probe_index);
            lanes.append_value(row.lane_count);
            flows.append_value(row.flow_percentile);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.way_schema),
            vec![
                Arc::new(ids.finish()),
                Arc::new(srcs.finish()),
                Arc::new(dsts.finish()),
                Arc::new(lanes.finish()),
                Arc::new(flows.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.connections.as_mut() else {
            return Ok(());
        };

        let mut probe_indices = UInt32Builder::new();
        let mut inbound_ids   = StringBuilder::new();
        let mut inbound_lanes = UInt32Builder::new();
        let mut outbound_ids  = StringBuilder::new();

        for row in rows {
            probe_indices.append_value(row.probe_index);
            inbound_ids.append_value(&row.inbound_traffic_way_id);
            inbound_lanes.append_value(row.inbound_lane_number);
            outbound_ids.append_value(&row.outbound_traffic_way_id);
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.conn_schema),
            vec![
                Arc::new(probe_indices.finish()),
                Arc::new(inbound_ids.finish()),
                Arc::new(inbound_lanes.finish()),
                Arc::new(outbound_ids.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.probes.take() {
            w.close()?;
        }
        if let Some(w) = self.traffic_ways.take() {
            w.close()?;
        }
        if let Some(w) = self.connections.take() {
            w.close()?;
        }
        Ok(())
    }
}

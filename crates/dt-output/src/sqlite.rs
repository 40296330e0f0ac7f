//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `probes`, `traffic_ways`, and `connections`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ConnectionRow, OutputResult, ProbeRow, TrafficWayRow};

/// Writes generation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS probes (
                 idx      INTEGER PRIMARY KEY,
                 x        REAL NOT NULL,
                 y        REAL NOT NULL,
                 z        REAL NOT NULL,
                 pop200   REAL NOT NULL,
                 pop1000  REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS traffic_ways (
                 id               TEXT PRIMARY KEY,
                 src_probe_index  INTEGER NOT NULL,
                 dst_probe_index  INTEGER NOT NULL,
                 lane_count       INTEGER NOT NULL,
                 flow_percentile  REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS connections (
                 probe_index             INTEGER NOT NULL,
                 inbound_traffic_way_id  TEXT NOT NULL,
                 inbound_lane_number     INTEGER NOT NULL,
                 outbound_traffic_way_id TEXT NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_probes(&mut self, rows: &[ProbeRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO probes (idx, x, y, z, pop200, pop1000) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.index, row.x, row.y, row.z, row.pop200, row.pop1000])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_traffic_ways(&mut self, rows: &[TrafficWayRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO traffic_ways \
                 (id, src_probe_index, dst_probe_index, lane_count, flow_percentile) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.id,
                    row.src_probe_index,
                    row.dst_probe_index,
                    row.lane_count,
                    row.flow_percentile,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO connections \
                 (probe_index, inbound_traffic_way_id, inbound_lane_number, outbound_traffic_way_id) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.probe_index,
                    row.inbound_traffic_way_id,
                    row.inbound_lane_number,
                    row.outbound_traffic_way_id,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

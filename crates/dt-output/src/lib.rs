//! `dt-output` — generated street-network output writers.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                              |
//! |-----------|-------------|-------------------------------------------------------------|
//! | *(none)*  | CSV         | `probes.csv`, `traffic_ways.csv`, `connections.csv`        |
//! | `sqlite`  | SQLite      | `output.db`                                                |
//! | `parquet` | Parquet     | `probes.parquet`, `traffic_ways.parquet`, `connections.parquet` |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`GenerationObserver`], which adapts the pipeline's per-stage outputs
//! (`PopulationProbe`s, traffic ways, `Intersection`s) into writer calls.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dt_output::{CsvWriter, GenerationObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = GenerationObserver::new(writer);
//! obs.on_probes_generated(&probes);
//! obs.on_traffic_ways_generated(&traffic_ways);
//! obs.on_intersections_generated(&intersections);
//! obs.on_generation_end();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::GenerationObserver;
pub use row::{ConnectionRow, ProbeRow, TrafficWayRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;

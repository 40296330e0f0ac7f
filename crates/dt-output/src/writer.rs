//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ConnectionRow, OutputResult, ProbeRow, TrafficWayRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`GenerationObserver::take_error`].
///
/// [`GenerationObserver::take_error`]: crate::observer::GenerationObserver::take_error
pub trait OutputWriter {
    /// Write the population probes produced by the sampler.
    fn write_probes(&mut self, rows: &[ProbeRow]) -> OutputResult<()>;

    /// Write a batch of traffic ways produced by the lane-geometry builder.
    fn write_traffic_ways(&mut self, rows: &[TrafficWayRow]) -> OutputResult<()>;

    /// Write a batch of intersection lane connectivity rows.
    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

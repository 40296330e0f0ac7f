//! Fluent builder for constructing a [`CityGenerator`].

use dt_core::GenerationConfig;
use dt_flow::{FlowOracle, TopologyOracle};

use crate::generator::CityGenerator;

/// Fluent builder for [`CityGenerator<T, F>`].
///
/// # Required inputs
///
/// - `T: TopologyOracle` — the probe-graph connectivity solver
/// - `F: FlowOracle` — the per-connection flow/lane-count estimator
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                              |
/// |---------------|---------------------------------------|
/// | `.config(c)`  | `GenerationConfig::default()` (5 km city, seed 13) |
///
/// # Example
///
/// ```rust,ignore
/// use dt_citygen::CityGenBuilder;
/// use dt_core::GenerationConfig;
/// use dt_flow::NearestNeighborOracle;
///
/// let generator = CityGenBuilder::new(NearestNeighborOracle::default(), NearestNeighborOracle::default())
///     .config(GenerationConfig::new(5_000.0))
///     .build();
/// ```
pub struct CityGenBuilder<T: TopologyOracle, F: FlowOracle> {
    config: Option<GenerationConfig>,
    topology_oracle: T,
    flow_oracle: F,
}

impl<T: TopologyOracle, F: FlowOracle> CityGenBuilder<T, F> {
    /// Create a builder with both required oracles.
    pub fn new(topology_oracle: T, flow_oracle: F) -> Self {
        Self { config: None, topology_oracle, flow_oracle }
    }

    /// Supply the generation config. If not called, `GenerationConfig::default()` is used.
    pub fn config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ready-to-run [`CityGenerator`].
    pub fn build(self) -> CityGenerator<T, F> {
        let config = self.config.unwrap_or_default();
        CityGenerator::new(config, self.topology_oracle, self.flow_oracle)
    }
}

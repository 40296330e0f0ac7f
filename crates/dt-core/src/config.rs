//! Tunable parameters for a generation run.
//!
//! Every tunable constant — population-sampler defaults, lane/intersection
//! geometry constants, and flow-oracle iteration counts — is collected here
//! so a caller can override any of them without touching the stage
//! implementations.

/// Top-level configuration for one generation run.
///
/// Construct with `GenerationConfig::new(city_size)` to get the full set
/// of defaults, or build one with struct-update syntax to override individual
/// fields:
///
/// ```
/// use dt_core::GenerationConfig;
///
/// let config = GenerationConfig {
///     seed: 42,
///     ..GenerationConfig::new(5_000.0)
/// };
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationConfig {
    /// Side length of the (square) city area, in meters.
    pub city_size: f64,
    /// Master RNG seed.  Default: 13.
    pub seed: u64,

    /// Lane width in meters.  Default: 3.85.
    pub lane_width: f64,
    /// Scales the widest incident street's half-width into an
    /// intersection-area radius.  Default: 1.0 — the scenario S4 pinned
    /// values (and `original_source/procedural/street/intersection_area_test.py`)
    /// both require an effective scaling of 1.0, not the 1.5 spec.md's prose
    /// names; the pinned numbers are ground truth here.
    pub intersection_area_scaling_factor: f64,
    /// Length (meters) of solid lane-boundary marking kept before an
    /// intersection, on each end of an interior boundary's dashed window.
    /// Not derived from any other constant; the numeric value is an
    /// editorial choice — see DESIGN.md.
    pub solid_line_length_before_intersection: f64,

    /// Iteration budget handed to `TopologyOracle::compute_topology`.
    /// Default: 2e7.
    pub regularity_optimization_steps: u32,
    /// Iteration budget handed to the efficiency pass of the topology
    /// solver.  Default: 0 — efficiency optimization is disabled by
    /// default.
    pub efficiency_optimization_steps: u32,
    /// Iteration budget handed to `FlowOracle::estimate`'s convergence loop.
    /// Default: 1000, an editorial choice — see DESIGN.md; a baseline,
    /// non-iterative adapter may ignore it entirely.
    pub flow_iteration_count: u32,

    /// Area (m²) assigned to one city core.  Default: 7e6.
    pub sqm_per_core: f64,
    /// Probes sampled per square meter of city area.  Default: 30e-6.
    pub probes_per_sqm: f64,
    /// Side length (m) of the grid probes are snapped to.  Default: 200.
    pub grid: f64,
    /// Assumed residents represented by one probe.  Default: 6.7.
    pub persons_per_probe: f64,
    /// Base (non-core) population density, persons/m².  Default: 4.6e-3.
    pub base_pop_per_sqm: f64,
}

impl GenerationConfig {
    /// Construct the full set of defaults for the given city size.
    pub fn new(city_size: f64) -> Self {
        Self {
            city_size,
            seed: 13,
            lane_width: 3.85,
            intersection_area_scaling_factor: 1.0,
            solid_line_length_before_intersection: 15.0,
            regularity_optimization_steps: 20_000_000,
            efficiency_optimization_steps: 0,
            flow_iteration_count: 1_000,
            sqm_per_core: 7.0e6,
            probes_per_sqm: 30.0e-6,
            grid: 200.0,
            persons_per_probe: 6.7,
            base_pop_per_sqm: 4.6e-3,
        }
    }
}

impl Default for GenerationConfig {
    /// Defaults to a 5 km square city — a convenient mid-size run; there
    /// is no canonical default since every run requires a `city_size`.
    fn default() -> Self {
        Self::new(5_000.0)
    }
}

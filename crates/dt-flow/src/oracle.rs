//! `TopologyOracle` / `FlowOracle` — the external collaborator contract.
//!
//! The real topology/flow solver (probe-graph optimization plus an
//! iterative flow simulation) is out of this core's scope: it is an
//! external oracle the generator calls and blocks on, synchronously and
//! without a timeout. These traits pin the call signature; `dt-citygen` is
//! generic over both so a caller can plug in the real solver without
//! touching the rest of the pipeline.

use dt_core::{PopulationProbe, ProbeConnection, ProbeConnectionFlow};

use crate::FlowResult;

/// The result of a topology optimization pass: a connection set
/// plus the solver's own regularity/efficiency score.
#[derive(Clone, Debug)]
pub struct TopologyResult {
    pub connections: Vec<ProbeConnection>,
    pub score: f64,
}

/// Computes which probes should be connected.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` — `dt-citygen` may hold the oracle
/// behind a shared reference while other pipeline stages run.
pub trait TopologyOracle: Send + Sync {
    /// Optimize a probe graph's connectivity.
    ///
    /// `regularity_steps`/`efficiency_steps` are iteration budgets handed to
    /// the solver's two optimization passes; a baseline,
    /// non-iterative adapter may ignore them.
    fn compute_topology(
        &self,
        probes: &[PopulationProbe],
        regularity_steps: u32,
        efficiency_steps: u32,
    ) -> FlowResult<TopologyResult>;
}

/// Estimates per-connection flow and lane counts.
pub trait FlowOracle: Send + Sync {
    /// Estimate flow and required lane count for each directed connection.
    ///
    /// `iteration_count` is the solver's convergence budget; a
    /// baseline, closed-form adapter may ignore it.
    fn estimate(
        &self,
        probes: &[PopulationProbe],
        connections: &[ProbeConnection],
        iteration_count: u32,
    ) -> FlowResult<Vec<ProbeConnectionFlow>>;
}

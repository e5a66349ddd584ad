//! Run configuration and the sweep entry point
//!
//! A run is: build a node set and a seed queue, construct a fresh
//! [`Explorer`], dive from depth 0, and hand back the final statistics.
//! All working state (mirror set, counters, path) is owned by the run
//! invocation; two runs never share anything.

use serde::{Deserialize, Serialize};
use tracing::info;

use ballot_core::{BallotError, NodeIndex, PendingMessage, ProtocolNode, Result};

use crate::explorer::Explorer;
use crate::report::SweepReport;

/// Parameters of one exploration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of federated (leader) nodes
    pub federated: usize,
    /// Number of auditor (volunteer) candidates
    pub auditors: usize,
    /// Depth bound: branches are truncated once this many messages have
    /// been delivered
    pub depth_limit: usize,
    /// Depth past which mirror detection kicks in
    pub mirror_warmup: usize,
    /// Checkpoint depth at which bounded branches are classified as loops
    /// or failures
    pub loop_check_depth: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            federated: 4,
            auditors: 5,
            depth_limit: 90,
            mirror_warmup: 4,
            loop_check_depth: 9,
        }
    }
}

impl SweepConfig {
    /// Reject configurations the explorer cannot run against
    pub fn validate(&self) -> Result<()> {
        if self.federated == 0 {
            return Err(BallotError::config("at least one federated node is required"));
        }
        if self.auditors == 0 {
            return Err(BallotError::config("at least one auditor is required"));
        }
        if self.depth_limit == 0 {
            return Err(BallotError::config("depth limit must be at least 1"));
        }
        Ok(())
    }
}

/// Build the standard seed queue: one announcement per (node, volunteer)
/// pair, volunteers outermost.
pub fn seed_queue<M: Clone>(
    federated: usize,
    volunteers: impl IntoIterator<Item = M>,
) -> Vec<PendingMessage<M>> {
    let mut queue = Vec::new();
    for v in volunteers {
        for i in 0..federated {
            queue.push(PendingMessage::new(NodeIndex(i), v.clone()));
        }
    }
    queue
}

/// Run one exhaustive exploration and return the aggregated report.
///
/// `nodes` must match `config.federated`; the node set's cardinality is
/// fixed for the whole run. The nodes are consumed: the explorer mutates
/// them freely and they carry no meaning once the search finishes.
pub fn run_sweep<N: ProtocolNode>(
    config: &SweepConfig,
    mut nodes: Vec<N>,
    seed: Vec<PendingMessage<N::Msg>>,
) -> Result<SweepReport> {
    config.validate()?;
    if nodes.len() != config.federated {
        return Err(BallotError::config(format!(
            "node set has {} nodes, config says {}",
            nodes.len(),
            config.federated
        )));
    }

    info!(
        federated = config.federated,
        auditors = config.auditors,
        depth_limit = config.depth_limit,
        seed_len = seed.len(),
        "starting sweep"
    );

    let mut explorer: Explorer<N> = Explorer::new(config.clone());
    explorer.dive(&seed, &mut nodes, 0)?;

    let distinct_states = explorer.mirror_count();
    let stats = explorer.into_stats();
    info!(
        solutions = stats.solutions,
        failures = stats.failures,
        mirrors = stats.mirrors,
        loops = stats.loops,
        safety_violations = stats.safety_violations,
        distinct_states,
        "sweep finished"
    );

    Ok(SweepReport {
        config: config.clone(),
        stats,
    })
}

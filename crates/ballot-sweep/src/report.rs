//! End-of-run report formatting
//!
//! A [`SweepReport`] is the read-only snapshot a finished run hands back:
//! the configuration it ran with plus the final statistics. `Display`
//! renders the human-readable summary; the whole report also serializes
//! to JSON for tooling.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::run::SweepConfig;
use crate::stats::SweepStats;

/// Final snapshot of one exploration run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Configuration the run used
    pub config: SweepConfig,
    /// Aggregated statistics
    pub stats: SweepStats,
}

impl SweepReport {
    /// JSON form of the full report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Histogram entries per printed row
const COLUMNS: usize = 16;

fn write_histogram(f: &mut fmt::Formatter<'_>, name: &str, counts: &[u64]) -> fmt::Result {
    writeln!(f, "= {name}")?;
    if counts.is_empty() {
        return writeln!(f, "=     none found");
    }
    for (row, chunk) in counts.chunks(COLUMNS).enumerate() {
        write!(f, "=")?;
        for (col, v) in chunk.iter().enumerate() {
            let cell = format!("{v}[{}]", row * COLUMNS + col);
            write!(f, " {cell:>12}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.stats;
        writeln!(
            f,
            "=============== {} feds, {} auds, depth limit {} ===============",
            self.config.federated, self.config.auditors, self.config.depth_limit
        )?;
        writeln!(f, "= solutions         {:>12}", s.solutions)?;
        writeln!(f, "= failures          {:>12}", s.failures)?;
        writeln!(f, "= mirrors           {:>12}", s.mirrors)?;
        writeln!(f, "= loops             {:>12}", s.loops)?;
        writeln!(f, "= limit hits        {:>12}", s.limit_hits)?;
        writeln!(f, "= safety violations {:>12}", s.safety_violations)?;
        writeln!(f, "= breadth           {:>12}", s.breadth)?;
        writeln!(f, "= executions        {:>12}", s.executions)?;
        writeln!(f, "= max depth         {:>12}", s.max_depth)?;
        write_histogram(f, "winning volunteers", &s.winners)?;
        write_histogram(f, "dead messages", &s.dead_messages_at)?;
        write_histogram(f, "mirrors", &s.mirrors_at)?;
        write_histogram(f, "solutions", &s.solutions_at)?;
        write_histogram(f, "failures", &s.failures_at)?;
        write_histogram(f, "depth visits", &s.depth_visits)?;
        Ok(())
    }
}

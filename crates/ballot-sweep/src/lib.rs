//! # Ballot Sweep - Exhaustive Election Model Checker
//!
//! Drives a leader-election state machine through every reachable ordering
//! of in-flight messages, up to a bounded depth, to find safety violations
//! (two nodes committing to different outcomes), detect non-terminating
//! loops, and measure how quickly the protocol converges.
//!
//! ## Architecture
//!
//! - **shuffle**: deterministic transposition shuffle that varies the
//!   exploration order reproducibly
//! - **oracle**: quorum and disagreement detection over the node set
//! - **mirror**: canonical-state deduplication so structurally equivalent
//!   global states are expanded once
//! - **stats**: depth-indexed histograms and run-wide counters
//! - **explorer**: the recursive depth-first search with exact backtracking
//! - **run**: configuration and the single run-a-sweep entry point
//! - **report**: end-of-run summary formatting
//! - **model**: a built-in vote-counting node model used by the CLI binary
//!   and the integration tests
//!
//! The search is single-threaded and fully sequential: backtracking
//! correctness depends on exact save/restore of mutable node state around
//! each recursive call. The protocol logic itself lives behind the
//! [`ballot_core::ProtocolNode`] trait and is not this crate's concern.

#![forbid(unsafe_code)]

pub mod explorer;
pub mod mirror;
pub mod model;
pub mod oracle;
pub mod report;
pub mod run;
pub mod shuffle;
pub mod stats;

pub use explorer::{Explorer, Outcome};
pub use mirror::{MirrorKey, MirrorSet};
pub use oracle::Verdict;
pub use report::SweepReport;
pub use run::{run_sweep, seed_queue, SweepConfig};
pub use stats::SweepStats;

// Re-export the interface layer so callers need a single import.
pub use ballot_core::{
    BallotError, DecisionValue, NodeIndex, PendingMessage, ProtocolNode, Result, Step,
};

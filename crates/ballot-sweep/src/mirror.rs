//! Canonical-state deduplication (mirror detection)
//!
//! Two branches of the search frequently arrive at the same global state
//! through different delivery orders. Re-expanding such a state repeats
//! work exponentially, so each visited global state is fingerprinted and
//! skipped on re-visit.
//!
//! The key is label-insensitive: each node's canonical state is digested,
//! the digests are sorted, and the sorted concatenation is digested again.
//! Two node sets that differ only in node labeling therefore produce the
//! same key.
//!
//! The set is constructed fresh per run and only grows; the single
//! exploration thread owns it, so no synchronization is involved.

use std::collections::HashSet;

use ballot_core::hash::{self, Digest32};
use ballot_core::{BallotError, ProtocolNode, Result};

/// Fixed-length fingerprint of one global state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MirrorKey(Digest32);

impl MirrorKey {
    /// Hex form for logs
    pub fn to_hex(&self) -> String {
        hash::to_hex(&self.0)
    }
}

/// Grow-only set of all global states visited this run
#[derive(Debug, Default)]
pub struct MirrorSet {
    seen: HashSet<Digest32>,
}

impl MirrorSet {
    /// Empty set for a fresh run
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint the current node set.
    ///
    /// An empty canonical state means the node implementation under test is
    /// broken; that is a fatal invariant violation, not a search outcome.
    pub fn key_for<N: ProtocolNode>(nodes: &[N]) -> Result<MirrorKey> {
        let mut digests: Vec<Digest32> = Vec::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            let canon = node.canonical_state()?;
            if canon.is_empty() {
                return Err(BallotError::invariant(format!(
                    "node {i} returned an empty canonical state"
                )));
            }
            digests.push(hash::hash(&canon));
        }
        digests.sort_unstable();

        let mut h = hash::hasher();
        for d in &digests {
            h.update(d);
        }
        Ok(MirrorKey(h.finalize()))
    }

    /// Insert a key; returns true if it was not already present.
    pub fn insert(&mut self, key: MirrorKey) -> bool {
        self.seen.insert(key.0)
    }

    /// Membership test without insertion
    pub fn contains(&self, key: &MirrorKey) -> bool {
        self.seen.contains(&key.0)
    }

    /// Number of distinct global states recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True when no state has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

//! The recursive explorer
//!
//! Depth-first enumeration of every message delivery order. Each frame
//! picks one pending message, clones the targeted node, executes the
//! message against it, recurses on the reduced-and-extended queue, and
//! restores the node from the clone before trying the next candidate.
//! Backtracking must be exact: after a frame returns, every node holds the
//! state it had when the frame was entered.
//!
//! Depth accounting: a frame's depth is the number of messages delivered
//! on the branch so far, and every statistic the frame records is indexed
//! by that depth. The frame entered after delivering the first message
//! runs at depth 1.
//!
//! Branch classification:
//! - the safety oracle reports quorum with agreement: a solution leaf;
//! - the oracle reports disagreement: counted, and exploration continues,
//!   because a violation is a finding rather than a terminal state;
//! - a previously visited global state: a mirror, credited as a success
//!   path on the assumption that success is reachable from any reachable
//!   state (a documented heuristic, see `SweepConfig::mirror_warmup`);
//! - depth bound exceeded: a limit-hit, folded into loop/failure
//!   accounting at the loop-check depth;
//! - every pending message dead: a true dead end, a failure.

use tracing::{debug, warn};

use ballot_core::{NodeIndex, PendingMessage, ProtocolNode, Result};

use crate::mirror::MirrorSet;
use crate::oracle;
use crate::run::SweepConfig;
use crate::shuffle::deterministic_shuffle;
use crate::stats::SweepStats;

/// Aggregate result of one explored frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Some branch below this frame was truncated at the depth bound
    pub limit_hit: bool,
    /// Every pending message was dead: nothing could make progress
    pub leaf: bool,
    /// Some branch below this frame produced a solution (or mirrored a
    /// state already credited with one)
    pub saw_success: bool,
}

impl Outcome {
    const LIMIT: Self = Self {
        limit_hit: true,
        leaf: false,
        saw_success: false,
    };

    const SOLUTION: Self = Self {
        limit_hit: false,
        leaf: true,
        saw_success: true,
    };

    const MIRROR: Self = Self {
        limit_hit: false,
        leaf: false,
        saw_success: true,
    };
}

/// One exploration run's working state
///
/// Owns the mirror set, the statistics, and the diagnostic delivery path.
/// Constructed fresh per run; nothing here outlives the run that made it.
pub struct Explorer<N: ProtocolNode> {
    config: SweepConfig,
    mirrors: MirrorSet,
    stats: SweepStats,
    path: Vec<PendingMessage<N::Msg>>,
}

impl<N: ProtocolNode> Explorer<N> {
    /// Fresh explorer for one run
    pub fn new(config: SweepConfig) -> Self {
        Self {
            config,
            mirrors: MirrorSet::new(),
            stats: SweepStats::new(),
            path: Vec::new(),
        }
    }

    /// Statistics accumulated so far
    pub fn stats(&self) -> &SweepStats {
        &self.stats
    }

    /// Consume the explorer, yielding the final statistics
    pub fn into_stats(self) -> SweepStats {
        self.stats
    }

    /// Distinct global states recorded by the mirror detector
    pub fn mirror_count(&self) -> usize {
        self.mirrors.len()
    }

    /// Explore every delivery order of `queue` against `nodes`.
    ///
    /// `depth` is the number of messages already delivered on this branch;
    /// the top-level call passes 0. Nodes are mutated during the call and
    /// restored exactly before it returns.
    pub fn dive(
        &mut self,
        queue: &[PendingMessage<N::Msg>],
        nodes: &mut [N],
        depth: usize,
    ) -> Result<Outcome> {
        self.stats.record_depth_visit(depth);

        if depth >= self.config.depth_limit {
            self.stats.record_limit_hit();
            return Ok(Outcome::LIMIT);
        }

        let verdict = oracle::check(nodes);
        if let Some(violation) = verdict.violation {
            // A finding, not a terminal state: count it and keep searching.
            self.stats.record_safety_violation();
            warn!(depth, delivered = self.path.len(), %violation, "safety violation");
        } else if verdict.quorum {
            let winner = nodes
                .iter()
                .find_map(|n| n.decision())
                .map_or(0, |d| d.get());
            self.stats.record_solution(depth, winner);
            debug!(depth, winner, "solution");
            return Ok(Outcome::SOLUTION);
        }

        // Mirror detection only past the warm-up depth: shallow states are
        // cheap to expand and seeding them would bloat the set.
        if depth >= self.config.mirror_warmup {
            let key = MirrorSet::key_for(nodes)?;
            if !self.mirrors.insert(key) {
                self.stats.record_mirror(depth);
                return Ok(Outcome::MIRROR);
            }
        }

        let mut out = Outcome {
            limit_hit: false,
            leaf: true,
            saw_success: false,
        };

        // The shuffled copy is the sequence we both iterate and remove
        // from; the original queue is never indexed with a permuted
        // position.
        let mut shuffled = queue.to_vec();
        deterministic_shuffle(&mut shuffled);

        for pick in 0..shuffled.len() {
            let target = shuffled[pick].target.get();
            let saved = nodes[target].clone();

            self.stats.record_execution();
            let step = nodes[target].execute(&shuffled[pick].payload, depth);

            if step.changed {
                out.leaf = false;
                self.path.push(shuffled[pick].clone());

                let mut next: Vec<PendingMessage<N::Msg>> =
                    Vec::with_capacity(shuffled.len() + nodes.len());
                next.extend_from_slice(&shuffled[..pick]);
                next.extend_from_slice(&shuffled[pick + 1..]);
                if let Some(follow) = step.produced {
                    // Broadcast semantics: one copy per *other* node.
                    for (i, _) in nodes.iter().enumerate() {
                        if i != target {
                            next.push(PendingMessage::new(NodeIndex(i), follow.clone()));
                        }
                    }
                }

                let sub = self.dive(&next, nodes, depth + 1)?;
                out.limit_hit |= sub.limit_hit;
                out.saw_success |= sub.saw_success;

                self.path.pop();
            } else {
                self.stats.record_dead_message(depth);
            }

            // Exact restoration, whether or not the delivery branched.
            nodes[target] = saved;
        }

        if out.limit_hit {
            out.leaf = false;
            if depth == self.config.loop_check_depth {
                // Checkpoint: a bounded branch that still saw success below
                // it is a resolvable cycle; one that never did is a failure.
                // Either way the limit flag is absorbed here.
                if out.saw_success {
                    self.stats.record_loop();
                } else {
                    self.stats.record_unresolved_loop();
                }
                out.limit_hit = false;
            }
        } else if out.leaf {
            // No pending message changed any state: a true dead end.
            self.stats.record_dead_end(depth);
            out.leaf = false;
        }

        Ok(out)
    }
}

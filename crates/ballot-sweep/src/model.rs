//! Built-in vote-counting node model
//!
//! A small, self-contained election state machine used by the CLI binary
//! and the integration tests to exercise the explorer. Each node endorses
//! the highest-priority volunteer it has heard of, broadcasts its vote,
//! and commits once it has seen a strict majority of votes for one
//! priority. It is deliberately simple: just enough behavior to produce
//! real branching, convergence, and mirrors. It is *not* the production
//! election algorithm.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use ballot_core::{DecisionValue, NodeIndex, ProtocolNode, Result, Step};

/// Messages the model nodes exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelMsg {
    /// A volunteer announcing its candidacy
    Volunteer {
        /// The candidate's priority (also its decision value)
        priority: u32,
    },
    /// A leader endorsing a candidate
    Vote {
        /// The endorsing leader
        voter: NodeIndex,
        /// The endorsed candidate's priority
        priority: u32,
    },
}

impl fmt::Display for ModelMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volunteer { priority } => write!(f, "volunteer({priority})"),
            Self::Vote { voter, priority } => write!(f, "vote({voter}, {priority})"),
        }
    }
}

/// One simulated leader running the vote-counting model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNode {
    index: NodeIndex,
    total: usize,
    /// Highest priority endorsed so far
    best: Option<u32>,
    /// Votes seen per priority, own vote included
    ballots: BTreeMap<u32, BTreeSet<usize>>,
    committed: bool,
    decision: Option<DecisionValue>,
}

impl ModelNode {
    /// Node `index` of a set of `total` leaders
    pub fn new(index: NodeIndex, total: usize) -> Self {
        Self {
            index,
            total,
            best: None,
            ballots: BTreeMap::new(),
            committed: false,
            decision: None,
        }
    }

    fn majority(&self) -> usize {
        self.total / 2 + 1
    }

    /// Commit if any priority has majority support; prefer the highest.
    fn try_commit(&mut self) {
        let majority = self.majority();
        let winner = self
            .ballots
            .iter()
            .rev()
            .find(|(_, voters)| voters.len() >= majority)
            .map(|(p, _)| *p);
        if let Some(p) = winner {
            self.committed = true;
            self.decision = Some(DecisionValue(p));
        }
    }

    /// Endorse `priority`: record the own vote and broadcast it.
    fn endorse(&mut self, priority: u32) -> ModelMsg {
        self.best = Some(priority);
        self.ballots
            .entry(priority)
            .or_default()
            .insert(self.index.get());
        ModelMsg::Vote {
            voter: self.index,
            priority,
        }
    }
}

impl ProtocolNode for ModelNode {
    type Msg = ModelMsg;

    fn execute(&mut self, msg: &ModelMsg, _depth: usize) -> Step<ModelMsg> {
        if self.committed {
            // Terminal: a committed node ignores everything.
            return Step::dead();
        }

        match *msg {
            ModelMsg::Volunteer { priority } => {
                if self.best.is_some_and(|b| b >= priority) {
                    return Step::dead();
                }
                let vote = self.endorse(priority);
                self.try_commit();
                Step::broadcast(vote)
            }
            ModelMsg::Vote { voter, priority } => {
                let recorded = self
                    .ballots
                    .entry(priority)
                    .or_default()
                    .insert(voter.get());
                let upgraded = self.best.map_or(true, |b| priority > b);

                if !recorded && !upgraded {
                    return Step::dead();
                }

                let follow = upgraded.then(|| self.endorse(priority));
                self.try_commit();
                match follow {
                    Some(vote) => Step::broadcast(vote),
                    None => Step::advanced(),
                }
            }
        }
    }

    fn committed(&self) -> bool {
        self.committed
    }

    fn decision(&self) -> Option<DecisionValue> {
        self.decision
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        // Leading version byte keeps the buffer non-empty by construction.
        let mut out = vec![1u8, u8::from(self.committed)];
        push_u32(&mut out, self.decision.map_or(u32::MAX, |d| d.get()));
        push_u32(&mut out, self.best.map_or(u32::MAX, |b| b));
        for (priority, voters) in &self.ballots {
            push_u32(&mut out, *priority);
            push_u32(&mut out, voters.len() as u32);
            for v in voters {
                push_u32(&mut out, *v as u32);
            }
        }
        Ok(out)
    }
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Build the fixed node set for a run
pub fn make_nodes(federated: usize) -> Vec<ModelNode> {
    (0..federated)
        .map(|i| ModelNode::new(NodeIndex(i), federated))
        .collect()
}

/// One announcement per volunteer, priorities `0..auditors`
pub fn volunteer_announcements(auditors: usize) -> Vec<ModelMsg> {
    (0..auditors)
        .map(|priority| ModelMsg::Volunteer {
            priority: priority as u32,
        })
        .collect()
}

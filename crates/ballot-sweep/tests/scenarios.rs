//! End-to-end explorer scenarios with hand-built stub nodes
//!
//! Each stub implements just enough of the node interface to force the
//! explorer down one classification path: immediate convergence, total
//! dead ends, partial quorum, disagreeing commits, and mirror collapse.

use ballot_core::{DecisionValue, NodeIndex, PendingMessage, ProtocolNode, Result, Step};
use ballot_sweep::{run_sweep, BallotError, Explorer, SweepConfig};

fn config(federated: usize, depth_limit: usize) -> SweepConfig {
    SweepConfig {
        federated,
        auditors: 1,
        depth_limit,
        ..SweepConfig::default()
    }
}

fn seed<M: Clone>(payload: M, nodes: usize) -> Vec<PendingMessage<M>> {
    (0..nodes)
        .map(|i| PendingMessage::new(NodeIndex(i), payload.clone()))
        .collect()
}

/// Commits with a fixed decision value on the first delivery.
#[derive(Debug, Clone)]
struct InstantCommit {
    committed: bool,
}

impl InstantCommit {
    fn new() -> Self {
        Self { committed: false }
    }
}

impl ProtocolNode for InstantCommit {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, _depth: usize) -> Step<Self::Msg> {
        if self.committed {
            return Step::dead();
        }
        self.committed = true;
        Step::advanced()
    }

    fn committed(&self) -> bool {
        self.committed
    }

    fn decision(&self) -> Option<DecisionValue> {
        self.committed.then_some(DecisionValue(0))
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![1, u8::from(self.committed)])
    }
}

#[test]
fn single_node_converges_after_one_message() {
    let report = run_sweep(
        &config(1, 5),
        vec![InstantCommit::new()],
        seed("volunteer", 1),
    )
    .unwrap();

    let s = &report.stats;
    assert_eq!(s.solutions, 1);
    assert_eq!(s.solutions_at, vec![0, 1]);
    assert_eq!(s.failures, 0);
    assert_eq!(s.mirrors, 0);
    assert_eq!(s.breadth, 1);
    assert_eq!(s.executions, 1);
    assert_eq!(s.depth_visits, vec![1, 1]);
    assert_eq!(s.winners, vec![1]);
}

/// Never changes state: every message is dead.
#[derive(Debug, Clone)]
struct Inert;

impl ProtocolNode for Inert {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, _depth: usize) -> Step<Self::Msg> {
        Step::dead()
    }

    fn committed(&self) -> bool {
        false
    }

    fn decision(&self) -> Option<DecisionValue> {
        None
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![1])
    }
}

#[test]
fn all_dead_messages_is_a_single_dead_end() {
    let report = run_sweep(&config(3, 5), vec![Inert; 3], seed("volunteer", 3)).unwrap();

    let s = &report.stats;
    assert_eq!(s.solutions, 0);
    assert_eq!(s.failures, 1, "one dead end at the root");
    assert_eq!(s.failures_at, vec![1]);
    assert_eq!(s.dead_messages_at, vec![3]);
    assert_eq!(s.executions, 3);
    assert_eq!(s.limit_hits, 0);
}

/// Node 0 commits whenever its seed arrives; node 1 only if its seed is
/// the very first delivery; node 2 never. All committed nodes agree on 7,
/// so paths that commit two nodes reach quorum and the rest get stuck.
#[derive(Debug, Clone)]
struct OrderSensitive {
    index: usize,
    committed: bool,
}

impl ProtocolNode for OrderSensitive {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, depth: usize) -> Step<Self::Msg> {
        if self.committed {
            return Step::dead();
        }
        let commits = match self.index {
            0 => true,
            1 => depth == 0,
            _ => false,
        };
        if !commits {
            return Step::dead();
        }
        self.committed = true;
        Step::advanced()
    }

    fn committed(&self) -> bool {
        self.committed
    }

    fn decision(&self) -> Option<DecisionValue> {
        self.committed.then_some(DecisionValue(7))
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![1, u8::from(self.committed), self.index as u8])
    }
}

#[test]
fn partial_quorum_paths_fail_and_full_quorum_paths_solve() {
    let nodes: Vec<_> = (0..3)
        .map(|index| OrderSensitive {
            index,
            committed: false,
        })
        .collect();
    let report = run_sweep(&config(3, 10), nodes, seed("seed", 3)).unwrap();

    let s = &report.stats;
    // One ordering commits node 1 first and node 0 second: quorum of 2
    // observed after two deliveries.
    assert_eq!(s.solutions, 1);
    assert_eq!(s.solutions_at, vec![0, 0, 1]);
    assert_eq!(s.winners.len(), 8);
    assert_eq!(s.winners[7], 1);
    // The ordering that commits node 0 first strands the branch at one
    // committed node: a leaf, a failure.
    assert_eq!(s.failures, 1);
    assert_eq!(s.failures_at, vec![0, 1]);
    assert_eq!(s.safety_violations, 0);
    assert_eq!(s.dead_messages_at, vec![1, 3]);
    assert_eq!(s.executions, 7);
}

/// Deliberately broken: nodes 0 and 1 commit to their own index as the
/// decision value, so any branch that commits both disagrees.
#[derive(Debug, Clone)]
struct SplitBrain {
    index: usize,
    committed: bool,
}

impl ProtocolNode for SplitBrain {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, _depth: usize) -> Step<Self::Msg> {
        if self.committed || self.index == 2 {
            return Step::dead();
        }
        self.committed = true;
        Step::advanced()
    }

    fn committed(&self) -> bool {
        self.committed
    }

    fn decision(&self) -> Option<DecisionValue> {
        self.committed.then_some(DecisionValue(self.index as u32))
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![1, u8::from(self.committed), self.index as u8])
    }
}

#[test]
fn disagreeing_commits_are_counted_and_the_run_completes() {
    let nodes: Vec<_> = (0..3)
        .map(|index| SplitBrain {
            index,
            committed: false,
        })
        .collect();
    let report = run_sweep(&config(3, 10), nodes, seed("seed", 3)).unwrap();

    let s = &report.stats;
    // Both interleavings of the two commits observe the disagreement.
    assert_eq!(s.safety_violations, 2);
    assert_eq!(s.solutions, 0, "a violating state is never a solution");
    assert_eq!(s.failures, 2);
}

/// Flips a single mark on the first delivery; symmetric across nodes, so
/// the two delivery orders of two seeds land in canonically identical
/// global states.
#[derive(Debug, Clone)]
struct MarkOnce {
    marked: bool,
}

impl ProtocolNode for MarkOnce {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, _depth: usize) -> Step<Self::Msg> {
        if self.marked {
            return Step::dead();
        }
        self.marked = true;
        Step::advanced()
    }

    fn committed(&self) -> bool {
        false
    }

    fn decision(&self) -> Option<DecisionValue> {
        None
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![1, u8::from(self.marked)])
    }
}

#[test]
fn symmetric_orders_collapse_into_a_mirror() {
    let config = SweepConfig {
        federated: 2,
        auditors: 1,
        depth_limit: 10,
        mirror_warmup: 1,
        ..SweepConfig::default()
    };
    let report = run_sweep(
        &config,
        vec![MarkOnce { marked: false }; 2],
        seed("mark", 2),
    )
    .unwrap();

    let s = &report.stats;
    // First order expands fully; the second is recognized one level in.
    assert_eq!(s.mirrors, 1);
    assert_eq!(s.mirrors_at, vec![0, 1]);
    assert_eq!(s.failures, 1);
    assert_eq!(s.failures_at, vec![0, 0, 1]);
    assert_eq!(s.solutions, 0);
}

#[test]
fn node_set_size_must_match_the_config() {
    let err = run_sweep(&config(3, 5), vec![Inert; 2], seed("volunteer", 2)).unwrap_err();
    assert!(matches!(err, BallotError::Config { .. }));
}

/// Returns an empty canonical state once past the mirror warm-up.
#[derive(Debug, Clone)]
struct BrokenCanonical {
    steps: u8,
}

impl ProtocolNode for BrokenCanonical {
    type Msg = &'static str;

    fn execute(&mut self, _msg: &Self::Msg, _depth: usize) -> Step<Self::Msg> {
        if self.steps == 0 {
            self.steps = 1;
            Step::broadcast("again")
        } else {
            Step::advanced()
        }
    }

    fn committed(&self) -> bool {
        false
    }

    fn decision(&self) -> Option<DecisionValue> {
        None
    }

    fn canonical_state(&self) -> Result<Vec<u8>> {
        Ok(vec![])
    }
}

#[test]
fn empty_canonical_state_aborts_the_run() {
    let config = SweepConfig {
        federated: 2,
        auditors: 1,
        depth_limit: 10,
        mirror_warmup: 1,
        ..SweepConfig::default()
    };
    let err = run_sweep(
        &config,
        vec![BrokenCanonical { steps: 0 }; 2],
        seed("seed", 2),
    )
    .unwrap_err();
    assert!(matches!(err, BallotError::Invariant { .. }));
}

#[test]
fn explorer_exposes_stats_incrementally() {
    let config = config(1, 5);
    let mut explorer: Explorer<InstantCommit> = Explorer::new(config);
    let mut nodes = vec![InstantCommit::new()];
    let out = explorer.dive(&seed("volunteer", 1), &mut nodes, 0).unwrap();

    assert!(out.saw_success);
    assert!(!out.limit_hit);
    assert_eq!(explorer.stats().solutions, 1);
    assert_eq!(explorer.into_stats().solutions, 1);
}

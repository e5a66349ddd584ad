//! Safety oracle: quorum and disagreement detection
//!
//! After every explorer step the oracle inspects the node set and answers
//! two questions: has a strict majority committed, and do any two
//! committed nodes disagree on the decision value. Disagreement is the
//! primary safety property under test; detecting it never aborts the run,
//! it is only counted and reported by the caller.

use ballot_core::{BallotError, ProtocolNode};

/// What the oracle saw in the node set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Strictly more than half the nodes are committed, all in agreement
    pub quorum: bool,
    /// Two committed nodes hold different decision values
    pub violation: Option<BallotError>,
}

impl Verdict {
    fn agreed(quorum: bool) -> Self {
        Self {
            quorum,
            violation: None,
        }
    }
}

/// Inspect `nodes` and report quorum status and any disagreement.
///
/// Quorum requires at least `n/2 + 1` committed nodes. A disagreement
/// verdict carries the two conflicting values and suppresses the quorum
/// flag, so a violating state is never also counted as a solution.
/// Order-independent: the answer is the same for any permutation of
/// `nodes`.
pub fn check<N: ProtocolNode>(nodes: &[N]) -> Verdict {
    let mut committed = 0usize;
    let mut first_value: Option<u32> = None;

    for node in nodes {
        if !node.committed() {
            continue;
        }
        committed += 1;
        let value = node.decision().map(|d| d.get());
        match (first_value, value) {
            (Some(prev), Some(v)) if prev != v => {
                return Verdict {
                    quorum: false,
                    violation: Some(BallotError::SafetyViolation {
                        first: prev,
                        second: v,
                    }),
                };
            }
            (None, Some(v)) => first_value = Some(v),
            _ => {}
        }
    }

    Verdict::agreed(committed >= nodes.len() / 2 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_core::{DecisionValue, Result, Step};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct FixedNode {
        committed: bool,
        value: u32,
    }

    impl FixedNode {
        fn decided(value: u32) -> Self {
            Self {
                committed: true,
                value,
            }
        }

        fn open() -> Self {
            Self {
                committed: false,
                value: 0,
            }
        }
    }

    impl ProtocolNode for FixedNode {
        type Msg = ();

        fn execute(&mut self, _msg: &(), _depth: usize) -> Step<()> {
            Step::dead()
        }

        fn committed(&self) -> bool {
            self.committed
        }

        fn decision(&self) -> Option<DecisionValue> {
            self.committed.then_some(DecisionValue(self.value))
        }

        fn canonical_state(&self) -> Result<Vec<u8>> {
            Ok(vec![u8::from(self.committed), self.value as u8])
        }
    }

    #[test]
    fn test_no_commits_no_quorum() {
        let nodes = vec![FixedNode::open(), FixedNode::open(), FixedNode::open()];
        let v = check(&nodes);
        assert!(!v.quorum);
        assert!(v.violation.is_none());
    }

    #[test]
    fn test_strict_majority_required() {
        // 1 of 3 is not a quorum, 2 of 3 is.
        let mut nodes = vec![
            FixedNode::decided(4),
            FixedNode::open(),
            FixedNode::open(),
        ];
        assert!(!check(&nodes).quorum);

        nodes[1] = FixedNode::decided(4);
        assert!(check(&nodes).quorum);
    }

    #[test]
    fn test_exact_half_is_not_quorum() {
        let nodes = vec![
            FixedNode::decided(1),
            FixedNode::decided(1),
            FixedNode::open(),
            FixedNode::open(),
        ];
        assert!(!check(&nodes).quorum);
    }

    #[test]
    fn test_single_node_quorum() {
        let nodes = vec![FixedNode::decided(2)];
        assert!(check(&nodes).quorum);
    }

    #[test]
    fn test_disagreement_is_a_violation_not_a_quorum() {
        let nodes = vec![
            FixedNode::decided(1),
            FixedNode::decided(3),
            FixedNode::decided(1),
        ];
        let v = check(&nodes);
        assert!(!v.quorum);
        assert_eq!(
            v.violation,
            Some(BallotError::SafetyViolation { first: 1, second: 3 })
        );
    }

    #[test]
    fn test_order_independent() {
        let a = vec![
            FixedNode::open(),
            FixedNode::decided(5),
            FixedNode::decided(5),
        ];
        let b = vec![
            FixedNode::decided(5),
            FixedNode::decided(5),
            FixedNode::open(),
        ];
        assert_eq!(check(&a).quorum, check(&b).quorum);
    }

    #[test]
    fn test_violation_detected_regardless_of_position() {
        let a = vec![
            FixedNode::decided(0),
            FixedNode::open(),
            FixedNode::decided(7),
        ];
        let b = vec![
            FixedNode::decided(7),
            FixedNode::decided(0),
            FixedNode::open(),
        ];
        assert!(check(&a).violation.is_some());
        assert!(check(&b).violation.is_some());
    }
}

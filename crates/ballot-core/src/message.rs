//! Pending messages and the small index/priority newtypes
//!
//! A [`PendingMessage`] is one undelivered work item: an opaque protocol
//! payload addressed to one node of the fixed node set. The explorer owns
//! the queue of these; a message is immutable once created.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a federated node within the run's fixed node set
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Raw index value
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

/// The integer priority identifying which volunteer a node committed to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DecisionValue(pub u32);

impl DecisionValue {
    /// Raw priority value
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DecisionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One undelivered (target, payload) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage<M> {
    /// Node the payload is addressed to
    pub target: NodeIndex,
    /// Opaque protocol message
    pub payload: M,
}

impl<M> PendingMessage<M> {
    /// Address `payload` to the node at `target`
    pub fn new(target: NodeIndex, payload: M) -> Self {
        Self { target, payload }
    }
}

impl<M: fmt::Display> fmt::Display for PendingMessage<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <== {}", self.target, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_message_holds_target() {
        let m = PendingMessage::new(NodeIndex(2), "vol");
        assert_eq!(m.target, NodeIndex(2));
        assert_eq!(m.payload, "vol");
    }

    #[test]
    fn test_display_formats() {
        let m = PendingMessage::new(NodeIndex(1), "v");
        assert_eq!(m.to_string(), "node1 <== v");
        assert_eq!(DecisionValue(3).to_string(), "3");
    }
}

//! The protocol-node interface the checker drives
//!
//! The checker never looks inside the election algorithm. Everything it
//! needs from a simulated participant is here: deliver a message and learn
//! whether the state moved, read the commit status, and obtain a canonical
//! byte form of the externally observable state for deduplication.
//!
//! `Clone` is a supertrait on purpose: backtracking works by deep-cloning a
//! node before every delivery and restoring the clone after the recursive
//! branch returns. The clone must be independent, internal buffers
//! included. There is no serialize-and-decode fallback path.

use crate::error::Result;
use crate::message::DecisionValue;

/// Result of delivering one message to a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<M> {
    /// Follow-up message to broadcast to every *other* node, if any
    pub produced: Option<M>,
    /// False means the delivery had no effect (a dead message)
    pub changed: bool,
}

impl<M> Step<M> {
    /// A delivery that changed state and produced a broadcast
    pub fn broadcast(msg: M) -> Self {
        Self {
            produced: Some(msg),
            changed: true,
        }
    }

    /// A delivery that changed state silently
    pub fn advanced() -> Self {
        Self {
            produced: None,
            changed: true,
        }
    }

    /// A delivery with no effect
    pub fn dead() -> Self {
        Self {
            produced: None,
            changed: false,
        }
    }
}

/// One simulated federated participant in the election
///
/// Implementations carry the actual voting state machine; the checker only
/// consumes this surface.
pub trait ProtocolNode: Clone {
    /// Protocol message type exchanged between nodes
    type Msg: Clone;

    /// Apply `msg` to the node's state machine at search depth `depth`
    fn execute(&mut self, msg: &Self::Msg, depth: usize) -> Step<Self::Msg>;

    /// Whether the node has reached its terminal decision
    fn committed(&self) -> bool;

    /// The committed decision value; `None` until committed
    fn decision(&self) -> Option<DecisionValue>;

    /// Canonical byte form of the externally observable state
    ///
    /// Must never return an empty buffer. Returning one is an invariant
    /// violation of the node implementation and aborts the run.
    fn canonical_state(&self) -> Result<Vec<u8>>;
}

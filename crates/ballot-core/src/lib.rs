//! # Ballot Core - Checker Interface Layer
//!
//! Foundational types consumed by the exhaustive election checker.
//! This crate defines the boundary between the search machinery in
//! `ballot-sweep` and whatever protocol state machine it drives:
//!
//! - **node**: the [`ProtocolNode`] trait every simulated participant
//!   implements (execute, commit status, canonical state, deep clone)
//! - **message**: pending-message and index/priority newtypes
//! - **hash**: the central Sha-256 helper used for canonical-state digests
//! - **error**: unified error type and `Result` alias
//!
//! The crate contains no search logic and no election logic; it is the
//! vocabulary both sides share.

#![forbid(unsafe_code)]

pub mod error;
pub mod hash;
pub mod message;
pub mod node;

pub use error::{BallotError, Result};
pub use message::{DecisionValue, NodeIndex, PendingMessage};
pub use node::{ProtocolNode, Step};

//! Unified error system for the checker
//!
//! A single error type covers the whole workspace. The taxonomy matters
//! more than the variants' payloads: a safety violation is a *finding*
//! (counted, never fatal), while an invariant violation means the node
//! implementation under test is broken and the run must stop.

use serde::{Deserialize, Serialize};

/// Unified error type for all checker operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum BallotError {
    /// Two committed nodes disagree on the decision value. Recoverable:
    /// the explorer counts it and keeps searching.
    #[error("safety violation: nodes committed on different results, {first} and {second}")]
    SafetyViolation {
        /// Decision value seen first
        first: u32,
        /// Conflicting decision value
        second: u32,
    },

    /// A protocol-node invariant was broken (e.g. empty canonical state).
    /// Fatal: the implementation under test is defective.
    #[error("invariant violation: {message}")]
    Invariant {
        /// Description of the broken invariant
        message: String,
    },

    /// Invalid run configuration
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid parameter
        message: String,
    },
}

impl BallotError {
    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors the explorer records and continues past
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SafetyViolation { .. })
    }
}

/// Result alias used throughout the workspace
pub type Result<T> = std::result::Result<T, BallotError>;

//! Error types for tree construction.

use thiserror::Error;

use crate::base::SourceId;

/// Errors that can occur while adding metadata to a suggestion tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Key is empty or has an empty segment.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// A segment of the key already exists with an incompatible kind.
    #[error("Key '{key}' conflicts with existing {existing} '{at}'")]
    PathConflict {
        key: String,
        at: String,
        existing: &'static str,
    },

    /// The source was never loaded.
    #[error("Unknown metadata source: {0}")]
    UnknownSource(SourceId),
}

impl TreeError {
    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason,
        }
    }

    /// Create a conflict error against an existing group.
    pub fn conflicts_with_group(key: impl Into<String>, at: impl Into<String>) -> Self {
        Self::PathConflict {
            key: key.into(),
            at: at.into(),
            existing: "group",
        }
    }

    /// Create a conflict error against an existing property.
    pub fn conflicts_with_property(key: impl Into<String>, at: impl Into<String>) -> Self {
        Self::PathConflict {
            key: key.into(),
            at: at.into(),
            existing: "property",
        }
    }
}

//! Error types for replicated set operations.

use syncset_wire::WireError;
use thiserror::Error;

/// Errors that can occur on a replicated set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A mutation was attempted on an instance that has consumed remote state.
    #[error("Read-only violation: {operation} called on a follower; reset() before mutating")]
    ReadOnlyViolation { operation: &'static str },

    /// An item could not be encoded, or the byte stream was truncated,
    /// malformed, over a limit, or carried an unknown operation tag.
    #[error("Decode error: {0}")]
    Decode(#[from] WireError),
}

impl SyncError {
    pub fn is_read_only_violation(&self) -> bool {
        matches!(self, SyncError::ReadOnlyViolation { .. })
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, SyncError::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;

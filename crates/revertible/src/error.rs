//! Error types for the undo context system

use thiserror::Error;

/// Errors that can occur while draining an undo context
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The object a restore operation targets was dropped before rollback
    #[error("Undo target dropped: {0}")]
    TargetDropped(String),

    /// A caller-supplied undo operation reported a failure
    #[error("Undo operation failed: {0}")]
    OperationFailed(String),
}

impl HistoryError {
    /// Create a new TargetDropped error naming the affected attribute
    pub fn target_dropped(attr: impl Into<String>) -> Self {
        Self::TargetDropped(attr.into())
    }

    /// Create a new OperationFailed error with context
    pub fn operation_failed(msg: impl Into<String>) -> Self {
        Self::OperationFailed(msg.into())
    }
}

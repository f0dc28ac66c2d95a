//! Queue Error Types
//!
//! Defines error types specific to the queue system operations.

use thiserror::Error;

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur during queue operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Node or value storage could not be obtained
    #[error("Allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },

    /// Caller supplied an argument the operation cannot work with
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Removal was attempted on a queue with no elements
    #[error("Queue is empty")]
    EmptyQueue,

    /// Structural check found the chain inconsistent with its cached state
    #[error("Queue invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl QueueError {
    /// Create an allocation failure error
    pub fn allocation_failure(requested: usize) -> Self {
        Self::AllocationFailure { requested }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// True when the failure came from storage exhaustion and a retry may succeed
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::AllocationFailure { .. })
    }
}

/*!
 * Error Types
 * Centralized error handling with thiserror and serde support
 */

use serde::Serialize;
use thiserror::Error;

/// Lock primitive errors.
///
/// These are the rare internal failure paths of a [`RawLock`](crate::sync::RawLock)
/// backend. They are propagated to the caller unretried and signal misuse of the
/// handle, not transient contention.
#[derive(Error, Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "error_type", rename_all = "snake_case")]
pub enum LockError {
    /// Handle was destroyed; all subsequent operations are rejected.
    #[error("lock handle has been destroyed")]
    Destroyed,

    /// Release attempted by a thread that does not hold the lock.
    #[error("lock is not held by the calling thread")]
    NotHeld,

    /// Destroy attempted while the lock is still held.
    #[error("lock is still held")]
    Busy,
}

/// List operation errors with serialization support.
///
/// Every public container operation reports failure through this closed set of
/// conditions. Usage errors are detected before any mutation takes place.
#[derive(Error, Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ListError {
    /// Invalid or size-mismatched argument, or the list has been destroyed.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Index is beyond the current chain (including index 0 on an empty list).
    #[error("index {index} out of range")]
    OutOfRange { index: usize },

    /// Node or element storage allocation failed; the list is unchanged.
    #[error("out of memory allocating element storage")]
    OutOfMemory,

    /// The underlying lock primitive failed. Unrecoverable, not retried.
    #[error("lock failure: {0}")]
    Lock(#[from] LockError),
}

/// Common result type for list operations
pub type ListResult<T> = Result<T, ListError>;

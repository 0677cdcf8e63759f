/*!
 * Lock Abstraction
 *
 * Minimal critical-section contract consumed by the container. Exactly four
 * operations; no re-entrant locking, no timeouts, acquisition blocks
 * indefinitely.
 */

use crate::errors::LockError;

/// Abstract mutual-exclusion primitive.
///
/// Implementations must make misuse a detected error, never undefined
/// behavior: acquiring or releasing a destroyed handle, releasing a lock the
/// calling thread does not hold, and destroying a held lock all return a
/// [`LockError`].
pub trait RawLock: Send + Sync + 'static {
    /// Allocate and prepare a lock handle.
    fn initialize() -> Result<Self, LockError>
    where
        Self: Sized;

    /// Block the calling thread until exclusive ownership is obtained.
    ///
    /// Fails with [`LockError::Destroyed`] on a destroyed handle. Re-entrant
    /// acquisition is not supported and will deadlock.
    fn acquire(&self) -> Result<(), LockError>;

    /// Release ownership held by the calling thread.
    ///
    /// Fails with [`LockError::NotHeld`] if the calling thread does not hold
    /// the lock, [`LockError::Destroyed`] on a destroyed handle.
    fn release(&self) -> Result<(), LockError>;

    /// Release all resources and invalidate the handle.
    ///
    /// Subsequent operations on the handle are rejected. Fails with
    /// [`LockError::Busy`] while the lock is held, [`LockError::Destroyed`]
    /// if already destroyed.
    fn destroy(&self) -> Result<(), LockError>;
}

/*!
 * Native Lock Backend
 * parking_lot-backed reference implementation of the lock contract
 */

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use parking_lot::lock_api::RawMutex as _;
use tracing::warn;

use super::traits::RawLock;
use super::{thread_token, LOCK_DESTROYED, LOCK_READY};
use crate::errors::LockError;

/// Reference lock backend built on `parking_lot::RawMutex`.
///
/// A word-sized mutex with adaptive spinning and thread parking, wrapped
/// with the lifecycle and ownership tracking the contract requires.
pub struct NativeLock {
    raw: parking_lot::RawMutex,
    state: AtomicU8,
    /// Token of the holding thread, 0 while the lock is free.
    owner: AtomicUsize,
}

impl RawLock for NativeLock {
    fn initialize() -> Result<Self, LockError> {
        Ok(Self {
            raw: parking_lot::RawMutex::INIT,
            state: AtomicU8::new(LOCK_READY),
            owner: AtomicUsize::new(0),
        })
    }

    fn acquire(&self) -> Result<(), LockError> {
        if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
            return Err(LockError::Destroyed);
        }
        self.raw.lock();
        if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
            // Destroyed while we were parked: back out without ownership.
            unsafe { self.raw.unlock() };
            return Err(LockError::Destroyed);
        }
        self.owner.store(thread_token(), Ordering::Release);
        Ok(())
    }

    fn release(&self) -> Result<(), LockError> {
        if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
            return Err(LockError::Destroyed);
        }
        if self.owner.load(Ordering::Acquire) != thread_token() {
            warn!("release without holding the lock rejected");
            return Err(LockError::NotHeld);
        }
        self.owner.store(0, Ordering::Release);
        // Safety: the owner check above proves this thread holds the lock.
        unsafe { self.raw.unlock() };
        Ok(())
    }

    fn destroy(&self) -> Result<(), LockError> {
        if self.owner.load(Ordering::Acquire) != 0 {
            return Err(LockError::Busy);
        }
        match self.state.compare_exchange(
            LOCK_READY,
            LOCK_DESTROYED,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => Ok(()),
            Err(_) => Err(LockError::Destroyed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release_cycle() {
        let lock = NativeLock::initialize().unwrap();
        lock.acquire().unwrap();
        lock.release().unwrap();
        lock.destroy().unwrap();
    }

    #[test]
    fn test_release_without_acquire() {
        let lock = NativeLock::initialize().unwrap();
        assert_eq!(lock.release(), Err(LockError::NotHeld));
    }
}

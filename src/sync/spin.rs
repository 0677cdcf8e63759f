/*!
 * Spin Lock Backend
 *
 * Atomic-flag lock for very short critical sections where parking overhead
 * dominates. Spins with periodic yields to the scheduler so a descheduled
 * holder does not starve waiters.
 */

use std::hint;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::thread;

use tracing::warn;

use super::traits::RawLock;
use super::{thread_token, LOCK_DESTROYED, LOCK_READY};
use crate::errors::LockError;

/// Spins between scheduler yields.
const SPINS_PER_YIELD: u32 = 64;

/// Busy-waiting lock backend.
pub struct SpinLock {
    locked: AtomicBool,
    state: AtomicU8,
    /// Token of the holding thread, 0 while the lock is free.
    owner: AtomicUsize,
}

impl RawLock for SpinLock {
    fn initialize() -> Result<Self, LockError> {
        Ok(Self {
            locked: AtomicBool::new(false),
            state: AtomicU8::new(LOCK_READY),
            owner: AtomicUsize::new(0),
        })
    }

    fn acquire(&self) -> Result<(), LockError> {
        if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
            return Err(LockError::Destroyed);
        }
        let mut spins: u32 = 0;
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            // Wait on a plain load to avoid cache-line ping-pong.
            while self.locked.load(Ordering::Relaxed) {
                if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
                    return Err(LockError::Destroyed);
                }
                spins = spins.wrapping_add(1);
                if spins % SPINS_PER_YIELD == 0 {
                    thread::yield_now();
                } else {
                    hint::spin_loop();
                }
            }
        }
        if self.state.load(Ordering::Acquire) == LOCK_DESTROYED {
            self.locked.store(false, Ordering::Release);
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
        self.locked.store(false, Ordering::Release);
        Ok(())
    }

    fn destroy(&self) -> Result<(), LockError> {
        if self.locked.load(Ordering::Acquire) {
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
    use std::sync::Arc;

    #[test]
    fn test_mutual_exclusion() {
        let lock = Arc::new(SpinLock::initialize().unwrap());
        let counter = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = lock.clone();
                let counter = counter.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        lock.acquire().unwrap();
                        let v = counter.load(Ordering::Relaxed);
                        counter.store(v + 1, Ordering::Relaxed);
                        lock.release().unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.load(Ordering::Relaxed), 4000);
    }

    #[test]
    fn test_destroy_rejects_further_use() {
        let lock = SpinLock::initialize().unwrap();
        lock.destroy().unwrap();
        assert_eq!(lock.acquire(), Err(LockError::Destroyed));
        assert_eq!(lock.destroy(), Err(LockError::Destroyed));
    }
}

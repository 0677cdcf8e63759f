/*!
 * Linked-List Container
 * Index-addressed, value-semantics storage serialized through an abstract lock
 *
 * # Design
 *
 * Every node is uniquely owned by its predecessor (the container owns the
 * head), and callers only ever see copies of stored values — internal
 * references never escape. Each public operation acquires the container's
 * lock, performs a bounded traversal or mutation of the chain, releases the
 * lock, and returns a result.
 *
 * # Concurrency
 *
 * `LinkedList` is `Sync`: parallel threads operate on a shared instance and
 * are linearized by the single per-container lock. The one deliberate
 * narrowing of the critical section is in `remove` and `destroy`, where
 * detached nodes are released and freed *after* the lock is dropped — they
 * are already unreachable from the chain at that point.
 */

use std::cell::UnsafeCell;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, trace, warn};

use crate::errors::{ListError, ListResult, LockError};
use crate::policy::{BitwiseCopy, ElementPolicy};
use crate::sync::{NativeLock, RawLock};

mod node;
mod types;

use node::Node;
pub use types::LifecycleState;

/// Thread-safe, singly-linked sequence container with value semantics.
///
/// Stored elements are fixed-size byte values; non-trivial types register an
/// [`ElementPolicy`] that deep-copies values in and out and releases their
/// nested resources. The lock backend is a type parameter and defaults to
/// [`NativeLock`].
///
/// # Example
///
/// ```
/// use chainlist::LinkedList;
///
/// let list = LinkedList::new(4)?;
/// list.push(&42i32.to_ne_bytes())?;
/// list.push(&69i32.to_ne_bytes())?;
/// assert_eq!(list.len()?, 2);
///
/// let mut out = [0u8; 4];
/// list.get(1, &mut out)?;
/// assert_eq!(i32::from_ne_bytes(out), 69);
///
/// list.update(1, &1234i32.to_ne_bytes())?;
/// list.remove(0)?;
/// assert_eq!(list.len()?, 1);
/// list.get(0, &mut out)?;
/// assert_eq!(i32::from_ne_bytes(out), 1234);
///
/// list.destroy()?;
/// assert!(list.len().is_err());
/// # Ok::<(), chainlist::ListError>(())
/// ```
pub struct LinkedList<L: RawLock = NativeLock> {
    element_size: usize,
    policy: Box<dyn ElementPolicy>,
    lock: L,
    state: AtomicU8,
    /// Head of the ownership chain. Only dereferenced while `lock` is held.
    head: UnsafeCell<Option<Box<Node>>>,
}

// Safety: `head` is only accessed under the exclusive lock; every other field
// is immutable after construction or atomic.
unsafe impl<L: RawLock> Send for LinkedList<L> {}
unsafe impl<L: RawLock> Sync for LinkedList<L> {}

impl LinkedList {
    /// Create a list of `element_size`-byte elements with the default
    /// byte-for-byte copy policy and the native lock backend.
    ///
    /// Fails with an invalid-argument condition if `element_size` is zero.
    pub fn new(element_size: usize) -> ListResult<Self> {
        Self::with_backend(element_size, BitwiseCopy)
    }

    /// Create a list with a custom copy/destroy policy and the native lock
    /// backend.
    pub fn with_policy(
        element_size: usize,
        policy: impl ElementPolicy + 'static,
    ) -> ListResult<Self> {
        Self::with_backend(element_size, policy)
    }
}

impl<L: RawLock> LinkedList<L> {
    /// Create a list with an explicit lock backend.
    ///
    /// ```
    /// use chainlist::{BitwiseCopy, LinkedList, SpinLock};
    ///
    /// let list = LinkedList::<SpinLock>::with_backend(8, BitwiseCopy)?;
    /// list.push(&7u64.to_ne_bytes())?;
    /// assert_eq!(list.len()?, 1);
    /// # Ok::<(), chainlist::ListError>(())
    /// ```
    pub fn with_backend(
        element_size: usize,
        policy: impl ElementPolicy + 'static,
    ) -> ListResult<Self> {
        if element_size == 0 {
            return Err(ListError::InvalidArgument("element_size must be non-zero"));
        }
        let lock = L::initialize()?;
        debug!(element_size, "list initialized");
        Ok(Self {
            element_size,
            policy: Box::new(policy),
            lock,
            state: AtomicU8::new(LifecycleState::Ready as u8),
            head: UnsafeCell::new(None),
        })
    }

    /// Fixed per-element size in bytes, set at initialization.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Deep-copy `value` into a new node appended at the tail.
    ///
    /// The tail is found by full traversal under the lock, so appending is
    /// O(n) in the current length. Allocation happens before the critical
    /// section: on out-of-memory the chain is untouched.
    pub fn push(&self, value: &[u8]) -> ListResult<()> {
        if value.len() != self.element_size {
            return Err(ListError::InvalidArgument(
                "value length must equal element_size",
            ));
        }
        let mut node = Node::alloc(self.element_size)?;
        self.locked(move |chain| {
            self.policy.duplicate(&mut node.value, value);
            let mut slot = chain;
            while let Some(existing) = slot {
                slot = &mut existing.next;
            }
            *slot = Some(node);
            Ok(())
        })?;
        trace!("element appended");
        Ok(())
    }

    /// Unlink the node at `index`; following indices shift down by one.
    ///
    /// Fails out-of-range on an empty list or if `index >= len`. The lock
    /// covers only the pointer unlink; the detached node's value is released
    /// through the policy and freed after the lock is dropped.
    pub fn remove(&self, index: usize) -> ListResult<()> {
        let mut detached = self.locked(|chain| {
            if index == 0 {
                let mut head = chain.take().ok_or(ListError::OutOfRange { index })?;
                *chain = head.next.take();
                Ok(head)
            } else {
                let prev = Self::node_at(chain, index - 1)
                    .map_err(|_| ListError::OutOfRange { index })?;
                let mut victim = prev.next.take().ok_or(ListError::OutOfRange { index })?;
                prev.next = victim.next.take();
                Ok(victim)
            }
        })?;
        // Already unreachable from the chain; safe to tear down unlocked.
        self.policy.release_nested(&mut detached.value);
        trace!(index, "node removed");
        Ok(())
    }

    /// Deep-copy the value at `index` into `out`.
    ///
    /// `out` must be exactly `element_size` bytes. The caller owns the copy
    /// and is responsible for releasing its nested resources through the same
    /// policy before discarding it.
    pub fn get(&self, index: usize, out: &mut [u8]) -> ListResult<()> {
        if out.len() != self.element_size {
            return Err(ListError::InvalidArgument(
                "out buffer length must equal element_size",
            ));
        }
        self.locked(|chain| {
            let node = Self::node_at(chain, index)?;
            self.policy.duplicate(out, &node.value);
            Ok(())
        })
    }

    /// Replace the value at `index` in place.
    ///
    /// The existing value's nested resources are released, then `value` is
    /// deep-copied over the same storage buffer — reused, not reallocated.
    pub fn update(&self, index: usize, value: &[u8]) -> ListResult<()> {
        if value.len() != self.element_size {
            return Err(ListError::InvalidArgument(
                "value length must equal element_size",
            ));
        }
        self.locked(|chain| {
            let node = Self::node_at(chain, index)?;
            self.policy.release_nested(&mut node.value);
            self.policy.duplicate(&mut node.value, value);
            Ok(())
        })?;
        trace!(index, "value replaced");
        Ok(())
    }

    /// Count nodes by full traversal under the lock.
    ///
    /// No cached counter is maintained: the result reflects a complete,
    /// consistent traversal at the instant the lock is held.
    pub fn len(&self) -> ListResult<usize> {
        self.locked(|chain| {
            let mut count = 0;
            let mut cursor = chain.as_deref();
            while let Some(node) = cursor {
                count += 1;
                cursor = node.next.as_deref();
            }
            Ok(count)
        })
    }

    /// Whether the list currently holds no elements.
    pub fn is_empty(&self) -> ListResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Tear the container down: release every value's nested resources, free
    /// all nodes, destroy the lock, and mark the container destroyed.
    ///
    /// Idempotent — repeated calls are a no-op. Every other operation on a
    /// destroyed list fails with an invalid-argument condition.
    pub fn destroy(&self) -> ListResult<()> {
        if self
            .state
            .compare_exchange(
                LifecycleState::Ready as u8,
                LifecycleState::Destroyed as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Ok(());
        }
        // Detach the whole chain under the lock; tear it down after release.
        self.lock.acquire()?;
        // Safety: the lock is held.
        let mut chain = unsafe { &mut *self.head.get() }.take();
        self.lock.release()?;
        while let Some(mut node) = chain {
            self.policy.release_nested(&mut node.value);
            chain = node.next.take();
        }
        // A thread that passed the lifecycle check before the state flip may
        // still be holding the lock for one last (empty-chain) operation;
        // wait such stragglers out before destroying it.
        loop {
            match self.lock.destroy() {
                Err(LockError::Busy) => std::hint::spin_loop(),
                other => {
                    other?;
                    break;
                }
            }
        }
        debug!("list destroyed");
        Ok(())
    }

    /// Run `f` over the head slot with the lock held.
    fn locked<R>(
        &self,
        f: impl FnOnce(&mut Option<Box<Node>>) -> ListResult<R>,
    ) -> ListResult<R> {
        self.ensure_ready()?;
        self.lock.acquire()?;
        // Safety: the lock is held for the whole borrow.
        let chain = unsafe { &mut *self.head.get() };
        let result = f(chain);
        self.lock.release()?;
        result
    }

    fn ensure_ready(&self) -> ListResult<()> {
        if self.state.load(Ordering::Acquire) != LifecycleState::Ready as u8 {
            warn!("operation on destroyed list rejected");
            return Err(ListError::InvalidArgument("list has been destroyed"));
        }
        Ok(())
    }

    fn node_at(chain: &mut Option<Box<Node>>, index: usize) -> ListResult<&mut Node> {
        let mut cursor = chain.as_deref_mut();
        for _ in 0..index {
            cursor = match cursor {
                Some(node) => node.next.as_deref_mut(),
                None => None,
            };
        }
        cursor.ok_or(ListError::OutOfRange { index })
    }
}

impl<L: RawLock> Drop for LinkedList<L> {
    fn drop(&mut self) {
        // RAII teardown for lists dropped without an explicit destroy().
        if self.destroy().is_err() {
            warn!("list teardown failed during drop");
        }
    }
}

impl<L: RawLock> fmt::Debug for LinkedList<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("element_size", &self.element_size)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

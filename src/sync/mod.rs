/*!
 * Lock Backends
 *
 * Concrete realizations of the [`RawLock`] contract consumed by the list:
 * - Native (parking_lot) for general use
 * - Spin for short critical sections where parking overhead dominates
 *
 * # Architecture
 *
 * The container is generic over [`RawLock`] and never depends on a concrete
 * backend. Every backend tracks its own lifecycle so that operations on a
 * destroyed handle, or a release by a non-owning thread, are detected errors
 * rather than silent corruption.
 */

mod native;
mod spin;
mod traits;

pub use native::NativeLock;
pub use spin::SpinLock;
pub use traits::RawLock;

/// Backend lifecycle states shared by all implementations.
pub(crate) const LOCK_READY: u8 = 0;
pub(crate) const LOCK_DESTROYED: u8 = 1;

/// Cheap per-thread ownership token.
///
/// The address of a thread-local is unique per live thread, which is enough
/// to detect a release attempted by a thread that never acquired the lock.
pub(crate) fn thread_token() -> usize {
    thread_local! {
        static TOKEN: u8 = 0;
    }
    TOKEN.with(|t| t as *const u8 as usize)
}

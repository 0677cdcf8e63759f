/*!
 * chainlist
 * Thread-safe, index-addressed linked list with value semantics
 *
 * # Architecture
 *
 * Two components, leaves first:
 *
 * - [`sync`]: a minimal abstract lock contract ([`RawLock`]) with a native
 *   parking_lot backend and a spin backend. The container never depends on a
 *   concrete backend.
 * - [`list`]: the container itself — an ownership chain of nodes, a
 *   pluggable element copy/destroy policy, and operations serialized through
 *   the lock.
 *
 * Callers never receive internal references: `push`/`update` copy values in,
 * `get` copies values out. For element types that own nested resources, an
 * [`ElementPolicy`] supplies the deep-copy and release behavior; the
 * container always owns and frees the top-level storage itself.
 */

pub mod errors;
pub mod list;
pub mod policy;
pub mod sync;

// Re-exports
pub use errors::{ListError, ListResult, LockError};
pub use list::{LifecycleState, LinkedList};
pub use policy::{BitwiseCopy, ElementPolicy};
pub use sync::{NativeLock, RawLock, SpinLock};

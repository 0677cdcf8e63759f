/*!
 * Element Copy/Destroy Policy
 * Strategy for duplicating stored values and releasing their nested resources
 *
 * # Ownership Contract
 *
 * The container owns and frees every element's top-level storage buffer.
 * A policy only manages what a value's *fields* own: `duplicate` must produce
 * a value-independent deep copy (duplicating any owned sub-resources), and
 * `release_nested` must release those sub-resources without touching the
 * buffer itself.
 */

/// Copy/destroy strategy for stored element values.
///
/// `duplicate` runs inside the container's critical section and must be fast,
/// non-blocking, and never re-enter the list it was registered with.
/// `release_nested` runs under the lock for in-place updates but after the
/// lock is dropped for removed nodes and teardown.
pub trait ElementPolicy: Send + Sync {
    /// Deep-copy the value in `src` into `dest`.
    ///
    /// Both slices are exactly `element_size` bytes. After this call the two
    /// values must be fully independent: mutating (or releasing) one must not
    /// affect the other.
    fn duplicate(&self, dest: &mut [u8], src: &[u8]);

    /// Release sub-resources owned by the value's fields.
    ///
    /// The buffer itself stays allocated and owned by the container (or, for
    /// copies handed out by `get`, by the caller). The default is a no-op for
    /// values that own nothing.
    fn release_nested(&self, value: &mut [u8]) {
        let _ = value;
    }
}

/// Default policy: raw byte-for-byte duplication, no release step.
///
/// Correct for any element type that owns no external resources (plain
/// integers, fixed-size structs of scalars, etc.).
#[derive(Debug, Clone, Copy, Default)]
pub struct BitwiseCopy;

impl ElementPolicy for BitwiseCopy {
    #[inline]
    fn duplicate(&self, dest: &mut [u8], src: &[u8]) {
        dest.copy_from_slice(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitwise_copy_duplicates() {
        let src = [1u8, 2, 3, 4];
        let mut dest = [0u8; 4];
        BitwiseCopy.duplicate(&mut dest, &src);
        assert_eq!(dest, src);
    }

    #[test]
    fn test_default_release_is_noop() {
        let mut value = [7u8; 4];
        BitwiseCopy.release_nested(&mut value);
        assert_eq!(value, [7u8; 4]);
    }
}

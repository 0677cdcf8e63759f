/*!
 * Node Storage
 * One element's serialized storage plus the link to its successor
 */

use crate::errors::{ListError, ListResult};

/// A single chain node.
///
/// Owns exactly one element's byte storage and, uniquely, its successor.
/// Nodes are created only by insertion and destroyed only by removal or
/// container teardown; they are never exposed outside the list.
pub(super) struct Node {
    pub(super) value: Box<[u8]>,
    pub(super) next: Option<Box<Node>>,
}

impl Node {
    /// Allocate an unlinked node with zeroed storage of `element_size` bytes.
    ///
    /// Storage is reserved fallibly so allocation failure surfaces as
    /// [`ListError::OutOfMemory`] instead of aborting.
    pub(super) fn alloc(element_size: usize) -> ListResult<Box<Node>> {
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(element_size)
            .map_err(|_| ListError::OutOfMemory)?;
        storage.resize(element_size, 0);
        Ok(Box::new(Node {
            value: storage.into_boxed_slice(),
            next: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_sizes_storage() {
        let node = Node::alloc(16).unwrap();
        assert_eq!(node.value.len(), 16);
        assert!(node.value.iter().all(|b| *b == 0));
        assert!(node.next.is_none());
    }
}

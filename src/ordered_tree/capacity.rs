use super::OrderedTree;
use crate::raw::RawOrderedTree;

impl<K> OrderedTree<K> {
    /// Creates an empty tree with room for at least `capacity` keys before
    /// the node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree: OrderedTree<i32> = OrderedTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTree {
            raw: RawOrderedTree::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes the tree can hold without reallocating.
    ///
    /// Removed keys free their slot for later insertions, so the capacity
    /// never shrinks.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

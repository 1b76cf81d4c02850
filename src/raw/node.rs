use super::handle::Handle;
use super::size::Size;

/// A binary search tree node.
///
/// Every key in the `left` subtree is less than `key`, every key in the
/// `right` subtree is greater, and `size` counts this node plus both subtrees.
pub(crate) struct Node<K> {
    key: K,
    left: Option<Handle>,
    right: Option<Handle>,
    size: Size,
}

/// Names the child link that holds a subtree, so it can be rewritten in place.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    Root,
    Left(Handle),
    Right(Handle),
}

impl<K> Node<K> {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Returns the number of nodes in the subtree rooted here.
    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn increment_size(&mut self) {
        self.size = self.size.increment();
    }

    pub(crate) fn decrement_size(&mut self) {
        self.size = self.size.decrement();
    }

    /// Returns true if neither child is present.
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

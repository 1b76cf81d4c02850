use core::borrow::Borrow;
use core::ops::Index;

use super::OrderedTree;
use crate::{Rank, TreeError};

impl<K> OrderedTree<K> {
    /// Returns the key at position `n` in ascending order.
    ///
    /// The position is zero-based: `select(0)` is the minimum and
    /// `select(size() - 1)` the maximum.
    ///
    /// # Errors
    ///
    /// [`TreeError::OutOfRange`] if `n >= size()`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::{OrderedTree, TreeError};
    ///
    /// let tree = OrderedTree::from([10, 20, 30]);
    /// assert_eq!(tree.select(1), Ok(&20));
    /// assert_eq!(tree.select(3), Err(TreeError::OutOfRange { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, n: usize) -> Result<&K, TreeError> {
        self.raw.select(n).ok_or(TreeError::OutOfRange {
            rank: n,
            len: self.len(),
        })
    }
}

impl<K: Ord> OrderedTree<K> {
    /// Returns the zero-based position of `key` in ascending order, or `None`
    /// if the key is not present.
    ///
    /// For every `n < size()`, `rank(select(n)) == Some(n)`.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree = OrderedTree::from([10, 20]);
    ///
    /// assert_eq!(tree.rank(&20), Some(1));
    /// assert_eq!(tree.rank(&15), None);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ostree::{OrderedTree, Rank};
///
/// let tree = OrderedTree::from([10, 20, 30]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
impl<K> Index<Rank> for OrderedTree<K> {
    type Output = K;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.raw.select(rank.0).expect("index out of bounds")
    }
}

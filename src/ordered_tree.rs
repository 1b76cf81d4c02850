use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::TreeError;
use crate::raw::{Handle, RawOrderedTree};

mod capacity;
mod order_statistic;
mod traversal;

pub use traversal::{LevelItem, Levels};

/// An ordered set of unique keys stored in a binary search tree whose nodes
/// count their subtrees.
///
/// The counters make [`select`](OrderedTree::select) and
/// [`rank`](OrderedTree::rank) run in time proportional to the height of the
/// tree. The tree does not rebalance itself: sorted insertions produce a
/// linear spine. Call [`balance`](OrderedTree::balance) to rebuild it into a
/// tree of minimal height in linear time.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key, as determined by the [`Ord`] trait, changes while
/// it is in the tree.
///
/// # Examples
///
/// ```
/// use ostree::OrderedTree;
///
/// let mut tree = OrderedTree::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.size(), 7);
/// assert_eq!(tree.select(0), Ok(&1));
/// assert_eq!(tree.rank(&7), Some(4));
///
/// assert!(tree.delete_element(&5));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
/// ```
pub struct OrderedTree<K> {
    raw: RawOrderedTree<K>,
}

/// An iterator over the keys of an `OrderedTree` in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedTree`].
///
/// [`iter`]: OrderedTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K> {
    raw: &'a RawOrderedTree<K>,
    // Nodes whose key and right subtree are still ahead of the front cursor.
    front: SmallVec<[Handle; 16]>,
    // Nodes whose key and left subtree are still ahead of the back cursor.
    back: SmallVec<[Handle; 16]>,
    remaining: usize,
}

/// An owning iterator over the keys of an `OrderedTree` in ascending order.
///
/// This `struct` is created by the `into_iter` method on [`OrderedTree`]
/// (provided by the [`IntoIterator`] trait).
pub struct IntoIter<K> {
    // Linearized on creation, so the minimum is always the root.
    raw: RawOrderedTree<K>,
}

impl<K> OrderedTree<K> {
    /// Makes a new, empty `OrderedTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree: OrderedTree<u8> = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OrderedTree {
            raw: RawOrderedTree::new(),
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of keys in the tree. Same as [`size`](Self::size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Exchanges the contents of two trees.
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        self.raw.swap(&mut other.raw);
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree holds no keys.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn min(&self) -> Result<&K, TreeError> {
        self.raw.first().ok_or(TreeError::EmptyTree)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree holds no keys.
    pub fn max(&self) -> Result<&K, TreeError> {
        self.raw.last().ok_or(TreeError::EmptyTree)
    }

    /// Removes the smallest key and returns it.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree holds no keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::from([2, 1]);
    /// assert_eq!(tree.delete_min(), Ok(1));
    /// assert_eq!(tree.delete_min(), Ok(2));
    /// assert_eq!(tree.delete_min(), Err(TreeError::EmptyTree));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn delete_min(&mut self) -> Result<K, TreeError> {
        self.raw.pop_first().ok_or(TreeError::EmptyTree)
    }

    /// Removes the largest key and returns it.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree holds no keys.
    pub fn delete_max(&mut self) -> Result<K, TreeError> {
        self.raw.pop_last().ok_or(TreeError::EmptyTree)
    }

    /// Rebuilds the tree into a balanced shape.
    ///
    /// The result depends only on the number of keys, never on the order in
    /// which they were inserted: for `n` keys the root is the key of rank
    /// `(n - 1) / 2`, and both subtrees are built the same way. Balancing an
    /// already balanced tree leaves its shape unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<u32> = (0..1023).collect();
    /// assert_eq!(tree.height(), 1023);
    ///
    /// tree.balance();
    /// assert_eq!(tree.height(), 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n), without allocating.
    pub fn balance(&mut self) {
        self.raw.balance();
    }

    /// Rewrites the tree into a chain where every node has only a right child,
    /// in ascending key order.
    ///
    /// The chain is still a valid tree, so every query keeps working; it is
    /// simply as unbalanced as a tree can be. [`balance`](Self::balance) uses
    /// this as its first phase.
    ///
    /// # Complexity
    ///
    /// O(n), without allocating.
    pub fn linearize(&mut self) {
        self.raw.linearize();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree = OrderedTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.raw)
    }
}

impl<K: Ord> OrderedTree<K> {
    /// Adds a key to the tree.
    ///
    /// Returns whether the key was newly inserted. A key that is already
    /// present leaves the tree unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.size(), 1);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds the maximum number of nodes it can
    /// address.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key)
    }

    /// Returns `true` if the tree contains the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains(key)
    }

    /// Removes a key from the tree. Returns whether the key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([1, 2, 3]);
    /// assert!(tree.delete_element(&2));
    /// assert!(!tree.delete_element(&2));
    /// assert_eq!(tree.size(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn delete_element<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).is_some()
    }

    /// Removes a key from the tree and returns it, if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::from([String::from("a"), String::from("b")]);
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }
}

impl<K: Hash> Hash for OrderedTree<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for key in self {
            key.hash(state);
        }
    }
}

/// Two trees are equal when they hold the same keys, whatever their shapes.
impl<K: PartialEq> PartialEq for OrderedTree<K> {
    fn eq(&self, other: &OrderedTree<K>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for OrderedTree<K> {}

impl<K: Clone> Clone for OrderedTree<K> {
    /// Deep-copies every node. The copy has the same shape as the original and
    /// shares nothing with it.
    fn clone(&self) -> Self {
        OrderedTree {
            raw: self.raw.clone(),
        }
    }

    /// `self` is replaced only once the copy of `source` is complete; if
    /// cloning a key panics, `self` keeps its previous contents.
    fn clone_from(&mut self, source: &Self) {
        let copy = source.raw.clone();
        self.raw = copy;
    }
}

impl<K: fmt::Debug> fmt::Debug for OrderedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Default for OrderedTree<K> {
    fn default() -> Self {
        OrderedTree::new()
    }
}

impl<K: Ord> FromIterator<K> for OrderedTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for OrderedTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Ord + Copy> Extend<&'a K> for OrderedTree<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for OrderedTree<K> {
    /// Inserts the keys in array order, then balances the tree.
    fn from(keys: [K; N]) -> Self {
        let mut tree: OrderedTree<K> = keys.into_iter().collect();
        tree.balance();
        tree
    }
}

impl<K> IntoIterator for OrderedTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an owning iterator over the keys in ascending order.
    fn into_iter(mut self) -> IntoIter<K> {
        self.raw.linearize();
        IntoIter {
            raw: self.raw,
        }
    }
}

impl<'a, K> IntoIterator for &'a OrderedTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(raw: &'a RawOrderedTree<K>) -> Self {
        let mut iter = Iter {
            raw,
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: raw.len(),
        };
        iter.push_left_spine(raw.root());
        iter.push_right_spine(raw.root());
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.front.push(handle);
            link = self.raw.node(handle).left();
        }
    }

    fn push_right_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.back.push(handle);
            link = self.raw.node(handle).right();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw;
        let handle = self.front.pop()?;
        let node = raw.node(handle);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let raw = self.raw;
        let handle = self.back.pop()?;
        let node = raw.node(handle);
        self.push_right_spine(node.left());
        self.remaining -= 1;
        Some(node.key())
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        // The chain's head has no left child, so this is O(1).
        self.raw.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.raw.len();
        (len, Some(len))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.raw.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.raw.len()).finish()
    }
}

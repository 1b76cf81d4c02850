use alloc::collections::VecDeque;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::OrderedTree;
use crate::raw::{Handle, RawOrderedTree};

type Stack = SmallVec<[Handle; 32]>;

/// One step of a level-order walk, as produced by [`OrderedTree::levels`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum LevelItem<'a, K> {
    /// A node, with the number of nodes in its subtree.
    Node {
        /// The node's key.
        key: &'a K,
        /// Number of nodes in the subtree rooted here, including itself.
        subtree_size: usize,
    },
    /// A missing child on the current level.
    Empty,
    /// The current level is finished.
    LevelBreak,
}

/// A breadth-first iterator over the shape of an `OrderedTree`.
///
/// This `struct` is created by the [`levels`](OrderedTree::levels) method.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Levels<'a, K> {
    raw: &'a RawOrderedTree<K>,
    queue: VecDeque<Pending>,
}

#[derive(Clone, Copy)]
enum Pending {
    Node(Handle),
    Empty,
    LevelBreak,
}

impl<K> OrderedTree<K> {
    /// Calls `visit` with every key in pre-order: node, left subtree, right
    /// subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 2, 3, 4, 5, 6, 7]);
    /// let mut keys = Vec::new();
    /// tree.visit_pre(|&k| keys.push(k));
    /// assert_eq!(keys, [4, 2, 1, 3, 6, 5, 7]);
    /// ```
    pub fn visit_pre<F: FnMut(&K)>(&self, mut visit: F) {
        let mut stack: Stack = self.raw.root().into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.raw.node(handle);
            visit(node.key());
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    /// Calls `visit` with every key in symmetric order (left subtree, node,
    /// right subtree), which is ascending key order.
    pub fn visit_sym<F: FnMut(&K)>(&self, mut visit: F) {
        for key in self.iter() {
            visit(key);
        }
    }

    /// Calls `visit` with every key in post-order: left subtree, right
    /// subtree, node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::OrderedTree;
    ///
    /// let tree = OrderedTree::from([1, 2, 3, 4, 5, 6, 7]);
    /// let mut keys = Vec::new();
    /// tree.visit_post(|&k| keys.push(k));
    /// assert_eq!(keys, [1, 3, 2, 5, 7, 6, 4]);
    /// ```
    pub fn visit_post<F: FnMut(&K)>(&self, mut visit: F) {
        // The flag marks nodes whose children have already been pushed.
        let mut stack: SmallVec<[(Handle, bool); 32]> = SmallVec::new();
        stack.extend(self.raw.root().map(|root| (root, false)));
        while let Some((handle, expanded)) = stack.pop() {
            let node = self.raw.node(handle);
            if expanded {
                visit(node.key());
                continue;
            }
            stack.push((handle, true));
            stack.extend(node.right().map(|right| (right, false)));
            stack.extend(node.left().map(|left| (left, false)));
        }
    }

    /// Walks the tree level by level, left to right.
    ///
    /// Every node yields its key and subtree size, every missing child on a
    /// level yields [`LevelItem::Empty`], and each level ends with
    /// [`LevelItem::LevelBreak`]. The last level consists only of `Empty`
    /// items. This is enough for a caller to draw the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ostree::{LevelItem, OrderedTree};
    ///
    /// let tree = OrderedTree::from([1, 2]);
    /// let items: Vec<_> = tree.levels().collect();
    /// assert_eq!(
    ///     items,
    ///     [
    ///         LevelItem::Node { key: &1, subtree_size: 2 },
    ///         LevelItem::LevelBreak,
    ///         LevelItem::Empty,
    ///         LevelItem::Node { key: &2, subtree_size: 1 },
    ///         LevelItem::LevelBreak,
    ///         LevelItem::Empty,
    ///         LevelItem::Empty,
    ///         LevelItem::LevelBreak,
    ///     ]
    /// );
    /// ```
    pub fn levels(&self) -> Levels<'_, K> {
        let mut queue = VecDeque::new();
        queue.push_back(Pending::link(self.raw.root()));
        queue.push_back(Pending::LevelBreak);
        Levels {
            raw: &self.raw,
            queue,
        }
    }
}

impl Pending {
    fn link(link: Option<Handle>) -> Self {
        link.map_or(Pending::Empty, Pending::Node)
    }
}

impl<'a, K> Iterator for Levels<'a, K> {
    type Item = LevelItem<'a, K>;

    fn next(&mut self) -> Option<LevelItem<'a, K>> {
        let raw = self.raw;
        match self.queue.pop_front()? {
            Pending::LevelBreak => {
                if !self.queue.is_empty() {
                    self.queue.push_back(Pending::LevelBreak);
                }
                Some(LevelItem::LevelBreak)
            }
            Pending::Empty => Some(LevelItem::Empty),
            Pending::Node(handle) => {
                let node = raw.node(handle);
                self.queue.push_back(Pending::link(node.left()));
                self.queue.push_back(Pending::link(node.right()));
                Some(LevelItem::Node {
                    key: node.key(),
                    subtree_size: node.size().to_usize(),
                })
            }
        }
    }
}

impl<K> FusedIterator for Levels<'_, K> {}

impl<K> fmt::Debug for Levels<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Levels").field("pending", &self.queue.len()).finish()
    }
}

use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Slot};
use super::size::Size;
use crate::tracing_helpers::{debug_log, trace_log};

/// Handles visited on the way down from the root, outermost first.
type Path = SmallVec<[Handle; 32]>;

/// The core binary search tree backing `OrderedTree`.
///
/// Nodes live in an arena and link to their children by handle. Mutations
/// walk down iteratively, remember the path, and then fix the subtree sizes
/// of every node on it, so no walk depends on native stack depth.
pub(crate) struct RawOrderedTree<K> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<K> RawOrderedTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys in the tree, read from the root's counter.
    pub(crate) fn len(&self) -> usize {
        self.subtree_size(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node at once; the arena owns them all, so nothing recurses.
    pub(crate) fn clear(&mut self) {
        debug_log!(len = self.len(), "tree cleared");
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Returns the root handle, if any.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    /// Returns the size of the subtree behind a child link.
    #[inline]
    pub(crate) fn subtree_size(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size().to_usize())
    }

    fn slot_child(&self, slot: Slot) -> Option<Handle> {
        match slot {
            Slot::Root => self.root,
            Slot::Left(parent) => self.nodes.get(parent).left(),
            Slot::Right(parent) => self.nodes.get(parent).right(),
        }
    }

    fn set_slot(&mut self, slot: Slot, child: Option<Handle>) {
        match slot {
            Slot::Root => self.root = child,
            Slot::Left(parent) => self.nodes.get_mut(parent).set_left(child),
            Slot::Right(parent) => self.nodes.get_mut(parent).set_right(child),
        }
    }

    fn alloc_node(&mut self, key: K) -> Handle {
        let handle = self.nodes.alloc(Node::leaf(key));
        trace_log!(handle = ?handle, "node created");
        handle
    }

    fn release_node(&mut self, handle: Handle) -> K {
        trace_log!(handle = ?handle, "node released");
        self.nodes.take(handle).into_key()
    }

    /// Returns the smallest key.
    pub(crate) fn first(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        Some(self.nodes.get(current).key())
    }

    /// Returns the largest key.
    pub(crate) fn last(&self) -> Option<&K> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        Some(self.nodes.get(current).key())
    }

    /// Unlinks the minimum node of the subtree held by `slot`.
    ///
    /// Every node passed on the way down loses one descendant, so its counter
    /// is decremented. The minimum has no left child; its right subtree takes
    /// its place. The returned node is detached: no children, size one.
    fn detach_min(&mut self, mut slot: Slot) -> Option<Handle> {
        let mut current = self.slot_child(slot)?;
        while let Some(left) = self.nodes.get(current).left() {
            self.nodes.get_mut(current).decrement_size();
            slot = Slot::Left(current);
            current = left;
        }
        let right = self.nodes.get(current).right();
        self.set_slot(slot, right);

        let node = self.nodes.get_mut(current);
        node.set_right(None);
        node.set_size(Size::ONE);
        Some(current)
    }

    /// Mirror image of [`detach_min`](Self::detach_min).
    fn detach_max(&mut self, mut slot: Slot) -> Option<Handle> {
        let mut current = self.slot_child(slot)?;
        while let Some(right) = self.nodes.get(current).right() {
            self.nodes.get_mut(current).decrement_size();
            slot = Slot::Right(current);
            current = right;
        }
        let left = self.nodes.get(current).left();
        self.set_slot(slot, left);

        let node = self.nodes.get_mut(current);
        node.set_left(None);
        node.set_size(Size::ONE);
        Some(current)
    }

    /// Removes and returns the smallest key.
    pub(crate) fn pop_first(&mut self) -> Option<K> {
        let handle = self.detach_min(Slot::Root)?;
        Some(self.release_node(handle))
    }

    /// Removes and returns the largest key.
    pub(crate) fn pop_last(&mut self) -> Option<K> {
        let handle = self.detach_max(Slot::Root)?;
        Some(self.release_node(handle))
    }

    /// Gets a key by its rank (0-indexed position in ascending order).
    pub(crate) fn select(&self, rank: usize) -> Option<&K> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let node = self.nodes.get(current);
            let left_size = self.subtree_size(node.left());
            match remaining.cmp(&left_size) {
                Less => current = node.left()?,
                Equal => return Some(node.key()),
                Greater => {
                    remaining -= left_size + 1;
                    current = node.right()?;
                }
            }
        }
    }

    /// Rewrites the tree into a chain threaded through the `right` links in
    /// ascending order, and returns its length.
    ///
    /// Nodes are prepended during a reverse in-order walk, so each node's
    /// counter becomes the number of nodes from itself to the end of the
    /// chain. The chain is therefore still a valid (degenerate) tree and all
    /// queries keep working on it. No node is allocated or released.
    pub(crate) fn linearize(&mut self) -> usize {
        let mut list: Option<Handle> = None;
        let mut count = 0;
        let mut stack: Path = SmallVec::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).right();
            }
            let Some(handle) = stack.pop() else {
                break;
            };

            // The right subtree is already in the list; the left one is next.
            let node = self.nodes.get_mut(handle);
            current = node.left();
            count += 1;
            node.set_left(None);
            node.set_right(list);
            node.set_size(Size::from_usize(count));
            list = Some(handle);
        }

        self.root = list;
        debug_log!(len = count, "tree linearized");
        count
    }

    /// Builds a balanced subtree from the first `count` nodes of `list` and
    /// advances `list` past them.
    ///
    /// The left subtree gets `(count - 1) / 2` nodes and the right subtree
    /// `count / 2`, so for an even count the extra node goes right.
    fn arborize(&mut self, list: &mut Option<Handle>, count: usize) -> Option<Handle> {
        if count == 0 {
            return None;
        }

        let left = self.arborize(list, (count - 1) / 2);
        let root = (*list)?;
        let node = self.nodes.get_mut(root);
        *list = node.right();
        node.set_left(left);
        node.set_size(Size::from_usize(count));

        let right = self.arborize(list, count / 2);
        self.nodes.get_mut(root).set_right(right);
        Some(root)
    }

    /// Rebuilds the tree into its balanced shape in linear time.
    pub(crate) fn balance(&mut self) {
        let count = self.linearize();
        debug_assert_eq!(count, self.nodes.len(), "balance: unreachable nodes in the arena");
        let mut list = self.root.take();
        self.root = self.arborize(&mut list, count);
        debug_assert!(list.is_none(), "balance: nodes left over after arborize");
        debug_log!(len = count, "tree balanced");
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 32]> = SmallVec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((handle, depth)) = stack.pop() {
            let node = self.nodes.get(handle);
            if node.is_leaf() {
                height = height.max(depth);
                continue;
            }
            if let Some(left) = node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1));
            }
        }
        height
    }
}

impl<K: Ord> RawOrderedTree<K> {
    /// Searches for a key and returns its node handle if found.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;

        loop {
            let node = self.nodes.get(current);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left()?,
                Equal => return Some(current),
                Greater => node.right()?,
            };
        }
    }

    /// Returns true if the tree contains the specified key.
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key as a new leaf. Returns false, leaving the tree untouched,
    /// if the key is already present.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let mut path: Path = SmallVec::new();
        let mut slot = Slot::Root;

        while let Some(current) = self.slot_child(slot) {
            slot = match key.cmp(self.nodes.get(current).key()) {
                Less => Slot::Left(current),
                Equal => return false,
                Greater => Slot::Right(current),
            };
            path.push(current);
        }

        let leaf = self.alloc_node(key);
        self.set_slot(slot, Some(leaf));
        for &ancestor in &path {
            self.nodes.get_mut(ancestor).increment_size();
        }
        true
    }

    /// Removes a key from the tree and returns it.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// is detached from the right subtree first and then takes over the
    /// removed node's links and counter (less one).
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path: Path = SmallVec::new();
        let mut slot = Slot::Root;

        let target = loop {
            let current = self.slot_child(slot)?;
            slot = match key.cmp(self.nodes.get(current).key().borrow()) {
                Less => Slot::Left(current),
                Equal => break current,
                Greater => Slot::Right(current),
            };
            path.push(current);
        };

        for &ancestor in &path {
            self.nodes.get_mut(ancestor).decrement_size();
        }

        let (left, right, size) = {
            let node = self.nodes.get(target);
            (node.left(), node.right(), node.size())
        };
        let replacement = match (left, right) {
            (None, only) | (only, None) => only,
            (Some(left), Some(_)) => {
                let successor = self.detach_min(Slot::Right(target))?;
                // Detaching may have replaced the right child itself.
                let right = self.nodes.get(target).right();
                let node = self.nodes.get_mut(successor);
                node.set_left(Some(left));
                node.set_right(right);
                node.set_size(size.decrement());
                Some(successor)
            }
        };

        self.set_slot(slot, replacement);
        Some(self.release_node(target))
    }

    /// Returns the rank (0-indexed position) of a key.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root?;
        let mut rank = 0;

        loop {
            let node = self.nodes.get(current);
            let left_size = self.subtree_size(node.left());
            current = match key.cmp(node.key().borrow()) {
                Less => node.left()?,
                Equal => return Some(rank + left_size),
                Greater => {
                    rank += left_size + 1;
                    node.right()?
                }
            };
        }
    }
}

impl<K: Clone> Clone for RawOrderedTree<K> {
    /// Copies the tree node by node into a fresh, compact arena.
    ///
    /// The copy is built in a separate value; if cloning a key panics, the
    /// partial copy is dropped and `self` is untouched.
    fn clone(&self) -> Self {
        let mut cloned = Self::with_capacity(self.len());
        let mut stack: SmallVec<[(Handle, Slot); 32]> = SmallVec::new();
        if let Some(root) = self.root {
            stack.push((root, Slot::Root));
        }

        while let Some((original, slot)) = stack.pop() {
            let node = self.nodes.get(original);
            let copy = cloned.alloc_node(node.key().clone());
            cloned.nodes.get_mut(copy).set_size(node.size());
            cloned.set_slot(slot, Some(copy));

            if let Some(right) = node.right() {
                stack.push((right, Slot::Right(copy)));
            }
            if let Some(left) = node.left() {
                stack.push((left, Slot::Left(copy)));
            }
        }

        cloned
    }
}

/// Failure of an [`OrderedTree`](crate::OrderedTree) operation whose
/// precondition does not hold.
///
/// A missing key is never an error: lookups report it through `bool` or
/// `Option`. Only the two explicit preconditions below produce a `TreeError`.
///
/// # Examples
///
/// ```
/// use ostree::{OrderedTree, TreeError};
///
/// let mut tree: OrderedTree<i32> = OrderedTree::new();
/// assert_eq!(tree.delete_min(), Err(TreeError::EmptyTree));
///
/// tree.insert(1);
/// assert_eq!(tree.select(3), Err(TreeError::OutOfRange { rank: 3, len: 1 }));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum TreeError {
    /// The tree holds no keys.
    #[error("the tree is empty")]
    EmptyTree,
    /// The requested rank is not below the number of keys.
    #[error("rank {rank} is out of range for a tree of {len} keys")]
    OutOfRange {
        /// The rank that was requested.
        rank: usize,
        /// The number of keys in the tree.
        len: usize,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        assert_eq!(TreeError::EmptyTree.to_string(), "the tree is empty");
        assert_eq!(
            TreeError::OutOfRange { rank: 10, len: 3 }.to_string(),
            "rank 10 is out of range for a tree of 3 keys"
        );
    }
}

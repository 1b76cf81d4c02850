/// A zero-based position in the ascending key order of an
/// [`OrderedTree`](crate::OrderedTree).
///
/// # Examples
///
/// ```
/// use ostree::{OrderedTree, Rank};
///
/// let mut tree = OrderedTree::new();
/// tree.insert("b");
/// tree.insert("a");
///
/// assert_eq!(tree[Rank(0)], "a");
/// assert_eq!(tree.rank(&"b").map(Rank), Some(Rank(1)));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

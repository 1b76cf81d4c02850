//! An order-statistic binary search tree for Rust.
//!
//! This crate provides [`OrderedTree`], an ordered set of unique keys stored in
//! a binary search tree whose nodes count their own subtrees. The counters
//! answer two questions in time proportional to the tree's height:
//!
//! - [`select`](OrderedTree::select) - Get the key at a given sorted position
//! - [`rank`](OrderedTree::rank) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest key
//!
//! # Example
//!
//! ```
//! use ostree::{OrderedTree, Rank, TreeError};
//!
//! let mut tree = OrderedTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key);
//! }
//!
//! assert_eq!(tree.size(), 7);
//! assert_eq!(tree.select(6), Ok(&9));
//! assert_eq!(tree.rank(&7), Some(4));
//! assert_eq!(tree[Rank(0)], 1);
//! assert_eq!(tree.select(10), Err(TreeError::OutOfRange { rank: 10, len: 7 }));
//!
//! // Sorted insertions degrade the tree to a list; `balance` rebuilds it.
//! let mut sorted: OrderedTree<u32> = (0..100).collect();
//! assert_eq!(sorted.height(), 100);
//! sorted.balance();
//! assert_eq!(sorted.height(), 7);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No self-balancing** - Shape follows insertion order until [`balance`](OrderedTree::balance) is called
//! - **Linear-time rebalancing** - Linearize into a sorted chain, then rebuild by recursive median selection
//! - **`tracing`** (optional) - Emits node construction, release and rebalancing events
//!
//! # Implementation
//!
//! Nodes are stored in an arena and link to their children by index, so
//! dropping a tree never recurses, however skewed it is. Every walk that can
//! follow a long spine runs with an explicit stack.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;
mod tracing_helpers;

pub mod ordered_tree;

pub use error::TreeError;
pub use order_statistic::Rank;
pub use ordered_tree::{LevelItem, OrderedTree};

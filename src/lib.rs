//! This crate exposes a mutable, node-linked Binary Search Tree (BST) with
//! ordered-set semantics and on-demand rebalancing.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored items. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one item and
//! sometimes has child `Node`s. The invariants kept by [`OrderedTree`] are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have an
//!    item less than or equal to its own item. Adding only ever puts strictly smaller
//!    items on the left. Equal items show up there only after a `Node` with two children
//!    is removed: the largest item of its left subtree is lifted into its place and may
//!    leave equal duplicates behind.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have an
//!    item greater than **or equal to** its own item. Duplicates are therefore
//!    allowed and always land to the right of an equal ancestor.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for items in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`). The tree never
//! balances itself while items are added or removed. Instead,
//! [`OrderedTree::rebalance`] rebuilds it from its sorted content so that its
//! height becomes `O(lg N)` again, and [`OrderedTree::is_balanced`] tells whether
//! that is needed.
//!
//! # Examples
//!
//! ```
//! use linked_bst::OrderedTree;
//!
//! let mut tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! assert_eq!(tree.inorder(), vec![&1, &3, &4, &5, &7, &8, &9]);
//! assert_eq!(tree.successor(&4), Some(&5));
//! assert_eq!(tree.range_find(&3, &7), vec![&3, &4, &5, &7]);
//!
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
mod node;
mod ordered;
mod util;


pub use error::Error;
pub use iter::Iter;
pub use ordered::OrderedTree;

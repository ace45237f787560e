//! A mutable, node-linked BST. Nodes own their children through `Box`es, so every mutation is
//! plain link surgery on owned slots. The tree never rebalances on its own; call
//! [`OrderedTree::rebalance`] when [`OrderedTree::is_balanced`] says it is needed.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, OrderedTree};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! assert_eq!(tree.find(&1), Some(&1));
//!
//! // Adding an equal item keeps both.
//! tree.add(1);
//! assert_eq!(tree.len(), 2);
//!
//! // Removing returns the item. Removing something absent is an error.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert_eq!(tree.remove(&1), Err(Error::ItemNotFound));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::Error;
use crate::iter::Iter;
use crate::node::{take_largest, Link, Node};
use crate::util;

/// A Binary Search Tree storing single ordered items. Equal items are allowed and are added to
/// the right of the first equal item on their insertion path. Removing a node with two children
/// can leave an equal item in its left subtree, so searches treat the left side as `<=`.
pub struct OrderedTree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Copies node by node, so the clone has exactly the same shape.
impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut root = None;
        let mut stack = Vec::new();
        if let Some(node) = self.root.as_deref() {
            stack.push((node, &mut root));
        }
        while let Some((node, slot)) = stack.pop() {
            let copy = slot.insert(Node::new_boxed(node.item.clone()));
            let Node { left, right, .. } = &mut **copy;
            if let Some(child) = node.left() {
                stack.push((child, left));
            }
            if let Some(child) = node.right() {
                stack.push((child, right));
            }
        }
        Self {
            root,
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("size", &self.size)
            .field("root", &self.root)
            .finish()
    }
}

/// Renders the tree rotated 90 degrees counter-clockwise: the right subtree on top, each item
/// on its own line indented by one `"| "` per level of depth.
///
/// ```
/// use linked_bst::OrderedTree;
///
/// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
/// assert_eq!(tree.to_string(), "| 3\n2\n| 1\n");
/// ```
impl<T> fmt::Display for OrderedTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref().map(|node| (node, 0));
        loop {
            while let Some((node, depth)) = current {
                stack.push((node, depth));
                current = node.right().map(|right| (right, depth + 1));
            }
            let Some((node, depth)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(depth), node.item)?;
            current = node.left().map(|left| (left, depth + 1));
        }
    }
}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> OrderedTree<T> {
    /// Generates a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items stored, duplicates included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every item from the tree.
    pub fn clear(&mut self) {
        // Unlink children before each node drops so a degenerate tree doesn't recurse once per
        // level.
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.size = 0;
    }

    /// A lazy pre-order iterator: every item comes before the items of its left subtree, which
    /// come before those of its right subtree. Each call starts over from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&2, &1, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.size)
    }

    /// The number of links on the longest path from the root to a leaf. An empty tree has a
    /// height of `-1` and a single item a height of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.add(1);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.add(2);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        let mut level: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        let mut height = -1;
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
        }
        height
    }

    /// Whether the tree is no taller than `ceil(log2(len + 1) - 1)`. This compares the height of
    /// the whole tree against its size; it says nothing about individual subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [1, 2, 3].into_iter().collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.height() <= util::height_bound(self.size)
    }

    /// All items in non-decreasing order. In a tree built only by adding, equal items appear in
    /// the order they were added. Removals make no promise about the order of equal items.
    pub fn inorder(&self) -> Vec<&T> {
        self.collect_inorder(|_| true, |_| true, |_| true)
    }

    /// Walks the tree in order, only descending left past items for which `go_left` holds and
    /// right past items for which `go_right` holds, and keeps the visited items matching `keep`.
    fn collect_inorder<'a>(
        &'a self,
        go_left: impl Fn(&T) -> bool,
        go_right: impl Fn(&T) -> bool,
        keep: impl Fn(&T) -> bool,
    ) -> Vec<&'a T> {
        let mut items = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left().filter(|_| go_left(&node.item));
            }
            let Some(node) = stack.pop() else {
                return items;
            };
            if keep(&node.item) {
                items.push(&node.item);
            }
            current = node.right().filter(|_| go_right(&node.item));
        }
    }

    /// Empties the tree, handing back its items in order.
    fn drain_sorted(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.take();
        self.size = 0;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                return items;
            };
            let Node { item, right, .. } = *node;
            items.push(item);
            current = right;
        }
    }
}

impl<T> OrderedTree<T>
where
    T: Ord,
{
    /// Potentially finds the stored item equal to `item`. If no node holds an equal item,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.add(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match item.cmp(&node.item) {
                Ordering::Equal => return Some(&node.item),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether an item equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Items less than a node go left, anything else (equal items
    /// included) goes right. The tree is not rebalanced.
    pub fn add(&mut self, item: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if item < node.item {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Removes the first item equal to `item` found on the way down from the root and returns
    /// it.
    ///
    /// A node with two children keeps its place: it takes over the largest item of its left
    /// subtree and the node that held that item is spliced out instead. Any other node is
    /// spliced out directly, its only child (if any) taking its place.
    ///
    /// # Errors
    ///
    /// [`Error::ItemNotFound`] if no equal item is stored. The tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, OrderedTree};
    ///
    /// let mut tree: OrderedTree<_> = [1, 3, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&3), Ok(3));
    /// assert_eq!(tree.remove(&42), Err(Error::ItemNotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T, Error> {
        let mut link = &mut self.root;
        loop {
            let ordering = link
                .as_deref()
                .map(|node| item.cmp(&node.item))
                .ok_or(Error::ItemNotFound)?;
            if ordering == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return Err(Error::ItemNotFound);
            };
            link = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let node = link.as_deref_mut().ok_or(Error::ItemNotFound)?;
        let removed = if node.left.is_some() && node.right.is_some() {
            trace!("removing node with two children, lifting its predecessor");
            let lifted = take_largest(&mut node.left).ok_or(Error::ItemNotFound)?;
            mem::replace(&mut node.item, lifted)
        } else {
            trace!("splicing out node with at most one child");
            let node = link.take().ok_or(Error::ItemNotFound)?;
            let Node { item, left, right } = *node;
            *link = left.or(right);
            item
        };

        self.size -= 1;
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item` and returns the old one, or
    /// `None` if there is no equal item.
    ///
    /// The tree is not re-sorted, so `new_item` must compare equal to `item`. Replacing with
    /// anything else breaks the ordering of the tree.
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match item.cmp(&node.item) {
                Ordering::Equal => return Some(mem::replace(&mut node.item, new_item)),
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
            };
        }
        None
    }

    /// All items `x` with `low <= x <= high`, in the same order [`OrderedTree::inorder`] lists
    /// them. Subtrees entirely outside the range are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert_eq!(tree.range_find(&2, &7), vec![&3, &4, &5, &7]);
    /// ```
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        self.collect_inorder(
            |item| low <= item,
            |item| item <= high,
            |item| low <= item && item <= high,
        )
    }

    /// Rebuilds the tree from its sorted items: the item at index `ceil((len - 1) / 2)` of a run
    /// is added first, then the runs before and after it are rebuilt the same way.
    ///
    /// A run of one item is only added if no equal item has been added already, so an item
    /// with duplicates can lose some of them here.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&4, &2, &1, &3, &6, &5, &7]);
    /// ```
    pub fn rebalance(&mut self) {
        debug!(
            "rebalancing {} items from height {}",
            self.size,
            self.height()
        );
        let items = self.drain_sorted();
        self.rebuild(items);
        debug!(
            "rebalanced to {} items at height {}",
            self.size,
            self.height()
        );
    }

    /// Recursive helper for [`OrderedTree::rebalance`]. `items` must be sorted.
    fn rebuild(&mut self, mut items: Vec<T>) {
        match items.len() {
            0 => {}
            1 => {
                if let Some(item) = items.pop() {
                    if self.contains(&item) {
                        debug!("dropping duplicate item while rebalancing");
                    } else {
                        self.add(item);
                    }
                }
            }
            len => {
                let pivot = util::pivot_index(len);
                let after = items.split_off(pivot + 1);
                if let Some(item) = items.pop() {
                    self.add(item);
                }
                self.rebuild(items);
                self.rebuild(after);
            }
        }
    }

    /// The item following the first occurrence of `item` in sorted order, or `None` if there
    /// isn't one. `item` itself does not need to be stored. When it has duplicates the neighbour
    /// is an equal item.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&4), Some(&5));
    /// assert_eq!(tree.successor(&6), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T> {
        // `first` is the leftmost node in order that is not less than `item`, `after_first` the
        // ancestor it follows in order when it has no right subtree.
        let mut first: Option<&Node<T>> = None;
        let mut after_first = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.item >= *item {
                after_first = first;
                first = Some(node);
                node.left()
            } else {
                node.right()
            };
        }

        let first = first?;
        if first.item != *item {
            return Some(&first.item);
        }
        first
            .right()
            .map(Node::smallest)
            .or(after_first)
            .map(|node| &node.item)
    }

    /// The item preceding the first occurrence of `item` in sorted order, which is the largest
    /// item less than `item`, or `None` if there isn't one. `item` itself does not need to be
    /// stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&4), Some(&3));
    /// assert_eq!(tree.predecessor(&6), Some(&5));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        let mut candidate = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.item < *item {
                candidate = Some(&node.item);
                node.right()
            } else {
                node.left()
            };
        }
        candidate
    }
}

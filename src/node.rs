/// An owned, possibly empty, child slot. Every `Node` is owned by exactly one `Link`.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A `Node` holds one item and two child links. It has no behaviour of its own beyond being
/// spliced in and out of an [`OrderedTree`](crate::OrderedTree).
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Construct a new leaf `Node` holding `item`.
    pub(crate) fn new_boxed(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The leftmost node below (and including) this one.
    pub(crate) fn smallest(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The rightmost node below (and including) this one.
    pub(crate) fn largest(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }
}

/// Excises the rightmost node of the subtree hanging off `link` and returns its item. The
/// excised node has no right child, so its own left child takes its place in its parent's slot.
///
/// Returns `None` only when `link` is empty.
pub(crate) fn take_largest<T>(mut link: &mut Link<T>) -> Option<T> {
    while link.as_ref().map_or(false, |node| node.right.is_some()) {
        link = &mut link.as_mut()?.right;
    }

    let node = *link.take()?;
    *link = node.left;
    Some(node.item)
}

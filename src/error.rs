use thiserror::Error;

/// Errors returned by fallible [`OrderedTree`](crate::OrderedTree) operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The item asked to be removed is not stored in the tree.
    #[error("item not in tree")]
    ItemNotFound,
}

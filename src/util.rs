/// Index of the pivot picked out of a sorted run of `len` items when rebuilding a tree, i.e.
/// `ceil((len - 1) / 2)`. Must not be called with an empty run.
pub(crate) fn pivot_index(len: usize) -> usize {
    (len - 1).div_ceil(2)
}

/// The tallest a tree of `size` nodes may be while still counting as balanced:
/// `ceil(log2(size + 1) - 1)`. The ceiling is taken after subtracting one.
pub(crate) fn height_bound(size: usize) -> isize {
    ((size as f64 + 1.0).log2() - 1.0).ceil() as isize
}

use linked_bst::{Error, OrderedTree};
use quickcheck_macros::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and to a sorted `Vec`.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same multiset of items in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, model: &mut Vec<T>)
where
    T: Ord + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                tree.add(x.clone());
                let pos = model.partition_point(|y| y <= x);
                model.insert(pos, x.clone());
            }
            Op::Remove(x) => match model.binary_search(x) {
                Ok(pos) => assert_eq!(tree.remove(x), Ok(model.remove(pos))),
                Err(_) => assert_eq!(tree.remove(x), Err(Error::ItemNotFound)),
            },
        }
    }
}

/// Sorted, duplicate-free copy of `xs`.
fn distinct(xs: &[i8]) -> Vec<i8> {
    let mut xs = xs.to_vec();
    xs.sort_unstable();
    xs.dedup();
    xs
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);
    tree.len() == model.len() && tree.inorder() == model.iter().collect::<Vec<_>>()
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    tree.len() == xs.len() && tree.inorder().windows(2).all(|w| w[0] <= w[1])
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| tree.find(x).is_none() && !tree.contains(x))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut still_present = xs;

    for remove in &removes {
        let len = tree.len();
        match still_present.iter().position(|x| x == remove) {
            Some(pos) => {
                still_present.swap_remove(pos);
                assert_eq!(tree.remove(remove), Ok(*remove));
                assert_eq!(tree.len(), len - 1);
            }
            None => {
                assert_eq!(tree.remove(remove), Err(Error::ItemNotFound));
                assert_eq!(tree.len(), len);
            }
        }
    }

    removes
        .iter()
        .filter(|x| !still_present.contains(x))
        .all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn range_find_is_filtered_inorder(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();

    let expected: Vec<_> = tree
        .inorder()
        .into_iter()
        .filter(|&&x| low <= x && x <= high)
        .collect();
    tree.range_find(&low, &high) == expected
}

#[quickcheck]
fn rebalance_balances_distinct_items(xs: Vec<i8>) -> bool {
    let xs = distinct(&xs);
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();

    tree.rebalance();
    tree.is_balanced() && tree.inorder() == xs.iter().collect::<Vec<_>>()
}

#[quickcheck]
fn rebalance_keeps_every_distinct_item(xs: Vec<i8>) -> bool {
    let mut tree: OrderedTree<_> = xs.iter().copied().collect();

    tree.rebalance();
    let mut after: Vec<_> = tree.inorder().into_iter().copied().collect();
    after.dedup();
    tree.len() <= xs.len() && after == distinct(&xs)
}

/// The neighbours of the first occurrence of `x` in `sorted`, or of where `x` would be added.
fn sorted_neighbours(sorted: &[i8], x: i8) -> (Option<&i8>, Option<&i8>) {
    // Index of the first item not less than `x`: where `x` is, or where it would go.
    let pos = sorted.partition_point(|y| *y < x);
    let present = sorted.get(pos) == Some(&x);
    let successor = if present {
        sorted.get(pos + 1)
    } else {
        sorted.get(pos)
    };
    let predecessor = pos.checked_sub(1).map(|pos| &sorted[pos]);
    (predecessor, successor)
}

/// Builds a tree full of duplicates and then removes items from it, so that two-child removals
/// lift duplicated items. Returns the tree and its remaining items, sorted.
fn tree_after_removals(xs: &[i8], removes: &[i8]) -> (OrderedTree<i8>, Vec<i8>) {
    let mut tree = OrderedTree::new();
    let mut model = Vec::new();
    let ops: Vec<_> = xs
        .iter()
        .map(|x| Op::Add(x % 8))
        .chain(removes.iter().map(|x| Op::Remove(x % 8)))
        .collect();

    do_ops(&ops, &mut tree, &mut model);
    (tree, model)
}

#[quickcheck]
fn neighbours_match_sorted_items(xs: Vec<i8>, x: i8) -> bool {
    let tree: OrderedTree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    let (predecessor, successor) = sorted_neighbours(&sorted, x);
    tree.successor(&x) == successor && tree.predecessor(&x) == predecessor
}

#[quickcheck]
fn neighbours_match_sorted_items_after_removals(xs: Vec<i8>, removes: Vec<i8>, x: i8) -> bool {
    let (tree, model) = tree_after_removals(&xs, &removes);
    let x = x % 8;

    let (predecessor, successor) = sorted_neighbours(&model, x);
    tree.successor(&x) == successor && tree.predecessor(&x) == predecessor
}

#[quickcheck]
fn range_find_is_filtered_inorder_after_removals(
    xs: Vec<i8>,
    removes: Vec<i8>,
    low: i8,
    high: i8,
) -> bool {
    let (tree, model) = tree_after_removals(&xs, &removes);
    let (low, high) = (low % 8, high % 8);

    let expected: Vec<_> = model.iter().filter(|&&x| low <= x && x <= high).collect();
    tree.range_find(&low, &high) == expected
        && tree.inorder() == model.iter().collect::<Vec<_>>()
}

#[test]
fn neighbours_after_lifting_a_duplicate() {
    let mut tree: OrderedTree<_> = [10, 5, 15, 5].into_iter().collect();

    assert_eq!(tree.remove(&10), Ok(10));
    assert_eq!(tree.inorder(), vec![&5, &5, &15]);
    assert_eq!(tree.successor(&5), Some(&5));
    assert_eq!(tree.predecessor(&5), None);
    assert_eq!(tree.range_find(&5, &5), vec![&5, &5]);
}

#[quickcheck]
fn clone_preserves_shape(xs: Vec<i8>) -> bool {
    let tree: OrderedTree<_> = xs.into_iter().collect();
    let cloned = tree.clone();

    tree.iter().eq(cloned.iter()) && tree.height() == cloned.height()
}

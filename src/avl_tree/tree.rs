use crate::arena::Handle;
use crate::avl_tree::node::Heights;
use crate::bst::{self, Insertion, Node};
use crate::compare::Compare;
use crate::entry::Entry;
use crate::error::{Error, Result};
use log::trace;
use std::cmp;

pub type Tree<T, U, C> = bst::Tree<T, U, Heights, C>;

const SLIGHTLY_UNBALANCED_RIGHT: i32 = -1;
const SLIGHTLY_UNBALANCED_LEFT: i32 = 1;
const UNBALANCED_RIGHT: i32 = -2;
const UNBALANCED_LEFT: i32 = 2;

pub fn height<T, U, C>(tree: &Tree<T, U, C>, node: Option<Handle>) -> i32 {
    match node {
        None => -1,
        Some(node) => tree.meta(node).height,
    }
}

fn update_height<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle) {
    let new_height = cmp::max(height(tree, tree.left(node)), height(tree, tree.right(node))) + 1;
    let heights = tree.meta_mut(node);
    heights.prev_height = heights.height;
    heights.height = new_height;
}

pub fn balance_factor<T, U, C>(tree: &Tree<T, U, C>, node: Handle) -> i32 {
    height(tree, tree.left(node)) - height(tree, tree.right(node))
}

fn is_unbalanced<T, U, C>(tree: &Tree<T, U, C>, node: Handle) -> bool {
    let factor = balance_factor(tree, node);
    factor == UNBALANCED_RIGHT || factor == UNBALANCED_LEFT
}

// both nodes change children during a rotation, the lower one first
fn rotate_left<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle) -> Handle {
    let pivot = tree.rotate_left(node);
    update_height(tree, node);
    update_height(tree, pivot);
    pivot
}

fn rotate_right<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle) -> Handle {
    let pivot = tree.rotate_right(node);
    update_height(tree, node);
    update_height(tree, pivot);
    pivot
}

/// Restores the balance of `node` and returns the root of the rebalanced subtree.
fn rebalance<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle) -> Handle {
    match balance_factor(tree, node) {
        UNBALANCED_RIGHT => {
            let right = tree.right(node).expect("Expected right-heavy node to have a right child.");
            if balance_factor(tree, right) == SLIGHTLY_UNBALANCED_LEFT {
                trace!("avl: right-left rotation at {:?}", node);
                rotate_right(tree, right);
            } else {
                trace!("avl: left rotation at {:?}", node);
            }
            rotate_left(tree, node)
        },
        UNBALANCED_LEFT => {
            let left = tree.left(node).expect("Expected left-heavy node to have a left child.");
            if balance_factor(tree, left) == SLIGHTLY_UNBALANCED_RIGHT {
                trace!("avl: left-right rotation at {:?}", node);
                rotate_left(tree, left);
            } else {
                trace!("avl: right rotation at {:?}", node);
            }
            rotate_right(tree, node)
        },
        _ => node,
    }
}

fn adjust_after_insertion<T, U, C>(tree: &mut Tree<T, U, C>, start: Handle) {
    let mut current = Some(start);
    while let Some(node) = current {
        update_height(tree, node);

        // a single rebalance restores the height the subtree had before the insertion
        if is_unbalanced(tree, node) {
            rebalance(tree, node);
            break;
        }

        let Heights { height, prev_height } = *tree.meta(node);
        if height == prev_height {
            break;
        }
        current = tree.parent(node);
    }
}

fn adjust_after_removal<T, U, C>(tree: &mut Tree<T, U, C>, start: Handle) {
    let mut current = Some(start);
    while let Some(node) = current {
        update_height(tree, node);
        let prev_height = tree.meta(node).prev_height;

        // the balance must be checked before the height: removing from the shorter side leaves
        // the height untouched but can still push the balance factor to +/-2
        let subtree = if is_unbalanced(tree, node) {
            rebalance(tree, node)
        } else {
            node
        };

        if tree.meta(subtree).height == prev_height {
            break;
        }
        current = tree.parent(subtree);
    }
}

pub fn insert<T, U, C>(tree: &mut Tree<T, U, C>, key: T, value: U) -> Option<Entry<T, U>>
where
    C: Compare<T>,
{
    match tree.insert_locate(Node::new(key, value, Heights::default())) {
        Insertion::Replaced(entry) => Some(entry),
        Insertion::Root(_) => None,
        Insertion::Attached { parent, .. } => {
            adjust_after_insertion(tree, parent);
            None
        },
    }
}

pub fn remove<T, U, C>(tree: &mut Tree<T, U, C>, key: &T) -> Option<Entry<T, U>>
where
    C: Compare<T>,
{
    let node = tree.search(key)?;
    let erasure = tree.erase(node);
    if let Some(parent) = erasure.parent {
        adjust_after_removal(tree, parent);
    }
    Some(erasure.node.into_entry())
}

fn validate_subtree<T, U, C>(tree: &Tree<T, U, C>, node: Option<Handle>) -> Result<i32> {
    let node = match node {
        Some(node) => node,
        None => return Ok(-1),
    };

    let left_height = validate_subtree(tree, tree.left(node))?;
    let right_height = validate_subtree(tree, tree.right(node))?;
    let actual = cmp::max(left_height, right_height) + 1;
    let recorded = tree.meta(node).height;
    if recorded != actual {
        return Err(Error::StaleHeight { recorded, actual });
    }

    let factor = left_height - right_height;
    if factor.abs() > 1 {
        return Err(Error::Unbalanced { factor });
    }
    Ok(actual)
}

pub fn validate<T, U, C>(tree: &Tree<T, U, C>) -> Result<()>
where
    C: Compare<T>,
{
    tree.validate()?;
    validate_subtree(tree, tree.root()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::{balance_factor, height, insert, remove, validate, Tree};
    use crate::compare::Natural;

    fn build(keys: &[u32]) -> Tree<u32, (), Natural> {
        let mut tree = Tree::new(Natural);
        for key in keys {
            insert(&mut tree, *key, ());
        }
        tree
    }

    fn preorder(tree: &Tree<u32, (), Natural>) -> Vec<u32> {
        tree.preorder().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_single_left_rotation() {
        let tree = build(&[1, 2, 3]);
        assert_eq!(preorder(&tree), vec![2, 1, 3]);
        assert_eq!(height(&tree, tree.root()), 1);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_single_right_rotation() {
        let tree = build(&[3, 2, 1]);
        assert_eq!(preorder(&tree), vec![2, 1, 3]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_right_left_rotation() {
        let tree = build(&[1, 3, 2]);
        assert_eq!(preorder(&tree), vec![2, 1, 3]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_left_right_rotation() {
        let tree = build(&[3, 1, 2]);
        assert_eq!(preorder(&tree), vec![2, 1, 3]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_from_shorter_side() {
        //       3
        //      / \
        //     2   4
        //    /
        //   1
        let mut tree = build(&[3, 2, 4, 1]);
        assert_eq!(balance_factor(&tree, tree.root().unwrap()), 1);

        // the root keeps its height but becomes left-heavy by two
        assert!(remove(&mut tree, &4).is_some());
        assert_eq!(preorder(&tree), vec![2, 1, 3]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_rebalances_multiple_levels() {
        // removing 12 rotates at 11 and then again at the root
        let mut tree = build(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(height(&tree, tree.root()), 4);
        assert!(validate(&tree).is_ok());

        assert!(remove(&mut tree, &12).is_some());
        assert!(validate(&tree).is_ok());
        assert_eq!(height(&tree, tree.root()), 3);
        assert_eq!(
            tree.inorder().map(|(key, _)| *key).collect::<Vec<u32>>(),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        );
    }

    #[test]
    fn test_remove_root_with_two_children() {
        let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        assert_eq!(remove(&mut tree, &5).map(|entry| entry.key), Some(5));
        assert_eq!(
            tree.inorder().map(|(key, _)| *key).collect::<Vec<u32>>(),
            vec![1, 3, 4, 7, 8, 9],
        );
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_insert_and_remove_interleaved() {
        let mut tree = Tree::new(Natural);
        for key in 0..512 {
            insert(&mut tree, (key * 193) % 512, ());
            assert_eq!(tree.arena_len(), tree.len());
            assert!(validate(&tree).is_ok());
        }
        for key in 0..512 {
            assert!(remove(&mut tree, &((key * 71) % 512)).is_some());
            assert_eq!(tree.arena_len(), tree.len());
            assert!(validate(&tree).is_ok());
        }
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = build(&[1, 2]);
        assert!(remove(&mut tree, &3).is_none());
        assert_eq!(tree.len(), 2);
    }
}

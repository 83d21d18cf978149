use crate::arena::Handle;
use crate::bst::{self, Erasure, Insertion, Node};
use crate::compare::Compare;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::node::Color;
use log::trace;

pub type Tree<T, U, C> = bst::Tree<T, U, Color, C>;

pub fn color<T, U, C>(tree: &Tree<T, U, C>, node: Option<Handle>) -> Color {
    match node {
        None => Color::Black,
        Some(node) => *tree.meta(node),
    }
}

fn is_red<T, U, C>(tree: &Tree<T, U, C>, node: Option<Handle>) -> bool {
    color(tree, node) == Color::Red
}

fn set_color<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle, color: Color) {
    *tree.meta_mut(node) = color;
}

fn paint_root_black<T, U, C>(tree: &mut Tree<T, U, C>) {
    if let Some(root) = tree.root() {
        set_color(tree, root, Color::Black);
    }
}

// `current` and `parent` are both red
fn insert_fixup<T, U, C>(tree: &mut Tree<T, U, C>, mut current: Handle, parent: Handle) {
    let mut parent = Some(parent);
    while let Some(mut parent_node) = parent {
        if !is_red(tree, Some(parent_node)) {
            break;
        }

        let grandparent = tree
            .parent(parent_node)
            .expect("Expected red node to have a parent.");
        let parent_is_left = tree.left(grandparent) == Some(parent_node);
        let uncle = if parent_is_left {
            tree.right(grandparent)
        } else {
            tree.left(grandparent)
        };

        if let Some(uncle) = uncle.filter(|uncle| is_red(tree, Some(*uncle))) {
            trace!("red-black: recoloring below {:?}", grandparent);
            set_color(tree, parent_node, Color::Black);
            set_color(tree, uncle, Color::Black);
            set_color(tree, grandparent, Color::Red);
            current = grandparent;
            parent = tree.parent(grandparent);
            continue;
        }

        // the inner grandchild is first rotated to the outside, after which the old child is
        // the new parent
        if parent_is_left {
            if tree.right(parent_node) == Some(current) {
                trace!("red-black: left rotation at {:?}", parent_node);
                tree.rotate_left(parent_node);
                parent_node = current;
            }
            trace!("red-black: right rotation at {:?}", grandparent);
            tree.rotate_right(grandparent);
        } else {
            if tree.left(parent_node) == Some(current) {
                trace!("red-black: right rotation at {:?}", parent_node);
                tree.rotate_right(parent_node);
                parent_node = current;
            }
            trace!("red-black: left rotation at {:?}", grandparent);
            tree.rotate_left(grandparent);
        }
        set_color(tree, parent_node, Color::Black);
        set_color(tree, grandparent, Color::Red);
        break;
    }

    paint_root_black(tree);
}

// Settles the extra black carried by `node`. A placeholder is unlinked and freed, and a real node
// is painted black.
fn resolve<T, U, C>(tree: &mut Tree<T, U, C>, node: Handle) {
    if tree.node(node).is_placeholder() {
        tree.replace_node(node, None);
        tree.free(node);
    } else {
        set_color(tree, node, Color::Black);
    }
}

// `start` is a black placeholder that occupies the position of a removed black leaf, so that the
// doubly black position has a parent and a sibling to rotate around.
fn remove_fixup<T, U, C>(tree: &mut Tree<T, U, C>, start: Handle) {
    let mut current = start;
    while let Some(parent) = tree.parent(current) {
        let sibling_is_left = tree.left(parent) != Some(current);
        let sibling = if sibling_is_left {
            tree.left(parent)
        } else {
            tree.right(parent)
        };
        let sibling = sibling.expect("Expected doubly black node to have a sibling.");

        if is_red(tree, Some(sibling)) {
            trace!("red-black: red sibling {:?}, rotating at {:?}", sibling, parent);
            if sibling_is_left {
                tree.rotate_right(parent);
            } else {
                tree.rotate_left(parent);
            }
            set_color(tree, sibling, Color::Black);
            set_color(tree, parent, Color::Red);
            continue;
        }

        let (outer, inner) = if sibling_is_left {
            (tree.left(sibling), tree.right(sibling))
        } else {
            (tree.right(sibling), tree.left(sibling))
        };

        if let Some(outer) = outer.filter(|outer| is_red(tree, Some(*outer))) {
            trace!("red-black: red outer nephew, rotating at {:?}", parent);
            if sibling_is_left {
                tree.rotate_right(parent);
            } else {
                tree.rotate_left(parent);
            }
            let parent_color = color(tree, Some(parent));
            set_color(tree, sibling, parent_color);
            set_color(tree, parent, Color::Black);
            set_color(tree, outer, Color::Black);
            resolve(tree, current);
            break;
        }

        if let Some(inner) = inner.filter(|inner| is_red(tree, Some(*inner))) {
            trace!("red-black: red inner nephew, rotating at {:?}", sibling);
            if sibling_is_left {
                tree.rotate_left(sibling);
            } else {
                tree.rotate_right(sibling);
            }
            set_color(tree, inner, Color::Black);
            set_color(tree, sibling, Color::Red);
            continue;
        }

        set_color(tree, sibling, Color::Red);
        if is_red(tree, Some(parent)) {
            trace!("red-black: absorbing extra black into {:?}", parent);
            set_color(tree, parent, Color::Black);
            resolve(tree, current);
            break;
        }

        trace!("red-black: pushing extra black up to {:?}", parent);
        resolve(tree, current);
        current = parent;
    }

    paint_root_black(tree);
}

pub fn insert<T, U, C>(tree: &mut Tree<T, U, C>, key: T, value: U) -> Option<Entry<T, U>>
where
    C: Compare<T>,
{
    match tree.insert_locate(Node::new(key, value, Color::Red)) {
        Insertion::Replaced(entry) => Some(entry),
        Insertion::Root(node) => {
            set_color(tree, node, Color::Black);
            None
        },
        Insertion::Attached { node, parent } => {
            if is_red(tree, Some(parent)) {
                insert_fixup(tree, node, parent);
            }
            None
        },
    }
}

pub fn remove<T, U, C>(tree: &mut Tree<T, U, C>, key: &T) -> Option<Entry<T, U>>
where
    C: Compare<T>,
{
    let node = tree.search(key)?;
    let Erasure {
        parent,
        child,
        was_left,
        node,
    } = tree.erase(node);
    let removed_color = node.meta;
    let entry = node.into_entry();

    if removed_color == Color::Red {
        return Some(entry);
    }

    // a black node with a single child always has a red child
    if let Some(child) = child {
        set_color(tree, child, Color::Black);
        return Some(entry);
    }

    if let Some(parent) = parent {
        let placeholder = tree.allocate(Node::placeholder(Color::Black));
        if was_left {
            tree.set_left(parent, Some(placeholder));
        } else {
            tree.set_right(parent, Some(placeholder));
        }
        remove_fixup(tree, placeholder);
    }
    Some(entry)
}

// Returns the black height of the subtree, counting the nil leaves.
fn validate_subtree<T, U, C>(tree: &Tree<T, U, C>, node: Option<Handle>) -> Result<usize> {
    let node = match node {
        Some(node) => node,
        None => return Ok(1),
    };

    if is_red(tree, Some(node))
        && (is_red(tree, tree.left(node)) || is_red(tree, tree.right(node)))
    {
        return Err(Error::DoubleRed);
    }

    let left = validate_subtree(tree, tree.left(node))?;
    let right = validate_subtree(tree, tree.right(node))?;
    if left != right {
        return Err(Error::BlackHeightMismatch { left, right });
    }

    match color(tree, Some(node)) {
        Color::Red => Ok(left),
        Color::Black => Ok(left + 1),
    }
}

pub fn validate<T, U, C>(tree: &Tree<T, U, C>) -> Result<()>
where
    C: Compare<T>,
{
    tree.validate()?;
    if is_red(tree, tree.root()) {
        return Err(Error::RedRoot);
    }
    validate_subtree(tree, tree.root()).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::{color, insert, remove, validate, Tree};
    use crate::compare::Natural;
    use crate::red_black_tree::node::Color;

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

    fn color_of(tree: &Tree<u32, (), Natural>, key: u32) -> Color {
        color(tree, tree.search(&key))
    }

    #[test]
    fn test_insert_root_is_black() {
        let tree = build(&[1]);
        assert_eq!(color_of(&tree, 1), Color::Black);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_insert_outer_rotation() {
        let tree = build(&[10, 20, 30]);
        assert_eq!(preorder(&tree), vec![20, 10, 30]);
        assert_eq!(color_of(&tree, 20), Color::Black);
        assert_eq!(color_of(&tree, 10), Color::Red);
        assert_eq!(color_of(&tree, 30), Color::Red);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_insert_inner_rotation() {
        let tree = build(&[30, 10, 20]);
        assert_eq!(preorder(&tree), vec![20, 10, 30]);
        assert!(validate(&tree).is_ok());

        let tree = build(&[10, 30, 20]);
        assert_eq!(preorder(&tree), vec![20, 10, 30]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_insert_red_uncle_recolors() {
        let tree = build(&[20, 10, 30, 5]);
        assert_eq!(preorder(&tree), vec![20, 10, 5, 30]);
        assert_eq!(color_of(&tree, 20), Color::Black);
        assert_eq!(color_of(&tree, 10), Color::Black);
        assert_eq!(color_of(&tree, 30), Color::Black);
        assert_eq!(color_of(&tree, 5), Color::Red);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_black_node_with_red_child() {
        let mut tree = build(&[20, 10, 30, 5]);
        assert!(remove(&mut tree, &10).is_some());
        assert_eq!(preorder(&tree), vec![20, 5, 30]);
        assert_eq!(color_of(&tree, 5), Color::Black);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_with_red_outer_nephew() {
        let mut tree = build(&[20, 10, 30, 5]);
        assert!(remove(&mut tree, &30).is_some());
        assert_eq!(preorder(&tree), vec![10, 5, 20]);
        assert_eq!(tree.len(), 3);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_with_red_inner_nephew() {
        let mut tree = build(&[20, 10, 30, 15]);
        assert!(remove(&mut tree, &30).is_some());
        assert_eq!(preorder(&tree), vec![15, 10, 20]);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_with_red_parent() {
        let mut tree = build(&[20, 10, 30, 5, 15, 25, 35, 1]);
        assert_eq!(color_of(&tree, 10), Color::Red);
        assert!(remove(&mut tree, &1).is_some());

        // the sibling has no red children, so the red parent absorbs the extra black
        assert!(remove(&mut tree, &15).is_some());
        assert_eq!(preorder(&tree), vec![20, 10, 5, 30, 25, 35]);
        assert_eq!(color_of(&tree, 10), Color::Black);
        assert_eq!(color_of(&tree, 5), Color::Red);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_pushes_extra_black_up() {
        let mut tree = build(&[20, 10, 30, 5]);
        assert!(remove(&mut tree, &5).is_some());
        assert!(remove(&mut tree, &10).is_some());
        assert_eq!(preorder(&tree), vec![20, 30]);
        assert_eq!(color_of(&tree, 30), Color::Red);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_with_red_sibling() {
        //       2
        //      / \
        //     1  (4)
        //        / \
        //       3   6
        //          / \
        //        (5) (7)
        let mut tree = build(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(preorder(&tree), vec![2, 1, 4, 3, 6, 5, 7]);
        assert_eq!(color_of(&tree, 4), Color::Red);

        assert!(remove(&mut tree, &1).is_some());
        assert_eq!(preorder(&tree), vec![4, 2, 3, 6, 5, 7]);
        assert_eq!(color_of(&tree, 3), Color::Red);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_remove_does_not_leak_placeholders() {
        // 30 and then 5 are black leaves when removed, so both go through the placeholder fixup
        let mut tree = build(&[20, 10, 30, 5]);
        for key in &[30, 5, 20, 10] {
            assert!(remove(&mut tree, key).is_some());
            assert_eq!(tree.arena_len(), tree.len());
        }
        assert_eq!(tree.root(), None);
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.preorder().next(), None);

        // freed slots are handed out again
        insert(&mut tree, 1, ());
        assert_eq!(tree.arena_len(), 1);
        assert!(validate(&tree).is_ok());
    }

    #[test]
    fn test_insert_and_remove_interleaved() {
        let mut tree = Tree::new(Natural);
        for key in 0..512 {
            insert(&mut tree, (key * 193) % 512, ());
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

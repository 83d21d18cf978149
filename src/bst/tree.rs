use crate::arena::{Handle, TypedArena};
use crate::bst::iter::{Inorder, Postorder, Preorder, Range};
use crate::bst::node::{Node, Slot};
use crate::compare::Compare;
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::cmp::{self, Ordering};
use std::mem;

const ARENA_GROWTH: usize = 256;

/// Outcome of `Tree::insert_locate`.
pub enum Insertion<T, U> {
    /// The tree was empty and the new node became the root.
    Root(Handle),
    /// The new node was linked below `parent`, an existing node of the tree.
    Attached { node: Handle, parent: Handle },
    /// A node with an equal key existed. Its entry was overwritten and the old entry is returned.
    Replaced(Entry<T, U>),
}

/// Outcome of `Tree::erase`.
pub struct Erasure<T, U, M> {
    /// The parent the structurally removed node had before removal.
    pub parent: Option<Handle>,
    /// The child that took the removed node's place.
    pub child: Option<Handle>,
    /// Whether the removed node was the left child of `parent`.
    pub was_left: bool,
    /// The removed node. Its entry is the one that was requested for removal.
    pub node: Node<T, U, M>,
}

/// The shared binary search tree engine.
///
/// Nodes live in a `TypedArena` and refer to each other by `Handle`. The engine knows nothing
/// about balancing: it provides search, positional insertion, erasure, rotations and traversal,
/// and the balancers layer their own metadata (`M`) and fixups on top.
pub struct Tree<T, U, M, C> {
    arena: TypedArena<Node<T, U, M>>,
    root: Option<Handle>,
    len: usize,
    cmp: C,
}

impl<T, U, M, C> Tree<T, U, M, C> {
    pub fn new(cmp: C) -> Self {
        Tree {
            arena: TypedArena::new(ARENA_GROWTH),
            root: None,
            len: 0,
            cmp,
        }
    }

    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    // Number of slots in use in the arena, placeholders included.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn node(&self, node: Handle) -> &Node<T, U, M> {
        &self.arena[node]
    }

    pub fn meta(&self, node: Handle) -> &M {
        &self.arena[node].meta
    }

    pub fn meta_mut(&mut self, node: Handle) -> &mut M {
        &mut self.arena[node].meta
    }

    pub fn entry(&self, node: Handle) -> &Entry<T, U> {
        self.arena[node].entry()
    }

    pub fn entry_mut(&mut self, node: Handle) -> &mut Entry<T, U> {
        self.arena[node].entry_mut()
    }

    pub fn key(&self, node: Handle) -> &T {
        &self.entry(node).key
    }

    pub fn parent(&self, node: Handle) -> Option<Handle> {
        self.arena[node].parent
    }

    pub fn left(&self, node: Handle) -> Option<Handle> {
        self.arena[node].left
    }

    pub fn right(&self, node: Handle) -> Option<Handle> {
        self.arena[node].right
    }

    pub fn is_left_child(&self, node: Handle) -> bool {
        match self.parent(node) {
            Some(parent) => self.left(parent) == Some(node),
            None => false,
        }
    }

    /// Stores a free-standing node in the tree's arena without linking it.
    pub fn allocate(&mut self, node: Node<T, U, M>) -> Handle {
        self.arena.allocate(node)
    }

    /// Releases an unlinked node from the tree's arena.
    pub fn free(&mut self, node: Handle) -> Node<T, U, M> {
        self.arena.free(&node)
    }

    fn detach_from_parent(&mut self, child: Handle) {
        if let Some(parent) = self.arena[child].parent.take() {
            if self.arena[parent].left == Some(child) {
                self.arena[parent].left = None;
            } else {
                self.arena[parent].right = None;
            }
        }
    }

    /// Makes `child` the left child of `node`. The previous left child is orphaned and `child` is
    /// severed from its previous parent first.
    pub fn set_left(&mut self, node: Handle, child: Option<Handle>) {
        if let Some(old_child) = self.arena[node].left {
            self.arena[old_child].parent = None;
        }
        if let Some(child) = child {
            self.detach_from_parent(child);
            self.arena[child].parent = Some(node);
        }
        self.arena[node].left = child;
    }

    /// Makes `child` the right child of `node`. Mirror of `set_left`.
    pub fn set_right(&mut self, node: Handle, child: Option<Handle>) {
        if let Some(old_child) = self.arena[node].right {
            self.arena[old_child].parent = None;
        }
        if let Some(child) = child {
            self.detach_from_parent(child);
            self.arena[child].parent = Some(node);
        }
        self.arena[node].right = child;
    }

    /// Makes `node` the root. A node that is still linked below another node is severed from it.
    pub fn set_root(&mut self, node: Option<Handle>) {
        if let Some(node) = node {
            self.detach_from_parent(node);
        }
        self.root = node;
    }

    /// Puts `replacer` in the position `node` occupies in the tree.
    pub fn replace_node(&mut self, node: Handle, replacer: Option<Handle>) {
        if Some(node) == replacer {
            return;
        }

        if self.root == Some(node) {
            self.set_root(replacer);
        } else {
            let parent = self.parent(node).expect("Expected non-root node to have a parent.");
            if self.left(parent) == Some(node) {
                self.set_left(parent, replacer);
            } else {
                self.set_right(parent, replacer);
            }
        }
    }

    /// Performs a left rotation at `node` and returns the pivot, which takes `node`'s place.
    ///
    /// ```text
    ///     n                   p
    ///    / \                 / \
    ///   a   p     ->        n   c
    ///      / \             / \
    ///     b   c           a   b
    /// ```
    pub fn rotate_left(&mut self, node: Handle) -> Handle {
        let parent = self.parent(node);
        let is_left = self.is_left_child(node);

        let pivot = self.right(node).expect("Expected right child node to be `Some`.");
        let pivot_left = self.left(pivot);
        self.set_right(node, pivot_left);
        self.set_left(pivot, Some(node));

        match parent {
            Some(parent) if is_left => self.set_left(parent, Some(pivot)),
            Some(parent) => self.set_right(parent, Some(pivot)),
            None => self.set_root(Some(pivot)),
        }
        pivot
    }

    /// Performs a right rotation at `node` and returns the pivot, which takes `node`'s place.
    ///
    /// ```text
    ///       n               p
    ///      / \             / \
    ///     p   c    ->     a   n
    ///    / \                 / \
    ///   a   b               b   c
    /// ```
    pub fn rotate_right(&mut self, node: Handle) -> Handle {
        let parent = self.parent(node);
        let is_left = self.is_left_child(node);

        let pivot = self.left(node).expect("Expected left child node to be `Some`.");
        let pivot_right = self.right(pivot);
        self.set_left(node, pivot_right);
        self.set_right(pivot, Some(node));

        match parent {
            Some(parent) if is_left => self.set_left(parent, Some(pivot)),
            Some(parent) => self.set_right(parent, Some(pivot)),
            None => self.set_root(Some(pivot)),
        }
        pivot
    }

    pub fn min_node(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.left(node) {
            node = left;
        }
        node
    }

    pub fn max_node(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.right(node) {
            node = right;
        }
        node
    }

    /// Returns the node that follows `node` in an in-order traversal.
    pub fn successor(&self, mut node: Handle) -> Option<Handle> {
        if let Some(right) = self.right(node) {
            return Some(self.min_node(right));
        }

        // the successor is the first ancestor whose left subtree contains `node`
        while let Some(parent) = self.parent(node) {
            if self.left(parent) == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    /// Returns the node that precedes `node` in an in-order traversal.
    pub fn predecessor(&self, mut node: Handle) -> Option<Handle> {
        if let Some(left) = self.left(node) {
            return Some(self.max_node(left));
        }

        while let Some(parent) = self.parent(node) {
            if self.right(parent) == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    /// Unlinks `node` from the tree and returns it along with the information a balancer needs
    /// to repair the tree.
    ///
    /// A node with two children trades entries with its in-order predecessor, and the
    /// predecessor, which has at most one child, is the node that is structurally removed.
    pub fn erase(&mut self, mut node: Handle) -> Erasure<T, U, M> {
        if let (Some(left), Some(_)) = (self.left(node), self.right(node)) {
            let replacer = self.max_node(left);
            self.swap_slots(node, replacer);
            node = replacer;
        }

        let parent = self.parent(node);
        let was_left = self.is_left_child(node);
        let child = self.left(node).or_else(|| self.right(node));
        self.replace_node(node, child);
        self.len -= 1;

        Erasure {
            parent,
            child,
            was_left,
            node: self.arena.free(&node),
        }
    }

    fn swap_slots(&mut self, a: Handle, b: Handle) {
        let slot_a = mem::replace(&mut self.arena[a].slot, Slot::Placeholder);
        let slot_b = mem::replace(&mut self.arena[b].slot, slot_a);
        self.arena[a].slot = slot_b;
    }

    /// Returns the number of levels of the tree. An empty tree has height zero.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, node: Option<Handle>) -> usize {
        match node {
            None => 0,
            Some(node) => {
                1 + cmp::max(
                    self.subtree_height(self.left(node)),
                    self.subtree_height(self.right(node)),
                )
            },
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    pub fn preorder(&self) -> Preorder<T, U, M, C> {
        Preorder::new(self)
    }

    pub fn inorder(&self) -> Inorder<T, U, M, C> {
        Inorder::new(self)
    }

    pub fn postorder(&self) -> Postorder<T, U, M, C> {
        Postorder::new(self)
    }
}

impl<T, U, M, C> Tree<T, U, M, C>
where
    C: Compare<T>,
{
    pub fn search(&self, key: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(node) = current {
            current = match self.cmp.compare(key, self.key(node)) {
                Ordering::Less => self.left(node),
                Ordering::Greater => self.right(node),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Links `new_node` at the position its key belongs, or overwrites the entry of the node
    /// whose key compares equal to it.
    pub fn insert_locate(&mut self, new_node: Node<T, U, M>) -> Insertion<T, U> {
        let mut current = match self.root {
            Some(root) => root,
            None => {
                let node = self.arena.allocate(new_node);
                self.set_root(Some(node));
                self.len += 1;
                return Insertion::Root(node);
            },
        };

        loop {
            let ordering = self.cmp.compare(&new_node.entry().key, self.key(current));
            let next = match ordering {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => {
                    let old_entry = mem::replace(self.entry_mut(current), new_node.into_entry());
                    return Insertion::Replaced(old_entry);
                },
            };

            match next {
                Some(next) => current = next,
                None => {
                    let node = self.arena.allocate(new_node);
                    if ordering == Ordering::Less {
                        self.set_left(current, Some(node));
                    } else {
                        self.set_right(current, Some(node));
                    }
                    self.len += 1;
                    return Insertion::Attached {
                        node,
                        parent: current,
                    };
                },
            }
        }
    }

    /// Returns the node with the greatest key less than or equal to `key`.
    pub fn floor(&self, key: &T) -> Option<Handle> {
        let mut current = self.root;
        let mut ret = None;
        while let Some(node) = current {
            current = match self.cmp.compare(key, self.key(node)) {
                Ordering::Less => self.left(node),
                Ordering::Greater => {
                    ret = Some(node);
                    self.right(node)
                },
                Ordering::Equal => return Some(node),
            };
        }
        ret
    }

    /// Returns the node with the least key greater than or equal to `key`.
    pub fn ceil(&self, key: &T) -> Option<Handle> {
        let mut current = self.root;
        let mut ret = None;
        while let Some(node) = current {
            current = match self.cmp.compare(key, self.key(node)) {
                Ordering::Greater => self.right(node),
                Ordering::Less => {
                    ret = Some(node);
                    self.left(node)
                },
                Ordering::Equal => return Some(node),
            };
        }
        ret
    }

    pub fn range<'a>(&'a self, from: &'a T, to: &'a T) -> Range<'a, T, U, M, C> {
        Range::new(self, from, to)
    }

    /// Checks the invariants shared by every binary search tree: symmetric parent links, strictly
    /// increasing keys, no leftover placeholders, an accurate size and no unfreed nodes.
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = self.root {
            if self.parent(root).is_some() {
                return Err(Error::BrokenLink);
            }
        }

        let mut count = 0;
        let mut prev = None;
        let mut iter = self.inorder();
        while let Some(node) = iter.next_handle() {
            if self.node(node).is_placeholder() {
                return Err(Error::StrayPlaceholder);
            }
            for child in [self.left(node), self.right(node)].iter().flatten() {
                if self.parent(*child) != Some(node) {
                    return Err(Error::BrokenLink);
                }
            }
            if let Some(prev) = prev {
                if self.cmp.compare(self.key(prev), self.key(node)) != Ordering::Less {
                    return Err(Error::OutOfOrder);
                }
            }
            prev = Some(node);
            count += 1;
        }

        if count != self.len {
            return Err(Error::SizeMismatch {
                recorded: self.len,
                actual: count,
            });
        }
        if self.arena_len() != self.len {
            return Err(Error::LeakedNodes {
                allocated: self.arena_len(),
                live: self.len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Insertion, Tree};
    use crate::bst::node::Node;
    use crate::compare::Natural;
    use crate::error::Error;

    fn build(keys: &[u32]) -> Tree<u32, u32, (), Natural> {
        let mut tree = Tree::new(Natural);
        for key in keys {
            tree.insert_locate(Node::new(*key, *key * 10, ()));
        }
        tree
    }

    fn keys(tree: &Tree<u32, u32, (), Natural>) -> Vec<u32> {
        tree.inorder().map(|(key, _)| *key).collect()
    }

    #[test]
    fn test_insert_locate() {
        let mut tree = Tree::new(Natural);
        let root = match tree.insert_locate(Node::new(5, 0, ())) {
            Insertion::Root(node) => node,
            _ => panic!("expected the first node to become the root"),
        };
        match tree.insert_locate(Node::new(3, 0, ())) {
            Insertion::Attached { parent, .. } => assert_eq!(parent, root),
            _ => panic!("expected the node to be attached below the root"),
        }
        match tree.insert_locate(Node::new(5, 1, ())) {
            Insertion::Replaced(entry) => assert_eq!(entry.into_pair(), (5, 0)),
            _ => panic!("expected the duplicate key to replace the entry"),
        }
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.entry(root).value, 1);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_search() {
        let tree = build(&[5, 3, 8, 1, 4]);
        let node = tree.search(&4).unwrap();
        assert_eq!(tree.entry(node).value, 40);
        assert!(tree.search(&6).is_none());
    }

    #[test]
    fn test_set_left_moves_child() {
        let mut tree = build(&[5, 3, 8]);
        let root = tree.root().unwrap();
        let left = tree.left(root).unwrap();
        let right = tree.right(root).unwrap();

        tree.set_left(right, Some(left));
        assert_eq!(tree.left(root), None);
        assert_eq!(tree.left(right), Some(left));
        assert_eq!(tree.parent(left), Some(right));
    }

    #[test]
    fn test_rotate_left_at_root() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let root = tree.root().unwrap();
        let pivot = tree.rotate_left(root);

        assert_eq!(tree.root(), Some(pivot));
        assert_eq!(*tree.key(pivot), 4);
        assert_eq!(tree.parent(pivot), None);
        assert_eq!(tree.left(pivot), Some(root));
        assert_eq!(*tree.key(tree.right(root).unwrap()), 3);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_rotate_right_below_root() {
        let mut tree = build(&[6, 4, 7, 2, 5]);
        let node = tree.search(&4).unwrap();
        tree.rotate_right(node);

        let root = tree.root().unwrap();
        assert_eq!(*tree.key(tree.left(root).unwrap()), 2);
        assert_eq!(tree.preorder().map(|(key, _)| *key).collect::<Vec<u32>>(), vec![6, 2, 4, 5, 7]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_successor_predecessor() {
        let tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let successors: Vec<Option<u32>> = [1, 4, 5, 9]
            .iter()
            .map(|key| tree.successor(tree.search(key).unwrap()).map(|node| *tree.key(node)))
            .collect();
        assert_eq!(successors, vec![Some(3), Some(5), Some(7), None]);

        let predecessors: Vec<Option<u32>> = [1, 4, 7, 8]
            .iter()
            .map(|key| tree.predecessor(tree.search(key).unwrap()).map(|node| *tree.key(node)))
            .collect();
        assert_eq!(predecessors, vec![None, Some(3), Some(5), Some(7)]);
    }

    #[test]
    fn test_erase_leaf() {
        let mut tree = build(&[5, 3, 8]);
        let erasure = tree.erase(tree.search(&8).unwrap());
        assert_eq!(erasure.parent, tree.root());
        assert_eq!(erasure.child, None);
        assert!(!erasure.was_left);
        assert_eq!(erasure.node.into_entry().into_pair(), (8, 80));
        assert_eq!(keys(&tree), vec![3, 5]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_two_children_uses_predecessor() {
        let mut tree = build(&[5, 3, 8, 1, 4]);
        let root = tree.root().unwrap();
        let erasure = tree.erase(root);

        // the root keeps its position and takes over the predecessor's entry
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.entry(root).key, 4);
        assert_eq!(erasure.parent, tree.search(&3));
        assert_eq!(erasure.child, None);
        assert!(!erasure.was_left);
        assert_eq!(erasure.node.into_entry().into_pair(), (5, 50));
        assert_eq!(tree.len(), 4);
        assert_eq!(keys(&tree), vec![1, 3, 4, 8]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_root_with_one_child() {
        let mut tree = build(&[5, 3]);
        let erasure = tree.erase(tree.root().unwrap());
        assert_eq!(erasure.parent, None);
        assert_eq!(tree.root(), erasure.child);
        assert_eq!(keys(&tree), vec![3]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_floor_ceil() {
        let tree = build(&[1, 3, 5]);
        let floor = |key| tree.floor(&key).map(|node| *tree.key(node));
        let ceil = |key| tree.ceil(&key).map(|node| *tree.key(node));

        assert_eq!(floor(0), None);
        assert_eq!(floor(2), Some(1));
        assert_eq!(floor(5), Some(5));
        assert_eq!(ceil(2), Some(3));
        assert_eq!(ceil(6), None);
    }

    #[test]
    fn test_height() {
        assert_eq!(build(&[]).height(), 0);
        assert_eq!(build(&[2, 1, 3]).height(), 2);
        assert_eq!(build(&[1, 2, 3]).height(), 3);
    }

    #[test]
    fn test_validate_detects_unfreed_node() {
        let mut tree = build(&[1, 2, 3]);
        let stray = tree.allocate(Node::placeholder(()));
        assert_eq!(tree.arena_len(), 4);
        assert_eq!(
            tree.validate(),
            Err(Error::LeakedNodes {
                allocated: 4,
                live: 3,
            }),
        );

        assert!(tree.free(stray).is_placeholder());
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_clear() {
        let mut tree = build(&[1, 2, 3]);
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert_eq!(keys(&tree), Vec::<u32>::new());
    }
}

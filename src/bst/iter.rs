//! Lazy traversals over a `Tree`.
//!
//! Every iterator keeps an explicit stack of handles, so creating one is O(1) and each step is
//! amortized O(1). The iterators borrow the tree, which rules out structural mutation while a
//! traversal is in flight.

use crate::arena::Handle;
use crate::bst::tree::Tree;
use crate::compare::Compare;
use std::cmp::Ordering;

/// A pre-order traversal (node, left subtree, right subtree).
pub struct Preorder<'a, T, U, M, C> {
    tree: &'a Tree<T, U, M, C>,
    stack: Vec<Handle>,
}

impl<'a, T, U, M, C> Preorder<'a, T, U, M, C> {
    pub(crate) fn new(tree: &'a Tree<T, U, M, C>) -> Self {
        Preorder {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }

    pub(crate) fn next_handle(&mut self) -> Option<Handle> {
        let node = self.stack.pop()?;
        self.stack.extend(self.tree.right(node));
        self.stack.extend(self.tree.left(node));
        Some(node)
    }
}

impl<'a, T, U, M, C> Iterator for Preorder<'a, T, U, M, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_handle().map(|node| tree.entry(node).as_pair())
    }
}

/// An in-order traversal (left subtree, node, right subtree), which yields keys in ascending
/// order.
pub struct Inorder<'a, T, U, M, C> {
    tree: &'a Tree<T, U, M, C>,
    stack: Vec<Handle>,
}

impl<'a, T, U, M, C> Inorder<'a, T, U, M, C> {
    pub(crate) fn new(tree: &'a Tree<T, U, M, C>) -> Self {
        let mut ret = Inorder {
            tree,
            stack: Vec::new(),
        };
        ret.push_left_spine(tree.root());
        ret
    }

    fn push_left_spine(&mut self, mut current: Option<Handle>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = self.tree.left(node);
        }
    }

    pub(crate) fn next_handle(&mut self) -> Option<Handle> {
        let node = self.stack.pop()?;
        self.push_left_spine(self.tree.right(node));
        Some(node)
    }
}

impl<'a, T, U, M, C> Iterator for Inorder<'a, T, U, M, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_handle().map(|node| tree.entry(node).as_pair())
    }
}

/// A post-order traversal (left subtree, right subtree, node).
pub struct Postorder<'a, T, U, M, C> {
    tree: &'a Tree<T, U, M, C>,
    stack: Vec<Handle>,
    last: Option<Handle>,
}

impl<'a, T, U, M, C> Postorder<'a, T, U, M, C> {
    pub(crate) fn new(tree: &'a Tree<T, U, M, C>) -> Self {
        let mut ret = Postorder {
            tree,
            stack: Vec::new(),
            last: None,
        };
        ret.push_left_spine(tree.root());
        ret
    }

    fn push_left_spine(&mut self, mut current: Option<Handle>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = self.tree.left(node);
        }
    }

    pub(crate) fn next_handle(&mut self) -> Option<Handle> {
        while let Some(&node) = self.stack.last() {
            match self.tree.right(node) {
                // a node is emitted once its right subtree is absent or fully emitted
                Some(right) if self.last != Some(right) => self.push_left_spine(Some(right)),
                _ => {
                    self.stack.pop();
                    self.last = Some(node);
                    return Some(node);
                },
            }
        }
        None
    }
}

impl<'a, T, U, M, C> Iterator for Postorder<'a, T, U, M, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_handle().map(|node| tree.entry(node).as_pair())
    }
}

/// An in-order traversal restricted to keys in `[from, to]`.
///
/// Subtrees that lie entirely below `from` are never visited, and the traversal stops at the
/// first key above `to`.
pub struct Range<'a, T, U, M, C> {
    tree: &'a Tree<T, U, M, C>,
    stack: Vec<Handle>,
    from: &'a T,
    to: &'a T,
}

impl<'a, T, U, M, C> Range<'a, T, U, M, C>
where
    C: Compare<T>,
{
    pub(crate) fn new(tree: &'a Tree<T, U, M, C>, from: &'a T, to: &'a T) -> Self {
        let mut ret = Range {
            tree,
            stack: Vec::new(),
            from,
            to,
        };
        ret.push_left_spine(tree.root());
        ret
    }

    fn push_left_spine(&mut self, mut current: Option<Handle>) {
        let cmp = self.tree.comparator();
        while let Some(node) = current {
            if cmp.compare(self.tree.key(node), self.from) == Ordering::Less {
                current = self.tree.right(node);
            } else {
                self.stack.push(node);
                current = self.tree.left(node);
            }
        }
    }

    pub(crate) fn next_handle(&mut self) -> Option<Handle> {
        let node = self.stack.pop()?;
        if self.tree.comparator().compare(self.tree.key(node), self.to) == Ordering::Greater {
            self.stack.clear();
            return None;
        }
        self.push_left_spine(self.tree.right(node));
        Some(node)
    }
}

impl<'a, T, U, M, C> Iterator for Range<'a, T, U, M, C>
where
    C: Compare<T>,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.next_handle().map(|node| tree.entry(node).as_pair())
    }
}

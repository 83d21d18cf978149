use crate::arena::Handle;
use crate::entry::Entry;

/// The payload of a node.
pub enum Slot<T, U> {
    Occupied(Entry<T, U>),
    /// A keyless marker that temporarily stands in for a removed node while a balancer repairs
    /// the tree. It is linked like any other node but is never compared against keys.
    Placeholder,
}

/// A struct representing an internal node of a binary search tree.
///
/// `M` is the per-node metadata of the balancing scheme (heights for AVL trees, colors for
/// red-black trees). Links are only ever rewritten through `Tree::set_left`, `Tree::set_right`
/// and `Tree::set_root`, which keep `parent` consistent with the child links.
pub struct Node<T, U, M> {
    pub slot: Slot<T, U>,
    pub meta: M,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl<T, U, M> Node<T, U, M> {
    pub fn new(key: T, value: U, meta: M) -> Self {
        Node {
            slot: Slot::Occupied(Entry::new(key, value)),
            meta,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn placeholder(meta: M) -> Self {
        Node {
            slot: Slot::Placeholder,
            meta,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        match self.slot {
            Slot::Placeholder => true,
            Slot::Occupied(_) => false,
        }
    }

    pub fn entry(&self) -> &Entry<T, U> {
        match self.slot {
            Slot::Occupied(ref entry) => entry,
            Slot::Placeholder => panic!("Error: placeholder node has no entry."),
        }
    }

    pub fn entry_mut(&mut self) -> &mut Entry<T, U> {
        match self.slot {
            Slot::Occupied(ref mut entry) => entry,
            Slot::Placeholder => panic!("Error: placeholder node has no entry."),
        }
    }

    pub fn into_entry(self) -> Entry<T, U> {
        match self.slot {
            Slot::Occupied(entry) => entry,
            Slot::Placeholder => panic!("Error: placeholder node has no entry."),
        }
    }
}

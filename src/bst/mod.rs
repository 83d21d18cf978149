//! Binary search tree engine shared by the avl tree and the red-black tree.

mod iter;
mod node;
mod tree;

pub use self::iter::{Inorder, Postorder, Preorder, Range};
pub use self::node::Node;
pub use self::tree::{Erasure, Insertion, Tree};

//! Height-balanced ordered map.

mod map;
mod node;
mod tree;

pub use self::map::{AvlMap, AvlMapIter, AvlMapPostorder, AvlMapPreorder, AvlMapRange};

//! Errors reported by the `validate` methods of the maps.

use std::error;
use std::fmt;
use std::result;

/// A violated structural invariant, as found by a `validate` walk.
///
/// The maps maintain these invariants by construction, so any `Error` indicates either a bug in
/// this crate or a comparator that is not a total order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A child's parent link does not point back at the node holding it, or the root has a
    /// parent.
    BrokenLink,
    /// A placeholder slot is still reachable from the root.
    StrayPlaceholder,
    /// An in-order walk produced two keys that are not strictly increasing.
    OutOfOrder,
    /// The recorded number of entries differs from the number of reachable entries.
    SizeMismatch { recorded: usize, actual: usize },
    /// The arena holds more nodes than the structure links, so a removed node was never freed.
    LeakedNodes { allocated: usize, live: usize },
    /// An AVL node's cached height differs from the height of its subtree.
    StaleHeight { recorded: i32, actual: i32 },
    /// An AVL node's balance factor is outside of `[-1, 1]`.
    Unbalanced { factor: i32 },
    /// The root of a red-black tree is red.
    RedRoot,
    /// A red node of a red-black tree has a red child.
    DoubleRed,
    /// Two root-to-nil paths of a red-black tree contain different numbers of black nodes.
    BlackHeightMismatch { left: usize, right: usize },
    /// A skiplist level skips over a node that participates in it, or is not sorted.
    BrokenLevel { level: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::BrokenLink => write!(f, "parent and child links are not symmetric"),
            Error::StrayPlaceholder => write!(f, "placeholder node reachable from the root"),
            Error::OutOfOrder => write!(f, "keys are not in strictly increasing order"),
            Error::SizeMismatch { recorded, actual } => write!(
                f,
                "recorded size {} but found {} entries",
                recorded, actual,
            ),
            Error::LeakedNodes { allocated, live } => write!(
                f,
                "arena holds {} nodes but only {} are live",
                allocated, live,
            ),
            Error::StaleHeight { recorded, actual } => write!(
                f,
                "recorded height {} but subtree height is {}",
                recorded, actual,
            ),
            Error::Unbalanced { factor } => write!(f, "balance factor {} out of range", factor),
            Error::RedRoot => write!(f, "root is red"),
            Error::DoubleRed => write!(f, "red node has a red child"),
            Error::BlackHeightMismatch { left, right } => write!(
                f,
                "black heights differ between subtrees ({} and {})",
                left, right,
            ),
            Error::BrokenLevel { level } => write!(f, "level {} is not a sorted sublist", level),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

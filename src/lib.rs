//! Self-balancing ordered maps.
//!
//! Three containers share one interface: [`AvlMap`](avl_tree/struct.AvlMap.html) and
//! [`RedBlackMap`](red_black_tree/struct.RedBlackMap.html) are binary search trees built on a
//! common arena-backed engine, and [`SkipMap`](skiplist/struct.SkipMap.html) is a probabilistic
//! skiplist. All of them guarantee logarithmic insertion, removal and lookup (expected, in the
//! case of the skiplist) and iterate in ascending key order.
//!
//! Keys are ordered by `Ord` by default, or by any [`Compare`](compare/trait.Compare.html)
//! implementation, including closures.
//!
//! # Examples
//! ```
//! use ordered_maps::avl_tree::AvlMap;
//! use ordered_maps::red_black_tree::RedBlackMap;
//! use ordered_maps::skiplist::SkipMap;
//!
//! let mut avl = AvlMap::new();
//! let mut red_black = RedBlackMap::new();
//! let mut skip = SkipMap::new();
//!
//! for key in &[5, 3, 8, 1, 4] {
//!     avl.insert(*key, ());
//!     red_black.insert(*key, ());
//!     skip.insert(*key, ());
//! }
//!
//! let expected = vec![&1, &3, &4, &5, &8];
//! assert_eq!(avl.keys().collect::<Vec<_>>(), expected);
//! assert_eq!(red_black.keys().collect::<Vec<_>>(), expected);
//! assert_eq!(skip.keys().collect::<Vec<_>>(), expected);
//! ```

pub mod arena;
pub mod avl_tree;
mod bst;
pub mod compare;
mod entry;
pub mod error;
pub mod red_black_tree;
pub mod skiplist;

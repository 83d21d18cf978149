use crate::bst::{Inorder, Postorder, Preorder, Range};
use crate::compare::{Compare, Natural};
use crate::error::Result;
use crate::red_black_tree::node::Color;
use crate::red_black_tree::tree::{self, Tree};
use log::debug;
use std::fmt;
use std::ops::{ControlFlow, Index, IndexMut};

/// An ordered map implemented using a red-black tree.
///
/// A red-black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, a red node never has a red child and every path from a node down to a
/// missing child passes through the same number of black nodes, which bounds the height by
/// `2 log(n + 1)`. Insertion, removal and lookup take `O(log n)` time in the worst case, and
/// rebalancing after an insertion or a removal performs at most three rotations.
///
/// Keys are ordered by `Ord` unless a comparator is supplied through
/// [`with_comparator`](#method.with_comparator).
///
/// # Examples
/// ```
/// use ordered_maps::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min_key(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<T, U, C = Natural> {
    tree: Tree<T, U, C>,
}

impl<T, U> RedBlackMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackMap<T, U>` ordered by `Ord`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap {
            tree: Tree::new(Natural),
        }
    }
}

impl<T, U, C> RedBlackMap<T, U, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackMap<T, U, C>` ordered by `cmp`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_comparator(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
    /// map.insert(-2, "a");
    /// map.insert(1, "b");
    /// assert_eq!(map.keys().collect::<Vec<&i32>>(), vec![&1, &-2]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        RedBlackMap {
            tree: Tree::new(cmp),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, the existing
    /// entry is overwritten and the old key-value pair is returned.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        tree::insert(&mut self.tree, key, value).map(|entry| entry.into_pair())
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<(T, U)> {
        tree::remove(&mut self.tree, key).map(|entry| entry.into_pair())
    }

    /// Removes a key from the map. Returns `true` if the key was present.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(map.delete(&1));
    /// assert!(!map.delete(&1));
    /// ```
    pub fn delete(&mut self, key: &T) -> bool {
        self.remove(key).is_some()
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        self.tree.search(key).is_some()
    }

    /// Returns the key-value pair stored for a particular key, or `None` if the key does not
    /// exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 2);
    /// assert_eq!(map.search(&1), Some((&1, &2)));
    /// assert_eq!(map.search(&0), None);
    /// ```
    pub fn search(&self, key: &T) -> Option<(&T, &U)> {
        self.tree
            .search(key)
            .map(|node| self.tree.entry(node).as_pair())
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U> {
        self.tree
            .search(key)
            .map(|node| &self.tree.entry(node).value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let node = self.tree.search(key)?;
        Some(&mut self.tree.entry_mut(node).value)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        self.tree.floor(key).map(|node| self.tree.key(node))
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.tree.ceil(key).map(|node| self.tree.key(node))
    }

    /// Returns the key-value pair that follows a particular key in ascending order. Returns
    /// `None` if the key does not exist in the map or is its maximum.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(5, 'b');
    /// assert_eq!(map.successor(&1), Some((&5, &'b')));
    /// assert_eq!(map.successor(&5), None);
    /// assert_eq!(map.successor(&2), None);
    /// ```
    pub fn successor(&self, key: &T) -> Option<(&T, &U)> {
        let node = self.tree.search(key)?;
        self.tree
            .successor(node)
            .map(|node| self.tree.entry(node).as_pair())
    }

    /// Returns the key-value pair that precedes a particular key in ascending order. Returns
    /// `None` if the key does not exist in the map or is its minimum.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(5, 'b');
    /// assert_eq!(map.predecessor(&5), Some((&1, &'a')));
    /// assert_eq!(map.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, key: &T) -> Option<(&T, &U)> {
        let node = self.tree.search(key)?;
        self.tree
            .predecessor(node)
            .map(|node| self.tree.entry(node).as_pair())
    }

    /// Calls `f` on a particular key and every greater key in ascending order, stopping early if
    /// `f` returns `ControlFlow::Break`. Does nothing if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, ());
    /// }
    ///
    /// let mut visited = Vec::new();
    /// map.for_each_successor(&4, |key, _| {
    ///     visited.push(*key);
    ///     if *key == 6 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(visited, vec![4, 5, 6]);
    /// ```
    pub fn for_each_successor<F>(&self, key: &T, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        let mut current = self.tree.search(key);
        while let Some(node) = current {
            let entry = self.tree.entry(node);
            if let ControlFlow::Break(()) = f(&entry.key, &entry.value) {
                return;
            }
            current = self.tree.successor(node);
        }
    }

    /// Calls `f` on a particular key and every smaller key in descending order, stopping early if
    /// `f` returns `ControlFlow::Break`. Does nothing if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, ());
    /// }
    ///
    /// let mut visited = Vec::new();
    /// map.for_each_predecessor(&2, |key, _| {
    ///     visited.push(*key);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(visited, vec![2, 1, 0]);
    /// ```
    pub fn for_each_predecessor<F>(&self, key: &T, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        let mut current = self.tree.search(key);
        while let Some(node) = current {
            let entry = self.tree.entry(node);
            if let ControlFlow::Break(()) = f(&entry.key, &entry.value) {
                return;
            }
            current = self.tree.predecessor(node);
        }
    }

    /// Returns an iterator over the entries whose keys lie between `from` and `to`, both
    /// inclusive, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, key * 2);
    /// }
    /// assert_eq!(
    ///     map.range(&3, &5).collect::<Vec<(&u32, &u32)>>(),
    ///     vec![(&3, &6), (&4, &8), (&5, &10)],
    /// );
    /// ```
    pub fn range<'a>(&'a self, from: &'a T, to: &'a T) -> RedBlackMapRange<'a, T, U, C> {
        RedBlackMapRange(self.tree.range(from, to))
    }

    /// Checks every structural invariant of the map: symmetric parent links, strictly increasing
    /// keys, a black root, no red node with a red child and equal black heights on every path.
    /// This walks the whole tree and is meant for tests and debugging.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 0..100 {
    ///     map.insert(key, ());
    /// }
    /// assert!(map.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        tree::validate(&self.tree)
    }
}

impl<T, U, C> RedBlackMap<T, U, C> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("red-black: clearing {} entries", self.tree.len());
        self.tree.clear();
    }

    /// Returns the number of levels of the tree, which is zero for an empty map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 0..3 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Returns the entry with the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.min(), Some((&1, &'a')));
    /// ```
    pub fn min(&self) -> Option<(&T, &U)> {
        self.tree
            .root()
            .map(|root| self.tree.entry(self.tree.min_node(root)).as_pair())
    }

    /// Returns the entry with the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.max(), Some((&3, &'b')));
    /// ```
    pub fn max(&self) -> Option<(&T, &U)> {
        self.tree
            .root()
            .map(|root| self.tree.entry(self.tree.max_node(root)).as_pair())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min_key(), Some(&1));
    /// ```
    pub fn min_key(&self) -> Option<&T> {
        self.min().map(|pair| pair.0)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max_key(), Some(&3));
    /// ```
    pub fn max_key(&self) -> Option<&T> {
        self.max().map(|pair| pair.0)
    }

    /// Returns the value associated with the minimum key of the map. Returns `None` if the map is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.min_value(), Some(&'a'));
    /// ```
    pub fn min_value(&self) -> Option<&U> {
        self.min().map(|pair| pair.1)
    }

    /// Returns the value associated with the maximum key of the map. Returns `None` if the map is
    /// empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.max_value(), Some(&'b'));
    /// ```
    pub fn max_value(&self) -> Option<&U> {
        self.max().map(|pair| pair.1)
    }

    /// Calls `f` on every entry of the map in ascending order of keys, stopping early if `f`
    /// returns `ControlFlow::Break`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// map.insert(3, 'c');
    ///
    /// let mut visited = Vec::new();
    /// map.for_each(|key, value| {
    ///     visited.push((*key, *value));
    ///     if *key == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(visited, vec![(1, 'a'), (2, 'b')]);
    /// ```
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        for (key, value) in self.tree.inorder() {
            if let ControlFlow::Break(()) = f(key, value) {
                return;
            }
        }
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<T, U, C> {
        RedBlackMapIter(self.tree.inorder())
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|pair| pair.0)
    }

    /// Returns an iterator over the values of the map in ascending order of their keys.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.values().collect::<Vec<&char>>(), vec![&'a', &'b']);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &U> {
        self.iter().map(|pair| pair.1)
    }

    /// Returns a pre-order iterator over the map: each node is yielded before its left subtree,
    /// which is yielded before its right subtree.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 1..4 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.preorder().map(|pair| *pair.0).collect::<Vec<u32>>(), vec![2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> RedBlackMapPreorder<T, U, C> {
        RedBlackMapPreorder(self.tree.preorder())
    }

    /// Returns an in-order iterator over the map, which yields entries in ascending order of
    /// keys. Equivalent to [`iter`](#method.iter).
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 1..4 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.inorder().map(|pair| *pair.0).collect::<Vec<u32>>(), vec![1, 2, 3]);
    /// ```
    pub fn inorder(&self) -> RedBlackMapIter<T, U, C> {
        RedBlackMapIter(self.tree.inorder())
    }

    /// Returns a post-order iterator over the map: each node is yielded after both of its
    /// subtrees.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// for key in 1..4 {
    ///     map.insert(key, ());
    /// }
    /// assert_eq!(map.postorder().map(|pair| *pair.0).collect::<Vec<u32>>(), vec![1, 3, 2]);
    /// ```
    pub fn postorder(&self) -> RedBlackMapPostorder<T, U, C> {
        RedBlackMapPostorder(self.tree.postorder())
    }
}

impl<'a, T, U, C> IntoIterator for &'a RedBlackMap<T, U, C>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);
    type IntoIter = RedBlackMapIter<'a, T, U, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, U> Default for RedBlackMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C> fmt::Debug for RedBlackMap<T, U, C>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, C> Index<&'a T> for RedBlackMap<T, U, C>
where
    C: Compare<T>,
{
    type Output = U;

    fn index(&self, key: &T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, C> IndexMut<&'a T> for RedBlackMap<T, U, C>
where
    C: Compare<T>,
{
    fn index_mut(&mut self, key: &T) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

/// An iterator for `RedBlackMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, T, U, C>(Inorder<'a, T, U, Color, C>);

impl<'a, T, U, C> Iterator for RedBlackMapIter<'a, T, U, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// A pre-order iterator for `RedBlackMap<T, U, C>`.
pub struct RedBlackMapPreorder<'a, T, U, C>(Preorder<'a, T, U, Color, C>);

impl<'a, T, U, C> Iterator for RedBlackMapPreorder<'a, T, U, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// A post-order iterator for `RedBlackMap<T, U, C>`.
pub struct RedBlackMapPostorder<'a, T, U, C>(Postorder<'a, T, U, Color, C>);

impl<'a, T, U, C> Iterator for RedBlackMapPostorder<'a, T, U, C> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// An iterator over an inclusive key range of a `RedBlackMap<T, U, C>`, in ascending order.
pub struct RedBlackMapRange<'a, T, U, C>(Range<'a, T, U, Color, C>);

impl<'a, T, U, C> Iterator for RedBlackMapRange<'a, T, U, C>
where
    C: Compare<T>,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use std::ops::ControlFlow;

    fn check(map: &RedBlackMap<u32, u32>) {
        if let Err(error) = map.validate() {
            panic!("invalid red-black tree: {}", error);
        }
    }

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
        assert_eq!(map.min_key(), None);
        assert_eq!(map.max_key(), None);
        assert_eq!(map.min_value(), None);
        assert_eq!(map.max_value(), None);
        assert_eq!(map.height(), 0);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
        check(&map);
    }

    #[test]
    fn test_insert_replace() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), None);
        assert_eq!(map.insert(1, 3), Some((1, 1)));
        assert_eq!(map.get(&1), Some(&3));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.min(), Some((&1, &1)));
        assert_eq!(map.max(), Some((&5, &5)));
        assert_eq!(map.max_key(), Some(&5));
        assert_eq!(map.max_value(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        map.insert(3, 3);
        map.insert(5, 5);

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_delete_scenario() {
        let mut map = RedBlackMap::new();
        for key in &[5, 3, 8, 1, 4, 7, 9] {
            map.insert(*key, *key);
        }
        assert_eq!(map.keys().cloned().collect::<Vec<u32>>(), vec![1, 3, 4, 5, 7, 8, 9]);

        assert!(map.delete(&5));
        assert_eq!(map.keys().cloned().collect::<Vec<u32>>(), vec![1, 3, 4, 7, 8, 9]);
        check(&map);
    }

    #[test]
    fn test_three_ascending_keys() {
        let mut map = RedBlackMap::new();
        map.insert(10, 1);
        map.insert(20, 2);
        map.insert(30, 3);
        assert_eq!(map.height(), 2);
        assert_eq!(map.preorder().map(|pair| *pair.0).collect::<Vec<u32>>(), vec![20, 10, 30]);
        check(&map);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        let mut map = RedBlackMap::new();
        for key in 0..1023 {
            map.insert(key, key);
            check(&map);
        }
        assert!(map.height() <= 20);
    }

    #[test]
    fn test_insert_then_remove_everything() {
        let mut map = RedBlackMap::new();
        for key in 0..200 {
            map.insert((key * 37) % 200, key);
        }
        for key in 0..200 {
            assert!(map.remove(&((key * 91) % 200)).is_some());
            check(&map);
        }
        assert!(map.is_empty());
        assert_eq!(map.iter().next(), None);
    }

    #[test]
    fn test_for_each_stops() {
        let mut map = RedBlackMap::new();
        for key in 0..10 {
            map.insert(key, key);
        }

        let mut count = 0;
        map.for_each(|_, _| {
            count += 1;
            if count == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(count, 3);
    }

    #[test]
    fn test_for_each_successor_missing_key() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1);
        let mut count = 0;
        map.for_each_successor(&2, |_, _| {
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 0);
    }

    #[test]
    fn test_with_comparator() {
        let mut map = RedBlackMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
        for key in 0..5 {
            map.insert(key, ());
        }
        assert_eq!(map.keys().cloned().collect::<Vec<u32>>(), vec![4, 3, 2, 1, 0]);
        assert_eq!(map.range(&3, &1).count(), 3);
        assert!(map.validate().is_ok());
    }

    #[test]
    fn test_debug() {
        let mut map = RedBlackMap::new();
        map.insert(2, 'b');
        map.insert(1, 'a');
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2);
        map.insert(5, 6);
        map.insert(3, 4);

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
        assert_eq!((&map).into_iter().count(), 3);
    }

    #[test]
    #[should_panic]
    fn test_index_missing_key() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        let _ = map[&1];
    }
}

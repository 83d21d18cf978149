use crate::arena::{Handle, TypedArena};
use crate::compare::{Compare, Natural};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::skiplist::config::Config;
use log::{debug, trace};
use rand::{Rng, SeedableRng, XorShiftRng};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{ControlFlow, Index, IndexMut};

const ARENA_GROWTH: usize = 256;

struct Node<T, U> {
    entry: Entry<T, U>,
    // one forward link per level the node participates in
    links: Vec<Option<Handle>>,
}

/// An ordered map implemented by a skiplist.
///
/// A skiplist is a probabilistic data structure that allows for binary search tree operations by
/// maintaining a linked hierarchy of subsequences. The first subsequence is essentially a sorted
/// linked list of all the elements that it contains. Each successive subsequence contains a
/// configurable fraction of the elements of the previous subsequence, half of them by default.
/// Using the sparser subsequences, elements can be skipped and searching, insertion, and deletion
/// of entries can be done in expected logarithmic time.
///
/// # Examples
/// ```
/// use ordered_maps::skiplist::SkipMap;
///
/// let mut map = SkipMap::new();
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
pub struct SkipMap<T, U, C = Natural> {
    arena: TypedArena<Node<T, U>>,
    head: Vec<Option<Handle>>,
    probability: f64,
    rng: XorShiftRng,
    len: usize,
    cmp: C,
}

impl<T, U> SkipMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `SkipMap<T, U>` with the default configuration.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let map: SkipMap<u32, u32> = SkipMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Constructs a new, empty `SkipMap<T, U>` with a particular configuration.
    ///
    /// # Panics
    ///
    /// Panics if the seed of the configuration is all zeros.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::{Config, SkipMap};
    ///
    /// let map: SkipMap<u32, u32> = SkipMap::with_config(Config {
    ///     seed: Some([1, 1, 1, 1]),
    ///     ..Config::default()
    /// });
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self::with_config_and_comparator(config, Natural)
    }
}

impl<T, U, C> SkipMap<T, U, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `SkipMap<T, U, C>` ordered by `cmp` with the default
    /// configuration.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// map.insert(1, 'a');
    /// map.insert(2, 'b');
    /// assert_eq!(map.min_key(), Some(&2));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_config_and_comparator(Config::default(), cmp)
    }

    /// Constructs a new, empty `SkipMap<T, U, C>` ordered by `cmp` with a particular
    /// configuration.
    ///
    /// # Panics
    ///
    /// Panics if the seed of the configuration is all zeros.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::{Config, SkipMap};
    ///
    /// let config = Config { max_level: 8, ..Config::default() };
    /// let mut map = SkipMap::with_config_and_comparator(config, |a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, ());
    /// map.insert(-1, ());
    /// assert_eq!(map.max_key(), Some(&-1));
    /// ```
    pub fn with_config_and_comparator(config: Config, cmp: C) -> Self {
        let rng = match config.seed {
            Some(seed) => XorShiftRng::from_seed(seed),
            None => rand::weak_rng(),
        };
        SkipMap {
            arena: TypedArena::new(ARENA_GROWTH),
            head: vec![None; config.max_level()],
            probability: config.probability(),
            rng,
            len: 0,
            cmp,
        }
    }

    // Draws a level in `[0, max_level)` from a geometric distribution.
    fn gen_random_level(&mut self) -> usize {
        let max = self.head.len() - 1;
        let mut level = 0;
        while level < max && self.rng.gen::<f64>() < self.probability {
            level += 1;
        }
        level
    }

    // Returns, for every level, the last node whose key is less than `key`. `None` stands for
    // the head.
    fn predecessors(&self, key: &T) -> Vec<Option<Handle>> {
        let mut ret = vec![None; self.head.len()];
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next(current, level) {
                if self.cmp.compare(&self.arena[next].entry.key, key) != Ordering::Less {
                    break;
                }
                current = Some(next);
            }
            ret[level] = current;
        }
        ret
    }

    fn find(&self, key: &T) -> Option<Handle> {
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next(current, level) {
                match self.cmp.compare(&self.arena[next].entry.key, key) {
                    Ordering::Less => current = Some(next),
                    Ordering::Equal => return Some(next),
                    Ordering::Greater => break,
                }
            }
        }
        None
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will return
    /// and replace the old key-value pair.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)> {
        let predecessors = self.predecessors(&key);
        if let Some(next) = self.next(predecessors[0], 0) {
            if self.cmp.compare(&self.arena[next].entry.key, &key) == Ordering::Equal {
                let old_entry = mem::replace(&mut self.arena[next].entry, Entry::new(key, value));
                return Some(old_entry.into_pair());
            }
        }

        let level = self.gen_random_level();
        trace!("skiplist: inserting node at level {}", level);
        let links = (0..=level)
            .map(|link_level| self.next(predecessors[link_level], link_level))
            .collect();
        let new_node = self.arena.allocate(Node {
            entry: Entry::new(key, value),
            links,
        });
        for (level, predecessor) in predecessors.iter().enumerate().take(level + 1) {
            self.set_next(*predecessor, level, Some(new_node));
        }
        self.len += 1;
        None
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<(T, U)> {
        let predecessors = self.predecessors(key);
        let target = self.next(predecessors[0], 0)?;
        if self.cmp.compare(&self.arena[target].entry.key, key) != Ordering::Equal {
            return None;
        }

        let levels = self.arena[target].links.len();
        for (level, predecessor) in predecessors.iter().enumerate().take(levels) {
            if self.next(*predecessor, level) != Some(target) {
                break;
            }
            let next = self.arena[target].links[level];
            self.set_next(*predecessor, level, next);
        }
        self.len -= 1;
        Some(self.arena.free(&target).entry.into_pair())
    }

    /// Removes a key from the map. Returns `true` if the key was present.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
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
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        self.find(key).is_some()
    }

    /// Returns the key-value pair stored for a particular key, or `None` if the key does not
    /// exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 2);
    /// assert_eq!(map.search(&1), Some((&1, &2)));
    /// assert_eq!(map.search(&0), None);
    /// ```
    pub fn search(&self, key: &T) -> Option<(&T, &U)> {
        self.find(key).map(|node| self.arena[node].entry.as_pair())
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U> {
        self.find(key).map(|node| &self.arena[node].entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let node = self.find(key)?;
        Some(&mut self.arena[node].entry.value)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next(current, level) {
                if self.cmp.compare(&self.arena[next].entry.key, key) == Ordering::Greater {
                    break;
                }
                current = Some(next);
            }
        }
        current.map(|node| &self.arena[node].entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.ceil_node(key).map(|node| &self.arena[node].entry.key)
    }

    fn ceil_node(&self, key: &T) -> Option<Handle> {
        let predecessors = self.predecessors(key);
        self.next(predecessors[0], 0)
    }

    /// Returns the key-value pair that follows a particular key in ascending order. Returns
    /// `None` if the key does not exist in the map or is its maximum.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 'a');
    /// map.insert(5, 'b');
    /// assert_eq!(map.successor(&1), Some((&5, &'b')));
    /// assert_eq!(map.successor(&5), None);
    /// ```
    pub fn successor(&self, key: &T) -> Option<(&T, &U)> {
        let node = self.find(key)?;
        self.arena[node].links[0].map(|next| self.arena[next].entry.as_pair())
    }

    /// Returns the key-value pair that precedes a particular key in ascending order. Returns
    /// `None` if the key does not exist in the map or is its minimum.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 'a');
    /// map.insert(5, 'b');
    /// assert_eq!(map.predecessor(&5), Some((&1, &'a')));
    /// assert_eq!(map.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, key: &T) -> Option<(&T, &U)> {
        self.predecessor_node(key)
            .map(|node| self.arena[node].entry.as_pair())
    }

    fn predecessor_node(&self, key: &T) -> Option<Handle> {
        let predecessors = self.predecessors(key);
        let node = self.next(predecessors[0], 0)?;
        if self.cmp.compare(&self.arena[node].entry.key, key) != Ordering::Equal {
            return None;
        }
        predecessors[0]
    }

    /// Calls `f` on a particular key and every greater key in ascending order, stopping early if
    /// `f` returns `ControlFlow::Break`. Does nothing if the key does not exist in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = SkipMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, ());
    /// }
    ///
    /// let mut visited = Vec::new();
    /// map.for_each_successor(&7, |key, _| {
    ///     visited.push(*key);
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(visited, vec![7, 8, 9]);
    /// ```
    pub fn for_each_successor<F>(&self, key: &T, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        let mut current = self.find(key);
        while let Some(node) = current {
            let Node { entry, links } = &self.arena[node];
            if let ControlFlow::Break(()) = f(&entry.key, &entry.value) {
                return;
            }
            current = links[0];
        }
    }

    /// Calls `f` on a particular key and every smaller key in descending order, stopping early if
    /// `f` returns `ControlFlow::Break`. Does nothing if the key does not exist in the map.
    ///
    /// Levels are only linked forward, so every step performs a fresh descent and takes expected
    /// logarithmic time.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = SkipMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, ());
    /// }
    ///
    /// let mut visited = Vec::new();
    /// map.for_each_predecessor(&5, |key, _| {
    ///     visited.push(*key);
    ///     if *key == 3 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(visited, vec![5, 4, 3]);
    /// ```
    pub fn for_each_predecessor<F>(&self, key: &T, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        let mut current = self.find(key);
        while let Some(node) = current {
            let entry = &self.arena[node].entry;
            if let ControlFlow::Break(()) = f(&entry.key, &entry.value) {
                return;
            }
            current = self.predecessor_node(&entry.key);
        }
    }

    /// Returns an iterator over the entries whose keys lie between `from` and `to`, both
    /// inclusive, in ascending order.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// for key in 0..10 {
    ///     map.insert(key, key * 2);
    /// }
    /// assert_eq!(
    ///     map.range(&3, &5).collect::<Vec<(&u32, &u32)>>(),
    ///     vec![(&3, &6), (&4, &8), (&5, &10)],
    /// );
    /// ```
    pub fn range<'a>(&'a self, from: &T, to: &'a T) -> SkipMapRange<'a, T, U, C> {
        SkipMapRange {
            map: self,
            current: self.ceil_node(from),
            to,
        }
    }

    /// Checks every structural invariant of the map: each level is a strictly increasing
    /// sublist of the level below it that contains exactly the nodes of at least that level, and
    /// the recorded size matches the number of entries. This walks every level and is meant for
    /// tests and debugging.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// for key in 0..100 {
    ///     map.insert(key, ());
    /// }
    /// assert!(map.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let mut expected = vec![0; self.head.len()];
        let mut current = self.head[0];
        while let Some(node) = current {
            let links = &self.arena[node].links;
            if links.is_empty() || links.len() > self.head.len() {
                return Err(Error::BrokenLevel { level: 0 });
            }
            for count in expected.iter_mut().take(links.len()) {
                *count += 1;
            }
            current = links[0];
        }

        if expected[0] != self.len {
            return Err(Error::SizeMismatch {
                recorded: self.len,
                actual: expected[0],
            });
        }

        for (level, expected) in expected.into_iter().enumerate() {
            let mut count = 0;
            let mut prev: Option<Handle> = None;
            let mut current = self.head[level];
            while let Some(node) = current {
                let Node { entry, links } = &self.arena[node];
                if links.len() <= level || count == expected {
                    return Err(Error::BrokenLevel { level });
                }
                if let Some(prev) = prev {
                    let prev_key = &self.arena[prev].entry.key;
                    if self.cmp.compare(prev_key, &entry.key) != Ordering::Less {
                        return Err(Error::BrokenLevel { level });
                    }
                }
                prev = Some(node);
                count += 1;
                current = links[level];
            }
            if count != expected {
                return Err(Error::BrokenLevel { level });
            }
        }
        Ok(())
    }
}

impl<T, U, C> SkipMap<T, U, C> {
    fn next(&self, node: Option<Handle>, level: usize) -> Option<Handle> {
        match node {
            Some(node) => self.arena[node].links[level],
            None => self.head[level],
        }
    }

    fn set_next(&mut self, node: Option<Handle>, level: usize, next: Option<Handle>) {
        match node {
            Some(node) => self.arena[node].links[level] = next,
            None => self.head[level] = next,
        }
    }

    fn last_node(&self) -> Option<Handle> {
        let mut current = None;
        for level in (0..self.head.len()).rev() {
            while let Some(next) = self.next(current, level) {
                current = Some(next);
            }
        }
        current
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let map: SkipMap<u32, u32> = SkipMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("skiplist: clearing {} entries", self.len);
        self.arena.clear();
        for link in &mut self.head {
            *link = None;
        }
        self.len = 0;
    }

    /// Returns the entry with the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.min(), Some((&1, &'a')));
    /// ```
    pub fn min(&self) -> Option<(&T, &U)> {
        self.head[0].map(|node| self.arena[node].entry.as_pair())
    }

    /// Returns the entry with the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 'a');
    /// map.insert(3, 'b');
    /// assert_eq!(map.max(), Some((&3, &'b')));
    /// ```
    pub fn max(&self) -> Option<(&T, &U)> {
        self.last_node().map(|node| self.arena[node].entry.as_pair())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min_key(&self) -> Option<&T> {
        self.min().map(|pair| pair.0)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max_key(&self) -> Option<&T> {
        self.max().map(|pair| pair.0)
    }

    /// Returns the value associated with the minimum key of the map. Returns `None` if the map is
    /// empty.
    pub fn min_value(&self) -> Option<&U> {
        self.min().map(|pair| pair.1)
    }

    /// Returns the value associated with the maximum key of the map. Returns `None` if the map is
    /// empty.
    pub fn max_value(&self) -> Option<&U> {
        self.max().map(|pair| pair.1)
    }

    /// Calls `f` on every entry of the map in ascending order of keys, stopping early if `f`
    /// returns `ControlFlow::Break`.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    /// use std::ops::ControlFlow;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    ///
    /// let mut visited = Vec::new();
    /// map.for_each(|key, value| {
    ///     visited.push((*key, *value));
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(visited, vec![(1, 'a'), (2, 'b')]);
    /// ```
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, &U) -> ControlFlow<()>,
    {
        for (key, value) in self.iter() {
            if let ControlFlow::Break(()) = f(key, value) {
                return;
            }
        }
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs in ascending
    /// order.
    ///
    /// # Examples
    /// ```
    /// use ordered_maps::skiplist::SkipMap;
    ///
    /// let mut map = SkipMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SkipMapIter<T, U> {
        SkipMapIter {
            arena: &self.arena,
            current: self.head[0],
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|pair| pair.0)
    }

    /// Returns an iterator over the values of the map in ascending order of their keys.
    pub fn values(&self) -> impl Iterator<Item = &U> {
        self.iter().map(|pair| pair.1)
    }
}

impl<'a, T, U, C> IntoIterator for &'a SkipMap<T, U, C>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);
    type IntoIter = SkipMapIter<'a, T, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator for `SkipMap<T, U>`.
///
/// This iterator traverses the elements of a map in ascending order and yields immutable
/// references.
pub struct SkipMapIter<'a, T, U> {
    arena: &'a TypedArena<Node<T, U>>,
    current: Option<Handle>,
}

impl<'a, T, U> Iterator for SkipMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let node = &arena[self.current?];
        self.current = node.links[0];
        Some(node.entry.as_pair())
    }
}

/// An iterator over the entries of a `SkipMap<T, U, C>` whose keys lie in an inclusive range.
pub struct SkipMapRange<'a, T, U, C> {
    map: &'a SkipMap<T, U, C>,
    current: Option<Handle>,
    to: &'a T,
}

impl<'a, T, U, C> Iterator for SkipMapRange<'a, T, U, C>
where
    C: Compare<T>,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        let node = &map.arena[self.current?];
        if map.cmp.compare(&node.entry.key, self.to) == Ordering::Greater {
            self.current = None;
            return None;
        }
        self.current = node.links[0];
        Some(node.entry.as_pair())
    }
}

impl<T, U> Default for SkipMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C> fmt::Debug for SkipMap<T, U, C>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, C> Index<&'a T> for SkipMap<T, U, C>
where
    C: Compare<T>,
{
    type Output = U;

    fn index(&self, key: &T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, C> IndexMut<&'a T> for SkipMap<T, U, C>
where
    C: Compare<T>,
{
    fn index_mut(&mut self, key: &T) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

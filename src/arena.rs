//! Slab allocator that backs the nodes of every map in this crate.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object stored in a `TypedArena<T>`.
///
/// Handles are plain indices, so they can be copied freely and used as links between nodes
/// without creating ownership cycles. A handle is only meaningful for the arena that produced it
/// and only until the object it refers to is freed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

enum Block<T> {
    Live(T),
    // index of the next free block
    Free(Option<usize>),
}

/// A slab of objects of a single type.
///
/// Objects live in one contiguous vector that grows `growth` slots at a time. Freed blocks are
/// threaded onto a free list and handed out again, most recently freed first, so a map that
/// repeatedly inserts and removes keys keeps a stable memory footprint.
///
/// # Examples
///
/// ```
/// use ordered_maps::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// ```
pub struct TypedArena<T> {
    blocks: Vec<Block<T>>,
    free_head: Option<usize>,
    growth: usize,
    live: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` that reserves room for `growth` more objects
    /// whenever it runs out of space.
    ///
    /// # Panics
    ///
    /// Panics if `growth` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(256);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(growth: usize) -> Self {
        assert!(growth > 0, "Error: arena growth must be positive.");
        TypedArena {
            blocks: Vec::new(),
            free_head: None,
            growth,
            live: 0,
        }
    }

    /// Stores `value` and returns the `Handle` that refers to it. A previously freed block is
    /// reused when one is available.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate('x');
    /// assert_eq!(arena.get(&x), Some(&'x'));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.live += 1;
        let index = match self.free_head {
            Some(index) => {
                match mem::replace(&mut self.blocks[index], Block::Live(value)) {
                    Block::Free(next) => self.free_head = next,
                    Block::Live(_) => panic!("Error: free list points to a live block."),
                }
                index
            },
            None => {
                if self.blocks.len() == self.blocks.capacity() {
                    self.blocks.reserve_exact(self.growth);
                }
                self.blocks.push(Block::Live(value));
                self.blocks.len() - 1
            },
        };
        Handle { index }
    }

    /// Removes the object behind `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not refer to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// assert!(arena.is_empty());
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        match self.blocks.get(handle.index) {
            Some(Block::Live(_)) => {},
            _ => panic!("Error: attempting to free a block that is not live."),
        }
        let next = self.free_head.replace(handle.index);
        self.live -= 1;
        match mem::replace(&mut self.blocks[handle.index], Block::Free(next)) {
            Block::Live(value) => value,
            Block::Free(_) => unreachable!(),
        }
    }

    /// Returns a reference to the object behind `handle`, or `None` if it is not live.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object behind `handle`, or `None` if it is not live.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// if let Some(value) = arena.get_mut(&x) {
    ///     *value = 3;
    /// }
    /// assert_eq!(arena[x], 3);
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of live objects in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// arena.allocate(1);
    /// arena.free(&x);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.live
    }

    /// Returns `true` if the arena holds no live objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(16);
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drops every object in the arena and releases its storage. All previously issued handles
    /// become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_maps::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(16);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        self.blocks = Vec::new();
        self.free_head = None;
        self.live = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live block.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle does not refer to a live block.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    #[should_panic]
    fn test_free_unknown_handle() {
        let mut arena: TypedArena<u32> = TypedArena::new(16);
        arena.free(&Handle { index: 0 });
    }

    #[test]
    #[should_panic]
    fn test_free_twice() {
        let mut arena = TypedArena::new(16);
        let handle = arena.allocate(0);
        arena.free(&handle);
        arena.free(&handle);
    }

    #[test]
    fn test_handles_are_sequential() {
        let mut arena = TypedArena::new(2);
        for index in 0..5 {
            assert_eq!(arena.allocate(index), Handle { index });
        }
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn test_free_recycles_most_recent_block() {
        let mut arena = TypedArena::new(4);
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        arena.allocate(2);

        assert_eq!(arena.free(&a), 0);
        assert_eq!(arena.free(&b), 1);
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.allocate(3), b);
        assert_eq!(arena.allocate(4), a);
        assert_eq!(arena.allocate(5), Handle { index: 3 });
        assert_eq!(arena[a], 4);
        assert_eq!(arena[b], 3);
    }

    #[test]
    fn test_get_freed_block() {
        let mut arena = TypedArena::new(16);
        let handle = arena.allocate(0);
        arena.free(&handle);
        assert_eq!(arena.get(&handle), None);
        assert_eq!(arena.get_mut(&handle), None);
        assert_eq!(arena.get(&Handle { index: 7 }), None);
    }

    #[test]
    #[should_panic]
    fn test_index_freed_block() {
        let mut arena = TypedArena::new(16);
        let handle = arena.allocate(0);
        arena.free(&handle);
        assert_eq!(arena[handle], 0);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        for value in 0..5 {
            arena.allocate(value);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(0), Handle { index: 0 });
    }
}

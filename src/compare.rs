//! Total orders over keys.
//!
//! Every map in this crate is parameterized over a `Compare<T>` implementation that decides the
//! position of keys. Two keys for which `compare` returns `Ordering::Equal` are treated as the
//! same key: inserting the second one updates the existing entry instead of adding a new one.
//!
//! The order must be total and consistent. A comparator that is not (for example one that
//! compares floats containing `NaN` with `partial_cmp().unwrap_or(Equal)`) leaves the maps in an
//! unspecified, though memory-safe, state.

use std::cmp::Ordering;

/// A total order over values of type `T`.
///
/// Implemented by `Natural` for every `T: Ord` and by every closure or function of type
/// `Fn(&T, &T) -> Ordering`.
///
/// # Examples
/// ```
/// use ordered_maps::avl_tree::AvlMap;
/// use std::cmp::Ordering;
///
/// // keys in descending order
/// let mut map = AvlMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
/// map.insert(1, "a");
/// map.insert(2, "b");
/// assert_eq!(map.min_key(), Some(&2));
/// ```
pub trait Compare<T: ?Sized> {
    /// Compares two values, returning their relative order.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// The order given by the `Ord` implementation of the key type.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T> Compare<T> for Natural
where
    T: Ord + ?Sized,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::{Compare, Natural};
    use std::cmp::Ordering;

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Natural.compare(&3, &3), Ordering::Equal);
    }

    #[test]
    fn test_closure() {
        let by_length = |left: &String, right: &String| left.len().cmp(&right.len());
        assert_eq!(
            by_length.compare(&String::from("ab"), &String::from("c")),
            Ordering::Greater,
        );
        assert_eq!(
            by_length.compare(&String::from("ab"), &String::from("cd")),
            Ordering::Equal,
        );
    }
}

//! The public 2-3-4 tree type and its iterators.

use core::fmt;

use crate::Error;
use crate::raw::RawTree;

mod capacity;
mod traversal;

pub use traversal::{Iter, Levels};

/// A 2-3-4 tree of `i64` keys.
///
/// Every node holds one to three keys; internal nodes have one more child than keys, and all
/// leaves sit at the same depth. Insertion splits full nodes on the way down, deletion borrows
/// from or merges with siblings on the way back up, so every operation visits O(log n) nodes.
///
/// Duplicate keys are stored as distinct entries. Deleting a duplicated value removes one
/// occurrence, the first one met by the top-down search.
///
/// # Examples
///
/// ```
/// use tree234::{Removal, Tree234};
///
/// let mut tree = Tree234::new();
/// for value in [10, 20, 5] {
///     tree.insert(value)?;
/// }
/// assert_eq!(tree.levels().collect::<Vec<_>>(), [(0, &[5, 10, 20][..])]);
///
/// // The root is full, so the next insert splits it first.
/// tree.insert(6)?;
/// assert_eq!(
///     tree.levels().collect::<Vec<_>>(),
///     [(0, &[10][..]), (1, &[5, 6][..]), (1, &[20][..])]
/// );
///
/// assert_eq!(tree.delete(20), Removal::Removed);
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [5, 6, 10]);
/// # Ok::<(), tree234::Error>(())
/// ```
#[derive(Clone)]
pub struct Tree234 {
    raw: RawTree,
}

/// Where [`Tree234::search`] found a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location<'a> {
    /// Depth of the node holding the value; the root is level 0.
    pub level: usize,
    /// Index of the value among that node's keys.
    pub position: usize,
    /// All keys of that node.
    pub keys: &'a [i64],
}

/// Outcome of [`Tree234::delete`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Removal {
    /// One occurrence of the value was removed.
    Removed,
    /// The tree has keys, but not this one.
    NotFound,
    /// The tree has no keys at all.
    EmptyTree,
}

impl Removal {
    /// Returns `true` for [`Removal::Removed`].
    #[must_use]
    pub fn is_removed(self) -> bool {
        self == Removal::Removed
    }
}

impl Tree234 {
    /// Makes a new, empty `Tree234`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::new();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Tree234 { raw: RawTree::new() }
    }

    /// Inserts a value. Equal values already in the tree are kept; the new one is added
    /// next to them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if a node needed on the way down cannot be
    /// allocated. The tree then does not contain the value but is otherwise intact.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let mut tree = Tree234::new();
    /// tree.insert(2)?;
    /// tree.insert(2)?;
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), tree234::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: i64) -> Result<(), Error> {
        self.raw.insert(value)
    }

    /// Finds a value, reporting the level of the node that holds it and its position there.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::from([10, 20, 5, 6]);
    /// let location = tree.search(6).unwrap();
    /// assert_eq!(location.level, 1);
    /// assert_eq!(location.position, 1);
    /// assert_eq!(location.keys, &[5, 6]);
    /// assert!(tree.search(7).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn search(&self, value: i64) -> Option<Location<'_>> {
        self.raw.search(value).map(|found| Location {
            level: found.level,
            position: found.position,
            keys: self.raw.node(found.node).keys(),
        })
    }

    /// Returns `true` if the tree holds at least one occurrence of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::from([0, 1]);
    /// assert!(tree.contains(0));
    /// assert!(!tree.contains(2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        self.raw.search(value).is_some()
    }

    /// Removes one occurrence of `value`, rebalancing as needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::{Removal, Tree234};
    ///
    /// let mut tree = Tree234::new();
    /// assert_eq!(tree.delete(1), Removal::EmptyTree);
    ///
    /// tree.insert(1)?;
    /// assert_eq!(tree.delete(2), Removal::NotFound);
    /// assert_eq!(tree.delete(1), Removal::Removed);
    /// assert!(tree.is_empty());
    /// # Ok::<(), tree234::Error>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete(&mut self, value: i64) -> Removal {
        self.raw.delete(value)
    }

    /// Counts the keys by visiting every node.
    ///
    /// Always equal to [`Tree234::len`], which is kept up to date instead of recomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::from([3, 1, 4, 1, 5]);
    /// assert_eq!(tree.count_keys(), 5);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn count_keys(&self) -> usize {
        self.raw.count_keys()
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Returns the number of levels, 0 for an empty tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// assert_eq!(Tree234::new().height(), 0);
    /// assert_eq!(Tree234::from([1, 2, 3]).height(), 1);
    /// assert_eq!(Tree234::from([1, 2, 3, 4]).height(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the number of nodes in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.raw.node_count()
    }

    /// Removes every key. Node storage is kept for reuse.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Visits every node depth first, children left to right, yielding its level and keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::from([10, 20, 5, 6]);
    /// let mut levels = tree.levels();
    /// assert_eq!(levels.next(), Some((0, &[10][..])));
    /// assert_eq!(levels.next(), Some((1, &[5, 6][..])));
    /// assert_eq!(levels.next(), Some((1, &[20][..])));
    /// assert_eq!(levels.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; O(1) per node.
    pub fn levels(&self) -> Levels<'_> {
        Levels::new(&self.raw)
    }

    /// Iterates over every key in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::from([3, 1, 2, 1]);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 1, 2, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; amortized O(1) per key.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.raw)
    }

    /// Inserts a value that the caller cannot recover from failing to store.
    fn insert_or_panic(&mut self, value: i64) {
        if let Err(error) = self.raw.insert(value) {
            panic!("`Tree234` - {error} while inserting {value}");
        }
    }
}

impl Default for Tree234 {
    /// Creates an empty `Tree234`.
    fn default() -> Tree234 {
        Tree234::new()
    }
}

impl fmt::Debug for Tree234 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.levels()).finish()
    }
}

/// Renders one line per node in [`Tree234::levels`] order, indented by one tab per level.
///
/// ```
/// use tree234::Tree234;
///
/// let tree = Tree234::from([10, 20, 5, 6]);
/// assert_eq!(
///     tree.to_string(),
///     " Level  0:  10\n\t Level  1:   5 |   6\n\t Level  1:  20\n"
/// );
/// ```
impl fmt::Display for Tree234 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, keys) in self.levels() {
            for _ in 0..level {
                f.write_str("\t")?;
            }
            write!(f, " Level {level:2}: ")?;
            for (index, key) in keys.iter().enumerate() {
                if index > 0 {
                    f.write_str(" | ")?;
                }
                write!(f, "{key:3}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// # Panics
///
/// Panics if a node cannot be allocated.
impl FromIterator<i64> for Tree234 {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Tree234 {
        let mut tree = Tree234::new();
        tree.extend(iter);
        tree
    }
}

/// # Panics
///
/// Panics if a node cannot be allocated; use [`Tree234::insert`] to handle that case.
impl Extend<i64> for Tree234 {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for value in iter {
            self.insert_or_panic(value);
        }
    }
}

impl<'a> Extend<&'a i64> for Tree234 {
    fn extend<I: IntoIterator<Item = &'a i64>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<const N: usize> From<[i64; N]> for Tree234 {
    /// Inserts the array's values in order.
    fn from(values: [i64; N]) -> Tree234 {
        values.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Tree234 {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

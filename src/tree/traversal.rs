use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, RawTree};

// Deep enough for any tree whose handles fit in memory without spilling.
type Stack = SmallVec<[(Handle, usize); 16]>;

/// A depth-first walk over the nodes of a [`Tree234`](crate::Tree234).
///
/// Yields `(level, keys)` for each node, parents before children and children left to right.
/// This `struct` is created by [`Tree234::levels`](crate::Tree234::levels).
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Levels<'a> {
    raw: &'a RawTree,
    // Nodes still to visit, with their level; the next one is on top.
    stack: Stack,
}

impl<'a> Levels<'a> {
    pub(crate) fn new(raw: &'a RawTree) -> Self {
        let mut stack = Stack::new();
        if let Some(root) = raw.root() {
            stack.push((root, 0));
        }
        Levels { raw, stack }
    }
}

impl<'a> Iterator for Levels<'a> {
    type Item = (usize, &'a [i64]);

    fn next(&mut self) -> Option<(usize, &'a [i64])> {
        let (handle, level) = self.stack.pop()?;
        let node = self.raw.node(handle);
        self.stack
            .extend(node.children().iter().rev().flatten().map(|&child| (child, level + 1)));
        Some((level, node.keys()))
    }
}

impl FusedIterator for Levels<'_> {}

impl fmt::Debug for Levels<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the keys of a [`Tree234`](crate::Tree234) in ascending order.
///
/// This `struct` is created by [`Tree234::iter`](crate::Tree234::iter).
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    raw: &'a RawTree,
    // Path from the root to the current leaf; each entry holds the index of the next key
    // to yield from that node.
    stack: Stack,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(raw: &'a RawTree) -> Self {
        let mut iter = Iter {
            raw,
            stack: Stack::new(),
            remaining: raw.len(),
        };
        if let Some(root) = raw.root() {
            iter.descend(root);
        }
        iter
    }

    /// Pushes `handle` and the leftmost path below it.
    fn descend(&mut self, handle: Handle) {
        let mut current = Some(handle);
        while let Some(handle) = current {
            self.stack.push((handle, 0));
            current = self.raw.node(handle).child(0);
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            let (handle, index) = *self.stack.last()?;
            let node = self.raw.node(handle);
            if index == node.key_count() {
                self.stack.pop();
                continue;
            }

            let key = node.key(index);
            if let Some(top) = self.stack.last_mut() {
                top.1 = index + 1;
            }
            if let Some(child) = node.child(index + 1) {
                self.descend(child);
            }
            self.remaining -= 1;
            return Some(key);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::Tree234;
    use alloc::vec::Vec;

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = Tree234::new();
        assert_eq!(tree.levels().next(), None);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[test]
    fn levels_are_depth_first_left_to_right() {
        let tree: Tree234 = (1..=10).collect();
        let levels: Vec<(usize, Vec<i64>)> = tree.levels().map(|(level, keys)| (level, keys.to_vec())).collect();
        assert_eq!(
            levels,
            [
                (0, alloc::vec![4]),
                (1, alloc::vec![2]),
                (2, alloc::vec![1]),
                (2, alloc::vec![3]),
                (1, alloc::vec![6, 8]),
                (2, alloc::vec![5]),
                (2, alloc::vec![7]),
                (2, alloc::vec![9, 10]),
            ]
        );
        // Restartable: a second walk sees the same nodes.
        assert_eq!(tree.levels().count(), levels.len());
    }

    #[test]
    fn iter_is_ascending_and_exact() {
        let values = [50, -3, 17, 0, 17, 99, -40, 8, 8, 8, 23, 61, 5];
        let tree = Tree234::from(values);
        let mut expected = values.to_vec();
        expected.sort_unstable();

        let mut iter = tree.iter();
        assert_eq!(iter.len(), values.len());
        iter.next();
        assert_eq!(iter.len(), values.len() - 1);
        assert_eq!(tree.iter().collect::<Vec<_>>(), expected);
        assert_eq!((&tree).into_iter().sum::<i64>(), expected.iter().sum::<i64>());
    }
}

use super::handle::Handle;

pub(crate) const MAX_KEYS: usize = 3;
pub(crate) const MAX_CHILDREN: usize = MAX_KEYS + 1;
pub(crate) const MIN_KEYS: usize = 1;

/// Result of scanning a node for a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// The value sits at this key index.
    Found(usize),
    /// The value is not in this node; its subtree is the child at this index.
    GoDown(usize),
}

/// A 2-3-4 tree node.
///
/// Keys and children are left-packed; only the first `len` keys and, for an internal node, the
/// first `len + 1` children are meaningful. A node is a leaf exactly when child slot 0 is empty.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    keys: [i64; MAX_KEYS],
    children: [Option<Handle>; MAX_CHILDREN],
    // Non-owning back-reference; `None` for the root.
    parent: Option<Handle>,
    len: usize,
}

impl Node {
    /// Creates a leaf holding a single key.
    pub(crate) fn leaf(key: i64) -> Self {
        Self {
            keys: [key, 0, 0],
            children: [None; MAX_CHILDREN],
            parent: None,
            len: 1,
        }
    }

    /// Creates a root holding `key` between two existing subtrees.
    pub(crate) fn root(key: i64, left: Handle, right: Handle) -> Self {
        Self {
            keys: [key, 0, 0],
            children: [Some(left), Some(right), None, None],
            parent: None,
            len: 1,
        }
    }

    #[inline]
    pub(crate) fn key_count(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children[0].is_none()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.len == MAX_KEYS
    }

    /// Returns true if a sibling could take a key from this node and leave it valid.
    #[inline]
    pub(crate) fn can_lend(&self) -> bool {
        self.len > MIN_KEYS
    }

    #[inline]
    pub(crate) fn keys(&self) -> &[i64] {
        &self.keys[..self.len]
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> i64 {
        self.keys()[index]
    }

    pub(crate) fn set_key(&mut self, index: usize, key: i64) {
        assert!(index < self.len, "`Node::set_key()` - index {index} out of {} keys", self.len);
        self.keys[index] = key;
    }

    pub(crate) fn last_key(&self) -> Option<i64> {
        self.keys().last().copied()
    }

    /// Returns the populated child slots; empty for a leaf.
    pub(crate) fn children(&self) -> &[Option<Handle>] {
        if self.is_leaf() { &[] } else { &self.children[..=self.len] }
    }

    /// Returns the child at `index`, or `None` for a leaf or a slot past the last child.
    #[inline]
    pub(crate) fn child(&self, index: usize) -> Option<Handle> {
        self.children().get(index).copied().flatten()
    }

    /// Returns the rightmost child, if this node is internal.
    pub(crate) fn last_child(&self) -> Option<Handle> {
        self.child(self.len)
    }

    /// Returns the slot holding `child`, if it is one of this node's children.
    pub(crate) fn index_of_child(&self, child: Handle) -> Option<usize> {
        self.children().iter().position(|&slot| slot == Some(child))
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Scans keys left to right for `value`.
    ///
    /// Stops at the first key that is not smaller than `value`: an equal key is a match,
    /// a larger one names the child to the left of it. Past the last key, the last child.
    #[inline]
    pub(crate) fn search(&self, value: i64) -> SearchResult {
        match self.keys().iter().position(|&key| value <= key) {
            Some(index) if self.keys[index] == value => SearchResult::Found(index),
            Some(index) => SearchResult::GoDown(index),
            None => SearchResult::GoDown(self.len),
        }
    }

    /// Inserts `value` into a non-full leaf, after any equal keys.
    pub(crate) fn insert_key(&mut self, value: i64) {
        assert!(!self.is_full(), "`Node::insert_key()` - node is full!");
        let index = self.keys().partition_point(|&key| key <= value);
        self.keys.copy_within(index..self.len, index + 1);
        self.keys[index] = value;
        self.len += 1;
    }

    /// Removes and returns the key at `index` of a leaf.
    pub(crate) fn remove_key(&mut self, index: usize) -> i64 {
        assert!(index < self.len, "`Node::remove_key()` - index {index} out of {} keys", self.len);
        let key = self.keys[index];
        self.keys.copy_within(index + 1..self.len, index);
        self.len -= 1;
        self.keys[self.len] = 0;
        key
    }

    /// Inserts `key` at `index` with `right` as the child immediately after it.
    ///
    /// Used when a child at slot `index` has split and `right` is its new right half.
    pub(crate) fn insert_separator(&mut self, index: usize, key: i64, right: Handle) {
        assert!(!self.is_full(), "`Node::insert_separator()` - node is full!");
        assert!(index <= self.len, "`Node::insert_separator()` - index {index} out of {} keys", self.len);
        self.keys.copy_within(index..self.len, index + 1);
        self.keys[index] = key;
        self.children.copy_within(index + 1..=self.len, index + 2);
        self.children[index + 1] = Some(right);
        self.len += 1;
    }

    /// Removes the key at `index` and the child to its right. Returns both.
    pub(crate) fn remove_separator(&mut self, index: usize) -> (i64, Option<Handle>) {
        assert!(index < self.len, "`Node::remove_separator()` - index {index} out of {} keys", self.len);
        let key = self.keys[index];
        let right = self.children[index + 1];
        self.keys.copy_within(index + 1..self.len, index);
        self.children.copy_within(index + 2..=self.len, index + 1);
        self.children[self.len] = None;
        self.len -= 1;
        self.keys[self.len] = 0;
        (key, right)
    }

    /// Prepends a key and, for an internal node, a child in front of the current first child.
    pub(crate) fn push_front(&mut self, key: i64, child: Option<Handle>) {
        assert!(!self.is_full(), "`Node::push_front()` - node is full!");
        self.keys.copy_within(0..self.len, 1);
        self.keys[0] = key;
        if child.is_some() {
            self.children.copy_within(0..=self.len, 1);
            self.children[0] = child;
        }
        self.len += 1;
    }

    /// Appends a key and, for an internal node, a child after the current last child.
    pub(crate) fn push_back(&mut self, key: i64, child: Option<Handle>) {
        assert!(!self.is_full(), "`Node::push_back()` - node is full!");
        self.keys[self.len] = key;
        self.len += 1;
        if child.is_some() {
            self.children[self.len] = child;
        }
    }

    /// Removes the first key and the first child (if internal).
    pub(crate) fn pop_front(&mut self) -> (i64, Option<Handle>) {
        assert!(self.len > 0, "`Node::pop_front()` - node has no keys!");
        let key = self.keys[0];
        let child = self.children[0];
        self.keys.copy_within(1..self.len, 0);
        if child.is_some() {
            self.children.copy_within(1..=self.len, 0);
            self.children[self.len] = None;
        }
        self.len -= 1;
        self.keys[self.len] = 0;
        (key, child)
    }

    /// Removes the last key and the last child (if internal).
    pub(crate) fn pop_back(&mut self) -> (i64, Option<Handle>) {
        assert!(self.len > 0, "`Node::pop_back()` - node has no keys!");
        let child = self.children[self.len].take();
        self.len -= 1;
        let key = self.keys[self.len];
        self.keys[self.len] = 0;
        (key, child)
    }

    /// Splits a full node. This node keeps `keys[0]` and the first two children; the returned
    /// node takes `keys[2]` and the last two children. Returns the middle key with it.
    ///
    /// The returned node's parent is copied from this node; the moved children still point
    /// here and must be re-parented by the caller.
    pub(crate) fn split(&mut self) -> (i64, Node) {
        assert!(self.is_full(), "`Node::split()` - node is not full!");
        let middle = self.keys[1];
        let right = Node {
            keys: [self.keys[2], 0, 0],
            children: [self.children[2].take(), self.children[3].take(), None, None],
            parent: self.parent,
            len: 1,
        };
        self.keys = [self.keys[0], 0, 0];
        self.len = 1;
        (middle, right)
    }

    /// Appends `separator` and then all of `right`'s keys and children.
    pub(crate) fn absorb(&mut self, separator: i64, right: Node) {
        assert!(
            self.len + 1 + right.len <= MAX_KEYS,
            "`Node::absorb()` - {} + 1 + {} keys do not fit!",
            self.len,
            right.len
        );
        let base = self.len + 1;
        self.keys[self.len] = separator;
        self.keys[base..base + right.len].copy_from_slice(right.keys());
        if !right.is_leaf() {
            self.children[base..=base + right.len].copy_from_slice(&right.children[..=right.len]);
        }
        self.len = base + right.len;
    }
}

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{MAX_CHILDREN, Node, SearchResult};
use crate::{Error, Removal};

/// The core 2-3-4 tree backing `Tree234`.
#[derive(Clone)]
pub(crate) struct RawTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of keys stored in the tree.
    len: usize,
}

/// Where a search ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Found {
    pub(crate) node: Handle,
    pub(crate) position: usize,
    /// Depth of `node`, the root being level 0.
    pub(crate) level: usize,
}

impl RawTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `nodes` nodes.
    pub(crate) fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(nodes),
            root: None,
            len: 0,
        }
    }

    /// Like [`RawTree::with_capacity`], but reports a failed allocation.
    pub(crate) fn try_with_capacity(nodes: usize) -> Result<Self, Error> {
        Ok(Self {
            nodes: Arena::try_with_capacity(nodes)?,
            root: None,
            len: 0,
        })
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of node slots reserved.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of live nodes.
    pub(crate) const fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Returns the child at `index` of an internal node.
    fn child(&self, handle: Handle, index: usize) -> Handle {
        self.nodes.get(handle).child(index).expect("internal node is missing a child")
    }

    /// Returns the child of an internal node that an insert of `value` descends into.
    fn child_toward(&self, handle: Handle, value: i64) -> Handle {
        let (SearchResult::Found(index) | SearchResult::GoDown(index)) = self.nodes.get(handle).search(value);
        self.child(handle, index)
    }

    /// Returns the number of levels; 0 for an empty tree.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            height += 1;
            current = self.nodes.get(handle).child(0);
        }
        height
    }

    /// Counts keys by visiting every node.
    pub(crate) fn count_keys(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut count = 0;
        let mut stack: SmallVec<[Handle; 16]> = SmallVec::new();
        stack.push(root);
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            count += node.key_count();
            stack.extend(node.children().iter().flatten().copied());
        }
        count
    }

    /// Searches for `value` from the root.
    pub(crate) fn search(&self, value: i64) -> Option<Found> {
        let mut current = self.root?;
        let mut level = 0;

        loop {
            let node = self.nodes.get(current);
            match node.search(value) {
                SearchResult::Found(position) => {
                    return Some(Found {
                        node: current,
                        position,
                        level,
                    });
                }
                SearchResult::GoDown(index) => {
                    current = node.child(index)?;
                    level += 1;
                }
            }
        }
    }

    /// Inserts `value`, splitting every full node met on the way down.
    ///
    /// Every node the splits will need is reserved before the first one runs, so a failed
    /// insert leaves the tree exactly as it was.
    pub(crate) fn insert(&mut self, value: i64) -> Result<(), Error> {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.try_alloc(Node::leaf(value))?);
            self.len = 1;
            return Ok(());
        };

        self.nodes.try_reserve(self.nodes_needed_for(root, value))?;

        let mut current = root;
        if self.nodes.get(current).is_full() {
            current = self.split(current);
        }
        while !self.nodes.get(current).is_leaf() {
            let mut child = self.child_toward(current, value);
            if self.nodes.get(child).is_full() {
                // The promoted key now sits in `current`; pick the half that covers `value`.
                self.split(child);
                child = self.child_toward(current, value);
            }
            current = child;
        }

        self.nodes.get_mut(current).insert_key(value);
        self.len += 1;
        Ok(())
    }

    /// Counts the nodes an insert of `value` allocates: one per full node on its path, plus a
    /// new root when the root is full.
    ///
    /// Splitting a node keeps its children under the half that covers `value`, so the path
    /// walked here is the one the insert takes.
    fn nodes_needed_for(&self, root: Handle, value: i64) -> usize {
        let mut needed = usize::from(self.nodes.get(root).is_full());
        let mut current = Some(root);
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            needed += usize::from(node.is_full());
            current = if node.is_leaf() { None } else { Some(self.child_toward(handle, value)) };
        }
        needed
    }

    /// Splits a full node and returns the handle of the node that received the middle key.
    ///
    /// The caller must have reserved one node, or two when `handle` is the root.
    fn split(&mut self, handle: Handle) -> Handle {
        let parent = self.nodes.get(handle).parent();
        let (middle, right) = self.nodes.get_mut(handle).split();
        let right = self.nodes.alloc(right);
        self.adopt_children(right);

        match parent {
            Some(parent) => {
                let index = self
                    .nodes
                    .get(parent)
                    .index_of_child(handle)
                    .expect("split node is not a child of its parent");
                self.nodes.get_mut(parent).insert_separator(index, middle, right);
                log::trace!("split {handle:?}: promoted {middle} into {parent:?}, new sibling {right:?}");
                parent
            }
            None => {
                let root = self.nodes.alloc(Node::root(middle, handle, right));
                self.nodes.get_mut(handle).set_parent(Some(root));
                self.nodes.get_mut(right).set_parent(Some(root));
                self.root = Some(root);
                log::trace!("split root {handle:?}: new root {root:?} holds {middle}");
                root
            }
        }
    }

    /// Points every child of `handle` back at it.
    fn adopt_children(&mut self, handle: Handle) {
        let mut children = [None; MAX_CHILDREN];
        let populated = self.nodes.get(handle).children();
        children[..populated.len()].copy_from_slice(populated);
        for child in children.into_iter().flatten() {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
    }

    /// Deletes one occurrence of `value`.
    pub(crate) fn delete(&mut self, value: i64) -> Removal {
        let Some(root) = self.root else {
            return Removal::EmptyTree;
        };

        let mut current = root;
        let mut value = value;
        loop {
            let node = self.nodes.get(current);
            match node.search(value) {
                SearchResult::Found(position) if node.is_leaf() => {
                    let node = self.nodes.get_mut(current);
                    node.remove_key(position);
                    self.len -= 1;
                    if node.key_count() == 0 {
                        self.fix_underflow(current);
                    }
                    return Removal::Removed;
                }
                SearchResult::Found(position) => {
                    // Replace with the in-order predecessor, then delete that from its leaf.
                    let leaf = self.rightmost_leaf(self.child(current, position));
                    let predecessor = self.nodes.get(leaf).last_key().expect("leaf has no keys");
                    self.nodes.get_mut(current).set_key(position, predecessor);
                    current = leaf;
                    value = predecessor;
                }
                SearchResult::GoDown(index) => match node.child(index) {
                    Some(child) => current = child,
                    None => return Removal::NotFound,
                },
            }
        }
    }

    fn rightmost_leaf(&self, mut handle: Handle) -> Handle {
        while let Some(child) = self.nodes.get(handle).last_child() {
            handle = child;
        }
        handle
    }

    /// Restores a node left without keys, propagating toward the root after a merge.
    fn fix_underflow(&mut self, handle: Handle) {
        let mut current = handle;
        loop {
            let Some(parent) = self.nodes.get(current).parent() else {
                self.collapse_root(current);
                return;
            };

            let index = self
                .nodes
                .get(parent)
                .index_of_child(current)
                .expect("underflowed node is not a child of its parent");
            let parent_node = self.nodes.get(parent);
            let left = index.checked_sub(1).and_then(|i| parent_node.child(i));
            let right = parent_node.child(index + 1);

            if let Some(left) = left
                && self.nodes.get(left).can_lend()
            {
                self.borrow_from_left(current, left, parent, index);
                return;
            }
            if let Some(right) = right
                && self.nodes.get(right).can_lend()
            {
                self.borrow_from_right(current, right, parent, index);
                return;
            }

            if left.is_some() {
                self.merge(parent, index - 1);
            } else {
                self.merge(parent, index);
            }

            if self.nodes.get(parent).key_count() > 0 {
                return;
            }
            current = parent;
        }
    }

    /// Releases an emptied root; its only child, if any, takes its place.
    fn collapse_root(&mut self, root: Handle) {
        let node = self.nodes.get(root);
        if node.key_count() > 0 {
            return;
        }
        let child = node.child(0);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(None);
        }
        self.nodes.free(root);
        self.root = child;
        log::trace!("collapsed root {root:?}, new root {child:?}");
    }

    /// Rotates the parent's separator down into `handle` and the left sibling's last key up.
    fn borrow_from_left(&mut self, handle: Handle, left: Handle, parent: Handle, index: usize) {
        let separator = self.nodes.get(parent).key(index - 1);
        let (key, child) = self.nodes.get_mut(left).pop_back();
        self.nodes.get_mut(parent).set_key(index - 1, key);
        self.nodes.get_mut(handle).push_front(separator, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
        log::trace!("{handle:?} borrowed {separator} through {parent:?} from left sibling {left:?}");
    }

    /// Rotates the parent's separator down into `handle` and the right sibling's first key up.
    fn borrow_from_right(&mut self, handle: Handle, right: Handle, parent: Handle, index: usize) {
        let separator = self.nodes.get(parent).key(index);
        let (key, child) = self.nodes.get_mut(right).pop_front();
        self.nodes.get_mut(parent).set_key(index, key);
        self.nodes.get_mut(handle).push_back(separator, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
        log::trace!("{handle:?} borrowed {separator} through {parent:?} from right sibling {right:?}");
    }

    /// Merges the child right of separator `index` into the child left of it, pulling the
    /// separator down between them. The right child is released.
    fn merge(&mut self, parent: Handle, index: usize) {
        let left = self.child(parent, index);
        let (separator, right) = self.nodes.get_mut(parent).remove_separator(index);
        let right = right.expect("separator has no right child");
        let right_node = self.nodes.take(right);
        self.nodes.get_mut(left).absorb(separator, right_node);
        self.adopt_children(left);
        log::trace!("merged {right:?} into {left:?} around {separator} from {parent:?}");
    }
}

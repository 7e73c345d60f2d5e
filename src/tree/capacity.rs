use super::Tree234;
use crate::Error;
use crate::raw::RawTree;

impl Tree234 {
    /// Creates an empty tree with room for at least `nodes` nodes before its node storage
    /// has to grow.
    ///
    /// A tree of `n` keys uses between `n / 3` and `n` nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics or aborts if the allocator cannot provide the storage. Use
    /// [`Tree234::try_with_capacity`] to handle that case.
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Tree234 {
            raw: RawTree::with_capacity(nodes),
        }
    }

    /// Creates an empty tree with room for at least `nodes` nodes, reporting a failed
    /// allocation instead of aborting.
    ///
    /// Requests beyond the number of nodes a tree can address are clamped to that number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the storage cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use tree234::Tree234;
    ///
    /// let tree = Tree234::try_with_capacity(32)?;
    /// assert!(tree.capacity() >= 32);
    /// # Ok::<(), tree234::Error>(())
    /// ```
    pub fn try_with_capacity(nodes: usize) -> Result<Self, Error> {
        Ok(Tree234 {
            raw: RawTree::try_with_capacity(nodes)?,
        })
    }

    /// Returns the number of nodes the tree can hold without growing its node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

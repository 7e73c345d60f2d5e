use alloc::vec::Vec;

use super::handle::Handle;
use crate::Error;

/// Slot storage for tree nodes. Released slots go on a free list and are handed out again
/// before the slot vector grows.
#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    /// Every slot index up to and including [`Handle::MAX`] is addressable.
    const MAX_SLOTS: usize = Handle::MAX + 1;

    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// # Panics
    ///
    /// Panics or aborts if the allocator cannot provide `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(Self::MAX_SLOTS)),
            free: Vec::new(),
        }
    }

    /// Like [`Arena::with_capacity`], but reports a failed allocation.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut arena = Self::new();
        arena.try_reserve(capacity.min(Self::MAX_SLOTS))?;
        Ok(arena)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live elements.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    /// Makes sure the next `additional` calls to [`Arena::alloc`] cannot fail.
    ///
    /// Free slots are counted first; only the remainder has to come from the allocator or the
    /// handle space.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let needed = additional.saturating_sub(self.free.len());
        if needed == 0 {
            return Ok(());
        }
        if self.slots.len() + needed > Self::MAX_SLOTS {
            log::warn!("node arena exhausted its handle space ({} slots)", self.slots.len());
            return Err(Error::AllocationFailure);
        }
        self.slots.try_reserve(needed).map_err(|err| {
            log::warn!("node arena reservation of {needed} slots failed: {err}");
            Error::AllocationFailure
        })
    }

    /// Reserves room for one element and stores it.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle, Error> {
        self.try_reserve(1)?;
        Ok(self.alloc(element))
    }

    /// Stores an element in space previously secured with [`Arena::try_reserve`].
    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.index()] = Some(element);
            return handle;
        }
        debug_assert!(self.slots.len() < self.slots.capacity(), "`Arena::alloc()` - slot was not reserved!");
        let handle = Handle::new(self.slots.len()).expect("`Arena::alloc()` - handle space was not reserved!");
        self.slots.push(Some(element));
        handle
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes an element and recycles its slot.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.index()].take().expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

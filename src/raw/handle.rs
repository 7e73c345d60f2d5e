use core::num::NonZero;

// A narrow handle under test makes node-space exhaustion cheap to reach.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the arena, stored off by one so `Option<Handle>` costs nothing extra.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Returns the handle for slot `index`, or `None` if the index is beyond [`Handle::MAX`].
    #[inline]
    pub(crate) fn new(index: usize) -> Option<Self> {
        if index > Self::MAX {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        NonZero::new((index + 1) as RawHandle).map(Self)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

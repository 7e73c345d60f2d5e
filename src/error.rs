use thiserror::Error;

/// Failures reported by [`Tree234`](crate::Tree234) operations.
///
/// A missing value or an empty tree is not an error; see [`Removal`](crate::Removal) and
/// [`Tree234::search`](crate::Tree234::search).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Storage for a new node could not be reserved. The tree is left unchanged by the
    /// failing step and remains fully usable.
    #[error("failed to allocate a tree node")]
    AllocationFailure,
}

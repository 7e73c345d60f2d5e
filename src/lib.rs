//! A 2-3-4 tree over integer keys.
//!
//! This crate provides [`Tree234`], a B-tree of order 4: every node holds one to three keys
//! and, if it is internal, one more child than it has keys. Nodes live in an arena and refer
//! to each other (children and parent) through compact handles.
//!
//! # Example
//!
//! ```
//! use tree234::{Removal, Tree234};
//!
//! let mut tree = Tree234::new();
//! for value in [10, 20, 5, 6] {
//!     tree.insert(value).unwrap();
//! }
//!
//! // Inserting 6 split the full root {5, 10, 20}.
//! let location = tree.search(6).unwrap();
//! assert_eq!((location.level, location.position), (1, 1));
//!
//! assert_eq!(tree.delete(5), Removal::Removed);
//! assert_eq!(tree.delete(5), Removal::NotFound);
//! assert_eq!(tree.count_keys(), 3);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Top-down insertion** - Full nodes are split on the way down, so an insert never backtracks
//! - **Full delete rebalancing** - Borrow from a sibling when possible, otherwise merge and
//!   propagate the underflow toward the root
//! - **Fallible allocation** - Node storage is reserved before a split mutates anything, and
//!   failure is reported as [`Error::AllocationFailure`]
//!
//! # Implementation
//!
//! Each node stores its keys and child handles in fixed-size arrays with an explicit key count,
//! plus a non-owning handle to its parent. Duplicate keys are accepted and stored as distinct
//! entries; deleting a duplicated value removes the first occurrence met on the way down.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod tree;

pub use error::Error;
pub use tree::{Location, Removal, Tree234};

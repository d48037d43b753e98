// Copyright 2025 Irreducible Inc.

//! Value-semantic, type-erased forward iterators.
//!
//! [`ErasedForwardIterator`] wraps any [`ForwardCursor`] with a given element type behind a single
//! concrete type, so that cursors over different containers can be stored in the same field or
//! returned from a function without naming the container. Small cursors are stored inline, larger
//! ones fall back to a heap allocation; the choice is invisible to callers.

mod adapter;
pub mod cursor;
pub mod env;
mod error;
mod forward_iter;
mod storage;
pub mod tracing;
mod type_key;
mod walk;

pub use cursor::{ForwardCursor, IterCursor, SliceCursor};
pub use error::Error;
pub use forward_iter::ErasedForwardIterator;
pub use storage::{StorageKind, INLINE_ALIGN, INLINE_CAPACITY};
pub use walk::Until;

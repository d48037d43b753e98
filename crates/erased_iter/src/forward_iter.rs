// Copyright 2025 Irreducible Inc.

use std::{fmt, ops::Deref};

use static_assertions::{assert_impl_all, assert_not_impl_any};

use crate::{
	adapter::Adapter,
	cursor::ForwardCursor,
	storage::{Storage, StorageKind},
	Error,
};

/// A forward iterator over `T` that hides the type of the cursor it wraps.
///
/// An instance is either *null* (see [`ErasedForwardIterator::null`]) or *bound* to a cursor.
/// Bound instances step, compare and dereference exactly like the wrapped cursor, and stay valid
/// for as long as the wrapped cursor does. Cloning produces an independent cursor at the same
/// position.
///
/// Cursors no larger than [`INLINE_CAPACITY`] bytes are stored inside the iterator, larger ones are
/// moved to the heap.
///
/// # Panics
///
/// Stepping, dereferencing or comparing a null instance panics. Comparing instances that wrap
/// different cursor types panics. Stepping or dereferencing an end position panics if the wrapped
/// cursor does, which is the case for every cursor in this crate.
///
/// [`INLINE_CAPACITY`]: crate::INLINE_CAPACITY
pub struct ErasedForwardIterator<'a, T: ?Sized + 'a> {
	storage: Storage<'a, T>,
}

assert_impl_all!(ErasedForwardIterator<'static, u32>: Clone, Default, fmt::Debug);
assert_not_impl_any!(ErasedForwardIterator<'static, u32>: Send, Sync);

impl<'a, T: ?Sized + 'a> ErasedForwardIterator<'a, T> {
	/// Creates a null instance that is only good for being dropped or assigned over.
	pub const fn null() -> Self {
		Self {
			storage: Storage::Empty,
		}
	}

	/// Wraps `cursor`.
	///
	/// Aborts through [`std::alloc::handle_alloc_error`] if the cursor needs a heap allocation that
	/// cannot be satisfied; use [`ErasedForwardIterator::try_new`] to handle that case.
	pub fn new<C>(cursor: C) -> Self
	where
		C: ForwardCursor<'a, Item = T>,
	{
		Self {
			storage: Storage::new(cursor),
		}
	}

	/// Wraps `cursor`, reporting a failed heap allocation as [`Error::AllocationFailed`].
	pub fn try_new<C>(cursor: C) -> Result<Self, Error>
	where
		C: ForwardCursor<'a, Item = T>,
	{
		Ok(Self {
			storage: Storage::try_new(cursor)?,
		})
	}

	pub fn is_null(&self) -> bool {
		self.storage.kind().is_none()
	}

	/// Where the wrapped cursor lives, or `None` for a null instance.
	pub fn storage_kind(&self) -> Option<StorageKind> {
		self.storage.kind()
	}

	/// Moves to the next element.
	#[inline]
	#[track_caller]
	pub fn step_forward(&mut self) {
		match self.storage.adapter_mut() {
			Some(adapter) => adapter.advance(),
			None => null_access(),
		}
	}

	/// Returns the current element, borrowed from the underlying sequence rather than from `self`.
	#[inline]
	#[track_caller]
	pub fn get(&self) -> &'a T {
		self.adapter().current()
	}

	#[inline]
	#[track_caller]
	fn adapter(&self) -> &(dyn Adapter<'a, T> + 'a) {
		match self.storage.adapter() {
			Some(adapter) => adapter,
			None => null_access(),
		}
	}
}

#[cold]
#[track_caller]
fn null_access() -> ! {
	panic!("null ErasedForwardIterator cannot be stepped, dereferenced or compared")
}

impl<'a, T: ?Sized + 'a> Default for ErasedForwardIterator<'a, T> {
	fn default() -> Self {
		Self::null()
	}
}

impl<'a, T: ?Sized + 'a> Clone for ErasedForwardIterator<'a, T> {
	fn clone(&self) -> Self {
		Self {
			storage: self.storage.clone(),
		}
	}

	fn clone_from(&mut self, source: &Self) {
		// Release the current cursor before the copy is made.
		self.storage = Storage::Empty;
		self.storage = source.storage.clone();
	}
}

impl<'a, T: ?Sized + 'a> PartialEq for ErasedForwardIterator<'a, T> {
	#[track_caller]
	fn eq(&self, other: &Self) -> bool {
		self.adapter().equals(other.adapter())
	}
}

impl<'a, T: ?Sized + 'a> Deref for ErasedForwardIterator<'a, T> {
	type Target = T;

	#[inline]
	#[track_caller]
	fn deref(&self) -> &T {
		self.get()
	}
}

impl<'a, T: ?Sized + 'a> fmt::Debug for ErasedForwardIterator<'a, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.storage.adapter() {
			Some(adapter) => f
				.debug_struct("ErasedForwardIterator")
				.field("cursor", &adapter.cursor_type_name())
				.field("storage", &self.storage_kind())
				.finish(),
			None => f.write_str("ErasedForwardIterator(null)"),
		}
	}
}

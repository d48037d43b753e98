// Copyright 2025 Irreducible Inc.

use std::any::{type_name, Any, TypeId};

use crate::{cursor::ForwardCursor, storage::Storage, type_key::erased_type_id};

/// Object-safe dispatch interface over a [`ForwardCursor`] with element type `T`.
pub(crate) trait Adapter<'a, T: ?Sized + 'a> {
	fn advance(&mut self);

	fn current(&self) -> &'a T;

	/// Compares against `other`, which must wrap the same concrete cursor type.
	///
	/// # Panics
	///
	/// Panics when the concrete cursor types differ.
	fn equals(&self, other: &(dyn Adapter<'a, T> + 'a)) -> bool;

	/// Whether the cursor's key equals `key`, which must be of the cursor's key type.
	fn has_key(&self, key: &dyn Any) -> bool;

	/// Clones the cursor into fresh storage, placed the same way a new cursor of the type would be.
	fn clone_storage(&self) -> Storage<'a, T>;

	fn cursor_type_id(&self) -> TypeId;

	fn cursor_type_name(&self) -> &'static str;
}

impl<'a, C> Adapter<'a, C::Item> for C
where
	C: ForwardCursor<'a>,
{
	#[inline]
	fn advance(&mut self) {
		ForwardCursor::step_forward(self)
	}

	#[inline]
	fn current(&self) -> &'a C::Item {
		ForwardCursor::get(self)
	}

	fn equals(&self, other: &(dyn Adapter<'a, C::Item> + 'a)) -> bool {
		assert!(
			self.cursor_type_id() == other.cursor_type_id(),
			"cannot compare erased iterators over different cursor types: {} and {}",
			self.cursor_type_name(),
			other.cursor_type_name(),
		);

		other.has_key(&ForwardCursor::key(self))
	}

	fn has_key(&self, key: &dyn Any) -> bool {
		match key.downcast_ref::<C::Key>() {
			Some(key) => ForwardCursor::key(self) == *key,
			None => panic!(
				"cannot compare erased iterators over different cursor types: {}",
				self.cursor_type_name(),
			),
		}
	}

	fn clone_storage(&self) -> Storage<'a, C::Item> {
		Storage::new(self.clone())
	}

	fn cursor_type_id(&self) -> TypeId {
		erased_type_id::<C>()
	}

	fn cursor_type_name(&self) -> &'static str {
		type_name::<C>()
	}
}

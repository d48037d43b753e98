// Copyright 2025 Irreducible Inc.

use std::{any::TypeId, marker::PhantomData, mem};

/// Returns the [`TypeId`] of `T` with all lifetimes erased.
///
/// [`TypeId::of`] requires `T: 'static`, which a cursor borrowing its container never is. Types
/// that differ only in their lifetimes share one identity.
pub(crate) fn erased_type_id<T: ?Sized>() -> TypeId {
	trait NonStaticAny {
		fn get_type_id(&self) -> TypeId
		where
			Self: 'static;
	}

	impl<T: ?Sized> NonStaticAny for PhantomData<T> {
		fn get_type_id(&self) -> TypeId
		where
			Self: 'static,
		{
			TypeId::of::<T>()
		}
	}

	let phantom = PhantomData::<T>;
	let erased: &dyn NonStaticAny = &phantom;
	unsafe {
		// SAFETY:
		//
		// `PhantomData<T>` is a zero-sized value, so extending the lifetime of the reference can
		// not produce a dangling read. The only method reachable through the extended reference
		// computes a `TypeId`, which does not depend on lifetimes and never touches `T` values.
		mem::transmute::<&dyn NonStaticAny, &(dyn NonStaticAny + 'static)>(erased).get_type_id()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_lifetimes_are_erased() {
		fn id_of_borrow<'a>(_: &'a u32) -> TypeId {
			erased_type_id::<&'a u32>()
		}

		let value = 7u32;
		assert_eq!(id_of_borrow(&value), erased_type_id::<&'static u32>());
		assert_eq!(erased_type_id::<u32>(), TypeId::of::<u32>());
	}

	#[test]
	fn test_distinct_types() {
		assert_ne!(erased_type_id::<u32>(), erased_type_id::<u64>());
		assert_ne!(erased_type_id::<&[u8]>(), erased_type_id::<&str>());
		assert_ne!(
			erased_type_id::<std::slice::Iter<u8>>(),
			erased_type_id::<std::vec::IntoIter<u8>>()
		);
	}
}

// Copyright 2025 Irreducible Inc.

use std::{
	alloc::{self, Layout},
	any::type_name,
	cell::UnsafeCell,
	mem::{align_of, size_of, MaybeUninit},
	ptr,
};

use static_assertions::{const_assert, const_assert_eq};

use crate::{adapter::Adapter, cursor::SliceCursor, Error};

/// Size in bytes of the buffer that holds small cursors without a heap allocation.
pub const INLINE_CAPACITY: usize = 32;

/// Maximum alignment of a cursor stored inline.
pub const INLINE_ALIGN: usize = 8;

/// Where the cursor of a bound [`ErasedForwardIterator`] lives.
///
/// [`ErasedForwardIterator`]: crate::ErasedForwardIterator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
	Inline,
	Heap,
}

impl StorageKind {
	/// Storage kind chosen for a cursor of type `A`. Fixed per type.
	pub const fn of<A>() -> Self {
		if fits_inline::<A>() {
			Self::Inline
		} else {
			Self::Heap
		}
	}
}

pub(crate) const fn fits_inline<A>() -> bool {
	size_of::<A>() <= INLINE_CAPACITY && align_of::<A>() <= INLINE_ALIGN
}

/// Inline cursor bytes. Cursors may mutate themselves through shared references (`Cell` fields),
/// so the bytes sit behind an `UnsafeCell`.
#[repr(C, align(8))]
pub(crate) struct InlineBuf(UnsafeCell<[MaybeUninit<u8>; INLINE_CAPACITY]>);

impl InlineBuf {
	fn uninit() -> Self {
		Self(UnsafeCell::new([MaybeUninit::uninit(); INLINE_CAPACITY]))
	}

	#[inline]
	fn as_ptr(&self) -> *mut u8 {
		self.0.get().cast()
	}
}

const_assert_eq!(align_of::<InlineBuf>(), INLINE_ALIGN);
const_assert_eq!(size_of::<InlineBuf>(), INLINE_CAPACITY);
// Pointer-sized cursors plus bookkeeping must never pay for an allocation.
const_assert!(fits_inline::<SliceCursor<'static, u128>>());

/// Recovers a trait object pointer to the `A` living at the start of an inline buffer.
type CastFn<'a, T> = fn(*mut u8) -> *mut (dyn Adapter<'a, T> + 'a);

fn cast_inline<'a, A, T>(bytes: *mut u8) -> *mut (dyn Adapter<'a, T> + 'a)
where
	A: Adapter<'a, T> + 'a,
	T: ?Sized + 'a,
{
	bytes as *mut A
}

/// Owning storage of at most one adapter.
///
/// The variant is the storage kind; it is decided when the adapter is installed and never changes
/// for that adapter.
pub(crate) enum Storage<'a, T: ?Sized + 'a> {
	Empty,
	Inline {
		buf: InlineBuf,
		/// Monomorphized for the concrete adapter type written into `buf`.
		cast: CastFn<'a, T>,
	},
	Heap(Box<dyn Adapter<'a, T> + 'a>),
}

impl<'a, T: ?Sized + 'a> Storage<'a, T> {
	/// Installs `adapter` inline when it fits, otherwise on the heap.
	pub fn new<A>(adapter: A) -> Self
	where
		A: Adapter<'a, T> + 'a,
	{
		if fits_inline::<A>() {
			Self::new_inline(adapter)
		} else {
			trace_heap_fallback::<A>();
			Self::Heap(Box::new(adapter))
		}
	}

	/// Same as [`Storage::new`], but reports a failed heap allocation instead of aborting.
	pub fn try_new<A>(adapter: A) -> Result<Self, Error>
	where
		A: Adapter<'a, T> + 'a,
	{
		if fits_inline::<A>() {
			Ok(Self::new_inline(adapter))
		} else {
			trace_heap_fallback::<A>();
			Ok(Self::Heap(try_box(adapter)?))
		}
	}

	fn new_inline<A>(adapter: A) -> Self
	where
		A: Adapter<'a, T> + 'a,
	{
		debug_assert!(fits_inline::<A>());

		let buf = InlineBuf::uninit();
		unsafe {
			// SAFETY: `fits_inline::<A>()` holds, so the buffer is large enough and sufficiently
			// aligned for an `A`. The buffer is uninitialized, so nothing is overwritten.
			ptr::write(buf.as_ptr() as *mut A, adapter);
		}

		Self::Inline {
			buf,
			cast: cast_inline::<A, T>,
		}
	}

	pub fn kind(&self) -> Option<StorageKind> {
		match self {
			Self::Empty => None,
			Self::Inline { .. } => Some(StorageKind::Inline),
			Self::Heap(_) => Some(StorageKind::Heap),
		}
	}

	#[inline]
	pub fn adapter(&self) -> Option<&(dyn Adapter<'a, T> + 'a)> {
		match self {
			Self::Empty => None,
			// SAFETY: `buf` holds the initialized adapter that `cast` was instantiated for. The
			// pointer comes from the `UnsafeCell`, so interior mutability in the adapter is allowed.
			Self::Inline { buf, cast } => Some(unsafe { &*(*cast)(buf.as_ptr()) }),
			Self::Heap(adapter) => Some(adapter.as_ref()),
		}
	}

	#[inline]
	pub fn adapter_mut(&mut self) -> Option<&mut (dyn Adapter<'a, T> + 'a)> {
		match self {
			Self::Empty => None,
			// SAFETY: `buf` holds the initialized adapter that `cast` was instantiated for, and we
			// have exclusive access to it.
			Self::Inline { buf, cast } => Some(unsafe { &mut *(*cast)(buf.as_ptr()) }),
			Self::Heap(adapter) => Some(adapter.as_mut()),
		}
	}
}

impl<'a, T: ?Sized + 'a> Clone for Storage<'a, T> {
	fn clone(&self) -> Self {
		match self.adapter() {
			Some(adapter) => adapter.clone_storage(),
			None => Self::Empty,
		}
	}
}

impl<'a, T: ?Sized + 'a> Drop for Storage<'a, T> {
	fn drop(&mut self) {
		// Heap adapters are released by their box.
		if let Self::Inline { buf, cast } = self {
			unsafe {
				// SAFETY: the adapter in `buf` is initialized and is never used after this point.
				ptr::drop_in_place((*cast)(buf.as_ptr()));
			}
		}
	}
}

fn trace_heap_fallback<A>() {
	tracing::trace!(
		cursor = type_name::<A>(),
		size = size_of::<A>(),
		align = align_of::<A>(),
		"cursor does not fit inline, storing it on the heap"
	);
}

fn try_box<A>(value: A) -> Result<Box<A>, Error> {
	let layout = Layout::new::<A>();
	if layout.size() == 0 {
		return Ok(Box::new(value));
	}

	// SAFETY: `layout` has a non-zero size.
	let ptr = unsafe { alloc::alloc(layout) } as *mut A;
	if ptr.is_null() {
		tracing::debug!(
			cursor = type_name::<A>(),
			size = layout.size(),
			align = layout.align(),
			"heap allocation for cursor failed"
		);
		return Err(Error::AllocationFailed {
			size: layout.size(),
			align: layout.align(),
		});
	}

	unsafe {
		// SAFETY: `ptr` was allocated by the global allocator with the layout of `A`, which is
		// what `Box<A>` expects, and it is initialized before the box takes ownership.
		ptr.write(value);
		Ok(Box::from_raw(ptr))
	}
}

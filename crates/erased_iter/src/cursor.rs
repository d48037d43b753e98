// Copyright 2025 Irreducible Inc.

//! Concrete forward cursors.

use std::fmt;

/// A position in a sequence that can move forward one element at a time.
///
/// This is the protocol every iterator wrapped by [`ErasedForwardIterator`] follows. A cursor at
/// the end of its sequence is a sentinel: it can be compared but not stepped or dereferenced.
///
/// Two cursors are equal when their [keys](ForwardCursor::key) are. Keys are owned `'static`
/// values, so comparing erased cursors never moves borrowed data from one cursor into another.
/// Equality is only meaningful between cursors into the same sequence.
///
/// A key cannot borrow from the cursor's sequence:
///
/// ```compile_fail
/// use erased_iter::{ForwardCursor, SliceCursor};
///
/// #[derive(Clone)]
/// struct Labelled<'a, 'b> {
///     inner: SliceCursor<'a, u8>,
///     label: &'b str,
/// }
///
/// impl<'a, 'b: 'a> ForwardCursor<'a> for Labelled<'a, 'b> {
///     type Item = u8;
///     type Key = &'b str;
///
///     fn step_forward(&mut self) {
///         self.inner.step_forward()
///     }
///
///     fn get(&self) -> &'a u8 {
///         self.inner.get()
///     }
///
///     fn key(&self) -> &'b str {
///         self.label
///     }
/// }
/// ```
///
/// [`ErasedForwardIterator`]: crate::ErasedForwardIterator
pub trait ForwardCursor<'a>: Clone + 'a {
	type Item: ?Sized + 'a;

	/// Identifies the position of the cursor within its sequence.
	type Key: Eq + 'static;

	/// Advances the cursor by one element.
	///
	/// # Panics
	///
	/// Implementations panic when the cursor is at the end of its sequence.
	fn step_forward(&mut self);

	/// Returns the element at the cursor.
	///
	/// # Panics
	///
	/// Implementations panic when the cursor is at the end of its sequence.
	fn get(&self) -> &'a Self::Item;

	fn key(&self) -> Self::Key;
}

/// A cursor into a borrowed slice.
pub struct SliceCursor<'a, T> {
	slice: &'a [T],
	pos: usize,
}

impl<'a, T> SliceCursor<'a, T> {
	/// Cursor at the first element of `slice`.
	pub const fn begin(slice: &'a [T]) -> Self {
		Self { slice, pos: 0 }
	}

	/// Cursor one past the last element of `slice`.
	pub const fn end(slice: &'a [T]) -> Self {
		Self {
			slice,
			pos: slice.len(),
		}
	}

	/// Cursor at index `pos` of `slice`, where `pos == slice.len()` is the end.
	pub fn at(slice: &'a [T], pos: usize) -> Self {
		assert!(pos <= slice.len(), "cursor position {pos} is out of range 0..={}", slice.len());

		Self { slice, pos }
	}

	pub const fn position(&self) -> usize {
		self.pos
	}

	pub const fn is_end(&self) -> bool {
		self.pos == self.slice.len()
	}
}

impl<T> Clone for SliceCursor<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
	fn eq(&self, other: &Self) -> bool {
		ForwardCursor::key(self) == ForwardCursor::key(other)
	}
}

impl<T> Eq for SliceCursor<'_, T> {}

impl<T> fmt::Debug for SliceCursor<'_, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SliceCursor")
			.field("pos", &self.pos)
			.field("len", &self.slice.len())
			.finish()
	}
}

impl<'a, T> ForwardCursor<'a> for SliceCursor<'a, T> {
	type Item = T;
	/// Address and length of the slice, then the index into it.
	type Key = (*const (), usize, usize);

	#[inline]
	fn step_forward(&mut self) {
		assert!(!self.is_end(), "cannot step a slice cursor past the end");
		self.pos += 1;
	}

	#[inline]
	fn get(&self) -> &'a T {
		assert!(!self.is_end(), "cannot dereference a slice cursor at the end");
		let slice = self.slice;
		&slice[self.pos]
	}

	#[inline]
	fn key(&self) -> Self::Key {
		(self.slice.as_ptr() as *const (), self.slice.len(), self.pos)
	}
}

/// Turns a cloneable iterator over references into a [`ForwardCursor`].
///
/// The cursor keeps the element it points at together with its distance from the start. Two
/// cursors compare equal when both are exhausted or both are at the same distance, so they must
/// originate from the same iterator to be compared meaningfully.
pub struct IterCursor<'a, I, T: ?Sized> {
	iter: I,
	current: Option<&'a T>,
	index: usize,
}

impl<'a, I, T> IterCursor<'a, I, T>
where
	I: Iterator<Item = &'a T>,
	T: ?Sized + 'a,
{
	/// Cursor at the first element yielded by `iter`.
	pub fn begin(mut iter: I) -> Self {
		let current = iter.next();
		Self {
			iter,
			current,
			index: 0,
		}
	}

	/// Exhausted cursor. `iter` only fixes the cursor type and is never advanced.
	pub fn end(iter: I) -> Self {
		Self {
			iter,
			current: None,
			index: 0,
		}
	}

	/// Number of steps taken since [`IterCursor::begin`].
	pub const fn index(&self) -> usize {
		self.index
	}

	pub const fn is_end(&self) -> bool {
		self.current.is_none()
	}
}

impl<I: Clone, T: ?Sized> Clone for IterCursor<'_, I, T> {
	fn clone(&self) -> Self {
		Self {
			iter: self.iter.clone(),
			current: self.current,
			index: self.index,
		}
	}
}

impl<I, T: ?Sized> IterCursor<'_, I, T> {
	/// Distance from the start, or `None` once exhausted.
	fn index_key(&self) -> Option<usize> {
		self.current.map(|_| self.index)
	}
}

impl<I, T: ?Sized> PartialEq for IterCursor<'_, I, T> {
	fn eq(&self, other: &Self) -> bool {
		self.index_key() == other.index_key()
	}
}

impl<I, T: ?Sized> fmt::Debug for IterCursor<'_, I, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IterCursor")
			.field("index", &self.index)
			.field("exhausted", &self.current.is_none())
			.finish()
	}
}

impl<'a, I, T> ForwardCursor<'a> for IterCursor<'a, I, T>
where
	I: Iterator<Item = &'a T> + Clone + 'a,
	T: ?Sized + 'a,
{
	type Item = T;
	type Key = Option<usize>;

	#[inline]
	fn step_forward(&mut self) {
		assert!(!self.is_end(), "cannot step an iterator cursor past the end");
		self.current = self.iter.next();
		self.index += 1;
	}

	#[inline]
	fn get(&self) -> &'a T {
		match self.current {
			Some(item) => item,
			None => panic!("cannot dereference an iterator cursor at the end"),
		}
	}

	#[inline]
	fn key(&self) -> Option<usize> {
		self.index_key()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;

	#[test]
	fn test_slice_cursor_walk() {
		let values = [10, 20, 30];
		let mut cursor = SliceCursor::begin(&values);
		let end = SliceCursor::end(&values);

		let mut seen = Vec::new();
		while cursor != end {
			seen.push(*cursor.get());
			cursor.step_forward();
		}
		assert_eq!(seen, values);
		assert_eq!(cursor.position(), 3);
	}

	#[test]
	fn test_slice_cursor_identity() {
		let a = [1, 2, 3];
		let b = [1, 2, 3];

		assert_eq!(SliceCursor::at(&a, 1), SliceCursor::at(&a, 1));
		assert_ne!(SliceCursor::at(&a, 1), SliceCursor::at(&a, 2));
		// Equal contents do not make cursors into different slices equal
		assert_ne!(SliceCursor::begin(&a), SliceCursor::begin(&b));
		// Neither do different views of the same memory
		assert_ne!(SliceCursor::end(&a[..2]), SliceCursor::at(&a, 2));
	}

	#[test]
	fn test_empty_slice() {
		let values: [u8; 0] = [];
		assert_eq!(SliceCursor::begin(&values), SliceCursor::end(&values));
		assert!(SliceCursor::begin(&values).is_end());
	}

	#[test]
	#[should_panic(expected = "out of range")]
	fn test_slice_cursor_at_out_of_range() {
		let values = [1, 2, 3];
		_ = SliceCursor::at(&values, 4);
	}

	#[test]
	#[should_panic(expected = "past the end")]
	fn test_slice_cursor_step_past_end() {
		let values = [1];
		let mut cursor = SliceCursor::end(&values);
		cursor.step_forward();
	}

	#[test]
	#[should_panic(expected = "dereference")]
	fn test_slice_cursor_deref_end() {
		let values = [1];
		_ = SliceCursor::end(&values).get();
	}

	#[test]
	fn test_iter_cursor_walk() {
		let map = BTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
		let mut cursor = IterCursor::begin(map.values());
		let end = IterCursor::end(map.values());

		let mut seen = Vec::new();
		while cursor != end {
			seen.push(*cursor.get());
			cursor.step_forward();
		}
		assert_eq!(seen, ["a", "b", "c"]);
		assert_eq!(cursor.index(), 3);
	}

	#[test]
	fn test_iter_cursor_equality() {
		let values = [1, 2];
		let begin = IterCursor::begin(values.iter());
		let mut stepped = begin.clone();
		stepped.step_forward();

		assert_eq!(begin, IterCursor::begin(values.iter()));
		assert_ne!(begin, stepped);
		assert_ne!(stepped, IterCursor::end(values.iter()));
		stepped.step_forward();
		assert_eq!(stepped, IterCursor::end(values.iter()));
	}

	#[test]
	fn test_iter_cursor_unsized_items() {
		let words = ["alpha".to_string(), "beta".to_string()];
		let cursor = IterCursor::begin(words.iter().map(String::as_str));
		let item: &str = cursor.get();
		assert_eq!(item, "alpha");
	}

	#[test]
	#[should_panic(expected = "past the end")]
	fn test_iter_cursor_step_past_end() {
		let values: [u32; 0] = [];
		let mut cursor = IterCursor::begin(values.iter());
		cursor.step_forward();
	}
}

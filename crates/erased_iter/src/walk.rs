// Copyright 2025 Irreducible Inc.

use std::{fmt, iter::FusedIterator};

use crate::ErasedForwardIterator;

impl<'a, T: ?Sized + 'a> ErasedForwardIterator<'a, T> {
	/// Returns a standard iterator over the elements from `self` up to, but excluding, `end`.
	///
	/// Both `self` and `end` are cloned, so neither moves. `end` must be reachable from `self` by
	/// stepping forward.
	pub fn until(&self, end: &Self) -> Until<'a, T> {
		Until {
			cur: self.clone(),
			end: end.clone(),
		}
	}
}

/// Iterator returned by [`ErasedForwardIterator::until`].
pub struct Until<'a, T: ?Sized + 'a> {
	cur: ErasedForwardIterator<'a, T>,
	end: ErasedForwardIterator<'a, T>,
}

impl<'a, T: ?Sized + 'a> Until<'a, T> {
	/// Position of the next element to be yielded.
	pub fn position(&self) -> &ErasedForwardIterator<'a, T> {
		&self.cur
	}
}

impl<'a, T: ?Sized + 'a> Clone for Until<'a, T> {
	fn clone(&self) -> Self {
		Self {
			cur: self.cur.clone(),
			end: self.end.clone(),
		}
	}
}

impl<'a, T: ?Sized + 'a> Iterator for Until<'a, T> {
	type Item = &'a T;

	#[inline]
	fn next(&mut self) -> Option<&'a T> {
		if self.cur == self.end {
			return None;
		}

		let item = self.cur.get();
		self.cur.step_forward();
		Some(item)
	}
}

impl<'a, T: ?Sized + 'a> FusedIterator for Until<'a, T> {}

impl<'a, T: ?Sized + 'a> fmt::Debug for Until<'a, T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Until")
			.field("cur", &self.cur)
			.field("end", &self.end)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use super::*;
	use crate::{IterCursor, SliceCursor};

	#[test]
	fn test_until_sum() {
		let numbers = [1, 2, 3, 4, 5];
		let begin = ErasedForwardIterator::new(SliceCursor::begin(&numbers));
		let end = ErasedForwardIterator::new(SliceCursor::end(&numbers));

		assert_eq!(begin.until(&end).sum::<i32>(), 15);
		// The bounds themselves are untouched
		assert_eq!(*begin, 1);
		assert_eq!(begin.until(&end).fold(0, |acc, v| acc + v), 15);
	}

	#[test]
	fn test_until_empty_and_fused() {
		let numbers = [1, 2];
		let end = ErasedForwardIterator::new(SliceCursor::end(&numbers));

		let mut iter = end.until(&end);
		assert_eq!(iter.next(), None);
		assert_eq!(iter.next(), None);

		let begin = ErasedForwardIterator::new(SliceCursor::begin(&numbers));
		let mut iter = begin.until(&end);
		assert_eq!(iter.by_ref().count(), 2);
		assert!(*iter.position() == end);
		assert_eq!(iter.next(), None);
	}

	#[test]
	fn test_until_middle() {
		let numbers = [1, 2, 3, 4, 5];
		let begin = ErasedForwardIterator::new(SliceCursor::at(&numbers, 1));
		let end = ErasedForwardIterator::new(SliceCursor::at(&numbers, 4));

		assert_eq!(begin.until(&end).copied().collect::<Vec<_>>(), [2, 3, 4]);
	}

	#[test]
	fn test_until_unsized_items() {
		let set = BTreeSet::from(["pear".to_string(), "apple".to_string()]);
		let begin = ErasedForwardIterator::new(IterCursor::begin(set.iter().map(String::as_str)));
		let end = ErasedForwardIterator::new(IterCursor::end(set.iter().map(String::as_str)));

		assert_eq!(begin.until(&end).collect::<Vec<&str>>(), ["apple", "pear"]);
	}
}

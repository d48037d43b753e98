// Copyright 2025 Irreducible Inc.

/// Error returned when an erased iterator cannot be constructed.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
	/// Thrown when a cursor too large for inline storage cannot get a heap allocation.
	#[error("failed to allocate {size} bytes (alignment {align}) for a heap-stored cursor")]
	AllocationFailed { size: usize, align: usize },
}

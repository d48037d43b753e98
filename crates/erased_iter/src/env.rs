// Copyright 2024-2025 Irreducible Inc.

//! Environment knobs for the benchmarks, such as `ERASED_ITER_BENCH_LEN`. Nothing in the library
//! itself reads the environment.

/// Read a `usize` from the environment variable, falling back to `default` when it is unset or
/// cannot be parsed.
pub fn usize_env_or(var: &str, default: usize) -> usize {
	match std::env::var(var) {
		Ok(val) => val.trim().parse().unwrap_or(default),
		Err(_) => default,
	}
}

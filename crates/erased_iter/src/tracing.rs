// Copyright 2023-2025 Irreducible Inc.

/// Installs a global subscriber printing events filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set, so it is safe to call from every test or
/// benchmark entry point.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let _ = tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer())
		.with(EnvFilter::from_default_env())
		.try_init();
}

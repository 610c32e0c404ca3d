//! Tracing subscriber setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "warn";

/// Log to stderr, honouring `RUST_LOG`.
///
/// `verbose` raises the default to `info` for this crate. Calling this more
/// than once is harmless.
pub fn init(verbose: bool) {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new(format!("{},visual_gallery=info", DEFAULT_FILTER)),
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

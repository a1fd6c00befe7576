use tracing_subscriber::EnvFilter;

/// Install the process-wide `tracing` subscriber.
///
/// Mirrors the reference framework's `init_tracing()` convenience helper:
/// an `EnvFilter` driven by `RUST_LOG` (defaulting to `info`), writing
/// structured fields to stdout. Call once from `main`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

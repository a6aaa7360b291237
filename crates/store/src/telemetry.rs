use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for CLI entry points.
///
/// Honors RUST_LOG; defaults to `info` when unset. Library code only emits
/// through the `tracing` facade and never installs a subscriber itself.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

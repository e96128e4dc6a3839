use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
/// Filtering is controlled by `RUST_LOG`; defaults to `info`.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

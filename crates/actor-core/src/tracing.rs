/// Initializes structured logging for the whole process.
///
/// Filtering is environment-driven: `RUST_LOG=info` for operational logs,
/// `RUST_LOG=debug` to see every message an actor handles.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

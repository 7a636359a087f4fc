use tracing_subscriber::EnvFilter;

/// Installs a console `tracing` subscriber driven by `RUST_LOG`.
///
/// Meant to be called once by the host application at startup. Calling it a
/// second time is harmless: the already-installed subscriber is kept.
pub fn init_logging(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

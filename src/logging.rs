use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` takes precedence; otherwise this
/// crate logs at `debug` when `verbose` is set and `info` when not, and
/// dependencies only log warnings.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,playlist_harvest={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

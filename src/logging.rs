//! Diagnostic logging setup.
//!
//! The subscriber is installed before the config is known, so the filter sits
//! behind a reload layer and is narrowed once `logLevel` has been resolved.

use crate::config::LogLevel;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Handle used to swap the filter after config resolution.
pub type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Install the stderr subscriber with a default `info` filter (or `RUST_LOG`).
pub fn init() -> LogHandle {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter, handle) = reload::Layer::new(filter);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .try_init();
    if let Err(e) = installed {
        eprintln!("warning: diagnostics disabled: {}", e);
    }

    handle
}

/// Re-filter according to the configured level. `RUST_LOG` takes precedence.
pub fn apply(handle: &LogHandle, level: LogLevel, verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }

    let effective = effective_level(level, verbose);
    if let Err(e) = handle.reload(EnvFilter::new(effective.to_string())) {
        eprintln!("warning: could not change log level: {}", e);
    }
}

/// `--verbose` raises anything quieter than debug to debug.
pub fn effective_level(level: LogLevel, verbose: bool) -> LevelFilter {
    if verbose && level != LogLevel::Debug {
        return LevelFilter::DEBUG;
    }
    level.filter()
}

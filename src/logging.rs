use crate::error::{DashboardError, Result};
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity
/// count when it is set. Output goes to stderr so it stays out of the way
/// of anything the surfaces print.
pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let level = level_for(verbosity, quiet);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| DashboardError::Logging(e.to_string()))
}

fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

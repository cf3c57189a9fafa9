use std::io;

use anyhow::Result;
use once_cell::sync::OnceCell;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{config::AppConfig, infrastructure::directories::ResolvedPaths};

// Dropping the guard stops the file writer, so it lives for the whole process.
static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Installs stdout and `<logs_dir>/<log_file>.<date>` output. Safe to call
/// more than once; only the first call takes effect.
pub fn init_tracing(config: &AppConfig, paths: &ResolvedPaths, log_file: &str) -> Result<()> {
    if FILE_GUARD.get().is_some() {
        return Ok(());
    }

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(&paths.logs_dir, log_file));

    tracing_subscriber::registry()
        .with(level_filter(&config.logging.level))
        .with(fmt::layer().with_writer(io::stdout).with_target(true))
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()?;
    let _ = FILE_GUARD.set(guard);

    tracing::info!(logs = %paths.logs_dir.display(), file = log_file, "tracing initialized");
    Ok(())
}

/// `RUST_LOG` wins, then `LOG_LEVEL`, then plain `info`.
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

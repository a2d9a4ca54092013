use std::fs;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::ENV_LOG_DIR;

/// Initializes console logging, plus a daily-rolling JSON file when
/// `CLASH_GROUP_SYNC_LOG_DIR` is set.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
pub fn init_logging() -> Option<WorkerGuard> {
    // Respect RUST_LOG if set; otherwise info for our crate, warnings elsewhere
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clash_group_sync=info,warn"));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let log_dir = std::env::var(ENV_LOG_DIR).ok().filter(|d| !d.trim().is_empty());

    let mut dir_error = None;
    let mut guard = None;
    let file_layer = match log_dir {
        Some(dir) => match fs::create_dir_all(&dir) {
            Ok(()) => {
                let file_appender =
                    tracing_appender::rolling::daily(&dir, "clash_group_sync.log");
                let (non_blocking_writer, file_guard) =
                    tracing_appender::non_blocking(file_appender);
                guard = Some(file_guard);
                Some(fmt::layer().json().with_writer(non_blocking_writer))
            }
            Err(e) => {
                dir_error = Some((dir, e));
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some((dir, e)) = dir_error {
        warn!("File logging disabled, cannot create log directory '{}': {}", dir, e);
    }

    guard
}

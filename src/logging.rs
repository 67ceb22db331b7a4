//! File logging for the binary.
//!
//! The terminal belongs to the UI while a session runs, so events go to a
//! daily log file under the data directory. `LISTKIT_LOG` takes an
//! `EnvFilter` directive and defaults to `listkit=info`.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::app_dirs;

const LOG_ENV: &str = "LISTKIT_LOG";
const DEFAULT_DIRECTIVE: &str = "listkit=info";

/// Keeps the non-blocking writer flushing until dropped.
pub(crate) struct LoggingGuard {
	_guard: WorkerGuard,
}

fn log_dir() -> std::io::Result<PathBuf> {
	let dir = app_dirs::log_dir();
	std::fs::create_dir_all(&dir)?;
	Ok(dir)
}

/// Install the global subscriber. Returns `None` when logging could not be
/// set up; the program runs without it.
pub(crate) fn init() -> Option<LoggingGuard> {
	let log_dir = log_dir().ok()?;

	let file_appender = tracing_appender::rolling::daily(&log_dir, "listkit.log");
	let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

	let env_filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

	let subscriber = tracing_subscriber::registry().with(env_filter).with(
		tracing_subscriber::fmt::layer()
			.with_writer(non_blocking)
			.with_ansi(false)
			.with_target(true)
			.with_file(true)
			.with_line_number(true),
	);

	if subscriber.try_init().is_err() {
		return None;
	}

	let previous_hook = std::panic::take_hook();
	std::panic::set_hook(Box::new(move |panic_info| {
		tracing::error!(panic = %panic_info, "panic");
		previous_hook(panic_info);
	}));

	tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

	Some(LoggingGuard { _guard: guard })
}

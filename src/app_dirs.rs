//! Where listkit keeps its config file and logs.
//!
//! `LISTKIT_CONFIG_DIR` and `LISTKIT_DATA_DIR` pin either location; otherwise
//! the platform layout from `directories` applies.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const CONFIG_FILE: &str = "config.toml";
const LOG_SUBDIR: &str = "logs";

/// The two per-user locations listkit reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppDir {
	Config,
	Data,
}

impl AppDir {
	fn override_var(self) -> &'static str {
		match self {
			AppDir::Config => "LISTKIT_CONFIG_DIR",
			AppDir::Data => "LISTKIT_DATA_DIR",
		}
	}

	fn label(self) -> &'static str {
		match self {
			AppDir::Config => "config",
			AppDir::Data => "data",
		}
	}

	/// Resolved location, honouring the override variable.
	pub(crate) fn path(self) -> Result<PathBuf> {
		if let Some(dir) = non_empty(env::var_os(self.override_var())) {
			return Ok(dir);
		}
		let dirs = ProjectDirs::from("io", "albo", "listkit").ok_or_else(|| {
			anyhow!(
				"no home directory to place the listkit {} directory in (set {})",
				self.label(),
				self.override_var()
			)
		})?;
		Ok(match self {
			AppDir::Config => dirs.config_local_dir(),
			AppDir::Data => dirs.data_local_dir(),
		}
		.to_path_buf())
	}
}

/// Set-but-empty overrides count as unset.
fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
	value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// The per-user config file merged before project-local ones.
pub(crate) fn config_file() -> Result<PathBuf> {
	Ok(AppDir::Config.path()?.join(CONFIG_FILE))
}

/// Log directory under the data dir, or under the temp dir when no data dir
/// can be determined. Not created here.
pub(crate) fn log_dir() -> PathBuf {
	match AppDir::Data.path() {
		Ok(dir) => dir.join(LOG_SUBDIR),
		Err(_) => env::temp_dir().join("listkit").join(LOG_SUBDIR),
	}
}

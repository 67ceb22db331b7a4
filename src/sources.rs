//! Reading options from files or stdin.
//!
//! Input is either a JSON array (of labels or option objects) or plain text
//! with one label per line.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use listkit_core::SelectOption;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SourceError {
	#[error("failed to read options from {origin}")]
	Read {
		origin: String,
		#[source]
		source: io::Error,
	},

	#[error("{origin} is not a valid JSON option list")]
	Json {
		origin: String,
		#[source]
		source: serde_json::Error,
	},
}

/// Read options from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_options(path: &Path) -> Result<Vec<SelectOption>, SourceError> {
	let (origin, text) = if path == Path::new("-") {
		let mut text = String::new();
		io::stdin()
			.read_to_string(&mut text)
			.map_err(|source| SourceError::Read {
				origin: "stdin".to_string(),
				source,
			})?;
		("stdin".to_string(), text)
	} else {
		let origin = path.display().to_string();
		let text = fs::read_to_string(path).map_err(|source| SourceError::Read {
			origin: origin.clone(),
			source,
		})?;
		(origin, text)
	};
	parse_options(&text, &origin)
}

/// Parse option text. Options whose key repeats an earlier one are dropped.
pub(crate) fn parse_options(text: &str, origin: &str) -> Result<Vec<SelectOption>, SourceError> {
	let options: Vec<SelectOption> = if text.trim_start().starts_with('[') {
		serde_json::from_str(text).map_err(|source| SourceError::Json {
			origin: origin.to_string(),
			source,
		})?
	} else {
		text.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.map(SelectOption::labelled)
			.collect()
	};

	let mut seen = HashSet::new();
	let mut unique = Vec::with_capacity(options.len());
	for option in options {
		if seen.insert(option.key.clone()) {
			unique.push(option);
		} else {
			tracing::warn!(key = %option.key, origin, "dropping option with duplicate key");
		}
	}
	tracing::debug!(count = unique.len(), origin, "options loaded");
	Ok(unique)
}

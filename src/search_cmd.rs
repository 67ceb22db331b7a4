//! External search provider backed by a shell command.

use std::process::Command;

use listkit_core::{SearchError, SearchProvider, SelectOption};

use crate::sources::parse_options;

const QUERY_ENV: &str = "LISTKIT_QUERY";

/// Runs a shell command per query and turns its stdout into options.
///
/// The query is passed as the command's final argument and in
/// `LISTKIT_QUERY`. Output uses the same formats as `--input`.
#[derive(Debug, Clone)]
pub(crate) struct CommandSearch {
	command: String,
}

impl CommandSearch {
	pub(crate) fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
		}
	}

	#[cfg(unix)]
	fn shell(&self, query: &str) -> Command {
		let mut command = Command::new("sh");
		command
			.arg("-c")
			.arg(format!("{} \"$@\"", self.command))
			.arg("listkit")
			.arg(query);
		command
	}

	#[cfg(windows)]
	fn shell(&self, query: &str) -> Command {
		let mut command = Command::new("cmd");
		command.arg("/C").arg(&self.command).arg(query);
		command
	}
}

impl SearchProvider for CommandSearch {
	fn search(
		&self,
		_previous: &[SelectOption],
		query: &str,
	) -> Result<Vec<SelectOption>, SearchError> {
		let output = self
			.shell(query)
			.env(QUERY_ENV, query)
			.output()
			.map_err(|err| SearchError::provider(format!("failed to run `{}`: {err}", self.command)))?;

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			let detail = stderr.lines().next().unwrap_or_default();
			return Err(SearchError::provider(format!(
				"`{}` exited with {}: {detail}",
				self.command, output.status
			)));
		}

		let stdout = String::from_utf8_lossy(&output.stdout);
		parse_options(&stdout, &self.command).map_err(|err| SearchError::provider(err.to_string()))
	}
}

#[cfg(all(test, unix))]
mod tests {
	use super::*;

	#[test]
	fn query_is_the_final_argument() {
		let search = CommandSearch::new("echo result:");
		let options = search.search(&[], "apple pie").expect("search");
		let labels: Vec<_> = options.iter().map(|option| option.label.as_str()).collect();
		assert_eq!(labels, ["result: apple pie"]);
	}

	#[test]
	fn query_is_exported_to_the_environment() {
		let search = CommandSearch::new("echo \"$LISTKIT_QUERY\"; true");
		let options = search.search(&[], "kiwi").expect("search");
		assert_eq!(options[0].label, "kiwi");
	}

	#[test]
	fn failing_command_is_a_provider_error() {
		let search = CommandSearch::new("false");
		let err = search.search(&[], "x").expect_err("non-zero exit");
		assert!(matches!(err, SearchError::Provider { .. }));
	}
}

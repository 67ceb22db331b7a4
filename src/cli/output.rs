use anyhow::Result;
use listkit_core::SelectOption;
use listkit_tui::{PickOutcome, SortOutcome};
use serde_json::json;

use super::OutputFormat;

fn labels(options: &[SelectOption]) -> String {
	options
		.iter()
		.map(|option| format!("{}\n", option.label))
		.collect()
}

/// Render a picker result. Plain output lists the selected labels, one per
/// line, and is empty when the picker was cancelled.
pub(crate) fn format_pick(outcome: &PickOutcome, format: OutputFormat) -> Result<String> {
	match format {
		OutputFormat::Plain if outcome.accepted => Ok(labels(&outcome.selected)),
		OutputFormat::Plain => Ok(String::new()),
		OutputFormat::Json => {
			let payload = json!({
				"accepted": outcome.accepted,
				"query": outcome.query,
				"selected": outcome.selected,
			});
			Ok(serde_json::to_string_pretty(&payload)? + "\n")
		}
	}
}

/// Render a sorter result. Plain output lists the items in their final
/// order, and is empty when the sorter was cancelled.
pub(crate) fn format_sort(
	outcome: &SortOutcome<SelectOption>,
	format: OutputFormat,
) -> Result<String> {
	match format {
		OutputFormat::Plain if outcome.accepted => Ok(labels(&outcome.items)),
		OutputFormat::Plain => Ok(String::new()),
		OutputFormat::Json => {
			let payload = json!({
				"accepted": outcome.accepted,
				"items": outcome.items,
			});
			Ok(serde_json::to_string_pretty(&payload)? + "\n")
		}
	}
}

/// Render the options matched by a batch filter.
pub(crate) fn format_filter(
	query: &str,
	matches: &[SelectOption],
	format: OutputFormat,
) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(labels(matches)),
		OutputFormat::Json => {
			let payload = json!({
				"query": query,
				"matches": matches,
			});
			Ok(serde_json::to_string_pretty(&payload)? + "\n")
		}
	}
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Behavioural switches for a [`SelectController`](super::SelectController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
	/// Keep a set of selections instead of a single one.
	pub multiple: bool,
	/// Drop already-selected options from the filtered list.
	pub exclude_selected_options: bool,
	/// Show nothing until a non-empty query has been typed.
	pub hide_before_search: bool,
	/// Cap on the number of filtered options; `None` or `0` means unlimited.
	pub max_results: Option<usize>,
	/// Quiet period before the external search is issued, in milliseconds.
	pub search_debounce_ms: u64,
	/// Fold accented characters to their base letters before matching.
	pub ignore_diacritics: bool,
	/// Highlight the first result whenever the list has results and nothing
	/// is highlighted.
	pub auto_highlight: bool,
}

impl Default for SelectConfig {
	fn default() -> Self {
		Self {
			multiple: false,
			exclude_selected_options: false,
			hide_before_search: false,
			max_results: None,
			search_debounce_ms: 0,
			ignore_diacritics: false,
			auto_highlight: false,
		}
	}
}

impl SelectConfig {
	/// Configuration for a multi-select control.
	#[must_use]
	pub fn multiple() -> Self {
		Self {
			multiple: true,
			..Self::default()
		}
	}

	/// Debounce applied to the external search call.
	#[must_use]
	pub fn search_debounce(&self) -> Duration {
		Duration::from_millis(self.search_debounce_ms)
	}

	/// Effective result cap, treating zero as unlimited.
	#[must_use]
	pub fn result_limit(&self) -> Option<usize> {
		self.max_results.filter(|limit| *limit > 0)
	}
}

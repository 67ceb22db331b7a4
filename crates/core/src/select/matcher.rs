//! Query matching for the select controller.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use super::config::SelectConfig;
use super::normalize::{normalize_text, strip_diacritics};
use crate::types::{OptionKey, SelectOption};

type ExpressionHook = dyn Fn(&str) -> String + Send + Sync;
type FilterHook = dyn Fn(Vec<SelectOption>, &str) -> Vec<SelectOption> + Send + Sync;

/// Caller-supplied customisations of the filtering pipeline.
#[derive(Clone, Default)]
pub struct FilterHooks {
	search_expression: Option<Arc<ExpressionHook>>,
	on_filter: Option<Arc<FilterHook>>,
}

impl fmt::Debug for FilterHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterHooks")
			.field("search_expression", &self.search_expression.is_some())
			.field("on_filter", &self.on_filter.is_some())
			.finish()
	}
}

impl FilterHooks {
	/// Replace the default escaped-literal pattern with a custom regular
	/// expression source built from the normalized query.
	#[must_use]
	pub fn with_search_expression(
		mut self,
		hook: impl Fn(&str) -> String + Send + Sync + 'static,
	) -> Self {
		self.search_expression = Some(Arc::new(hook));
		self
	}

	/// Post-process the filtered options before they are exposed.
	#[must_use]
	pub fn with_on_filter(
		mut self,
		hook: impl Fn(Vec<SelectOption>, &str) -> Vec<SelectOption> + Send + Sync + 'static,
	) -> Self {
		self.on_filter = Some(Arc::new(hook));
		self
	}
}

/// Compiled matcher for one normalized query.
#[derive(Debug, Clone)]
pub struct SearchExpression {
	regex: Option<Regex>,
}

impl SearchExpression {
	/// Compile the matcher for `query`. An empty query matches everything.
	///
	/// A custom pattern that fails to compile falls back to matching the query
	/// literally.
	#[must_use]
	pub fn compile(query: &str, hooks: &FilterHooks) -> Self {
		if query.is_empty() {
			return Self { regex: None };
		}

		let pattern = match &hooks.search_expression {
			Some(hook) => hook(query),
			None => regex::escape(query),
		};

		let regex = match build_case_insensitive(&pattern) {
			Ok(regex) => regex,
			Err(err) => {
				tracing::debug!(%pattern, %err, "invalid search expression; matching literally");
				match build_case_insensitive(&regex::escape(query)) {
					Ok(regex) => regex,
					Err(_) => return Self { regex: None },
				}
			}
		};

		Self { regex: Some(regex) }
	}

	/// Whether this expression places no constraint on candidates.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.regex.is_none()
	}

	/// Test a single piece of text.
	#[must_use]
	pub fn matches(&self, text: &str) -> bool {
		self.regex.as_ref().is_none_or(|regex| regex.is_match(text))
	}

	/// Byte ranges of non-empty matches in `text`, for highlighting.
	#[must_use]
	pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
		match &self.regex {
			Some(regex) => regex
				.find_iter(text)
				.filter(|found| !found.is_empty())
				.map(|found| found.range())
				.collect(),
			None => Vec::new(),
		}
	}

	/// Byte ranges of `text` covered by matches, as seen after diacritic
	/// folding. Ranges index into the original `text`.
	#[must_use]
	pub fn label_ranges(&self, text: &str, ignore_diacritics: bool) -> Vec<Range<usize>> {
		if !ignore_diacritics || text.is_ascii() {
			return self.match_ranges(text);
		}

		// One entry per folded byte: the span of the source char it came from.
		let mut folded = String::with_capacity(text.len());
		let mut origins: Vec<Range<usize>> = Vec::with_capacity(text.len());
		for (start, ch) in text.char_indices() {
			let end = start + ch.len_utf8();
			let before = folded.len();
			folded.push_str(&strip_diacritics(ch.encode_utf8(&mut [0; 4])));
			if folded.len() == before {
				if let Some(last) = origins.last_mut() {
					last.end = end;
				}
			} else {
				origins.extend((before..folded.len()).map(|_| start..end));
			}
		}

		self.match_ranges(&folded)
			.into_iter()
			.map(|range| origins[range.start].start..origins[range.end - 1].end)
			.collect()
	}

	/// Test an option's label and keywords.
	#[must_use]
	pub fn matches_option(&self, option: &SelectOption, ignore_diacritics: bool) -> bool {
		if self.is_empty() {
			return true;
		}
		std::iter::once(option.label.as_str())
			.chain(option.keywords.iter().map(String::as_str))
			.any(|text| self.matches(&normalize_text(text, ignore_diacritics)))
	}
}

fn build_case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
	RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Filter `candidates` against an already-normalized `query`.
///
/// Disabled options never match. Selected options are skipped when
/// `exclude_selected_options` is set, the result is capped at the configured
/// limit, and the `on_filter` hook sees the final list.
#[must_use]
pub fn filter_options(
	candidates: &[SelectOption],
	query: &str,
	selected: &IndexMap<OptionKey, SelectOption>,
	config: &SelectConfig,
	hooks: &FilterHooks,
) -> Vec<SelectOption> {
	let expression = SearchExpression::compile(query, hooks);
	filter_compiled(candidates, query, &expression, selected, config, hooks)
}

/// [`filter_options`] with the query's expression already compiled.
pub(crate) fn filter_compiled(
	candidates: &[SelectOption],
	query: &str,
	expression: &SearchExpression,
	selected: &IndexMap<OptionKey, SelectOption>,
	config: &SelectConfig,
	hooks: &FilterHooks,
) -> Vec<SelectOption> {
	if query.is_empty() && config.hide_before_search {
		return Vec::new();
	}

	let limit = config.result_limit();
	let mut filtered = Vec::new();

	for option in candidates {
		if limit.is_some_and(|limit| filtered.len() >= limit) {
			break;
		}
		if option.disabled {
			continue;
		}
		if config.exclude_selected_options && selected.contains_key(&option.key) {
			continue;
		}
		if expression.matches_option(option, config.ignore_diacritics) {
			filtered.push(option.clone());
		}
	}

	match &hooks.on_filter {
		Some(hook) => hook(filtered, query),
		None => filtered,
	}
}

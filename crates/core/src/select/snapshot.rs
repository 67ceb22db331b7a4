use std::ops::Range;

use indexmap::IndexMap;

use super::matcher::SearchExpression;
use crate::types::{OptionKey, SelectOption};

/// Borrowed view of a [`SelectController`](super::SelectController) handed to
/// render slots.
#[derive(Debug, Clone)]
pub struct SelectSnapshot<'a> {
	/// Query text as typed.
	pub query: &'a str,
	/// Matcher compiled from the normalized query and the filter hooks.
	pub expression: &'a SearchExpression,
	/// Whether matching folds diacritics.
	pub ignore_diacritics: bool,
	/// Options matching the query.
	pub filtered: &'a [SelectOption],
	/// Index into `filtered` of the highlighted option.
	pub highlighted: Option<usize>,
	/// Current selection in insertion order.
	pub selected: &'a IndexMap<OptionKey, SelectOption>,
	/// Whether the option list is showing.
	pub is_open: bool,
	/// Whether a search is pending or in flight.
	pub is_searching: bool,
	/// Whether the control keeps several selections.
	pub multiple: bool,
	/// Live-region text for assistive technology.
	pub announcement: Option<String>,
}

impl SelectSnapshot<'_> {
	/// Whether the option at `index` in `filtered` is highlighted.
	#[must_use]
	pub fn is_highlighted(&self, index: usize) -> bool {
		self.highlighted == Some(index)
	}

	/// Byte ranges of `label` matched by the current query.
	#[must_use]
	pub fn match_ranges(&self, label: &str) -> Vec<Range<usize>> {
		self.expression.label_ranges(label, self.ignore_diacritics)
	}

	/// Whether `option` is part of the selection.
	#[must_use]
	pub fn is_selected(&self, option: &SelectOption) -> bool {
		self.selected.contains_key(&option.key)
	}
}

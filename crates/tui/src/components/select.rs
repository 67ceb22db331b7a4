use std::ops::Range;

use listkit_core::SelectSnapshot;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{HighlightSpacing, List, ListState, Paragraph};

use super::{HIGHLIGHT_SYMBOL, pane_block};
use crate::style::Theme;

/// Owned rendering of a [`SelectSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectView {
	/// One line per filtered option; empty while the list is closed.
	pub rows: Vec<Line<'static>>,
	pub highlighted: Option<usize>,
	/// Chips for the current selection.
	pub tokens: Option<Line<'static>>,
	/// Shown in place of the rows when there are none.
	pub empty_message: &'static str,
	/// Live-region text.
	pub status: String,
	pub is_searching: bool,
}

impl SelectView {
	/// Unstyled text of each row.
	#[must_use]
	pub fn row_texts(&self) -> Vec<String> {
		self.rows.iter().map(super::plain_text).collect()
	}
}

/// Build the view for `snapshot`. Usable directly as a render slot body.
#[must_use]
pub fn select_view(snapshot: &SelectSnapshot<'_>, theme: &Theme) -> SelectView {
	let rows = if snapshot.is_open {
		snapshot
			.filtered
			.iter()
			.map(|option| {
				let mut spans = Vec::new();
				if snapshot.multiple {
					let (mark, style) = if snapshot.is_selected(option) {
						("[x] ", theme.selected)
					} else {
						("[ ] ", Style::default())
					};
					spans.push(Span::styled(mark, style));
				}
				let ranges = snapshot.match_ranges(&option.label);
				spans.extend(highlighted_label(&option.label, &ranges, theme.highlight));
				Line::from(spans)
			})
			.collect()
	} else {
		Vec::new()
	};

	let tokens = (!snapshot.selected.is_empty()).then(|| {
		let mut spans = Vec::new();
		for (index, option) in snapshot.selected.values().enumerate() {
			if index > 0 {
				spans.push(Span::raw(" "));
			}
			spans.push(Span::styled(format!(" {} ", option.label), theme.selected));
		}
		Line::from(spans)
	});

	let empty_message = if !snapshot.is_open {
		"Press ↓ to show options"
	} else if snapshot.is_searching {
		"Searching…"
	} else if snapshot.query.trim().is_empty() {
		"Type to search"
	} else {
		"No results"
	};

	SelectView {
		rows,
		highlighted: snapshot.highlighted.filter(|_| snapshot.is_open),
		tokens,
		empty_message,
		status: snapshot.announcement.clone().unwrap_or_default(),
		is_searching: snapshot.is_searching,
	}
}

fn highlighted_label(label: &str, ranges: &[Range<usize>], style: Style) -> Vec<Span<'static>> {
	let mut spans = Vec::new();
	let mut cursor = 0;
	for range in ranges {
		if range.start > cursor {
			spans.push(Span::raw(label[cursor..range.start].to_string()));
		}
		spans.push(Span::styled(label[range.clone()].to_string(), style));
		cursor = range.end;
	}
	if cursor < label.len() {
		spans.push(Span::raw(label[cursor..].to_string()));
	}
	spans
}

/// Paint the option list of `view` into `area`.
pub fn render_select(
	frame: &mut Frame,
	area: Rect,
	view: &SelectView,
	state: &mut ListState,
	title: &str,
	theme: &Theme,
) {
	let block = pane_block(title, theme);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	if view.rows.is_empty() {
		state.select(None);
		let message = Paragraph::new(view.empty_message)
			.style(theme.empty)
			.alignment(Alignment::Center);
		frame.render_widget(message, inner);
		return;
	}

	state.select(view.highlighted);
	let list = List::new(view.rows.clone())
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_style(theme.row_highlight)
		.highlight_spacing(HighlightSpacing::Always);
	frame.render_stateful_widget(list, inner, state);
}

#[cfg(test)]
mod tests {
	use std::time::Instant;

	use listkit_core::select::FilterHooks;
	use listkit_core::{SelectConfig, SelectController, SelectOption};

	use super::*;

	fn fruit() -> Vec<SelectOption> {
		["Apple", "Banana", "Cherry"]
			.into_iter()
			.map(SelectOption::labelled)
			.collect()
	}

	#[test]
	fn matched_text_is_split_into_highlighted_spans() {
		let spans = highlighted_label("Banana", &[1..3, 3..5], Style::default());
		let parts: Vec<_> = spans.iter().map(|span| span.content.as_ref()).collect();
		assert_eq!(parts, ["B", "an", "an", "a"]);
	}

	fn highlighted_parts(view: &SelectView, row: usize) -> Vec<String> {
		view.rows[row]
			.spans
			.iter()
			.filter(|span| span.style == Theme::default().highlight)
			.map(|span| span.content.to_string())
			.collect()
	}

	#[test]
	fn folded_matches_highlight_the_accented_text() {
		let theme = Theme::default();
		let config = SelectConfig {
			ignore_diacritics: true,
			..SelectConfig::default()
		};
		let options = vec![SelectOption::labelled("Crème brûlée")];
		let mut controller = SelectController::new(options, config);
		controller.set_query("creme", Instant::now());

		let view = controller.render(&mut |snapshot: &SelectSnapshot<'_>| select_view(snapshot, &theme));
		assert_eq!(view.row_texts(), ["Crème brûlée"]);
		assert_eq!(highlighted_parts(&view, 0), ["Crème"]);
	}

	#[test]
	fn custom_expression_drives_highlighting() {
		let theme = Theme::default();
		let hooks = FilterHooks::default()
			.with_search_expression(|query| format!("{query}$"));
		let options = vec![SelectOption::labelled("Banana")];
		let mut controller = SelectController::new(options, SelectConfig::default()).with_hooks(hooks);
		controller.set_query("na", Instant::now());

		let view = controller.render(&mut |snapshot: &SelectSnapshot<'_>| select_view(snapshot, &theme));
		assert_eq!(highlighted_parts(&view, 0), ["na"]);
	}

	#[test]
	fn closed_list_renders_no_rows() {
		let theme = Theme::default();
		let controller = SelectController::new(fruit(), SelectConfig::default());
		let view = controller.render(&mut |snapshot: &SelectSnapshot<'_>| select_view(snapshot, &theme));
		assert!(view.rows.is_empty());
		assert_eq!(view.empty_message, "Press ↓ to show options");
	}

	#[test]
	fn multi_select_rows_carry_check_marks() {
		let theme = Theme::default();
		let config = SelectConfig {
			multiple: true,
			..SelectConfig::default()
		};
		let mut controller = SelectController::new(fruit(), config);
		controller.set_query("an", Instant::now());
		controller.select_option(SelectOption::labelled("Banana"));

		let view = controller.render(&mut |snapshot: &SelectSnapshot<'_>| select_view(snapshot, &theme));
		assert_eq!(view.row_texts(), ["[x] Banana"]);
		let tokens = view.tokens.as_ref().map(crate::components::plain_text);
		assert_eq!(tokens.as_deref(), Some(" Banana "));
		assert_eq!(
			view.status,
			"1 result found, use up and down arrow keys to navigate."
		);
	}
}

//! Renderers that turn controller snapshots into ratatui widgets.
//!
//! Each renderer is split in two: a pure `*_view` function usable as a
//! controller render slot, and a `render_*` function that paints the view
//! into a frame.

pub mod select;
pub mod sortable;

use ratatui::widgets::{Block, BorderType, Borders};

use crate::style::Theme;

pub use select::{SelectView, render_select, select_view};
pub use sortable::{SortableState, SortableView, render_sortable, row_bounds, sortable_view};

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Rounded border block shared by the panes.
pub(crate) fn pane_block<'a>(title: impl Into<String>, theme: &Theme) -> Block<'a> {
	let title: String = title.into();
	let block = Block::default()
		.borders(Borders::ALL)
		.border_type(BorderType::Rounded)
		.border_style(theme.border_style());
	if title.is_empty() {
		block
	} else {
		block.title(title).title_style(theme.header)
	}
}

/// Concatenate the span contents of a line.
pub(crate) fn plain_text(line: &ratatui::text::Line<'_>) -> String {
	line.spans
		.iter()
		.map(|span| span.content.as_ref())
		.collect()
}

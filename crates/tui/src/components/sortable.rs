use listkit_core::sortable::ItemRole;
use listkit_core::{Bounds, Interaction, Orientation, SortableSnapshot};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::pane_block;
use crate::style::Theme;

const ITEM_SEPARATOR: &str = " │ ";

/// Owned rendering of a [`SortableSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SortableView {
	/// Committed list index and rendered line, in display order.
	pub rows: Vec<(usize, Line<'static>)>,
	pub orientation: Orientation,
	/// Live-region text.
	pub status: String,
	/// Where a pointer drag would currently land.
	pub drop_hint: Option<String>,
	/// Row the pane keeps in view: the focused, moving or settling item.
	/// `None` during a pointer drag so rows stay put under the pointer.
	pub active_row: Option<usize>,
}

/// Scroll position of a sortable pane, carried between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortableState {
	offset: usize,
}

impl SortableState {
	/// Number of leading rows scrolled out of view.
	#[must_use]
	pub fn offset(&self) -> usize {
		self.offset
	}

	/// Scroll just far enough that the active row of `view` fits in `area`.
	fn follow(&mut self, view: &SortableView, area: Rect) {
		let len = view.rows.len();
		match view.orientation {
			Orientation::Vertical => {
				let height = usize::from(area.height).max(1);
				self.offset = self.offset.min(len.saturating_sub(height));
				if let Some(active) = view.active_row {
					if active < self.offset {
						self.offset = active;
					} else if active >= self.offset + height {
						self.offset = active + 1 - height;
					}
				}
			}
			Orientation::Horizontal => {
				self.offset = self.offset.min(len.saturating_sub(1));
				if let Some(active) = view.active_row.filter(|active| *active < len) {
					if active < self.offset {
						self.offset = active;
					}
					let width = usize::from(area.width);
					while self.offset < active
						&& strip_width(&view.rows[self.offset..=active]) > width
					{
						self.offset += 1;
					}
				}
			}
		}
	}
}

/// Width of `rows` painted side by side.
fn strip_width(rows: &[(usize, Line<'static>)]) -> usize {
	let labels: usize = rows.iter().map(|(_, line)| line.width()).sum();
	labels + ITEM_SEPARATOR.width() * rows.len().saturating_sub(1)
}

impl SortableView {
	/// Unstyled text of each row.
	#[must_use]
	pub fn row_texts(&self) -> Vec<String> {
		self.rows
			.iter()
			.map(|(_, line)| super::plain_text(line))
			.collect()
	}
}

/// Build the view for `snapshot`, labelling items with `label`.
///
/// A keyboard grab previews the moving item at its drop position. A pointer
/// drag keeps the committed order so that rows stay under the pointer while
/// it moves, and reports the landing spot through `drop_hint` instead.
pub fn sortable_view<T>(
	snapshot: &SortableSnapshot<'_, T>,
	theme: &Theme,
	label: impl Fn(&T) -> String,
) -> SortableView {
	let order: Vec<usize> = match snapshot.interaction {
		Interaction::Dragging { .. } => (0..snapshot.items.len()).collect(),
		_ => snapshot.order.clone(),
	};

	let rows = order
		.into_iter()
		.map(|index| {
			let (marker, style) = role_presentation(snapshot.role(index), theme);
			let text = label(&snapshot.items[index].value);
			(index, Line::from(vec![Span::styled(marker, style), Span::styled(text, style)]))
		})
		.collect::<Vec<_>>();

	let active_row = match snapshot.interaction {
		Interaction::Dragging { .. } => None,
		_ => rows.iter().position(|(index, _)| {
			matches!(
				snapshot.role(*index),
				ItemRole::Focused | ItemRole::Moving | ItemRole::Settling
			)
		}),
	};

	let drop_hint = match snapshot.interaction {
		Interaction::Dragging { drop, .. } => Some(format!(
			"Drop at position {} of {}",
			drop + 1,
			snapshot.slots.len()
		)),
		_ => None,
	};

	SortableView {
		rows,
		orientation: snapshot.orientation,
		status: snapshot.announcement.unwrap_or_default().to_string(),
		drop_hint,
		active_row,
	}
}

fn role_presentation(role: ItemRole, theme: &Theme) -> (&'static str, Style) {
	match role {
		ItemRole::Normal => ("  ", Style::default()),
		ItemRole::Pinned => ("• ", theme.pinned),
		ItemRole::Focused => ("▶ ", theme.row_highlight),
		ItemRole::Moving => ("↕ ", theme.moving),
		ItemRole::Settling => ("✓ ", theme.settling),
	}
}

/// Screen boxes of the rows of `view` as painted inside `area` after
/// scrolling past `scroll` rows, paired with their committed list index.
/// Rows clipped by `area` are omitted.
#[must_use]
pub fn row_bounds(area: Rect, view: &SortableView, scroll: usize) -> Vec<(usize, Bounds)> {
	let mut bounds = Vec::new();
	let visible = view.rows.get(scroll..).unwrap_or_default();
	match view.orientation {
		Orientation::Vertical => {
			for (offset, (index, _)) in visible.iter().enumerate() {
				let Ok(offset) = u16::try_from(offset) else {
					break;
				};
				if offset >= area.height {
					break;
				}
				bounds.push((
					*index,
					Bounds::new(
						f64::from(area.x),
						f64::from(area.y + offset),
						f64::from(area.width),
						1.0,
					),
				));
			}
		}
		Orientation::Horizontal => {
			if area.height == 0 {
				return bounds;
			}
			let right = usize::from(area.right());
			let mut x = usize::from(area.x);
			for (index, line) in visible {
				let width = line.width();
				if x + width > right {
					break;
				}
				bounds.push((
					*index,
					Bounds::new(x as f64, f64::from(area.y), width as f64, 1.0),
				));
				x += width + ITEM_SEPARATOR.width();
			}
		}
	}
	bounds
}

/// Paint `view` into `area`, scrolling `state` to keep the active row in
/// view. Returns the inner area holding the rows, which is what
/// [`row_bounds`] expects together with `state.offset()`.
pub fn render_sortable(
	frame: &mut Frame,
	area: Rect,
	view: &SortableView,
	state: &mut SortableState,
	title: &str,
	theme: &Theme,
) -> Rect {
	let block = pane_block(title, theme);
	let inner = block.inner(area);
	frame.render_widget(block, area);

	state.follow(view, inner);
	let visible = view.rows.get(state.offset..).unwrap_or_default();
	let lines: Vec<Line<'static>> = match view.orientation {
		Orientation::Vertical => visible.iter().map(|(_, line)| line.clone()).collect(),
		Orientation::Horizontal => {
			let mut spans = Vec::new();
			for (position, (_, line)) in visible.iter().enumerate() {
				if position > 0 {
					spans.push(Span::styled(ITEM_SEPARATOR, theme.empty));
				}
				spans.extend(line.spans.iter().cloned());
			}
			vec![Line::from(spans)]
		}
	};
	frame.render_widget(Paragraph::new(lines), inner);
	inner
}

#[cfg(test)]
mod tests {
	use std::time::Instant;

	use listkit_core::{SortKey, SortableConfig, SortableController, SortableItem};

	use super::*;

	fn controller(config: SortableConfig) -> SortableController<&'static str> {
		SortableController::new(
			[
				SortableItem::new("alpha"),
				SortableItem::pinned("beta"),
				SortableItem::new("gamma"),
			],
			config,
		)
	}

	#[test]
	fn keyboard_grab_previews_the_drop_position() {
		let theme = Theme::default();
		let mut sortable = controller(SortableConfig::default());
		let now = Instant::now();
		sortable.handle_key(SortKey::Down, now);
		sortable.handle_key(SortKey::Space, now);
		sortable.handle_key(SortKey::Down, now);

		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.to_string());
		assert_eq!(view.row_texts(), ["  gamma", "• beta", "↕ alpha"]);
		assert_eq!(view.status, "Moved to position 2 of 2.");
		assert!(view.drop_hint.is_none());
	}

	#[test]
	fn vertical_rows_map_to_single_line_boxes() {
		let theme = Theme::default();
		let sortable = controller(SortableConfig::default());
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.to_string());
		let bounds = row_bounds(Rect::new(2, 3, 20, 2), &view, 0);
		assert_eq!(
			bounds,
			[
				(0, Bounds::new(2.0, 3.0, 20.0, 1.0)),
				(1, Bounds::new(2.0, 4.0, 20.0, 1.0)),
			]
		);
	}

	fn long_controller(config: SortableConfig) -> SortableController<String> {
		SortableController::from_values((0..10).map(|n| format!("item{n}")), config)
	}

	#[test]
	fn scroll_follows_focus_both_ways() {
		let theme = Theme::default();
		let mut sortable = long_controller(SortableConfig::default());
		let now = Instant::now();
		let area = Rect::new(0, 0, 20, 3);
		let mut state = SortableState::default();

		for _ in 0..6 {
			sortable.handle_key(SortKey::Down, now);
		}
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.clone());
		assert_eq!(view.active_row, Some(5));
		state.follow(&view, area);
		assert_eq!(state.offset(), 3);

		let bounds = row_bounds(area, &view, state.offset());
		let indices: Vec<_> = bounds.iter().map(|(index, _)| *index).collect();
		assert_eq!(indices, [3, 4, 5]);
		assert_eq!(bounds[0].1.y, 0.0);

		for _ in 0..4 {
			sortable.handle_key(SortKey::Up, now);
		}
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.clone());
		state.follow(&view, area);
		assert_eq!(state.offset(), 1);
	}

	#[test]
	fn pointer_drag_keeps_scroll_position() {
		let theme = Theme::default();
		let mut sortable = long_controller(SortableConfig::default());
		let area = Rect::new(0, 0, 20, 3);
		let mut state = SortableState { offset: 4 };

		sortable.begin_drag(5);
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.clone());
		assert_eq!(view.active_row, None);
		state.follow(&view, area);
		assert_eq!(state.offset(), 4);
	}

	#[test]
	fn horizontal_scroll_brings_focus_into_width() {
		let theme = Theme::default();
		let mut sortable = long_controller(SortableConfig::horizontal());
		let now = Instant::now();
		let mut state = SortableState::default();

		for _ in 0..4 {
			sortable.handle_key(SortKey::Right, now);
		}
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.clone());
		let area = Rect::new(0, 0, 20, 1);
		state.follow(&view, area);
		assert_eq!(state.offset(), 2);
		let indices: Vec<_> = row_bounds(area, &view, state.offset())
			.iter()
			.map(|(index, _)| *index)
			.collect();
		assert_eq!(indices, [2, 3]);
	}

	#[test]
	fn horizontal_rows_advance_by_label_width() {
		let theme = Theme::default();
		let sortable = controller(SortableConfig {
			orientation: Orientation::Horizontal,
			..SortableConfig::default()
		});
		let view = sortable_view(&sortable.snapshot(), &theme, |value| value.to_string());
		let bounds = row_bounds(Rect::new(0, 0, 80, 1), &view, 0);
		let xs: Vec<_> = bounds.iter().map(|(_, bounds)| bounds.x).collect();
		assert_eq!(xs, [0.0, 10.0, 19.0]);
	}
}

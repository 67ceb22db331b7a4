use std::time::Instant;

use anyhow::Result;
use listkit_core::{
	Bounds, Interaction, Orientation, Point, SortKey, SortableController, SortableSnapshot,
};
use ratatui::Frame;
use ratatui::crossterm::event::{
	Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::widgets::Paragraph;

use crate::components::{SortableState, render_sortable, row_bounds, sortable_view};
use crate::runtime::Interactive;
use crate::style::Theme;

const KEY_HINTS: &str = "↑↓ focus · space grab/drop · enter accept · esc cancel";

/// Result of a finished [`Sorter`] session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome<T> {
	/// `false` when the user cancelled.
	pub accepted: bool,
	/// Values in their final order.
	pub items: Vec<T>,
}

type Labeller<T> = Box<dyn Fn(&T) -> String>;

/// Reorderable list driven by keyboard grabs and mouse drags.
pub struct Sorter<T> {
	controller: SortableController<T>,
	label: Labeller<T>,
	theme: Theme,
	title: String,
	scroll: SortableState,
	/// Row boxes from the last draw, used for mouse hit testing.
	bounds: Vec<(usize, Bounds)>,
}

impl<T: Clone> Sorter<T> {
	pub fn new(controller: SortableController<T>, label: impl Fn(&T) -> String + 'static) -> Self {
		Self {
			controller,
			label: Box::new(label),
			theme: Theme::default(),
			title: "Reorder".to_string(),
			scroll: SortableState::default(),
			bounds: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	pub fn controller(&self) -> &SortableController<T> {
		&self.controller
	}

	/// Apply a key press. Returns the outcome once the session ends.
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SortOutcome<T>> {
		let sort_key = match key.code {
			KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				return Some(self.outcome(false));
			}
			KeyCode::Enter => {
				self.commit(now);
				return Some(self.outcome(true));
			}
			KeyCode::Esc => match self.controller.interaction() {
				Interaction::Idle | Interaction::Settling { .. } => {
					return Some(self.outcome(false));
				}
				_ => SortKey::Escape,
			},
			KeyCode::Up | KeyCode::Char('k') => SortKey::Up,
			KeyCode::Down | KeyCode::Char('j') => SortKey::Down,
			KeyCode::Left | KeyCode::Char('h') => SortKey::Left,
			KeyCode::Right | KeyCode::Char('l') => SortKey::Right,
			KeyCode::Char(' ') => SortKey::Space,
			_ => return None,
		};
		if let Some(order) = self.controller.handle_key(sort_key, now) {
			tracing::debug!(len = order.len(), "reordered from keyboard");
		}
		None
	}

	/// Apply a mouse event against the rows painted by the last draw.
	pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => {
				if let Some((index, _)) = self.hit(mouse.column, mouse.row) {
					self.controller.begin_drag(index);
				}
			}
			MouseEventKind::Drag(MouseButton::Left) => {
				if let Some((index, bounds)) = self.hit(mouse.column, mouse.row) {
					let pointer = self.pointer_over(index, mouse.column, mouse.row);
					self.controller
						.update_drop_target(pointer, index, bounds, now);
				}
			}
			MouseEventKind::Up(MouseButton::Left) => self.commit(now),
			_ => {}
		}
	}

	fn hit(&self, column: u16, row: u16) -> Option<(usize, Bounds)> {
		let cell = Point::new(f64::from(column) + 0.5, f64::from(row) + 0.5);
		self.bounds
			.iter()
			.copied()
			.find(|(_, bounds)| bounds.contains(cell))
	}

	/// Pointer position to report for a cell over row `index`.
	///
	/// Vertical rows are a single cell tall, so the pointer is nudged to the
	/// half of the row that makes the hovered row the landing spot.
	fn pointer_over(&self, index: usize, column: u16, row: u16) -> Point {
		let x = f64::from(column) + 0.5;
		match self.controller.orientation() {
			Orientation::Horizontal => Point::new(x, f64::from(row) + 0.5),
			Orientation::Vertical => {
				let below_source = matches!(
					(self.controller.position_of(index), self.controller.drag_index()),
					(Some(candidate), Some(drag)) if candidate > drag
				);
				let offset = if below_source { 0.75 } else { 0.25 };
				Point::new(x, f64::from(row) + offset)
			}
		}
	}

	fn commit(&mut self, now: Instant) {
		if let Some(order) = self.controller.commit(now) {
			tracing::debug!(len = order.len(), "reorder committed");
		}
	}

	fn outcome(&self, accepted: bool) -> SortOutcome<T> {
		SortOutcome {
			accepted,
			items: self.controller.values().cloned().collect(),
		}
	}

	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let list_height = match self.controller.orientation() {
			Orientation::Vertical => Constraint::Min(1),
			Orientation::Horizontal => Constraint::Length(3),
		};
		let [list_area, status_area] =
			Layout::vertical([list_height, Constraint::Length(1)]).areas(area);

		let theme = self.theme;
		let label = &self.label;
		let view = self
			.controller
			.render(&mut |snapshot: &SortableSnapshot<'_, T>| {
				sortable_view(snapshot, &theme, |value| label(value))
			});

		let inner =
			render_sortable(frame, list_area, &view, &mut self.scroll, &self.title, &theme);
		self.bounds = row_bounds(inner, &view, self.scroll.offset());

		let status = view
			.drop_hint
			.clone()
			.or_else(|| (!view.status.is_empty()).then(|| view.status.clone()))
			.unwrap_or_else(|| KEY_HINTS.to_string());
		frame.render_widget(
			Paragraph::new(status).style(theme.status_style()),
			status_area,
		);
	}
}

impl<T: Clone> Interactive for Sorter<T> {
	type Outcome = SortOutcome<T>;

	fn handle_event(&mut self, event: Event, now: Instant) -> Result<Option<SortOutcome<T>>> {
		match event {
			Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, now)),
			Event::Mouse(mouse) => {
				self.handle_mouse(mouse, now);
				Ok(None)
			}
			_ => Ok(None),
		}
	}

	fn tick(&mut self, now: Instant) {
		self.controller.tick(now);
	}

	fn draw(&mut self, frame: &mut Frame) {
		Sorter::draw(self, frame);
	}
}

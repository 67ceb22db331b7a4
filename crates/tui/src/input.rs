//! Single-line query input.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tui_textarea::TextArea;

/// Text field backed by `tui-textarea`, restricted to one line.
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
}

impl<'a> QueryInput<'a> {
	/// Create an input pre-filled with `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		let initial: String = initial.into();
		let line = initial.lines().next().unwrap_or_default().to_string();
		let mut textarea = TextArea::new(vec![line]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(tui_textarea::CursorMove::End);
		Self { textarea }
	}

	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		self.textarea
			.lines()
			.first()
			.map(String::as_str)
			.unwrap_or_default()
	}

	/// Apply an editing key. Returns whether the text changed.
	///
	/// Keys that would insert a line break are ignored.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Enter => false,
			KeyCode::Char('m') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
			_ => {
				let before = self.text().to_string();
				self.textarea.input(key);
				self.text() != before
			}
		}
	}

	/// Placeholder shown while the input is empty.
	pub fn set_placeholder(&mut self, placeholder: impl Into<String>, style: Style) {
		self.textarea.set_placeholder_text(placeholder);
		self.textarea.set_placeholder_style(style);
	}

	/// Render the input inside `block`.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, block: Block<'a>, style: Style) {
		self.textarea.set_block(block);
		self.textarea.set_style(style);
		frame.render_widget(&self.textarea, area);
	}
}

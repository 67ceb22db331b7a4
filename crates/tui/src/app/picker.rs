use std::time::Instant;

use anyhow::Result;
use listkit_core::{SelectController, SelectEvent, SelectKey, SelectOption, SelectSnapshot};
use ratatui::Frame;
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListState, Paragraph};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::components::{pane_block, render_select, select_view};
use crate::input::QueryInput;
use crate::runtime::Interactive;
use crate::style::Theme;

/// Result of a finished [`Picker`] session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOutcome {
	/// `false` when the user cancelled.
	pub accepted: bool,
	pub query: String,
	/// Selected options in selection order.
	pub selected: Vec<SelectOption>,
}

/// Filterable select rendered as a query input above an option list.
///
/// In single mode Enter picks the highlighted option and finishes. In
/// multiple mode Enter toggles the highlighted option; Enter with nothing
/// highlighted finishes. Escape closes the list, and a second Escape
/// cancels.
pub struct Picker<'a> {
	controller: SelectController,
	input: QueryInput<'a>,
	theme: Theme,
	title: String,
	prompt: String,
	list_state: ListState,
	throbber_state: ThrobberState,
}

impl<'a> Picker<'a> {
	pub fn new(mut controller: SelectController) -> Self {
		controller.open();
		let input = QueryInput::new(controller.query());
		let theme = Theme::default();
		let mut picker = Self {
			controller,
			input,
			theme,
			title: "Options".to_string(),
			prompt: "Search".to_string(),
			list_state: ListState::default(),
			throbber_state: ThrobberState::default(),
		};
		picker.input.set_placeholder("Type to filter", theme.empty);
		picker
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self.input.set_placeholder("Type to filter", theme.empty);
		self
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	#[must_use]
	pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
		self.prompt = prompt.into();
		self
	}

	pub fn controller(&self) -> &SelectController {
		&self.controller
	}

	/// Apply a key press. Returns the outcome once the session ends.
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<PickOutcome> {
		match key.code {
			KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				return Some(self.outcome(false));
			}
			KeyCode::Esc if !self.controller.is_open() => return Some(self.outcome(false)),
			KeyCode::Esc => self.apply(SelectKey::Escape),
			KeyCode::Up => self.apply(SelectKey::Up),
			KeyCode::Down => self.apply(SelectKey::Down),
			KeyCode::Tab => self.apply(SelectKey::Tab),
			KeyCode::Enter => return self.handle_enter(),
			KeyCode::Backspace if self.input.text().is_empty() => {
				self.apply(SelectKey::Backspace);
			}
			_ => {
				if self.input.input(key) {
					self.controller.set_query(self.input.text(), now);
				}
			}
		}
		None
	}

	fn handle_enter(&mut self) -> Option<PickOutcome> {
		let Some(option) = self.controller.highlighted_option().cloned() else {
			return Some(self.outcome(true));
		};
		if !self.controller.config().multiple {
			self.apply(SelectKey::Enter);
			return Some(self.outcome(true));
		}
		if self.controller.is_selected(&option.key) {
			let event = self.controller.remove_option(&option.key);
			log_event(event.as_ref());
		} else {
			self.apply(SelectKey::Enter);
		}
		None
	}

	fn apply(&mut self, key: SelectKey) {
		let event = self.controller.handle_key(key);
		log_event(event.as_ref());
	}

	fn outcome(&self, accepted: bool) -> PickOutcome {
		PickOutcome {
			accepted,
			query: self.controller.query().to_string(),
			selected: self.controller.selected().values().cloned().collect(),
		}
	}

	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area().inner(Margin {
			vertical: 0,
			horizontal: 1,
		});
		let theme = self.theme;
		let view = self
			.controller
			.render(&mut |snapshot: &SelectSnapshot<'_>| select_view(snapshot, &theme));

		let token_height = u16::from(view.tokens.is_some());
		let [input_area, tokens_area, list_area, status_area] = Layout::vertical([
			Constraint::Length(3),
			Constraint::Length(token_height),
			Constraint::Min(1),
			Constraint::Length(1),
		])
		.areas(area);

		self.input
			.render(frame, input_area, pane_block(self.prompt.as_str(), &theme), theme.prompt);
		if let Some(tokens) = &view.tokens {
			frame.render_widget(Paragraph::new(tokens.clone()), tokens_area);
		}
		render_select(frame, list_area, &view, &mut self.list_state, &self.title, &theme);

		let mut status = Line::default();
		if view.is_searching {
			let spinner = Throbber::default()
				.style(theme.status_style())
				.throbber_style(theme.status_style());
			status.spans.push(spinner.to_symbol_span(&self.throbber_state));
		}
		status
			.spans
			.push(Span::styled(view.status, theme.status_style()));
		frame.render_widget(Paragraph::new(status), status_area);
	}
}

fn log_event(event: Option<&SelectEvent>) {
	match event {
		Some(SelectEvent::Selected(option)) => {
			tracing::debug!(key = %option.key, "option selected");
		}
		Some(SelectEvent::Removed(option)) => {
			tracing::debug!(key = %option.key, "option removed");
		}
		None => {}
	}
}

impl Interactive for Picker<'_> {
	type Outcome = PickOutcome;

	fn handle_event(&mut self, event: Event, now: Instant) -> Result<Option<PickOutcome>> {
		match event {
			Event::Key(key) if key.kind == KeyEventKind::Press => Ok(self.handle_key(key, now)),
			_ => Ok(None),
		}
	}

	fn tick(&mut self, now: Instant) {
		self.controller.tick(now);
		if self.controller.is_searching() {
			self.throbber_state.calc_next();
		}
	}

	fn draw(&mut self, frame: &mut Frame) {
		Picker::draw(self, frame);
	}
}

#[cfg(test)]
mod tests {
	use listkit_core::SelectConfig;

	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
	}

	fn picker(multiple: bool) -> Picker<'static> {
		let options = ["Apple", "Banana", "Cherry"]
			.into_iter()
			.map(SelectOption::labelled)
			.collect();
		let config = SelectConfig {
			multiple,
			..SelectConfig::default()
		};
		Picker::new(SelectController::new(options, config))
	}

	fn type_text(picker: &mut Picker<'_>, text: &str, now: Instant) {
		for ch in text.chars() {
			assert!(picker.handle_key(key(KeyCode::Char(ch)), now).is_none());
		}
	}

	#[test]
	fn single_mode_enter_picks_and_finishes() {
		let now = Instant::now();
		let mut picker = picker(false);
		type_text(&mut picker, "ch", now);
		assert!(picker.handle_key(key(KeyCode::Down), now).is_none());

		let outcome = picker.handle_key(key(KeyCode::Enter), now).expect("finished");
		assert!(outcome.accepted);
		assert_eq!(outcome.query, "ch");
		assert_eq!(outcome.selected, [SelectOption::labelled("Cherry")]);
	}

	#[test]
	fn multi_mode_enter_toggles_until_list_closes() {
		let now = Instant::now();
		let mut picker = picker(true);
		picker.handle_key(key(KeyCode::Down), now);
		assert!(picker.handle_key(key(KeyCode::Enter), now).is_none());
		picker.handle_key(key(KeyCode::Down), now);
		assert!(picker.handle_key(key(KeyCode::Enter), now).is_none());
		picker.handle_key(key(KeyCode::Up), now);
		assert!(picker.handle_key(key(KeyCode::Enter), now).is_none());

		picker.handle_key(key(KeyCode::Esc), now);
		let outcome = picker.handle_key(key(KeyCode::Enter), now).expect("finished");
		assert_eq!(outcome.selected, [SelectOption::labelled("Banana")]);
	}

	#[test]
	fn backspace_on_empty_query_removes_last_selection() {
		let now = Instant::now();
		let mut picker = picker(true);
		for _ in 0..2 {
			picker.handle_key(key(KeyCode::Down), now);
			picker.handle_key(key(KeyCode::Enter), now);
		}
		assert_eq!(picker.controller().selected().len(), 2);
		picker.handle_key(key(KeyCode::Backspace), now);
		let remaining: Vec<_> = picker
			.controller()
			.selected()
			.values()
			.map(|option| option.label.as_str())
			.collect();
		assert_eq!(remaining, ["Apple"]);
	}

	#[test]
	fn second_escape_cancels() {
		let now = Instant::now();
		let mut picker = picker(false);
		assert!(picker.handle_key(key(KeyCode::Esc), now).is_none());
		let outcome = picker.handle_key(key(KeyCode::Esc), now).expect("cancelled");
		assert!(!outcome.accepted);
	}
}

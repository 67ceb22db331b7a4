use ratatui::style::{Color, Modifier, Style};

/// Styles applied to the picker and sorter widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Borders and titles.
	pub header: Style,
	/// The highlighted option or focused row.
	pub row_highlight: Style,
	/// The query prompt.
	pub prompt: Style,
	/// Placeholder and empty-state text.
	pub empty: Style,
	/// Matched query text inside labels.
	pub highlight: Style,
	/// Selected options and tokens.
	pub selected: Style,
	/// The item being grabbed or dragged.
	pub moving: Style,
	/// Items pinned in place.
	pub pinned: Style,
	/// The item that was just dropped.
	pub settling: Style,
}

impl Theme {
	/// Border style derived from the header colour.
	#[must_use]
	pub fn border_style(&self) -> Style {
		Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
	}

	/// Style for the live-region status line.
	#[must_use]
	pub fn status_style(&self) -> Style {
		self.empty.remove_modifier(Modifier::ITALIC)
	}
}

/// A named theme as shipped with the crate.
#[derive(Debug, Clone)]
pub struct ThemeRegistration {
	pub name: String,
	pub theme: Theme,
	pub aliases: Vec<String>,
}

impl ThemeRegistration {
	pub fn new(name: impl Into<String>, theme: Theme) -> Self {
		Self {
			name: name.into(),
			theme,
			aliases: Vec::new(),
		}
	}

	/// Add an alternate lookup name.
	#[must_use]
	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}

	/// Whether `name` refers to this theme, ignoring case.
	#[must_use]
	pub fn answers_to(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
			|| self
				.aliases
				.iter()
				.any(|alias| alias.eq_ignore_ascii_case(name))
	}
}

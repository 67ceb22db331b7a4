//! Visual styling for the listkit widgets.
//!
//! Built-in themes live as TOML documents under `style/themes` and are parsed
//! once on first use.

mod loader;
mod theme;

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};

use loader::{BuiltinThemes, load_builtin_themes};
pub use theme::{Theme, ThemeRegistration};

const BUILTIN_THEME_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/style/themes");

fn builtins() -> &'static BuiltinThemes {
	static BUILTINS: OnceLock<BuiltinThemes> = OnceLock::new();
	BUILTINS.get_or_init(|| {
		load_builtin_themes(&BUILTIN_THEME_DIR)
			.unwrap_or_else(|error| panic!("failed to load built-in themes: {error:#}"))
	})
}

/// The theme marked as default among the built-ins.
#[must_use]
pub fn default_theme() -> Theme {
	builtins().default_theme
}

/// All built-in themes, sorted by file name.
#[must_use]
pub fn builtin_themes() -> &'static [ThemeRegistration] {
	&builtins().registrations
}

/// Names of the built-in themes.
pub fn names() -> impl Iterator<Item = &'static str> {
	builtin_themes()
		.iter()
		.map(|registration| registration.name.as_str())
}

/// Look up a built-in theme by name or alias, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	builtin_themes()
		.iter()
		.find(|registration| registration.answers_to(name.trim()))
		.map(|registration| registration.theme)
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

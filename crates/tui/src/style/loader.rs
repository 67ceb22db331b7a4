//! Parsing of the TOML theme definitions bundled in `style/themes`.

use anyhow::{Context, Result, bail};
use include_dir::{Dir, File};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use super::theme::{Theme, ThemeRegistration};

pub(super) struct BuiltinThemes {
	pub(super) registrations: Vec<ThemeRegistration>,
	pub(super) default_theme: Theme,
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
	name: String,
	#[serde(default)]
	aliases: Vec<String>,
	#[serde(default)]
	default: bool,
	styles: ThemeStyles,
}

#[derive(Debug, Deserialize)]
struct ThemeStyles {
	header: StyleSpec,
	row_highlight: StyleSpec,
	prompt: StyleSpec,
	empty: StyleSpec,
	highlight: StyleSpec,
	selected: StyleSpec,
	moving: StyleSpec,
	pinned: StyleSpec,
	settling: StyleSpec,
}

impl ThemeStyles {
	fn into_theme(self, context: &str) -> Result<Theme> {
		let style = |spec: &StyleSpec, field: &str| spec.to_style(&format!("{context}.{field}"));
		Ok(Theme {
			header: style(&self.header, "header")?,
			row_highlight: style(&self.row_highlight, "row_highlight")?,
			prompt: style(&self.prompt, "prompt")?,
			empty: style(&self.empty, "empty")?,
			highlight: style(&self.highlight, "highlight")?,
			selected: style(&self.selected, "selected")?,
			moving: style(&self.moving, "moving")?,
			pinned: style(&self.pinned, "pinned")?,
			settling: style(&self.settling, "settling")?,
		})
	}
}

#[derive(Debug, Deserialize)]
struct StyleSpec {
	#[serde(default)]
	fg: Option<String>,
	#[serde(default)]
	bg: Option<String>,
	#[serde(default)]
	modifiers: Vec<String>,
}

impl StyleSpec {
	fn to_style(&self, context: &str) -> Result<Style> {
		let mut style = Style::new();
		if let Some(fg) = &self.fg {
			style = style.fg(parse_color(fg)
				.with_context(|| format!("{context}: invalid foreground colour `{fg}`"))?);
		}
		if let Some(bg) = &self.bg {
			style = style.bg(parse_color(bg)
				.with_context(|| format!("{context}: invalid background colour `{bg}`"))?);
		}
		for modifier in &self.modifiers {
			style = style.add_modifier(
				parse_modifier(modifier)
					.with_context(|| format!("{context}: invalid modifier `{modifier}`"))?,
			);
		}
		Ok(style)
	}
}

pub(super) fn load_builtin_themes(dir: &Dir) -> Result<BuiltinThemes> {
	let mut files: Vec<&File> = dir.files().collect();
	files.sort_by(|a, b| a.path().cmp(b.path()));

	let mut registrations = Vec::new();
	let mut default_name: Option<String> = None;
	let mut default_theme = None;

	for file in files {
		let path = file.path();
		let contents = file
			.contents_utf8()
			.with_context(|| format!("{path:?} is not valid UTF-8"))?;
		let parsed: ThemeFile = toml::from_str(contents)
			.with_context(|| format!("failed to parse built-in theme {path:?}"))?;

		let theme = parsed.styles.into_theme(&format!("{path:?}"))?;
		if parsed.default {
			if let Some(existing) = &default_name {
				bail!(
					"built-in themes `{existing}` and `{}` are both marked default",
					parsed.name
				);
			}
			default_name = Some(parsed.name.clone());
			default_theme = Some(theme);
		}

		let registration = parsed
			.aliases
			.iter()
			.map(|alias| alias.trim())
			.filter(|alias| !alias.is_empty())
			.fold(ThemeRegistration::new(parsed.name, theme), |registration, alias| {
				registration.alias(alias)
			});
		registrations.push(registration);
	}

	let Some(default_theme) =
		default_theme.or_else(|| registrations.first().map(|registration| registration.theme))
	else {
		bail!("no built-in theme definitions were found");
	};

	Ok(BuiltinThemes {
		registrations,
		default_theme,
	})
}

fn parse_color(input: &str) -> Result<Color> {
	let value = input.trim();
	if let Some(hex) = value.strip_prefix('#') {
		return parse_hex(hex);
	}
	if let Ok(index) = value.parse::<u8>() {
		return Ok(Color::Indexed(index));
	}

	Ok(match normalise_key(value).as_str() {
		"reset" | "default" => Color::Reset,
		"black" => Color::Black,
		"red" => Color::Red,
		"green" => Color::Green,
		"yellow" => Color::Yellow,
		"blue" => Color::Blue,
		"magenta" => Color::Magenta,
		"cyan" => Color::Cyan,
		"gray" | "grey" => Color::Gray,
		"dark_gray" | "dark_grey" => Color::DarkGray,
		"white" => Color::White,
		other => bail!("unknown colour `{other}`"),
	})
}

fn parse_hex(hex: &str) -> Result<Color> {
	if hex.len() != 6 || !hex.is_ascii() {
		bail!("hex colours must be 6 characters long");
	}
	let channel = |range: std::ops::Range<usize>| {
		u8::from_str_radix(&hex[range], 16).with_context(|| format!("invalid hex colour `#{hex}`"))
	};
	Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_modifier(input: &str) -> Result<Modifier> {
	Ok(match normalise_key(input).as_str() {
		"bold" => Modifier::BOLD,
		"dim" => Modifier::DIM,
		"italic" => Modifier::ITALIC,
		"underline" | "underlined" => Modifier::UNDERLINED,
		"reversed" | "reverse" => Modifier::REVERSED,
		"crossed_out" | "strikethrough" => Modifier::CROSSED_OUT,
		other => bail!("unknown modifier `{other}`"),
	})
}

fn normalise_key(value: &str) -> String {
	value
		.trim()
		.to_ascii_lowercase()
		.replace(['-', ' '], "_")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_colours_and_modifiers() {
		assert_eq!(parse_color("#ff8000").expect("hex"), Color::Rgb(255, 128, 0));
		assert_eq!(parse_color("Dark-Gray").expect("name"), Color::DarkGray);
		assert_eq!(parse_color("42").expect("index"), Color::Indexed(42));
		assert!(parse_color("#fff").is_err());
		assert_eq!(parse_modifier("Underline").expect("modifier"), Modifier::UNDERLINED);
	}
}

//! Layered configuration.
//!
//! Sources are merged in order, later ones winning: the platform
//! `config.toml`, `./.listkit.toml`, `./listkit.toml`, files passed with
//! `--config`, `LISTKIT__SECTION__KEY` environment variables, and finally
//! command-line flags.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use config::{Config, ConfigError, File};
use listkit_core::{Orientation, SelectConfig, SortableConfig};
use listkit_tui::Theme;
use serde::Deserialize;

use crate::app_dirs;
use crate::cli::{CliArgs, Command, SelectArgs};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	select: SelectSection,
	sortable: SortableSection,
	ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SelectSection {
	multiple: Option<bool>,
	exclude_selected_options: Option<bool>,
	hide_before_search: Option<bool>,
	max_results: Option<usize>,
	search_debounce_ms: Option<u64>,
	ignore_diacritics: Option<bool>,
	auto_highlight: Option<bool>,
	search_command: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SortableSection {
	orientation: Option<String>,
	drag_throttle_ms: Option<u64>,
	settle_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	theme: Option<String>,
	title: Option<String>,
	prompt: Option<String>,
	initial_query: Option<String>,
}

pub(crate) struct ResolvedConfig {
	pub(crate) select: SelectConfig,
	pub(crate) sortable: SortableConfig,
	pub(crate) search_command: Option<String>,
	pub(crate) theme_name: Option<String>,
	pub(crate) theme: Theme,
	pub(crate) title: Option<String>,
	pub(crate) prompt: Option<String>,
	pub(crate) initial_query: String,
}

impl ResolvedConfig {
	pub(crate) fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Multiple: {}", bool_to_word(self.select.multiple));
		println!(
			"  Exclude selected: {}",
			bool_to_word(self.select.exclude_selected_options)
		);
		println!(
			"  Hide before search: {}",
			bool_to_word(self.select.hide_before_search)
		);
		match self.select.result_limit() {
			Some(limit) => println!("  Max results: {limit}"),
			None => println!("  Max results: unlimited"),
		}
		println!("  Search debounce: {}ms", self.select.search_debounce_ms);
		println!(
			"  Ignore diacritics: {}",
			bool_to_word(self.select.ignore_diacritics)
		);
		println!(
			"  Auto highlight: {}",
			bool_to_word(self.select.auto_highlight)
		);
		if let Some(command) = &self.search_command {
			println!("  Search command: {command}");
		}
		println!(
			"  Orientation: {}",
			match self.sortable.orientation {
				Orientation::Vertical => "vertical",
				Orientation::Horizontal => "horizontal",
			}
		);
		println!("  Drag throttle: {}ms", self.sortable.drag_throttle_ms);
		println!("  Settle delay: {}ms", self.sortable.settle_delay_ms);
		println!(
			"  UI theme: {}",
			self.theme_name
				.as_deref()
				.unwrap_or("(use the library default)")
		);
		if let Some(title) = &self.title {
			println!("  Title: {title}");
		}
		if let Some(prompt) = &self.prompt {
			println!("  Prompt: {prompt}");
		}
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
	}
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("listkit")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(file) = app_dirs::config_file() {
		files.push(file);
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".listkit.toml"));
		files.push(current_dir.join("listkit.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}

		match &cli.command {
			Some(Command::Pick(args)) => {
				self.apply_select_overrides(&args.select);
				if let Some(title) = args.title.clone() {
					self.ui.title = Some(title);
				}
			}
			Some(Command::Filter(args)) => self.apply_select_overrides(&args.select),
			Some(Command::Sort(args)) => {
				if args.horizontal {
					self.sortable.orientation = Some("horizontal".to_string());
				}
				if let Some(title) = args.title.clone() {
					self.ui.title = Some(title);
				}
			}
			None => {}
		}
	}

	fn apply_select_overrides(&mut self, args: &SelectArgs) {
		if args.multiple {
			self.select.multiple = Some(true);
		}
		if args.exclude_selected {
			self.select.exclude_selected_options = Some(true);
		}
		if args.hide_before_search {
			self.select.hide_before_search = Some(true);
		}
		if args.ignore_diacritics {
			self.select.ignore_diacritics = Some(true);
		}
		if args.auto_highlight {
			self.select.auto_highlight = Some(true);
		}
		if let Some(value) = args.max_results {
			self.select.max_results = Some(value);
		}
		if let Some(value) = args.debounce_ms {
			self.select.search_debounce_ms = Some(value);
		}
		if let Some(command) = args.search_cmd.clone() {
			self.select.search_command = Some(command);
		}
		if let Some(query) = args.query.clone() {
			self.ui.initial_query = Some(query);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let defaults = SelectConfig::default();
		let select = SelectConfig {
			multiple: self.select.multiple.unwrap_or(defaults.multiple),
			exclude_selected_options: self
				.select
				.exclude_selected_options
				.unwrap_or(defaults.exclude_selected_options),
			hide_before_search: self
				.select
				.hide_before_search
				.unwrap_or(defaults.hide_before_search),
			max_results: self.select.max_results.or(defaults.max_results),
			search_debounce_ms: self
				.select
				.search_debounce_ms
				.unwrap_or(defaults.search_debounce_ms),
			ignore_diacritics: self
				.select
				.ignore_diacritics
				.unwrap_or(defaults.ignore_diacritics),
			auto_highlight: self.select.auto_highlight.unwrap_or(defaults.auto_highlight),
		};

		let sortable_defaults = SortableConfig::default();
		let sortable = SortableConfig {
			orientation: match self.sortable.orientation.as_deref() {
				Some(value) => parse_orientation(value)?,
				None => sortable_defaults.orientation,
			},
			drag_throttle_ms: self
				.sortable
				.drag_throttle_ms
				.unwrap_or(sortable_defaults.drag_throttle_ms),
			settle_delay_ms: self
				.sortable
				.settle_delay_ms
				.unwrap_or(sortable_defaults.settle_delay_ms),
		};

		let theme_name = self
			.ui
			.theme
			.map(|name| name.trim().to_string())
			.filter(|name| !name.is_empty());
		let theme = match theme_name.as_deref() {
			Some(name) => listkit_tui::style::by_name(name).ok_or_else(|| {
				let available: Vec<_> = listkit_tui::style::names().collect();
				anyhow!(
					"unknown theme '{name}' (available: {})",
					available.join(", ")
				)
			})?,
			None => listkit_tui::default_theme(),
		};

		let search_command = self
			.select
			.search_command
			.map(|command| command.trim().to_string())
			.filter(|command| !command.is_empty());

		Ok(ResolvedConfig {
			select,
			sortable,
			search_command,
			theme_name,
			theme,
			title: self.ui.title,
			prompt: self.ui.prompt,
			initial_query: self.ui.initial_query.unwrap_or_default(),
		})
	}
}

fn parse_orientation(value: &str) -> Result<Orientation> {
	match value.trim().to_ascii_lowercase().as_str() {
		"vertical" => Ok(Orientation::Vertical),
		"horizontal" => Ok(Orientation::Horizontal),
		other => bail!("unknown orientation '{other}'"),
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use tempfile::tempdir;

	use super::*;

	fn parse(args: &[&str]) -> CliArgs {
		CliArgs::try_parse_from(args).expect("parse")
	}

	#[test]
	fn config_file_sections_are_applied() {
		let dir = tempdir().expect("temp dir");
		let path = dir.path().join("listkit.toml");
		fs::write(
			&path,
			r#"
[select]
multiple = true
max_results = 5
search_debounce_ms = 120

[sortable]
orientation = "horizontal"
settle_delay_ms = 300

[ui]
theme = "light"
title = "Fruit"
"#,
		)
		.expect("write config");

		let config_path = path.to_string_lossy().into_owned();
		let cli = parse(&["listkit", "--no-config", "--config", &config_path, "filter"]);
		let resolved = load(&cli).expect("load");

		assert!(resolved.select.multiple);
		assert_eq!(resolved.select.result_limit(), Some(5));
		assert_eq!(resolved.select.search_debounce_ms, 120);
		assert_eq!(resolved.sortable.orientation, Orientation::Horizontal);
		assert_eq!(resolved.sortable.settle_delay_ms, 300);
		assert_eq!(resolved.sortable.drag_throttle_ms, 16);
		assert_eq!(Some(resolved.theme), listkit_tui::style::by_name("slate"));
		assert_eq!(resolved.title.as_deref(), Some("Fruit"));
	}

	#[test]
	fn command_line_flags_override_files() {
		let dir = tempdir().expect("temp dir");
		let path = dir.path().join("listkit.toml");
		fs::write(&path, "[select]\nmax_results = 5\n[ui]\ninitial_query = \"a\"\n")
			.expect("write config");

		let config_path = path.to_string_lossy().into_owned();
		let cli = parse(&[
			"listkit",
			"--no-config",
			"--config",
			&config_path,
			"pick",
			"--max-results",
			"0",
			"--query",
			"b",
			"--exclude-selected",
		]);
		let resolved = load(&cli).expect("load");

		assert_eq!(resolved.select.result_limit(), None);
		assert!(resolved.select.exclude_selected_options);
		assert_eq!(resolved.initial_query, "b");
	}

	#[test]
	fn unknown_values_are_rejected() {
		let cli = parse(&["listkit", "--no-config", "--theme", "neon", "filter"]);
		let err = load(&cli).err().expect("unknown theme");
		assert!(err.to_string().contains("unknown theme 'neon'"));

		assert!(parse_orientation("Diagonal").is_err());
		assert_eq!(parse_orientation(" Horizontal ").expect("parse"), Orientation::Horizontal);
	}

	#[test]
	fn missing_explicit_config_is_an_error() {
		let dir = tempdir().expect("temp dir");
		let missing = dir.path().join("absent.toml");
		let missing = missing.to_string_lossy().into_owned();
		let cli = parse(&["listkit", "--no-config", "--config", &missing, "filter"]);
		assert!(load(&cli).is_err());
	}
}

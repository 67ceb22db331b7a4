//! Runs the selected subcommand against the resolved configuration.

use std::collections::HashSet;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use listkit_core::select::normalize::normalize_query;
use listkit_core::{SearchProvider, SelectController, SelectOption, SortableController, SortableItem};
use listkit_tui::{Picker, Sorter, run_app};

use crate::cli::{
	Command, FilterArgs, OutputFormat, PickArgs, SortArgs, format_filter, format_pick, format_sort,
};
use crate::search_cmd::CommandSearch;
use crate::settings::ResolvedConfig;
use crate::sources::read_options;

/// Execute `command` and print its result. Returns whether the user
/// accepted the outcome.
pub(crate) fn run(command: &Command, format: OutputFormat, settings: &ResolvedConfig) -> Result<bool> {
	match command {
		Command::Pick(args) => pick(args, format, settings),
		Command::Sort(args) => sort(args, format, settings),
		Command::Filter(args) => filter(args, format, settings),
	}
}

fn pick(args: &PickArgs, format: OutputFormat, settings: &ResolvedConfig) -> Result<bool> {
	let options = read_options(&args.select.input)?;
	let mut controller = SelectController::new(options, settings.select.clone());
	if let Some(command) = &settings.search_command {
		tracing::info!(%command, "using external search command");
		controller = controller.with_provider(CommandSearch::new(command.clone()));
	}
	if !settings.initial_query.is_empty() {
		controller.set_query(settings.initial_query.clone(), Instant::now());
	}

	let mut picker = Picker::new(controller).with_theme(settings.theme);
	if let Some(title) = &settings.title {
		picker = picker.with_title(title.clone());
	}
	if let Some(prompt) = &settings.prompt {
		picker = picker.with_prompt(prompt.clone());
	}

	let outcome = run_app(&mut picker).context("picker session failed")?;
	tracing::info!(
		accepted = outcome.accepted,
		selected = outcome.selected.len(),
		"pick finished"
	);
	emit(&format_pick(&outcome, format)?)?;
	Ok(outcome.accepted)
}

fn sort(args: &SortArgs, format: OutputFormat, settings: &ResolvedConfig) -> Result<bool> {
	let options = read_options(&args.input)?;
	let pinned: HashSet<&str> = args.pinned.iter().map(String::as_str).collect();
	let items = options.into_iter().map(|option| {
		if pinned.contains(option.label.as_str()) || pinned.contains(option.key.as_str()) {
			SortableItem::pinned(option)
		} else {
			SortableItem::new(option)
		}
	});
	let controller = SortableController::new(items, settings.sortable.clone());

	let mut sorter = Sorter::new(controller, |option: &SelectOption| option.label.clone())
		.with_theme(settings.theme);
	if let Some(title) = &settings.title {
		sorter = sorter.with_title(title.clone());
	}

	let outcome = run_app(&mut sorter).context("sorter session failed")?;
	tracing::info!(accepted = outcome.accepted, "sort finished");
	emit(&format_sort(&outcome, format)?)?;
	Ok(outcome.accepted)
}

fn filter(args: &FilterArgs, format: OutputFormat, settings: &ResolvedConfig) -> Result<bool> {
	let mut options = read_options(&args.select.input)?;
	let query = settings.initial_query.as_str();

	if let Some(command) = &settings.search_command {
		let normalized = normalize_query(query, settings.select.ignore_diacritics);
		match CommandSearch::new(command.clone()).search(&options, &normalized) {
			Ok(found) => options = found,
			Err(err) => {
				tracing::warn!(%err, "search command failed; filtering the input instead");
			}
		}
	}

	let mut controller = SelectController::new(options, settings.select.clone());
	controller.set_query(query, Instant::now());
	emit(&format_filter(query, controller.filtered(), format)?)?;
	Ok(true)
}

fn emit(text: &str) -> Result<()> {
	let mut stdout = io::stdout().lock();
	stdout
		.write_all(text.as_bytes())
		.context("failed to write output")?;
	stdout.flush().context("failed to flush output")
}

mod app_dirs;
mod cli;
mod logging;
mod search_cmd;
mod settings;
mod sources;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use cli::parse_cli;

fn main() -> Result<ExitCode> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in listkit_tui::style::names() {
			println!("{name}");
		}
		return Ok(ExitCode::SUCCESS);
	}

	let _logging = logging::init();

	let resolved = settings::load(&cli)?;
	if cli.print_config {
		resolved.print_summary();
	}

	let Some(command) = &cli.command else {
		if !cli.print_config {
			cli::print_help()?;
		}
		return Ok(ExitCode::SUCCESS);
	};

	let accepted = workflow::run(command, cli.output, &resolved)?;
	Ok(if accepted {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

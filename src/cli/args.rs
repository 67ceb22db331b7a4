use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{
	ArgAction, Args, ColorChoice, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};

use crate::app_dirs;

/// Full version banner including the config and data directories.
fn long_version() -> &'static str {
	let config_file = match app_dirs::config_file() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("listkit {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config file: {config_file}");
	let _ = writeln!(details, "log directory: {}", app_dirs::log_dir().display());

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

pub(crate) fn print_help() -> Result<()> {
	CliArgs::command().print_help()?;
	Ok(())
}

#[derive(Parser, Debug)]
#[command(
	name = "listkit",
	version,
	long_version = long_version(),
	about = "Filterable pickers and reorderable lists for the terminal",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `listkit` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "LISTKIT_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'o',
		long,
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Output format for the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		long,
		value_name = "THEME",
		global = true,
		help = "Select a theme by name (default: library theme)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long,
		global = true,
		help = "Print the resolved configuration before running"
	)]
	pub(crate) print_config: bool,
	#[arg(long, help = "List the built-in themes and exit")]
	pub(crate) list_themes: bool,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
	/// Interactively pick one or more options.
	Pick(PickArgs),
	/// Interactively reorder the input items.
	Sort(SortArgs),
	/// Print the options matching a query without opening the UI.
	Filter(FilterArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct SelectArgs {
	#[arg(
		short = 'i',
		long,
		value_name = "FILE",
		default_value = "-",
		help = "Options as a JSON array or one label per line ('-' reads stdin)"
	)]
	pub(crate) input: PathBuf,
	#[arg(short = 'm', long, help = "Allow several selections")]
	pub(crate) multiple: bool,
	#[arg(long, help = "Hide options that are already selected")]
	pub(crate) exclude_selected: bool,
	#[arg(long, help = "Show nothing until a query is typed")]
	pub(crate) hide_before_search: bool,
	#[arg(long, value_name = "N", help = "Cap the number of listed options (0: unlimited)")]
	pub(crate) max_results: Option<usize>,
	#[arg(long, value_name = "MS", help = "Quiet period before the search command runs")]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(long, help = "Match accented and unaccented letters alike")]
	pub(crate) ignore_diacritics: bool,
	#[arg(long, help = "Highlight the first option whenever the list opens")]
	pub(crate) auto_highlight: bool,
	#[arg(
		long,
		value_name = "CMD",
		help = "Shell command producing options for a query (query passed as last argument)"
	)]
	pub(crate) search_cmd: Option<String>,
	#[arg(short = 'q', long, value_name = "QUERY", help = "Initial query")]
	pub(crate) query: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct PickArgs {
	#[command(flatten)]
	pub(crate) select: SelectArgs,
	#[arg(short = 't', long, value_name = "TITLE", help = "Title above the option list")]
	pub(crate) title: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct FilterArgs {
	#[command(flatten)]
	pub(crate) select: SelectArgs,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SortArgs {
	#[arg(
		short = 'i',
		long,
		value_name = "FILE",
		default_value = "-",
		help = "Items as a JSON array or one label per line ('-' reads stdin)"
	)]
	pub(crate) input: PathBuf,
	#[arg(long, help = "Lay the items out left to right")]
	pub(crate) horizontal: bool,
	#[arg(
		short = 'p',
		long,
		value_name = "LABEL",
		action = ArgAction::Append,
		help = "Pin an item in place (repeatable)"
	)]
	pub(crate) pinned: Vec<String>,
	#[arg(short = 't', long, value_name = "TITLE", help = "Title above the list")]
	pub(crate) title: Option<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

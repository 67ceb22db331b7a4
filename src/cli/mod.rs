mod args;
mod output;

pub(crate) use args::{
	CliArgs, Command, FilterArgs, OutputFormat, PickArgs, SelectArgs, SortArgs, parse_cli,
	print_help,
};
pub(crate) use output::{format_filter, format_pick, format_sort};

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Resolve markdown references against a realm described in mdref.toml.",
	long_about = "mdref exposes the lookups a markdown renderer performs while parsing: user \
	              mentions, user groups, channel links, emoji and linkifiers.\n\nThe realm is \
	              read from mdref.toml (or .mdref.toml, .config/mdref.toml) in the project \
	              root.\n\nQuick start:\n  mdref capabilities             List every lookup\n  \
	              mdref resolve stream_by_name general\n  mdref check                    \
	              Validate the realm config"
)]
pub struct MdrefCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the directory containing the realm config.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List every capability the helpers bundle exposes.
	///
	/// Each line shows the capability name followed by its arguments.
	Capabilities,
	/// Invoke a single capability against the realm.
	///
	/// Arguments are passed positionally, e.g.
	/// `mdref resolve stream_topic_hash 5 "lunch plans"`. The result is
	/// printed as JSON; an unresolved reference prints `null`.
	Resolve {
		/// Capability name, as listed by `mdref capabilities`.
		capability: String,

		/// Positional arguments for the capability.
		///
		/// Put `--` before any value that starts with `-`, e.g.
		/// `mdref resolve user_id_from_name -- -bot`.
		args: Vec<String>,

		/// Output format for the result.
		#[arg(long, value_enum, default_value_t = OutputFormat::Json)]
		format: OutputFormat,
	},
	/// List the linkifiers registered in the realm.
	Linkifiers,
	/// Load the realm config and report what it contains.
	///
	/// Fails when the config cannot be parsed, contains duplicate ids, or
	/// registers a linkifier whose pattern does not compile.
	Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Pretty-printed JSON.
	Json,
	/// Single-line JSON for piping into other tools.
	Compact,
}

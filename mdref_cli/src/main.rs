use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use mdref_cli::Commands;
use mdref_cli::MdrefCli;
use mdref_cli::OutputFormat;
use mdref_core::AnyEmptyResult;
use mdref_core::AnyResult;
use mdref_core::Capability;
use mdref_core::MarkdownHelpers;
use mdref_core::config::RealmConfig;
use mdref_core::invoke;
use mdref_core::memory::Realm;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdrefCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Capabilities) => run_capabilities(),
		Some(Commands::Resolve {
			capability,
			args: capability_args,
			format,
		}) => run_resolve(&args, capability, capability_args, *format),
		Some(Commands::Linkifiers) => run_linkifiers(&args),
		Some(Commands::Check) => run_check(&args),
		None => {
			eprintln!("No subcommand specified. Run `mdref --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<mdref_core::MdrefError>() {
			Ok(mdref_err) => {
				let report: miette::Report = (*mdref_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env("MDREF_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &MdrefCli) -> AnyResult<PathBuf> {
	match &args.path {
		Some(path) => Ok(path.clone()),
		None => Ok(std::env::current_dir()?),
	}
}

fn load_config(args: &MdrefCli) -> AnyResult<RealmConfig> {
	let root = resolve_root(args)?;
	debug!(root = %root.display(), "resolving realm config");

	RealmConfig::load(&root)?.ok_or_else(|| {
		format!(
			"no realm config found in {} (expected mdref.toml, .mdref.toml or \
			 .config/mdref.toml)",
			root.display()
		)
		.into()
	})
}

fn load_realm(args: &MdrefCli) -> AnyResult<Realm> {
	Ok(load_config(args)?.into_realm()?)
}

fn run_capabilities() -> AnyEmptyResult {
	for capability in Capability::ALL {
		let line = format!("{} {}", capability.as_str(), capability.signature());
		println!("{}", line.trim_end());
	}

	Ok(())
}

fn run_resolve(
	args: &MdrefCli,
	capability: &str,
	capability_args: &[String],
	format: OutputFormat,
) -> AnyEmptyResult {
	let capability = Capability::from_str(capability)?;
	let helpers = load_realm(args)?.helpers()?;
	let value = invoke(&helpers, capability, capability_args)?;

	let output = match format {
		OutputFormat::Json => serde_json::to_string_pretty(&value)?,
		OutputFormat::Compact => serde_json::to_string(&value)?,
	};
	println!("{output}");

	Ok(())
}

fn run_linkifiers(args: &MdrefCli) -> AnyEmptyResult {
	let helpers = load_realm(args)?.helpers()?;
	let linkifiers = helpers.linkifier_map();

	let mut count = 0;
	for (pattern, rule) in linkifiers.entries() {
		println!("{} -> {}", colored!(pattern, bold), rule.url_template);
		count += 1;
	}

	if count == 0 {
		println!("No linkifiers registered.");
	}

	Ok(())
}

fn run_check(args: &MdrefCli) -> AnyEmptyResult {
	let config = load_config(args)?;
	let summary = format!(
		"{} user(s), {} group(s), {} channel(s), {} realm emoji, {} linkifier(s)",
		config.users.len(),
		config.groups.len(),
		config.channels.len(),
		config.emoji.realm.len(),
		config.linkifiers.len(),
	);

	// Building the bundle validates ids and linkifier patterns.
	config.into_realm()?.helpers()?;

	println!("{} Realm config is valid: {summary}", colored!("✓", green));

	Ok(())
}

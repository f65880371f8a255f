use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tpf::config::{
	ResolvedConfig, discover_configs, generate_init_template, load_explicit_config,
	load_resolved_config, merge_configs, user_config_path,
};
use tpf::filter::{FilterSet, TransformOptions, scan_plan};
use tpf::input::{ensure_piped, read_plan};
use tpf::logging::{Verbosity, init_logging};

#[derive(Parser)]
#[command(name = "tpf")]
#[command(
	author,
	version,
	about = "Filter noisy blocks out of terraform plan output",
	after_help = "Example: terraform show terraform.tfplan | tpf -f filter.yaml"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Config file that contains filter rules (skips discovery)
	#[arg(short = 'f', long = "file", value_name = "FILE", env = "TPF_FILE", global = true)]
	file: Option<PathBuf>,

	/// Hide heredoc (EOT) blocks globally
	#[arg(short, long, env = "TPF_EOT")]
	eot: bool,

	/// Convert to diff style globally
	#[arg(short, long, env = "TPF_DIFF")]
	diff: bool,

	/// Create a template .tpf.yaml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .tpf.yaml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,

	/// Only log errors
	#[arg(short, long, global = true, conflicts_with = "verbose")]
	quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged filter rules with their source files
	Show,
	/// Check all config files and filter patterns without reading a plan
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(command) = &cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.file.as_deref()),
				ConfigAction::Validate => handle_config_validate(cli.file.as_deref()),
			},
		};
	}

	handle_filter(&cli)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(".tpf.yaml");

	if config_path.exists() && !force {
		anyhow::bail!(".tpf.yaml already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created .tpf.yaml");
	Ok(ExitCode::SUCCESS)
}

fn resolve_config(file: Option<&Path>) -> Result<ResolvedConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_resolved_config(file, &cwd).context("Failed to load configuration")
}

fn handle_filter(cli: &Cli) -> Result<ExitCode> {
	let stdin = std::io::stdin();
	ensure_piped(&stdin)?;

	let config = resolve_config(cli.file.as_deref())?;

	// Compile every pattern before reading input, so a bad rule produces no output
	let filters = FilterSet::build(&config.filters).context("Failed to populate filters")?;

	let plan = read_plan(stdin.lock())?;

	let options = TransformOptions {
		hide_eot: cli.eot || config.eot,
		diff_mode: cli.diff || config.diff,
	};
	tracing::debug!(
		filters = filters.len(),
		hide_eot = options.hide_eot,
		diff_mode = options.diff_mode,
		"scanning plan"
	);

	let outcome = scan_plan(&plan, &filters, options);
	tracing::debug!(
		resources = outcome.stats.resources_matched,
		objects = outcome.stats.objects_hidden,
		object_lines = outcome.stats.object_lines_hidden,
		heredoc_lines = outcome.stats.heredoc_lines_hidden,
		"scan finished"
	);

	let mut stdout = std::io::stdout().lock();
	stdout
		.write_all(outcome.output.as_bytes())
		.and_then(|()| stdout.flush())
		.context("Failed to write filtered plan")?;

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(file: Option<&Path>) -> Result<ExitCode> {
	let config = resolve_config(file)?;

	if config.sources.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");
		for source in &config.sources {
			println!("# Source: {}", source.display());
		}
		println!();
		println!("eot: {}", config.eot);
		println!("diff: {}", config.diff);
		println!("filters:");
		for (resource_type, resource_name, pattern) in config.rules() {
			println!("  {resource_type}.{resource_name}: {pattern}");
		}
		println!();
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(file: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let loaded = match file {
		Some(path) => load_explicit_config(path),
		None => discover_configs(&cwd),
	};

	let configs = match loaded {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	let merged = merge_configs(&configs);
	if let Err(e) = FilterSet::build(&merged.filters) {
		eprintln!("Configuration error: {}", e);
		if let Some(source) = std::error::Error::source(&e) {
			eprintln!("  caused by: {}", source);
		}
		return Ok(ExitCode::FAILURE);
	}

	println!("All configuration files are valid:");
	for loaded in &configs {
		println!(
			"  {} ({} rules)",
			loaded.path.display(),
			loaded.config.rule_count()
		);
	}
	Ok(ExitCode::SUCCESS)
}

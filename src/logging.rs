//! Logging setup for tpf.
//!
//! Everything goes to stderr: stdout carries the filtered plan.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
	/// Errors only.
	Quiet,
	/// Warnings and errors.
	#[default]
	Normal,
	/// Debug and above.
	Verbose,
	/// Everything.
	Trace,
}

impl Verbosity {
	/// Map `-q` and the number of `-v` flags to a verbosity.
	pub fn from_flags(quiet: bool, verbose: u8) -> Self {
		match (quiet, verbose) {
			(true, _) => Verbosity::Quiet,
			(false, 0) => Verbosity::Normal,
			(false, 1) => Verbosity::Verbose,
			(false, _) => Verbosity::Trace,
		}
	}

	/// Convert verbosity to tracing level.
	pub fn to_level(&self) -> Level {
		match self {
			Verbosity::Quiet => Level::ERROR,
			Verbosity::Normal => Level::WARN,
			Verbosity::Verbose => Level::DEBUG,
			Verbosity::Trace => Level::TRACE,
		}
	}
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over `verbosity` when set.
pub fn init_logging(verbosity: Verbosity) {
	let default_filter = format!("tpf={}", verbosity.to_level());

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

	let subscriber = tracing_subscriber::registry().with(env_filter).with(
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_target(false)
			.without_time(),
	);

	// Ignore the error if a subscriber is already installed
	let _ = subscriber.try_init();
}

use std::path::PathBuf;

/// Library-level structured errors for tpf.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum TpfError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigYamlError {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Unsupported config file format (expected .yaml, .yml or .toml): {path}")]
	UnsupportedConfigFormat { path: PathBuf },

	#[error("Invalid filter pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,

	#[error("please use a pipe to pass the input")]
	NotPiped,

	#[error("Failed to read plan from stdin")]
	InputReadError {
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using TpfError.
pub type Result<T> = std::result::Result<T, TpfError>;

use crate::config::types::Config;
use crate::error::{Result, TpfError};
use std::path::Path;

/// Supported config file syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Yaml,
	Toml,
}

impl ConfigFormat {
	/// Pick the syntax from the file extension.
	pub fn from_path(path: &Path) -> Result<Self> {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
			Some("toml") => Ok(ConfigFormat::Toml),
			_ => Err(TpfError::UnsupportedConfigFormat {
				path: path.to_path_buf(),
			}),
		}
	}
}

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let format = ConfigFormat::from_path(path)?;
	let content = std::fs::read_to_string(path).map_err(|source| TpfError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, format, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, format: ConfigFormat, path: &Path) -> Result<Config> {
	match format {
		ConfigFormat::Toml => {
			toml::from_str(content).map_err(|source| TpfError::ConfigParseError {
				path: path.to_path_buf(),
				source,
			})
		}
		ConfigFormat::Yaml => {
			// An empty YAML document deserializes to null, not to an empty map
			if content.trim().is_empty() {
				return Ok(Config::default());
			}
			serde_yaml::from_str(content).map_err(|source| TpfError::ConfigYamlError {
				path: path.to_path_buf(),
				source,
			})
		}
	}
}

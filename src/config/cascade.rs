use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, ResolvedConfig};
use crate::error::{Result, TpfError};
use std::path::{Path, PathBuf};

/// File names looked up in each directory, in order of preference.
pub const CONFIG_FILE_NAMES: [&str; 3] = [".tpf.yaml", ".tpf.yml", ".tpf.toml"];

/// Name of the per-user config file in the home directory.
pub const USER_CONFIG_FILE_NAME: &str = ".tpf.yaml";

/// Environment variable that, if truthy, skips the user config lookup.
pub const NO_USER_CONFIG_ENV: &str = "TPF_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.tpf.yaml`, `.tpf.yml` or `.tpf.toml`
/// 2. If found and `root: true`, stop there
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.tpf.yaml (unless a root config was found or
///    `TPF_NO_USER_CONFIG` is set)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = start_dir.to_path_buf();

	loop {
		if let Some(config_path) = find_config_in(&current_dir) {
			let config = parse_config_file(&config_path)?;
			let is_root = config.root;

			tracing::debug!(path = %config_path.display(), root = is_root, "loaded config");
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if is_root {
				return Ok(configs);
			}
		}

		match current_dir.parent() {
			Some(parent) => current_dir = parent.to_path_buf(),
			None => break,
		}
	}

	if !is_env_truthy(NO_USER_CONFIG_ENV)
		&& let Some(user_config) = load_user_config(&configs)?
	{
		configs.push(user_config);
	}

	Ok(configs)
}

/// First existing config file name in `dir`.
fn find_config_in(dir: &Path) -> Option<PathBuf> {
	CONFIG_FILE_NAMES
		.iter()
		.map(|name| dir.join(name))
		.find(|path| path.is_file())
}

/// Load the user's ~/.tpf.yaml if it exists and wasn't already picked up
/// by the directory walk.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	let user_config_path = user_config_path()?;

	if existing_configs
		.iter()
		.any(|loaded| loaded.path == user_config_path)
	{
		return Ok(None);
	}

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Load exactly one config file, bypassing discovery.
pub fn load_explicit_config(path: &Path) -> Result<Vec<LoadedConfig>> {
	if !path.exists() {
		return Err(TpfError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let config = parse_config_file(path)?;
	Ok(vec![LoadedConfig {
		config,
		path: path.to_path_buf(),
	}])
}

/// Merge multiple configs into a single effective config.
///
/// Configs are expected most specific first: the first config defining a
/// (type, name) rule wins, and the first config setting `eot`/`diff` wins.
pub fn merge_configs(configs: &[LoadedConfig]) -> ResolvedConfig {
	let mut merged = ResolvedConfig::default();
	let mut eot = None;
	let mut diff = None;

	for loaded in configs {
		for (kind, names) in &loaded.config.filters {
			let target = merged.filters.entry(kind.clone()).or_default();
			for (name, pattern) in names {
				target
					.entry(name.clone())
					.or_insert_with(|| pattern.clone());
			}
		}

		eot = eot.or(loaded.config.eot);
		diff = diff.or(loaded.config.diff);
		merged.sources.push(loaded.path.clone());
	}

	merged.eot = eot.unwrap_or(false);
	merged.diff = diff.unwrap_or(false);
	merged
}

/// Resolve the effective config: the explicit file if given, otherwise the
/// cascade starting at `start_dir`.
pub fn load_resolved_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ResolvedConfig> {
	let configs = match explicit {
		Some(path) => load_explicit_config(path)?,
		None => discover_configs(start_dir)?,
	};

	if configs.is_empty() {
		tracing::warn!("no filter configuration found, only heredoc/diff rewriting applies");
	}

	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(TpfError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(USER_CONFIG_FILE_NAME))
}

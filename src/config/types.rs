use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Filter rules: resource type -> resource name -> object name pattern.
///
/// A `BTreeMap` keeps (type, name) iteration sorted, so the matcher list
/// built from it is the same on every run.
pub type FilterRules = BTreeMap<String, BTreeMap<String, String>>;

/// Top-level configuration from a `.tpf.yaml` (or `.tpf.toml`) file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and skip the user config.
	#[serde(default)]
	pub root: bool,

	/// Default for hiding heredoc (EOT) contents.
	#[serde(default)]
	pub eot: Option<bool>,

	/// Default for diff-style sign placement.
	#[serde(default)]
	pub diff: Option<bool>,

	/// Object sub-blocks to hide, keyed by resource type then resource name.
	/// The value is a regex fragment matched against the quoted object name.
	#[serde(default)]
	pub filters: FilterRules,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective configuration after merging every file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
	/// Merged filter rules (most specific file wins per type/name).
	pub filters: FilterRules,

	/// Hide heredoc contents unless overridden on the command line.
	pub eot: bool,

	/// Diff-style output unless overridden on the command line.
	pub diff: bool,

	/// Files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}

impl Config {
	/// Number of (type, name) rules in this config.
	pub fn rule_count(&self) -> usize {
		self.filters.values().map(BTreeMap::len).sum()
	}
}

impl ResolvedConfig {
	/// Iterate over rules as (resource type, resource name, object pattern).
	pub fn rules(&self) -> impl Iterator<Item = (&str, &str, &str)> {
		self.filters.iter().flat_map(|(kind, names)| {
			names
				.iter()
				.map(move |(name, pattern)| (kind.as_str(), name.as_str(), pattern.as_str()))
		})
	}
}

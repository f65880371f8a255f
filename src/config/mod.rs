//! Configuration loading and parsing for tpf.
//!
//! This module handles:
//! - YAML and TOML config file parsing
//! - Directory cascade discovery
//! - Config merging

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	discover_configs, load_explicit_config, load_resolved_config, merge_configs, user_config_path,
};
pub use parser::{ConfigFormat, parse_config_file, parse_config_str};
pub use template::generate_init_template;
pub use types::{Config, FilterRules, LoadedConfig, ResolvedConfig};

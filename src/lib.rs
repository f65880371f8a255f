//! tpf - filter noisy blocks out of terraform plan output.
//!
//! This library provides the core functionality for tpf, including:
//! - Configuration file parsing and cascade discovery
//! - Compiling filter rules into line matchers
//! - Scanning plan text, hiding matched object sub-blocks behind summaries
//! - Optional heredoc hiding and diff-style sign placement
//!
//! # Example
//!
//! ```
//! use tpf::config::FilterRules;
//! use tpf::filter::{FilterSet, TransformOptions, scan};
//!
//! let mut rules = FilterRules::new();
//! rules
//!     .entry("helm_release".to_string())
//!     .or_default()
//!     .insert("argocd".to_string(), "customresourcedefinition.*".to_string());
//! let filters = FilterSet::build(&rules).unwrap();
//!
//! let plan = concat!(
//!     "  ~ resource \"helm_release\" \"argocd\" {\n",
//!     "          ~ \"customresourcedefinition/applications\" = {\n",
//!     "              + group = \"argoproj.io\"\n",
//!     "            }\n",
//!     "    }\n",
//! );
//! let output = scan(plan, &filters, TransformOptions::default());
//! assert!(output.contains("# (1 lines hidden: 1 to add, 0 to change, 0 to destroy)"));
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod logging;

pub use error::{Result, TpfError};

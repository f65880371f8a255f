//! Plan filtering for tpf.
//!
//! This module handles:
//! - Compiling filter rules into resource/object matchers
//! - Scanning plan text and hiding matched object sub-blocks
//! - Heredoc hiding and diff-style sign placement

pub mod matcher;
pub mod scanner;
pub mod transform;

pub use matcher::{FilterSet, Matcher};
pub use scanner::{
	ObjectStats, ScanOutcome, ScanState, ScanStats, Scanner, Step, scan, scan_plan, split_lines,
};
pub use transform::{LineTransform, TransformOptions, swap_change_sign};

use crate::config::types::FilterRules;
use crate::error::{Result, TpfError};
use regex::Regex;

/// Compiled patterns for one (resource type, resource name, object pattern) rule.
#[derive(Debug, Clone)]
pub struct Matcher {
	/// Resource type the rule was built from, e.g. `helm_release`.
	pub resource_type: String,

	/// Resource name the rule was built from, e.g. `argocd`.
	pub resource_name: String,

	/// Matches the opening line of the resource block.
	pub resource: Regex,

	/// Matches the opening line of an object sub-block to hide. Group 1 is
	/// the object name between the quotes.
	pub object: Regex,
}

impl Matcher {
	/// Compile the resource and object patterns for one rule.
	///
	/// The object pattern is embedded unescaped, so it may use alternation
	/// and wildcards.
	pub fn new(resource_type: &str, resource_name: &str, object_pattern: &str) -> Result<Self> {
		// e.g. `  ~ resource "helm_release" "argocd" {`
		let resource = compile_regex(&format!(
			r#"^  [~+-] resource "{resource_type}" "{resource_name}" \{{$"#
		))?;
		// e.g. `          ~ "customresourcedefinition.apiextensions.k8s.io/..." = {`
		let object = compile_regex(&format!(r#"^ +[~+-] "({object_pattern})" += \{{$"#))?;

		Ok(Matcher {
			resource_type: resource_type.to_string(),
			resource_name: resource_name.to_string(),
			resource,
			object,
		})
	}

	/// Check if `line` opens the resource this matcher targets.
	pub fn matches_resource(&self, line: &str) -> bool {
		self.resource.is_match(line)
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| TpfError::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

/// Ordered, immutable list of matchers used by the scanner.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
	matchers: Vec<Matcher>,
}

impl FilterSet {
	/// Build the matcher list from the configured rules.
	///
	/// Matchers come out sorted by (resource type, resource name). Any
	/// pattern that fails to compile aborts the whole build.
	pub fn build(rules: &FilterRules) -> Result<Self> {
		let mut matchers = Vec::new();

		for (resource_type, names) in rules {
			for (resource_name, object_pattern) in names {
				let matcher = Matcher::new(resource_type, resource_name, object_pattern)?;
				tracing::debug!(
					resource_type = %resource_type,
					resource_name = %resource_name,
					object_pattern = %object_pattern,
					"compiled filter"
				);
				matchers.push(matcher);
			}
		}

		Ok(FilterSet { matchers })
	}

	/// Find the first matcher whose resource pattern matches `line`.
	pub fn find_resource(&self, line: &str) -> Option<&Matcher> {
		self.matchers.iter().find(|m| m.matches_resource(line))
	}

	pub fn matchers(&self) -> &[Matcher] {
		&self.matchers
	}

	pub fn len(&self) -> usize {
		self.matchers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.matchers.is_empty()
	}
}

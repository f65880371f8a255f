use regex::Regex;
use std::sync::LazyLock;

/// A leading change sign preceded by indentation and followed by a space.
static CHANGE_SIGN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^( +)([+~-]) (.*)$").expect("change sign pattern is valid")
});

const HEREDOC_MARKER: &str = "EOT";

/// Output switches applied to every line that is not inside a hidden object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
	/// Replace heredoc contents with a hidden-line count.
	pub hide_eot: bool,

	/// Move change signs to the start of the line.
	pub diff_mode: bool,
}

/// Rewrites single lines, tracking heredoc boundaries across calls.
#[derive(Debug, Default)]
pub struct LineTransform {
	options: TransformOptions,
	in_heredoc: bool,
	heredoc_hidden: usize,
	total_heredoc_hidden: usize,
}

impl LineTransform {
	pub fn new(options: TransformOptions) -> Self {
		LineTransform {
			options,
			..Default::default()
		}
	}

	/// Transform one line (without its terminator). `None` means the line
	/// is suppressed.
	pub fn apply(&mut self, line: &str) -> Option<String> {
		if self.in_heredoc {
			return self.apply_in_heredoc(line);
		}

		if line.trim().ends_with(HEREDOC_MARKER) {
			self.in_heredoc = true;
			self.heredoc_hidden = 0;
		}

		if self.options.diff_mode {
			Some(swap_change_sign(line))
		} else {
			Some(line.to_string())
		}
	}

	fn apply_in_heredoc(&mut self, line: &str) -> Option<String> {
		if line.trim().starts_with(HEREDOC_MARKER) {
			self.in_heredoc = false;
			if !self.options.hide_eot {
				return Some(line.to_string());
			}

			tracing::trace!(lines = self.heredoc_hidden, "hid heredoc contents");
			let comment = format!("  # ({} lines hidden)", self.heredoc_hidden);
			return Some(line.replacen(HEREDOC_MARKER, &comment, 1));
		}

		if self.options.hide_eot {
			self.heredoc_hidden += 1;
			self.total_heredoc_hidden += 1;
			None
		} else {
			Some(line.to_string())
		}
	}

	/// Whether the last line seen opened a heredoc that has not closed yet.
	pub fn in_heredoc(&self) -> bool {
		self.in_heredoc
	}

	/// Heredoc lines suppressed so far across the whole input.
	pub fn heredoc_lines_hidden(&self) -> usize {
		self.total_heredoc_hidden
	}
}

/// Move the change sign of `line` to column 0, keeping the indentation
/// after it. A `~` sign additionally gets a `!~` marker in front of the text.
///
/// `   ~ foo = "bar"` becomes `~   !~foo = "bar"`.
pub fn swap_change_sign(line: &str) -> String {
	let Some(caps) = CHANGE_SIGN.captures(line) else {
		return line.to_string();
	};

	let indent = &caps[1];
	let sign = &caps[2];
	let text = &caps[3];

	if sign == "~" {
		format!("~{indent}!~{text}")
	} else {
		format!("{sign}{indent}{text}")
	}
}

use crate::filter::matcher::FilterSet;
use crate::filter::transform::{LineTransform, TransformOptions};
use regex::Regex;

/// The last line of a terraform resource block: `}` indented by 4 spaces.
pub const RESOURCE_END_LINE: &str = "    }";

/// Change counters for one hidden object sub-block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectStats {
	pub hidden: usize,
	pub add: usize,
	pub change: usize,
	pub destroy: usize,
}

impl ObjectStats {
	/// Account for one hidden line whose children sit at `child_indent`.
	fn count(&mut self, line: &str, child_indent: &str) {
		if let Some(rest) = line.strip_prefix(child_indent) {
			match rest.as_bytes().first() {
				Some(b'+') => self.add += 1,
				Some(b'~') => self.change += 1,
				Some(b'-') => self.destroy += 1,
				_ => {}
			}
		}
		self.hidden += 1;
	}

	/// Render the comment that replaces the hidden lines.
	pub fn summary(&self, child_indent: &str) -> String {
		format!(
			"{}# ({} lines hidden: {} to add, {} to change, {} to destroy)",
			child_indent, self.hidden, self.add, self.change, self.destroy
		)
	}
}

/// Where the scanner is relative to the configured blocks.
#[derive(Debug, Clone, Default)]
pub enum ScanState<'a> {
	/// Not inside any matched resource.
	#[default]
	Outside,

	/// Inside a matched resource, looking for an object to hide.
	InResource { object: &'a Regex },

	/// Inside a matched object; lines are counted, not emitted.
	InObject {
		object: &'a Regex,
		child_indent: String,
		close_line: String,
		stats: ObjectStats,
	},
}

/// What to do with the line that drove a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// Pass the line through the line transform.
	Emit,

	/// Drop the line.
	Hide,

	/// Emit this summary, then the line itself unmodified.
	Summary(String),
}

impl<'a> ScanState<'a> {
	/// Compute the next state for `line`. No I/O, no shared state.
	pub fn advance(self, line: &str, filters: &'a FilterSet) -> (ScanState<'a>, Step) {
		match self {
			ScanState::Outside => match filters.find_resource(line) {
				Some(matcher) => {
					tracing::debug!(
						resource_type = %matcher.resource_type,
						resource_name = %matcher.resource_name,
						"entered filtered resource"
					);
					(
						ScanState::InResource {
							object: &matcher.object,
						},
						Step::Emit,
					)
				}
				None => (ScanState::Outside, Step::Emit),
			},
			ScanState::InResource { object } => {
				if line == RESOURCE_END_LINE {
					return (ScanState::Outside, Step::Emit);
				}

				let Some(column) = object
					.captures(line)
					.and_then(|caps| caps.get(1))
					.map(|name| name.start())
				else {
					return (ScanState::InResource { object }, Step::Emit);
				};

				tracing::debug!(line = %line.trim(), "hiding object");
				(
					ScanState::InObject {
						object,
						child_indent: " ".repeat(column + 1),
						close_line: format!("{}}}", " ".repeat(column.saturating_sub(1))),
						stats: ObjectStats::default(),
					},
					Step::Emit,
				)
			}
			ScanState::InObject {
				object,
				child_indent,
				close_line,
				mut stats,
			} => {
				if line == close_line {
					return (
						ScanState::InResource { object },
						Step::Summary(stats.summary(&child_indent)),
					);
				}

				stats.count(line, &child_indent);
				(
					ScanState::InObject {
						object,
						child_indent,
						close_line,
						stats,
					},
					Step::Hide,
				)
			}
		}
	}

	pub fn is_outside(&self) -> bool {
		matches!(self, ScanState::Outside)
	}
}

/// Totals gathered over one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
	pub resources_matched: usize,
	pub objects_hidden: usize,
	pub object_lines_hidden: usize,
	pub heredoc_lines_hidden: usize,

	/// The input ended inside a matched resource or object.
	pub unterminated: bool,

	/// The input ended inside a heredoc.
	pub unterminated_heredoc: bool,
}

/// Result of a finished scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
	pub output: String,
	pub stats: ScanStats,
}

/// Line-by-line rewriter for plan text.
///
/// ```
/// use tpf::config::FilterRules;
/// use tpf::filter::{FilterSet, Scanner, TransformOptions};
///
/// let filters = FilterSet::build(&FilterRules::new()).unwrap();
/// let mut scanner = Scanner::new(&filters, TransformOptions::default());
/// scanner.feed("  + id = \"x\"", "\n");
/// assert_eq!(scanner.finish().output, "  + id = \"x\"\n");
/// ```
#[derive(Debug)]
pub struct Scanner<'a> {
	filters: &'a FilterSet,
	state: ScanState<'a>,
	transform: LineTransform,
	output: String,
	stats: ScanStats,
	/// Terminator for a summary whose closing line has none.
	last_ending: &'static str,
}

impl<'a> Scanner<'a> {
	pub fn new(filters: &'a FilterSet, options: TransformOptions) -> Self {
		Scanner {
			filters,
			state: ScanState::Outside,
			transform: LineTransform::new(options),
			output: String::new(),
			stats: ScanStats::default(),
			last_ending: "\n",
		}
	}

	/// Process one line. `line` excludes its terminator; `ending` is the
	/// terminator (`"\n"`, `"\r\n"` or `""`) reused for every emitted line.
	pub fn feed(&mut self, line: &str, ending: &str) {
		let was_outside = self.state.is_outside();
		let state = std::mem::take(&mut self.state);
		let (next, step) = state.advance(line, self.filters);

		if was_outside && matches!(next, ScanState::InResource { .. }) {
			self.stats.resources_matched += 1;
		}
		self.state = next;

		match step {
			Step::Emit => {
				if let Some(out) = self.transform.apply(line) {
					self.push(&out, ending);
				}
			}
			Step::Hide => self.stats.object_lines_hidden += 1,
			Step::Summary(summary) => {
				self.stats.objects_hidden += 1;
				let summary_ending = if ending.is_empty() {
					self.last_ending
				} else {
					ending
				};
				self.push(&summary, summary_ending);
				self.push(line, ending);
			}
		}

		match ending {
			"\r\n" => self.last_ending = "\r\n",
			"\n" => self.last_ending = "\n",
			_ => {}
		}
	}

	fn push(&mut self, line: &str, ending: &str) {
		self.output.push_str(line);
		self.output.push_str(ending);
	}

	/// Finish the scan. An object still open at this point keeps its
	/// contents hidden and gets no summary.
	pub fn finish(mut self) -> ScanOutcome {
		self.stats.heredoc_lines_hidden = self.transform.heredoc_lines_hidden();

		if self.transform.in_heredoc() {
			self.stats.unterminated_heredoc = true;
			tracing::warn!("input ended inside a heredoc block");
		}

		match &self.state {
			ScanState::Outside => {}
			ScanState::InResource { .. } => {
				self.stats.unterminated = true;
				tracing::warn!("input ended inside a filtered resource block");
			}
			ScanState::InObject {
				close_line, stats, ..
			} => {
				self.stats.unterminated = true;
				tracing::warn!(
					hidden = stats.hidden,
					expected = %close_line,
					"input ended inside a hidden object, its lines were dropped without a summary"
				);
			}
		}

		ScanOutcome {
			output: self.output,
			stats: self.stats,
		}
	}
}

/// Split `text` into (line, terminator) pairs, keeping `\r\n` and `\n`
/// exactly as they appear.
pub fn split_lines(text: &str) -> impl Iterator<Item = (&str, &str)> {
	text.split_inclusive('\n').map(|chunk| {
		if let Some(line) = chunk.strip_suffix("\r\n") {
			(line, "\r\n")
		} else if let Some(line) = chunk.strip_suffix('\n') {
			(line, "\n")
		} else {
			(chunk, "")
		}
	})
}

/// Run a full scan over `text`.
pub fn scan_plan(text: &str, filters: &FilterSet, options: TransformOptions) -> ScanOutcome {
	let mut scanner = Scanner::new(filters, options);
	for (line, ending) in split_lines(text) {
		scanner.feed(line, ending);
	}
	scanner.finish()
}

/// Run a full scan and return only the rewritten text.
pub fn scan(text: &str, filters: &FilterSet, options: TransformOptions) -> String {
	scan_plan(text, filters, options).output
}

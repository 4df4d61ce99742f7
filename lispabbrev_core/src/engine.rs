use crate::AbbrevTable;
use crate::CallPosition;
use crate::Candidate;
use crate::ContextClassifier;
use crate::EditorContext;
use crate::Fragment;
use crate::Rejection;
use crate::Template;

/// Extra indentation for body lines of a skeleton, relative to the paren
/// that opens the expanded form.
pub const BODY_INDENT: usize = 2;

/// The result of a single expansion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionOutcome {
	/// Nothing changed in the buffer.
	Rejected(Rejection),
	Expanded(Expansion),
}

impl ExpansionOutcome {
	pub fn is_expanded(&self) -> bool {
		matches!(self, Self::Expanded(_))
	}

	pub fn expansion(&self) -> Option<&Expansion> {
		match self {
			Self::Expanded(expansion) => Some(expansion),
			Self::Rejected(_) => None,
		}
	}

	/// Whether the host should drop the key that triggered the attempt.
	pub fn suppress_insert(&self) -> bool {
		self.expansion()
			.is_some_and(|expansion| expansion.suppress_insert)
	}
}

/// A completed expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
	/// The trigger that was replaced.
	pub trigger: String,
	/// Character index where the trigger started and the text was inserted.
	pub start: usize,
	/// The inserted text.
	pub text: String,
	/// Point stops in insertion order, as character indices.
	pub stops: Vec<usize>,
	/// Where point was left.
	pub point: usize,
	/// True when the space that triggered the expansion should not be
	/// inserted because the template already supplied the spacing. Any other
	/// key goes after the inserted text.
	pub suppress_insert: bool,
}

impl Expansion {
	/// Character index just after the inserted text.
	pub fn end(&self) -> usize {
		self.start + self.text.chars().count()
	}

	/// The first stop after `point`, wrapping to the first stop.
	pub fn next_stop(&self, point: usize) -> Option<usize> {
		self.stops
			.iter()
			.copied()
			.find(|stop| *stop > point)
			.or_else(|| self.stops.first().copied())
	}
}

/// Text ready for insertion, with stops relative to its start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Rendered {
	text: String,
	stops: Vec<usize>,
}

impl Rendered {
	fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	fn has_padding(&self) -> bool {
		self.text.ends_with([' ', '\t'])
	}

	fn trim_trailing_whitespace(&mut self) {
		let trimmed = self.text.trim_end_matches([' ', '\t']).len();
		self.text.truncate(trimmed);
		let len = self.char_len();
		for stop in &mut self.stops {
			*stop = (*stop).min(len);
		}
	}
}

/// Stateless driver which turns a trigger before point into its expansion.
/// The table passed to [`ExpansionEngine::expand`] is the only state
/// consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpansionEngine {
	classifier: ContextClassifier,
}

impl ExpansionEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn classifier(&self) -> &ContextClassifier {
		&self.classifier
	}

	/// Attempt an expansion for the word before point, called before `typed`
	/// is inserted. A rejection leaves the buffer untouched.
	pub fn expand<C>(&self, table: &AbbrevTable, ctx: &mut C, typed: char) -> ExpansionOutcome
	where
		C: EditorContext + ?Sized,
	{
		let candidate = match self.classifier.candidate(&*ctx, typed) {
			Ok(candidate) => candidate,
			Err(rejection) => {
				tracing::debug!(%rejection, "abbrev rejected");
				return ExpansionOutcome::Rejected(rejection);
			}
		};

		let Some(template) = table.get(&candidate.name) else {
			tracing::debug!(name = %candidate.name, "no abbrev for candidate");
			return ExpansionOutcome::Rejected(Rejection::UnknownTrigger(candidate.name));
		};

		let mut rendered = match (candidate.position, template.short_form()) {
			(CallPosition::FunctionQuote, Some(short)) => {
				Rendered {
					text: short.to_string(),
					stops: Vec::new(),
				}
			}
			_ => render(template, body_indent(&*ctx, &candidate)),
		};

		let padded = rendered.has_padding() || !rendered.stops.is_empty();
		let suppress_insert = typed == ' ' && padded;
		if typed != ' ' {
			rendered.trim_trailing_whitespace();
		}

		ctx.delete(candidate.start..candidate.end);
		ctx.set_point(candidate.start);
		ctx.insert(&rendered.text);

		let stops: Vec<usize> = rendered
			.stops
			.iter()
			.map(|stop| candidate.start + stop)
			.collect();
		let point = stops
			.first()
			.copied()
			.unwrap_or(candidate.start + rendered.char_len());
		ctx.set_point(point);

		let expansion = Expansion {
			trigger: candidate.name,
			start: candidate.start,
			text: rendered.text,
			stops,
			point,
			suppress_insert,
		};

		tracing::debug!(
			trigger = %expansion.trigger,
			text = %expansion.text,
			point = expansion.point,
			"abbrev expanded"
		);

		ExpansionOutcome::Expanded(expansion)
	}
}

/// Indentation for skeleton line breaks: two columns past the paren which
/// opens the expanded form, or past the word itself when there is no paren.
fn body_indent<C>(ctx: &C, candidate: &Candidate) -> usize
where
	C: EditorContext + ?Sized,
{
	let anchor = if ctx.char_before(candidate.start) == Some('(') {
		candidate.start - 1
	} else {
		candidate.start
	};

	ctx.column_at(anchor) + BODY_INDENT
}

fn render(template: &Template, indent: usize) -> Rendered {
	match template {
		Template::Literal(text) => {
			Rendered {
				text: text.clone(),
				stops: Vec::new(),
			}
		}
		Template::Cursor { before, after } => {
			Rendered {
				text: format!("{before}{after}"),
				stops: vec![before.chars().count()],
			}
		}
		Template::Skeleton(skeleton) => {
			let mut rendered = Rendered::default();
			for fragment in skeleton.iter() {
				match fragment {
					Fragment::Text(text) => rendered.text.push_str(text),
					Fragment::Stop => {
						let stop = rendered.char_len();
						rendered.stops.push(stop);
					}
					Fragment::Newline => {
						rendered.text.push('\n');
						rendered
							.text
							.extend(std::iter::repeat_n(' ', indent));
					}
				}
			}

			rendered
		}
	}
}

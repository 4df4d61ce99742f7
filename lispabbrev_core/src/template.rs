use std::fmt;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::AbbrevError;
use crate::AbbrevResult;

/// The marker used for cursor positions in user-facing template strings.
pub const DEFAULT_MARKER: char = '$';

/// The replacement content associated with a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
	/// Plain replacement text. Point lands after the inserted text.
	Literal(String),
	/// Replacement text with a single cursor position between `before` and
	/// `after`.
	Cursor { before: String, after: String },
	/// A multi-fragment template with any number of point stops and
	/// indentation-aware line breaks.
	Skeleton(Skeleton),
}

impl Template {
	pub fn literal(text: impl Into<String>) -> Self {
		Self::Literal(text.into())
	}

	pub fn cursor(before: impl Into<String>, after: impl Into<String>) -> Self {
		Self::Cursor {
			before: before.into(),
			after: after.into(),
		}
	}

	pub fn skeleton(fragments: impl IntoIterator<Item = Fragment>) -> Self {
		Self::Skeleton(Skeleton(fragments.into_iter().collect()))
	}

	/// Build a literal template from a string which may contain at most one
	/// `marker` character. The marker becomes the cursor position and is not
	/// part of the inserted text.
	pub fn parse_marked(trigger: &str, text: &str, marker: char) -> AbbrevResult<Self> {
		let count = text.matches(marker).count();

		match count {
			0 => Ok(Self::literal(text)),
			1 => {
				let (before, after) = text.split_once(marker).unwrap_or((text, ""));
				Ok(Self::cursor(before, after))
			}
			_ => {
				Err(AbbrevError::MultipleMarkers {
					trigger: trigger.to_string(),
					count,
				})
			}
		}
	}

	/// Short name used in listings and JSON output.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Literal(_) => "literal",
			Self::Cursor { .. } => "cursor",
			Self::Skeleton(_) => "skeleton",
		}
	}

	/// The text the template starts with, up to its first point stop.
	pub fn leading_text(&self) -> &str {
		match self {
			Self::Literal(text) => text,
			Self::Cursor { before, .. } => before,
			Self::Skeleton(skeleton) => {
				match skeleton.first() {
					Some(Fragment::Text(text)) => text,
					_ => "",
				}
			}
		}
	}

	/// The bare callable name used after a function quote (`#'`). Returns
	/// `None` when the template does not start with a word.
	pub fn short_form(&self) -> Option<&str> {
		self.leading_text().split_whitespace().next()
	}
}

impl fmt::Display for Template {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(text) => f.write_str(text),
			Self::Cursor { before, after } => write!(f, "{before}{DEFAULT_MARKER}{after}"),
			Self::Skeleton(skeleton) => fmt::Display::fmt(skeleton, f),
		}
	}
}

/// One piece of a [`Skeleton`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
	/// Inserted verbatim.
	Text(String),
	/// A point stop. The first stop receives point after expansion.
	Stop,
	/// A line break followed by the body indentation of the expanded form.
	Newline,
}

impl Fragment {
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}
}

/// Ordered fragments of a structured template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Skeleton(Vec<Fragment>);

impl Skeleton {
	/// Build a skeleton from a string where every `marker` is a stop and
	/// every `\n` is an indented line break.
	pub fn parse_marked(text: &str, marker: char) -> Self {
		let mut fragments = Vec::new();
		let mut pending = String::new();

		for ch in text.chars() {
			if ch != marker && ch != '\n' {
				pending.push(ch);
				continue;
			}

			if !pending.is_empty() {
				fragments.push(Fragment::Text(std::mem::take(&mut pending)));
			}

			fragments.push(if ch == marker {
				Fragment::Stop
			} else {
				Fragment::Newline
			});
		}

		if !pending.is_empty() {
			fragments.push(Fragment::Text(pending));
		}

		Self(fragments)
	}

	/// Number of point stops in the skeleton.
	pub fn stop_count(&self) -> usize {
		self.iter()
			.filter(|fragment| matches!(fragment, Fragment::Stop))
			.count()
	}
}

impl fmt::Display for Skeleton {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for fragment in self.iter() {
			match fragment {
				Fragment::Text(text) => f.write_str(text)?,
				Fragment::Stop => write!(f, "{DEFAULT_MARKER}")?,
				Fragment::Newline => f.write_str("\\n")?,
			}
		}

		Ok(())
	}
}

use std::fmt;

use crate::EditorContext;
use crate::syntax::is_symbol_constituent;
use crate::syntax::is_word_constituent;

/// Where a candidate word sits relative to the surrounding syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPosition {
	/// Directly after `(` or another non-symbol separator such as `/`.
	Call,
	/// Directly after a function quote, `#'`.
	FunctionQuote,
	/// After whitespace, e.g. an argument.
	Argument,
}

/// A run of word constituents ending at point that passed the context gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub name: String,
	/// Character index of the first character of `name`.
	pub start: usize,
	/// Character index just after `name`; always the point.
	pub end: usize,
	pub position: CallPosition,
}

impl Candidate {
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

/// Why an expansion attempt did not fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
	/// The expansion service is not active.
	Inactive,
	/// The typed key continues a symbol rather than ending one.
	SymbolConstituentKey(char),
	/// No word constituents precede point.
	NoCandidate,
	/// Point lies in a string or comment.
	NotCode,
	/// The word is the start of a symbol which continues after point.
	InsideSymbol,
	/// The character before point is not alphabetic.
	NotAlphabetic,
	/// The character before the word rules out this trigger length.
	Prefix,
	/// The word is not a trigger in the table.
	UnknownTrigger(String),
}

impl fmt::Display for Rejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Inactive => f.write_str("expansion is not active"),
			Self::SymbolConstituentKey(ch) => write!(f, "`{ch}` continues a symbol"),
			Self::NoCandidate => f.write_str("no word before point"),
			Self::NotCode => f.write_str("point is inside a string or comment"),
			Self::InsideSymbol => f.write_str("point is inside an existing symbol"),
			Self::NotAlphabetic => f.write_str("the character before point is not alphabetic"),
			Self::Prefix => f.write_str("the word is not in a position where it may expand"),
			Self::UnknownTrigger(name) => write!(f, "`{name}` is not a trigger"),
		}
	}
}

/// Decides whether the word before point may expand when `typed` is
/// inserted.
///
/// All of the following must hold:
///
/// 1. `typed` is not a symbol constituent.
/// 2. Point is in code.
/// 3. Point does not sit inside an existing symbol, and the word start is
///    code when the buffer is scanned from its start.
/// 4. The character before point is alphabetic.
/// 5. A word of two or more characters follows whitespace, the buffer start,
///    or a non-symbol character; a one-character word follows a character
///    which is neither whitespace nor a symbol constituent (`(`, `'`, `/`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextClassifier;

impl ContextClassifier {
	pub fn new() -> Self {
		Self
	}

	pub fn candidate<C>(&self, ctx: &C, typed: char) -> Result<Candidate, Rejection>
	where
		C: EditorContext + ?Sized,
	{
		if is_symbol_constituent(typed) {
			return Err(Rejection::SymbolConstituentKey(typed));
		}

		let end = ctx.point();
		let mut start = end;
		let mut name = Vec::new();
		while let Some(ch) = ctx.char_before(start).filter(|ch| is_word_constituent(*ch)) {
			name.push(ch);
			start -= 1;
		}

		if start == end {
			return Err(Rejection::NoCandidate);
		}

		if !ctx.syntax_at(end).is_code() {
			return Err(Rejection::NotCode);
		}

		if ctx.char_at(end).is_some_and(is_symbol_constituent) || !ctx.syntax_at(start).is_code() {
			return Err(Rejection::InsideSymbol);
		}

		if !ctx.char_before(end).is_some_and(char::is_alphabetic) {
			return Err(Rejection::NotAlphabetic);
		}

		let prev = ctx.char_before(start);
		let allowed = if end - start >= 2 {
			prev.is_none_or(|ch| ch.is_whitespace() || !is_symbol_constituent(ch))
		} else {
			prev.is_some_and(|ch| !ch.is_whitespace() && !is_symbol_constituent(ch))
		};

		if !allowed {
			return Err(Rejection::Prefix);
		}

		let position = if prev == Some('\'') && start >= 2 && ctx.char_before(start - 1) == Some('#')
		{
			CallPosition::FunctionQuote
		} else if prev.is_some_and(|ch| !ch.is_whitespace()) {
			CallPosition::Call
		} else {
			CallPosition::Argument
		};

		name.reverse();

		Ok(Candidate {
			name: name.into_iter().collect(),
			start,
			end,
			position,
		})
	}
}

//! Lisp syntax scanning.
//!
//! The scanner splits source text into spans of code, string literals,
//! comments and character literals. It knows about `"…"` strings with
//! backslash escapes, `;` line comments, `#|…|#` block comments and `?x`
//! character literals for the characters that would otherwise confuse a
//! paren or string scan.

use std::ops::Range;

use logos::Logos;

/// Characters, besides alphanumerics, that may appear inside a symbol.
///
/// `/` is deliberately absent: it separates a namespace from a name (as in
/// `pkg/fn`) and so counts as a boundary for abbreviation triggers.
pub const SYMBOL_PUNCTUATION: &str = "-_*+!?<>=:.&%$^~@";

/// Returns true for characters that may start or continue an abbreviation
/// trigger.
pub fn is_word_constituent(ch: char) -> bool {
	ch.is_alphanumeric()
}

/// Returns true for characters which are part of a symbol name.
pub fn is_symbol_constituent(ch: char) -> bool {
	ch.is_alphanumeric() || SYMBOL_PUNCTUATION.contains(ch)
}

/// Returns true for characters that belong to a complete symbol name,
/// including namespace separators.
pub fn is_symbol_char(ch: char) -> bool {
	is_symbol_constituent(ch) || ch == '/'
}

/// Classification of a position in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxClass {
	Code,
	String,
	Comment,
}

impl SyntaxClass {
	pub fn is_code(self) -> bool {
		self == Self::Code
	}
}

/// Raw tokens produced by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[regex(r#""([^"\\]|\\(.|\n))*""#, allow_greedy = true)]
	String,
	#[regex(r#""([^"\\]|\\(.|\n))*"#, allow_greedy = true)]
	UnterminatedString,
	#[regex(r";[^\n]*", allow_greedy = true)]
	LineComment,
	#[regex(r"#\|([^|]|\|+[^|#])*\|+#", allow_greedy = true)]
	BlockComment,
	#[regex(r"#\|([^|]|\|+[^|#])*\|*", allow_greedy = true)]
	UnterminatedBlockComment,
	#[regex(r#"\?(\\(.|\n)|["();\[\]|])"#)]
	CharLiteral,
	#[regex(r"\\(.|\n)")]
	Escape,
	#[token("?")]
	Question,
	#[token("#")]
	Hash,
	#[regex(r#"[^"?;\\#]+"#, allow_greedy = true)]
	Other,
}

/// The kind of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
	/// Ordinary code, including parens and symbols.
	Code,
	/// A character literal or escaped character. Parens inside do not nest.
	Literal,
	/// A string literal.
	String,
	/// A line comment.
	LineComment,
	/// A block comment.
	BlockComment,
}

/// A contiguous region of source text with a single syntax kind. Ranges are
/// byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
	pub kind: SpanKind,
	pub range: Range<usize>,
	/// False for strings and block comments that run to the end of input.
	pub terminated: bool,
}

impl Span {
	/// Returns the syntax class of a position which falls inside this span,
	/// or `None` when the position is not inside it.
	fn class_at(&self, offset: usize) -> Option<SyntaxClass> {
		let Range { start, end } = self.range;
		if offset <= start || offset > end {
			return None;
		}

		match self.kind {
			SpanKind::Code | SpanKind::Literal => Some(SyntaxClass::Code),
			SpanKind::LineComment => Some(SyntaxClass::Comment),
			SpanKind::String if offset < end || !self.terminated => Some(SyntaxClass::String),
			SpanKind::BlockComment if offset < end || !self.terminated => {
				Some(SyntaxClass::Comment)
			}
			SpanKind::String | SpanKind::BlockComment => None,
		}
	}
}

/// Split `source` into syntax spans. Characters the lexer does not recognize
/// become single-character code spans.
pub fn scan(source: &str) -> Vec<Span> {
	RawToken::lexer(source)
		.spanned()
		.map(|(token, range)| {
			let (kind, terminated) = match token {
				Ok(RawToken::String) => (SpanKind::String, true),
				Ok(RawToken::UnterminatedString) => (SpanKind::String, false),
				Ok(RawToken::LineComment) => (SpanKind::LineComment, true),
				Ok(RawToken::BlockComment) => (SpanKind::BlockComment, true),
				Ok(RawToken::UnterminatedBlockComment) => (SpanKind::BlockComment, false),
				Ok(RawToken::CharLiteral | RawToken::Escape) => (SpanKind::Literal, true),
				Ok(RawToken::Question | RawToken::Hash | RawToken::Other) | Err(()) => {
					(SpanKind::Code, true)
				}
			};

			Span {
				kind,
				range,
				terminated,
			}
		})
		.collect()
}

/// Classify the byte `offset` of `source`, scanning from the start of
/// `source`. A position is inside a string or comment when it lies after the
/// opening delimiter and before the closing one.
pub fn classify(source: &str, offset: usize) -> SyntaxClass {
	let offset = offset.min(source.len());

	for span in scan(source) {
		if span.range.start >= offset {
			break;
		}

		if let Some(class) = span.class_at(offset) {
			tracing::trace!(?class, offset, "classified position");
			return class;
		}
	}

	SyntaxClass::Code
}

/// Find the byte offset of the top-level form enclosing `offset`: the
/// closest line at or before `offset` which starts with `(` in column zero,
/// where that `(` is code rather than part of a string or comment. Returns
/// `0` when there is none.
pub fn top_level_start(source: &str, offset: usize) -> usize {
	let offset = floor_char_boundary(source, offset.min(source.len()));
	let mut line_start = source[..offset].rfind('\n').map_or(0, |index| index + 1);

	loop {
		if source[line_start..].starts_with('(') && classify(source, line_start).is_code() {
			return line_start;
		}

		if line_start == 0 {
			return 0;
		}

		line_start = source[..line_start - 1]
			.rfind('\n')
			.map_or(0, |index| index + 1);
	}
}

/// Find the byte offset just after the form which opens at or after
/// `start`. Parens inside strings, comments and character literals are
/// ignored. Returns `None` when the form is not closed.
pub fn form_end(source: &str, start: usize) -> Option<usize> {
	let tail = source.get(start..)?;
	let mut depth = 0usize;

	for span in scan(tail) {
		if span.kind != SpanKind::Code {
			continue;
		}

		for (index, ch) in tail[span.range.clone()].char_indices() {
			match ch {
				'(' => depth += 1,
				')' if depth > 0 => {
					depth -= 1;
					if depth == 0 {
						return Some(start + span.range.start + index + 1);
					}
				}
				_ => {}
			}
		}
	}

	None
}

/// Read the symbol starting at byte `offset`. Returns the symbol and the byte
/// offset just after it.
pub fn read_symbol(source: &str, offset: usize) -> Option<(&str, usize)> {
	let rest = source.get(offset..)?;
	let len = rest
		.char_indices()
		.find(|(_, ch)| !is_symbol_char(*ch))
		.map_or(rest.len(), |(index, _)| index);

	(len > 0).then(|| (&rest[..len], offset + len))
}

/// Convert a character index into a byte offset, clamped to the end.
pub fn char_to_byte(source: &str, index: usize) -> usize {
	source
		.char_indices()
		.nth(index)
		.map_or(source.len(), |(offset, _)| offset)
}

/// Convert a byte offset into a character index.
pub fn byte_to_char(source: &str, offset: usize) -> usize {
	let offset = floor_char_boundary(source, offset.min(source.len()));
	source[..offset].chars().count()
}

/// Convert a byte offset into a 1-indexed line and column.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
	let offset = floor_char_boundary(source, offset.min(source.len()));
	let before = &source[..offset];
	let line = before.matches('\n').count() + 1;
	let line_start = before.rfind('\n').map_or(0, |index| index + 1);
	let column = before[line_start..].chars().count() + 1;

	(line, column)
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
	while !source.is_char_boundary(offset) {
		offset -= 1;
	}

	offset
}

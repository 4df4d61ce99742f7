use std::fmt;
use std::ops::Range;

use crate::AbbrevError;
use crate::AbbrevResult;
use crate::EditorContext;
use crate::syntax;
use crate::syntax::SyntaxClass;

/// The character used to show point in rendered buffers.
pub const POINT_MARKER: char = '|';

/// An in-memory Lisp buffer with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
	text: String,
	point: usize,
}

impl TextBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a buffer with point at the end of `text`.
	pub fn from_text(text: impl Into<String>) -> Self {
		let text = text.into();
		let point = text.chars().count();
		Self { text, point }
	}

	/// Create a buffer with point at character index `point`.
	pub fn with_point(text: impl Into<String>, point: usize) -> AbbrevResult<Self> {
		let text = text.into();
		let len = text.chars().count();
		if point > len {
			return Err(AbbrevError::InvalidPoint { point, len });
		}

		Ok(Self { text, point })
	}

	/// Create a buffer from text where the first `marker` shows point. Without
	/// a marker point is at the end.
	pub fn from_marked(input: &str, marker: char) -> Self {
		match input.split_once(marker) {
			Some((before, after)) => {
				Self {
					text: format!("{before}{after}"),
					point: before.chars().count(),
				}
			}
			None => Self::from_text(input),
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn into_text(self) -> String {
		self.text
	}

	/// The buffer text with `marker` inserted at point.
	pub fn render_marked(&self, marker: char) -> String {
		let offset = self.byte_offset(self.point);
		format!("{}{marker}{}", &self.text[..offset], &self.text[offset..])
	}

	fn byte_offset(&self, pos: usize) -> usize {
		syntax::char_to_byte(&self.text, pos)
	}

	fn char_index(&self, offset: usize) -> usize {
		syntax::byte_to_char(&self.text, offset)
	}
}

impl fmt::Display for TextBuffer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render_marked(POINT_MARKER))
	}
}

impl EditorContext for TextBuffer {
	fn point(&self) -> usize {
		self.point
	}

	fn set_point(&mut self, point: usize) {
		self.point = point.min(self.point_max());
	}

	fn point_max(&self) -> usize {
		self.text.chars().count()
	}

	fn char_at(&self, pos: usize) -> Option<char> {
		self.text.chars().nth(pos)
	}

	fn insert(&mut self, text: &str) {
		let offset = self.byte_offset(self.point);
		self.text.insert_str(offset, text);
		self.point += text.chars().count();
	}

	fn delete(&mut self, range: Range<usize>) {
		let max = self.point_max();
		let Range { start, end } = range;
		let (start, end) = (start.min(max), end.min(max));
		if start >= end {
			return;
		}

		let byte_range = self.byte_offset(start)..self.byte_offset(end);
		self.text.replace_range(byte_range, "");

		if self.point >= end {
			self.point -= end - start;
		} else if self.point > start {
			self.point = start;
		}
	}

	fn syntax_at(&self, pos: usize) -> SyntaxClass {
		syntax::classify(&self.text, self.byte_offset(pos))
	}

	fn top_level_start(&self, pos: usize) -> usize {
		let offset = syntax::top_level_start(&self.text, self.byte_offset(pos));
		self.char_index(offset)
	}

	fn contents(&self) -> String {
		self.text.clone()
	}
}

use std::ops::Range;
use std::path::PathBuf;

use crate::syntax::SyntaxClass;

/// The narrow view of a host editor buffer that expansion and navigation
/// need. Positions are character indices, `0..=point_max()`.
pub trait EditorContext {
	/// The current cursor position.
	fn point(&self) -> usize;

	/// Move the cursor. Implementations clamp to the buffer.
	fn set_point(&mut self, point: usize);

	/// The position after the last character.
	fn point_max(&self) -> usize;

	/// The character starting at `pos`, if any.
	fn char_at(&self, pos: usize) -> Option<char>;

	/// Insert `text` at point and leave point after it.
	fn insert(&mut self, text: &str);

	/// Delete the characters in `range`. Point is adjusted as if the text had
	/// never been there.
	fn delete(&mut self, range: Range<usize>);

	/// Whether `pos` lies in code, a string or a comment.
	fn syntax_at(&self, pos: usize) -> SyntaxClass;

	/// The start of the top-level form enclosing `pos`.
	fn top_level_start(&self, pos: usize) -> usize;

	/// The full buffer text.
	fn contents(&self) -> String;

	fn char_before(&self, pos: usize) -> Option<char> {
		pos.checked_sub(1).and_then(|prev| self.char_at(prev))
	}

	/// The zero-based column of `pos`.
	fn column_at(&self, pos: usize) -> usize {
		let mut column = 0;
		let mut cursor = pos;
		while let Some(ch) = self.char_before(cursor) {
			if ch == '\n' {
				break;
			}
			column += 1;
			cursor -= 1;
		}

		column
	}
}

/// A definition known to an external symbol index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
	/// The file holding the definition.
	pub path: PathBuf,
	/// 1-indexed line of the defined name.
	pub line: usize,
	/// 1-indexed column of the defined name.
	pub column: usize,
	/// Character index of the defined name within the file.
	pub point: usize,
}

/// A pre-built, in-memory index of symbol definitions maintained by the
/// host's language tooling.
pub trait SymbolIndex {
	/// All known definitions of `name`, best match first.
	fn definitions(&self, name: &str) -> Vec<Location>;
}

/// An index that knows no definitions.
impl SymbolIndex for () {
	fn definitions(&self, _name: &str) -> Vec<Location> {
		Vec::new()
	}
}

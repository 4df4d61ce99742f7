//! Find-or-define: jump to the definition of the symbol at point, or create a
//! skeletal definition for it when none exists.

use std::ops::Range;

use crate::EditorContext;
use crate::Location;
use crate::SymbolIndex;
use crate::syntax;
use crate::syntax::SpanKind;
use crate::syntax::is_symbol_char;

/// Heads of forms which define the symbol that follows them.
pub const DEFINING_FORMS: &[&str] = &[
	"defun",
	"defmacro",
	"defsubst",
	"defvar",
	"defvar-local",
	"defconst",
	"defcustom",
	"defface",
	"defgroup",
	"defparameter",
	"defgeneric",
	"defmethod",
	"defclass",
	"defstruct",
	"define-minor-mode",
	"define-derived-mode",
	"cl-defun",
	"cl-defmacro",
	"cl-defsubst",
	"cl-defgeneric",
	"cl-defmethod",
	"cl-defstruct",
];

/// Which kind of definition to synthesize when none exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DefinitionKind {
	#[default]
	Function,
	Macro,
	Variable,
	Parameter,
}

impl DefinitionKind {
	/// The defining form used for the skeleton.
	pub fn head(self) -> &'static str {
		match self {
			Self::Function => "defun",
			Self::Macro => "defmacro",
			Self::Variable => "defvar",
			Self::Parameter => "defparameter",
		}
	}

	/// The skeleton for `name` and the character offset of point inside it.
	pub fn skeleton(self, name: &str) -> (String, usize) {
		let head = self.head();
		let prefix = match self {
			Self::Function | Self::Macro => format!("({head} {name} ()\n  "),
			Self::Variable | Self::Parameter => format!("({head} {name} "),
		};
		let cursor = prefix.chars().count();

		(format!("{prefix})"), cursor)
	}
}

/// A definition found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionSite {
	/// The defined symbol.
	pub name: String,
	/// The defining form, e.g. `defun`.
	pub form: String,
	/// Byte offset of the defined name.
	pub offset: usize,
}

/// Find every definition in `source`. Forms inside strings and comments are
/// skipped.
pub fn scan_definitions(source: &str) -> Vec<DefinitionSite> {
	let mut sites = Vec::new();

	for span in syntax::scan(source) {
		if span.kind != SpanKind::Code {
			continue;
		}

		for (index, ch) in source[span.range.clone()].char_indices() {
			if ch != '(' {
				continue;
			}

			let open = span.range.start + index;
			if let Some(site) = definition_at(source, open) {
				sites.push(site);
			}
		}
	}

	sites
}

/// Find the byte offset of the first definition of `name` in `source`.
pub fn find_definition(source: &str, name: &str) -> Option<usize> {
	scan_definitions(source)
		.into_iter()
		.find(|site| site.name == name)
		.map(|site| site.offset)
}

/// Parse `(head name` with `head` a defining form, starting at the `(` at
/// byte `open`. `(cl-defstruct (name …))` style names are accepted.
fn definition_at(source: &str, open: usize) -> Option<DefinitionSite> {
	let (head, after_head) = syntax::read_symbol(source, open + 1)?;
	if !DEFINING_FORMS.contains(&head) {
		return None;
	}

	let rest = &source[after_head..];
	let trimmed = rest.trim_start();
	if trimmed.len() == rest.len() {
		return None;
	}

	let mut offset = after_head + (rest.len() - trimmed.len());
	if trimmed.starts_with('(') {
		offset += 1;
	}

	let (name, _) = syntax::read_symbol(source, offset)?;

	Some(DefinitionSite {
		name: name.to_string(),
		form: head.to_string(),
		offset,
	})
}

/// The symbol at or just before `pos`, with its character range.
pub fn symbol_at<C>(ctx: &C, pos: usize) -> Option<(String, Range<usize>)>
where
	C: EditorContext + ?Sized,
{
	let mut start = pos;
	while ctx.char_before(start).is_some_and(is_symbol_char) {
		start -= 1;
	}

	let mut end = pos;
	while ctx.char_at(end).is_some_and(is_symbol_char) {
		end += 1;
	}

	if start == end {
		return None;
	}

	let name: String = (start..end).filter_map(|index| ctx.char_at(index)).collect();
	Some((name, start..end))
}

/// Points to return to after navigating away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
	entries: Vec<usize>,
}

impl NavigationStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, point: usize) {
		self.entries.push(point);
	}

	/// The most recently recorded point.
	pub fn pop(&mut self) -> Option<usize> {
		self.entries.pop()
	}

	pub fn peek(&self) -> Option<usize> {
		self.entries.last().copied()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// What [`find_or_define`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// There is no symbol at point.
	NoSymbol,
	/// Point moved to a definition in the current buffer.
	Local { name: String, point: usize },
	/// The host should visit a definition found by the symbol index.
	External { name: String, location: Location },
	/// A skeletal definition was inserted at `start`, with point inside it.
	Inserted {
		name: String,
		start: usize,
		point: usize,
	},
}

/// Jump to the definition of the symbol at point, or create one.
///
/// 1. Search the current buffer.
/// 2. Search `index`.
/// 3. Jump to the first match, preferring the buffer, or insert a skeleton of
///    `kind` after the current top-level form.
/// 4. Record the original point on `stack`.
pub fn find_or_define<C, I>(
	ctx: &mut C,
	index: &I,
	stack: &mut NavigationStack,
	kind: DefinitionKind,
) -> NavigationOutcome
where
	C: EditorContext + ?Sized,
	I: SymbolIndex + ?Sized,
{
	let origin = ctx.point();
	let Some((name, _)) = symbol_at(&*ctx, origin) else {
		return NavigationOutcome::NoSymbol;
	};

	let source = ctx.contents();

	if let Some(offset) = find_definition(&source, &name) {
		let point = syntax::byte_to_char(&source, offset);
		stack.push(origin);
		ctx.set_point(point);
		tracing::debug!(%name, point, "jumped to local definition");
		return NavigationOutcome::Local { name, point };
	}

	if let Some(location) = index.definitions(&name).into_iter().next() {
		stack.push(origin);
		tracing::debug!(%name, path = %location.path.display(), "found indexed definition");
		return NavigationOutcome::External { name, location };
	}

	let form_start = syntax::char_to_byte(&source, ctx.top_level_start(origin));
	let form_end = syntax::form_end(&source, form_start)
		.filter(|end| *end >= syntax::char_to_byte(&source, origin))
		.unwrap_or(source.len());
	let start = syntax::byte_to_char(&source, form_end);

	let (skeleton, cursor) = kind.skeleton(&name);
	stack.push(origin);
	ctx.set_point(start);
	ctx.insert(&format!("\n\n{skeleton}"));
	let point = start + 2 + cursor;
	ctx.set_point(point);

	tracing::debug!(%name, start, kind = kind.head(), "inserted definition skeleton");
	NavigationOutcome::Inserted { name, start, point }
}

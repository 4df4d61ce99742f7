use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::AbbrevError;
use crate::AbbrevResult;
use crate::Location;
use crate::SymbolIndex;
use crate::navigation::scan_definitions;
use crate::syntax;

/// Definitions collected from every Lisp source file under a project root.
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
	definitions: BTreeMap<String, Vec<Location>>,
	files: usize,
}

impl DefinitionIndex {
	/// Walk `root`, respecting `.gitignore` and skipping hidden directories,
	/// and index every Lisp source file found.
	pub fn build(root: &Path) -> AbbrevResult<Self> {
		let mut paths = Vec::new();

		for entry in WalkBuilder::new(root).build() {
			let entry = entry.map_err(|e| {
				AbbrevError::DefinitionScan {
					path: root.display().to_string(),
					reason: e.to_string(),
				}
			})?;

			let path = entry.path();
			if entry.file_type().is_some_and(|kind| kind.is_file()) && is_lisp_file(path) {
				paths.push(path.to_path_buf());
			}
		}

		// Sort for deterministic ordering.
		paths.sort();

		let mut sources = Vec::with_capacity(paths.len());
		for path in paths {
			let content = std::fs::read_to_string(&path).map_err(|e| {
				AbbrevError::DefinitionScan {
					path: path.display().to_string(),
					reason: e.to_string(),
				}
			})?;
			sources.push((path, content));
		}

		let index = Self::from_sources(sources);
		tracing::debug!(
			files = index.files,
			symbols = index.len(),
			root = %root.display(),
			"built definition index"
		);

		Ok(index)
	}

	/// Index already loaded sources.
	pub fn from_sources<I, S>(sources: I) -> Self
	where
		I: IntoIterator<Item = (PathBuf, S)>,
		S: AsRef<str>,
	{
		let mut index = Self::default();

		for (path, content) in sources {
			let content = content.as_ref();
			index.files += 1;

			for site in scan_definitions(content) {
				let (line, column) = syntax::line_column(content, site.offset);
				index
					.definitions
					.entry(site.name)
					.or_default()
					.push(Location {
						path: path.clone(),
						line,
						column,
						point: syntax::byte_to_char(content, site.offset),
					});
			}
		}

		index
	}

	/// Number of distinct defined symbols.
	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Number of files that were indexed.
	pub fn file_count(&self) -> usize {
		self.files
	}
}

impl SymbolIndex for DefinitionIndex {
	fn definitions(&self, name: &str) -> Vec<Location> {
		self.definitions.get(name).cloned().unwrap_or_default()
	}
}

/// Check if a file holds Lisp-family source code.
pub fn is_lisp_file(path: &Path) -> bool {
	let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
		return false;
	};

	matches!(
		ext,
		"el" | "lisp"
			| "lsp" | "cl"
			| "asd" | "scm"
			| "ss" | "rkt"
			| "clj" | "cljs"
			| "cljc" | "fnl"
	)
}

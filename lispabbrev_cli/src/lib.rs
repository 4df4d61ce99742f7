use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use lispabbrev_core::DefinitionKind;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand Lisp abbreviations and jump to or create definitions.",
	long_about = "lispabbrev expands short triggers typed in callable position into full Lisp \
	              forms, so `(w` followed by a space becomes `(when `.\n\nA context gate keeps \
	              short variable names, strings and comments untouched.\n\nQuick start:\n  \
	              lispabbrev list            Show every abbreviation\n  lispabbrev expand \
	              '(df|'     Type a space after `(df`\n  lispabbrev goto FILE -p N  Jump to or \
	              create a definition\n  lispabbrev info            Show the resolved \
	              configuration"
)]
pub struct LispAbbrevCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List every abbreviation in the effective table.
	///
	/// The table holds the built-in abbreviations merged with the
	/// `[abbrevs]` and `[skeletons]` of `lispabbrev.toml`. When a trigger is
	/// defined more than once the last definition is shown.
	List {
		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Type a key after some text and print the result.
	///
	/// A `|` in TEXT marks point; without one point is at the end. The output
	/// shows the buffer after the key was typed with `|` at the new point.
	Expand {
		/// The buffer text, with `|` marking point.
		text: String,

		/// The key to type. Defaults to a space.
		#[arg(long, short, default_value_t = ' ')]
		key: char,
	},
	/// Jump to the definition of the symbol at a point, or create one.
	///
	/// Searches FILE first, then every Lisp file under the project root. When
	/// nothing defines the symbol a skeletal definition is inserted after the
	/// current top-level form.
	Goto {
		/// The Lisp file to search. Relative paths resolve against the
		/// project root.
		file: PathBuf,

		/// Character index of the cursor in FILE.
		#[arg(long, short)]
		point: usize,

		/// Kind of definition to insert when none exists.
		#[arg(long, value_enum, default_value_t = KindArg::Function)]
		kind: KindArg,

		/// Save FILE after inserting a definition. Without this flag the
		/// updated text is printed instead.
		#[arg(long, default_value_t = false)]
		write: bool,
	},
	/// Print the resolved configuration and table size.
	Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
	/// Insert `(defun NAME ()`.
	Function,
	/// Insert `(defmacro NAME ()`.
	Macro,
	/// Insert `(defvar NAME )`.
	Variable,
	/// Insert `(defparameter NAME )`.
	Parameter,
}

impl From<KindArg> for DefinitionKind {
	fn from(kind: KindArg) -> Self {
		match kind {
			KindArg::Function => Self::Function,
			KindArg::Macro => Self::Macro,
			KindArg::Variable => Self::Variable,
			KindArg::Parameter => Self::Parameter,
		}
	}
}

//! `lispabbrev_core` is the core library for `lispabbrev`, an abbreviation
//! engine for writing Lisp-family source code. Short triggers typed in
//! callable position expand into full forms (`(w` becomes `(when `, `(df`
//! becomes `(defun | ()`), while a context gate keeps short local variable
//! names, strings and comments untouched.
//!
//! ## Expansion Pipeline
//!
//! ```text
//! Key typed after a word
//!   → ContextClassifier (five-part gate: key, code, symbol, alphabetic, prefix)
//!   → AbbrevTable lookup (last definition of a trigger wins)
//!   → ExpansionEngine (full template, or the bare name after `#'`)
//!   → EditorContext mutation (delete trigger, insert text, place point)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Loads `lispabbrev.toml`, which adds abbreviations and
//!   skeletons or disables built-in triggers.
//! - [`navigation`]: Jump to a symbol's definition or insert a skeletal one.
//! - [`project`]: A [`SymbolIndex`] built by walking a project's Lisp files.
//! - [`syntax`]: Lisp syntax scanning for strings, comments and forms.
//!
//! ## Key Types
//!
//! - [`Template`]: Literal text, text with a cursor position, or a
//!   multi-stop [`Skeleton`].
//! - [`AbbrevTable`]: Trigger to template mapping.
//! - [`ExpansionService`]: Owns the table and its activation state.
//! - [`EditorContext`]: The host buffer interface; [`TextBuffer`] is an
//!   in-memory implementation.
//!
//! ## Quick Start
//!
//! ```rust
//! use lispabbrev_core::DetachedHost;
//! use lispabbrev_core::EditorContext;
//! use lispabbrev_core::ExpansionService;
//! use lispabbrev_core::TextBuffer;
//!
//! let mut service = ExpansionService::default();
//! service.activate(&mut DetachedHost);
//!
//! let mut buffer = TextBuffer::from_text("(w");
//! service.self_insert(&mut buffer, ' ');
//!
//! assert_eq!(buffer.text(), "(when ");
//! assert_eq!(buffer.point(), 6);
//! ```

pub use buffer::*;
pub use classifier::*;
pub use config::*;
pub use context::*;
pub use defaults::*;
pub use engine::*;
pub use error::*;
pub use navigation::DefinitionKind;
pub use navigation::NavigationOutcome;
pub use navigation::NavigationStack;
pub use navigation::find_or_define;
pub use project::DefinitionIndex;
pub use service::*;
pub use syntax::SyntaxClass;
pub use table::*;
pub use template::*;

mod buffer;
mod classifier;
pub mod config;
mod context;
mod defaults;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod navigation;
pub mod project;
mod service;
pub mod syntax;
mod table;
mod template;

#[cfg(test)]
mod __fixtures;

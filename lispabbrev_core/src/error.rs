use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum AbbrevError {
	#[error(transparent)]
	#[diagnostic(code(lispabbrev::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lispabbrev::config_parse),
		help("check that lispabbrev.toml is valid TOML with [abbrevs] and/or [skeletons] tables")
	)]
	ConfigParse(String),

	#[error("invalid trigger: `{0}`")]
	#[diagnostic(
		code(lispabbrev::invalid_trigger),
		help("triggers must be non-empty and contain only alphanumeric characters")
	)]
	InvalidTrigger(String),

	#[error("template for `{trigger}` contains {count} cursor markers")]
	#[diagnostic(
		code(lispabbrev::multiple_markers),
		help("a literal template may mark at most one cursor position; use [skeletons] for several stops")
	)]
	MultipleMarkers { trigger: String, count: usize },

	#[error("point {point} is outside of the buffer (length {len})")]
	#[diagnostic(code(lispabbrev::invalid_point))]
	InvalidPoint { point: usize, len: usize },

	#[error("failed to scan `{path}` for definitions: {reason}")]
	#[diagnostic(code(lispabbrev::definition_scan))]
	DefinitionScan { path: String, reason: String },
}

pub type AbbrevResult<T> = Result<T, AbbrevError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;

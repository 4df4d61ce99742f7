use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::AbbrevError;
use crate::AbbrevResult;
use crate::DEFAULT_MARKER;
use crate::Skeleton;
use crate::Template;
use crate::default_abbrevs;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"lispabbrev.toml",
	".lispabbrev.toml",
	".config/lispabbrev.toml",
];

/// Configuration loaded from a `lispabbrev.toml` file.
///
/// ```toml
/// marker = "$"
/// use_defaults = true
/// disabled = ["m", "f"]
///
/// [abbrevs]
/// pm = "pcase $"
/// ht = "make-hash-table :test #'equal"
///
/// [skeletons]
/// dmm = "define-minor-mode $\n\"$\"\n:lighter \" $\""
/// ```
///
/// In `[abbrevs]` the marker sets the cursor position and may appear at most
/// once. In `[skeletons]` every marker is a point stop and every newline is
/// an indented line break.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AbbrevConfig {
	/// The placeholder marker character used in templates.
	#[serde(default = "default_marker")]
	pub marker: char,
	/// Whether the built-in abbreviations are loaded. Defaults to `true`.
	#[serde(default = "default_use_defaults")]
	pub use_defaults: bool,
	/// Built-in triggers to leave out.
	#[serde(default)]
	pub disabled: Vec<String>,
	/// Additional literal templates keyed by trigger.
	#[serde(default)]
	pub abbrevs: BTreeMap<String, String>,
	/// Additional skeleton templates keyed by trigger.
	#[serde(default)]
	pub skeletons: BTreeMap<String, String>,
}

impl Default for AbbrevConfig {
	fn default() -> Self {
		Self {
			marker: DEFAULT_MARKER,
			use_defaults: true,
			disabled: Vec::new(),
			abbrevs: BTreeMap::new(),
			skeletons: BTreeMap::new(),
		}
	}
}

fn default_marker() -> char {
	DEFAULT_MARKER
}

fn default_use_defaults() -> bool {
	true
}

impl AbbrevConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> AbbrevResult<Option<AbbrevConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> AbbrevResult<Self> {
		toml::from_str(content).map_err(|e| AbbrevError::ConfigParse(e.to_string()))
	}

	/// The ordered list of abbreviations this config produces: the enabled
	/// defaults, then `[abbrevs]`, then `[skeletons]`. Loading the list into a
	/// table lets later user entries replace earlier defaults.
	pub fn entries(&self) -> AbbrevResult<Vec<(String, Template)>> {
		let mut entries = Vec::new();

		if self.use_defaults {
			entries.extend(
				default_abbrevs()
					.into_iter()
					.filter(|(trigger, _)| !self.disabled.iter().any(|d| d == trigger))
					.map(|(trigger, template)| (trigger.to_string(), template)),
			);
		}

		for (trigger, text) in &self.abbrevs {
			validate_trigger(trigger)?;
			let template = Template::parse_marked(trigger, text, self.marker)?;
			entries.push((trigger.clone(), template));
		}

		for (trigger, text) in &self.skeletons {
			validate_trigger(trigger)?;
			let skeleton = Skeleton::parse_marked(text, self.marker);
			entries.push((trigger.clone(), Template::Skeleton(skeleton)));
		}

		Ok(entries)
	}
}

/// Triggers must be non-empty runs of alphanumeric characters.
pub fn validate_trigger(trigger: &str) -> AbbrevResult<()> {
	if trigger.is_empty() || !trigger.chars().all(char::is_alphanumeric) {
		return Err(AbbrevError::InvalidTrigger(trigger.to_string()));
	}

	Ok(())
}

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::EnvtError;
use crate::EnvtResult;

/// Suffix that marks a file as a template.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".envt";

/// Suffix that a definitions file name must end with. The part of the name
/// before it is the environment name.
pub const DEFAULT_DEFINITIONS_SUFFIX: &str = ".env";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["envt.toml", ".envt.toml", ".config/envt.toml"];

/// Configuration loaded from an `envt.toml` file.
///
/// ```toml
/// template_suffix = ".envt"
/// definitions_suffix = ".env"
///
/// [exclude]
/// patterns = ["node_modules/", "target/"]
/// ```
///
/// Every key is optional. A project without a config file behaves exactly
/// like one with an empty config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvtConfig {
	/// File name suffix identifying template files.
	#[serde(default = "default_template_suffix")]
	pub template_suffix: String,
	/// File name suffix required on the definitions file.
	#[serde(default = "default_definitions_suffix")]
	pub definitions_suffix: String,
	/// Paths skipped during template discovery.
	#[serde(default)]
	pub exclude: ExcludeConfig,
}

impl Default for EnvtConfig {
	fn default() -> Self {
		Self {
			template_suffix: default_template_suffix(),
			definitions_suffix: default_definitions_suffix(),
			exclude: ExcludeConfig::default(),
		}
	}
}

fn default_template_suffix() -> String {
	DEFAULT_TEMPLATE_SUFFIX.to_string()
}

fn default_definitions_suffix() -> String {
	DEFAULT_DEFINITIONS_SUFFIX.to_string()
}

/// Configuration for excluding files and directories from discovery.
///
/// Patterns follow gitignore syntax and are relative to the project root.
/// Nothing is excluded by default, so every directory is descended into.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
	/// Examples: `"node_modules/"`, `"legacy/*.envt"`, `"!legacy/keep.envt"`.
	#[serde(default)]
	pub patterns: Vec<String>,
}

impl EnvtConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> EnvtResult<Option<EnvtConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when absent.
	pub fn load_or_default(root: &Path) -> EnvtResult<EnvtConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Parse config from TOML text and validate the suffixes.
	pub fn parse(content: &str) -> EnvtResult<EnvtConfig> {
		let config: EnvtConfig =
			toml::from_str(content).map_err(|e| EnvtError::ConfigParse(e.to_string()))?;

		if config.template_suffix.is_empty() {
			return Err(EnvtError::ConfigParse(
				"`template_suffix` must not be empty".to_string(),
			));
		}

		if config.definitions_suffix.is_empty() {
			return Err(EnvtError::ConfigParse(
				"`definitions_suffix` must not be empty".to_string(),
			));
		}

		Ok(config)
	}
}

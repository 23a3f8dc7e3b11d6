use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum EnvtError {
	#[error(transparent)]
	#[diagnostic(code(envt::io_error))]
	Io(#[from] std::io::Error),

	#[error("definitions file `{file}` must end with `{suffix}`")]
	#[diagnostic(
		code(envt::invalid_definitions_file),
		help("rename the file so the environment name is followed by `{suffix}`, e.g. `prod{suffix}`")
	)]
	InvalidDefinitionsFile { file: String, suffix: String },

	#[error("failed to read definitions file `{}`", .path.display())]
	#[diagnostic(code(envt::definitions_read))]
	DefinitionsRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read template `{}`", .path.display())]
	#[diagnostic(code(envt::template_read))]
	TemplateRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write output file `{}`", .path.display())]
	#[diagnostic(code(envt::output_write))]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(envt::config_parse),
		help("check that envt.toml is valid TOML with optional suffix keys and an [exclude] section")
	)]
	ConfigParse(String),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(envt::symlink_cycle),
		help("remove the circular symlink or exclude this path in envt.toml")
	)]
	SymlinkCycle { path: String },
}

pub type EnvtResult<T> = Result<T, EnvtError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;

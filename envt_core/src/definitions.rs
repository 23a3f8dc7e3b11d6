use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;

use crate::EnvtError;
use crate::EnvtResult;

/// A declared `key=value` pair from a definitions file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
	pub key: String,
	/// The raw value, exactly as written after the first `=`.
	pub value: String,
}

impl Variable {
	pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			value: value.into(),
		}
	}

	/// The placeholder text this variable replaces, e.g. `${NAME}`.
	pub fn token(&self) -> String {
		format!("${{{}}}", self.key)
	}
}

/// Ordered set of variables with unique keys.
///
/// Inserting a key that already exists removes the earlier entry and appends
/// the new one, so the last definition in a file wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Variables(Vec<Variable>);

impl Variables {
	/// Parse the text of a definitions file.
	///
	/// Blank lines and lines starting with `#` (after trimming) are skipped.
	/// Everything before the first `=` is the key and everything after it is
	/// the value. A line without `=` declares a key with an empty value.
	pub fn parse(text: &str) -> Self {
		let mut variables = Self::default();

		for line in text.lines() {
			let line = line.trim();
			if line.is_empty() || line.starts_with('#') {
				continue;
			}

			let variable = match line.split_once('=') {
				Some((key, value)) => Variable::new(key, value),
				None => Variable::new(line, ""),
			};
			variables.insert(variable);
		}

		variables
	}

	/// Insert a variable, replacing any earlier entry with the same key.
	pub fn insert(&mut self, variable: Variable) {
		self.0.retain(|existing| existing.key != variable.key);
		self.0.push(variable);
	}

	/// Look up the value declared for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|variable| variable.key == key)
			.map(|variable| variable.value.as_str())
	}
}

impl FromIterator<Variable> for Variables {
	fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
		let mut variables = Self::default();
		for variable in iter {
			variables.insert(variable);
		}
		variables
	}
}

/// A loaded definitions file together with the environment it describes.
#[derive(Debug, Clone)]
pub struct Definitions {
	/// The file name with the definitions suffix removed, e.g. `prod` for
	/// `prod.env`.
	pub environment_name: String,
	pub path: PathBuf,
	pub variables: Variables,
}

impl Definitions {
	/// Read and parse the definitions file at `path`.
	///
	/// Fails when the file name does not end with `suffix` or when the file
	/// cannot be read.
	pub fn load(path: &Path, suffix: &str) -> EnvtResult<Self> {
		let environment_name = environment_name(path, suffix)?;
		let text = std::fs::read_to_string(path).map_err(|source| {
			EnvtError::DefinitionsRead {
				path: path.to_path_buf(),
				source,
			}
		})?;
		let variables = Variables::parse(&text);

		tracing::debug!(
			path = %path.display(),
			environment = %environment_name,
			variables = variables.len(),
			"loaded definitions"
		);

		Ok(Self {
			environment_name,
			path: path.to_path_buf(),
			variables,
		})
	}
}

/// Derive the environment name from a definitions file path by removing
/// `suffix` from its file name.
pub fn environment_name(path: &Path, suffix: &str) -> EnvtResult<String> {
	let invalid = || EnvtError::InvalidDefinitionsFile {
		file: path.display().to_string(),
		suffix: suffix.to_string(),
	};

	let file_name = path.file_name().and_then(|name| name.to_str()).ok_or_else(invalid)?;

	match file_name.strip_suffix(suffix) {
		Some(name) if !name.is_empty() => Ok(name.to_string()),
		_ => Err(invalid()),
	}
}

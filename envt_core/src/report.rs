use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::KeyCount;
use crate::Substitution;
use crate::Variables;

/// A template after substitution, ready to be written.
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
	/// Path of the template file.
	pub template: PathBuf,
	/// Path the rendered content is written to, next to the template.
	pub output: PathBuf,
	/// The substituted text.
	pub content: String,
	/// Total replacements made in this template.
	pub replacements: usize,
}

/// A placeholder in a template that no declared variable satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedToken {
	pub key: String,
	pub file: PathBuf,
}

/// An advisory problem found during a run. Warnings never fail the run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Warning {
	/// A declared variable that no template referenced.
	UnusedVariable { key: String },
	/// A template placeholder with no declared variable.
	UnresolvedToken(UnresolvedToken),
}

impl Warning {
	/// The variable or placeholder key the warning is about.
	pub fn key(&self) -> &str {
		match self {
			Self::UnusedVariable { key } | Self::UnresolvedToken(UnresolvedToken { key, .. }) => key,
		}
	}

	/// Display the warning with file paths shown relative to `root`.
	pub fn relative_to<'a>(&'a self, root: &'a Path) -> RelativeWarning<'a> {
		RelativeWarning {
			warning: self,
			root,
		}
	}

	fn write_message(&self, f: &mut fmt::Formatter<'_>, root: Option<&Path>) -> fmt::Result {
		match self {
			Self::UnusedVariable { key } => {
				write!(f, "no template references variable `{key}`")
			}
			Self::UnresolvedToken(token) => {
				let file = root
					.and_then(|root| token.file.strip_prefix(root).ok())
					.unwrap_or(token.file.as_path());
				write!(
					f,
					"no variable defined for `{}` ({})",
					token.key,
					file.display()
				)
			}
		}
	}
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_message(f, None)
	}
}

/// A [`Warning`] formatted with paths relative to a project root.
#[derive(Debug, Clone, Copy)]
pub struct RelativeWarning<'a> {
	warning: &'a Warning,
	root: &'a Path,
}

impl fmt::Display for RelativeWarning<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.warning.write_message(f, Some(self.root))
	}
}

/// Accumulated state for one run over a template tree.
///
/// Passed by `&mut` through discovery so that each processed template adds
/// its counts and unresolved placeholders as it completes.
#[derive(Debug, Clone)]
pub struct RunContext {
	counts: Vec<KeyCount>,
	unresolved: Vec<UnresolvedToken>,
	rendered: Vec<RenderedTemplate>,
}

impl RunContext {
	/// Start a run where every declared variable has a zero count.
	pub fn new(variables: &Variables) -> Self {
		Self {
			counts: variables
				.iter()
				.map(|variable| KeyCount::new(variable.key.clone(), 0))
				.collect(),
			unresolved: Vec::new(),
			rendered: Vec::new(),
		}
	}

	/// Add the counts and unresolved placeholders of one template.
	pub fn record(&mut self, template: &Path, substitution: &Substitution) {
		for replacement in &substitution.replacements {
			match self
				.counts
				.iter_mut()
				.find(|entry| entry.key == replacement.key)
			{
				Some(entry) => entry.count += replacement.count,
				None => self.counts.push(replacement.clone()),
			}
		}

		for key in substitution.unresolved() {
			self.unresolved.push(UnresolvedToken {
				key: key.to_string(),
				file: template.to_path_buf(),
			});
		}
	}

	/// Keep a rendered template for the report.
	pub fn push_rendered(&mut self, rendered: RenderedTemplate) {
		self.rendered.push(rendered);
	}

	/// Total replacements of `key` across every template recorded so far.
	pub fn count(&self, key: &str) -> usize {
		self.counts
			.iter()
			.find(|entry| entry.key == key)
			.map_or(0, |entry| entry.count)
	}

	/// Finish the run. Unused variables are reported first, in declaration
	/// order, followed by unresolved placeholders in the order found.
	pub fn finish(self) -> RunReport {
		let mut warnings: Vec<Warning> = self
			.counts
			.iter()
			.filter(|entry| entry.count == 0)
			.map(|entry| {
				Warning::UnusedVariable {
					key: entry.key.clone(),
				}
			})
			.collect();
		warnings.extend(self.unresolved.into_iter().map(Warning::UnresolvedToken));

		RunReport {
			rendered: self.rendered,
			counts: self.counts,
			warnings,
		}
	}
}

/// Result of rendering a template tree.
#[derive(Debug, Clone)]
pub struct RunReport {
	/// Every rendered template in discovery order.
	pub rendered: Vec<RenderedTemplate>,
	/// Global replacement count for each declared variable.
	pub counts: Vec<KeyCount>,
	/// Advisory warnings for the run.
	pub warnings: Vec<Warning>,
}

impl RunReport {
	/// Returns true if the run produced any warnings.
	pub fn has_warnings(&self) -> bool {
		!self.warnings.is_empty()
	}

	/// Declared variables that were never substituted.
	pub fn unused_variables(&self) -> impl Iterator<Item = &str> {
		self.warnings.iter().filter_map(|warning| {
			match warning {
				Warning::UnusedVariable { key } => Some(key.as_str()),
				Warning::UnresolvedToken(_) => None,
			}
		})
	}

	/// Placeholders that had no declared variable, with their files.
	pub fn unresolved_tokens(&self) -> impl Iterator<Item = &UnresolvedToken> {
		self.warnings.iter().filter_map(|warning| {
			match warning {
				Warning::UnresolvedToken(token) => Some(token),
				Warning::UnusedVariable { .. } => None,
			}
		})
	}
}

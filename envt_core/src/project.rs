use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::Definitions;
use crate::EnvtError;
use crate::EnvtResult;
use crate::RenderedTemplate;
use crate::RunContext;
use crate::RunReport;
use crate::config::DEFAULT_TEMPLATE_SUFFIX;
use crate::config::EnvtConfig;
use crate::engine::substitute;
use crate::naming::output_file_name;

/// Options for controlling how a template tree is scanned.
///
/// Use [`RunOptions::default()`] for the stock `.envt` suffix with nothing
/// excluded, or [`RunOptions::from_config`] to construct from an
/// [`EnvtConfig`].
#[derive(Debug, Clone)]
pub struct RunOptions {
	/// File name suffix identifying template files.
	pub template_suffix: String,
	/// Gitignore-style patterns to exclude from scanning.
	pub exclude_patterns: Vec<String>,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self {
			template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
			exclude_patterns: Vec::new(),
		}
	}
}

impl RunOptions {
	/// Construct [`RunOptions`] from an [`EnvtConfig`].
	pub fn from_config(config: &EnvtConfig) -> Self {
		Self {
			template_suffix: config.template_suffix.clone(),
			exclude_patterns: config.exclude.patterns.clone(),
		}
	}
}

/// Render every template under `root` without writing anything.
///
/// Templates are processed one at a time in discovery order. The first
/// template that cannot be read aborts the run.
pub fn render_project(
	root: &Path,
	definitions: &Definitions,
	options: &RunOptions,
) -> EnvtResult<RunReport> {
	let templates = collect_templates(root, options)?;
	let mut ctx = RunContext::new(&definitions.variables);

	for template in &templates {
		process_template(template, definitions, options, &mut ctx)?;
	}

	Ok(ctx.finish())
}

/// Render every template under `root` and write each output file.
pub fn run_project(
	root: &Path,
	definitions: &Definitions,
	options: &RunOptions,
) -> EnvtResult<RunReport> {
	let report = render_project(root, definitions, options)?;
	write_outputs(&report)?;
	Ok(report)
}

/// Write each rendered template to its output path, overwriting any file
/// already there.
pub fn write_outputs(report: &RunReport) -> EnvtResult<()> {
	for rendered in &report.rendered {
		std::fs::write(&rendered.output, &rendered.content).map_err(|source| {
			EnvtError::OutputWrite {
				path: rendered.output.clone(),
				source,
			}
		})?;
		tracing::debug!(output = %rendered.output.display(), "wrote output");
	}
	Ok(())
}

/// Name, read and substitute a single template, recording the result in
/// `ctx`.
pub fn process_template(
	template: &Path,
	definitions: &Definitions,
	options: &RunOptions,
	ctx: &mut RunContext,
) -> EnvtResult<()> {
	let file_name = template
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or_default();
	let directory = template.parent().unwrap_or_else(|| Path::new("."));
	let output_name = output_file_name(
		file_name,
		&definitions.environment_name,
		&options.template_suffix,
	);
	let output = directory.join(&output_name);
	tracing::debug!(template = %template.display(), output = %output_name, "resolved output name");

	let text = std::fs::read_to_string(template).map_err(|source| {
		EnvtError::TemplateRead {
			path: template.to_path_buf(),
			source,
		}
	})?;
	let substitution = substitute(&text, &definitions.variables);
	ctx.record(template, &substitution);

	let replacements = substitution.total_replacements();
	tracing::debug!(template = %template.display(), replacements, "substituted template");

	ctx.push_rendered(RenderedTemplate {
		template: template.to_path_buf(),
		output,
		content: substitution.text,
		replacements,
	});

	Ok(())
}

/// Collect every template file under `root`, depth first.
///
/// Entries within a directory are visited in file name order. Every
/// directory is descended into unless it matches an exclude pattern.
pub fn collect_templates(root: &Path, options: &RunOptions) -> EnvtResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut ancestors = HashSet::new();
	let exclude = build_exclude_matcher(root, &options.exclude_patterns)?;

	walk_dir(
		root,
		&mut files,
		&options.template_suffix,
		&exclude,
		&mut ancestors,
	)?;

	Ok(files)
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns in `envt.toml`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> EnvtResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			EnvtError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| EnvtError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

fn walk_dir(
	dir: &Path,
	files: &mut Vec<PathBuf>,
	suffix: &str,
	exclude: &Gitignore,
	ancestors: &mut HashSet<PathBuf>,
) -> EnvtResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// A directory that is its own ancestor can only be reached through a
	// symlink cycle.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !ancestors.insert(canonical.clone()) {
		return Err(EnvtError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	let mut entries = std::fs::read_dir(dir)?
		.map(|entry| entry.map(|entry| entry.path()))
		.collect::<Result<Vec<_>, _>>()?;
	entries.sort();

	for path in entries {
		let is_dir = path.is_dir();

		if exclude.matched(&path, is_dir).is_ignore() {
			tracing::trace!(path = %path.display(), "excluded");
			continue;
		}

		if is_dir {
			walk_dir(&path, files, suffix, exclude, ancestors)?;
		} else if path.is_file() && is_template_file(&path, suffix) {
			tracing::debug!(template = %path.display(), "found template");
			files.push(path);
		}
	}

	ancestors.remove(&canonical);
	Ok(())
}

/// Check whether a file name ends with the template suffix.
pub fn is_template_file(path: &Path, suffix: &str) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.ends_with(suffix))
}

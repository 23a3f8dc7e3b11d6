use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render environment-specific files from templates.",
	long_about = "envt walks a directory tree for template files (`*.envt`), replaces every \
	              `${KEY}` placeholder with the value declared in a `key=value` definitions \
	              file, and writes the result next to each template.\n\nThe definitions file \
	              name sets the environment: `prod.env` renders `app.env.json.envt` to \
	              `app.prod.json`. Use `.Env.` or `.ENV.` in a template name for PascalCase or \
	              UPPERCASE environment names.\n\nQuick start:\n  envt prod.env            \
	              Render every template for prod\n  envt staging.env --dry-run  Preview without \
	              writing"
)]
pub struct EnvtCli {
	/// Definitions file with one `KEY=value` per line. Its name without the
	/// `.env` suffix is the environment name.
	pub definitions: PathBuf,

	/// Root directory to search for templates. Defaults to the current
	/// directory.
	#[arg(long, short)]
	pub path: Option<PathBuf>,

	/// Render and report every template without writing output files.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

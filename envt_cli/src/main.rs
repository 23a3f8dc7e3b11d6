use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use envt_cli::EnvtCli;
use envt_core::Definitions;
use envt_core::EnvtConfig;
use envt_core::RunReport;
use envt_core::Warning;
use envt_core::project::RunOptions;
use envt_core::project::render_project;
use envt_core::project::write_outputs;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = EnvtCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<envt_core::EnvtError>() {
			Ok(envt_err) => {
				let report: miette::Report = (*envt_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `ENVT_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env("ENVT_LOG").unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init()
		.ok();
}

fn resolve_root(args: &EnvtCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn run(args: &EnvtCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = EnvtConfig::load_or_default(&root)?;
	let definitions = Definitions::load(&args.definitions, &config.definitions_suffix)?;
	let options = RunOptions::from_config(&config);

	if args.verbose {
		println!(
			"Loaded {} variable(s) for environment `{}` from {}",
			definitions.variables.len(),
			definitions.environment_name,
			definitions.path.display()
		);
	}

	let report = render_project(&root, &definitions, &options)?;
	print_rendered(&report, &root);

	if report.rendered.is_empty() {
		println!("No template files found.");
	} else if args.dry_run {
		println!(
			"Dry run: would write {} file(s) for environment `{}`:",
			report.rendered.len(),
			definitions.environment_name
		);
		for rendered in &report.rendered {
			println!("  {}", make_relative(&rendered.output, &root));
		}
	} else {
		write_outputs(&report)?;
		println!(
			"{} {} file(s) for environment `{}`.",
			colored!("Wrote", green),
			report.rendered.len(),
			definitions.environment_name
		);
	}

	// Warnings never affect the exit code.
	print_warnings(&report.warnings, &root);

	Ok(())
}

/// Print each template, its output file name and the resolved text.
fn print_rendered(report: &RunReport, root: &Path) {
	for rendered in &report.rendered {
		let output_name = rendered
			.output
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();

		println!(
			"{} {}",
			colored!("Template:", bold),
			make_relative(&rendered.template, root)
		);
		println!("{} {output_name}", colored!("Output:", bold));
		println!("{}", rendered.content);
		println!();
	}
}

fn print_warnings(warnings: &[Warning], root: &Path) {
	for warning in warnings {
		eprintln!(
			"{} {}",
			colored!("warning:", yellow),
			warning.relative_to(root)
		);
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

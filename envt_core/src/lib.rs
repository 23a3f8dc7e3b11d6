//! `envt_core` is the core library for the `envt` environment templating
//! tool. It loads a flat `key=value` definitions file, finds template files
//! in a directory tree, substitutes `${KEY}` placeholders with the declared
//! values, and names each output file after the environment.
//!
//! ## Processing Pipeline
//!
//! ```text
//! prod.env
//!   → Definitions loader (ordered, last definition wins)
//!   → Template discovery (depth-first walk for *.envt files)
//!   → Name resolver (greeting.env.txt.envt → greeting.prod.txt)
//!   → Substitution engine (replaces ${KEY} tokens, counts replacements)
//!   → Run report (unused variables, unresolved placeholders)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Optional `envt.toml` configuration: suffixes and exclude
//!   patterns.
//! - [`naming`] — Environment markers (`.Env.`, `.env.`, `.ENV.`) and output
//!   file name derivation.
//! - [`project`] — Directory walking, per-template processing and writing.
//!
//! ## Key Types
//!
//! - [`Definitions`] — A loaded definitions file and its environment name.
//! - [`Variables`] — Ordered, unique-key variable set.
//! - [`Substitution`] — Result of substituting variables into one template.
//! - [`RunContext`] — Accumulated counts and warnings threaded through a run.
//! - [`RunReport`] — Rendered templates and warnings for a finished run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use envt_core::Definitions;
//! use envt_core::project::RunOptions;
//! use envt_core::project::run_project;
//!
//! let definitions = Definitions::load(Path::new("prod.env"), ".env").unwrap();
//! let report = run_project(Path::new("."), &definitions, &RunOptions::default()).unwrap();
//!
//! for warning in &report.warnings {
//! 	eprintln!("warning: {warning}");
//! }
//! ```

pub use config::*;
pub use definitions::*;
pub use engine::*;
pub use error::*;
pub use report::*;
pub use tokens::Placeholder;
pub use tokens::placeholders;
pub use tokens::scan_keys;

pub mod config;
mod definitions;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod naming;
pub mod project;
mod report;
mod tokens;

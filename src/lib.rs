//! Command-line front end for the Tact compiler.
//!
//! Turns `tact` flags into exactly one request (help, version, expression
//! evaluation or a build), hands it to a [`backend::Backend`] and maps the
//! result onto the process exit code (see [`exitcode`]).
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use clap::Parser;
//! use tact_cli::app::{run, AppContext};
//! use tact_cli::backend::{Backend, ProcessBackend};
//! use tact_cli::cli::{help_text, Invocation};
//! use tact_cli::error::ConfigError;
//! use tact_cli::revision::FixedRevision;
//! use tact_cli::ui::Renderer;
//!
//! # async fn example() {
//! let invocation = Invocation::try_parse_from(["tact", "--check", "main.tact"]).unwrap();
//! let renderer = Renderer::detect();
//! let revision = FixedRevision::default();
//! let help = help_text();
//! let connect = || -> Result<Arc<dyn Backend>, ConfigError> {
//!     Ok(Arc::new(ProcessBackend::new("tact-compiler", vec![], None)))
//! };
//! let code = run(
//!     &invocation,
//!     &AppContext {
//!         renderer: &renderer,
//!         revision: &revision,
//!         version: tact_cli::build_info::VERSION,
//!         help: &help,
//!         connect: &connect,
//!     },
//! )
//! .await;
//! std::process::exit(code);
//! # }
//! ```

pub mod app;
pub mod backend;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod exitcode;
pub mod logging;
pub mod mode;
pub mod revision;
#[cfg(test)]
pub mod testsupport;
pub mod ui;

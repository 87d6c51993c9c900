//! CLI entry point for tact.

use std::sync::Arc;

use clap::Parser;
use tact_cli::app::{self, AppContext};
use tact_cli::backend::{Backend, ProcessBackend};
use tact_cli::build_info::VERSION;
use tact_cli::cli::{help_text, Invocation};
use tact_cli::config::{load_config, RevisionConfig};
use tact_cli::error::ConfigError;
use tact_cli::exitcode;
use tact_cli::logging;
use tact_cli::mode::{resolve, Resolution};
use tact_cli::revision::GitRevision;
use tact_cli::ui::Renderer;

#[tokio::main]
async fn main() {
    let invocation = match Invocation::try_parse_from(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            let _ = err.print();
            std::process::exit(exitcode::USAGE);
        }
    };

    logging::init(invocation.quiet);

    let renderer = Renderer::detect();
    let help = help_text();
    let revision = GitRevision::for_build_tree(revision_timeout(&invocation));
    let connect = || -> Result<Arc<dyn Backend>, ConfigError> {
        let loaded = load_config()?;
        Ok(Arc::new(ProcessBackend::from_config(&loaded.config.backend)))
    };

    let code = app::run(
        &invocation,
        &AppContext {
            renderer: &renderer,
            revision: &revision,
            version: VERSION,
            help: &help,
            connect: &connect,
        },
    )
    .await;
    std::process::exit(code);
}

/// Settings are only consulted on the version path; a broken settings file
/// must not break `--version`.
fn revision_timeout(invocation: &Invocation) -> std::time::Duration {
    if resolve(invocation) != Resolution::Version {
        return RevisionConfig::default().timeout();
    }
    match load_config() {
        Ok(loaded) => loaded.config.revision.timeout(),
        Err(err) => {
            tracing::debug!(%err, "settings unavailable; using default revision timeout");
            RevisionConfig::default().timeout()
        }
    }
}

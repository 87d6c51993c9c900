//! Execution orchestration: turn a resolved invocation into output and an
//! exit code.
//!
//! Everything the orchestrator touches (output, backend, revision lookup) is
//! reached through [`AppContext`], so `main` stays a thin wiring layer and
//! every path is testable without spawning processes.

mod exec;
mod version;

use std::sync::Arc;

use crate::backend::Backend;
use crate::cli::Invocation;
use crate::error::{CliError, ConfigError, UsageError};
use crate::exitcode;
use crate::mode::{resolve, Resolution};
use crate::revision::RevisionLookup;
use crate::ui::render::RenderSink;

/// Lazily produces the backend; only called on the eval and build paths.
pub type Connect<'a> = dyn Fn() -> Result<Arc<dyn Backend>, ConfigError> + Send + Sync + 'a;

/// Collaborators for one run.
pub struct AppContext<'a> {
    pub renderer: &'a dyn RenderSink,
    pub revision: &'a dyn RevisionLookup,
    /// Package version printed by `--version`.
    pub version: &'a str,
    /// Usage text printed for help, bare invocations and usage errors.
    pub help: &'a str,
    pub connect: &'a Connect<'a>,
}

/// Resolve `invocation` and execute it. Returns the process exit code.
pub async fn run(invocation: &Invocation, ctx: &AppContext<'_>) -> i32 {
    let resolution = resolve(invocation);
    tracing::debug!(?resolution, "resolved invocation");

    match resolution {
        Resolution::Help | Resolution::Bare => {
            ctx.renderer.help(ctx.help);
            exitcode::OK
        }
        Resolution::Version => version::run_version(ctx).await,
        Resolution::Invalid(err) => report_usage_error(ctx, err),
        Resolution::Evaluate(source) => {
            if invocation.has_build_flags() {
                ctx.renderer
                    .warn("ignoring build flags because --eval was given");
            }
            exec::run_eval(ctx, &source).await
        }
        Resolution::Build(mode) => exec::run_build(ctx, invocation, mode).await,
    }
}

fn report_usage_error(ctx: &AppContext<'_>, err: UsageError) -> i32 {
    let err = CliError::from(err);
    ctx.renderer.error(&err.to_string());
    ctx.renderer.help_to_stderr(ctx.help);
    err.exit_code()
}

//! Backend-facing flows: expression evaluation and builds.

use std::sync::Arc;

use super::AppContext;
use crate::backend::{AdditionalCliOptions, Backend, BuildRequest, EvalOutcome};
use crate::cli::Invocation;
use crate::error::CliError;
use crate::exitcode;
use crate::mode::CompilationMode;

fn connect(ctx: &AppContext<'_>) -> Result<Arc<dyn Backend>, i32> {
    (ctx.connect)().map_err(|err| {
        let err = CliError::from(err);
        ctx.renderer.error(&err.to_string());
        err.exit_code()
    })
}

/// Evaluate one constant expression and print the result.
pub(super) async fn run_eval(ctx: &AppContext<'_>, source: &str) -> i32 {
    let backend = match connect(ctx) {
        Ok(backend) => backend,
        Err(code) => return code,
    };

    match backend.eval(source).await {
        Ok(EvalOutcome::Ok(value)) => {
            ctx.renderer.value(&value.to_string());
            exitcode::OK
        }
        Ok(EvalOutcome::Error { message }) => {
            ctx.renderer.error(&message);
            exitcode::BACKEND_FAILURE
        }
        Err(err) => {
            tracing::debug!(?err, "evaluator failed");
            ctx.renderer.error(&format!("evaluation error: {err}"));
            exitcode::FAILURE
        }
    }
}

/// Assemble the request for a build invocation.
pub(super) fn build_request(invocation: &Invocation, mode: CompilationMode) -> BuildRequest {
    BuildRequest {
        file_name: invocation.input.first().cloned(),
        config_path: invocation.config.clone(),
        project_names: invocation.projects.clone(),
        additional_cli_options: AdditionalCliOptions {
            mode: mode.selector(),
        },
        suppress_log: invocation.quiet,
    }
}

/// Hand a build to the backend and map its outcome.
pub(super) async fn run_build(
    ctx: &AppContext<'_>,
    invocation: &Invocation,
    mode: CompilationMode,
) -> i32 {
    let backend = match connect(ctx) {
        Ok(backend) => backend,
        Err(code) => return code,
    };

    let request = build_request(invocation, mode);
    tracing::info!(
        file = ?request.file_name,
        config = ?request.config_path,
        ?mode,
        "starting build"
    );

    match backend.run(&request).await {
        Ok(outcome) if outcome.ok => exitcode::OK,
        Ok(_) => {
            tracing::debug!("backend reported a failed build");
            exitcode::BACKEND_FAILURE
        }
        Err(err) => {
            tracing::debug!(?err, "backend failed");
            ctx.renderer.error(&format!("execution error: {err}"));
            exitcode::FAILURE
        }
    }
}

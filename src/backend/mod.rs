//! Compiler backend contract.
//!
//! The orchestrator only ever talks to a backend through [`Backend`]: one call
//! to build, one call to evaluate an expression. A returned failure
//! (`ok: false`, [`EvalOutcome::Error`]) is the backend reporting on the user's
//! input; an `Err(BackendError)` means the backend itself broke.

pub mod process;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::BackendError;
use crate::eval::Value;
use crate::mode::CompilationMode;

pub use process::ProcessBackend;

/// Build request handed to [`Backend::run`].
///
/// Serializes to the JSON shape external compilers read on stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
    pub project_names: Vec<String>,
    pub additional_cli_options: AdditionalCliOptions,
    pub suppress_log: bool,
}

/// Mode selector nested inside [`BuildRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdditionalCliOptions {
    /// Absent means the backend picks its default behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CompilationMode>,
}

/// Structured result of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub ok: bool,
}

/// Tagged result of an expression evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalOutcome {
    Ok(Value),
    Error { message: String },
}

/// Injectable compiler backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Compile according to `request`.
    async fn run(&self, request: &BuildRequest) -> Result<BuildOutcome, BackendError>;

    /// Parse and evaluate one constant expression.
    async fn eval(&self, source: &str) -> Result<EvalOutcome, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = BuildRequest {
            file_name: Some("main.tact".into()),
            config_path: None,
            project_names: vec![],
            additional_cli_options: AdditionalCliOptions {
                mode: CompilationMode::CheckOnly.selector(),
            },
            suppress_log: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "fileName": "main.tact",
                "projectNames": [],
                "additionalCliOptions": { "mode": "checkOnly" },
                "suppressLog": true
            })
        );
    }

    #[test]
    fn default_mode_is_omitted() {
        let request = BuildRequest {
            config_path: Some("tact.config.json".into()),
            project_names: vec!["a".into(), "b".into()],
            additional_cli_options: AdditionalCliOptions {
                mode: CompilationMode::Default.selector(),
            },
            ..BuildRequest::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "configPath": "tact.config.json",
                "projectNames": ["a", "b"],
                "additionalCliOptions": {},
                "suppressLog": false
            })
        );
    }

    #[test]
    fn mode_wire_names() {
        for (mode, wire) in [
            (CompilationMode::FuncOnly, "funcOnly"),
            (CompilationMode::FullWithDecompilation, "fullWithDecompilation"),
        ] {
            assert_eq!(serde_json::to_value(mode).unwrap(), json!(wire));
        }
    }
}

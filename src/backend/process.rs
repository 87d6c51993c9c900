//! Backend that shells out to an external compiler executable.
//!
//! The build request is written as one JSON document to the child's stdin.
//! The child's exit status is the structured result: `0` is success, any
//! other code is a reported failure. Expression evaluation never leaves the
//! process; it runs the built-in evaluator.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Backend, BuildOutcome, BuildRequest, EvalOutcome};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::eval;

/// Spawns `command args...` once per build.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    command: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ProcessBackend {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Option<Duration>) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.timeout())
    }

    async fn run_child(&self, payload: &[u8], suppress_log: bool) -> Result<i32, BackendError> {
        let mut cmd = Command::new(&self.command);
        // A timed-out build drops the wait future; take the child down with it.
        cmd.kill_on_drop(true);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stderr(Stdio::inherit())
            .stdout(if suppress_log {
                Stdio::null()
            } else {
                Stdio::inherit()
            });

        let mut child = cmd.spawn().map_err(|source| BackendError::Spawn {
            program: self.command.clone(),
            source,
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A backend may exit without reading its request; its exit status
            // still decides the outcome.
            match stdin.write_all(payload).await {
                Ok(()) => {}
                Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!("backend closed stdin before reading the request");
                }
                Err(source) => return Err(self.io_error("failed to send request", source)),
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|source| self.io_error("failed to wait for backend", source))?;
        status
            .code()
            .ok_or_else(|| BackendError::Terminated(self.command.clone()))
    }

    fn io_error(&self, what: &str, source: std::io::Error) -> BackendError {
        BackendError::Io {
            context: format!("{what} `{}`", self.command),
            source,
        }
    }
}

#[async_trait]
impl Backend for ProcessBackend {
    async fn run(&self, request: &BuildRequest) -> Result<BuildOutcome, BackendError> {
        let mut payload = serde_json::to_vec(request)?;
        payload.push(b'\n');
        tracing::debug!(command = %self.command, args = ?self.args, "spawning backend");

        let code = match self.timeout {
            Some(limit) => timeout(limit, self.run_child(&payload, request.suppress_log))
                .await
                .map_err(|_| BackendError::Timeout {
                    program: self.command.clone(),
                    limit,
                })??,
            None => self.run_child(&payload, request.suppress_log).await?,
        };
        tracing::debug!(code, "backend exited");
        Ok(BuildOutcome { ok: code == 0 })
    }

    async fn eval(&self, source: &str) -> Result<EvalOutcome, BackendError> {
        Ok(match eval::parse_and_eval(source) {
            Ok(value) => EvalOutcome::Ok(value),
            Err(err) => EvalOutcome::Error {
                message: err.to_string(),
            },
        })
    }
}

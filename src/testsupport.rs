//! Shared test fixtures: temp dirs, a recording output sink and a scripted
//! backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::backend::{Backend, BuildOutcome, BuildRequest, EvalOutcome};
use crate::error::BackendError;
use crate::eval::Value;
use crate::ui::render::RenderSink;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "tact-cli-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Which [`RenderSink`] method produced a recorded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Value,
    Version,
    Help,
    HelpStderr,
    Warn,
    Error,
}

/// Sink that records everything instead of printing.
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(Stream, String)>>,
}

impl RecordingSink {
    fn push(&self, stream: Stream, text: &str) {
        self.lines
            .lock()
            .expect("sink lock")
            .push((stream, text.to_string()));
    }

    /// Lines written to `stream`, in order.
    pub fn lines(&self, stream: Stream) -> Vec<String> {
        self.lines
            .lock()
            .expect("sink lock")
            .iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl RenderSink for RecordingSink {
    fn value(&self, text: &str) {
        self.push(Stream::Value, text);
    }

    fn version(&self, text: &str) {
        self.push(Stream::Version, text);
    }

    fn help(&self, text: &str) {
        self.push(Stream::Help, text);
    }

    fn help_to_stderr(&self, text: &str) {
        self.push(Stream::HelpStderr, text);
    }

    fn warn(&self, msg: &str) {
        self.push(Stream::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(Stream::Error, msg);
    }
}

/// Backend returning scripted answers and recording what it was asked.
///
/// `Err(String)` answers surface as [`BackendError::Other`].
#[derive(Debug)]
pub struct StubBackend {
    build: Result<BuildOutcome, String>,
    eval: Result<EvalOutcome, String>,
    requests: Mutex<Vec<BuildRequest>>,
    evaluated: Mutex<Vec<String>>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self {
            build: Ok(BuildOutcome { ok: true }),
            eval: Ok(EvalOutcome::Ok(Value::Null)),
            requests: Mutex::new(Vec::new()),
            evaluated: Mutex::new(Vec::new()),
        }
    }
}

impl StubBackend {
    pub fn with_build(build: Result<BuildOutcome, String>) -> Self {
        Self {
            build,
            ..Self::default()
        }
    }

    pub fn with_eval(eval: Result<EvalOutcome, String>) -> Self {
        Self {
            eval,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<BuildRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn evaluated(&self) -> Vec<String> {
        self.evaluated.lock().expect("evaluated lock").clone()
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn run(&self, request: &BuildRequest) -> Result<BuildOutcome, BackendError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.build.clone().map_err(BackendError::Other)
    }

    async fn eval(&self, source: &str) -> Result<EvalOutcome, BackendError> {
        self.evaluated
            .lock()
            .expect("evaluated lock")
            .push(source.to_string());
        self.eval.clone().map_err(BackendError::Other)
    }
}

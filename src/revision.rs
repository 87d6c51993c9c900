//! Best-effort source-control revision lookup for `tact --version`.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

/// Injectable revision source; `None` means "unknown", never an error.
#[async_trait]
pub trait RevisionLookup: Send + Sync {
    async fn revision_id(&self) -> Option<String>;
}

/// Asks git for `HEAD` in the repository the binary was built from.
#[derive(Debug, Clone)]
pub struct GitRevision {
    repo_root: PathBuf,
    timeout: Duration,
}

impl GitRevision {
    pub fn new(repo_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repo_root: repo_root.into(),
            timeout,
        }
    }

    /// Repository root captured at build time.
    pub fn for_build_tree(timeout: Duration) -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"), timeout)
    }
}

#[async_trait]
impl RevisionLookup for GitRevision {
    async fn revision_id(&self) -> Option<String> {
        let mut cmd = Command::new("git");
        cmd.kill_on_drop(true);
        cmd.args(["rev-parse", "HEAD"])
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                tracing::debug!(%err, "git revision lookup failed");
                return None;
            }
            Err(_) => {
                tracing::debug!(timeout = ?self.timeout, "git revision lookup timed out");
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Fixed answer, for tests and embedders that already know the revision.
#[derive(Debug, Clone, Default)]
pub struct FixedRevision(pub Option<String>);

#[async_trait]
impl RevisionLookup for FixedRevision {
    async fn revision_id(&self) -> Option<String> {
        self.0.clone()
    }
}

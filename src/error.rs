//! Unified error types for the CLI.

use thiserror::Error;

use crate::exitcode;

// ---------------------------------------------------------------------------
// UsageError
// ---------------------------------------------------------------------------

/// Malformed flag combinations rejected by the mode resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("Error: both config and Tact file can't be simultaneously specified, pick one!")]
    BothConfigAndFile,

    #[error("Error: flags --with-decompilation, --func and --check are mutually exclusive!")]
    ConflictingModes,

    #[error("Error: either config or Tact file have to be specified!")]
    MissingConfigOrFile,

    #[error(
        "Error: only one Tact file can be specified at a time. If you want to compile multiple contracts, use a config file"
    )]
    MultipleFiles,
}

// ---------------------------------------------------------------------------
// BackendError
// ---------------------------------------------------------------------------

/// Failures raised while talking to the backend, as opposed to a failure the
/// backend itself reported.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend process could not be started.
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O with a running backend failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be encoded for the wire.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The backend did not finish within the configured limit.
    #[error("`{program}` timed out after {limit:?}")]
    Timeout {
        program: String,
        limit: std::time::Duration,
    },

    /// The backend terminated without an exit status (e.g. killed by a signal).
    #[error("`{0}` terminated abnormally")]
    Terminated(String),

    /// Catch-all for backend implementations outside this crate.
    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing front-end settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// CliError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type; each variant knows its process exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Backend(_) | CliError::Config(_) => exitcode::FAILURE,
        }
    }
}

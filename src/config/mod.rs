//! Front-end settings: how to reach the compiler backend.
//!
//! These are not the project config passed with `--config`; that file belongs
//! to the backend and is forwarded untouched.

mod defaults;
mod env;
mod sources;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use env::{BACKEND_COMMAND_ENV, BACKEND_TIMEOUT_ENV, CONFIG_PATH_ENV, REVISION_TIMEOUT_ENV};
pub use sources::ConfigSource;

use defaults::{DEFAULT_BACKEND_COMMAND, DEFAULT_REVISION_TIMEOUT_MS};

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub backend: BackendConfig,
    pub revision: RevisionConfig,
}

/// `[backend]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Executable spawned for builds.
    pub command: String,
    /// Arguments passed to `command` before anything else.
    pub args: Vec<String>,
    /// Build timeout; `0` waits indefinitely.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_BACKEND_COMMAND.to_string(),
            args: Vec::new(),
            timeout_secs: 0,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// `[revision]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevisionConfig {
    pub timeout_ms: u64,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_REVISION_TIMEOUT_MS,
        }
    }
}

impl RevisionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Settings plus where they came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Load settings from disk and the process environment.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(crate) fn load_config_from_sources<FRead, FEnv, FRoot>(
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let path_override = env::non_empty(&env_lookup, CONFIG_PATH_ENV);
    let (text, source) =
        sources::read_config_text_with_sources(path_override.as_deref(), &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&text)?;
    env::apply_env_overrides(&mut config, &env_lookup)?;
    if config.backend.command.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "backend.command is empty; set it in tact-cli.toml or via TACT_BACKEND".to_string(),
        ));
    }
    tracing::debug!(?source, backend = %config.backend.command, "settings loaded");
    Ok(LoadedConfig { config, source })
}

/// Root for the global settings directory (`$XDG_CONFIG_HOME` or `~/.config`).
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use std::collections::HashMap;

    fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load_with(
        files: HashMap<PathBuf, String>,
        env: HashMap<String, String>,
        root: Option<PathBuf>,
    ) -> Result<LoadedConfig, ConfigError> {
        load_config_from_sources(
            |path| {
                files.get(path).cloned().ok_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
                })
            },
            |name| env.get(name).cloned(),
            || root.clone(),
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let c = Config::default();
        assert_eq!(c.backend.command, "tact-compiler");
        assert!(c.backend.args.is_empty());
        assert_eq!(c.backend.timeout(), None);
        assert_eq!(c.revision.timeout(), Duration::from_millis(2_000));
    }

    #[test]
    fn no_files_uses_builtin_defaults() {
        let loaded = load_with(HashMap::new(), HashMap::new(), None).unwrap();
        assert_eq!(loaded.source, ConfigSource::BuiltInDefaults);
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn local_file_beats_global_file() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("tact-cli.toml"),
            "[backend]\ncommand = \"local-tact\"\n".to_string(),
        );
        files.insert(
            PathBuf::from("/cfg/tact/cli.toml"),
            "[backend]\ncommand = \"global-tact\"\n".to_string(),
        );
        let loaded = load_with(files, HashMap::new(), Some(PathBuf::from("/cfg"))).unwrap();
        assert_eq!(loaded.source, ConfigSource::Local);
        assert_eq!(loaded.config.backend.command, "local-tact");
    }

    #[test]
    fn global_file_used_when_no_local() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("/cfg/tact/cli.toml"),
            "[backend]\ncommand = \"global-tact\"\nargs = [\"--json\"]\ntimeout_secs = 9\n"
                .to_string(),
        );
        let loaded = load_with(files, HashMap::new(), Some(PathBuf::from("/cfg"))).unwrap();
        assert_eq!(
            loaded.source,
            ConfigSource::Global(PathBuf::from("/cfg/tact/cli.toml"))
        );
        assert_eq!(loaded.config.backend.args, vec!["--json".to_string()]);
        assert_eq!(loaded.config.backend.timeout(), Some(Duration::from_secs(9)));
    }

    #[test]
    fn explicit_path_must_exist() {
        let env = env_map(&[(CONFIG_PATH_ENV, "/nope/settings.toml")]);
        let err = load_with(HashMap::new(), env, None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("tact-cli.toml"),
            "[backend]\ncommand = \"from-file\"\n".to_string(),
        );
        let env = env_map(&[
            (BACKEND_COMMAND_ENV, "from-env"),
            (BACKEND_TIMEOUT_ENV, "30"),
            (REVISION_TIMEOUT_ENV, "150"),
        ]);
        let loaded = load_with(files, env, None).unwrap();
        assert_eq!(loaded.config.backend.command, "from-env");
        assert_eq!(loaded.config.backend.timeout_secs, 30);
        assert_eq!(loaded.config.revision.timeout_ms, 150);
    }

    #[test]
    fn invalid_numeric_override_is_rejected() {
        let env = env_map(&[(BACKEND_TIMEOUT_ENV, "soon")]);
        let err = load_with(HashMap::new(), env, None).unwrap_err();
        assert!(err.to_string().contains("TACT_BACKEND_TIMEOUT_SECS"), "got: {err}");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("tact-cli.toml"),
            "[backend]\ncomand = \"typo\"\n".to_string(),
        );
        let err = load_with(files, HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");
    }

    #[test]
    fn empty_command_is_invalid() {
        let mut files = HashMap::new();
        files.insert(
            PathBuf::from("tact-cli.toml"),
            "[backend]\ncommand = \"  \"\n".to_string(),
        );
        let err = load_with(files, HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
    }

    fn load_with_read_error(
        failing: &'static str,
        kind: std::io::ErrorKind,
    ) -> Result<LoadedConfig, ConfigError> {
        load_config_from_sources(
            |path| {
                if path == Path::new(failing) {
                    Err(std::io::Error::new(kind, "unreadable"))
                } else {
                    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
                }
            },
            |_| None,
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn unreadable_local_file_is_reported() {
        let err = load_with_read_error("tact-cli.toml", std::io::ErrorKind::PermissionDenied)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn unreadable_global_file_is_reported() {
        let err = load_with_read_error("/cfg/tact/cli.toml", std::io::ErrorKind::PermissionDenied)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn local_path_that_is_a_directory_is_reported() {
        let dir = TestTempDir::new("settings-dir");
        std::fs::create_dir_all(dir.child("tact-cli.toml")).unwrap();
        let local = dir.child("tact-cli.toml");
        let err = load_config_from_sources(
            |path| {
                if path == Path::new("tact-cli.toml") {
                    std::fs::read_to_string(&local)
                } else {
                    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
                }
            },
            |_| None,
            || None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "got: {err}");
    }

    #[test]
    fn reads_real_file_through_explicit_path() {
        let dir = TestTempDir::new("settings");
        let path = dir.write_text("custom.toml", "[revision]\ntimeout_ms = 10\n");
        let env = env_map(&[(CONFIG_PATH_ENV, path.to_str().unwrap())]);
        let loaded = load_config_from_sources(
            |p| std::fs::read_to_string(p),
            |name| env.get(name).cloned(),
            || None,
        )
        .unwrap();
        assert_eq!(loaded.source, ConfigSource::Explicit(path.clone()));
        assert_eq!(loaded.config.revision.timeout_ms, 10);
    }
}

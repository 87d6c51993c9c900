//! Settings-file source discovery.
//!
//! Source order: explicit path > local file > global file > built-in defaults.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{GLOBAL_SETTINGS_DIR, GLOBAL_SETTINGS_FILE, LOCAL_SETTINGS_FILE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Settings loaded from the `TACT_CLI_CONFIG` path.
    Explicit(PathBuf),
    /// Settings loaded from `./tact-cli.toml`.
    Local,
    /// Settings loaded from `<config root>/tact/cli.toml`.
    Global(PathBuf),
    /// No file found; built-in defaults were used.
    BuiltInDefaults,
}

/// Read settings text from the highest-precedence available source.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // An explicit path must exist; a typo should not silently fall back.
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Some(text) = read_if_present(read_file, Path::new(LOCAL_SETTINGS_FILE))? {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(GLOBAL_SETTINGS_DIR).join(GLOBAL_SETTINGS_FILE);
        if let Some(text) = read_if_present(read_file, &global)? {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

/// Only a missing file falls through to the next source; any other read
/// failure is reported.
fn read_if_present<FRead>(read_file: &FRead, path: &Path) -> Result<Option<String>, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
{
    match read_file(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "settings file unreadable");
            Err(ConfigError::Io(err))
        }
    }
}

//! Default settings constants.

/// Executable spawned for builds when nothing else is configured.
pub(super) const DEFAULT_BACKEND_COMMAND: &str = "tact-compiler";
/// Cap on the `git rev-parse` call made by `tact --version`.
pub(super) const DEFAULT_REVISION_TIMEOUT_MS: u64 = 2_000;
/// Local settings file name, looked up in the working directory.
pub(super) const LOCAL_SETTINGS_FILE: &str = "tact-cli.toml";
/// Directory under the config root holding the global settings file.
pub(super) const GLOBAL_SETTINGS_DIR: &str = "tact";
/// Global settings file name.
pub(super) const GLOBAL_SETTINGS_FILE: &str = "cli.toml";

//! Environment overrides applied on top of file settings.

use crate::error::ConfigError;

use super::Config;

/// Names the settings file explicitly.
pub const CONFIG_PATH_ENV: &str = "TACT_CLI_CONFIG";
/// Overrides `backend.command`.
pub const BACKEND_COMMAND_ENV: &str = "TACT_BACKEND";
/// Overrides `backend.timeout_secs`.
pub const BACKEND_TIMEOUT_ENV: &str = "TACT_BACKEND_TIMEOUT_SECS";
/// Overrides `revision.timeout_ms`.
pub const REVISION_TIMEOUT_ENV: &str = "TACT_REVISION_TIMEOUT_MS";

pub(super) fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(command) = non_empty(env_lookup, BACKEND_COMMAND_ENV) {
        config.backend.command = command;
    }
    if let Some(raw) = non_empty(env_lookup, BACKEND_TIMEOUT_ENV) {
        config.backend.timeout_secs = parse_u64(BACKEND_TIMEOUT_ENV, &raw, "seconds")?;
    }
    if let Some(raw) = non_empty(env_lookup, REVISION_TIMEOUT_ENV) {
        config.revision.timeout_ms = parse_u64(REVISION_TIMEOUT_ENV, &raw, "milliseconds")?;
    }
    Ok(())
}

pub(super) fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_u64(name: &str, raw: &str, unit: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "invalid {name} value `{raw}`: expected non-negative integer {unit}"
        ))
    })
}

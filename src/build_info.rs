//! Compile-time build metadata exposed to the version surface.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the `tact --version` block.
pub fn version_text(version: &str, revision: Option<&str>) -> String {
    match revision {
        Some(rev) => format!("{version}\ngit commit: {rev}"),
        None => version.to_string(),
    }
}

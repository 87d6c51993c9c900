//! Diagnostic logging setup.
//!
//! Events go to stderr so they never mix with values printed on stdout.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Env var holding a `tracing` filter directive, e.g. `TACT_LOG=tact_cli=debug`.
pub const LOG_ENV: &str = "TACT_LOG";

/// Default directive when `TACT_LOG` is unset.
pub fn default_directive(quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_raises_threshold() {
        assert_eq!(default_directive(false), "warn");
        assert_eq!(default_directive(true), "error");
    }

    #[test]
    fn init_is_idempotent() {
        init(false);
        init(true);
        tracing::debug!("still alive");
    }
}

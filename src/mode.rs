//! Mode resolution: classify a parsed invocation and pick its compilation mode.
//!
//! Checks run in a fixed priority order, from the most overriding (help,
//! version) to the most specific (positional arity). The first match wins, so
//! a user who supplies conflicting mode flags always sees that complaint even
//! when other problems are also present.

use serde::Serialize;

use crate::cli::Invocation;
use crate::error::UsageError;

/// The single compilation behavior selected for a build invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CompilationMode {
    /// No explicit mode flag; the backend decides from config/projects.
    #[default]
    Default,
    CheckOnly,
    FuncOnly,
    FullWithDecompilation,
}

impl CompilationMode {
    /// Mode selector sent to the backend; `None` lets the backend use its default.
    pub fn selector(self) -> Option<Self> {
        match self {
            Self::Default => None,
            other => Some(other),
        }
    }
}

/// Outcome of classifying an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `--help` was given.
    Help,
    /// `--version` was given.
    Version,
    /// `--eval` was given; evaluate the expression and stop.
    Evaluate(String),
    /// The flag combination is malformed.
    Invalid(UsageError),
    /// Nothing to do: no config, file, mode flag or project.
    Bare,
    /// A well-formed build request in the given mode.
    Build(CompilationMode),
}

/// Classify `inv`. Pure: emits nothing and touches no process state.
pub fn resolve(inv: &Invocation) -> Resolution {
    if inv.help {
        return Resolution::Help;
    }
    if inv.version {
        return Resolution::Version;
    }
    if let Some(expr) = &inv.eval {
        return Resolution::Evaluate(expr.clone());
    }

    let has_file = !inv.input.is_empty();
    if inv.config.is_some() && has_file {
        return Resolution::Invalid(UsageError::BothConfigAndFile);
    }

    let mode_flags = [inv.check, inv.func, inv.with_decompilation]
        .iter()
        .filter(|set| **set)
        .count();
    if mode_flags > 1 {
        return Resolution::Invalid(UsageError::ConflictingModes);
    }

    let has_source = inv.config.is_some() || has_file;
    if !has_source && mode_flags > 0 {
        return Resolution::Invalid(UsageError::MissingConfigOrFile);
    }
    if inv.input.len() > 1 {
        return Resolution::Invalid(UsageError::MultipleFiles);
    }
    if !has_source && inv.projects.is_empty() {
        return Resolution::Bare;
    }

    Resolution::Build(select_mode(inv))
}

fn select_mode(inv: &Invocation) -> CompilationMode {
    if inv.check {
        CompilationMode::CheckOnly
    } else if inv.func {
        CompilationMode::FuncOnly
    } else if inv.with_decompilation {
        CompilationMode::FullWithDecompilation
    } else {
        CompilationMode::Default
    }
}

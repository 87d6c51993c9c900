//! Output contract and the default terminal renderer.
//!
//! `RenderSink` is the only way orchestration code writes to the user, so
//! tests can substitute a recording sink without touching stdout/stderr.

use std::io::{IsTerminal, Write};

use crossterm::style::{Color, Stylize};

/// Injectable output interface used by orchestration code.
pub trait RenderSink: Send + Sync {
    /// Print an evaluated value to stdout.
    fn value(&self, text: &str);
    /// Print version text to stdout.
    fn version(&self, text: &str);
    /// Print usage text to stdout.
    fn help(&self, text: &str);
    /// Print usage text to stderr (after a usage error).
    fn help_to_stderr(&self, text: &str);
    /// Print a warning line to stderr.
    fn warn(&self, msg: &str);
    /// Print an error line to stderr.
    fn error(&self, msg: &str);
}

/// Plain stdout/stderr renderer with optional color on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color only when stderr is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && std::io::stderr().is_terminal())
    }

    fn stdout_line(text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}", text.trim_end_matches('\n'));
        let _ = out.flush();
    }
}

impl RenderSink for Renderer {
    fn value(&self, text: &str) {
        Self::stdout_line(text);
    }

    fn version(&self, text: &str) {
        Self::stdout_line(text);
    }

    fn help(&self, text: &str) {
        Self::stdout_line(text);
    }

    fn help_to_stderr(&self, text: &str) {
        eprintln!("{}", text.trim_end_matches('\n'));
    }

    fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{}", msg.with(Color::Yellow));
        } else {
            eprintln!("{msg}");
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{}", msg.with(Color::Red).bold());
        } else {
            eprintln!("{msg}");
        }
    }
}

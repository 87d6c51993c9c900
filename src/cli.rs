//! CLI argument parsing via clap.

use clap::{ArgAction, CommandFactory, Parser};

const HELP_EXAMPLES: &str = "\
Examples:
  tact --version
  tact --config ./tact.config.json --project main
  tact --check ./contract.tact
  tact -e '(1 + 2) * 3'";

/// Immutable snapshot of one parsed command line.
///
/// `--help` and `--version` are plain flags rather than clap actions so the
/// mode resolver decides their priority against everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(
    name = "tact",
    about = "Compile Tact contracts, check them, or evaluate constant expressions.",
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = HELP_EXAMPLES
)]
pub struct Invocation {
    /// Path to the project config file.
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<String>,

    /// Build only the named project(s) from the config file. Repeatable.
    #[arg(short = 'p', long = "project", value_name = "NAME", action = ArgAction::Append)]
    pub projects: Vec<String>,

    /// Suppress compiler log output.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Compile, then decompile the produced code.
    #[arg(long = "with-decompilation")]
    pub with_decompilation: bool,

    /// Emit intermediate FunC code only.
    #[arg(long = "func")]
    pub func: bool,

    /// Perform syntax and type checking only.
    #[arg(long = "check")]
    pub check: bool,

    /// Evaluate a constant expression and exit.
    #[arg(
        short = 'e',
        long = "eval",
        value_name = "EXPRESSION",
        allow_hyphen_values = true
    )]
    pub eval: Option<String>,

    /// Print the version and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Print this help and exit.
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Tact source file to compile.
    #[arg(value_name = "FILE")]
    pub input: Vec<String>,
}

impl Invocation {
    /// True when any of the build-only flags were given.
    pub fn has_build_flags(&self) -> bool {
        self.config.is_some()
            || !self.projects.is_empty()
            || self.with_decompilation
            || self.func
            || self.check
            || !self.input.is_empty()
    }
}

/// Render the full usage text shown for `--help` and usage errors.
pub fn help_text() -> String {
    Invocation::command().render_help().to_string()
}

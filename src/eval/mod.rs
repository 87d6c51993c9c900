//! Built-in constant expression evaluator behind `tact --eval`.
//!
//! Integers are `i128`; division and modulo use floor semantics. Every failure
//! is returned as an [`EvalError`], the evaluator never panics on user input.

mod interp;
mod lexer;
mod parser;

use std::fmt;

/// A fully evaluated constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i128),
    Bool(bool),
    Null,
    Str(String),
}

impl Value {
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Bool(_) => "Bool",
            Self::Null => "null",
            Self::Str(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
            Self::Str(s) => write!(f, "\"{}\"", escape_str(s)),
        }
    }
}

/// Escape `s` using only the escape forms the lexer reads back.
fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Parse or evaluation failure with an optional 1-based column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub message: String,
    pub column: Option<usize>,
}

impl EvalError {
    pub(crate) fn at(column: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            column: Some(column),
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) => write!(f, "{} (at column {col})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

/// Parse `source` as a single constant expression and evaluate it.
pub fn parse_and_eval(source: &str) -> Result<Value, EvalError> {
    let tokens = lexer::Lexer::new(source).lex_all()?;
    let expr = parser::Parser::new(tokens).parse()?;
    interp::eval(&expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(src: &str) -> Value {
        parse_and_eval(src).unwrap_or_else(|e| panic!("{src}: {e}"))
    }

    fn err(src: &str) -> String {
        parse_and_eval(src).unwrap_err().message
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(ok("1+1"), Value::Int(2));
        assert_eq!(ok("(1 + 2) * 3 - 4"), Value::Int(5));
        assert_eq!(ok("0xff + 0b1 + 0o7"), Value::Int(263));
    }

    #[test]
    fn division_by_zero_is_a_tagged_failure() {
        assert_eq!(err("1/0"), "Division by zero");
        assert_eq!(err("1 % 0"), "Division by zero");
    }

    #[test]
    fn displays_values() {
        assert_eq!(ok("1+1").to_string(), "2");
        assert_eq!(ok("!true").to_string(), "false");
        assert_eq!(ok("null").to_string(), "null");
        assert_eq!(ok(r#""a\"b""#).to_string(), r#""a\"b""#);
    }

    #[test]
    fn strings_display_with_lexer_escapes() {
        let shown = ok(r#""tab\there\n\x1b[0m\u{85}\\ é""#).to_string();
        assert_eq!(shown, r#""tab\there\n\x1b[0m\u{85}\\ é""#);
        assert_eq!(ok(&shown).to_string(), shown);
        assert_eq!(ok(r#""\v\b\f\x7f""#).to_string(), r#""\v\b\f\x7f""#);
    }

    #[test]
    fn deep_nesting_is_a_tagged_failure() {
        let n = 20_000;
        let src = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(err(&src), "Expression nested too deeply");
        assert_eq!(err(&format!("{}1", "-".repeat(100_000))), "Expression nested too deeply");
        assert_eq!(ok(&format!("{}5", "-".repeat(100))), Value::Int(5));
    }

    #[test]
    fn parse_errors_carry_columns() {
        let e = parse_and_eval("1 +").unwrap_err();
        assert_eq!(e.column, Some(4));
        assert!(e.to_string().ends_with("(at column 4)"));
    }
}

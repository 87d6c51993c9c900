//! Tokenizer for constant expressions.

use super::EvalError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Int(i128),
    Str(String),
    True,
    False,
    Null,
    Symbol(Symbol),
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    LParen,
    RParen,
    Question,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    BangBang,
    Tilde,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based column of the first character.
    pub col: usize,
}

pub struct Lexer {
    chars: Vec<char>,
    idx: usize,
}

impl Lexer {
    pub fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            idx: 0,
        }
    }

    pub fn lex_all(mut self) -> Result<Vec<Token>, EvalError> {
        let mut out = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            out.push(token);
            if done {
                return Ok(out);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, EvalError> {
        self.skip_whitespace_and_comments()?;
        let col = self.idx + 1;
        let Some(ch) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                col,
            });
        };

        if ch.is_ascii_digit() {
            let value = self.read_number(col)?;
            return Ok(Token {
                kind: TokenKind::Int(value),
                col,
            });
        }
        if ch == '"' {
            let text = self.read_string(col)?;
            return Ok(Token {
                kind: TokenKind::Str(text),
                col,
            });
        }
        if is_ident_start(ch) {
            let word = self.read_while(is_ident_continue);
            let kind = match word.as_str() {
                "true" => TokenKind::True,
                "false" => TokenKind::False,
                "null" => TokenKind::Null,
                _ => {
                    return Err(EvalError::at(
                        col,
                        format!("Cannot evaluate identifier `{word}` in a constant expression"),
                    ))
                }
            };
            return Ok(Token { kind, col });
        }

        let symbol = self.read_symbol(ch, col)?;
        Ok(Token {
            kind: TokenKind::Symbol(symbol),
            col,
        })
    }

    fn read_symbol(&mut self, ch: char, col: usize) -> Result<Symbol, EvalError> {
        let next = self.peek_next_char();
        let (symbol, width) = match (ch, next) {
            ('!', Some('!')) => (Symbol::BangBang, 2),
            ('!', Some('=')) => (Symbol::Ne, 2),
            ('=', Some('=')) => (Symbol::EqEq, 2),
            ('&', Some('&')) => (Symbol::AmpAmp, 2),
            ('|', Some('|')) => (Symbol::PipePipe, 2),
            ('<', Some('<')) => (Symbol::Shl, 2),
            ('>', Some('>')) => (Symbol::Shr, 2),
            ('<', Some('=')) => (Symbol::Le, 2),
            ('>', Some('=')) => (Symbol::Ge, 2),
            ('(', _) => (Symbol::LParen, 1),
            (')', _) => (Symbol::RParen, 1),
            ('?', _) => (Symbol::Question, 1),
            (':', _) => (Symbol::Colon, 1),
            ('+', _) => (Symbol::Plus, 1),
            ('-', _) => (Symbol::Minus, 1),
            ('*', _) => (Symbol::Star, 1),
            ('/', _) => (Symbol::Slash, 1),
            ('%', _) => (Symbol::Percent, 1),
            ('!', _) => (Symbol::Bang, 1),
            ('~', _) => (Symbol::Tilde, 1),
            ('&', _) => (Symbol::Amp, 1),
            ('|', _) => (Symbol::Pipe, 1),
            ('^', _) => (Symbol::Caret, 1),
            ('<', _) => (Symbol::Lt, 1),
            ('>', _) => (Symbol::Gt, 1),
            _ => return Err(EvalError::at(col, format!("Unexpected character `{ch}`"))),
        };
        self.idx += width;
        Ok(symbol)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), EvalError> {
        loop {
            match (self.peek_char(), self.peek_next_char()) {
                (Some(c), _) if c.is_whitespace() => self.idx += 1,
                (Some('/'), Some('/')) => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.idx += 1;
                    }
                }
                (Some('/'), Some('*')) => {
                    let col = self.idx + 1;
                    self.idx += 2;
                    loop {
                        match (self.peek_char(), self.peek_next_char()) {
                            (Some('*'), Some('/')) => {
                                self.idx += 2;
                                break;
                            }
                            (Some(_), _) => self.idx += 1,
                            (None, _) => {
                                return Err(EvalError::at(col, "Unterminated block comment"))
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn read_number(&mut self, col: usize) -> Result<i128, EvalError> {
        let radix = match (self.peek_char(), self.peek_next_char()) {
            (Some('0'), Some('x' | 'X')) => 16,
            (Some('0'), Some('o' | 'O')) => 8,
            (Some('0'), Some('b' | 'B')) => 2,
            _ => 10,
        };
        if radix != 10 {
            self.idx += 2;
        }
        let raw = self.read_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if raw.is_empty() || raw.starts_with('_') || raw.ends_with('_') || raw.contains("__") {
            return Err(EvalError::at(col, format!("Invalid number literal `{raw}`")));
        }
        let digits: String = raw.chars().filter(|c| *c != '_').collect();
        if !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(EvalError::at(col, format!("Invalid number literal `{raw}`")));
        }
        if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
            return Err(EvalError::at(
                col,
                format!("Decimal literal `{raw}` must not have leading zeros"),
            ));
        }
        i128::from_str_radix(&digits, radix).map_err(|_| EvalError::at(col, "Integer overflow"))
    }

    fn read_string(&mut self, col: usize) -> Result<String, EvalError> {
        self.idx += 1;
        let mut out = String::new();
        loop {
            let Some(ch) = self.peek_char() else {
                return Err(EvalError::at(col, "Unterminated string literal"));
            };
            self.idx += 1;
            match ch {
                '"' => return Ok(out),
                '\\' => out.push(self.read_escape(col)?),
                '\n' => return Err(EvalError::at(col, "Unterminated string literal")),
                other => out.push(other),
            }
        }
    }

    fn read_escape(&mut self, col: usize) -> Result<char, EvalError> {
        let Some(ch) = self.peek_char() else {
            return Err(EvalError::at(col, "Unterminated string literal"));
        };
        self.idx += 1;
        let escaped = match ch {
            '\\' => '\\',
            '"' => '"',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0b}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'x' => self.read_hex_escape(2, col)?,
            'u' if self.peek_char() == Some('{') => {
                self.idx += 1;
                let hex = self.read_while(|c| c.is_ascii_hexdigit());
                if self.peek_char() != Some('}') || hex.is_empty() || hex.len() > 6 {
                    return Err(EvalError::at(col, "Invalid unicode escape"));
                }
                self.idx += 1;
                code_point(&hex, col)?
            }
            'u' => self.read_hex_escape(4, col)?,
            other => {
                return Err(EvalError::at(
                    col,
                    format!("Invalid escape sequence `\\{other}`"),
                ))
            }
        };
        Ok(escaped)
    }

    fn read_hex_escape(&mut self, len: usize, col: usize) -> Result<char, EvalError> {
        let end = self.idx + len;
        if end > self.chars.len() {
            return Err(EvalError::at(col, "Invalid hex escape"));
        }
        let hex: String = self.chars[self.idx..end].iter().collect();
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EvalError::at(col, "Invalid hex escape"));
        }
        self.idx = end;
        code_point(&hex, col)
    }

    fn read_while<F>(&mut self, f: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut s = String::new();
        while let Some(ch) = self.peek_char() {
            if !f(ch) {
                break;
            }
            s.push(ch);
            self.idx += 1;
        }
        s
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_next_char(&self) -> Option<char> {
        self.chars.get(self.idx + 1).copied()
    }
}

fn code_point(hex: &str, col: usize) -> Result<char, EvalError> {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| EvalError::at(col, format!("Invalid code point `{hex}`")))
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

//! Precedence-climbing parser producing a small expression tree.

use super::lexer::{Symbol, Token, TokenKind};
use super::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
    BitNot,
    NonNull,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Int(i128),
    Bool(bool),
    Null,
    Str(String),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
        col: usize,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        col: usize,
    },
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
        col: usize,
    },
}

/// Deepest expression tree (and parser recursion) accepted before giving up.
pub const MAX_DEPTH: usize = 256;

const TOO_DEEP: &str = "Expression nested too deeply";

/// An expression together with the height of its tree.
type Parsed = (Expr, usize);

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse exactly one expression spanning all tokens.
    ///
    /// The resulting tree is at most [`MAX_DEPTH`] levels high, so walking
    /// or dropping it recursively is bounded.
    pub fn parse(mut self) -> Result<Expr, EvalError> {
        let (expr, _) = self.parse_conditional()?;
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            return Err(EvalError::at(token.col, "Expected end of expression"));
        }
        Ok(expr)
    }

    fn parse_conditional(&mut self) -> Result<Parsed, EvalError> {
        self.enter()?;
        let parsed = self.parse_conditional_inner();
        self.depth -= 1;
        parsed
    }

    fn parse_conditional_inner(&mut self) -> Result<Parsed, EvalError> {
        let (cond, cond_h) = self.parse_binary_expr(0)?;
        if !self.at_symbol(Symbol::Question) {
            return Ok((cond, cond_h));
        }
        let col = self.bump().col;
        let (then, then_h) = self.parse_conditional()?;
        self.expect_symbol(Symbol::Colon, "Expected `:` in conditional expression")?;
        let (otherwise, otherwise_h) = self.parse_conditional()?;
        let height = node_height(col, cond_h.max(then_h).max(otherwise_h))?;
        Ok((
            Expr::Conditional {
                cond: Box::new(cond),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
                col,
            },
            height,
        ))
    }

    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Parsed, EvalError> {
        let (mut left, mut left_h) = self.parse_unary_expr()?;
        loop {
            let Some((prec, op)) = self.peek_binary_op() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            let col = self.bump().col;
            let (right, right_h) = self.parse_binary_expr(prec + 1)?;
            left_h = node_height(col, left_h.max(right_h))?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                col,
            };
        }
        Ok((left, left_h))
    }

    fn parse_unary_expr(&mut self) -> Result<Parsed, EvalError> {
        let op = match self.peek().kind {
            TokenKind::Symbol(Symbol::Minus) => Some(UnaryOp::Neg),
            TokenKind::Symbol(Symbol::Plus) => Some(UnaryOp::Plus),
            TokenKind::Symbol(Symbol::Bang) => Some(UnaryOp::Not),
            TokenKind::Symbol(Symbol::Tilde) => Some(UnaryOp::BitNot),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_postfix_expr();
        };
        self.enter()?;
        let col = self.bump().col;
        let inner = self.parse_unary_expr();
        self.depth -= 1;
        let (expr, expr_h) = inner?;
        Ok((
            Expr::Unary {
                op,
                expr: Box::new(expr),
                col,
            },
            node_height(col, expr_h)?,
        ))
    }

    fn parse_postfix_expr(&mut self) -> Result<Parsed, EvalError> {
        let (mut expr, mut height) = self.parse_primary()?;
        while self.at_symbol(Symbol::BangBang) {
            let col = self.bump().col;
            height = node_height(col, height)?;
            expr = Expr::Unary {
                op: UnaryOp::NonNull,
                expr: Box::new(expr),
                col,
            };
        }
        Ok((expr, height))
    }

    fn parse_primary(&mut self) -> Result<Parsed, EvalError> {
        let token = self.bump();
        let leaf = match token.kind {
            TokenKind::Int(value) => Expr::Int(value),
            TokenKind::Str(text) => Expr::Str(text),
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Null => Expr::Null,
            TokenKind::Symbol(Symbol::LParen) => {
                let inner = self.parse_conditional()?;
                self.expect_symbol(Symbol::RParen, "Expected `)`")?;
                return Ok(inner);
            }
            TokenKind::Eof => {
                return Err(EvalError::at(token.col, "Unexpected end of expression"))
            }
            TokenKind::Symbol(_) => {
                return Err(EvalError::at(token.col, "Expected an expression"))
            }
        };
        Ok((leaf, 1))
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::at(self.peek().col, TOO_DEEP));
        }
        self.depth += 1;
        Ok(())
    }

    fn peek_binary_op(&self) -> Option<(u8, BinaryOp)> {
        let TokenKind::Symbol(symbol) = self.peek().kind else {
            return None;
        };
        let pair = match symbol {
            Symbol::PipePipe => (1, BinaryOp::Or),
            Symbol::AmpAmp => (2, BinaryOp::And),
            Symbol::Pipe => (3, BinaryOp::BitOr),
            Symbol::Caret => (4, BinaryOp::BitXor),
            Symbol::Amp => (5, BinaryOp::BitAnd),
            Symbol::EqEq => (6, BinaryOp::Eq),
            Symbol::Ne => (6, BinaryOp::Ne),
            Symbol::Lt => (7, BinaryOp::Lt),
            Symbol::Le => (7, BinaryOp::Le),
            Symbol::Gt => (7, BinaryOp::Gt),
            Symbol::Ge => (7, BinaryOp::Ge),
            Symbol::Shl => (8, BinaryOp::Shl),
            Symbol::Shr => (8, BinaryOp::Shr),
            Symbol::Plus => (9, BinaryOp::Add),
            Symbol::Minus => (9, BinaryOp::Sub),
            Symbol::Star => (10, BinaryOp::Mul),
            Symbol::Slash => (10, BinaryOp::Div),
            Symbol::Percent => (10, BinaryOp::Mod),
            _ => return None,
        };
        Some(pair)
    }

    fn expect_symbol(&mut self, symbol: Symbol, message: &str) -> Result<(), EvalError> {
        if self.at_symbol(symbol) {
            self.bump();
            return Ok(());
        }
        Err(EvalError::at(self.peek().col, message))
    }

    fn at_symbol(&self, symbol: Symbol) -> bool {
        self.peek().kind == TokenKind::Symbol(symbol)
    }

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with `Eof`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }
}

fn node_height(col: usize, child_height: usize) -> Result<usize, EvalError> {
    let height = child_height + 1;
    if height > MAX_DEPTH {
        return Err(EvalError::at(col, TOO_DEEP));
    }
    Ok(height)
}

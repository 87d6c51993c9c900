//! Tree-walking evaluation of parsed constant expressions.

use super::parser::{BinaryOp, Expr, UnaryOp};
use super::{EvalError, Value};

const OVERFLOW: &str = "Integer overflow";
const DIV_ZERO: &str = "Division by zero";

pub fn eval(expr: &Expr) -> Result<Value, EvalError> {
    match expr {
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Unary { op, expr, col } => eval_unary(*op, eval(expr)?, *col),
        Expr::Binary {
            op,
            left,
            right,
            col,
        } => eval_binary(*op, left, right, *col),
        Expr::Conditional {
            cond,
            then,
            otherwise,
            col,
        } => {
            if expect_bool(eval(cond)?, "?:", *col)? {
                eval(then)
            } else {
                eval(otherwise)
            }
        }
    }
}

fn eval_unary(op: UnaryOp, value: Value, col: usize) -> Result<Value, EvalError> {
    match op {
        UnaryOp::NonNull => match value {
            Value::Null => Err(EvalError::at(col, "Null value")),
            other => Ok(other),
        },
        UnaryOp::Not => Ok(Value::Bool(!expect_bool(value, "!", col)?)),
        UnaryOp::Plus => Ok(Value::Int(expect_int(value, "+", col)?)),
        UnaryOp::Neg => expect_int(value, "-", col)?
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::at(col, OVERFLOW)),
        UnaryOp::BitNot => Ok(Value::Int(!expect_int(value, "~", col)?)),
    }
}

fn eval_binary(op: BinaryOp, left: &Expr, right: &Expr, col: usize) -> Result<Value, EvalError> {
    // Logical operators short-circuit, so the right side is evaluated lazily.
    match op {
        BinaryOp::Or => {
            if expect_bool(eval(left)?, "||", col)? {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(expect_bool(eval(right)?, "||", col)?));
        }
        BinaryOp::And => {
            if !expect_bool(eval(left)?, "&&", col)? {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(expect_bool(eval(right)?, "&&", col)?));
        }
        _ => {}
    }

    let lhs = eval(left)?;
    let rhs = eval(right)?;
    match op {
        BinaryOp::Eq => values_equal(&lhs, &rhs, "==", col).map(Value::Bool),
        BinaryOp::Ne => values_equal(&lhs, &rhs, "!=", col).map(|eq| Value::Bool(!eq)),
        _ => {
            let symbol = op_symbol(op);
            let a = expect_int(lhs, symbol, col)?;
            let b = expect_int(rhs, symbol, col)?;
            int_binary(op, a, b, col)
        }
    }
}

fn int_binary(op: BinaryOp, a: i128, b: i128, col: usize) -> Result<Value, EvalError> {
    let overflow = || EvalError::at(col, OVERFLOW);
    let n = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(overflow)?,
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(overflow)?,
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(overflow)?,
        BinaryOp::Div => floor_div(a, b, col)?,
        BinaryOp::Mod => floor_mod(a, b, col)?,
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl => {
            let shift = shift_amount(b, col)?;
            let shifted = a << shift;
            if shifted >> shift != a {
                return Err(overflow());
            }
            shifted
        }
        BinaryOp::Shr => a >> shift_amount(b, col)?,
        BinaryOp::Lt => return Ok(Value::Bool(a < b)),
        BinaryOp::Le => return Ok(Value::Bool(a <= b)),
        BinaryOp::Gt => return Ok(Value::Bool(a > b)),
        BinaryOp::Ge => return Ok(Value::Bool(a >= b)),
        BinaryOp::Or | BinaryOp::And | BinaryOp::Eq | BinaryOp::Ne => {
            unreachable!("handled by eval_binary")
        }
    };
    Ok(Value::Int(n))
}

fn floor_div(a: i128, b: i128, col: usize) -> Result<i128, EvalError> {
    if b == 0 {
        return Err(EvalError::at(col, DIV_ZERO));
    }
    let q = a.checked_div(b).ok_or_else(|| EvalError::at(col, OVERFLOW))?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

fn floor_mod(a: i128, b: i128, col: usize) -> Result<i128, EvalError> {
    if b == 0 {
        return Err(EvalError::at(col, DIV_ZERO));
    }
    if b == -1 {
        return Ok(0);
    }
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn shift_amount(b: i128, col: usize) -> Result<u32, EvalError> {
    if (0..=127).contains(&b) {
        Ok(b as u32)
    } else {
        Err(EvalError::at(col, "Shift amount out of range"))
    }
}

fn values_equal(lhs: &Value, rhs: &Value, symbol: &str, col: usize) -> Result<bool, EvalError> {
    match (lhs, rhs) {
        (Value::Null, _) | (_, Value::Null) => Ok(lhs == rhs),
        (Value::Int(_), Value::Int(_))
        | (Value::Bool(_), Value::Bool(_))
        | (Value::Str(_), Value::Str(_)) => Ok(lhs == rhs),
        _ => Err(EvalError::at(
            col,
            format!(
                "Type error: cannot compare {} and {} with `{symbol}`",
                lhs.kind_name(),
                rhs.kind_name()
            ),
        )),
    }
}

fn expect_int(value: Value, symbol: &str, col: usize) -> Result<i128, EvalError> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(type_error(&other, "Int", symbol, col)),
    }
}

fn expect_bool(value: Value, symbol: &str, col: usize) -> Result<bool, EvalError> {
    match value {
        Value::Bool(b) => Ok(b),
        other => Err(type_error(&other, "Bool", symbol, col)),
    }
}

fn type_error(value: &Value, expected: &str, symbol: &str, col: usize) -> EvalError {
    EvalError::at(
        col,
        format!(
            "Type error: `{symbol}` expects {expected}, got {}",
            value.kind_name()
        ),
    )
}

fn op_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Or => "||",
        BinaryOp::And => "&&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
        BinaryOp::BitAnd => "&",
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Le => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::Ge => ">=",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::Mod => "%",
    }
}

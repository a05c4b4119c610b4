//! Binary integer operators

use crate::error::{EvalError, Result};

/// The four K2 arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, truncating toward zero
    Divide,
}

impl BinaryOp {
    /// Look up an operator by its one-character symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    /// Apply the operator to two operands
    ///
    /// Division by zero and any result outside the `i64` range (including
    /// `i64::MIN / -1`) report a typed error instead of wrapping.
    pub fn apply(self, left: i64, right: i64) -> Result<i64> {
        match self {
            BinaryOp::Add => left.checked_add(right).ok_or(EvalError::Overflow),
            BinaryOp::Subtract => left.checked_sub(right).ok_or(EvalError::Overflow),
            BinaryOp::Multiply => left.checked_mul(right).ok_or(EvalError::Overflow),
            BinaryOp::Divide => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                left.checked_div(right).ok_or(EvalError::Overflow)
            }
        }
    }
}

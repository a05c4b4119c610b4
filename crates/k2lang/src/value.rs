//! Operand resolution

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{EvalError, Result};

/// Variable bindings for one interpreter session
pub type Environment = HashMap<String, i64, RandomState>;

/// Resolve a token to an integer value
///
/// A token whose first character is a digit, or a `-` immediately followed
/// by a digit, is parsed as a signed decimal literal; anything else is
/// looked up as a variable name. Literals that do not parse as an `i64`
/// (malformed or out of range) are rejected rather than truncated.
pub fn resolve(env: &Environment, token: &str) -> Result<i64> {
    if is_literal(token) {
        token
            .parse::<i64>()
            .map_err(|_| EvalError::InvalidLiteral(token.to_string()))
    } else {
        env.get(token)
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable(token.to_string()))
    }
}

// Classification order matters: the digit test runs before any variable
// lookup, so a variable can never shadow a number.
fn is_literal(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

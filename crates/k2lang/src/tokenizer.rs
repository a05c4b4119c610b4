//! Line tokenizer using nom
//!
//! Token forms:
//! ```text
//! + - * / = ;    one single-character token each, whatever surrounds them
//! anything else  runs of non-whitespace, non-operator characters
//! ```
//!
//! Whitespace separates tokens and is never emitted, so `a=1` and
//! `a = 1` tokenize identically. A token is never empty.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{multispace0, one_of},
    combinator::{all_consuming, recognize},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::{EvalError, Result};

/// Characters that always form their own single-character token
pub const OPERATOR_CHARS: &str = "+-*/=;";

fn operator(input: &str) -> IResult<&str, &str> {
    recognize(one_of(OPERATOR_CHARS))(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !OPERATOR_CHARS.contains(c))(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, alt((operator, word)))(input)
}

/// Split a line into tokens
///
/// An empty or whitespace-only line yields an empty sequence. Every
/// non-whitespace character lands in exactly one token, so this never
/// fails in practice; the error branch exists for API uniformity.
pub fn tokenize(line: &str) -> Result<Vec<&str>> {
    let (_, tokens) = all_consuming(terminated(many0(token), multispace0))(line)
        .map_err(|err| EvalError::Parse(err.to_string()))?;
    Ok(tokens)
}

//! # k2lang
//!
//! Interpreter core for K2, a line-oriented toy numeric language:
//! variables, single left-to-right integer operations, a `print`
//! statement, and a runtime toggle for execution-time reporting.
//!
//! One line is one statement. The pipeline is tokenizer -> statement
//! dispatcher -> value resolver / operation table, with all mutable state
//! held in an explicit [`Session`]. Statement errors are never fatal to a
//! session.

#![warn(missing_docs)]

mod error;
mod ops;
mod session;
mod tokenizer;
mod value;

pub use error::{EvalError, Result};
pub use ops::BinaryOp;
pub use session::{Outcome, Printed, Session};
pub use tokenizer::tokenize;
pub use value::{resolve, Environment};

//! Error types for k2lang

use std::fmt;

/// Result type alias for interpreter operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while evaluating a single statement.
///
/// None of these are fatal to a session: the statement that raised the
/// error is abandoned and the session stays usable for the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Line could not be split into tokens
    Parse(String),

    /// Variable referenced before any assignment
    UndefinedVariable(String),

    /// Operator symbol not in the operation table
    UnknownOperator(String),

    /// Right operand of `/` was zero
    DivisionByZero,

    /// Arithmetic result outside the `i64` range
    Overflow,

    /// Token classified as a literal that is not a valid `i64`
    InvalidLiteral(String),

    /// `print` with no argument token
    MissingPrintArgument,

    /// `show_exec_time` with no argument token
    MissingToggleArgument,

    /// `show_exec_time` argument other than `on` or `off`
    InvalidToggleArgument,

    /// Line matched no statement form
    UnknownStatement,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Parse(msg) => write!(f, "parse error: {}", msg),
            EvalError::UndefinedVariable(name) => write!(f, "undefined variable '{}'", name),
            EvalError::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::Overflow => write!(f, "arithmetic overflow"),
            EvalError::InvalidLiteral(token) => write!(f, "invalid numeric literal '{}'", token),
            EvalError::MissingPrintArgument => write!(f, "print requires an argument"),
            EvalError::MissingToggleArgument => {
                write!(f, "show_exec_time requires an argument (on/off)")
            }
            EvalError::InvalidToggleArgument => {
                write!(f, "show_exec_time argument must be 'on' or 'off'")
            }
            EvalError::UnknownStatement => write!(f, "unknown statement"),
        }
    }
}

impl std::error::Error for EvalError {}

//! Statement dispatch and session state

use std::time::Instant;

use crate::error::{EvalError, Result};
use crate::ops::BinaryOp;
use crate::tokenizer::tokenize;
use crate::value::{resolve, Environment};

/// What a statement asked the caller to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Printed {
    /// Nothing to display (empty lines, assignments)
    Nothing,
    /// An integer result on its own line
    Value(i64),
    /// The new state of the execution-time display flag
    Toggle(bool),
}

/// Result of executing one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Integer result of the statement (0 for no-ops and toggles)
    pub value: i64,
    /// What to write to standard output
    pub printed: Printed,
    /// Measured evaluation time, present when the display flag is on
    pub elapsed_nanos: Option<u128>,
}

impl Outcome {
    fn silent() -> Self {
        Outcome {
            value: 0,
            printed: Printed::Nothing,
            elapsed_nanos: None,
        }
    }
}

/// One interpreter session: variable bindings plus behavior flags.
///
/// Sessions are independent; nothing is process-global, so several can
/// coexist in one process. Variables live until the session is dropped and
/// are never unset.
pub struct Session {
    variables: Environment,
    show_exec_time: bool,
    cache_enabled: bool,
}

impl Session {
    /// Create a session with an empty environment.
    ///
    /// Execution-time display starts enabled, as does result caching.
    pub fn new() -> Self {
        Session {
            variables: Environment::default(),
            show_exec_time: true,
            cache_enabled: true,
        }
    }

    /// Tokenize and execute one line.
    ///
    /// Errors abort only this statement; the session remains valid. A
    /// failed statement never carries a timing measurement.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let tokens = tokenize(line)?;
        self.dispatch(&tokens)
    }

    /// Classify a token sequence and evaluate it.
    ///
    /// Classification priority: print, assignment, bare expression,
    /// show_exec_time toggle, unknown. The order is observable:
    /// `show_exec_time = 5` assigns to a variable of that name, and
    /// `print = 5` resolves the token `=`.
    fn dispatch(&mut self, tokens: &[&str]) -> Result<Outcome> {
        if tokens.is_empty() {
            return Ok(Outcome::silent());
        }

        // Timing covers evaluation only, not the tokenization above.
        let start = Instant::now();

        let (value, printed) = if tokens[0] == "print" {
            self.eval_print(tokens)?
        } else if tokens.len() >= 3 && tokens[1] == "=" {
            self.eval_assignment(tokens)?
        } else if tokens.len() >= 3 && BinaryOp::from_symbol(tokens[1]).is_some() {
            self.eval_expression(tokens)?
        } else if tokens[0] == "show_exec_time" {
            // Toggles report the new flag state and never a timing line.
            return self.eval_toggle(tokens);
        } else {
            return Err(EvalError::UnknownStatement);
        };

        let elapsed_nanos = self
            .show_exec_time
            .then(|| start.elapsed().as_nanos());

        Ok(Outcome {
            value,
            printed,
            elapsed_nanos,
        })
    }

    /// `print x` or `print a op b`
    fn eval_print(&self, tokens: &[&str]) -> Result<(i64, Printed)> {
        let arg = *tokens.get(1).ok_or(EvalError::MissingPrintArgument)?;

        let value = match tokens.get(2).and_then(|sym| BinaryOp::from_symbol(sym)) {
            Some(op) if tokens.len() >= 4 => {
                let left = resolve(&self.variables, arg)?;
                let right = resolve(&self.variables, tokens[3])?;
                op.apply(left, right)?
            }
            _ => resolve(&self.variables, arg)?,
        };

        Ok((value, Printed::Value(value)))
    }

    /// `name = value` or `name = a op b`; no output on success
    fn eval_assignment(&mut self, tokens: &[&str]) -> Result<(i64, Printed)> {
        let name = tokens[0];

        let value = if tokens.len() <= 4 {
            // Simple assignment; a trailing `;` token is tolerated.
            resolve(&self.variables, tokens[2])?
        } else {
            let left = resolve(&self.variables, tokens[2])?;
            let right = resolve(&self.variables, tokens[4])?;
            let op = BinaryOp::from_symbol(tokens[3])
                .ok_or_else(|| EvalError::UnknownOperator(tokens[3].to_string()))?;
            op.apply(left, right)?
        };

        self.variables.insert(name.to_string(), value);
        Ok((value, Printed::Nothing))
    }

    /// Bare `a op b`; prints the result, assigns nothing
    fn eval_expression(&self, tokens: &[&str]) -> Result<(i64, Printed)> {
        let left = resolve(&self.variables, tokens[0])?;
        let right = resolve(&self.variables, tokens[2])?;
        let op = BinaryOp::from_symbol(tokens[1])
            .ok_or_else(|| EvalError::UnknownOperator(tokens[1].to_string()))?;
        let value = op.apply(left, right)?;

        Ok((value, Printed::Value(value)))
    }

    /// `show_exec_time on|off`
    fn eval_toggle(&mut self, tokens: &[&str]) -> Result<Outcome> {
        let enabled = match tokens.get(1) {
            Some(&"on") => true,
            Some(&"off") => false,
            Some(_) => return Err(EvalError::InvalidToggleArgument),
            None => return Err(EvalError::MissingToggleArgument),
        };

        self.show_exec_time = enabled;
        Ok(Outcome {
            value: 0,
            printed: Printed::Toggle(enabled),
            elapsed_nanos: None,
        })
    }

    /// Current value of a variable, if assigned
    pub fn variable(&self, name: &str) -> Option<i64> {
        self.variables.get(name).copied()
    }

    /// Whether timing lines are displayed
    pub fn show_exec_time(&self) -> bool {
        self.show_exec_time
    }

    /// Whether the expression result cache is consulted
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Enable or disable the expression result cache for this session
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(session: &mut Session, line: &str) -> Outcome {
        session.execute(line).unwrap()
    }

    #[test]
    fn assign_then_print() {
        let mut session = Session::new();
        exec(&mut session, "x = 5;");
        let outcome = exec(&mut session, "print x;");
        assert_eq!(outcome.printed, Printed::Value(5));
        assert_eq!(session.variable("x"), Some(5));
    }

    #[test]
    fn trailing_terminator_is_tolerated() {
        let mut session = Session::new();
        exec(&mut session, "x = 5 ;");
        exec(&mut session, "y = 5");
        assert_eq!(session.variable("x"), session.variable("y"));
    }

    #[test]
    fn assignment_from_variable() {
        let mut session = Session::new();
        exec(&mut session, "x = 9");
        exec(&mut session, "y = x");
        assert_eq!(session.variable("y"), Some(9));
    }

    #[test]
    fn binary_assignment() {
        let mut session = Session::new();
        exec(&mut session, "x = 10");
        let outcome = exec(&mut session, "y = x * 3;");
        assert_eq!(outcome.value, 30);
        assert_eq!(outcome.printed, Printed::Nothing);
        assert_eq!(session.variable("y"), Some(30));
    }

    #[test]
    fn tokens_past_the_operation_are_ignored() {
        let mut session = Session::new();
        let outcome = exec(&mut session, "x = 1 + 2 ; garbage");
        assert_eq!(outcome.value, 3);
    }

    #[test]
    fn bare_expression_prints_without_assigning() {
        let mut session = Session::new();
        let outcome = exec(&mut session, "3 + 4;");
        assert_eq!(outcome.printed, Printed::Value(7));
        assert_eq!(session.variable("3"), None);
    }

    #[test]
    fn print_of_binary_expression() {
        let mut session = Session::new();
        let outcome = exec(&mut session, "print 3 + 4;");
        assert_eq!(outcome.printed, Printed::Value(7));
    }

    #[test]
    fn print_requires_an_argument() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("print"),
            Err(EvalError::MissingPrintArgument)
        );
    }

    #[test]
    fn undefined_variable_aborts_only_the_statement() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("print ghost"),
            Err(EvalError::UndefinedVariable("ghost".to_string()))
        );
        // session still live
        exec(&mut session, "x = 1");
        assert_eq!(session.variable("x"), Some(1));
    }

    #[test]
    fn division_by_zero_leaves_target_unset() {
        let mut session = Session::new();
        exec(&mut session, "x = 1");
        assert_eq!(session.execute("y = x / 0;"), Err(EvalError::DivisionByZero));
        assert_eq!(session.variable("y"), None);
        // and the next statement still runs
        let outcome = exec(&mut session, "y = 2");
        assert_eq!(outcome.value, 2);
    }

    #[test]
    fn unknown_operator_in_assignment() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("x = 1 % 2"),
            Err(EvalError::UnknownOperator("%".to_string()))
        );
    }

    #[test]
    fn operand_resolution_precedes_operator_lookup() {
        let mut session = Session::new();
        // both the operator and the right operand are bad; the operand
        // error wins
        assert_eq!(
            session.execute("x = 1 % y"),
            Err(EvalError::UndefinedVariable("y".to_string()))
        );
    }

    #[test]
    fn unknown_statement() {
        let mut session = Session::new();
        assert_eq!(session.execute("frobnicate 1"), Err(EvalError::UnknownStatement));
    }

    #[test]
    fn empty_and_blank_lines_are_noops() {
        let mut session = Session::new();
        assert_eq!(exec(&mut session, ""), Outcome::silent());
        assert_eq!(exec(&mut session, "  \t "), Outcome::silent());
    }

    #[test]
    fn toggle_controls_timing_lines() {
        let mut session = Session::new();
        assert!(exec(&mut session, "x = 1").elapsed_nanos.is_some());

        let outcome = exec(&mut session, "show_exec_time off");
        assert_eq!(outcome.printed, Printed::Toggle(false));
        assert_eq!(outcome.elapsed_nanos, None);
        assert!(!session.show_exec_time());
        assert!(exec(&mut session, "x = 2").elapsed_nanos.is_none());

        exec(&mut session, "show_exec_time on");
        assert!(exec(&mut session, "x = 3").elapsed_nanos.is_some());
    }

    #[test]
    fn toggle_itself_never_reports_timing() {
        let mut session = Session::new();
        // display is on by default, and still no timing for the toggle
        assert_eq!(exec(&mut session, "show_exec_time on").elapsed_nanos, None);
    }

    #[test]
    fn toggle_argument_validation() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("show_exec_time"),
            Err(EvalError::MissingToggleArgument)
        );
        assert_eq!(
            session.execute("show_exec_time maybe"),
            Err(EvalError::InvalidToggleArgument)
        );
    }

    #[test]
    fn toggle_name_can_still_be_assigned() {
        let mut session = Session::new();
        exec(&mut session, "show_exec_time = 5");
        assert_eq!(session.variable("show_exec_time"), Some(5));
        // the flag itself is untouched
        assert!(session.show_exec_time());
    }

    #[test]
    fn negative_division_truncates_toward_zero() {
        let mut session = Session::new();
        exec(&mut session, "a = 0 - 7");
        exec(&mut session, "b = a / 2");
        assert_eq!(session.variable("b"), Some(-3));
    }

    #[test]
    fn arithmetic_overflow_is_reported() {
        let mut session = Session::new();
        exec(&mut session, "x = 9223372036854775807");
        assert_eq!(session.execute("y = x * 2"), Err(EvalError::Overflow));
        assert_eq!(session.variable("y"), None);
    }

    #[test]
    fn literal_overflow_is_reported() {
        let mut session = Session::new();
        assert_eq!(
            session.execute("x = 99999999999999999999"),
            Err(EvalError::InvalidLiteral("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn cache_flag_round_trip() {
        let mut session = Session::new();
        assert!(session.cache_enabled());
        session.set_cache_enabled(false);
        assert!(!session.cache_enabled());
    }
}

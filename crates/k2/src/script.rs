//! Script file execution
//!
//! One statement per line. `#` starts a comment running to the end of the
//! line; lines are trimmed and skipped when nothing remains. Statement
//! errors are reported and the run continues with the next line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use k2lang::Session;
use tracing::debug;

/// Execute every statement in a script file.
///
/// Only a missing or unreadable file aborts the run; individual statement
/// errors go to stderr and leave the session live.
pub fn run_file(session: &mut Session, path: &Path) -> Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not open file '{}'", path.display()))?;

    for (number, line) in source.lines().enumerate() {
        let Some(statement) = strip_line(line) else {
            continue;
        };

        debug!(line = number + 1, statement, "executing");
        match session.execute(statement) {
            Ok(outcome) => crate::report(&outcome),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}

/// Drop the comment and surrounding whitespace; `None` when nothing is
/// left to execute.
fn strip_line(line: &str) -> Option<&str> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let line = line.trim();
    (!line.is_empty()).then_some(line)
}

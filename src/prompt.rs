//! Line-based interactive removal loop.
//!
//! Lists the pending copies, reads a 1-based number (or `-1` to stop), removes
//! the chosen file and repeats with the reduced session until nothing is left.
//! `No more duplicates` closes the loop however it ends.
//! Input and output are generic so the loop runs against in-memory buffers in
//! tests and against stdin/stdout in the binary.

use std::io::{self, BufRead, Write};

use crate::actions::delete::Remover;
use crate::session::RemovalSession;

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Every pending copy was removed.
    Exhausted,
    /// The user typed `-1` or input ended.
    Exited,
}

/// A parsed answer to the removal prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Exit,
    Remove(usize),
    Invalid,
}

fn parse_choice(line: &str, len: usize) -> Choice {
    match line.trim().parse::<i64>() {
        Ok(-1) => Choice::Exit,
        Ok(n) if n >= 1 && (n as u64) <= len as u64 => Choice::Remove(n as usize - 1),
        _ => Choice::Invalid,
    }
}

/// Run the removal loop until the session is empty or the user exits.
///
/// Returns the final session, which still holds every copy the user kept.
///
/// # Errors
///
/// Only I/O errors on `input` or `output`; removal failures are reported to
/// the user and the loop continues.
pub fn run_removal_loop<R: BufRead, W: Write>(
    mut session: RemovalSession,
    remover: &dyn Remover,
    mut input: R,
    mut output: W,
) -> io::Result<(RemovalSession, PromptOutcome)> {
    let mut line = String::new();
    let mut outcome = PromptOutcome::Exhausted;

    while !session.is_empty() {
        writeln!(output, "\nThe list of duplicates\n")?;
        for (i, record) in session.pending().iter().enumerate() {
            writeln!(output, "{}) {}", i + 1, record.path.display())?;
        }
        writeln!(output, "Type a file number to remove or -1 to EXIT")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::debug!("Input closed, leaving removal loop");
            outcome = PromptOutcome::Exited;
            break;
        }

        match parse_choice(&line, session.len()) {
            Choice::Exit => {
                outcome = PromptOutcome::Exited;
                break;
            }
            Choice::Invalid => {
                writeln!(
                    output,
                    "Please type a number between 1 and {}, or -1",
                    session.len()
                )?;
            }
            Choice::Remove(index) => {
                let path = session.pending()[index].path.clone();
                writeln!(output, "Removing the following file: {}", path.display())?;
                match session.remove_with(index, remover) {
                    Ok((next, _)) => session = next,
                    Err(e) => writeln!(output, "Unable to delete the file: {e}")?,
                }
            }
        }
    }

    writeln!(output, "No more duplicates")?;
    Ok((session, outcome))
}

// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Yes/no confirmation before destructive commands.

use std::io::{self, BufRead, Write};

/// Asks `question` on stderr and reads the answer from stdin.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stderr(), question)
}

/// Writes `question [y/N] ` to `output` and reads one line from `input`.
///
/// Only `y` and `yes` (any case) confirm; end of input declines.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

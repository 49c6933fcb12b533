// SPDX-License-Identifier: GPL-3.0-or-later
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    /// Nobody could be asked (no terminal, or input closed); proceed anyway.
    NonInteractive,
    Cancelled,
}

/// Ask before deleting `count` records. Only `y` or `yes` confirms.
pub fn confirm(
    input: &mut impl BufRead,
    output: &mut impl Write,
    interactive: bool,
    count: usize,
) -> io::Result<Confirmation> {
    if !interactive {
        return Ok(Confirmation::NonInteractive);
    }

    write!(output, "Delete {count} duplicate records? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(Confirmation::NonInteractive);
    }

    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(Confirmation::Proceed),
        _ => Ok(Confirmation::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str, interactive: bool) -> (Confirmation, String) {
        let mut out = Vec::new();
        let answer = confirm(&mut Cursor::new(input), &mut out, interactive, 3).unwrap();
        (answer, String::from_utf8(out).unwrap())
    }

    #[test]
    fn yes_confirms() {
        assert_eq!(ask("y\n", true).0, Confirmation::Proceed);
        assert_eq!(ask("YES\n", true).0, Confirmation::Proceed);
        assert_eq!(ask("  yes  \n", true).0, Confirmation::Proceed);
    }

    #[test]
    fn anything_else_cancels() {
        assert_eq!(ask("n\n", true).0, Confirmation::Cancelled);
        assert_eq!(ask("\n", true).0, Confirmation::Cancelled);
        assert_eq!(ask("yep\n", true).0, Confirmation::Cancelled);
    }

    #[test]
    fn eof_proceeds_non_interactively() {
        let (answer, prompt) = ask("", true);
        assert_eq!(answer, Confirmation::NonInteractive);
        assert!(prompt.contains("Delete 3 duplicate records?"));
    }

    #[test]
    fn no_terminal_skips_the_prompt() {
        let (answer, prompt) = ask("n\n", false);
        assert_eq!(answer, Confirmation::NonInteractive);
        assert!(prompt.is_empty());
    }
}

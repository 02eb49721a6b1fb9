//! Confirmation prompts for destructive actions.

use std::io::{self, BufRead, Write};

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Show `message` and return whether the user agreed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Agrees to everything. Backs the `--yes` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Line-oriented `[y/N]` prompt.
///
/// Only `y` and `yes` (any case) agree; anything else, EOF or a read error
/// declines.
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Build a prompt over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ").is_err() || self.output.flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let agreed = TerminalPrompt::new(input.as_bytes(), &mut output).confirm("Proceed?");
        (agreed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(ask("y\n").0);
        assert!(ask("YES\n").0);
        assert!(ask("  yes  \n").0);
    }

    #[test]
    fn test_other_answers_decline() {
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("sure\n").0);
    }

    #[test]
    fn test_eof_declines() {
        assert!(!ask("").0);
    }

    #[test]
    fn test_message_is_shown() {
        let (_, shown) = ask("n\n");
        assert_eq!(shown, "Proceed? [y/N] ");
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm("anything"));
    }

    #[test]
    fn test_closure_confirm() {
        let mut seen = Vec::new();
        let mut prompt = |message: &str| {
            seen.push(message.to_string());
            false
        };
        assert!(!prompt.confirm("Delete \"Ann\"?"));
        assert_eq!(seen, vec!["Delete \"Ann\"?"]);
    }
}

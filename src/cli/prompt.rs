//! Interactive prompts.
//!
//! Reads answers line by line from any `BufRead`, so the whole question flow
//! can be driven from a byte buffer in tests.

use std::io::{BufRead, Write};

use crate::error::{PmaError, Result};
use crate::render::Reporter;

/// Asks questions on `output` and reads answers from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    reporter: Reporter,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W, reporter: Reporter) -> Self {
        Self {
            input,
            output,
            reporter,
        }
    }

    /// Ask a question and return the trimmed answer.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::InvalidInput`] at end of input, [`PmaError::Io`]
    /// when reading or writing fails.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.ask_styled(question, false)
    }

    /// Ask with the highlighted style used for the final export question.
    ///
    /// # Errors
    ///
    /// See [`Prompter::ask`].
    pub fn ask_emphasized(&mut self, question: &str) -> Result<String> {
        self.ask_styled(question, true)
    }

    fn ask_styled(&mut self, question: &str, emphasis: bool) -> Result<String> {
        write!(
            self.output,
            "{} ",
            self.reporter.format_prompt(question, emphasis)
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PmaError::InvalidInput(format!(
                "no answer to \"{question}\" (end of input)"
            )));
        }
        Ok(line.trim().to_string())
    }

    /// Ask a `[y/n]` question. Only `y` (any case) counts as yes.
    ///
    /// # Errors
    ///
    /// See [`Prompter::ask`].
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("y"))
    }

    /// Ask for a non-negative whole number.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::InvalidInput`] when the answer is not a number.
    pub fn ask_number(&mut self, question: &str) -> Result<usize> {
        let answer = self.ask(question)?;
        answer
            .parse()
            .map_err(|_| PmaError::InvalidInput(format!("\"{answer}\" is not a whole number")))
    }

    /// Ask for a value that must not be empty.
    ///
    /// # Errors
    ///
    /// Returns [`PmaError::InvalidInput`] for an empty answer.
    pub fn ask_required(&mut self, question: &str, what: &str) -> Result<String> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            return Err(PmaError::InvalidInput(format!("{what} must not be empty")));
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Reporter::new(false),
        )
    }

    #[test]
    fn ask_trims_and_echoes_question() {
        let mut p = prompter("  shop  \n");
        assert_eq!(p.ask("Enter database name:").unwrap(), "shop");
        assert_eq!(String::from_utf8(p.output).unwrap(), "Enter database name: ");
    }

    #[test]
    fn confirm_only_accepts_y() {
        let mut p = prompter("Y\nyes\nn\n");
        assert!(p.confirm("q?").unwrap());
        assert!(!p.confirm("q?").unwrap());
        assert!(!p.confirm("q?").unwrap());
    }

    #[test]
    fn number_parsing() {
        let mut p = prompter("42\nlots\n");
        assert_eq!(p.ask_number("n?").unwrap(), 42);
        assert!(matches!(p.ask_number("n?"), Err(PmaError::InvalidInput(_))));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("");
        assert!(matches!(p.ask("q?"), Err(PmaError::InvalidInput(_))));
    }

    #[test]
    fn required_rejects_blank() {
        let mut p = prompter("   \n");
        assert!(p.ask_required("host?", "host").is_err());
    }
}

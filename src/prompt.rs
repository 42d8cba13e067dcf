//! Console prompter.
//!
//! All user input goes through [`Prompter::ask`], which is the one place the
//! exit sentinel is checked. Typing `exit` (any case) or closing stdin turns
//! into [`Error::Exit`], which callers propagate with `?` up to the menu loop.

use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::choices::Choice;
use crate::error::{Error, Result};

pub const EXIT_SENTINEL: &str = "exit";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of informational text.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `question` (no newline added) and read one trimmed answer.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            log::debug!("stdin closed");
            return Err(Error::Exit);
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case(EXIT_SENTINEL) {
            return Err(Error::Exit);
        }
        Ok(answer.to_string())
    }

    /// Ask until the answer resolves in `T`'s vocabulary, printing `invalid`
    /// after every rejected answer.
    pub fn choose<T: Choice>(&mut self, question: &str, invalid: &str) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match T::parse_choice(&answer) {
                Some(value) => return Ok(value),
                None => self.say(invalid)?,
            }
        }
    }

    /// Yes/no question. Only `y` / `yes` count as affirmative.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

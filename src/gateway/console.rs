//! Typed console gateway

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};
use std::rc::Rc;

use super::{Gateway, normalize_utterance};
use crate::profile::Prompter;
use crate::{Error, Result};

/// Reader and writer shared by the gateway and its prompter
struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    /// Print `prompt` and read one raw line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Reads utterances as lines of text and prints responses
pub struct ConsoleGateway<R, W> {
    io: Rc<RefCell<ConsoleIo<R, W>>>,
}

impl ConsoleGateway<BufReader<Stdin>, Stdout> {
    /// Console gateway on the process's stdin/stdout
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleGateway<R, W> {
    /// Create a console gateway over arbitrary reader/writer
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Rc::new(RefCell::new(ConsoleIo { input, output })),
        }
    }

    /// Prompter that asks on this console's input and output
    ///
    /// Lines the gateway has buffered but not consumed are visible to the
    /// prompter, so piped answers reach the question they follow.
    #[must_use]
    pub fn prompter(&self) -> ConsolePrompter<R, W> {
        ConsolePrompter {
            io: Rc::clone(&self.io),
        }
    }

    /// Inspect everything written so far
    pub fn with_output<T>(&self, f: impl FnOnce(&W) -> T) -> T {
        f(&self.io.borrow().output)
    }
}

impl<R: BufRead, W: Write> Gateway for ConsoleGateway<R, W> {
    fn listen(&mut self) -> Result<Option<String>> {
        let Some(line) = self.io.borrow_mut().read_line("You: ")? else {
            return Err(Error::InputClosed);
        };

        let utterance = normalize_utterance(&line);
        if let Some(text) = &utterance {
            tracing::debug!(utterance = %text, "heard");
        }
        Ok(utterance)
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        let mut io = self.io.borrow_mut();
        writeln!(io.output, "{text}")?;
        io.output.flush()?;
        Ok(())
    }
}

/// Asks profile questions on the same console as a [`ConsoleGateway`]
pub struct ConsolePrompter<R, W> {
    io: Rc<RefCell<ConsoleIo<R, W>>>,
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        let line = self
            .io
            .borrow_mut()
            .read_line(&format!("{question} "))?
            .ok_or(Error::InputClosed)?;
        Ok(line.trim().to_string())
    }
}

//! Operator prompts
//!
//! Interactive terminals get dialoguer prompts. Anything else (pipes,
//! scripts, tests) gets a plain line-based prompt on stderr.
//!
//! Piped answers are read without buffering: whatever follows the answer
//! line stays on stdin for git.

use std::fs::File;
use std::io::{IsTerminal, Read, Write};

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing::debug;

use super::output::Output;

pub trait Prompter {
    /// Show the numbered profile menu and return the raw answer
    fn choose_profile(&mut self, items: &[String]) -> anyhow::Result<String>;

    /// Ask a yes/no question. Defaults to no.
    fn confirm(&mut self, question: &str) -> anyhow::Result<bool>;
}

/// Prompter for the process's own stdin
pub fn stdin_prompter() -> Box<dyn Prompter> {
    if std::io::stdin().is_terminal() {
        return Box::new(TerminalPrompter::default());
    }

    match raw_stdin() {
        Ok(file) => Box::new(LinePrompter::new(file, std::io::stderr())),
        Err(e) => {
            debug!(error = %e, "stdin unavailable, answering with defaults");
            Box::new(LinePrompter::new(std::io::empty(), std::io::stderr()))
        }
    }
}

/// Stdin as an unbuffered file.
///
/// `std::io::Stdin` sits behind a shared buffer that would swallow input
/// git needs. A duplicated descriptor shares the read position instead.
#[cfg(unix)]
fn raw_stdin() -> std::io::Result<File> {
    use std::os::fd::AsFd;
    Ok(File::from(std::io::stdin().as_fd().try_clone_to_owned()?))
}

#[cfg(windows)]
fn raw_stdin() -> std::io::Result<File> {
    use std::os::windows::io::AsHandle;
    Ok(File::from(std::io::stdin().as_handle().try_clone_to_owned()?))
}

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn choose_profile(&mut self, items: &[String]) -> anyhow::Result<String> {
        Output::header("Select identity");
        for (i, item) in items.iter().enumerate() {
            Output::numbered_item(i + 1, item);
        }

        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Choice [1-{}]", items.len()))
            .default("1".to_string())
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Line-oriented prompter over arbitrary reader/writer pairs
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line a byte at a time; `None` at end of input.
    ///
    /// Nothing past the newline is consumed.
    fn read_answer(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => return Ok(Some(decode(&line))),
                Ok(_) => line.push(byte[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(decode(&line)))
        }
    }
}

fn decode(line: &[u8]) -> String {
    String::from_utf8_lossy(line).trim().to_string()
}

impl<R: Read, W: Write> Prompter for LinePrompter<R, W> {
    fn choose_profile(&mut self, items: &[String]) -> anyhow::Result<String> {
        writeln!(self.output, "Select identity:")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, item)?;
        }
        write!(self.output, "Choice [1-{}] (default 1): ", items.len())?;
        self.output.flush()?;

        Ok(self.read_answer()?.unwrap_or_default())
    }

    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        write!(self.output, "{} [y/N]: ", question)?;
        self.output.flush()?;

        let answer = self.read_answer()?.unwrap_or_default().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

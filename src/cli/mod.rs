//! CLI layer
//!
//! Identity selection, prompting, and operator-facing output.

pub mod debug;
pub mod output;
pub mod prompt;
pub mod resolve;

pub use output::Output;
pub use prompt::{stdin_prompter, LinePrompter, Prompter, TerminalPrompter};
pub use resolve::resolve_identity;

use thiserror::Error;

/// Errors that end the wrapper before git runs
#[derive(Error, Debug)]
pub enum WrapperError {
    #[error("Unknown profile '{name}'. Available profiles: {available}")]
    UnknownProfile { name: String, available: String },

    #[error("Aborted: SSH connectivity check failed for profile '{0}'")]
    ProbeDeclined(String),

    #[error("Prompt failed: {0}")]
    Prompt(anyhow::Error),
}

//! Command dispatcher
//!
//! Runs the wrapped client once with the effective arguments and the
//! per-invocation environment, then maps its exit status.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use colored::Colorize;
use tracing::{debug, instrument};

use super::GitError;
use crate::core::{InvocationRequest, TRANSPORT_ENV_VAR};
use crate::util::log_cmd;

pub struct Dispatcher {
    client: PathBuf,
    preserve_exit_status: bool,
}

impl Dispatcher {
    pub fn new(client: impl Into<PathBuf>, preserve_exit_status: bool) -> Self {
        Self {
            client: client.into(),
            preserve_exit_status,
        }
    }

    /// Run the request and return the wrapper's exit code.
    ///
    /// On failure a diagnostic block goes to stderr first.
    pub fn dispatch(&self, request: &InvocationRequest) -> Result<u8, GitError> {
        let status = self.run(request)?;

        if !status.success() {
            let inherited = std::env::var(TRANSPORT_ENV_VAR).ok();
            let mut stderr = std::io::stderr().lock();
            if let Err(e) = write_failure_report(
                &mut stderr,
                &self.program_name(),
                request,
                &status,
                inherited.as_deref(),
            ) {
                debug!(error = %e, "could not write failure report");
            }
        }

        Ok(self.exit_code(&status))
    }

    /// Spawn the client with inherited stdio and wait for it.
    #[instrument(skip(self, request), fields(profile = %request.profile.name))]
    pub fn run(&self, request: &InvocationRequest) -> Result<ExitStatus, GitError> {
        let mut cmd = Command::new(&self.client);
        cmd.args(&request.effective_arguments)
            .envs(&request.environment_overrides);
        log_cmd(&cmd);

        let status = cmd.status().map_err(|source| GitError::Spawn {
            program: self.client.display().to_string(),
            source,
        })?;
        debug!(%status, "client exited");
        Ok(status)
    }

    /// Map a child status to the wrapper's exit code
    pub fn exit_code(&self, status: &ExitStatus) -> u8 {
        if status.success() {
            return 0;
        }

        if self.preserve_exit_status {
            if let Some(code) = status.code() {
                if (1..=255).contains(&code) {
                    return code as u8;
                }
            }
        }

        1
    }

    fn program_name(&self) -> String {
        self.client
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.client.display().to_string())
    }
}

/// Render an argument list for display, quoting arguments that need it
pub fn format_arguments(arguments: &[String]) -> String {
    arguments
        .iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
                format!("{:?}", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the diagnostic block shown when the client fails.
///
/// `inherited_transport` is the wrapper's own `GIT_SSH_COMMAND`, shown when
/// the request doesn't override it.
pub fn write_failure_report<W: Write>(
    out: &mut W,
    program: &str,
    request: &InvocationRequest,
    status: &ExitStatus,
    inherited_transport: Option<&str>,
) -> std::io::Result<()> {
    let status_text = match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };
    let transport = request
        .transport_override()
        .or(inherited_transport)
        .unwrap_or("not set");

    writeln!(
        out,
        "{} {} command failed ({})",
        "✗".red(),
        program,
        status_text
    )?;
    writeln!(
        out,
        "  {} {}",
        "Original arguments: ".dimmed(),
        format_arguments(&request.raw_arguments)
    )?;
    writeln!(
        out,
        "  {} {}",
        "Effective arguments:".dimmed(),
        format_arguments(&request.effective_arguments)
    )?;
    writeln!(
        out,
        "  {} {}",
        format!("{:<20}", format!("{}:", TRANSPORT_ENV_VAR)).dimmed(),
        transport
    )?;
    Ok(())
}

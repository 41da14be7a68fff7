//! SSH connectivity probe
//!
//! Runs an authentication-only handshake (`ssh -T`) against a profile's
//! probe target. Every attempt is bounded by a timeout; the probe reports
//! an outcome and never fails on its own.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::core::ProbeSettings;
use crate::util::log_cmd;

/// Text hosting providers print after a successful `ssh -T` handshake
pub const AUTHENTICATED_MARKER: &str = "successfully authenticated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Authenticated,
    Failed,
}

impl ProbeOutcome {
    pub fn is_authenticated(self) -> bool {
        self == ProbeOutcome::Authenticated
    }
}

/// Whether handshake output reports a successful authentication
pub fn is_authenticated(output: &str) -> bool {
    output.to_lowercase().contains(AUTHENTICATED_MARKER)
}

#[derive(Debug, Clone)]
pub struct ConnectivityProbe {
    command: String,
    timeout: Duration,
}

impl ConnectivityProbe {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &ProbeSettings) -> Self {
        Self::new(settings.command.clone(), settings.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command_for(&self, target: &str) -> Command {
        let connect_timeout = self.timeout.as_secs().max(1);
        let mut cmd = Command::new(&self.command);
        cmd.arg("-T")
            .args(["-o", "BatchMode=yes"])
            .arg("-o")
            .arg(format!("ConnectTimeout={}", connect_timeout))
            .arg(target)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    /// Attempt the handshake with output captured.
    #[instrument(skip(self), fields(timeout_ms = self.timeout.as_millis() as u64))]
    pub async fn authenticate(&self, target: &str) -> ProbeOutcome {
        let mut cmd = self.command_for(target);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        log_cmd(cmd.as_std());

        let output = match timeout(self.timeout, cmd.output()).await {
            Err(_) => {
                debug!("probe timed out");
                return ProbeOutcome::Failed;
            }
            Ok(Err(e)) => {
                debug!(error = %e, "probe could not be started");
                return ProbeOutcome::Failed;
            }
            Ok(Ok(output)) => output,
        };

        let text = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        debug!(status = %output.status, "probe finished");

        if is_authenticated(&text) {
            ProbeOutcome::Authenticated
        } else {
            ProbeOutcome::Failed
        }
    }

    /// Re-run the handshake with output going straight to the terminal so
    /// the operator sees the underlying cause. Always reports `Failed`.
    pub async fn rerun_with_output(&self, target: &str) -> ProbeOutcome {
        let mut cmd = self.command_for(target);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        log_cmd(cmd.as_std());

        match timeout(self.timeout, cmd.status()).await {
            Err(_) => debug!("diagnostic probe timed out"),
            Ok(Err(e)) => debug!(error = %e, "diagnostic probe could not be started"),
            Ok(Ok(status)) => debug!(%status, "diagnostic probe finished"),
        }

        ProbeOutcome::Failed
    }
}

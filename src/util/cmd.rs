//! Command logging utilities for verbose output.

use std::process::Command;
use tracing::debug;

/// Log a command just before execution.
///
/// Emits a `tracing::debug!` event with the program name, arguments, and
/// any environment variables set on the child. Visible when running with
/// `--verbose` (which sets `gitpersona=debug`) or via
/// `RUST_LOG=gitpersona::cmd=debug`.
pub fn log_cmd(cmd: &Command) {
    let program = cmd.get_program().to_string_lossy();
    let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy()).collect();
    let env: Vec<_> = cmd
        .get_envs()
        .map(|(key, value)| {
            format!(
                "{}={}",
                key.to_string_lossy(),
                value.map(|v| v.to_string_lossy()).unwrap_or_default()
            )
        })
        .collect();
    debug!(
        target: "gitpersona::cmd",
        %program,
        ?args,
        ?env,
        "exec"
    );
}

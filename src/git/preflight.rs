//! Pre-flight check for the wrapped client

use std::path::PathBuf;

use super::GitError;

/// Resolve the client to an executable path.
///
/// Accepts a bare program name (searched on `PATH`) or a path.
pub fn locate_client(client: &str) -> Result<PathBuf, GitError> {
    match which::which(client) {
        Ok(path) => {
            tracing::debug!(client, path = %path.display(), "client located");
            Ok(path)
        }
        Err(e) => {
            tracing::debug!(client, error = %e, "client lookup failed");
            Err(GitError::ClientNotFound(client.to_string()))
        }
    }
}

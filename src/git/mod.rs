//! Git client plumbing
//!
//! Locates the wrapped client, probes SSH connectivity for the selected
//! identity, and runs the client with the resolved invocation.

pub mod dispatch;
pub mod preflight;
pub mod probe;

pub use dispatch::Dispatcher;
pub use preflight::locate_client;
pub use probe::{is_authenticated, ConnectivityProbe, ProbeOutcome, AUTHENTICATED_MARKER};

use thiserror::Error;

/// Errors that can occur while running the wrapped client
#[derive(Error, Debug)]
pub enum GitError {
    #[error("'{0}' was not found on this system. Install it or set `client` in the config file.")]
    ClientNotFound(String),

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

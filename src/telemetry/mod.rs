//! Logging setup for gitpersona.
//!
//! Diagnostics use the `tracing` crate and are written to stderr so they
//! never mix with the wrapped client's stdout.
//!
//! # Feature Flags
//!
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;

pub use init::{init_telemetry, TelemetryConfig};

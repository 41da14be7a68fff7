//! gitpersona - run git under a chosen SSH identity
//!
//! Before each git invocation the operator picks a profile. Non-default
//! profiles rewrite the default host alias in the arguments and hand git an
//! explicit `GIT_SSH_COMMAND`, after an optional SSH connectivity check.

pub mod cli;
pub mod core;
pub mod git;
pub mod telemetry;
pub mod util;

pub use core::config::WrapperConfig;
pub use core::invocation::InvocationRequest;
pub use core::profile::{IdentityProfile, ProfileSet};

//! Invocation requests
//!
//! Turns the raw argument vector and a selected profile into the arguments
//! and environment the git child process actually receives.

use std::collections::BTreeMap;

use super::profile::{IdentityProfile, ProfileSet};

/// Environment variable git reads its SSH transport command from
pub const TRANSPORT_ENV_VAR: &str = "GIT_SSH_COMMAND";

/// Result of substituting a host alias across an argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub arguments: Vec<String>,
    pub changed: bool,
}

/// Replace every literal occurrence of `from` with `to` in each argument.
///
/// Plain substring replacement, applied independently per argument. Argument
/// count and order never change. An empty `from` matches nothing.
pub fn rewrite_arguments(arguments: &[String], from: &str, to: &str) -> Rewrite {
    if from.is_empty() || from == to {
        return Rewrite {
            arguments: arguments.to_vec(),
            changed: false,
        };
    }

    let mut changed = false;
    let arguments = arguments
        .iter()
        .map(|arg| {
            if arg.contains(from) {
                changed = true;
                arg.replace(from, to)
            } else {
                arg.clone()
            }
        })
        .collect();

    Rewrite { arguments, changed }
}

/// Everything the dispatcher needs for one git invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Arguments exactly as the operator typed them
    pub raw_arguments: Vec<String>,
    pub profile: IdentityProfile,
    /// Arguments after host alias substitution
    pub effective_arguments: Vec<String>,
    /// Variables set on the child only
    pub environment_overrides: BTreeMap<String, String>,
}

impl InvocationRequest {
    /// Build the request for `profile`, which must belong to `profiles`.
    pub fn new(raw_arguments: Vec<String>, profiles: &ProfileSet, profile: &IdentityProfile) -> Self {
        if profiles.is_default(profile) {
            return Self {
                effective_arguments: raw_arguments.clone(),
                raw_arguments,
                profile: profile.clone(),
                environment_overrides: BTreeMap::new(),
            };
        }

        let rewrite = rewrite_arguments(
            &raw_arguments,
            &profiles.default_profile().host_alias,
            &profile.host_alias,
        );

        let mut environment_overrides = BTreeMap::new();
        environment_overrides.insert(
            TRANSPORT_ENV_VAR.to_string(),
            profile.transport_command().to_string(),
        );

        Self {
            raw_arguments,
            profile: profile.clone(),
            effective_arguments: rewrite.arguments,
            environment_overrides,
        }
    }

    pub fn was_rewritten(&self) -> bool {
        self.raw_arguments != self.effective_arguments
    }

    /// Transport override for the child, if this request sets one
    pub fn transport_override(&self) -> Option<&str> {
        self.environment_overrides
            .get(TRANSPORT_ENV_VAR)
            .map(String::as_str)
    }
}

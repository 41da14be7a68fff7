//! Identity profiles
//!
//! A profile bundles the SSH host alias used in remote URLs with the target
//! used to check that the matching key actually authenticates.

use serde::{Deserialize, Serialize};

/// Transport command handed to git for non-default profiles when the
/// profile doesn't name its own.
pub const DEFAULT_TRANSPORT_COMMAND: &str = "ssh -F ~/.ssh/config";

/// One selectable account context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    /// Display name (e.g., "work", "personal")
    pub name: String,
    /// Host alias as it appears in remote URLs (e.g., "github.com")
    pub host_alias: String,
    /// SSH target for the connectivity probe (defaults to `git@<host_alias>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_target: Option<String>,
    /// Value for `GIT_SSH_COMMAND` when this profile is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_command: Option<String>,
}

impl IdentityProfile {
    pub fn new(name: impl Into<String>, host_alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host_alias: host_alias.into(),
            probe_target: None,
            transport_command: None,
        }
    }

    pub fn with_transport_command(mut self, command: impl Into<String>) -> Self {
        self.transport_command = Some(command.into());
        self
    }

    pub fn with_probe_target(mut self, target: impl Into<String>) -> Self {
        self.probe_target = Some(target.into());
        self
    }

    /// SSH target the connectivity probe authenticates against
    pub fn probe_target(&self) -> String {
        self.probe_target
            .clone()
            .unwrap_or_else(|| format!("git@{}", self.host_alias))
    }

    pub fn transport_command(&self) -> &str {
        self.transport_command
            .as_deref()
            .unwrap_or(DEFAULT_TRANSPORT_COMMAND)
    }
}

/// Ordered list of profiles. The first entry is the default profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSet {
    profiles: Vec<IdentityProfile>,
}

impl ProfileSet {
    /// Build a set from an already validated, non-empty list
    pub(crate) fn new(profiles: Vec<IdentityProfile>) -> Self {
        debug_assert!(!profiles.is_empty());
        Self { profiles }
    }

    /// The two identities the wrapper ships with
    pub fn builtin() -> Self {
        Self::new(builtin_profiles())
    }

    pub fn default_profile(&self) -> &IdentityProfile {
        &self.profiles[0]
    }

    pub fn is_default(&self, profile: &IdentityProfile) -> bool {
        self.default_profile().name == profile.name
    }

    pub fn iter(&self) -> impl Iterator<Item = &IdentityProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Look up a profile by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&IdentityProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Menu lines, in selection order, e.g. `work (github.com)`
    pub fn menu_items(&self) -> Vec<String> {
        self.profiles
            .iter()
            .map(|p| format!("{} ({})", p.name, p.host_alias))
            .collect()
    }

    /// Resolve one line of menu input.
    ///
    /// Accepts a 1-based index or a profile name. Anything else, including
    /// empty input, selects the default profile.
    pub fn resolve_choice(&self, input: &str) -> &IdentityProfile {
        let input = input.trim();

        if let Ok(index) = input.parse::<usize>() {
            if let Some(profile) = index.checked_sub(1).and_then(|i| self.profiles.get(i)) {
                return profile;
            }
        } else if let Some(profile) = self.get(input) {
            return profile;
        }

        if !input.is_empty() {
            tracing::debug!(input, "unrecognized selection, using default profile");
        }
        self.default_profile()
    }
}

pub(crate) fn builtin_profiles() -> Vec<IdentityProfile> {
    vec![
        IdentityProfile::new("work", "github.com"),
        IdentityProfile::new("personal", "github-personal")
            .with_transport_command(DEFAULT_TRANSPORT_COMMAND),
    ]
}

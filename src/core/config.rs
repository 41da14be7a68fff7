//! Config file parsing and validation
//!
//! The config file (profiles.yaml) lists the identities offered before each
//! git invocation, plus the client and probe settings.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::config_paths;
use super::profile::{builtin_profiles, IdentityProfile, ProfileSet};

/// Errors that can occur when loading or validating the config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Connectivity probe settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Run the probe before dispatching
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// SSH client used for the probe
    #[serde(default = "default_probe_command")]
    pub command: String,
    /// Upper bound for one probe attempt
    #[serde(default = "default_probe_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_probe_command() -> String {
    "ssh".to_string()
}

fn default_probe_timeout() -> u64 {
    10
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_probe_command(),
            timeout_secs: default_probe_timeout(),
        }
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The top-level config structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrapperConfig {
    /// Program being wrapped
    #[serde(default = "default_client")]
    pub client: String,
    /// Forward the client's exit code instead of collapsing failures to 1
    #[serde(default)]
    pub preserve_exit_status: bool,
    #[serde(default)]
    pub probe: ProbeSettings,
    /// Selectable identities; the first one is the default
    #[serde(default = "builtin_profiles")]
    pub profiles: Vec<IdentityProfile>,
}

fn default_client() -> String {
    "git".to_string()
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            client: default_client(),
            preserve_exit_status: false,
            probe: ProbeSettings::default(),
            profiles: builtin_profiles(),
        }
    }
}

/// Where the active config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Builtin,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Builtin => write!(f, "built-in defaults"),
        }
    }
}

impl WrapperConfig {
    /// Load a config from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load from an explicit path, else the default location, else built-ins.
    ///
    /// An explicit path that doesn't exist is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.display().to_string()));
                }
                Some(path.to_path_buf())
            }
            None => config_paths::resolve_config_path(),
        };

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                let config = Self::load(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok((Self::default(), ConfigSource::Builtin)),
        }
    }

    /// Parse a config from a YAML string
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file means "all defaults"
        let config: WrapperConfig = if yaml.trim().is_empty() {
            WrapperConfig::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "client must not be empty".to_string(),
            ));
        }

        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "probe.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.probe.command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "probe.command must not be empty".to_string(),
            ));
        }

        if self.profiles.is_empty() {
            return Err(ConfigError::ValidationError(
                "Config must define at least one profile".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for (index, profile) in self.profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Profile #{} must have a name",
                    index + 1
                )));
            }

            if profile.host_alias.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Profile '{}' must have a host_alias",
                    profile.name
                )));
            }

            let blank =
                |value: &Option<String>| value.as_deref().is_some_and(|v| v.trim().is_empty());
            if blank(&profile.probe_target) {
                return Err(ConfigError::ValidationError(format!(
                    "Profile '{}' has an empty probe_target",
                    profile.name
                )));
            }
            if blank(&profile.transport_command) {
                return Err(ConfigError::ValidationError(format!(
                    "Profile '{}' has an empty transport_command",
                    profile.name
                )));
            }

            if !seen.insert(profile.name.to_lowercase()) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate profile name: {}",
                    profile.name
                )));
            }
        }

        Ok(())
    }

    pub fn profile_set(&self) -> ProfileSet {
        ProfileSet::new(self.profiles.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_builtins() {
        let config = WrapperConfig::parse("").unwrap();
        assert_eq!(config.client, "git");
        assert!(config.probe.enabled);
        assert_eq!(config.probe.timeout_secs, 10);
        assert_eq!(config.profile_set(), ProfileSet::builtin());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
client: /usr/local/bin/git
preserve_exit_status: true
probe:
  enabled: false
  command: /usr/bin/ssh
  timeout_secs: 3
profiles:
  - name: work
    host_alias: github.com
  - name: personal
    host_alias: github-personal
    probe_target: git@github-personal
    transport_command: ssh -i ~/.ssh/id_personal -o IdentitiesOnly=yes
  - name: oss
    host_alias: github-oss
"#;
        let config = WrapperConfig::parse(yaml).unwrap();
        assert_eq!(config.client, "/usr/local/bin/git");
        assert!(config.preserve_exit_status);
        assert!(!config.probe.enabled);
        assert_eq!(config.probe.timeout(), Duration::from_secs(3));

        let set = config.profile_set();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get("personal").unwrap().transport_command(),
            "ssh -i ~/.ssh/id_personal -o IdentitiesOnly=yes"
        );
        assert_eq!(set.get("oss").unwrap().probe_target(), "git@github-oss");
    }

    #[test]
    fn test_partial_probe_section_keeps_defaults() {
        let yaml = r#"
probe:
  timeout_secs: 5
"#;
        let config = WrapperConfig::parse(yaml).unwrap();
        assert!(config.probe.enabled);
        assert_eq!(config.probe.command, "ssh");
        assert_eq!(config.probe.timeout_secs, 5);
        assert_eq!(config.profiles.len(), 2);
    }

    #[test]
    fn test_empty_profiles_fails() {
        let result = WrapperConfig::parse("profiles: []\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_duplicate_profile_names_fail() {
        let yaml = r#"
profiles:
  - name: work
    host_alias: github.com
  - name: Work
    host_alias: github-work
"#;
        let err = WrapperConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate profile name"));
    }

    #[test]
    fn test_empty_alias_fails() {
        let yaml = r#"
profiles:
  - name: work
    host_alias: ""
"#;
        assert!(WrapperConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_blank_probe_target_fails() {
        let yaml = r#"
profiles:
  - name: work
    host_alias: github.com
  - name: personal
    host_alias: github-personal
    probe_target: "  "
"#;
        let err = WrapperConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("empty probe_target"));
    }

    #[test]
    fn test_blank_transport_command_fails() {
        let yaml = r#"
profiles:
  - name: work
    host_alias: github.com
  - name: personal
    host_alias: github-personal
    transport_command: ""
"#;
        let err = WrapperConfig::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("empty transport_command"));
    }

    #[test]
    fn test_zero_timeout_fails() {
        let yaml = "probe:\n  timeout_secs: 0\n";
        assert!(WrapperConfig::parse(yaml).is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        let result = WrapperConfig::parse("profiles: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_discover_explicit_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let result = WrapperConfig::discover(Some(&missing));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_discover_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("profiles.yaml");
        std::fs::write(&path, "client: my-git\n").unwrap();

        let (config, source) = WrapperConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.client, "my-git");
        assert_eq!(source, ConfigSource::File(path));
    }
}

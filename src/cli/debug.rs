//! `--debug` report
//!
//! Shows which config is active, where the client resolves, and what each
//! profile would do. Never runs git.

use serde::Serialize;

use super::output::{Output, Table};
use crate::core::config_paths;
use crate::core::{ConfigSource, ProbeSettings, WrapperConfig, TRANSPORT_ENV_VAR};
use crate::git::locate_client;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileEntry {
    pub name: String,
    pub host_alias: String,
    pub probe_target: String,
    /// Transport override applied when selected (none for the default)
    pub transport_command: Option<String>,
    pub default: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugReport {
    pub version: String,
    pub config_source: String,
    pub default_config_path: Option<String>,
    pub client: String,
    pub client_path: Option<String>,
    pub preserve_exit_status: bool,
    pub probe: ProbeSettings,
    pub profiles: Vec<ProfileEntry>,
    /// The wrapper's own inherited `GIT_SSH_COMMAND`
    pub inherited_transport: Option<String>,
}

impl DebugReport {
    pub fn collect(config: &WrapperConfig, source: &ConfigSource) -> Self {
        let profiles = config.profile_set();
        let entries = profiles
            .iter()
            .map(|profile| {
                let is_default = profiles.is_default(profile);
                ProfileEntry {
                    name: profile.name.clone(),
                    host_alias: profile.host_alias.clone(),
                    probe_target: profile.probe_target(),
                    transport_command: (!is_default)
                        .then(|| profile.transport_command().to_string()),
                    default: is_default,
                }
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config_source: source.to_string(),
            default_config_path: config_paths::default_config_path()
                .map(|p| p.display().to_string()),
            client: config.client.clone(),
            client_path: locate_client(&config.client)
                .ok()
                .map(|p| p.display().to_string()),
            preserve_exit_status: config.preserve_exit_status,
            probe: config.probe.clone(),
            profiles: entries,
            inherited_transport: std::env::var(TRANSPORT_ENV_VAR).ok(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn print(&self) {
        Output::header(&format!("gitpersona {}", self.version));
        Output::kv("Config", &self.config_source);
        if let Some(ref path) = self.default_config_path {
            Output::kv("Default config path", path);
        }
        Output::kv(
            "Client",
            &match self.client_path {
                Some(ref path) => format!("{} ({})", self.client, path),
                None => format!("{} (not found)", self.client),
            },
        );
        Output::kv(
            "Exit status",
            if self.preserve_exit_status {
                "forwarded from client"
            } else {
                "collapsed to 1 on failure"
            },
        );
        Output::kv(
            "Connectivity probe",
            &if self.probe.enabled {
                format!(
                    "{} (timeout {}s)",
                    self.probe.command, self.probe.timeout_secs
                )
            } else {
                "disabled".to_string()
            },
        );
        Output::kv(
            TRANSPORT_ENV_VAR,
            self.inherited_transport.as_deref().unwrap_or("not set"),
        );

        Output::header("Profiles");
        let mut table = Table::new(vec!["", "Name", "Alias", "Probe target", "Transport"]);
        for entry in &self.profiles {
            table.add_row(vec![
                if entry.default { "*" } else { "" },
                entry.name.as_str(),
                entry.host_alias.as_str(),
                entry.probe_target.as_str(),
                entry.transport_command.as_deref().unwrap_or("-"),
            ]);
        }
        table.print();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_builtin() {
        let report = DebugReport::collect(&WrapperConfig::default(), &ConfigSource::Builtin);
        assert_eq!(report.config_source, "built-in defaults");
        assert_eq!(report.profiles.len(), 2);

        let work = &report.profiles[0];
        assert!(work.default);
        assert_eq!(work.transport_command, None);
        assert_eq!(work.probe_target, "git@github.com");

        let personal = &report.profiles[1];
        assert!(!personal.default);
        assert_eq!(
            personal.transport_command.as_deref(),
            Some("ssh -F ~/.ssh/config")
        );
    }

    #[test]
    fn test_json_shape() {
        let report = DebugReport::collect(&WrapperConfig::default(), &ConfigSource::Builtin);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["client"], "git");
        assert_eq!(value["probe"]["timeout_secs"], 10);
        assert_eq!(value["profiles"][1]["host_alias"], "github-personal");
    }
}

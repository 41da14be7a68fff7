//! Test fixtures for running the wrapper against fake tools.
//!
//! A `SandboxBuilder` writes a fake `git` that records its arguments and
//! `GIT_SSH_COMMAND`, a fake `ssh` that either authenticates or rejects,
//! and a config file wiring both in -- all offline.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// How the fake `ssh` answers the connectivity probe
#[derive(Debug, Clone, Copy)]
pub enum SshBehavior {
    Authenticates,
    Rejects,
}

/// A temporary directory holding fake tools and a config file.
pub struct Sandbox {
    /// Kept alive for the lifetime of the fixture.
    pub _temp: TempDir,
    pub root: PathBuf,
    pub config_path: PathBuf,
    args_log: PathBuf,
    env_log: PathBuf,
    stdin_log: PathBuf,
    probe_log: PathBuf,
}

impl Sandbox {
    /// `gp` preconfigured for this sandbox, with a clean environment
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("gp").unwrap();
        cmd.env("GITPERSONA_CONFIG", &self.config_path)
            .env_remove("GITPERSONA_PROFILE")
            .env_remove("GIT_SSH_COMMAND")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Arguments the fake git received, or `None` if it never ran
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let content = fs::read_to_string(&self.args_log).ok()?;
        Some(content.lines().map(|l| l.to_string()).collect())
    }

    /// `GIT_SSH_COMMAND` as the fake git saw it ("unset" if absent)
    pub fn recorded_transport(&self) -> Option<String> {
        fs::read_to_string(&self.env_log)
            .ok()
            .map(|s| s.trim_end().to_string())
    }

    /// Stdin the fake git read, if built with `capture_stdin`
    pub fn recorded_stdin(&self) -> Option<String> {
        fs::read_to_string(&self.stdin_log).ok()
    }

    /// Number of times the fake ssh ran
    pub fn probe_calls(&self) -> usize {
        fs::read_to_string(&self.probe_log)
            .map(|s| s.lines().count())
            .unwrap_or(0)
    }

    pub fn git_path(&self) -> PathBuf {
        self.root.join("bin").join("git")
    }
}

pub struct SandboxBuilder {
    git_exit: i32,
    ssh: SshBehavior,
    probe_enabled: bool,
    preserve_exit_status: bool,
    capture_stdin: bool,
    client: Option<String>,
    profiles_yaml: Option<String>,
}

impl SandboxBuilder {
    pub fn new() -> Self {
        Self {
            git_exit: 0,
            ssh: SshBehavior::Authenticates,
            probe_enabled: false,
            preserve_exit_status: false,
            capture_stdin: false,
            client: None,
            profiles_yaml: None,
        }
    }

    /// Exit code of the fake git
    pub fn git_exit(mut self, code: i32) -> Self {
        self.git_exit = code;
        self
    }

    /// Enable the probe with the given fake ssh behaviour
    pub fn probe(mut self, behavior: SshBehavior) -> Self {
        self.probe_enabled = true;
        self.ssh = behavior;
        self
    }

    pub fn preserve_exit_status(mut self) -> Self {
        self.preserve_exit_status = true;
        self
    }

    /// Make the fake git copy its stdin to a log
    pub fn capture_stdin(mut self) -> Self {
        self.capture_stdin = true;
        self
    }

    /// Point `client` somewhere other than the fake git
    pub fn client(mut self, client: &str) -> Self {
        self.client = Some(client.to_string());
        self
    }

    /// Raw YAML for the `profiles:` key
    pub fn profiles(mut self, yaml: &str) -> Self {
        self.profiles_yaml = Some(yaml.to_string());
        self
    }

    pub fn build(self) -> Sandbox {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_path_buf();
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();

        let args_log = root.join("git-args");
        let env_log = root.join("git-env");
        let stdin_log = root.join("git-stdin");
        let probe_log = root.join("ssh-calls");

        let read_stdin = if self.capture_stdin {
            format!("cat > '{}'\n", stdin_log.display())
        } else {
            String::new()
        };
        let git = write_script(
            &bin,
            "git",
            &format!(
                "printf '%s\\n' \"$@\" > '{args}'\n\
                 echo \"${{GIT_SSH_COMMAND:-unset}}\" > '{env}'\n\
                 {read_stdin}\
                 echo 'fake git ran'\n\
                 exit {code}",
                args = args_log.display(),
                env = env_log.display(),
                code = self.git_exit
            ),
        );

        let ssh_body = match self.ssh {
            SshBehavior::Authenticates => {
                "echo \"Hi octocat! You've successfully authenticated, but GitHub does not provide shell access.\" >&2\nexit 1"
            }
            SshBehavior::Rejects => "echo 'git@github.com: Permission denied (publickey).' >&2\nexit 255",
        };
        let ssh = write_script(
            &bin,
            "ssh",
            &format!("echo call >> '{}'\n{}", probe_log.display(), ssh_body),
        );

        let client = self
            .client
            .unwrap_or_else(|| git.display().to_string());
        let mut config = format!(
            "client: '{}'\n\
             preserve_exit_status: {}\n\
             probe:\n  enabled: {}\n  command: '{}'\n  timeout_secs: 5\n",
            client,
            self.preserve_exit_status,
            self.probe_enabled,
            ssh.display()
        );
        if let Some(profiles) = self.profiles_yaml {
            config.push_str("profiles:\n");
            config.push_str(&profiles);
        }

        let config_path = root.join("profiles.yaml");
        fs::write(&config_path, config).unwrap();

        Sandbox {
            _temp: temp,
            root,
            config_path,
            args_log,
            env_log,
            stdin_log,
            probe_log,
        }
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

//! gitpersona CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use gitpersona::cli::debug::DebugReport;
use gitpersona::cli::{resolve_identity, stdin_prompter, Output};
use gitpersona::core::WrapperConfig;
use gitpersona::git::{locate_client, ConnectivityProbe, Dispatcher};
use gitpersona::telemetry::{init_telemetry, TelemetryConfig};

// Wrapper options are long-only so git's own short flags (-c, -p, -C, ...)
// pass through untouched.
#[derive(Parser)]
#[command(name = "gp")]
#[command(author, version, about = "Run git under a chosen SSH identity", long_about = None)]
#[command(after_help = "Everything from the first git argument onward is passed to git. \
Use `--` to pass an argument git shares with this wrapper (e.g. `gp -- --version`).")]
struct Cli {
    /// Print the active configuration and profiles, then exit
    #[arg(long)]
    debug: bool,
    /// Print the --debug report as JSON
    #[arg(long, requires = "debug")]
    json: bool,
    /// Use this profile without prompting
    #[arg(long, env = "GITPERSONA_PROFILE", value_name = "NAME")]
    profile: Option<String>,
    /// Config file (default: ~/.config/gitpersona/profiles.yaml)
    #[arg(long, env = "GITPERSONA_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Skip the SSH connectivity check
    #[arg(long)]
    no_probe: bool,
    /// Show debug logs on stderr
    #[arg(long)]
    verbose: bool,
    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
    /// Arguments for git
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "GIT_ARGS")]
    args: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors exit 1, not clap's 2
            e.print().ok();
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_telemetry(&TelemetryConfig::for_cli(cli.verbose)) {
        eprintln!("warning: logging disabled: {}", e);
    }

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            Output::error(&format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "gp", &mut std::io::stdout());
        return Ok(0);
    }

    if cli.debug {
        let (config, source) = load_config(&cli)?;
        let report = DebugReport::collect(&config, &source);
        if cli.json {
            println!("{}", report.to_json()?);
        } else {
            report.print();
        }
        return Ok(0);
    }

    if cli.args.is_empty() {
        Output::error("No git command given");
        eprintln!();
        Cli::command().write_help(&mut std::io::stderr())?;
        return Ok(1);
    }

    let (config, _source) = load_config(&cli)?;
    let client = locate_client(&config.client)?;
    let profiles = config.profile_set();

    let probe = (config.probe.enabled && !cli.no_probe)
        .then(|| ConnectivityProbe::from_settings(&config.probe));
    let mut prompter = stdin_prompter();

    let request = resolve_identity(
        cli.args,
        &profiles,
        cli.profile.as_deref(),
        probe.as_ref(),
        prompter.as_mut(),
    )
    .await?;

    let dispatcher = Dispatcher::new(client, config.preserve_exit_status);
    Ok(dispatcher.dispatch(&request)?)
}

fn load_config(cli: &Cli) -> anyhow::Result<(WrapperConfig, gitpersona::core::ConfigSource)> {
    WrapperConfig::discover(cli.config.as_deref()).context("Could not load gitpersona config")
}

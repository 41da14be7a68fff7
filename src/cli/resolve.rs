//! Identity resolution
//!
//! Picks a profile (from `--profile` or the menu), builds the invocation
//! request, and gates it behind the connectivity probe.

use tracing::{debug, info};

use super::output::Output;
use super::prompt::Prompter;
use super::WrapperError;
use crate::core::{IdentityProfile, InvocationRequest, ProfileSet};
use crate::git::ConnectivityProbe;

/// Resolve which identity this invocation runs under.
///
/// `requested` is a profile name given non-interactively; without it the
/// operator is asked. Passing `probe = None` skips the connectivity check.
pub async fn resolve_identity(
    raw_arguments: Vec<String>,
    profiles: &ProfileSet,
    requested: Option<&str>,
    probe: Option<&ConnectivityProbe>,
    prompter: &mut dyn Prompter,
) -> Result<InvocationRequest, WrapperError> {
    let profile = select_profile(profiles, requested, prompter)?;
    info!(profile = %profile.name, alias = %profile.host_alias, "identity selected");
    Output::info(&format!(
        "Using identity {}",
        Output::profile_name(&profile.name)
    ));

    let request = InvocationRequest::new(raw_arguments, profiles, profile);
    if request.was_rewritten() {
        Output::info(&format!(
            "Rewrote {} → {} in arguments",
            Output::alias(&profiles.default_profile().host_alias),
            Output::alias(&profile.host_alias)
        ));
    }

    if let Some(probe) = probe {
        gate_on_probe(probe, profile, prompter).await?;
    }

    Ok(request)
}

fn select_profile<'a>(
    profiles: &'a ProfileSet,
    requested: Option<&str>,
    prompter: &mut dyn Prompter,
) -> Result<&'a IdentityProfile, WrapperError> {
    if let Some(name) = requested {
        return profiles
            .get(name)
            .ok_or_else(|| WrapperError::UnknownProfile {
                name: name.to_string(),
                available: profiles.names().join(", "),
            });
    }

    if profiles.len() == 1 {
        return Ok(profiles.default_profile());
    }

    let answer = prompter
        .choose_profile(&profiles.menu_items())
        .map_err(WrapperError::Prompt)?;
    debug!(answer = %answer, "menu answer");
    Ok(profiles.resolve_choice(&answer))
}

async fn gate_on_probe(
    probe: &ConnectivityProbe,
    profile: &IdentityProfile,
    prompter: &mut dyn Prompter,
) -> Result<(), WrapperError> {
    let target = profile.probe_target();

    let spinner = Output::spinner(&format!("Testing SSH connection to {}...", target));
    let outcome = probe.authenticate(&target).await;
    spinner.finish_and_clear();

    if outcome.is_authenticated() {
        Output::success(&format!("SSH authentication to {} succeeded", target));
        return Ok(());
    }

    Output::warning(&format!(
        "SSH authentication to {} failed. Retrying with full output:",
        target
    ));
    probe.rerun_with_output(&target).await;

    Output::warning("The git command may fail. Things to check:");
    Output::list_item(&format!(
        "~/.ssh/config has a 'Host {}' entry pointing at the right key",
        profile.host_alias
    ));
    Output::list_item("the key is loaded into your agent (ssh-add -l)");
    Output::list_item("the public key is registered with your account");
    Output::list_item("skip this check with --no-probe");

    let proceed = prompter
        .confirm("Continue anyway?")
        .map_err(WrapperError::Prompt)?;
    if proceed {
        debug!(profile = %profile.name, "continuing after failed probe");
        Ok(())
    } else {
        Err(WrapperError::ProbeDeclined(profile.name.clone()))
    }
}

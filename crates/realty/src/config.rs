//! CLI configuration: thin wrapper around `realty_config`.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--api-url, --token, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use realty_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use realty_config::{
    Config, Profile, config_path, load_config_or_default, parse_api_url, save_config,
    store_token_in_keyring,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConsoleConfig` from the config file, profile, and CLI overrides.
///
/// Flags win over the profile. With no matching profile, `--api-url`
/// alone is enough; a token is optional either way.
pub fn resolve_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut console = realty_config::profile_to_console_config(
            &with_flag_url(profile, global),
            &profile_name,
            &cfg.defaults,
        )?;
        if let Some(token) = flag_token(global) {
            console.token = Some(token);
        }
        if let Some(secs) = global.timeout {
            console.timeout = Some(Duration::from_secs(secs));
        }
        return Ok(console);
    }

    let Some(ref url) = global.api_url else {
        // An explicitly requested profile that doesn't exist deserves its own error.
        if global.profile.is_some() {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    };

    let mut console = ConsoleConfig::new(parse_api_url(url)?);
    console.token = flag_token(global);
    console.timeout = global
        .timeout
        .or(cfg.defaults.timeout)
        .map(Duration::from_secs);
    Ok(console)
}

fn with_flag_url(profile: &Profile, global: &GlobalOpts) -> Profile {
    let mut profile = profile.clone();
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    profile
}

fn flag_token(global: &GlobalOpts) -> Option<SecretString> {
    global
        .token
        .as_ref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| SecretString::from(t.clone()))
}

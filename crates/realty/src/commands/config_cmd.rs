//! Config subcommand handlers.

use dialoguer::Input;
use secrecy::SecretString;
use tabled::Tabled;

use realty_core::SubmitPolicy;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "api_url = \"{}\"", p.api_url);
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(policy) = p.submit_policy {
            let policy = match policy {
                SubmitPolicy::ResetEagerly => "reset-eagerly",
                SubmitPolicy::KeepUntilSettled => "keep-until-settled",
            };
            let _ = writeln!(out, "submit_policy = \"{policy}\"");
        }
    }

    out
}

/// Copy of `cfg` safe to serialize for `--output json|yaml`.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: realty_config::Defaults {
            output: cfg.defaults.output.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                p.token = p.token.map(|_| "****".into());
                (name.clone(), p)
            })
            .collect(),
    }
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "API URL")]
    api_url: String,
    #[tabled(rename = "Default")]
    default: String,
}

fn read_token(given: Option<&str>) -> Result<SecretString, CliError> {
    let token = match given {
        Some(t) => t.to_owned(),
        None => rpassword::prompt_password("Session token: ").map_err(prompt_err)?,
    };
    if token.trim().is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }
    Ok(SecretString::from(token))
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            let mut cfg = config::load_config_or_default();
            let profile_name = global.profile.clone().unwrap_or_else(|| "default".into());

            let api_url = match global.api_url {
                Some(ref url) => url.clone(),
                None => Input::new()
                    .with_prompt("API base URL")
                    .default("http://localhost:5000/api".into())
                    .interact_text()
                    .map_err(prompt_err)?,
            };
            config::parse_api_url(&api_url)?;

            if let Some(ref token) = global.token {
                let secret = read_token(Some(token))?;
                config::store_token_in_keyring(&profile_name, &secret)?;
                if !global.quiet {
                    eprintln!("   ✓ Session token stored in system keyring");
                }
            }

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            profile.api_url = api_url;
            if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", config_path.display());
                eprintln!("  Profile: {profile_name}");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config_redacted, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = config::active_profile_name(global, &cfg);
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            let out = output::render_list(
                &global.output,
                &names,
                |name| ProfileRow {
                    name: name.clone(),
                    api_url: cfg.profiles[name].api_url.clone(),
                    default: if *name == default { "*".into() } else { String::new() },
                },
                String::clone,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Use <name> ──────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
                available.sort();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken { value } => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let secret = read_token(value.as_deref().or(global.token.as_deref()))?;
            config::store_token_in_keyring(&profile_name, &secret)?;
            if !global.quiet {
                eprintln!("✓ Session token for '{profile_name}' stored in system keyring");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                api_url: "https://api.example.com/api".into(),
                token: Some("very-secret".into()),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn display_masks_tokens() {
        let text = format_config_redacted(&sample());
        assert!(text.contains("[profiles.prod]"));
        assert!(text.contains("token = \"****\""));
        assert!(!text.contains("very-secret"));
    }

    #[test]
    fn structured_output_masks_tokens() {
        let cfg = redacted(&sample());
        assert_eq!(cfg.profiles["prod"].token.as_deref(), Some("****"));
    }
}

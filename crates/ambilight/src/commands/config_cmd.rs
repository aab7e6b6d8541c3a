//! Config subcommand handlers.

use std::collections::HashMap;

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

/// `cfg` is the config as loaded; a file that fails to parse never gets
/// this far, so writing it back cannot drop profiles.
pub fn handle(args: ConfigArgs, global: &GlobalOpts, mut cfg: Config) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(cfg),
        ConfigCommand::Show => {
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format!("{c:#?}"),
                |_| "config".into(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(global, cfg, &key, value),
        ConfigCommand::Profiles => {
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: ambilight config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }
        ConfigCommand::Use { name } => {
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(mut cfg: Config) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("✨ ambilight — configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let bridge: String = Input::new()
        .with_prompt("Bridge URL (the ambilight UI host)")
        .default("http://127.0.0.1:8080".into())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let insecure = bridge.starts_with("https://")
        && Confirm::new()
            .with_prompt("Accept a self-signed certificate?")
            .default(false)
            .interact()
            .map_err(prompt_err)?;

    let profile = Profile {
        bridge,
        insecure: insecure.then_some(true),
        ..Profile::default()
    };

    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: ambilight status");
    Ok(())
}

// ── Set <key> <value> ───────────────────────────────────────────────

fn set(global: &GlobalOpts, mut cfg: Config, key: &str, value: String) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, &cfg);
    apply(&mut cfg.profiles, &profile_name, key, value)?;
    config::save_config(&cfg)?;
    eprintln!("✓ Set {key} on profile '{profile_name}'");
    Ok(())
}

fn apply(
    profiles: &mut HashMap<String, Profile>,
    profile_name: &str,
    key: &str,
    value: String,
) -> Result<(), CliError> {
    let profile = profiles.entry(profile_name.to_owned()).or_default();

    match key {
        "bridge" => {
            url::Url::parse(&value).map_err(|e| CliError::Validation {
                field: "bridge".into(),
                reason: format!("invalid URL: {e}"),
            })?;
            profile.bridge = value;
        }
        "bridge_path" | "bridge-path" => profile.bridge_path = Some(value),
        "preview_path" | "preview-path" => profile.preview_path = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: bridge, bridge_path, \
                     preview_path, ca_cert, insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_missing_profile() {
        let mut profiles = HashMap::new();
        apply(&mut profiles, "den", "bridge", "http://10.0.0.5:8080".into()).unwrap();
        apply(&mut profiles, "den", "timeout", "5".into()).unwrap();

        let den = &profiles["den"];
        assert_eq!(den.bridge, "http://10.0.0.5:8080");
        assert_eq!(den.timeout, Some(5));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profiles = HashMap::new();
        assert!(apply(&mut profiles, "den", "bridge", "nowhere".into()).is_err());
        assert!(apply(&mut profiles, "den", "insecure", "maybe".into()).is_err());
        assert!(apply(&mut profiles, "den", "site", "default".into()).is_err());
    }
}

//! CLI configuration — thin wrapper around `ambilight_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--bridge, --insecure, --timeout, --output,
//! --color).

use std::time::Duration;

use clap::parser::ValueSource;
use clap::{ArgMatches, ValueEnum};

use ambilight_core::{SessionConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use ambilight_config::{
    Config, Defaults, Profile, config_path, load_config, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Fill `--output` and `--color` from `[defaults]` when neither the flag
/// nor its env var was given.
pub fn apply_display_defaults(
    global: &mut GlobalOpts,
    matches: &ArgMatches,
    defaults: &Defaults,
) -> Result<(), CliError> {
    if matches.value_source("output") == Some(ValueSource::DefaultValue) {
        global.output = parse_default(&defaults.output, "defaults.output")?;
    }
    if matches.value_source("color") == Some(ValueSource::DefaultValue) {
        global.color = parse_default(&defaults.color, "defaults.color")?;
    }
    Ok(())
}

fn parse_default<T: ValueEnum>(value: &str, field: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Build a `SessionConfig` from the loaded config, profile, and CLI
/// overrides.
///
/// Without a matching profile, `--bridge` alone is enough.
pub fn build_session_config(global: &GlobalOpts, cfg: &Config) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut profile = match (cfg.profiles.get(&profile_name), &global.bridge) {
        (Some(profile), _) => profile.clone(),
        (None, Some(_)) => Profile::default(),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(cfg),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // Bridge URL (flag > env > profile)
    if let Some(ref bridge) = global.bridge {
        profile.bridge.clone_from(bridge);
    }

    let mut session = ambilight_config::profile_to_session_config(&profile, &cfg.defaults)?;

    if global.insecure {
        session.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        session.timeout = Some(Duration::from_secs(secs));
    }

    Ok(session)
}

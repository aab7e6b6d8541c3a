//! Shared helpers for command handlers.

use std::io::IsTerminal;

use ambilight_core::CoreError;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(action: &str, message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Reject blank preset names before they reach the session.
pub fn preset_name(name: &str) -> Result<&str, CliError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CliError::Validation {
            field: "name".into(),
            reason: "preset name cannot be empty".into(),
        });
    }
    Ok(trimmed)
}

/// Turn a bridge 404 into a `NotFound` naming the resource.
pub fn not_found_as(err: CoreError, resource_type: &str, identifier: &str, list_command: &str) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
            list_command: list_command.into(),
        }
    } else {
        err.into()
    }
}

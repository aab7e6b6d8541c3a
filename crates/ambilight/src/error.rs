//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ambilight_config::ConfigError;
use ambilight_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the bridge at {url}")]
    #[diagnostic(
        code(ambilight::connection_failed),
        help(
            "Check that the ambilight backend is running and reachable.\n\
             For self-signed HTTPS use --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Bridge request timed out")]
    #[diagnostic(
        code(ambilight::timeout),
        help("Increase the limit with --timeout or check the backend's responsiveness.")
    )]
    Timeout,

    // ── Bridge ───────────────────────────────────────────────────────
    #[error("Bridge error ({status}): {message}")]
    #[diagnostic(code(ambilight::bridge))]
    Bridge { status: u16, message: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(ambilight::not_found),
        help("Run: ambilight {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Internal error: {message}")]
    #[diagnostic(code(ambilight::internal))]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ambilight::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ambilight::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: ambilight config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No bridge configured")]
    #[diagnostic(
        code(ambilight::no_config),
        help(
            "Pass --bridge <URL>, set AMBILIGHT_BRIDGE, or create a profile with: \
             ambilight config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(ambilight::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(ambilight::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Bridge { status, message } => CliError::Bridge {
                status,
                message: if message.is_empty() {
                    "(empty response)".into()
                } else {
                    message
                },
            },

            CoreError::InvalidField {
                field,
                value,
                expected,
            } => CliError::Validation {
                field: field.to_string(),
                reason: format!("'{value}' is not {expected}"),
            },

            CoreError::Config { message } => CliError::Validation {
                field: "bridge".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::Internal { message },
        }
    }
}

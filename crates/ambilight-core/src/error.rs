// ── Core error types ──
//
// User-facing errors from ambilight-core. The `From<ambilight_api::Error>`
// impl translates transport-layer errors into these variants while keeping
// the bridge status intact.

use thiserror::Error;

use crate::view::FieldId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach bridge at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Bridge request timed out")]
    Timeout,

    // ── Bridge errors ────────────────────────────────────────────────
    /// The round trip completed with a non-success status.
    #[error("Bridge error: {status}")]
    Bridge { status: u16, message: String },

    // ── Field errors ─────────────────────────────────────────────────
    #[error("Field '{field}' holds '{value}', expected {expected}")]
    InvalidField {
        field: FieldId,
        value: String,
        expected: &'static str,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Bridge status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Bridge { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<ambilight_api::Error> for CoreError {
    fn from(err: ambilight_api::Error) -> Self {
        match err {
            ambilight_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if let Some(status) = e.status() {
                    CoreError::Bridge {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            ambilight_api::Error::BridgeStatus { status, body } => CoreError::Bridge {
                status,
                message: body,
            },
            ambilight_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ambilight_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ambilight_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

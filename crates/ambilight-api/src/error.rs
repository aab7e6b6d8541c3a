use thiserror::Error;

/// Top-level error type for the `ambilight-api` crate.
///
/// The bridge reports two kinds of failure: the round trip never
/// completed ([`Transport`](Self::Transport)), or it completed with a
/// non-success status ([`BridgeStatus`](Self::BridgeStatus)).
/// `ambilight-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Bridge ──────────────────────────────────────────────────────
    /// The bridge answered, but with a non-success status.
    #[error("Bridge error: {status}")]
    BridgeStatus { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The HTTP status carried by the failure, if the round trip completed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BridgeStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

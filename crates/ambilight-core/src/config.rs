// ── Runtime connection configuration ──
//
// Describes *how* to reach the bridge. Never touches disk: the CLI (via
// ambilight-config) builds a `SessionConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use ambilight_api::{DEFAULT_BRIDGE_PATH, TlsMode, TransportConfig};

use crate::poller::DIAGNOSTICS_INTERVAL;

/// Where the live preview stream is served, relative to the base URL.
pub const DEFAULT_PREVIEW_PATH: &str = "/preview";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs on the LAN).
    DangerAcceptInvalid,
}

/// Configuration for one control session against one bridge.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the UI host (e.g., `http://192.168.1.20:8080`).
    pub url: Url,
    /// Path of the bridge endpoint under `url`.
    pub bridge_path: String,
    /// Path of the preview stream under `url`.
    pub preview_path: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Optional request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Diagnostics refresh period. Must be non-zero.
    pub diagnostics_interval: Duration,
}

impl SessionConfig {
    /// Defaults for everything except the base URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            bridge_path: DEFAULT_BRIDGE_PATH.into(),
            preview_path: DEFAULT_PREVIEW_PATH.into(),
            tls: TlsVerification::default(),
            timeout: None,
            diagnostics_interval: DIAGNOSTICS_INTERVAL,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}

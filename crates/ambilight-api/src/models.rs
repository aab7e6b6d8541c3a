// Wire types for the resources addressed through the bridge.
//
// These mirror the backend's JSON exactly. The client holds them only
// transiently; the backend owns every one of them.

use serde::{Deserialize, Serialize};

/// Analysis rate this client always submits with a configuration.
pub const ANALYSIS_HZ: f64 = 25.0;

/// Rectangular capture region, in display pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The backend's live configuration.
///
/// `PUT /api/config` replaces it wholesale, so every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub display_id: u32,
    pub preview_interval_sec: f64,
    pub dark_threshold: f64,
    pub saturation_boost: f64,
    pub analysis_hz: f64,
    pub zone: Zone,
}

/// A capture display as enumerated by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// A named, persisted copy of a [`Configuration`].
///
/// On the wire the name sits alongside the configuration fields:
/// `{"name": "evening", "display_id": 1, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub config: Configuration,
}

/// Opaque status snapshot from `GET /api/status`.
///
/// The backend decides its shape. Consumers render it as-is; the only
/// structured read offered is [`sync_status`](Self::sync_status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(pub serde_json::Value);

impl Diagnostics {
    /// Sync engine state, if the snapshot reports one under
    /// `sync_state.status`.
    pub fn sync_status(&self) -> Option<SyncStatus> {
        self.0
            .pointer("/sync_state/status")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Sync engine state as reported in diagnostics. Never tracked locally.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncStatus {
    Stopped,
    Running,
    Paused,
}

/// Transition commands accepted by the sync engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SyncCommand {
    Start,
    Pause,
    Resume,
    Stop,
}

impl SyncCommand {
    /// Logical path of this command, e.g. `/api/sync/start`.
    pub fn path(self) -> String {
        format!("/api/sync/{self}")
    }
}

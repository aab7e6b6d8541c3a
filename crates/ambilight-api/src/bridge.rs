// Single-endpoint transport to the ambilight bridge.
//
// Every logical operation is one POST to `<base><bridge_path>` with a
// `{path, method, data}` envelope. The logical path and method never
// appear on the wire as a real URL or verb.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

/// Outer endpoint the bridge listens on, relative to the base URL.
pub const DEFAULT_BRIDGE_PATH: &str = "/bridge";

// ── Envelope ─────────────────────────────────────────────────────────

/// Logical method carried inside the envelope.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BridgeMethod {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Serialize)]
struct BridgeRequest<'a, B: Serialize> {
    path: &'a str,
    method: BridgeMethod,
    data: Option<&'a B>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the bridge endpoint.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
    endpoint: Url,
}

impl BridgeClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the bridge at `base_url` + `bridge_path`.
    pub fn new(
        base_url: Url,
        bridge_path: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, bridge_path)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        bridge_path: &str,
    ) -> Result<Self, Error> {
        let endpoint = base_url.join(bridge_path)?;
        Ok(Self {
            http,
            base_url,
            endpoint,
        })
    }

    /// The base URL the bridge and the preview stream hang off.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The full URL every request is posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Resolve a resource outside the bridge protocol (e.g. the preview
    /// stream) against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Round trip ───────────────────────────────────────────────────

    /// Send one logical operation through the bridge and decode the result.
    ///
    /// Exactly one attempt is made. `data: None` is sent as JSON `null`.
    pub async fn send<T, B>(
        &self,
        path: &str,
        method: BridgeMethod,
        data: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!("{method} {path} via {}", self.endpoint);

        let envelope = BridgeRequest { path, method, data };
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&envelope)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // ── Logical verbs ────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send::<T, ()>(path, BridgeMethod::Get, None).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send(path, BridgeMethod::Put, Some(body)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send(path, BridgeMethod::Post, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send(path, BridgeMethod::Delete, Some(body)).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::BridgeStatus {
                status: status.as_u16(),
                body,
            });
        }

        // 204-style acknowledgements carry no body at all.
        let text = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };
        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

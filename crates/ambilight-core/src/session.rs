// ── Session controller ──
//
// Startup orchestration and the operator's actions. Every handler reads
// or writes the field store, then talks to the bridge; the store lock is
// never held across a round trip.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use ambilight_api::{BridgeClient, SyncCommand};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::poller::Poller;
use crate::view::{FieldStore, binder};

// ── Action ───────────────────────────────────────────────────────────

/// One operator control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    Start,
    Pause,
    Resume,
    Stop,
    SaveConfig,
    SavePreset,
    LoadPreset,
    DeletePreset,
}

// ── Session ──────────────────────────────────────────────────────────

/// A control session bound to one bridge and one field store.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Handlers may run
/// concurrently with each other and with the diagnostics poller; there is
/// no de-duplication and whichever response lands last wins.
pub struct Session<V> {
    inner: Arc<SessionInner<V>>,
}

struct SessionInner<V> {
    config: SessionConfig,
    client: BridgeClient,
    view: Mutex<V>,
    poller: Mutex<Option<Poller>>,
    /// Cancelled on shutdown; parent of the poller's token.
    cancel: CancellationToken,
}

impl<V> Drop for SessionInner<V> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<V> Clone for Session<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Session<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("url", &self.inner.config.url.as_str())
            .field("endpoint", &self.inner.client.endpoint().as_str())
            .finish_non_exhaustive()
    }
}

impl<V: FieldStore + Send + 'static> Session<V> {
    /// Build a session and its HTTP client. No request is made.
    pub fn new(config: SessionConfig, view: V) -> Result<Self, CoreError> {
        let client = BridgeClient::new(config.url.clone(), &config.bridge_path, &config.transport())?;
        Ok(Self::with_client(config, client, view))
    }

    /// Build a session around an existing bridge client.
    pub fn with_client(config: SessionConfig, client: BridgeClient, view: V) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                config,
                client,
                view: Mutex::new(view),
                poller: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &BridgeClient {
        &self.inner.client
    }

    /// Lock the field store. Do not hold the guard across a session call.
    pub async fn view(&self) -> MutexGuard<'_, V> {
        self.inner.view.lock().await
    }

    /// Absolute URL of the live preview stream.
    pub fn preview_url(&self) -> Result<Url, CoreError> {
        Ok(self.inner.client.resolve(&self.inner.config.preview_path)?)
    }

    // ── Startup ──────────────────────────────────────────────────────

    /// Bring the session up: preview source, displays, configuration, one
    /// diagnostics read, then the poller.
    ///
    /// Steps run strictly in order. The first failure is returned and the
    /// steps after it are skipped, so a failed startup never starts the
    /// poller.
    pub async fn startup(&self) -> Result<(), CoreError> {
        let preview = self.preview_url()?;
        debug!(%preview, "setting preview source");
        self.inner.view.lock().await.set_preview_source(&preview);

        self.load_displays().await?;
        self.load_config().await?;
        self.refresh_diagnostics().await?;
        self.start_poller().await;

        info!(url = %self.inner.config.url, "session started");
        Ok(())
    }

    /// Fetch displays and rebuild the selector.
    pub async fn load_displays(&self) -> Result<(), CoreError> {
        debug!("loading displays");
        let displays = self.inner.client.get_displays().await?;
        binder::hydrate_displays(&mut *self.inner.view.lock().await, &displays);
        Ok(())
    }

    /// Fetch the live configuration and write it into the fields.
    pub async fn load_config(&self) -> Result<(), CoreError> {
        debug!("loading configuration");
        let config = self.inner.client.get_config().await?;
        binder::hydrate_config(&mut *self.inner.view.lock().await, &config);
        Ok(())
    }

    /// Fetch diagnostics and overwrite the panel.
    pub async fn refresh_diagnostics(&self) -> Result<(), CoreError> {
        let diagnostics = self.inner.client.get_status().await?;
        binder::render_diagnostics(&mut *self.inner.view.lock().await, &diagnostics);
        Ok(())
    }

    // ── Poller ───────────────────────────────────────────────────────

    /// Start the diagnostics poller. No-op when it already runs or the
    /// session has been shut down.
    pub async fn start_poller(&self) {
        if self.inner.cancel.is_cancelled() {
            return;
        }

        let mut slot = self.inner.poller.lock().await;
        if slot.as_ref().is_some_and(Poller::is_running) {
            return;
        }

        let period = self.inner.config.diagnostics_interval;
        debug!(?period, "starting diagnostics poller");
        // Weak so that dropping every handle lets the session go.
        let weak = Arc::downgrade(&self.inner);
        *slot = Some(Poller::spawn(
            period,
            self.inner.cancel.child_token(),
            move || {
                let session = Session {
                    inner: weak.upgrade()?,
                };
                Some(async move { session.refresh_diagnostics().await })
            },
        ));
    }

    pub async fn is_polling(&self) -> bool {
        self.inner
            .poller
            .lock()
            .await
            .as_ref()
            .is_some_and(Poller::is_running)
    }

    /// Stop the poller and wait for it to exit. The session can still run
    /// actions afterwards but will not poll again.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let poller = self.inner.poller.lock().await.take();
        if let Some(poller) = poller {
            poller.stop().await;
        }
        info!("session shut down");
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Run one action to completion.
    pub async fn handle(&self, action: Action) -> Result<(), CoreError> {
        debug!(%action, "handling action");
        match action {
            Action::Start => self.sync(SyncCommand::Start).await,
            Action::Pause => self.sync(SyncCommand::Pause).await,
            Action::Resume => self.sync(SyncCommand::Resume).await,
            Action::Stop => self.sync(SyncCommand::Stop).await,
            Action::SaveConfig => self.save_config().await,
            Action::SavePreset => self.save_preset().await,
            Action::LoadPreset => self.load_preset().await,
            Action::DeletePreset => self.delete_preset().await,
        }
    }

    /// Run an action in the background. A failure is logged and also
    /// returned through the handle, which callers are free to drop.
    pub fn dispatch(&self, action: Action) -> JoinHandle<Result<(), CoreError>> {
        let session = self.clone();
        tokio::spawn(async move {
            let result = session.handle(action).await;
            if let Err(ref e) = result {
                warn!(%action, error = %e, "action failed");
            }
            result
        })
    }

    /// Issue a sync engine command.
    pub async fn sync(&self, command: SyncCommand) -> Result<(), CoreError> {
        Ok(self.inner.client.sync(command).await?)
    }

    /// Collect the fields and replace the live configuration with them.
    ///
    /// A field that does not parse fails with
    /// [`CoreError::InvalidField`] before any request is made.
    pub async fn save_config(&self) -> Result<(), CoreError> {
        let config = binder::collect_config(&*self.inner.view.lock().await)?;
        self.inner.client.put_config(&config).await?;
        Ok(())
    }

    /// Store the backend's current configuration under the preset name.
    ///
    /// Unsaved field edits are not part of the preset.
    pub async fn save_preset(&self) -> Result<(), CoreError> {
        let Some(name) = self.preset_name().await else {
            return Ok(());
        };
        let config = self.inner.client.get_config().await?;
        self.inner.client.save_preset(&name, &config).await?;
        Ok(())
    }

    /// Apply the named preset, then re-read the configuration into the
    /// fields.
    pub async fn load_preset(&self) -> Result<(), CoreError> {
        let Some(name) = self.preset_name().await else {
            return Ok(());
        };
        self.inner.client.load_preset(&name).await?;
        self.load_config().await
    }

    /// Delete the named preset. Nothing is refreshed afterwards.
    pub async fn delete_preset(&self) -> Result<(), CoreError> {
        let Some(name) = self.preset_name().await else {
            return Ok(());
        };
        self.inner.client.delete_preset(&name).await?;
        Ok(())
    }

    async fn preset_name(&self) -> Option<String> {
        let name = binder::preset_name(&*self.inner.view.lock().await);
        if name.is_none() {
            debug!("preset name is empty, nothing to do");
        }
        name
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::view::{FieldId, FormState};

    fn offline_session() -> Session<FormState> {
        // Nothing listens on the discard port; these tests make no requests.
        let config = SessionConfig::new(Url::parse("http://127.0.0.1:9").unwrap());
        Session::new(config, FormState::new()).unwrap()
    }

    #[test]
    fn action_names() {
        let names: Vec<String> = Action::iter().map(|a| a.to_string()).collect();
        assert_eq!(
            names,
            [
                "start",
                "pause",
                "resume",
                "stop",
                "save-config",
                "save-preset",
                "load-preset",
                "delete-preset",
            ]
        );
    }

    #[test]
    fn preview_url_resolves_against_base() {
        let session = offline_session();
        assert_eq!(
            session.preview_url().unwrap().as_str(),
            "http://127.0.0.1:9/preview"
        );
    }

    #[tokio::test]
    async fn blank_preset_name_short_circuits() {
        let session = offline_session();
        session.view().await.write(FieldId::PresetName, "  ");

        session.handle(Action::SavePreset).await.unwrap();
        session.handle(Action::LoadPreset).await.unwrap();
        session.handle(Action::DeletePreset).await.unwrap();
    }

    #[tokio::test]
    async fn dropped_session_releases_its_poller() {
        let mut config = SessionConfig::new(Url::parse("http://127.0.0.1:9").unwrap());
        config.diagnostics_interval = std::time::Duration::from_millis(20);
        let session = Session::new(config, FormState::new()).unwrap();
        session.start_poller().await;
        let inner = Arc::downgrade(&session.inner);

        drop(session);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;

        assert!(inner.upgrade().is_none());
    }

    #[tokio::test]
    async fn shutdown_prevents_polling() {
        let session = offline_session();
        session.shutdown().await;

        session.start_poller().await;

        assert!(!session.is_polling().await);
    }
}

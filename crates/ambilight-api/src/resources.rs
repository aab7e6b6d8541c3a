// Typed accessors for the resources behind the bridge.
//
// One method per logical operation. Failures propagate unchanged;
// acknowledgements are decoded as raw JSON and discarded.

use serde_json::{Value, json};
use url::Url;

use crate::bridge::BridgeClient;
use crate::models::{Configuration, Diagnostics, Display, Preset, SyncCommand};
use crate::Error;

const CONFIG_PATH: &str = "/api/config";
const STATUS_PATH: &str = "/api/status";
const DISPLAYS_PATH: &str = "/api/displays";
const PRESETS_PATH: &str = "/api/presets";

const PRESET_SEGMENT_BASE: &str = "http://bridge.invalid/api/presets/";

/// Build `/api/presets/<name>[/<suffix>]` with `name` as one encoded segment.
fn preset_path(name: &str, suffix: Option<&str>) -> Result<String, Error> {
    // `.` and `..` would be normalized away as dot segments.
    if matches!(name, "." | "..") {
        let segment = name.replace('.', "%2E");
        return Ok(match suffix {
            Some(suffix) => format!("{PRESETS_PATH}/{segment}/{suffix}"),
            None => format!("{PRESETS_PATH}/{segment}"),
        });
    }

    let mut url = Url::parse(PRESET_SEGMENT_BASE)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(name);
        if let Some(suffix) = suffix {
            segments.push(suffix);
        }
    }
    Ok(url.path().to_owned())
}

impl BridgeClient {
    // ── Configuration ────────────────────────────────────────────────

    /// Read the full live configuration.
    pub async fn get_config(&self) -> Result<Configuration, Error> {
        self.get(CONFIG_PATH).await
    }

    /// Replace the full live configuration. Not a patch.
    pub async fn put_config(&self, config: &Configuration) -> Result<(), Error> {
        let _: Value = self.put(CONFIG_PATH, config).await?;
        Ok(())
    }

    // ── Displays & status ────────────────────────────────────────────

    /// List capture displays, in backend order.
    pub async fn get_displays(&self) -> Result<Vec<Display>, Error> {
        self.get(DISPLAYS_PATH).await
    }

    /// Fetch the current status snapshot.
    pub async fn get_status(&self) -> Result<Diagnostics, Error> {
        self.get(STATUS_PATH).await
    }

    // ── Presets ──────────────────────────────────────────────────────

    /// List stored presets.
    pub async fn list_presets(&self) -> Result<Vec<Preset>, Error> {
        self.get(PRESETS_PATH).await
    }

    /// Store `config` under `name`, replacing any preset with that name.
    pub async fn save_preset(&self, name: &str, config: &Configuration) -> Result<(), Error> {
        let preset = Preset {
            name: name.to_owned(),
            config: config.clone(),
        };
        let _: Value = self.post(PRESETS_PATH, &preset).await?;
        Ok(())
    }

    /// Apply a preset to the live configuration.
    ///
    /// The backend swaps its configuration; nothing local changes. Re-read
    /// the configuration to observe the result.
    pub async fn load_preset(&self, name: &str) -> Result<(), Error> {
        let _: Value = self
            .post(&preset_path(name, Some("load"))?, &json!({}))
            .await?;
        Ok(())
    }

    /// Delete a preset. No existence check is made first.
    pub async fn delete_preset(&self, name: &str) -> Result<(), Error> {
        let _: Value = self.delete(&preset_path(name, None)?, &json!({})).await?;
        Ok(())
    }

    // ── Sync engine ──────────────────────────────────────────────────

    /// Issue a sync engine transition. The acknowledgement is ignored.
    pub async fn sync(&self, command: SyncCommand) -> Result<(), Error> {
        let _: Value = self.post(&command.path(), &json!({})).await?;
        Ok(())
    }

    pub async fn sync_start(&self) -> Result<(), Error> {
        self.sync(SyncCommand::Start).await
    }

    pub async fn sync_pause(&self) -> Result<(), Error> {
        self.sync(SyncCommand::Pause).await
    }

    pub async fn sync_resume(&self) -> Result<(), Error> {
        self.sync(SyncCommand::Resume).await
    }

    pub async fn sync_stop(&self) -> Result<(), Error> {
        self.sync(SyncCommand::Stop).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::preset_path;

    #[test]
    fn preset_paths_encode_the_name() {
        assert_eq!(preset_path("evening", None).unwrap(), "/api/presets/evening");
        assert_eq!(
            preset_path("evening", Some("load")).unwrap(),
            "/api/presets/evening/load"
        );
        assert_eq!(
            preset_path("movie night", Some("load")).unwrap(),
            "/api/presets/movie%20night/load"
        );
        assert_eq!(preset_path("a/b", None).unwrap(), "/api/presets/a%2Fb");
    }

    #[test]
    fn dot_names_stay_literal_segments() {
        assert_eq!(preset_path("..", None).unwrap(), "/api/presets/%2E%2E");
        assert_eq!(preset_path(".", None).unwrap(), "/api/presets/%2E");
        assert_eq!(
            preset_path("..", Some("load")).unwrap(),
            "/api/presets/%2E%2E/load"
        );
        assert_eq!(preset_path("...", None).unwrap(), "/api/presets/...");
    }
}

#![allow(clippy::unwrap_used)]
// Session tests against a wiremock bridge.
//
// Every logical operation goes through the same POST /bridge, so mocks
// match on the envelope and ordering is read back from the recorded
// request bodies.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ambilight_core::{
    Action, CoreError, FieldId, FieldStore, FormState, Session, SessionConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Session<FormState>) {
    let server = MockServer::start().await;
    let session = session_for(&server, Duration::from_secs(1));
    (server, session)
}

fn session_for(server: &MockServer, interval: Duration) -> Session<FormState> {
    let mut config = SessionConfig::new(Url::parse(&server.uri()).unwrap());
    config.diagnostics_interval = interval;
    Session::new(config, FormState::new()).unwrap()
}

fn living_room_config() -> Value {
    json!({
        "display_id": 3,
        "preview_interval_sec": 0.5,
        "dark_threshold": 0.1,
        "saturation_boost": 1.2,
        "analysis_hz": 25,
        "zone": { "x": 0, "y": 0, "width": 100, "height": 50 }
    })
}

async fn mock_op(server: &MockServer, op_path: &str, op_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/bridge"))
        .and(body_partial_json(json!({ "path": op_path, "method": op_method })))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mock_backend(server: &MockServer) {
    mock_op(
        server,
        "/api/displays",
        "GET",
        ResponseTemplate::new(200).set_body_json(json!([{ "id": 3, "name": "Living Room" }])),
    )
    .await;
    mock_op(
        server,
        "/api/config",
        "GET",
        ResponseTemplate::new(200).set_body_json(living_room_config()),
    )
    .await;
    mock_op(
        server,
        "/api/status",
        "GET",
        ResponseTemplate::new(200).set_body_json(json!({
            "sync_state": { "status": "running", "last_color_rgb": [12, 40, 200] }
        })),
    )
    .await;
}

/// `(method, path)` of every envelope the bridge received, in order.
async fn operations(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| {
            let body: Value = req.body_json().unwrap();
            (
                body["method"].as_str().unwrap().to_owned(),
                body["path"].as_str().unwrap().to_owned(),
            )
        })
        .collect()
}

async fn envelopes(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|req| req.body_json().unwrap())
        .collect()
}

fn op(m: &str, p: &str) -> (String, String) {
    (m.to_owned(), p.to_owned())
}

// ── Startup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_startup_loads_in_order() {
    let (server, session) = setup().await;
    mock_backend(&server).await;

    session.startup().await.unwrap();
    session.shutdown().await;

    assert_eq!(
        operations(&server).await,
        vec![
            op("GET", "/api/displays"),
            op("GET", "/api/config"),
            op("GET", "/api/status"),
        ]
    );
}

#[tokio::test]
async fn test_startup_hydrates_living_room_scenario() {
    let (server, session) = setup().await;
    mock_backend(&server).await;

    session.startup().await.unwrap();
    session.shutdown().await;

    let view = session.view().await;
    assert_eq!(view.selected_display().unwrap().label, "Living Room");
    assert_eq!(view.read(FieldId::DisplaySelect), "3");
    assert_eq!(view.read(FieldId::PreviewInterval), "0.5");
    assert_eq!(view.read(FieldId::DarkThreshold), "0.1");
    assert_eq!(view.read(FieldId::SaturationBoost), "1.2");
    assert_eq!(view.read(FieldId::ZoneX), "0");
    assert_eq!(view.read(FieldId::ZoneY), "0");
    assert_eq!(view.read(FieldId::ZoneWidth), "100");
    assert_eq!(view.read(FieldId::ZoneHeight), "50");
    assert!(view.diagnostics().contains("\"running\""));
    assert_eq!(
        view.preview_source().unwrap().as_str(),
        format!("{}/preview", server.uri())
    );
}

#[tokio::test]
async fn test_startup_stops_at_first_failure() {
    let (server, session) = setup().await;
    mock_op(&server, "/api/displays", "GET", ResponseTemplate::new(500)).await;

    let err = session.startup().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(operations(&server).await, vec![op("GET", "/api/displays")]);
    assert!(!session.is_polling().await);
}

#[tokio::test]
async fn test_poller_refreshes_diagnostics() {
    let server = MockServer::start().await;
    mock_backend(&server).await;
    let session = session_for(&server, Duration::from_millis(100));

    session.startup().await.unwrap();
    assert!(session.is_polling().await);
    tokio::time::sleep(Duration::from_millis(350)).await;
    session.shutdown().await;

    let status_reads = operations(&server)
        .await
        .into_iter()
        .filter(|(_, p)| p == "/api/status")
        .count();
    // One startup read plus at least two ticks.
    assert!(status_reads >= 3, "only {status_reads} diagnostics reads");
    assert!(!session.is_polling().await);
}

#[tokio::test]
async fn test_shutdown_does_not_wait_for_stalled_status() {
    let server = MockServer::start().await;
    mock_op(
        &server,
        "/api/status",
        "GET",
        ResponseTemplate::new(200)
            .set_body_json(json!({}))
            .set_delay(Duration::from_secs(30)),
    )
    .await;
    let session = session_for(&server, Duration::from_millis(100));

    session.start_poller().await;
    tokio::time::sleep(Duration::from_millis(350)).await;

    tokio::time::timeout(Duration::from_secs(5), session.shutdown())
        .await
        .expect("shutdown blocked on an in-flight status read");
    // Each tick started its own read even though none ever returned.
    let status_reads = operations(&server).await.len();
    assert!(status_reads >= 2, "only {status_reads} diagnostics reads");
}

// ── Save configuration ──────────────────────────────────────────────

#[tokio::test]
async fn test_save_config_puts_parsed_fields() {
    let (server, session) = setup().await;
    mock_backend(&server).await;
    mock_op(&server, "/api/config", "PUT", ResponseTemplate::new(200).set_body_json(json!({}))).await;

    session.load_displays().await.unwrap();
    session.load_config().await.unwrap();
    {
        let mut view = session.view().await;
        view.write(FieldId::DarkThreshold, "0.25");
        view.write(FieldId::ZoneHeight, "72");
    }

    session.handle(Action::SaveConfig).await.unwrap();

    let put = envelopes(&server).await.pop().unwrap();
    assert_eq!(
        put,
        json!({
            "path": "/api/config",
            "method": "PUT",
            "data": {
                "display_id": 3,
                "preview_interval_sec": 0.5,
                "dark_threshold": 0.25,
                "saturation_boost": 1.2,
                "analysis_hz": 25.0,
                "zone": { "x": 0, "y": 0, "width": 100, "height": 72 }
            }
        })
    );
}

#[tokio::test]
async fn test_save_config_with_invalid_field_makes_no_call() {
    let (server, session) = setup().await;
    {
        let mut view = session.view().await;
        view.replace_display_options(vec![ambilight_core::DisplayOption {
            value: "3".into(),
            label: "Living Room".into(),
        }]);
        view.write(FieldId::PreviewInterval, "soon");
    }

    let err = session.save_config().await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidField { .. }), "got: {err:?}");
    assert!(operations(&server).await.is_empty());
}

// ── Presets ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_preset_name_makes_no_calls() {
    let (server, session) = setup().await;

    for name in ["", "   "] {
        session.view().await.write(FieldId::PresetName, name);
        session.save_preset().await.unwrap();
        session.load_preset().await.unwrap();
        session.delete_preset().await.unwrap();
    }

    assert!(operations(&server).await.is_empty());
}

#[tokio::test]
async fn test_save_preset_reads_backend_config_first() {
    let (server, session) = setup().await;
    mock_backend(&server).await;
    mock_op(&server, "/api/presets", "POST", ResponseTemplate::new(200).set_body_json(json!({}))).await;
    {
        let mut view = session.view().await;
        // Unsaved edit that must not end up in the preset.
        view.write(FieldId::DarkThreshold, "0.9");
        view.write(FieldId::PresetName, " evening ");
    }

    session.handle(Action::SavePreset).await.unwrap();

    assert_eq!(
        operations(&server).await,
        vec![op("GET", "/api/config"), op("POST", "/api/presets")]
    );
    let saved = envelopes(&server).await.pop().unwrap();
    assert_eq!(saved["data"]["name"], "evening");
    assert_eq!(saved["data"]["dark_threshold"], 0.1);
}

#[tokio::test]
async fn test_load_preset_then_rehydrates() {
    let (server, session) = setup().await;
    mock_backend(&server).await;
    mock_op(
        &server,
        "/api/presets/movie%20night/load",
        "POST",
        ResponseTemplate::new(200).set_body_json(json!({ "ok": true })),
    )
    .await;
    session.load_displays().await.unwrap();
    {
        let mut view = session.view().await;
        view.write(FieldId::ZoneWidth, "1");
        view.write(FieldId::PresetName, "movie night");
    }

    session.handle(Action::LoadPreset).await.unwrap();

    assert_eq!(
        operations(&server).await,
        vec![
            op("GET", "/api/displays"),
            op("POST", "/api/presets/movie%20night/load"),
            op("GET", "/api/config"),
        ]
    );
    assert_eq!(session.view().await.read(FieldId::ZoneWidth), "100");
}

#[tokio::test]
async fn test_delete_missing_preset_still_calls_bridge() {
    let (server, session) = setup().await;
    mock_op(
        &server,
        "/api/presets/evening",
        "DELETE",
        ResponseTemplate::new(404).set_body_string("no such preset"),
    )
    .await;
    session.view().await.write(FieldId::PresetName, "evening");

    let err = session.handle(Action::DeletePreset).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        operations(&server).await,
        vec![op("DELETE", "/api/presets/evening")]
    );
}

// ── Sync & dispatch ─────────────────────────────────────────────────

#[tokio::test]
async fn test_dispatched_sync_action() {
    let (server, session) = setup().await;
    mock_op(&server, "/api/sync/pause", "POST", ResponseTemplate::new(200).set_body_json(json!({}))).await;

    session.dispatch(Action::Pause).await.unwrap().unwrap();

    assert_eq!(envelopes(&server).await, vec![json!({
        "path": "/api/sync/pause",
        "method": "POST",
        "data": {}
    })]);
}

#[tokio::test]
async fn test_dispatched_failure_is_returned_through_handle() {
    let (server, session) = setup().await;
    mock_op(&server, "/api/sync/start", "POST", ResponseTemplate::new(503)).await;

    let result = session.dispatch(Action::Start).await.unwrap();

    assert_eq!(result.unwrap_err().status(), Some(503));
}

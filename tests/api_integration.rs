//! Integration tests for the HTTP surface.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use breaktime::{
    create_router,
    services::{JsonFileStore, LoggingRegistrar, LoginItemRegistrar, SettingsStore},
    AppState, SessionHandle, TimerSettings,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    store: JsonFileStore,
    registrar: Arc<LoggingRegistrar>,
    _dir: TempDir,
}

fn test_app(settings: TimerSettings) -> TestApp {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("settings.json"));
    let registrar = Arc::new(LoggingRegistrar::new());
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        SessionHandle::spawn(settings),
        Arc::new(store.clone()),
        registrar.clone(),
        settings,
    ));
    TestApp {
        router: create_router(state),
        store,
        registrar,
        _dir: dir,
    }
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn start_work_reports_full_countdown() {
    let app = test_app(TimerSettings::default());
    let (status, body) = send(&app, "POST", "/work/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "working");
    assert_eq!(body["session"]["phase"], "working");
    assert_eq!(body["session"]["remaining_seconds"], 1500);
    assert_eq!(body["session"]["display"], "25:00");
    assert_eq!(body["session"]["actions"], json!(["pause", "stop"]));
}

#[tokio::test(start_paused = true)]
async fn status_starts_stopped() {
    let app = test_app(TimerSettings::default());
    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["phase"], "stopped");
    assert_eq!(body["session"]["display"], "--:--");
    assert_eq!(body["settings"]["workDurationMinutes"], 25);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_round_trip() {
    let app = test_app(TimerSettings::default());
    send(&app, "POST", "/break/start", None).await;

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["session"]["phase"], "paused");
    assert_eq!(body["session"]["actions"], json!(["resume", "stop"]));

    let (_, body) = send(&app, "POST", "/resume", None).await;
    assert_eq!(body["session"]["phase"], "breaking");
    assert_eq!(body["session"]["remaining_seconds"], 300);

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["last_action"], "resume");
}

#[tokio::test(start_paused = true)]
async fn skip_break_outside_break_changes_nothing() {
    let app = test_app(TimerSettings::default());
    let (status, body) = send(&app, "POST", "/break/skip", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["phase"], "stopped");
}

#[tokio::test(start_paused = true)]
async fn skip_break_starts_full_work() {
    let app = test_app(TimerSettings::new(40, 5, false));
    send(&app, "POST", "/break/start", None).await;
    let (_, body) = send(&app, "POST", "/break/skip", None).await;
    assert_eq!(body["session"]["phase"], "working");
    assert_eq!(body["session"]["remaining_seconds"], 2400);
}

#[tokio::test(start_paused = true)]
async fn postpone_validates_minutes() {
    let app = test_app(TimerSettings::default());
    send(&app, "POST", "/break/start", None).await;

    let (status, _) = send(&app, "POST", "/break/postpone", Some(json!({ "minutes": 0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&app, "POST", "/break/postpone", Some(json!({ "minutes": 5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["phase"], "working");
    assert_eq!(body["session"]["remaining_seconds"], 300);
}

#[tokio::test(start_paused = true)]
async fn put_settings_persists_without_touching_countdown() {
    let app = test_app(TimerSettings::default());
    send(&app, "POST", "/work/start", None).await;

    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({
            "workDurationMinutes": 50,
            "breakDurationMinutes": 10,
            "startAtLogin": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["settings"]["workDurationMinutes"], 50);
    assert_eq!(body["session"]["remaining_seconds"], 1500);

    assert_eq!(app.store.load(), TimerSettings::new(50, 10, true));
    assert!(app.registrar.is_registered().unwrap());

    let (_, body) = send(&app, "POST", "/break/start", None).await;
    assert_eq!(body["session"]["remaining_seconds"], 600);
}

#[tokio::test(start_paused = true)]
async fn put_settings_with_restart_starts_work() {
    let app = test_app(TimerSettings::default());
    let (status, body) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({
            "workDurationMinutes": 30,
            "breakDurationMinutes": 5,
            "startAtLogin": false,
            "restart": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["phase"], "working");
    assert_eq!(body["session"]["remaining_seconds"], 1800);
}

#[tokio::test(start_paused = true)]
async fn put_settings_rejects_zero_duration() {
    let app = test_app(TimerSettings::default());
    let (status, _) = send(
        &app,
        "PUT",
        "/settings",
        Some(json!({
            "workDurationMinutes": 0,
            "breakDurationMinutes": 5,
            "startAtLogin": false
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!app.store.path().exists());
}

/// Split one server-sent event frame into its event name and JSON data
fn parse_event(frame: &str) -> Option<(String, Value)> {
    let mut name = None;
    let mut data = None;
    for line in frame.lines() {
        if let Some(value) = line.strip_prefix("event:") {
            name = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("data:") {
            data = serde_json::from_str(value.trim()).ok();
        }
    }
    Some((name?, data?))
}

#[tokio::test(start_paused = true)]
async fn events_stream_state_change_then_ticks() {
    let app = test_app(TimerSettings::new(1, 1, false));
    let request = Request::builder().uri("/events").body(Body::empty()).unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");
    let mut body = response.into_body().into_data_stream();

    send(&app, "POST", "/work/start", None).await;

    let mut buffer = String::new();
    let mut events = Vec::new();
    while events.len() < 3 {
        let chunk = body.next().await.unwrap().unwrap();
        buffer.push_str(std::str::from_utf8(&chunk).unwrap());
        while let Some(end) = buffer.find("\n\n") {
            let frame: String = buffer.drain(..end + 2).collect();
            // keep-alive comments carry no event line
            if let Some(event) = parse_event(&frame) {
                events.push(event);
            }
        }
    }

    assert_eq!(events[0].0, "state_changed");
    assert_eq!(events[0].1["phase"], "working");
    assert_eq!(events[0].1["remaining_seconds"], 60);
    assert_eq!(events[1].0, "tick");
    assert_eq!(events[1].1["remaining_seconds"], 59);
    assert_eq!(events[2].0, "tick");
    assert_eq!(events[2].1["remaining_seconds"], 58);
}

#[tokio::test(start_paused = true)]
async fn break_prompt_follows_break_phase() {
    let app = test_app(TimerSettings::default());
    let (_, body) = send(&app, "POST", "/work/start", None).await;
    assert_eq!(body["session"]["break_prompt"], false);
    assert_eq!(body["session"]["postpone_options"], json!([]));

    let (_, body) = send(&app, "POST", "/break/start", None).await;
    assert_eq!(body["session"]["actions"], json!(["pause", "stop"]));
    assert_eq!(body["session"]["break_prompt"], true);
    assert_eq!(body["session"]["postpone_options"], json!([5, 10]));

    let (_, body) = send(&app, "POST", "/pause", None).await;
    assert_eq!(body["session"]["break_prompt"], true);
    assert_eq!(body["session"]["postpone_options"], json!([]));

    let (_, body) = send(&app, "POST", "/stop", None).await;
    assert_eq!(body["session"]["break_prompt"], false);
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let app = test_app(TimerSettings::default());
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

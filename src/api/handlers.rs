//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::{stream, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{
    error::SettingsError,
    scheduler::SessionCommand,
    state::AppState,
};
use super::responses::{
    ApiResponse, HealthResponse, PostponeRequest, SettingsRequest, SettingsResponse, StatusResponse,
};

/// Run a command against the session worker and wrap the result
async fn run_command(
    state: &AppState,
    command: SessionCommand,
    message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.execute(command).await {
        Ok(session) => {
            info!(command = command.name(), phase = %session.phase, "Command handled");
            Ok(Json(ApiResponse::new(message, session)))
        }
        Err(e) => {
            error!("Failed to run {}: {}", command.name(), e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /work/start - Start a full work phase
pub async fn start_work_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::StartWork, "Work timer started").await
}

/// Handle POST /break/start - Start a break right away
pub async fn start_break_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::StartBreak, "Break started").await
}

/// Handle POST /pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::Pause, "Pause requested").await
}

/// Handle POST /resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::Resume, "Resume requested").await
}

/// Handle POST /stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::Stop, "Timer stopped").await
}

/// Handle POST /break/postpone - End the break and work for the given minutes
pub async fn postpone_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PostponeRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    if request.minutes == 0 {
        warn!("Rejecting postpone of 0 minutes");
        return Err(StatusCode::BAD_REQUEST);
    }
    let message = format!("Break postponed by {} minutes", request.minutes);
    run_command(
        &state,
        SessionCommand::Postpone {
            minutes: request.minutes,
        },
        &message,
    )
    .await
}

/// Handle POST /break/skip - End the break and start a full work phase
pub async fn skip_break_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    run_command(&state, SessionCommand::SkipBreak, "Break skip requested").await
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session: state.session.state().into(),
        settings: state.settings(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        settings: state.settings(),
        session: state.session.state().into(),
    })
}

/// Handle PUT /settings - Save settings; they apply from the next phase on
/// unless `restart` asks for a fresh work phase now
pub async fn put_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>, StatusCode> {
    let settings = request.settings;
    let mut session = match state.apply_settings(settings).await {
        Ok(session) => session,
        Err(SettingsError::Invalid(reason)) => {
            warn!("Rejected settings: {}", reason);
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        Err(e) => {
            error!("Failed to save settings: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if request.restart {
        session = match state.execute(SessionCommand::StartWork).await {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to restart work after settings change: {}", e);
                return Err(StatusCode::SERVICE_UNAVAILABLE);
            }
        };
    }

    Ok(Json(SettingsResponse {
        settings,
        session: session.into(),
    }))
}

/// Handle GET /events - Stream scheduler notifications as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.session.subscribe();

    let events = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    let event = Event::default()
                        .event(notification.event_name())
                        .json_data(notification)
                        .unwrap_or_else(|e| {
                            warn!("Failed to encode notification: {}", e);
                            Event::default().event(notification.event_name())
                        });
                    return Some((Ok::<_, Infallible>(event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event stream subscriber lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

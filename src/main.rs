//! BreakTime - work/break interval timer
//!
//! This is the main entry point for the breaktime server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use breaktime::{
    api::create_router,
    config::Config,
    scheduler::SessionCommand,
    services::{sync_login_item, LoggingRegistrar, SettingsStore},
    state::AppState,
    tasks::{notification_log_task, SessionHandle},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("breaktime={},tower_http=info", config.log_level()))
        .init();

    info!("Starting breaktime server v{}", env!("CARGO_PKG_VERSION"));

    let store = config.settings_store()?;
    let settings = store.load();
    info!(
        "Configuration: host={}, port={}, work={}min, break={}min, settings={}",
        config.host,
        config.port,
        settings.work_minutes,
        settings.break_minutes,
        store.path().display()
    );

    let registrar = Arc::new(LoggingRegistrar::new());
    sync_login_item(registrar.as_ref(), settings.start_at_login);

    // Session worker owns the timer; everything else talks to it by handle
    let session = SessionHandle::spawn(settings);
    tokio::spawn(notification_log_task(session.subscribe()));

    if config.start {
        session.execute(SessionCommand::StartWork).await?;
    }

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        session,
        Arc::new(store),
        registrar,
        settings,
    ));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /work/start      - Start a work phase");
    info!("  POST /break/start     - Start a break");
    info!("  POST /break/postpone  - End the break, work N more minutes");
    info!("  POST /break/skip      - End the break, start full work phase");
    info!("  POST /pause /resume /stop");
    info!("  GET  /settings, PUT /settings");
    info!("  GET  /status          - Current phase and countdown");
    info!("  GET  /events          - Notification stream (SSE)");
    info!("  GET  /health          - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

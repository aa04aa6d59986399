//! Session worker task
//!
//! A single task owns the orchestrator and its one-second clock. Commands
//! arrive over a channel, so commands and ticks never interleave.

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::{
    error::SessionError,
    scheduler::{BreakScheduler, IntervalClock, Notification, SessionCommand, SessionOrchestrator},
    state::{SchedulerState, TimerSettings},
};

const COMMAND_QUEUE: usize = 64;

/// Messages accepted by the session worker
#[derive(Debug)]
enum SessionMessage {
    Execute {
        command: SessionCommand,
        reply: oneshot::Sender<SchedulerState>,
    },
}

/// Cloneable handle for sending commands to the session worker
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMessage>,
    notify_tx: broadcast::Sender<Notification>,
    state_rx: watch::Receiver<SchedulerState>,
}

impl SessionHandle {
    /// Spawn the worker on the current tokio runtime
    pub fn spawn(settings: TimerSettings) -> Self {
        let scheduler = BreakScheduler::new(settings, IntervalClock::new());
        let notify_tx = scheduler.notifier();
        let orchestrator = SessionOrchestrator::new(scheduler);

        let (tx, rx) = mpsc::channel(COMMAND_QUEUE);
        let (state_tx, state_rx) = watch::channel(orchestrator.state());

        tokio::spawn(session_runner_task(orchestrator, rx, state_tx));

        Self {
            tx,
            notify_tx,
            state_rx,
        }
    }

    /// Run a command and return the resulting state
    pub async fn execute(&self, command: SessionCommand) -> Result<SchedulerState, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionMessage::Execute {
                command,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    /// Latest published state, without a round trip to the worker
    pub fn state(&self) -> SchedulerState {
        *self.state_rx.borrow()
    }

    /// Receiver that changes every time the worker publishes a state
    pub fn watch(&self) -> watch::Receiver<SchedulerState> {
        self.state_rx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }
}

/// Worker loop serializing commands and clock ticks
async fn session_runner_task(
    mut orchestrator: SessionOrchestrator<IntervalClock>,
    mut rx: mpsc::Receiver<SessionMessage>,
    state_tx: watch::Sender<SchedulerState>,
) {
    info!("Starting session worker");

    loop {
        tokio::select! {
            message = rx.recv() => {
                match message {
                    Some(SessionMessage::Execute { command, reply }) => {
                        let state = orchestrator.execute(command);
                        state_tx.send_replace(state);
                        if reply.send(state).is_err() {
                            debug!(command = command.name(), "Caller dropped before reply");
                        }
                    }
                    None => break,
                }
            }

            _ = orchestrator.scheduler_mut().clock_mut().tick() => {
                orchestrator.tick();
                state_tx.send_replace(orchestrator.state());
            }
        }
    }

    if orchestrator.scheduler().is_armed() {
        warn!("Session worker exiting with a running countdown");
    }
    info!("Session worker stopped");
}

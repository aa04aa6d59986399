//! Session orchestration on top of the break scheduler
//!
//! Subscribes to the scheduler's notifications and decides what follows a
//! completed phase: work is followed by a break, a break by work. Also
//! translates user intents (postpone, skip) into scheduler commands.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use super::{BreakScheduler, Clock, Notification, TickOutcome};
use crate::state::{Phase, SchedulerState, TimerSettings};

/// Commands accepted from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    StartWork,
    StartBreak,
    Pause,
    Resume,
    Stop,
    Postpone { minutes: u32 },
    SkipBreak,
    UpdateSettings { settings: TimerSettings },
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::StartWork => "start_work",
            SessionCommand::StartBreak => "start_break",
            SessionCommand::Pause => "pause",
            SessionCommand::Resume => "resume",
            SessionCommand::Stop => "stop",
            SessionCommand::Postpone { .. } => "postpone",
            SessionCommand::SkipBreak => "skip_break",
            SessionCommand::UpdateSettings { .. } => "update_settings",
        }
    }
}

#[derive(Debug)]
pub struct SessionOrchestrator<C: Clock> {
    scheduler: BreakScheduler<C>,
    notifications: broadcast::Receiver<Notification>,
}

impl<C: Clock> SessionOrchestrator<C> {
    pub fn new(scheduler: BreakScheduler<C>) -> Self {
        let notifications = scheduler.subscribe();
        Self {
            scheduler,
            notifications,
        }
    }

    pub fn scheduler(&self) -> &BreakScheduler<C> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut BreakScheduler<C> {
        &mut self.scheduler
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Apply one command and any completion policy it triggers
    pub fn execute(&mut self, command: SessionCommand) -> SchedulerState {
        debug!(command = command.name(), "Executing command");
        match command {
            SessionCommand::StartWork => self.scheduler.start_work(),
            SessionCommand::StartBreak => self.scheduler.start_break(),
            SessionCommand::Pause => self.scheduler.pause(),
            SessionCommand::Resume => self.scheduler.resume(),
            SessionCommand::Stop => self.scheduler.stop(),
            SessionCommand::Postpone { minutes } => self.request_postpone(minutes),
            SessionCommand::SkipBreak => self.request_skip_break(),
            SessionCommand::UpdateSettings { settings } => self.update_settings(settings),
        }
        self.dispatch();
        self.scheduler.state()
    }

    /// Deliver one clock tick, then react to a completion if one fired
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.scheduler.tick();
        self.dispatch();
        outcome
    }

    pub fn request_postpone(&mut self, minutes: u32) {
        self.scheduler.postpone(minutes);
    }

    /// End the break immediately with a full work phase; ignored outside a break
    pub fn request_skip_break(&mut self) {
        if self.scheduler.phase() != Phase::Breaking {
            debug!(phase = %self.scheduler.phase(), "skip break ignored");
            return;
        }
        info!("Skipping break");
        self.scheduler.pause();
        self.scheduler.start_work();
    }

    pub fn update_settings(&mut self, settings: TimerSettings) {
        self.scheduler.update_settings(settings);
    }

    /// Drain pending notifications and apply the completion rules
    fn dispatch(&mut self) {
        loop {
            match self.notifications.try_recv() {
                Ok(Notification::Completed) => self.on_completed(),
                Ok(_) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Orchestrator lagged behind scheduler notifications");
                }
            }
        }
    }

    fn on_completed(&mut self) {
        match self.scheduler.phase() {
            Phase::Working => {
                info!("Work phase over, starting break");
                self.scheduler.start_break();
            }
            Phase::Breaking => {
                info!("Break over, starting work");
                self.scheduler.start_work();
            }
            phase => warn!(%phase, "Completion outside an active phase ignored"),
        }
    }
}

//! Break scheduler state machine
//!
//! Owns the phase, the remaining-seconds counter and the armed flag. Every
//! command is a total function over the current state: commands that do not
//! apply to the current phase are silently ignored.
//!
//! ```text
//! Stopped -> Working <-> Paused <-> Breaking
//!               ^            |          |
//!               +------------+----------+  (postpone / start_work)
//! ```
//!
//! The scheduler reports completion but never picks the next phase itself;
//! that policy lives in [`super::SessionOrchestrator`].

use tokio::sync::broadcast;
use tracing::{debug, info, trace, warn};

use super::{Clock, Notification, TickOutcome};
use crate::state::{Phase, SchedulerState, TimerSettings};

/// Capacity of the notification channel. One step emits at most a few
/// notifications, so this only matters for slow subscribers.
const NOTIFICATION_CAPACITY: usize = 256;

#[derive(Debug)]
pub struct BreakScheduler<C: Clock> {
    settings: TimerSettings,
    state: SchedulerState,
    armed: bool,
    clock: C,
    notify_tx: broadcast::Sender<Notification>,
}

impl<C: Clock> BreakScheduler<C> {
    pub fn new(settings: TimerSettings, clock: C) -> Self {
        let (notify_tx, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            settings,
            state: SchedulerState::new(),
            armed: false,
            clock,
            notify_tx,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Register a new notification subscriber
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notify_tx.subscribe()
    }

    /// Sender half, for handing out subscriptions after the scheduler moves
    pub fn notifier(&self) -> broadcast::Sender<Notification> {
        self.notify_tx.clone()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_work(&mut self) {
        let seconds = self.settings.work_seconds();
        self.enter(Phase::Working, seconds);
    }

    pub fn start_break(&mut self) {
        let seconds = self.settings.break_seconds();
        self.enter(Phase::Breaking, seconds);
    }

    pub fn pause(&mut self) {
        if !self.state.phase.is_active() {
            debug!(phase = %self.state.phase, "pause ignored");
            return;
        }
        self.state.last_active_phase = self.state.phase;
        self.disarm();
        self.state.phase = Phase::Paused;
        info!(remaining = self.state.remaining_seconds, "Timer paused");
        self.emit_state_changed();
    }

    pub fn resume(&mut self) {
        if self.state.phase != Phase::Paused {
            debug!(phase = %self.state.phase, "resume ignored");
            return;
        }
        self.state.phase = self.state.last_active_phase;
        self.arm();
        info!(phase = %self.state.phase, remaining = self.state.remaining_seconds, "Timer resumed");
        self.emit_state_changed();
    }

    pub fn stop(&mut self) {
        self.disarm();
        self.state.phase = Phase::Stopped;
        self.state.remaining_seconds = 0;
        info!("Timer stopped");
        self.emit_state_changed();
    }

    /// End the current break and start a fresh work phase of exactly
    /// `minutes`. Whatever was left of the break is discarded.
    pub fn postpone(&mut self, minutes: u32) {
        if self.state.phase != Phase::Breaking {
            debug!(phase = %self.state.phase, "postpone ignored");
            return;
        }
        if minutes == 0 {
            warn!("postpone ignored: minutes must be positive");
            return;
        }
        info!(minutes, "Postponing break");
        self.pause();
        self.enter(Phase::Working, u64::from(minutes) * 60);
    }

    /// Takes effect at the next phase start; the running countdown is untouched
    pub fn update_settings(&mut self, settings: TimerSettings) {
        debug!(
            work = settings.work_minutes,
            brk = settings.break_minutes,
            "Settings updated"
        );
        self.settings = settings;
    }

    /// Deliver one clock tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.armed {
            trace!("tick after disarm ignored");
            return TickOutcome::Ignored;
        }
        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            let remaining_seconds = self.state.remaining_seconds;
            self.emit(Notification::Tick { remaining_seconds });
            TickOutcome::Ticked { remaining_seconds }
        } else {
            self.disarm();
            info!(phase = %self.state.phase, "Phase completed");
            self.emit(Notification::Completed);
            TickOutcome::Completed
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, phase: Phase, seconds: u64) {
        self.disarm();
        self.state.phase = phase;
        self.state.last_active_phase = phase;
        self.state.remaining_seconds = seconds;
        self.arm();
        info!(%phase, seconds, "Phase started");
        self.emit_state_changed();
    }

    fn arm(&mut self) {
        self.clock.arm();
        self.armed = true;
    }

    fn disarm(&mut self) {
        if self.armed {
            self.clock.disarm();
        }
        self.armed = false;
    }

    fn emit_state_changed(&self) {
        self.emit(Notification::StateChanged {
            phase: self.state.phase,
            remaining_seconds: self.state.remaining_seconds,
        });
    }

    fn emit(&self, notification: Notification) {
        // No subscribers is a normal condition
        if self.notify_tx.send(notification).is_err() {
            trace!(?notification, "no notification subscribers");
        }
    }
}

//! Tick sources for the scheduler

use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// A periodic source the scheduler arms while a phase is counting down
pub trait Clock {
    fn arm(&mut self);
    fn disarm(&mut self);
}

/// One-second tokio interval used by the session worker
#[derive(Debug)]
pub struct IntervalClock {
    period: Duration,
    interval: Option<Interval>,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::with_period(Duration::from_secs(1))
    }

    pub fn with_period(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick; never resolves while disarmed
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for IntervalClock {
    fn arm(&mut self) {
        // First tick lands one full period after arming
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }
}

/// Clock driven by hand; ticks are delivered by calling the scheduler directly
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    armed: bool,
    arm_count: usize,
    disarm_count: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    pub fn disarm_count(&self) -> usize {
        self.disarm_count
    }
}

impl Clock for ManualClock {
    fn arm(&mut self) {
        self.armed = true;
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.armed = false;
        self.disarm_count += 1;
    }
}

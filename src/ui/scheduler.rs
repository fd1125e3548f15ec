use crate::data::FeatureFlags;
use std::time::{Duration, Instant};
use tracing::info;

pub const FAST_TICK: Duration = Duration::from_millis(50);
pub const SLOW_TICK: Duration = Duration::from_millis(200);

pub fn tick_period(flags: &FeatureFlags) -> Duration {
    if flags.show_milliseconds { FAST_TICK } else { SLOW_TICK }
}

/// A repeating timer polled from the event loop.
///
/// The first firing comes one period after `start`. Late polls fire once and
/// re-arm from the poll time instead of replaying every missed period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    pub fn start(period: Duration, now: Instant) -> Self {
        RepeatingTask {
            period,
            next_due: Some(now + period),
        }
    }

    /// Stops the task. Cancelling an idle task does nothing.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true when the task is due, and schedules the next firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// Owns the single refresh timer and its cadence.
#[derive(Debug)]
pub struct RefreshScheduler {
    tick_period: Duration,
    task: RepeatingTask,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        RefreshScheduler {
            tick_period: SLOW_TICK,
            task: RepeatingTask::default(),
        }
    }

    /// Cancels the running timer and starts one matching `flags`.
    pub fn set_cadence(&mut self, flags: &FeatureFlags, now: Instant) {
        self.task.cancel();
        self.tick_period = tick_period(flags);
        self.task = RepeatingTask::start(self.tick_period, now);
        info!(period_ms = self.tick_period.as_millis() as u64, "refresh cadence set");
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        self.task.poll(now)
    }

    /// How long the event loop may block before the next tick.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.task.time_until_next(now).unwrap_or(self.tick_period)
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn is_running(&self) -> bool {
        self.task.is_running()
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

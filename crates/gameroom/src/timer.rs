use rvb_core::DECISION_TIMEOUT;
use rvb_core::Position;
use std::time::Duration;
use tokio::time::Instant;

/// Configuration for the per-turn decision clock.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    pub decision: Duration,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            decision: Duration::from_secs(DECISION_TIMEOUT),
        }
    }
}

/// The armed deadline for the acting seat.
///
/// `at` drives the actor's sleep; `epoch_ms` is the wall-clock absolute
/// deadline that goes into events and snapshots. Reconnecting never moves
/// it: the deadline belongs to the turn assignment, not the connection.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    pub seat: Position,
    pub at: Instant,
    pub epoch_ms: u64,
}

/// Deadline tracking for player decisions.
///
/// Arming is per turn assignment; any accepted action, phase change, or
/// hand completion clears it. Clearing an unarmed timer is a no-op.
#[derive(Debug)]
pub struct Timer {
    config: TimerConfig,
    deadline: Option<Deadline>,
}

impl Timer {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }
    pub fn with_defaults() -> Self {
        Self::new(TimerConfig::default())
    }
    /// Arms the clock for a seat, returning the absolute deadline in epoch
    /// milliseconds for event payloads.
    pub fn arm(&mut self, seat: Position, now_ms: u64) -> u64 {
        let epoch_ms = now_ms + self.config.decision.as_millis() as u64;
        self.deadline = Some(Deadline {
            seat,
            at: Instant::now() + self.config.decision,
            epoch_ms,
        });
        epoch_ms
    }
    /// Re-arms a restored deadline without extending it.
    pub fn resume(&mut self, seat: Position, epoch_ms: u64, now_ms: u64) {
        let remaining = Duration::from_millis(epoch_ms.saturating_sub(now_ms));
        self.deadline = Some(Deadline {
            seat,
            at: Instant::now() + remaining,
            epoch_ms,
        });
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn deadline(&self) -> Option<Deadline> {
        self.deadline
    }
    pub fn expired(&self) -> bool {
        self.deadline
            .map(|d| Instant::now() >= d.at)
            .unwrap_or(false)
    }
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.at.saturating_duration_since(Instant::now()))
    }
    pub fn decision_timeout(&self) -> Duration {
        self.config.decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TimerConfig::default();
        assert_eq!(config.decision, Duration::from_secs(DECISION_TIMEOUT));
    }

    #[test]
    fn timer_starts_cleared() {
        let timer = Timer::with_defaults();
        assert!(timer.deadline().is_none());
        assert!(!timer.expired());
    }

    #[test]
    fn timer_arms_and_clears() {
        let mut timer = Timer::with_defaults();
        let deadline = timer.arm(3, 1_000);
        assert_eq!(deadline, 1_000 + DECISION_TIMEOUT * 1_000);
        assert_eq!(timer.deadline().map(|d| d.seat), Some(3));
        assert!(!timer.expired());
        timer.clear();
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn resume_does_not_extend() {
        let mut timer = Timer::with_defaults();
        timer.resume(1, 5_000, 4_000);
        assert!(timer.remaining().unwrap() <= Duration::from_millis(1_000));
        // a deadline already in the past expires immediately
        timer.resume(1, 5_000, 9_000);
        assert!(timer.expired());
    }
}

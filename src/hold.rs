use std::time::{Duration, Instant};

use crate::types::Letter;

pub const DEFAULT_DWELL: Duration = Duration::from_millis(1_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HoldState {
    Idle,
    Holding { candidate: Letter, since: Instant },
}

/// Debounces per-tick candidates for one hand.
///
/// A candidate is reported once it has been seen on every tick for at least
/// the dwell time, and keeps being reported for as long as it persists. Any
/// change, including a tick with no candidate, restarts the timer.
#[derive(Clone, Debug)]
pub struct HoldFilter {
    dwell: Duration,
    state: HoldState,
}

impl HoldFilter {
    pub fn new(dwell: Duration) -> Self {
        Self {
            dwell,
            state: HoldState::Idle,
        }
    }

    pub fn dwell(&self) -> Duration {
        self.dwell
    }

    pub fn update(&mut self, candidate: Option<Letter>, now: Instant) -> Option<Letter> {
        match (self.state, candidate) {
            (HoldState::Idle, None) => None,
            (HoldState::Holding { candidate: prev, since }, Some(c)) if c == prev => {
                if now.saturating_duration_since(since) >= self.dwell {
                    Some(prev)
                } else {
                    None
                }
            }
            (_, None) => {
                self.state = HoldState::Idle;
                None
            }
            (_, Some(c)) => {
                self.state = HoldState::Holding {
                    candidate: c,
                    since: now,
                };
                None
            }
        }
    }

    /// Candidate currently being held, confirmed or not.
    pub fn candidate(&self) -> Option<Letter> {
        match self.state {
            HoldState::Idle => None,
            HoldState::Holding { candidate, .. } => Some(candidate),
        }
    }

    pub fn held_for(&self, now: Instant) -> Duration {
        match self.state {
            HoldState::Idle => Duration::ZERO,
            HoldState::Holding { since, .. } => now.saturating_duration_since(since),
        }
    }

    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
    }
}

impl Default for HoldFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL)
    }
}

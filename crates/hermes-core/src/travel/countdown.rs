//! Travel countdown timer.
//!
//! Re-derives time-to-arrival from the session's fixed ETA once per
//! second and signals completion exactly once. The countdown never
//! accumulates elapsed time; a late or bursty caller gets the same
//! answer as a punctual one because every evaluation goes back to
//! `eta - now`.

use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use hermes_logic::constants::COUNTDOWN_INTERVAL_MS;

use super::session::TravelSession;

/// What a call to [`TravelCountdown::tick`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// No session armed.
    Idle,
    /// Counting, with whole seconds left for display.
    Running { remaining_secs: i64 },
    /// The ETA passed at this tick. Emitted exactly once per session;
    /// the countdown is already disarmed when the caller sees this.
    Completed,
}

/// Polls a travel session's ETA at a 1 Hz cadence.
pub struct TravelCountdown {
    session: Option<Rc<TravelSession>>,
    next_tick_at: DateTime<Utc>,
    remaining_secs: i64,
}

impl TravelCountdown {
    pub fn new() -> Self {
        Self {
            session: None,
            next_tick_at: DateTime::<Utc>::MIN_UTC,
            remaining_secs: 0,
        }
    }

    /// Arm the countdown for a session. Always starts a fresh cadence;
    /// a session stopped earlier never resumes.
    pub fn start(&mut self, session: Rc<TravelSession>, now: DateTime<Utc>) {
        self.remaining_secs = (session.remaining_ms(now) / 1_000).max(0);
        self.next_tick_at = now + TimeDelta::milliseconds(COUNTDOWN_INTERVAL_MS);
        log::debug!(
            "countdown armed for {}, {}s out",
            session.destination.name,
            self.remaining_secs
        );
        self.session = Some(session);
    }

    /// Disarm without signaling. Display stops updating immediately.
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            log::debug!("countdown stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Whole seconds left as of the last due tick, while armed.
    pub fn remaining_secs(&self) -> Option<i64> {
        self.session.as_ref().map(|_| self.remaining_secs)
    }

    /// Evaluate the countdown at `now`. Calls between due ticks return
    /// the cached reading; a due tick recomputes from the ETA and, once
    /// the ETA has passed, disarms first and then reports completion.
    pub fn tick(&mut self, now: DateTime<Utc>) -> CountdownStatus {
        let Some(session) = self.session.clone() else {
            return CountdownStatus::Idle;
        };

        if now < self.next_tick_at {
            return CountdownStatus::Running { remaining_secs: self.remaining_secs };
        }

        // A stalled caller gets one catch-up tick, not a burst.
        while self.next_tick_at <= now {
            self.next_tick_at += TimeDelta::milliseconds(COUNTDOWN_INTERVAL_MS);
        }

        let remaining_ms = session.remaining_ms(now);
        if remaining_ms <= 0 {
            self.session = None;
            self.remaining_secs = 0;
            log::info!("countdown complete for {}", session.destination.name);
            return CountdownStatus::Completed;
        }

        self.remaining_secs = remaining_ms / 1_000;
        CountdownStatus::Running { remaining_secs: self.remaining_secs }
    }
}

impl Default for TravelCountdown {
    fn default() -> Self {
        Self::new()
    }
}

//! The travel session record.

use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};

use hermes_logic::coords::MapCoordinate;

use crate::state::PlaceRef;

/// One trip, fixed at departure: where it started, where it ends, and
/// when. The engine shares a single record between the countdown and the
/// scene via [`Rc`] so both consumers read the same timestamps without
/// either owning a mutable copy. Sessions are ephemeral and never
/// persisted; a loaded save rebuilds one from the ship's destination.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelSession {
    pub origin: MapCoordinate,
    pub destination: PlaceRef,
    pub duration_ms: i64,
    pub departed_at: DateTime<Utc>,
    pub eta: DateTime<Utc>,
}

impl TravelSession {
    pub fn new(
        origin: MapCoordinate,
        destination: PlaceRef,
        duration_ms: i64,
        departed_at: DateTime<Utc>,
    ) -> Rc<Self> {
        Rc::new(Self {
            origin,
            destination,
            duration_ms,
            departed_at,
            eta: departed_at + TimeDelta::milliseconds(duration_ms),
        })
    }

    /// Milliseconds into the trip at `now`. Negative before departure.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.departed_at).num_milliseconds()
    }

    /// Milliseconds until arrival at `now`. Negative once overdue.
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.eta - now).num_milliseconds()
    }
}

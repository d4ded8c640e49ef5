//! Ship state: where the ship is, where it is headed, what it carries.
//!
//! Invariant: `destination` is `Some` exactly while `is_traveling` is
//! true. Reducer intents mutate the two fields separately, in the fixed
//! orders the engine dispatches them in, so the invariant binds at
//! operation boundaries rather than between individual intents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hermes_logic::cargo;
use hermes_logic::coords::MapCoordinate;
use hermes_logic::items::{self, TradeItem};

/// A named point on the map: a planet's name plus its coordinate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceRef {
    pub name: String,
    pub coord: MapCoordinate,
}

impl PlaceRef {
    pub fn new(name: impl Into<String>, coord: MapCoordinate) -> Self {
        Self { name: name.into(), coord }
    }
}

/// Where the ship is headed and when it gets there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub place: PlaceRef,
    pub eta: DateTime<Utc>,
}

impl Destination {
    pub fn new(place: PlaceRef, eta: DateTime<Utc>) -> Self {
        Self { place, eta }
    }
}

/// Fixed-capacity cargo hold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CargoHold {
    pub capacity: u32,
    pub items: Vec<TradeItem>,
}

impl CargoHold {
    pub fn new(capacity: u32) -> Self {
        Self { capacity, items: Vec::new() }
    }

    pub fn used_volume(&self) -> u32 {
        cargo::used_volume(&self.items)
    }

    pub fn remaining_volume(&self) -> u32 {
        cargo::remaining_volume(self.capacity, &self.items)
    }

    /// Merge a line in; same-id units join the existing line.
    pub fn store(&mut self, line: TradeItem) {
        items::merge_line(&mut self.items, line);
    }

    /// Remove up to `quantity` units of a line. Returns false if the id
    /// is not aboard.
    pub fn remove(&mut self, id: u32, quantity: u32) -> bool {
        items::remove_units(&mut self.items, id, quantity)
    }

    pub fn line(&self, id: u32) -> Option<&TradeItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// The ship itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShipState {
    pub location: PlaceRef,
    pub destination: Option<Destination>,
    pub is_traveling: bool,
    pub cargo: CargoHold,
}

impl ShipState {
    /// A docked ship at `location` with an empty hold.
    pub fn docked_at(location: PlaceRef, hold_capacity: u32) -> Self {
        Self {
            location,
            destination: None,
            is_traveling: false,
            cargo: CargoHold::new(hold_capacity),
        }
    }

    /// The travel invariant: a destination exists exactly while
    /// traveling. Checked by tests at operation boundaries.
    pub fn travel_state_consistent(&self) -> bool {
        self.is_traveling == self.destination.is_some()
    }
}

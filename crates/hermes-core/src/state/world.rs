//! World state: planets, their market stock, and open contracts.

use serde::{Deserialize, Serialize};

use hermes_logic::coords::MapCoordinate;
use hermes_logic::items::{self, TradeItem};

/// A planet on the travel map. Identity and position are fixed at
/// generation; the market stock turns over with each restock cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Planet {
    pub id: u32,
    pub name: String,
    pub coord: MapCoordinate,
    pub is_home: bool,
    /// Items currently offered for pickup here.
    pub items: Vec<TradeItem>,
}

impl Planet {
    pub fn new(id: u32, name: impl Into<String>, coord: MapCoordinate) -> Self {
        Self {
            id,
            name: name.into(),
            coord,
            is_home: false,
            items: Vec::new(),
        }
    }

    pub fn with_home(mut self, is_home: bool) -> Self {
        self.is_home = is_home;
        self
    }

    pub fn with_items(mut self, items: Vec<TradeItem>) -> Self {
        self.items = items;
        self
    }
}

/// A delivery agreement: move `quantity` of an item kind from `origin`
/// to `destination` for `payout` credits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    pub id: u32,
    pub item_name: String,
    pub quantity: u32,
    pub payout: u64,
    pub origin: String,
    pub destination: String,
}

/// One planet's replacement market stock, used by the restock intent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanetStock {
    pub planet: String,
    pub items: Vec<TradeItem>,
}

/// Everything outside the ship: the map and the market cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldState {
    pub planets: Vec<Planet>,
    pub contracts: Vec<Contract>,
    /// True while a restock countdown is armed.
    pub is_timer_running: bool,
}

impl WorldState {
    pub fn new(planets: Vec<Planet>, contracts: Vec<Contract>) -> Self {
        Self {
            planets,
            contracts,
            is_timer_running: false,
        }
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|planet| planet.name == name)
    }

    pub(crate) fn planet_mut(&mut self, name: &str) -> Option<&mut Planet> {
        self.planets.iter_mut().find(|planet| planet.name == name)
    }

    pub fn home_planet(&self) -> Option<&Planet> {
        self.planets.iter().find(|planet| planet.is_home)
    }

    /// Merge a line into a planet's stock. Ignored for unknown planets.
    pub(crate) fn add_item(&mut self, planet: &str, line: TradeItem) {
        if let Some(planet) = self.planet_mut(planet) {
            items::merge_line(&mut planet.items, line);
        }
    }

    /// Remove units of a line from a planet's stock.
    pub(crate) fn remove_item(&mut self, planet: &str, id: u32, quantity: u32) {
        if let Some(planet) = self.planet_mut(planet) {
            items::remove_units(&mut planet.items, id, quantity);
        }
    }
}

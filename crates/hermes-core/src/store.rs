//! Application state store.
//!
//! One immutable [`GameState`] snapshot is the single source of truth.
//! Components never hold private mutable copies; they read the current
//! snapshot and describe changes as [`Intent`] values. [`reduce`] is a
//! pure function from (snapshot, intent) to the next snapshot, and
//! [`Store`] applies it, bumps a version counter, and notifies
//! subscribers synchronously.

use serde::{Deserialize, Serialize};

use hermes_logic::items::TradeItem;

use crate::state::{
    Contract, Destination, PlaceRef, Planet, PlanetStock, PlayerState, ShipState, WorldState,
};

/// Complete game state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub world: WorldState,
    pub ship: ShipState,
    pub player: PlayerState,
}

impl GameState {
    pub fn new(world: WorldState, ship: ShipState, player: PlayerState) -> Self {
        Self { world, ship, player }
    }

    /// Highest item line id present anywhere, for resuming id allocation
    /// after a load.
    pub fn max_item_id(&self) -> u32 {
        let stocked = self
            .world
            .planets
            .iter()
            .flat_map(|planet| planet.items.iter());
        stocked
            .chain(self.ship.cargo.items.iter())
            .map(|item| item.id)
            .max()
            .unwrap_or(0)
    }
}

/// A single state mutation. Every change to [`GameState`] flows through
/// exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetPlanets(Vec<Planet>),
    SetContracts(Vec<Contract>),
    AddContract(Contract),
    SetTimerRunning(bool),
    /// Empty every planet's market stock.
    ClearPlanetItems,
    /// Replace listed planets' market stock wholesale.
    StockPlanetItems(Vec<PlanetStock>),
    AddWorldItem { planet: String, item: TradeItem },
    RemoveWorldItem { planet: String, item_id: u32, quantity: u32 },
    SetShipLocation(PlaceRef),
    SetDestination(Option<Destination>),
    SetShipTraveling(bool),
    StoreCargoItem(TradeItem),
    RemoveCargoItem { item_id: u32, quantity: u32 },
    AddCash(u64),
}

impl Intent {
    /// Variant name, for log lines that should not drag payloads along.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::SetPlanets(_) => "SetPlanets",
            Intent::SetContracts(_) => "SetContracts",
            Intent::AddContract(_) => "AddContract",
            Intent::SetTimerRunning(_) => "SetTimerRunning",
            Intent::ClearPlanetItems => "ClearPlanetItems",
            Intent::StockPlanetItems(_) => "StockPlanetItems",
            Intent::AddWorldItem { .. } => "AddWorldItem",
            Intent::RemoveWorldItem { .. } => "RemoveWorldItem",
            Intent::SetShipLocation(_) => "SetShipLocation",
            Intent::SetDestination(_) => "SetDestination",
            Intent::SetShipTraveling(_) => "SetShipTraveling",
            Intent::StoreCargoItem(_) => "StoreCargoItem",
            Intent::RemoveCargoItem { .. } => "RemoveCargoItem",
            Intent::AddCash(_) => "AddCash",
        }
    }
}

/// Pure state transition: the previous snapshot is untouched and the
/// next one is returned.
pub fn reduce(state: &GameState, intent: &Intent) -> GameState {
    let mut next = state.clone();
    match intent {
        Intent::SetPlanets(planets) => next.world.planets = planets.clone(),
        Intent::SetContracts(contracts) => next.world.contracts = contracts.clone(),
        Intent::AddContract(contract) => next.world.contracts.push(contract.clone()),
        Intent::SetTimerRunning(running) => next.world.is_timer_running = *running,
        Intent::ClearPlanetItems => {
            for planet in &mut next.world.planets {
                planet.items.clear();
            }
        }
        Intent::StockPlanetItems(stocks) => {
            for stock in stocks {
                if let Some(planet) = next.world.planet_mut(&stock.planet) {
                    planet.items = stock.items.clone();
                }
            }
        }
        Intent::AddWorldItem { planet, item } => next.world.add_item(planet, item.clone()),
        Intent::RemoveWorldItem { planet, item_id, quantity } => {
            next.world.remove_item(planet, *item_id, *quantity)
        }
        Intent::SetShipLocation(place) => next.ship.location = place.clone(),
        Intent::SetDestination(destination) => next.ship.destination = destination.clone(),
        Intent::SetShipTraveling(traveling) => next.ship.is_traveling = *traveling,
        Intent::StoreCargoItem(item) => next.ship.cargo.store(item.clone()),
        Intent::RemoveCargoItem { item_id, quantity } => {
            next.ship.cargo.remove(*item_id, *quantity);
        }
        Intent::AddCash(amount) => next.player.credit(*amount),
    }
    next
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameState)>;

/// Owns the current snapshot and the subscriber list.
pub struct Store {
    state: GameState,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store {
    pub fn new(initial: GameState) -> Self {
        Self {
            state: initial,
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current snapshot. Callers clone what they need to keep.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Monotonic count of applied intents.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register a callback invoked after every applied intent.
    pub fn subscribe(&mut self, callback: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Apply an intent and notify subscribers with the new snapshot.
    pub fn dispatch(&mut self, intent: Intent) {
        log::debug!("intent {}", intent.label());
        self.state = reduce(&self.state, &intent);
        self.version += 1;

        // Subscribers may dispatch or subscribe; swap the list out so the
        // borrow on self is released while callbacks run.
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(&self.state);
        }
        subscribers.extend(self.subscribers.drain(..));
        self.subscribers = subscribers;
    }
}

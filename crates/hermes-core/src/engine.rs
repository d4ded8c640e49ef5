//! Game engine - ties the store, travel timing, and generation together.
//!
//! The engine owns the [`Store`] and the two travel tasks (countdown and
//! scene). Drivers call [`GameEngine::tick`] with the current instant as
//! often as they like, typically once per rendered frame; the countdown
//! keeps its own 1 Hz cadence inside that.

use std::io::Write;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hermes_logic::{cargo, routes, settlement};

use crate::catalog::{load_default_catalog, CatalogEntry, CatalogError};
use crate::config::GameConfig;
use crate::generation::{generate_contracts, generate_planets, stock_planets};
use crate::persistence::{self, SaveError};
use crate::state::{Contract, Destination, PlaceRef, PlayerState, ShipState, WorldState};
use crate::store::{GameState, Intent, Store, SubscriptionId};
use crate::travel::{CountdownStatus, TravelCountdown, TravelScene, TravelSession};

/// Why a departure was refused. The caller decides what to surface;
/// selecting the current location is normally swallowed silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelError {
    /// A trip is in progress; land first.
    AlreadyTraveling,
    /// The requested destination is the current location.
    AlreadyThere,
    UnknownPlanet(String),
}

impl std::fmt::Display for TravelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelError::AlreadyTraveling => write!(f, "Ship is already traveling"),
            TravelError::AlreadyThere => write!(f, "Ship is already at that planet"),
            TravelError::UnknownPlanet(name) => write!(f, "No planet named {}", name),
        }
    }
}

impl std::error::Error for TravelError {}

/// Why a cargo transfer was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CargoError {
    /// Cargo only moves while docked.
    NotDocked,
    /// No line with that id on this side of the transfer.
    UnknownItem(u32),
    InsufficientStock { have: u32, want: u32 },
    InsufficientVolume { free: u32, need: u32 },
}

impl std::fmt::Display for CargoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CargoError::NotDocked => write!(f, "Cargo cannot move while traveling"),
            CargoError::UnknownItem(id) => write!(f, "No item line with id {}", id),
            CargoError::InsufficientStock { have, want } => {
                write!(f, "Only {} units available, wanted {}", have, want)
            }
            CargoError::InsufficientVolume { free, need } => {
                write!(f, "Only {} hold volume free, needed {}", free, need)
            }
        }
    }
}

impl std::error::Error for CargoError {}

/// Main simulation engine.
pub struct GameEngine {
    store: Store,
    countdown: TravelCountdown,
    scene: TravelScene,
    /// The trip in progress. Referenced, not copied, by countdown and
    /// scene; dropped at settlement.
    session: Option<Rc<TravelSession>>,
    config: GameConfig,
    catalog: Vec<CatalogEntry>,
    rng: StdRng,
    next_item_id: u32,
    next_contract_id: u32,
    restock_due: Option<DateTime<Utc>>,
}

impl GameEngine {
    /// Generate a fresh world from the config and dock the ship at the
    /// home planet.
    pub fn new(config: GameConfig, now: DateTime<Utc>) -> Result<Self, CatalogError> {
        let catalog = load_default_catalog()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut next_item_id = 1;
        let mut next_contract_id = 1;

        let planets = generate_planets(&config, &catalog, &mut rng, &mut next_item_id);
        let contracts =
            generate_contracts(&planets, &catalog, &config, &mut rng, &mut next_contract_id);

        let home = planets
            .iter()
            .find(|planet| planet.is_home)
            .expect("world generation produced no home planet");
        let home_ref = PlaceRef::new(home.name.clone(), home.coord);
        let home_coord = home.coord;

        log::info!(
            "world initialized: {} planets, {} contracts, docked at {}",
            planets.len(),
            contracts.len(),
            home_ref.name
        );

        let state = GameState::new(
            WorldState::new(planets, contracts),
            ShipState::docked_at(home_ref, config.hold_volume),
            PlayerState::new(config.starting_cash),
        );

        let mut engine = Self {
            store: Store::new(state),
            countdown: TravelCountdown::new(),
            scene: TravelScene::new(home_coord),
            session: None,
            config,
            catalog,
            rng,
            next_item_id,
            next_contract_id,
            restock_due: None,
        };
        engine.resume_travel(now);
        Ok(engine)
    }

    /// Rebuild an engine around an existing snapshot, typically one that
    /// came out of [`persistence::load_game`]. A snapshot saved
    /// mid-travel re-arms the countdown and scene for the remainder of
    /// the trip; an overdue ETA settles at the first due tick.
    pub fn from_state(
        config: GameConfig,
        state: GameState,
        now: DateTime<Utc>,
    ) -> Result<Self, CatalogError> {
        let catalog = load_default_catalog()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let next_item_id = state.max_item_id() + 1;
        let next_contract_id =
            state.world.contracts.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let ship_coord = state.ship.location.coord;

        let mut engine = Self {
            store: Store::new(state),
            countdown: TravelCountdown::new(),
            scene: TravelScene::new(ship_coord),
            session: None,
            config,
            catalog,
            rng,
            next_item_id,
            next_contract_id,
            restock_due: None,
        };
        engine.resume_travel(now);
        Ok(engine)
    }

    /// Re-arm countdown and scene from the snapshot's destination, if
    /// one is set. Sessions are not persisted, so the rebuilt trip runs
    /// from the ship's committed location to the saved ETA.
    fn resume_travel(&mut self, now: DateTime<Utc>) {
        let Some(destination) = self.store.state().ship.destination.clone() else {
            return;
        };
        let origin = self.store.state().ship.location.coord;
        let remaining_ms = (destination.eta - now).num_milliseconds().max(0);

        log::info!(
            "resuming travel to {}, {}s left",
            destination.place.name,
            remaining_ms / 1_000
        );

        let session = TravelSession::new(origin, destination.place, remaining_ms, now);
        self.countdown.start(Rc::clone(&session), now);
        self.scene.begin(Rc::clone(&session));
        self.session = Some(session);
    }

    /// Current snapshot.
    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    /// Count of applied intents, for change detection.
    pub fn state_version(&self) -> u64 {
        self.store.version()
    }

    /// Watch every applied intent's resulting snapshot.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&GameState) + 'static,
    ) -> SubscriptionId {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.store.unsubscribe(id)
    }

    /// The animated map scene.
    pub fn scene(&self) -> &TravelScene {
        &self.scene
    }

    pub fn is_traveling(&self) -> bool {
        self.store.state().ship.is_traveling
    }

    /// Whole seconds to arrival, while a trip is counting down.
    pub fn travel_remaining_secs(&self) -> Option<i64> {
        self.countdown.remaining_secs()
    }

    /// Begin travel to the named planet.
    ///
    /// Refused while already traveling and for the current location;
    /// both leave state untouched. On success the destination and ETA
    /// are committed, the countdown is armed, and the scene starts its
    /// tween.
    pub fn start_travel(
        &mut self,
        destination: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TravelError> {
        let (origin, place, duration_ms) = {
            let state = self.store.state();
            if state.ship.is_traveling {
                return Err(TravelError::AlreadyTraveling);
            }
            let planet = state
                .world
                .planet(destination)
                .ok_or_else(|| TravelError::UnknownPlanet(destination.to_string()))?;
            if planet.name == state.ship.location.name {
                return Err(TravelError::AlreadyThere);
            }

            let origin = state.ship.location.coord;
            let distance = origin.distance(&planet.coord);
            let duration_ms = routes::travel_duration_ms(&self.config.route, distance);

            log::info!(
                "departing {} for {}: {:.0} units, {}s voyage",
                state.ship.location.name,
                planet.name,
                distance,
                duration_ms / 1_000
            );

            (origin, PlaceRef::new(planet.name.clone(), planet.coord), duration_ms)
        };

        let session = TravelSession::new(origin, place.clone(), duration_ms, now);

        self.store
            .dispatch(Intent::SetDestination(Some(Destination::new(place, session.eta))));
        self.store.dispatch(Intent::SetShipTraveling(true));

        self.countdown.start(Rc::clone(&session), now);
        self.scene.begin(Rc::clone(&session));
        self.session = Some(session);
        Ok(())
    }

    /// Advance the world to `now`: poll the travel countdown (settling
    /// arrival when it completes), move the scene's frame animation, and
    /// run the market restock cycle.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if matches!(self.countdown.tick(now), CountdownStatus::Completed) {
            self.settle_arrival();
        }
        self.scene.advance(now);
        self.check_restock(now);
    }

    /// Convert the finished trip into state: sell cargo bound here,
    /// commit the location, clear the travel fields.
    fn settle_arrival(&mut self) {
        let session = self
            .session
            .take()
            .expect("travel completed with no active session");
        let arrival = session.destination.clone();

        let cargo_lines = self.store.state().ship.cargo.items.clone();
        let outcome = settlement::settle(&cargo_lines, &arrival.name);
        let sold: Vec<(u32, u32)> = cargo_lines
            .iter()
            .filter(|line| outcome.sold_ids.contains(&line.id))
            .map(|line| (line.id, line.quantity))
            .collect();

        log::info!(
            "arrived at {}: sold {} lines for {} credits",
            arrival.name,
            sold.len(),
            outcome.profit
        );

        self.store.dispatch(Intent::AddCash(outcome.profit));
        for (item_id, quantity) in sold {
            self.store.dispatch(Intent::RemoveCargoItem { item_id, quantity });
        }
        self.store.dispatch(Intent::SetShipLocation(arrival));
        self.store.dispatch(Intent::SetDestination(None));
        self.store.dispatch(Intent::SetShipTraveling(false));
    }

    /// Move units of a market line into the hold. Refused while
    /// traveling, for unknown lines, and when stock or hold volume run
    /// short; refusals change nothing.
    pub fn load_cargo(&mut self, item_id: u32, quantity: u32) -> Result<(), CargoError> {
        if quantity == 0 {
            return Ok(());
        }

        let (planet_name, line) = {
            let state = self.store.state();
            if state.ship.is_traveling {
                return Err(CargoError::NotDocked);
            }
            let stock_line = state
                .world
                .planet(&state.ship.location.name)
                .and_then(|planet| planet.items.iter().find(|line| line.id == item_id))
                .ok_or(CargoError::UnknownItem(item_id))?;
            if quantity > stock_line.quantity {
                return Err(CargoError::InsufficientStock {
                    have: stock_line.quantity,
                    want: quantity,
                });
            }
            if !cargo::fits(
                state.ship.cargo.capacity,
                &state.ship.cargo.items,
                quantity,
                stock_line.unit_volume,
            ) {
                return Err(CargoError::InsufficientVolume {
                    free: state.ship.cargo.remaining_volume(),
                    need: quantity.saturating_mul(stock_line.unit_volume),
                });
            }

            let mut line = stock_line.clone();
            line.quantity = quantity;
            (state.ship.location.name.clone(), line)
        };

        self.store
            .dispatch(Intent::RemoveWorldItem { planet: planet_name, item_id, quantity });
        self.store.dispatch(Intent::StoreCargoItem(line));
        Ok(())
    }

    /// Move units of a cargo line back onto the market here. Same
    /// refusal rules as loading, minus the volume check.
    pub fn unload_cargo(&mut self, item_id: u32, quantity: u32) -> Result<(), CargoError> {
        if quantity == 0 {
            return Ok(());
        }

        let (planet_name, line) = {
            let state = self.store.state();
            if state.ship.is_traveling {
                return Err(CargoError::NotDocked);
            }
            let cargo_line = state
                .ship
                .cargo
                .line(item_id)
                .ok_or(CargoError::UnknownItem(item_id))?;
            if quantity > cargo_line.quantity {
                return Err(CargoError::InsufficientStock {
                    have: cargo_line.quantity,
                    want: quantity,
                });
            }

            let mut line = cargo_line.clone();
            line.quantity = quantity;
            (state.ship.location.name.clone(), line)
        };

        self.store.dispatch(Intent::RemoveCargoItem { item_id, quantity });
        self.store.dispatch(Intent::AddWorldItem { planet: planet_name, item: line });
        Ok(())
    }

    /// Post a contract to the board. The engine assigns the id.
    pub fn create_contract(&mut self, mut contract: Contract) {
        contract.id = self.next_contract_id;
        self.next_contract_id += 1;
        log::debug!("contract posted: {} to {}", contract.item_name, contract.destination);
        self.store.dispatch(Intent::AddContract(contract));
    }

    /// Write the current snapshot to a writer.
    pub fn save<W: Write>(&self, writer: W, now: DateTime<Utc>) -> Result<(), SaveError> {
        persistence::save_game(writer, self.store.state(), now)
    }

    /// Arm the restock timer when idle; fire it when due. Firing clears
    /// every market, stocks fresh lines, and lowers the timer flag.
    fn check_restock(&mut self, now: DateTime<Utc>) {
        match self.restock_due {
            None => {
                self.restock_due =
                    Some(now + TimeDelta::milliseconds(self.config.restock_interval_ms));
                self.store.dispatch(Intent::SetTimerRunning(true));
                log::debug!("restock timer armed");
            }
            Some(due) if now >= due => {
                let stocks = stock_planets(
                    &self.store.state().world.planets,
                    &self.catalog,
                    &self.config,
                    &mut self.rng,
                    &mut self.next_item_id,
                );
                self.store.dispatch(Intent::ClearPlanetItems);
                self.store.dispatch(Intent::StockPlanetItems(stocks));
                self.store.dispatch(Intent::SetTimerRunning(false));
                self.restock_due = None;
                log::info!("markets restocked");
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine(now: DateTime<Utc>) -> GameEngine {
        GameEngine::new(GameConfig::default(), now).expect("engine")
    }

    fn other_planet(engine: &GameEngine) -> String {
        let here = engine.state().ship.location.name.clone();
        engine
            .state()
            .world
            .planets
            .iter()
            .find(|p| p.name != here)
            .map(|p| p.name.clone())
            .expect("world has another planet")
    }

    #[test]
    fn test_new_engine_docks_at_home() {
        let engine = test_engine(Utc::now());
        let state = engine.state();

        let home = state.world.home_planet().expect("home");
        assert_eq!(state.ship.location.name, home.name);
        assert!(!state.ship.is_traveling);
        assert!(state.ship.travel_state_consistent());
        assert_eq!(state.player.cash, GameConfig::default().starting_cash);
        assert_eq!(engine.scene().position(), home.coord);
    }

    #[test]
    fn test_start_travel_commits_destination_and_eta() {
        let now = Utc::now();
        let mut engine = test_engine(now);
        let destination = other_planet(&engine);

        let origin = engine.state().ship.location.coord;
        let target = engine.state().world.planet(&destination).expect("planet").coord;
        let expected_ms =
            routes::travel_duration_ms(&GameConfig::default().route, origin.distance(&target));

        engine.start_travel(&destination, now).expect("departure");

        let ship = &engine.state().ship;
        assert!(ship.is_traveling);
        assert!(ship.travel_state_consistent());
        let dest = ship.destination.as_ref().expect("destination");
        assert_eq!(dest.place.name, destination);
        assert_eq!(dest.eta, now + TimeDelta::milliseconds(expected_ms));
        assert_eq!(engine.travel_remaining_secs(), Some(expected_ms / 1_000));
    }

    #[test]
    fn test_travel_to_current_location_changes_nothing() {
        let now = Utc::now();
        let mut engine = test_engine(now);
        let here = engine.state().ship.location.name.clone();
        let before = engine.state().clone();
        let version = engine.state_version();

        assert_eq!(engine.start_travel(&here, now), Err(TravelError::AlreadyThere));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.state_version(), version);
        assert!(!engine.is_traveling());
    }

    #[test]
    fn test_second_departure_rejected() {
        let now = Utc::now();
        let mut engine = test_engine(now);
        let destination = other_planet(&engine);

        engine.start_travel(&destination, now).expect("departure");
        let before = engine.state().clone();

        let again = engine.start_travel(&destination, now + TimeDelta::seconds(1));
        assert_eq!(again, Err(TravelError::AlreadyTraveling));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_unknown_planet_rejected() {
        let now = Utc::now();
        let mut engine = test_engine(now);

        let result = engine.start_travel("Atlantis", now);
        assert_eq!(result, Err(TravelError::UnknownPlanet("Atlantis".into())));
        assert!(!engine.is_traveling());
    }

    #[test]
    fn test_load_cargo_moves_units_without_duplication() {
        let mut engine = test_engine(Utc::now());
        let here = engine.state().ship.location.name.clone();
        let line = engine.state().world.planet(&here).expect("here").items[0].clone();

        engine.load_cargo(line.id, 1).expect("load");

        let state = engine.state();
        let stock_left = state
            .world
            .planet(&here)
            .and_then(|p| p.items.iter().find(|i| i.id == line.id))
            .map(|i| i.quantity)
            .unwrap_or(0);
        let aboard = state.ship.cargo.line(line.id).map(|i| i.quantity).unwrap_or(0);

        assert_eq!(aboard, 1);
        assert_eq!(stock_left, line.quantity - 1);
    }

    #[test]
    fn test_load_cargo_refused_without_volume() {
        let now = Utc::now();
        let config = GameConfig { hold_volume: 0, ..GameConfig::default() };
        let mut engine = GameEngine::new(config, now).expect("engine");
        let here = engine.state().ship.location.name.clone();
        let line = engine.state().world.planet(&here).expect("here").items[0].clone();
        let before = engine.state().clone();

        let result = engine.load_cargo(line.id, 1);
        assert!(matches!(result, Err(CargoError::InsufficientVolume { .. })));
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_load_cargo_refused_beyond_stock() {
        let mut engine = test_engine(Utc::now());
        let here = engine.state().ship.location.name.clone();
        let line = engine.state().world.planet(&here).expect("here").items[0].clone();

        let result = engine.load_cargo(line.id, line.quantity + 1);
        assert!(matches!(result, Err(CargoError::InsufficientStock { .. })));
    }

    #[test]
    fn test_cargo_locked_while_traveling() {
        let now = Utc::now();
        let mut engine = test_engine(now);
        let here = engine.state().ship.location.name.clone();
        let line = engine.state().world.planet(&here).expect("here").items[0].clone();
        engine.load_cargo(line.id, 1).expect("load");

        let destination = other_planet(&engine);
        engine.start_travel(&destination, now).expect("departure");

        assert_eq!(engine.load_cargo(line.id, 1), Err(CargoError::NotDocked));
        assert_eq!(engine.unload_cargo(line.id, 1), Err(CargoError::NotDocked));
    }

    #[test]
    fn test_unload_returns_units_to_market() {
        let mut engine = test_engine(Utc::now());
        let here = engine.state().ship.location.name.clone();
        let line = engine.state().world.planet(&here).expect("here").items[0].clone();

        engine.load_cargo(line.id, line.quantity).expect("load");
        engine.unload_cargo(line.id, line.quantity).expect("unload");

        let state = engine.state();
        let stock = state
            .world
            .planet(&here)
            .and_then(|p| p.items.iter().find(|i| i.id == line.id))
            .map(|i| i.quantity);
        assert_eq!(stock, Some(line.quantity));
        assert!(state.ship.cargo.line(line.id).is_none());
        assert_eq!(state.ship.cargo.used_volume(), 0);
    }

    #[test]
    fn test_restock_cycle_flips_timer_and_replaces_stock() {
        let now = Utc::now();
        let mut engine = test_engine(now);

        engine.tick(now);
        assert!(engine.state().world.is_timer_running);
        let old_max_id = engine.state().max_item_id();

        let later = now + TimeDelta::milliseconds(GameConfig::default().restock_interval_ms);
        engine.tick(later);

        let state = engine.state();
        assert!(!state.world.is_timer_running);
        let new_min_id = state
            .world
            .planets
            .iter()
            .flat_map(|p| p.items.iter().map(|i| i.id))
            .min()
            .expect("restocked items");
        assert!(new_min_id > old_max_id, "restock must mint fresh lines");
    }

    #[test]
    fn test_create_contract_assigns_sequential_ids() {
        let mut engine = test_engine(Utc::now());
        let existing = engine.state().world.contracts.len();

        let contract = Contract {
            id: 0,
            item_name: "Spice Extract".into(),
            quantity: 2,
            payout: 120,
            origin: "Meridian".into(),
            destination: other_planet(&engine),
        };
        engine.create_contract(contract.clone());
        engine.create_contract(contract);

        let contracts = &engine.state().world.contracts;
        assert_eq!(contracts.len(), existing + 2);
        let first = contracts[existing].id;
        assert_eq!(contracts[existing + 1].id, first + 1);
        assert!(first > 0);
    }

    #[test]
    fn test_zero_quantity_transfers_are_no_ops() {
        let mut engine = test_engine(Utc::now());
        let before = engine.state().clone();

        engine.load_cargo(9999, 0).expect("no-op");
        engine.unload_cargo(9999, 0).expect("no-op");
        assert_eq!(engine.state(), &before);
    }
}

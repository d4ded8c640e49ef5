//! Hermes Headless Simulation Harness
//!
//! Validates travel timing, settlement, and world generation without a
//! UI. Runs entirely in-process on a manual clock — no rendering, no
//! real time, no networking.
//!
//! Usage:
//!   cargo run -p hermes-simtest
//!   cargo run -p hermes-simtest -- --verbose

use chrono::{TimeDelta, Utc};

use hermes_core::clock::{Clock, ManualClock};
use hermes_core::config::GameConfig;
use hermes_core::engine::{CargoError, GameEngine, TravelError};
use hermes_core::persistence;
use hermes_core::state::{PlaceRef, PlayerState, Planet, ShipState, WorldState};
use hermes_core::store::GameState;
use hermes_core::travel::{CountdownStatus, TravelCountdown, TravelSession};
use hermes_logic::coords::MapCoordinate;
use hermes_logic::easing::Easing;
use hermes_logic::items::TradeItem;
use hermes_logic::routes::{self, RoutePolicy};
use hermes_logic::settlement;

// ── Logger ──────────────────────────────────────────────────────────────

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        println!("    [{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: Logger = Logger;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult { name: name.into(), passed, detail: detail.into() }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    log::set_logger(&LOGGER).expect("logger");
    log::set_max_level(if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off
    });

    println!("=== Hermes Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. World generation determinism and shape
    results.extend(validate_generation(verbose));

    // 2. Route duration policy
    results.extend(validate_routes(verbose));

    // 3. Easing curves
    results.extend(validate_easing(verbose));

    // 4. Settlement math
    results.extend(validate_settlement(verbose));

    // 5. Countdown single-fire across frame cadences
    results.extend(validate_countdown(verbose));

    // 6. Full travel lifecycle on a manual clock
    results.extend(validate_travel_lifecycle(verbose));

    // 7. Visual/logical completion divergence
    results.extend(validate_completion_divergence(verbose));

    // 8. Cargo transfer rules
    results.extend(validate_cargo_rules(verbose));

    // 9. Save/load across a trip
    results.extend(validate_persistence(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Fixtures ────────────────────────────────────────────────────────────

const KEPLER: MapCoordinate = MapCoordinate { x: 250.0, y: 0.0, z: 0.0 };
const HALCYON: MapCoordinate = MapCoordinate { x: 0.0, y: 300.0, z: 0.0 };

/// Three planets at hand-picked distances (5s and 6s trips from home at
/// the default cruise speed) with two cargo lines already aboard.
fn mid_game_state() -> GameState {
    let world = WorldState::new(
        vec![
            Planet::new(0, "Meridian", MapCoordinate::ZERO).with_home(true),
            Planet::new(1, "Kepler Landing", KEPLER),
            Planet::new(2, "Halcyon", HALCYON),
        ],
        Vec::new(),
    );

    let mut ship = ShipState::docked_at(PlaceRef::new("Meridian", MapCoordinate::ZERO), 100);
    ship.cargo.store(
        TradeItem::new(1, "Circuit Wafers")
            .with_quantity(3)
            .with_unit_value(10)
            .with_destination("Kepler Landing"),
    );
    ship.cargo.store(
        TradeItem::new(2, "Spice Extract")
            .with_quantity(2)
            .with_unit_value(5)
            .with_destination("Halcyon"),
    );

    GameState::new(world, ship, PlayerState::new(500))
}

// ── 1. World generation ─────────────────────────────────────────────────

fn validate_generation(verbose: bool) -> Vec<TestResult> {
    println!("--- World Generation ---");
    let mut results = Vec::new();
    let now = Utc::now();

    let a = GameEngine::new(GameConfig::default().with_seed(42), now);
    let b = GameEngine::new(GameConfig::default().with_seed(42), now);
    let c = GameEngine::new(GameConfig::default().with_seed(43), now);

    let (a, b, c) = match (a, b, c) {
        (Ok(a), Ok(b), Ok(c)) => (a, b, c),
        _ => {
            results.push(check("engine_boot", false, "catalog failed to load"));
            return results;
        }
    };
    results.push(check("engine_boot", true, "engines built from embedded catalog"));

    results.push(check(
        "generation_deterministic",
        a.state() == b.state(),
        "seed 42 twice gives identical worlds",
    ));
    results.push(check(
        "generation_seed_sensitive",
        a.state().world.planets != c.state().world.planets,
        "seed 43 gives a different map",
    ));

    let homes = a.state().world.planets.iter().filter(|p| p.is_home).count();
    results.push(check(
        "single_home_planet",
        homes == 1,
        format!("{} home planets", homes),
    ));

    let self_bound = a
        .state()
        .world
        .planets
        .iter()
        .flat_map(|p| p.items.iter().map(move |i| (p, i)))
        .filter(|(p, i)| i.destination == p.name)
        .count();
    results.push(check(
        "stock_destinations_elsewhere",
        self_bound == 0,
        format!("{} self-bound market lines", self_bound),
    ));

    let docked_at_home = a
        .state()
        .world
        .home_planet()
        .map(|home| home.name == a.state().ship.location.name)
        .unwrap_or(false);
    results.push(check("ship_docks_at_home", docked_at_home, "new ship starts at home"));

    if verbose {
        for planet in &a.state().world.planets {
            println!(
                "    {} at ({:.0}, {:.0}, {:.0}), {} lines",
                planet.name,
                planet.coord.x,
                planet.coord.y,
                planet.coord.z,
                planet.items.len()
            );
        }
    }

    results
}

// ── 2. Routes ───────────────────────────────────────────────────────────

fn validate_routes(verbose: bool) -> Vec<TestResult> {
    println!("--- Route Policy ---");
    let mut results = Vec::new();
    let policy = RoutePolicy::default();

    let short = routes::travel_duration_ms(&policy, 10.0);
    let near = routes::travel_duration_ms(&policy, 250.0);
    let far = routes::travel_duration_ms(&policy, 500.0);

    results.push(check(
        "duration_floors_at_minimum",
        short == policy.min_travel_secs * 1_000,
        format!("10 units -> {}ms", short),
    ));
    results.push(check(
        "duration_grows_with_distance",
        near < far,
        format!("250 units {}ms, 500 units {}ms", near, far),
    ));
    results.push(check(
        "duration_whole_seconds",
        near % 1_000 == 0 && far % 1_000 == 0,
        "durations quantize to the countdown cadence",
    ));

    let repeat = routes::travel_duration_ms(&policy, 333.3);
    results.push(check(
        "duration_deterministic",
        repeat == routes::travel_duration_ms(&policy, 333.3),
        format!("333.3 units -> {}ms both times", repeat),
    ));

    if verbose {
        for distance in [0.0, 50.0, 130.0, 250.0, 1_000.0] {
            println!(
                "    {:>6.1} units -> {}ms",
                distance,
                routes::travel_duration_ms(&policy, distance)
            );
        }
    }

    results
}

// ── 3. Easing ───────────────────────────────────────────────────────────

fn validate_easing(_verbose: bool) -> Vec<TestResult> {
    println!("--- Easing ---");
    let mut results = Vec::new();
    let curve = Easing::QuintInOut;

    results.push(check(
        "easing_endpoints_exact",
        curve.apply(0.0) == 0.0 && curve.apply(1.0) == 1.0,
        "0 -> 0 and 1 -> 1",
    ));

    let mid = curve.apply(0.5);
    results.push(check(
        "easing_midpoint_centered",
        (mid - 0.5).abs() < 1e-6,
        format!("t=0.5 -> {:.6}", mid),
    ));

    let mut monotonic = true;
    let mut prev = 0.0;
    for i in 1..=200 {
        let v = curve.apply(i as f32 / 200.0);
        if v < prev {
            monotonic = false;
            break;
        }
        prev = v;
    }
    results.push(check("easing_monotonic", monotonic, "no dips across 200 samples"));

    results.push(check(
        "easing_slow_ends",
        curve.apply(0.1) < 0.1 && curve.apply(0.9) > 0.9,
        "ease-in at the start, ease-out at the end",
    ));

    results
}

// ── 4. Settlement ───────────────────────────────────────────────────────

fn validate_settlement(_verbose: bool) -> Vec<TestResult> {
    println!("--- Settlement ---");
    let mut results = Vec::new();

    let cargo = vec![
        TradeItem::new(1, "Circuit Wafers")
            .with_quantity(3)
            .with_unit_value(10)
            .with_destination("Kepler Landing"),
        TradeItem::new(2, "Spice Extract")
            .with_quantity(2)
            .with_unit_value(5)
            .with_destination("Halcyon"),
    ];

    let outcome = settlement::settle(&cargo, "Kepler Landing");
    results.push(check(
        "profit_sums_matches_only",
        outcome.profit == 30,
        format!("3x10 for Kepler Landing -> {} credits", outcome.profit),
    ));
    results.push(check(
        "unsold_lines_stay_aboard",
        outcome.sold_ids == vec![1],
        format!("sold ids {:?}", outcome.sold_ids),
    ));

    let elsewhere = settlement::settle(&cargo, "Meridian");
    results.push(check(
        "wrong_planet_sells_nothing",
        elsewhere.profit == 0 && elsewhere.sold_ids.is_empty(),
        "no lines bound for Meridian",
    ));

    let empty = settlement::settle(&[], "Kepler Landing");
    results.push(check(
        "empty_hold_settles_clean",
        empty.profit == 0,
        "empty hold yields zero",
    ));

    results
}

// ── 5. Countdown ────────────────────────────────────────────────────────

fn validate_countdown(verbose: bool) -> Vec<TestResult> {
    println!("--- Countdown ---");
    let mut results = Vec::new();
    let start = Utc::now();

    // Sweep frame cadences from smooth to stalled; each trip must
    // complete exactly once.
    for step_ms in [16, 100, 250, 1_000, 3_500] {
        let session = TravelSession::new(
            MapCoordinate::ZERO,
            PlaceRef::new("Kepler Landing", KEPLER),
            5_000,
            start,
        );
        let mut countdown = TravelCountdown::new();
        countdown.start(session, start);

        let mut completions = 0;
        let mut elapsed = 0;
        while elapsed < 12_000 {
            elapsed += step_ms;
            if countdown.tick(start + TimeDelta::milliseconds(elapsed))
                == CountdownStatus::Completed
            {
                completions += 1;
            }
        }

        results.push(check(
            &format!("single_fire_at_{}ms_frames", step_ms),
            completions == 1 && !countdown.is_running(),
            format!("{} completions", completions),
        ));
        if verbose {
            println!("    {}ms frames: {} completion(s)", step_ms, completions);
        }
    }

    // Stop then restart must not leak the old cadence.
    let mut countdown = TravelCountdown::new();
    let session = TravelSession::new(
        MapCoordinate::ZERO,
        PlaceRef::new("Kepler Landing", KEPLER),
        2_000,
        start,
    );
    countdown.start(session, start);
    countdown.stop();
    let silent = countdown.tick(start + TimeDelta::seconds(10)) == CountdownStatus::Idle;
    results.push(check(
        "stopped_countdown_stays_silent",
        silent && countdown.remaining_secs().is_none(),
        "no stale fire after stop",
    ));

    results
}

// ── 6. Travel lifecycle ─────────────────────────────────────────────────

fn validate_travel_lifecycle(verbose: bool) -> Vec<TestResult> {
    println!("--- Travel Lifecycle ---");
    let mut results = Vec::new();

    let clock = ManualClock::new(Utc::now());
    let mut engine = match GameEngine::from_state(GameConfig::default(), mid_game_state(), clock.now())
    {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("lifecycle_boot", false, format!("{}", e)));
            return results;
        }
    };

    // Refusals leave state untouched
    let before = engine.state().clone();
    let here = engine.start_travel("Meridian", clock.now());
    results.push(check(
        "current_location_refused",
        here == Err(TravelError::AlreadyThere) && engine.state() == &before,
        "selecting the docked planet is a silent no-op",
    ));

    let unknown = engine.start_travel("Atlantis", clock.now());
    results.push(check(
        "unknown_planet_refused",
        matches!(unknown, Err(TravelError::UnknownPlanet(_))),
        "unlisted names are rejected",
    ));

    // A real departure: 250 units is a 5s trip at default speed
    let departure = clock.now();
    let departed = engine.start_travel("Kepler Landing", departure).is_ok();
    let eta_ok = engine
        .state()
        .ship
        .destination
        .as_ref()
        .map(|d| d.eta == departure + TimeDelta::seconds(5))
        .unwrap_or(false);
    results.push(check(
        "departure_commits_eta",
        departed && eta_ok && engine.is_traveling(),
        "destination set with eta = now + 5s",
    ));

    let second = engine.start_travel("Halcyon", clock.now());
    results.push(check(
        "second_departure_refused",
        second == Err(TravelError::AlreadyTraveling),
        "no retarget mid-flight at the initiation layer",
    ));

    // Drive at 200ms frames; the invariant must hold at every boundary
    let mut invariant_held = true;
    let mut settled_at_ms = None;
    for frame in 1..=40 {
        clock.advance(TimeDelta::milliseconds(200));
        engine.tick(clock.now());
        if !engine.state().ship.travel_state_consistent() {
            invariant_held = false;
        }
        if settled_at_ms.is_none() && !engine.is_traveling() {
            settled_at_ms = Some(frame * 200);
        }
    }

    results.push(check(
        "invariant_every_tick",
        invariant_held,
        "destination iff traveling at all 40 boundaries",
    ));
    results.push(check(
        "arrival_within_one_tick",
        settled_at_ms.map(|ms| (5_000..=6_000).contains(&ms)).unwrap_or(false),
        format!("settled at t={:?}ms for a 5000ms trip", settled_at_ms),
    ));

    let state = engine.state();
    results.push(check(
        "settlement_commits_arrival",
        state.ship.location.name == "Kepler Landing"
            && state.ship.destination.is_none()
            && !state.ship.is_traveling,
        "location committed, travel fields cleared",
    ));
    results.push(check(
        "settlement_credits_profit",
        state.player.cash == 530,
        format!("cash {} after selling 3x10", state.player.cash),
    ));
    results.push(check(
        "unsold_cargo_rides_on",
        state.ship.cargo.line(1).is_none()
            && state.ship.cargo.line(2).map(|l| l.quantity) == Some(2),
        "Halcyon-bound spice still aboard",
    ));

    if verbose {
        println!(
            "    settled at t={:?}ms, cash {}, docked at {}",
            settled_at_ms, state.player.cash, state.ship.location.name
        );
    }

    results
}

// ── 7. Completion divergence ────────────────────────────────────────────

fn validate_completion_divergence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Completion Divergence ---");
    let mut results = Vec::new();

    // A fractional-second ETA: the scene lands at 2.5s, the countdown
    // waits for its next whole-second tick.
    let clock = ManualClock::new(Utc::now());
    let mut state = mid_game_state();
    state.ship.destination = Some(hermes_core::state::Destination::new(
        PlaceRef::new("Kepler Landing", KEPLER),
        clock.now() + TimeDelta::milliseconds(2_500),
    ));
    state.ship.is_traveling = true;

    let mut engine = match GameEngine::from_state(GameConfig::default(), state, clock.now()) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("divergence_boot", false, format!("{}", e)));
            return results;
        }
    };

    let start = clock.now();
    while clock.now() < start + TimeDelta::milliseconds(2_500) {
        clock.advance(TimeDelta::milliseconds(250));
        engine.tick(clock.now());
    }

    let gap_consistent = engine.scene().is_travel_complete()
        && engine.scene().position() == KEPLER
        && engine.is_traveling()
        && engine.state().ship.travel_state_consistent();
    results.push(check(
        "visual_lands_before_settlement",
        gap_consistent,
        "token parked on the planet while the countdown still runs",
    ));

    while clock.now() < start + TimeDelta::milliseconds(3_500) {
        clock.advance(TimeDelta::milliseconds(250));
        engine.tick(clock.now());
    }
    results.push(check(
        "views_converge_within_one_tick",
        !engine.is_traveling() && engine.state().ship.location.name == "Kepler Landing",
        "settlement caught up at the next whole-second tick",
    ));

    results
}

// ── 8. Cargo rules ──────────────────────────────────────────────────────

fn validate_cargo_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Cargo Rules ---");
    let mut results = Vec::new();

    let clock = ManualClock::new(Utc::now());
    let mut state = mid_game_state();
    // 10-volume line of 12 units on the market at home
    if let Some(home) = state.world.planets.first_mut() {
        home.items.push(
            TradeItem::new(50, "Titanium Alloy")
                .with_quantity(12)
                .with_unit_volume(10)
                .with_unit_value(18)
                .with_destination("Halcyon"),
        );
    }

    let mut engine = match GameEngine::from_state(GameConfig::default(), state, clock.now()) {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("cargo_boot", false, format!("{}", e)));
            return results;
        }
    };

    // Hold: capacity 100, fixture lines take 5 volume, 95 free
    let loaded = engine.load_cargo(50, 9).is_ok();
    let aboard = engine.state().ship.cargo.line(50).map(|l| l.quantity);
    let market = engine
        .state()
        .world
        .planet("Meridian")
        .and_then(|p| p.items.iter().find(|i| i.id == 50))
        .map(|i| i.quantity);
    results.push(check(
        "load_moves_units_once",
        loaded && aboard == Some(9) && market == Some(3),
        format!("aboard {:?}, market {:?}", aboard, market),
    ));

    let over_stock = engine.load_cargo(50, 4);
    results.push(check(
        "over_stock_refused",
        matches!(over_stock, Err(CargoError::InsufficientStock { have: 3, want: 4 })),
        "market has 3 units left",
    ));

    // 95 volume used, 5 free; the remaining 3 units need 30
    let over_volume = engine.load_cargo(50, 3);
    results.push(check(
        "over_volume_refused",
        matches!(over_volume, Err(CargoError::InsufficientVolume { .. })),
        "hold volume caps the load",
    ));

    let unloaded = engine.unload_cargo(50, 2).is_ok();
    let aboard = engine.state().ship.cargo.line(50).map(|l| l.quantity);
    results.push(check(
        "unload_returns_units",
        unloaded && aboard == Some(7),
        format!("{:?} units left aboard after returning 2", aboard),
    ));

    engine.start_travel("Halcyon", clock.now()).expect("departure");
    let in_flight = engine.unload_cargo(50, 1);
    results.push(check(
        "cargo_locked_in_flight",
        in_flight == Err(CargoError::NotDocked),
        "transfers refused while traveling",
    ));

    results
}

// ── 9. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    println!("--- Persistence ---");
    let mut results = Vec::new();

    let clock = ManualClock::new(Utc::now());
    let mut engine = match GameEngine::from_state(GameConfig::default(), mid_game_state(), clock.now())
    {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("persistence_boot", false, format!("{}", e)));
            return results;
        }
    };

    engine.start_travel("Kepler Landing", clock.now()).expect("departure");
    for _ in 0..2 {
        clock.advance(TimeDelta::seconds(1));
        engine.tick(clock.now());
    }

    let mut buffer = Vec::new();
    let saved = engine.save(&mut buffer, clock.now()).is_ok();
    results.push(check(
        "mid_travel_save",
        saved && !buffer.is_empty(),
        format!("{} bytes written", buffer.len()),
    ));

    let loaded = match persistence::load_game(&buffer[..]) {
        Ok(loaded) => loaded,
        Err(e) => {
            results.push(check("mid_travel_load", false, format!("{}", e)));
            return results;
        }
    };
    results.push(check(
        "mid_travel_load",
        loaded.state == *engine.state(),
        "snapshot round-trips",
    ));

    let mut resumed = match GameEngine::from_state(GameConfig::default(), loaded.state, clock.now())
    {
        Ok(engine) => engine,
        Err(e) => {
            results.push(check("resume_boot", false, format!("{}", e)));
            return results;
        }
    };
    results.push(check(
        "resume_rearms_travel",
        resumed.is_traveling(),
        "loaded trip keeps counting",
    ));

    // 3s remained on the saved trip
    for _ in 0..5 {
        clock.advance(TimeDelta::seconds(1));
        resumed.tick(clock.now());
    }
    let state = resumed.state();
    results.push(check(
        "resumed_trip_arrives",
        !state.ship.is_traveling
            && state.ship.location.name == "Kepler Landing"
            && state.player.cash == 530,
        format!("docked at {} with {} credits", state.ship.location.name, state.player.cash),
    ));

    // A corrupted version byte must be rejected
    let garbage = [0xFF, 0x00, 0x13, 0x37];
    results.push(check(
        "garbage_save_rejected",
        persistence::load_game(&garbage[..]).is_err(),
        "malformed bytes do not load",
    ));

    results
}

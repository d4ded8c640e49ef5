//! Shared tuning constants.
//!
//! Plain numeric constants with no engine dependency. Both the simulation
//! engine and the native simtest use these; `GameConfig` defaults pull
//! from here so a headless run and an embedded run agree.

/// Countdown tick cadence in milliseconds (the timer re-evaluates the ETA
/// once per second regardless of how often the engine loop runs).
pub const COUNTDOWN_INTERVAL_MS: i64 = 1_000;

/// Cruise speed in map units per second, used to derive travel durations.
pub const DEFAULT_CRUISE_SPEED: f32 = 50.0;

/// Shortest allowed trip, in whole seconds.
pub const MIN_TRAVEL_SECS: i64 = 2;

/// Cargo hold capacity in volume units.
pub const DEFAULT_HOLD_VOLUME: u32 = 100;

/// Credits a new commander starts with.
pub const STARTING_CASH: u64 = 500;

/// Planets generated for a new world.
pub const DEFAULT_PLANET_COUNT: usize = 8;

/// Contracts generated for a new world.
pub const DEFAULT_CONTRACT_COUNT: usize = 3;

/// Time between market restocks in milliseconds.
pub const RESTOCK_INTERVAL_MS: i64 = 120_000;

/// Item lines stocked per planet per restock, inclusive bounds.
pub const STOCK_LINES_MIN: usize = 2;
pub const STOCK_LINES_MAX: usize = 4;

/// Units per stocked item line, inclusive bounds.
pub const STOCK_QUANTITY_MIN: u32 = 1;
pub const STOCK_QUANTITY_MAX: u32 = 9;

/// Half-extent of the cubic region planets are scattered in.
pub const MAP_EXTENT: f32 = 500.0;

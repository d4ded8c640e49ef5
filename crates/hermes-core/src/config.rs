//! Engine configuration.

use serde::{Deserialize, Serialize};

use hermes_logic::constants::{
    DEFAULT_CONTRACT_COUNT, DEFAULT_HOLD_VOLUME, DEFAULT_PLANET_COUNT, MAP_EXTENT,
    RESTOCK_INTERVAL_MS, STARTING_CASH, STOCK_LINES_MAX, STOCK_LINES_MIN, STOCK_QUANTITY_MAX,
    STOCK_QUANTITY_MIN,
};
use hermes_logic::routes::RoutePolicy;

/// Everything tunable about a new game. `Default` gives the standard
/// world; tests and the simtest harness override fields as needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for world generation and restocks. Equal seeds give equal
    /// worlds.
    pub seed: u64,
    pub planet_count: usize,
    pub contract_count: usize,
    /// Half-extent of the cubic region planets scatter across.
    pub map_extent: f32,
    pub route: RoutePolicy,
    pub hold_volume: u32,
    pub starting_cash: u64,
    /// Time between market restocks.
    pub restock_interval_ms: i64,
    /// Item lines stocked per planet, inclusive bounds.
    pub stock_lines_min: usize,
    pub stock_lines_max: usize,
    /// Units per stocked line, inclusive bounds.
    pub stock_quantity_min: u32,
    pub stock_quantity_max: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            planet_count: DEFAULT_PLANET_COUNT,
            contract_count: DEFAULT_CONTRACT_COUNT,
            map_extent: MAP_EXTENT,
            route: RoutePolicy::default(),
            hold_volume: DEFAULT_HOLD_VOLUME,
            starting_cash: STARTING_CASH,
            restock_interval_ms: RESTOCK_INTERVAL_MS,
            stock_lines_min: STOCK_LINES_MIN,
            stock_lines_max: STOCK_LINES_MAX,
            stock_quantity_min: STOCK_QUANTITY_MIN,
            stock_quantity_max: STOCK_QUANTITY_MAX,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_planet_count(mut self, planet_count: usize) -> Self {
        self.planet_count = planet_count;
        self
    }
}

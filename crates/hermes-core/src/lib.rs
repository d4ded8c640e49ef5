//! Hermes Core - Space Trading Simulation Engine
//!
//! A trading game core: a commander hauls cargo between procedurally
//! generated planets, and profit settles when the ship arrives. All
//! state lives in one immutable snapshot behind a reducer store; travel
//! runs on two independent timing sources, a 1 Hz countdown that owns
//! arrival and a frame-driven scene that owns the map animation.
//!
//! # Architecture
//!
//! - **Store**: [`store::GameState`] snapshots mutated only through
//!   [`store::Intent`] values and the pure [`store::reduce`] function
//! - **Travel**: one shared [`travel::TravelSession`] per trip, polled by
//!   the countdown and eased by the scene
//! - **Engine**: [`engine::GameEngine`] wires it together and applies
//!   settlement when the countdown completes
//!
//! # Example
//!
//! ```rust,no_run
//! use hermes_core::prelude::*;
//! use hermes_core::config::GameConfig;
//!
//! let clock = SystemClock;
//! let mut engine = GameEngine::new(GameConfig::default(), clock.now())
//!     .expect("catalog");
//!
//! let destination = engine.state().world.planets[1].name.clone();
//! engine.start_travel(&destination, clock.now()).expect("departure");
//!
//! // Drive the world; one call per rendered frame is typical
//! loop {
//!     engine.tick(clock.now());
//! }
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod state;
pub mod store;
pub mod travel;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::engine::{CargoError, GameEngine, TravelError};
    pub use crate::state::*;
    pub use crate::store::{GameState, Intent, Store};
}

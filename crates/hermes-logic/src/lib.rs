//! Pure trading and travel logic for Hermes.
//!
//! This crate contains all game logic that is independent of any clock,
//! store, or engine. Functions take plain data and return results, making
//! them unit-testable and portable between the simulation engine and any
//! headless tooling.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`cargo`] | Hold volume accounting and load limits |
//! | [`constants`] | Shared tuning constants (tick cadence, defaults) |
//! | [`coords`] | 3D map coordinates, distances, interpolation |
//! | [`easing`] | Easing curves for travel animation |
//! | [`items`] | Tradeable item data and builders |
//! | [`routes`] | Distance-to-duration policy and travel progress |
//! | [`settlement`] | Sellable-cargo filtering and profit math |

pub mod cargo;
pub mod constants;
pub mod coords;
pub mod easing;
pub mod items;
pub mod routes;
pub mod settlement;

//! Snapshot state types: world, ship, and player.

pub mod player;
pub mod ship;
pub mod world;

pub use player::PlayerState;
pub use ship::{CargoHold, Destination, PlaceRef, ShipState};
pub use world::{Contract, Planet, PlanetStock, WorldState};

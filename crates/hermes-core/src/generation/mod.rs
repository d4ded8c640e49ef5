//! Generation - procedural creation of planets, market stock, and
//! contracts. All of it is seed-driven: the same rng state always
//! produces the same world.

mod contracts;
mod names;
mod planets;

pub use contracts::*;
pub use names::*;
pub use planets::*;

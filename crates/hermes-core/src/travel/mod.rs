//! Travel timing: the shared session record, the 1 Hz countdown that
//! settles arrival, and the frame-driven scene animation. The countdown
//! and the scene are deliberately independent timing sources; the engine
//! wires them to one session per trip.

mod countdown;
mod scene;
mod session;

pub use countdown::{CountdownStatus, TravelCountdown};
pub use scene::TravelScene;
pub use session::TravelSession;

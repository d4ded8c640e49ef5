//! Player-owned state.

use serde::{Deserialize, Serialize};

/// The commander's ledger. Settlement credits land here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerState {
    pub cash: u64,
}

impl PlayerState {
    pub fn new(cash: u64) -> Self {
        Self { cash }
    }

    /// Add credits, saturating rather than wrapping on overflow.
    pub fn credit(&mut self, amount: u64) {
        self.cash = self.cash.saturating_add(amount);
    }
}

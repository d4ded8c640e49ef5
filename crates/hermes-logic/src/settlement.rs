//! Arrival settlement math.
//!
//! When a trip completes, cargo lines bound for the arrival planet are
//! sold and the rest stay aboard. These functions only compute what would
//! be sold and for how much; applying the result to game state is the
//! engine's job.

use crate::items::TradeItem;

/// Outcome of scanning a cargo hold against an arrival planet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Credits earned by the sold lines.
    pub profit: u64,
    /// Ids of the lines that sold, in hold order.
    pub sold_ids: Vec<u32>,
}

/// Whether a cargo line sells at the given planet.
pub fn sells_at(item: &TradeItem, planet: &str) -> bool {
    item.destination == planet
}

/// Total payout for the lines that sell at `planet`.
pub fn settlement_profit(cargo: &[TradeItem], planet: &str) -> u64 {
    cargo
        .iter()
        .filter(|item| sells_at(item, planet))
        .map(TradeItem::sale_value)
        .sum()
}

/// Scan the hold: profit plus the ids of every line that sells here.
pub fn settle(cargo: &[TradeItem], planet: &str) -> Settlement {
    let sold_ids = cargo
        .iter()
        .filter(|item| sells_at(item, planet))
        .map(|item| item.id)
        .collect();

    Settlement {
        profit: settlement_profit(cargo, planet),
        sold_ids,
    }
}

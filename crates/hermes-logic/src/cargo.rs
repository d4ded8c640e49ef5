//! Cargo hold volume accounting.
//!
//! The hold has a fixed volume capacity; every stocked unit takes its
//! item's unit volume. Loading is capped by whichever runs out first,
//! planet stock or free volume, mirroring the market screen's quantity
//! limit.

use crate::items::TradeItem;

/// Volume taken by every line in the hold.
pub fn used_volume(cargo: &[TradeItem]) -> u32 {
    cargo.iter().map(TradeItem::total_volume).sum()
}

/// Free volume left under `capacity`. Saturates at zero rather than
/// going negative if a hold was built over capacity.
pub fn remaining_volume(capacity: u32, cargo: &[TradeItem]) -> u32 {
    capacity.saturating_sub(used_volume(cargo))
}

/// Whether `quantity` units of `unit_volume` each fit in the free space.
pub fn fits(capacity: u32, cargo: &[TradeItem], quantity: u32, unit_volume: u32) -> bool {
    quantity
        .checked_mul(unit_volume)
        .is_some_and(|needed| needed <= remaining_volume(capacity, cargo))
}

/// Most units of a line that can be loaded: limited by the line's stock
/// and by free hold volume. Zero-volume goods are limited by stock only.
pub fn max_loadable(capacity: u32, cargo: &[TradeItem], stock: u32, unit_volume: u32) -> u32 {
    if unit_volume == 0 {
        return stock;
    }
    stock.min(remaining_volume(capacity, cargo) / unit_volume)
}

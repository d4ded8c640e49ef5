//! Tradeable item data.
//!
//! An item line is a quantity of one good bound for one planet. Lines are
//! owned by exactly one holder at a time, either a planet's market stock
//! or the ship's cargo hold; moving units between holders is a two-step
//! mutation handled by the store, never by mutating a line in place here.

use serde::{Deserialize, Serialize};

/// One line of goods: a quantity of a single item kind bound for a planet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeItem {
    /// Unique id of this line, stable across holder moves.
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Units in this line.
    pub quantity: u32,
    /// Hold volume taken by one unit.
    pub unit_volume: u32,
    /// Credits one unit pays out when delivered to `destination`.
    pub unit_value: u32,
    /// Listed market price of one unit.
    pub unit_price: u32,
    /// Planet this line sells at.
    pub destination: String,
}

impl TradeItem {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            quantity: 0,
            unit_volume: 1,
            unit_value: 0,
            unit_price: 0,
            destination: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit_volume(mut self, unit_volume: u32) -> Self {
        self.unit_volume = unit_volume;
        self
    }

    pub fn with_unit_value(mut self, unit_value: u32) -> Self {
        self.unit_value = unit_value;
        self
    }

    pub fn with_unit_price(mut self, unit_price: u32) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Hold volume taken by the whole line.
    pub fn total_volume(&self) -> u32 {
        self.quantity * self.unit_volume
    }

    /// Credits the whole line pays out at its destination.
    pub fn sale_value(&self) -> u64 {
        self.quantity as u64 * self.unit_value as u64
    }
}

/// Merge a line into a holder's list. Units join an existing line with
/// the same id; unknown ids append a new line.
pub fn merge_line(lines: &mut Vec<TradeItem>, line: TradeItem) {
    match lines.iter_mut().find(|existing| existing.id == line.id) {
        Some(existing) => existing.quantity += line.quantity,
        None => lines.push(line),
    }
}

/// Remove up to `quantity` units of a line from a holder's list; the
/// line disappears when it hits zero. Returns false if the id is absent.
pub fn remove_units(lines: &mut Vec<TradeItem>, id: u32, quantity: u32) -> bool {
    let Some(index) = lines.iter().position(|line| line.id == id) else {
        return false;
    };
    if lines[index].quantity <= quantity {
        lines.remove(index);
    } else {
        lines[index].quantity -= quantity;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let item = TradeItem::new(7, "Coolant Cells")
            .with_description("Sealed cryo-coolant for reactor rings")
            .with_quantity(4)
            .with_unit_volume(2)
            .with_unit_value(25)
            .with_unit_price(18)
            .with_destination("Vesta Prime");

        assert_eq!(item.id, 7);
        assert_eq!(item.quantity, 4);
        assert_eq!(item.destination, "Vesta Prime");
    }

    #[test]
    fn test_line_totals() {
        let item = TradeItem::new(1, "Ore")
            .with_quantity(3)
            .with_unit_volume(5)
            .with_unit_value(10);

        assert_eq!(item.total_volume(), 15);
        assert_eq!(item.sale_value(), 30);
    }

    #[test]
    fn test_merge_joins_same_id() {
        let mut lines = vec![TradeItem::new(1, "Ore").with_quantity(3)];

        merge_line(&mut lines, TradeItem::new(1, "Ore").with_quantity(2));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 5);

        merge_line(&mut lines, TradeItem::new(2, "Spice").with_quantity(1));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_remove_units_decrements_and_drops() {
        let mut lines = vec![TradeItem::new(1, "Ore").with_quantity(5)];

        assert!(remove_units(&mut lines, 1, 2));
        assert_eq!(lines[0].quantity, 3);

        assert!(remove_units(&mut lines, 1, 3));
        assert!(lines.is_empty());

        assert!(!remove_units(&mut lines, 1, 1));
    }

    #[test]
    fn test_remove_units_caps_at_line_quantity() {
        let mut lines = vec![TradeItem::new(1, "Ore").with_quantity(2)];

        assert!(remove_units(&mut lines, 1, 99));
        assert!(lines.is_empty());
    }
}

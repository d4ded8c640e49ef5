//! Item catalog.
//!
//! The goods the world trades in, embedded from `data/item_catalog.json`
//! at compile time. Generation samples catalog entries to mint concrete
//! item lines; the catalog itself never changes at runtime.

use serde::{Deserialize, Serialize};

static CATALOG_JSON: &str = include_str!("../../../data/item_catalog.json");

/// One kind of tradeable good.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    /// Hold volume per unit.
    pub unit_volume: u32,
    /// Payout per unit before distance scaling.
    pub base_value: u32,
    /// Listed market price per unit before distance scaling.
    pub base_price: u32,
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(entries)
}

/// The embedded default catalog.
pub fn load_default_catalog() -> Result<Vec<CatalogEntry>, CatalogError> {
    parse_catalog(CATALOG_JSON)
}

/// Errors raised while reading a catalog.
#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    Empty,
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Parse(e) => write!(f, "Catalog parse error: {}", e),
            CatalogError::Empty => write!(f, "Catalog contains no entries"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = load_default_catalog().expect("embedded catalog must parse");
        assert!(catalog.len() >= 5);
    }

    #[test]
    fn test_embedded_catalog_entries_are_sane() {
        let catalog = load_default_catalog().expect("embedded catalog must parse");
        for entry in &catalog {
            assert!(!entry.name.is_empty());
            assert!(entry.unit_volume >= 1, "{} has zero volume", entry.name);
            assert!(entry.base_value > 0, "{} pays nothing", entry.name);
        }
    }

    #[test]
    fn test_embedded_catalog_names_are_unique() {
        let catalog = load_default_catalog().expect("embedded catalog must parse");
        let mut names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(parse_catalog("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_malformed_catalog_rejected() {
        assert!(matches!(parse_catalog("not json"), Err(CatalogError::Parse(_))));
    }
}

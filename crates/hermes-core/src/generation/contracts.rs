//! Contract generation.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::CatalogEntry;
use crate::config::GameConfig;
use crate::state::{Contract, Planet};

/// Generate the opening contract board: each contract names an item
/// kind, a quantity, and an origin/destination pair of distinct planets.
/// Pays a premium over hauling the same goods freelance.
pub fn generate_contracts(
    planets: &[Planet],
    catalog: &[CatalogEntry],
    config: &GameConfig,
    rng: &mut impl Rng,
    next_contract_id: &mut u32,
) -> Vec<Contract> {
    if planets.len() < 2 {
        return Vec::new();
    }

    (0..config.contract_count)
        .filter_map(|_| {
            let entry = catalog.choose(rng)?;
            let pair: Vec<&Planet> = planets.choose_multiple(rng, 2).collect();
            let quantity = rng.gen_range(1..=5u32);

            let id = *next_contract_id;
            *next_contract_id += 1;

            Some(Contract {
                id,
                item_name: entry.name.clone(),
                quantity,
                payout: quantity as u64 * entry.base_value as u64 * 2,
                origin: pair[0].name.clone(),
                destination: pair[1].name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_default_catalog;
    use crate::generation::generate_planets;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world(seed: u64) -> (Vec<Planet>, Vec<CatalogEntry>) {
        let config = GameConfig::default();
        let catalog = load_default_catalog().expect("catalog");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut next_id = 1;
        let planets = generate_planets(&config, &catalog, &mut rng, &mut next_id);
        (planets, catalog)
    }

    #[test]
    fn test_contracts_reference_real_distinct_planets() {
        let (planets, catalog) = world(42);
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut next_id = 1;

        let contracts = generate_contracts(&planets, &catalog, &config, &mut rng, &mut next_id);
        assert_eq!(contracts.len(), config.contract_count);

        for contract in &contracts {
            assert_ne!(contract.origin, contract.destination);
            assert!(planets.iter().any(|p| p.name == contract.origin));
            assert!(planets.iter().any(|p| p.name == contract.destination));
            assert!(contract.payout > 0);
            assert!(contract.quantity >= 1);
        }
    }

    #[test]
    fn test_contract_ids_advance_counter() {
        let (planets, catalog) = world(42);
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut next_id = 10;

        let contracts = generate_contracts(&planets, &catalog, &config, &mut rng, &mut next_id);
        assert_eq!(contracts[0].id, 10);
        assert_eq!(next_id, 10 + contracts.len() as u32);
    }

    #[test]
    fn test_single_planet_world_offers_no_contracts() {
        let config = GameConfig::default().with_planet_count(1);
        let catalog = load_default_catalog().expect("catalog");
        let mut rng = StdRng::seed_from_u64(5);
        let mut next_planet_item = 1;
        let planets = generate_planets(&config, &catalog, &mut rng, &mut next_planet_item);

        let mut next_id = 1;
        let contracts = generate_contracts(&planets, &catalog, &config, &mut rng, &mut next_id);
        assert!(contracts.is_empty());
    }
}

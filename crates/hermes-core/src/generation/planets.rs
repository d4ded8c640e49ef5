//! Planet and market stock generation.

use rand::seq::SliceRandom;
use rand::Rng;

use hermes_logic::coords::MapCoordinate;
use hermes_logic::items::TradeItem;

use crate::catalog::CatalogEntry;
use crate::config::GameConfig;
use crate::state::{Planet, PlanetStock};

use super::names::pick_planet_names;

/// Generate the world's planets with initial market stock. The first
/// planet is the home planet and sits at the map origin; the rest
/// scatter across the configured extent.
pub fn generate_planets(
    config: &GameConfig,
    catalog: &[CatalogEntry],
    rng: &mut impl Rng,
    next_item_id: &mut u32,
) -> Vec<Planet> {
    let names = pick_planet_names(rng, config.planet_count);

    let mut planets: Vec<Planet> = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let coord = if index == 0 {
                MapCoordinate::ZERO
            } else {
                MapCoordinate::new(
                    rng.gen_range(-config.map_extent..config.map_extent),
                    rng.gen_range(-config.map_extent..config.map_extent),
                    rng.gen_range(-config.map_extent..config.map_extent),
                )
            };
            Planet::new(index as u32, name, coord).with_home(index == 0)
        })
        .collect();

    for stock in stock_planets(&planets, catalog, config, rng, next_item_id) {
        if let Some(planet) = planets.iter_mut().find(|p| p.name == stock.planet) {
            planet.items = stock.items;
        }
    }

    planets
}

/// Roll fresh market stock for every planet. Each line is bound for a
/// planet other than its host, and pays more the longer the haul.
pub fn stock_planets(
    planets: &[Planet],
    catalog: &[CatalogEntry],
    config: &GameConfig,
    rng: &mut impl Rng,
    next_item_id: &mut u32,
) -> Vec<PlanetStock> {
    planets
        .iter()
        .map(|host| {
            let candidates: Vec<&Planet> =
                planets.iter().filter(|p| p.name != host.name).collect();
            let line_count = rng.gen_range(config.stock_lines_min..=config.stock_lines_max);
            let mut items = Vec::with_capacity(line_count);

            for _ in 0..line_count {
                let Some(entry) = catalog.choose(rng) else { break };
                let Some(destination) = candidates.choose(rng) else { break };

                let distance = host.coord.distance(&destination.coord);
                let id = *next_item_id;
                *next_item_id += 1;

                items.push(
                    TradeItem::new(id, entry.name.clone())
                        .with_description(entry.description.clone())
                        .with_quantity(
                            rng.gen_range(config.stock_quantity_min..=config.stock_quantity_max),
                        )
                        .with_unit_volume(entry.unit_volume)
                        // longer hauls pay and cost more
                        .with_unit_value(entry.base_value + (distance / 25.0).round() as u32)
                        .with_unit_price(entry.base_price + (distance / 50.0).round() as u32)
                        .with_destination(destination.name.clone()),
                );
            }

            PlanetStock { planet: host.name.clone(), items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_default_catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(seed: u64) -> Vec<Planet> {
        let config = GameConfig::default();
        let catalog = load_default_catalog().expect("catalog");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut next_id = 1;
        generate_planets(&config, &catalog, &mut rng, &mut next_id)
    }

    #[test]
    fn test_same_seed_reproduces_world() {
        assert_eq!(generate(42), generate(42));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate(1), generate(2));
    }

    #[test]
    fn test_exactly_one_home_planet_at_origin() {
        let planets = generate(42);
        let homes: Vec<_> = planets.iter().filter(|p| p.is_home).collect();
        assert_eq!(homes.len(), 1);
        assert_eq!(homes[0].coord, MapCoordinate::ZERO);
    }

    #[test]
    fn test_planets_sit_within_map_extent() {
        let config = GameConfig::default();
        for planet in generate(42) {
            assert!(planet.coord.x.abs() <= config.map_extent);
            assert!(planet.coord.y.abs() <= config.map_extent);
            assert!(planet.coord.z.abs() <= config.map_extent);
        }
    }

    #[test]
    fn test_stock_destinations_point_elsewhere() {
        let planets = generate(42);
        for host in &planets {
            for item in &host.items {
                assert_ne!(item.destination, host.name, "self-bound line on {}", host.name);
                assert!(
                    planets.iter().any(|p| p.name == item.destination),
                    "unknown destination {}",
                    item.destination
                );
            }
        }
    }

    #[test]
    fn test_stocked_line_ids_are_unique() {
        let planets = generate(42);
        let mut ids: Vec<u32> = planets
            .iter()
            .flat_map(|p| p.items.iter().map(|i| i.id))
            .collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert!(count > 0);
    }

    #[test]
    fn test_lonely_world_stocks_nothing() {
        // a single planet has no valid destinations to ship to
        let config = GameConfig::default().with_planet_count(1);
        let catalog = load_default_catalog().expect("catalog");
        let mut rng = StdRng::seed_from_u64(3);
        let mut next_id = 1;

        let planets = generate_planets(&config, &catalog, &mut rng, &mut next_id);
        assert_eq!(planets.len(), 1);
        assert!(planets[0].items.is_empty());
        assert_eq!(next_id, 1);
    }
}

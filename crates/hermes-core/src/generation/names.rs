//! Planet name pool.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw `count` distinct planet names. The pool caps the world size;
/// requests beyond it are truncated.
pub fn pick_planet_names(rng: &mut impl Rng, count: usize) -> Vec<String> {
    PLANET_NAMES
        .choose_multiple(rng, count.min(PLANET_NAMES.len()))
        .map(|name| name.to_string())
        .collect()
}

/// Number of names available.
pub fn name_pool_size() -> usize {
    PLANET_NAMES.len()
}

static PLANET_NAMES: &[&str] = &[
    "Meridian",
    "Kepler Landing",
    "Vesta Prime",
    "New Arcadia",
    "Hadley Deep",
    "Thessaly",
    "Cobalt Reach",
    "Ishtar Station",
    "Perihelion",
    "Bright Harbor",
    "Ganwick",
    "Solace",
    "Tycho Verge",
    "Caldera",
    "Amberline",
    "Drift Haven",
    "Korolev Point",
    "Halcyon",
    "Red Shallows",
    "Emberfall",
    "Lightholm",
    "Vantage",
    "Orison",
    "Farrow's Rest",
];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_names_are_distinct() {
        let mut rng = StdRng::seed_from_u64(42);
        let names = pick_planet_names(&mut rng, 8);

        assert_eq!(names.len(), 8);
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
    }

    #[test]
    fn test_same_seed_same_names() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(pick_planet_names(&mut a, 5), pick_planet_names(&mut b, 5));
    }

    #[test]
    fn test_oversized_request_truncates_to_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let names = pick_planet_names(&mut rng, 500);
        assert_eq!(names.len(), name_pool_size());
    }
}

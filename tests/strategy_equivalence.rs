//! All strategies must agree with each other and with a brute-force scan.

use cityscan::compute::tree::OrderedMap;
use cityscan::compute::zorder::encode;
use cityscan::query::identity_set;
use cityscan::{BoundingBox, City, QueryEngine, StrategyKind};
use proptest::prelude::*;

fn brute_force<'a>(cities: &'a [City], bounds: &BoundingBox) -> Vec<&'a City> {
    cities.iter().filter(|c| bounds.contains(c)).collect()
}

/// A deterministic spread of cities over the whole globe, with duplicates,
/// shuffled so the trees stay shallow.
fn world_grid() -> Vec<City> {
    let mut cities = Vec::new();
    for i in 0..13 {
        for j in 0..25 {
            let lat = -90.0 + i as f64 * 15.0;
            let lon = -180.0 + j as f64 * 15.0;
            cities.push(City::new(format!("grid_{}_{}", i, j), lat, lon).unwrap());
        }
    }
    // Colocated pairs and a signed zero
    cities.push(City::new("twin", 15.0, 15.0).unwrap());
    cities.push(City::new("twin", 15.0, 15.0).unwrap());
    cities.push(City::new("zero", -0.0, 0.0).unwrap());

    // Fisher-Yates with a fixed xorshift seed
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for i in (1..cities.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        cities.swap(i, (state % (i as u64 + 1)) as usize);
    }
    cities
}

fn check_all(cities: &[City], bounds: &BoundingBox) {
    let expected = identity_set(&brute_force(cities, bounds));
    for kind in StrategyKind::ALL {
        let found = kind.find_cities(cities, bounds).unwrap();
        assert_eq!(
            identity_set(&found),
            expected,
            "strategy {} on {:?}",
            kind,
            bounds
        );
    }
}

#[test]
fn test_three_city_example() {
    let cities = vec![
        City::new("a", 10.0, 20.0).unwrap(),
        City::new("b", 50.0, 50.0).unwrap(),
        City::new("c", -5.0, 100.0).unwrap(),
    ];
    let bounds = BoundingBox::new(0.0, 60.0, 0.0, 60.0);

    for kind in StrategyKind::ALL {
        let mut names: Vec<&str> = kind
            .find_cities(&cities, &bounds)
            .unwrap()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }
}

#[test]
fn test_grid_of_windows() {
    let cities = world_grid();
    let edges = [-90.0, -45.0, 0.0, 15.0, 37.5, 90.0];
    let lon_edges = [-180.0, -105.0, 0.0, 10.0, 75.0, 180.0];

    for &min_lat in &edges {
        for &max_lat in &edges {
            for &min_lon in &lon_edges {
                for &max_lon in &lon_edges {
                    check_all(&cities, &BoundingBox::new(min_lat, max_lat, min_lon, max_lon));
                }
            }
        }
    }
}

#[test]
fn test_signed_zero_bounds() {
    let cities = world_grid();
    check_all(&cities, &BoundingBox::new(0.0, 0.0, 0.0, 0.0));
    check_all(&cities, &BoundingBox::new(-0.0, 0.0, -0.0, 5.0));
}

#[test]
fn test_window_beyond_domain() {
    let cities = world_grid();
    let everything = BoundingBox::new(-1000.0, 1000.0, -1000.0, 1000.0);
    for kind in StrategyKind::ALL {
        assert_eq!(kind.find_cities(&cities, &everything).unwrap().len(), cities.len());
    }
}

#[test]
fn test_z_key_range_is_a_superset() {
    let cities = world_grid();
    let mut by_key = OrderedMap::new();
    for (i, city) in cities.iter().enumerate() {
        by_key.insert(encode(city.latitude, city.longitude), i).unwrap();
    }

    let edges = [-90.0, -33.3, 0.0, 12.5, 47.0, 90.0];
    let lon_edges = [-180.0, -71.0, 0.0, 2.5, 99.9, 180.0];
    for &min_lat in &edges {
        for &max_lat in edges.iter().filter(|&&v| v >= min_lat) {
            for &min_lon in &lon_edges {
                for &max_lon in lon_edges.iter().filter(|&&v| v >= min_lon) {
                    let bounds = BoundingBox::new(min_lat, max_lat, min_lon, max_lon);
                    let candidates = by_key
                        .range_copied(&encode(min_lat, min_lon), &encode(max_lat, max_lon))
                        .unwrap();
                    for (i, city) in cities.iter().enumerate() {
                        if bounds.contains(city) {
                            assert!(candidates.contains(&i), "{} missing for {:?}", city.name, bounds);
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_compare_strategies_agree_on_grid() {
    let cities = world_grid();
    let bounds = BoundingBox::new(-30.0, 45.0, -60.0, 20.0);
    let reports = QueryEngine::default()
        .compare_strategies(&cities, &bounds)
        .unwrap();
    let expected = brute_force(&cities, &bounds).len();
    for report in reports {
        assert_eq!(report.cities.len(), expected);
    }
}

fn arb_city() -> impl Strategy<Value = City> {
    (-90.0..=90.0f64, -180.0..=180.0f64, 0u32..1000)
        .prop_map(|(lat, lon, id)| City::new(format!("city_{}", id), lat, lon).unwrap())
}

fn arb_bounds() -> impl Strategy<Value = BoundingBox> {
    (
        -100.0..100.0f64,
        -100.0..100.0f64,
        -190.0..190.0f64,
        -190.0..190.0f64,
    )
        .prop_map(|(a, b, c, d)| BoundingBox::new(a, b, c, d))
}

proptest! {
    #[test]
    fn prop_strategies_match_brute_force(
        cities in prop::collection::vec(arb_city(), 0..150),
        bounds in arb_bounds(),
    ) {
        let expected = identity_set(&brute_force(&cities, &bounds));
        for kind in StrategyKind::ALL {
            let found = kind.find_cities(&cities, &bounds).unwrap();
            prop_assert_eq!(identity_set(&found), expected.clone(), "strategy {}", kind);
        }
    }

    /// Cities snapped to a coarse grid give many exact coordinate ties.
    #[test]
    fn prop_strategies_agree_with_ties(
        cells in prop::collection::vec((-4i32..=4, -4i32..=4), 0..80),
        bounds in (-5i32..5, -5i32..5, -5i32..5, -5i32..5),
    ) {
        let cities: Vec<City> = cells
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| {
                City::new(format!("c{}", i), *lat as f64 * 10.0, *lon as f64 * 10.0).unwrap()
            })
            .collect();
        let (a, b, c, d) = bounds;
        let bounds = BoundingBox::new(a as f64 * 10.0, b as f64 * 10.0, c as f64 * 10.0, d as f64 * 10.0);

        let expected = identity_set(&brute_force(&cities, &bounds));
        for kind in StrategyKind::ALL {
            let found = kind.find_cities(&cities, &bounds).unwrap();
            prop_assert_eq!(identity_set(&found), expected.clone(), "strategy {}", kind);
        }
    }
}

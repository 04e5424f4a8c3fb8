//! Placement properties on the built-in maps.

use approx::assert_relative_eq;
use rachana::config::PlacementConfig;
use rachana::map::{BuiltinMaps, LaneSampler, MapSource, TileMap};
use rachana::placement::{PlacementParams, place_robots};
use rachana::rng::ScenarioRng;

fn builtin(name: &str) -> TileMap {
    let text = BuiltinMaps::new().load_map_description(name).unwrap();
    TileMap::from_yaml(&text).unwrap().relabel_surface()
}

#[test]
fn test_base_poses_are_separated() {
    let map = builtin("4way");
    let params = PlacementParams::from_config(&PlacementConfig::default(), 4);

    for seed in 0..20 {
        let mut rng = ScenarioRng::new(seed);
        let placed = place_robots(&map, &LaneSampler, &params, &mut rng).unwrap();
        assert_eq!(placed.len(), 4);
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(
                    a.base.distance_to(b.base) >= params.min_dist,
                    "seed {}: {:?} vs {:?}",
                    seed,
                    a.base,
                    b.base
                );
            }
        }
    }
}

#[test]
fn test_jitter_is_bounded_and_lateral() {
    let map = builtin("loop_empty");
    let config = PlacementConfig::default();
    let params = PlacementParams::from_config(&config, 3);

    for seed in 0..20 {
        let mut rng = ScenarioRng::new(seed);
        for placement in place_robots(&map, &LaneSampler, &params, &mut rng).unwrap() {
            let j = placement.jitter();
            assert_relative_eq!(j.x, 0.0, epsilon = 1e-9);
            assert!(j.y.abs() <= config.dist_tol_m + 1e-9);
            assert!(j.theta.abs() <= config.theta_tol_rad() + 1e-9);
        }
    }
}

#[test]
fn test_straight_only_poses_lie_on_straight_tiles() {
    let map = builtin("straight_road");
    let params = PlacementParams::from_config(&PlacementConfig::default(), 3);
    let mut rng = ScenarioRng::new(9);
    let (width, _) = map.extent();

    for placement in place_robots(&map, &LaneSampler, &params, &mut rng).unwrap() {
        // Middle row, right-hand lane of an east/west road
        let row_center = map.tile_center(1, 0)[1];
        let offset = (placement.base.y - row_center).abs();
        assert_relative_eq!(offset, 0.25 * map.tile_size, epsilon = 1e-9);
        assert!(placement.base.x >= 0.0 && placement.base.x <= width);
    }
}

#[test]
fn test_relabel_is_idempotent_on_builtin_maps() {
    let maps = BuiltinMaps::new();
    for name in maps.available_maps() {
        let map = TileMap::from_yaml(&maps.load_map_description(&name).unwrap()).unwrap();
        let once = map.relabel_surface();
        assert_eq!(once.relabel_surface(), once, "map {}", name);
    }
}

//! Test utilities for Rachana integration tests.

#![allow(dead_code)]

use rachana::map::{BuiltinMaps, LaneSampler};
use rachana::{Config, ScenarioMaker};

/// One map, one scenario, roles ego / npc1 / npc2, no parked robots
pub fn ego_two_npcs() -> Config {
    let mut config = Config::default();
    config.generation.maps = vec!["4way".to_string()];
    config.generation.scenarios_per_map = 1;
    config.placement.min_dist = 0.5;
    config.robots.pcs = vec!["ego".to_string()];
    config.robots.npcs = vec!["npc1".to_string(), "npc2".to_string()];
    config.robots.parked = vec![];
    config
}

/// Scenario maker over the built-in maps with the lane sampler
pub fn builtin_maker(config: Config) -> ScenarioMaker<BuiltinMaps, LaneSampler> {
    ScenarioMaker::new(config, BuiltinMaps::new(), LaneSampler).expect("valid config")
}

/// Drain every pending scenario
pub fn drain(maker: &mut ScenarioMaker<BuiltinMaps, LaneSampler>) -> Vec<rachana::Scenario> {
    std::iter::from_fn(|| maker.next_scenario()).collect()
}

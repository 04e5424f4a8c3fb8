//! Configuration for the Rachana scenario maker
//!
//! Loaded once from a TOML file at startup and read-only afterwards. Every
//! parameter has a default, so a partial file (or no file at all) is valid.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Config
//! ├── GenerationConfig     # maps, scenarios_per_map, accumulate_on_reseed
//! ├── PlacementConfig      # tolerances, min_dist, only_straight, max_attempts
//! ├── RobotsConfig         # pcs, npcs, parked role names
//! ├── DecorationConfig     # count, min_dist, robot_clearance
//! ├── ProtocolsConfig      # optional protocol descriptor per role category
//! ├── MapConfig            # maps_dir, pad_border
//! ├── TransportConfig      # wire_format
//! └── LoggingConfig        # level
//! ```
//!
//! # Default Values
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | maps | ["4way"] |
//! | scenarios_per_map | 1 |
//! | theta_tol_deg | 20° |
//! | dist_tol_m | 0.05 m |
//! | min_dist | 0.5 m |
//! | only_straight | true |
//! | pcs / npcs / parked | ego / npc1..npc3 / parked0 |

use crate::core::deg_to_rad;
use crate::error::{Error, Result};
use crate::protocol::WireFormat;
use crate::scenario::ProtocolDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub decorations: DecorationConfig,
    #[serde(default)]
    pub protocols: ProtocolsConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which maps to use and how many scenarios to draw from each
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Map names, looked up in the map source
    #[serde(default = "default_maps")]
    pub maps: Vec<String>,

    /// Scenario instances generated per map on every seed
    #[serde(default = "default_scenarios_per_map")]
    pub scenarios_per_map: usize,

    /// Append each seed's batch to the pending queue instead of replacing it
    #[serde(default)]
    pub accumulate_on_reseed: bool,
}

fn default_maps() -> Vec<String> {
    vec!["4way".to_string()]
}
fn default_scenarios_per_map() -> usize {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            maps: default_maps(),
            scenarios_per_map: default_scenarios_per_map(),
            accumulate_on_reseed: false,
        }
    }
}

/// Robot placement parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacementConfig {
    /// Heading jitter bound (degrees)
    #[serde(default = "default_theta_tol_deg")]
    pub theta_tol_deg: f64,

    /// Lateral jitter bound (meters)
    #[serde(default = "default_dist_tol_m")]
    pub dist_tol_m: f64,

    /// Minimum separation between base robot poses (meters)
    #[serde(default = "default_min_dist")]
    pub min_dist: f64,

    /// Only place robots on straight road tiles
    #[serde(default = "default_true")]
    pub only_straight: bool,

    /// Candidate draws allowed per scenario before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_theta_tol_deg() -> f64 {
    20.0
}
fn default_dist_tol_m() -> f64 {
    0.05
}
fn default_min_dist() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_max_attempts() -> usize {
    10_000
}

impl PlacementConfig {
    /// Heading jitter bound in radians
    pub fn theta_tol_rad(&self) -> f64 {
        deg_to_rad(self.theta_tol_deg)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            theta_tol_deg: default_theta_tol_deg(),
            dist_tol_m: default_dist_tol_m(),
            min_dist: default_min_dist(),
            only_straight: true,
            max_attempts: default_max_attempts(),
        }
    }
}

/// Role names per category, in placement order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotsConfig {
    /// Player-controlled robots
    #[serde(default = "default_pcs")]
    pub pcs: Vec<String>,

    /// Autonomous non-player robots
    #[serde(default = "default_npcs")]
    pub npcs: Vec<String>,

    /// Stationary robots
    #[serde(default = "default_parked")]
    pub parked: Vec<String>,
}

fn default_pcs() -> Vec<String> {
    vec!["ego".to_string()]
}
fn default_npcs() -> Vec<String> {
    vec!["npc1".to_string(), "npc2".to_string(), "npc3".to_string()]
}
fn default_parked() -> Vec<String> {
    vec!["parked0".to_string()]
}

impl RobotsConfig {
    /// Total number of robots placed per scenario
    pub fn total(&self) -> usize {
        self.pcs.len() + self.npcs.len() + self.parked.len()
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            pcs: default_pcs(),
            npcs: default_npcs(),
            parked: default_parked(),
        }
    }
}

/// Decoration objects scattered over the map after robot placement
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DecorationConfig {
    /// Number of decorations per scenario (0 disables)
    #[serde(default)]
    pub count: usize,

    /// Minimum distance between decorations (meters)
    #[serde(default = "default_decoration_min_dist")]
    pub min_dist: f64,

    /// Minimum distance from any robot (meters)
    #[serde(default = "default_robot_clearance")]
    pub robot_clearance: f64,
}

fn default_decoration_min_dist() -> f64 {
    0.3
}
fn default_robot_clearance() -> f64 {
    0.5
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            count: 0,
            min_dist: default_decoration_min_dist(),
            robot_clearance: default_robot_clearance(),
        }
    }
}

/// Communication protocol attached to robots of each category
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProtocolsConfig {
    #[serde(default)]
    pub player: Option<ProtocolDescriptor>,
    #[serde(default)]
    pub non_player: Option<ProtocolDescriptor>,
    #[serde(default)]
    pub parked: Option<ProtocolDescriptor>,
}

/// Map source and map rewriting options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MapConfig {
    /// Directory of `<name>.yaml` maps. Built-in maps are used when unset.
    #[serde(default)]
    pub maps_dir: Option<String>,

    /// Surround the tile grid with one ring of floor tiles
    #[serde(default)]
    pub pad_border: bool,
}

/// Outer transport options
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransportConfig {
    #[serde(default)]
    pub wire_format: WireFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check cross-field invariants
    pub fn validate(&self) -> Result<()> {
        if self.generation.maps.is_empty() {
            return Err(Error::Config("at least one map is required".into()));
        }

        let p = &self.placement;
        if ![p.theta_tol_deg, p.dist_tol_m, p.min_dist]
            .iter()
            .all(|v| non_negative_finite(*v))
        {
            return Err(Error::Config(format!(
                "tolerances must be finite and non-negative (theta_tol_deg={}, dist_tol_m={}, min_dist={})",
                p.theta_tol_deg, p.dist_tol_m, p.min_dist
            )));
        }
        if p.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be positive".into()));
        }

        let d = &self.decorations;
        if !non_negative_finite(d.min_dist) || !non_negative_finite(d.robot_clearance) {
            return Err(Error::Config(format!(
                "decoration distances must be finite and non-negative (min_dist={}, robot_clearance={})",
                d.min_dist, d.robot_clearance
            )));
        }

        let mut seen = HashSet::new();
        let r = &self.robots;
        for name in r.pcs.iter().chain(&r.npcs).chain(&r.parked) {
            if !seen.insert(name.as_str()) {
                return Err(Error::Config(format!(
                    "robot name \"{}\" appears more than once",
                    name
                )));
            }
        }

        Ok(())
    }
}

fn non_negative_finite(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_file_matches_defaults() {
        let config = Config::from_toml_str(include_str!("../rachana.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(config.generation.maps, defaults.generation.maps);
        assert_eq!(config.robots.total(), defaults.robots.total());
        assert_eq!(config.placement.max_attempts, defaults.placement.max_attempts);
        assert_eq!(config.transport.wire_format, WireFormat::Json);
        assert!(config.protocols.player.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generation.maps, vec!["4way"]);
        assert_eq!(config.generation.scenarios_per_map, 1);
        assert!(!config.generation.accumulate_on_reseed);
        assert_eq!(config.placement.theta_tol_deg, 20.0);
        assert_eq!(config.placement.dist_tol_m, 0.05);
        assert_eq!(config.placement.min_dist, 0.5);
        assert!(config.placement.only_straight);
        assert_eq!(config.robots.pcs, vec!["ego"]);
        assert_eq!(config.robots.npcs, vec!["npc1", "npc2", "npc3"]);
        assert_eq!(config.robots.parked, vec!["parked0"]);
        assert_eq!(config.robots.total(), 5);
        assert_eq!(config.decorations.count, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_theta_converted_to_radians() {
        let config = Config::default();
        assert_relative_eq!(
            config.placement.theta_tol_rad(),
            20.0_f64.to_radians(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_partial_toml() {
        let toml_content = r#"
[generation]
maps = ["loop_empty", "4way"]
scenarios_per_map = 3

[robots]
pcs = ["ego"]
npcs = ["npc1", "npc2"]
parked = []

[protocols.player]
name = "agent"
description = "Player robot control protocol"
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.generation.maps, vec!["loop_empty", "4way"]);
        assert_eq!(config.generation.scenarios_per_map, 3);
        assert_eq!(config.robots.total(), 3);
        // Untouched sections keep their defaults
        assert_eq!(config.placement.min_dist, 0.5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.protocols.player.as_ref().unwrap().name, "agent");
        assert!(config.protocols.non_player.is_none());
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let toml_content = r#"
[robots]
pcs = ["ego"]
npcs = ["npc1", "ego"]
"#;
        let err = Config::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("ego")));
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut config = Config::default();
        config.placement.dist_tol_m = -0.1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_non_finite_tolerances_rejected() {
        for toml_content in [
            "[placement]\ntheta_tol_deg = nan\n",
            "[placement]\ndist_tol_m = inf\n",
            "[placement]\nmin_dist = -inf\n",
            "[decorations]\nmin_dist = nan\n",
            "[decorations]\nrobot_clearance = inf\n",
        ] {
            let result = Config::from_toml_str(toml_content);
            assert!(
                matches!(result, Err(Error::Config(_))),
                "accepted {:?}",
                toml_content
            );
        }
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = Config::default();
        config.placement.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_map_list_rejected() {
        let mut config = Config::default();
        config.generation.maps.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rachana.toml");

        let mut config = Config::default();
        config.generation.scenarios_per_map = 4;
        config.map.pad_border = true;
        config.to_file(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.generation.scenarios_per_map, 4);
        assert!(loaded.map.pad_border);
        assert_eq!(loaded.robots.npcs, config.robots.npcs);
    }
}

//! # Rachana: scenario generator for the robot simulation harness
//!
//! Given a map and a roster of robot roles (player, non-player, parked),
//! Rachana produces scenarios (a map plus non-overlapping, jittered robot
//! start poses) and serves them one at a time over a framed
//! request/response exchange.
//!
//! ## Quick Start
//!
//! ```rust
//! use rachana::{Config, ScenarioMaker};
//! use rachana::map::{BuiltinMaps, LaneSampler};
//!
//! let mut maker = ScenarioMaker::new(Config::default(), BuiltinMaps::new(), LaneSampler)?;
//! maker.on_seed(42)?;
//! while let Some(scenario) = maker.next_scenario() {
//!     println!("{}: {} robots", scenario.scenario_name, scenario.robots.len());
//! }
//! # Ok::<(), rachana::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: planar poses and angle helpers
//! - [`map`]: map sources, tile map rewrites, single-robot lane sampling
//! - [`placement`]: rejection sampling of separated robot poses and decorations
//! - [`scenario`]: scenario records and role assignment
//! - [`maker`]: the stateful scenario maker node
//! - [`protocol`]: messages, wire framing and the node host loop
//!
//! ## Coordinate Frame
//!
//! ROS REP-103: X-forward, Y-left, counter-clockwise positive rotation.

pub mod config;
pub mod core;
pub mod error;
pub mod maker;
pub mod map;
pub mod placement;
pub mod protocol;
pub mod rng;
pub mod scenario;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use maker::{NodeState, ScenarioMaker};
pub use scenario::Scenario;

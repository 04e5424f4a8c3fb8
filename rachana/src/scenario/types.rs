//! Scenario value types sent to the simulator.

use crate::core::{Pose2D, Twist2D};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role category of a robot in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    /// Controlled by an external agent
    Player,
    /// Autonomous, driven by the simulator
    NonPlayer,
    /// Stationary
    Parked,
}

impl RoleCategory {
    /// Motion intent of robots in this category (none for player robots)
    pub fn motion(self) -> Option<MotionIntent> {
        match self {
            RoleCategory::Player => None,
            RoleCategory::NonPlayer => Some(MotionIntent::Moving),
            RoleCategory::Parked => Some(MotionIntent::Parked),
        }
    }

    /// Human-readable description of a robot with this role
    pub fn describe(self, robot_name: &str) -> String {
        match self {
            RoleCategory::Player => format!("Playable robot {}", robot_name),
            RoleCategory::NonPlayer => format!("NPC robot {}", robot_name),
            RoleCategory::Parked => format!("Parked robot {}", robot_name),
        }
    }
}

/// What a non-player robot does once the simulation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionIntent {
    Moving,
    Parked,
}

/// Communication protocol spoken by a robot's controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Initial state of a robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotConfiguration {
    pub pose: Pose2D,
    pub velocity: Twist2D,
}

/// Placement record of one robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotSpec {
    pub description: String,
    /// Whether an external agent controls this robot
    pub playable: bool,
    pub configuration: RobotConfiguration,
    /// `None` for player robots
    pub motion: Option<MotionIntent>,
    pub category: RoleCategory,
    pub protocol: Option<ProtocolDescriptor>,
}

/// One self-contained simulation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// `<map>-<index>`
    pub scenario_name: String,
    /// Map description (YAML) after rewriting and decoration
    pub environment: String,
    /// Robot name → placement record
    pub robots: BTreeMap<String, RobotSpec>,
}

impl Scenario {
    /// Names of robots in a given category
    pub fn robots_in(&self, category: RoleCategory) -> impl Iterator<Item = &str> {
        self.robots
            .iter()
            .filter(move |(_, spec)| spec.category == category)
            .map(|(name, _)| name.as_str())
    }
}

//! Partition placed poses across robot roles.
//!
//! Poses arrive in acceptance order and are consumed contiguously:
//!
//! ```text
//! poses:  [ p0 .. p(P-1) | pP .. p(P+K-1) | p(P+K) .. p(P+K+M-1) ]
//!           player roles   non-player roles  parked roles
//! ```

use super::types::{RobotConfiguration, RobotSpec, RoleCategory, Scenario};
use crate::config::{ProtocolsConfig, RobotsConfig};
use crate::core::{Pose2D, Twist2D};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Name of the `index`-th scenario drawn from `map_name`
pub fn scenario_name(map_name: &str, index: usize) -> String {
    format!("{}-{}", map_name, index)
}

/// Build one scenario from poses in acceptance order.
///
/// Fails with [`Error::Inconsistent`] if the pose count differs from the
/// total number of configured robots.
pub fn assemble_scenario(
    scenario_name: String,
    environment: String,
    robots: &RobotsConfig,
    protocols: &ProtocolsConfig,
    poses: &[Pose2D],
) -> Result<Scenario> {
    if poses.len() != robots.total() {
        return Err(Error::Inconsistent(format!(
            "{} poses for {} robots in scenario {}",
            poses.len(),
            robots.total(),
            scenario_name
        )));
    }

    let groups = [
        (RoleCategory::Player, &robots.pcs, &protocols.player),
        (RoleCategory::NonPlayer, &robots.npcs, &protocols.non_player),
        (RoleCategory::Parked, &robots.parked, &protocols.parked),
    ];

    let mut specs = BTreeMap::new();
    let mut remaining = poses;
    for (category, names, protocol) in groups {
        let (group_poses, rest) = remaining.split_at(names.len());
        remaining = rest;

        for (name, pose) in names.iter().zip(group_poses) {
            let spec = RobotSpec {
                description: category.describe(name),
                playable: category == RoleCategory::Player,
                configuration: RobotConfiguration {
                    pose: *pose,
                    velocity: Twist2D::zero(),
                },
                motion: category.motion(),
                category,
                protocol: protocol.clone(),
            };
            if specs.insert(name.clone(), spec).is_some() {
                return Err(Error::Inconsistent(format!(
                    "robot name \"{}\" assigned twice",
                    name
                )));
            }
        }
    }

    Ok(Scenario {
        scenario_name,
        environment,
        robots: specs,
    })
}

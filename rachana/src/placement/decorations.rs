//! Decoration objects scattered around placed robots

use super::far_enough;
use crate::config::DecorationConfig;
use crate::core::Pose2D;
use crate::core::math::rad_to_deg;
use crate::error::{Error, Result};
use crate::map::{MapObject, TileMap};
use crate::rng::ScenarioRng;
use std::collections::BTreeMap;

/// Object kind written for each decoration
pub const DECORATION_KIND: &str = "duckie";

/// Height of a decoration object (meters)
const DECORATION_HEIGHT: f64 = 0.08;

/// Parameters for decoration placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationParams {
    pub count: usize,
    pub min_dist: f64,
    pub robot_clearance: f64,
    pub max_attempts: usize,
}

impl DecorationParams {
    pub fn from_config(config: &DecorationConfig, max_attempts: usize) -> Self {
        Self {
            count: config.count,
            min_dist: config.min_dist,
            robot_clearance: config.robot_clearance,
            max_attempts,
        }
    }
}

/// Return a copy of `map` with `params.count` decorations added.
///
/// Positions are uniform over the map extent, at least `min_dist` from each
/// other and `robot_clearance` from every robot. The input map is not
/// modified; with a zero count the copy is identical.
pub fn place_decorations(
    map: &TileMap,
    robots: &[Pose2D],
    params: &DecorationParams,
    rng: &mut ScenarioRng,
) -> Result<TileMap> {
    let mut out = map.clone();
    if params.count == 0 {
        return Ok(out);
    }

    let (width, height) = map.extent();
    let mut placed: Vec<Pose2D> = Vec::with_capacity(params.count);
    let mut attempts = 0;

    while placed.len() < params.count {
        if attempts >= params.max_attempts {
            return Err(Error::PlacementInfeasible {
                placed: placed.len(),
                requested: params.count,
                attempts,
            });
        }
        attempts += 1;

        let candidate = Pose2D::new(
            rng.uniform(0.0, width),
            rng.uniform(0.0, height),
            rng.uniform(-std::f64::consts::PI, std::f64::consts::PI),
        );
        if far_enough(robots, candidate, params.robot_clearance)
            && far_enough(&placed, candidate, params.min_dist)
        {
            placed.push(candidate);
        }
    }

    out.objects.extend(placed.iter().map(|p| MapObject {
        kind: DECORATION_KIND.to_string(),
        pos: [p.x / map.tile_size, p.y / map.tile_size],
        rotate: rad_to_deg(p.theta),
        height: Some(DECORATION_HEIGHT),
        extra: BTreeMap::new(),
    }));

    log::debug!("Placed {} decorations in {} attempts", placed.len(), attempts);
    Ok(out)
}

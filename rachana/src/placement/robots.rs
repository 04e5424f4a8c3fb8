//! Robot start pose placement

use super::far_enough;
use crate::config::PlacementConfig;
use crate::core::Pose2D;
use crate::error::{Error, Result};
use crate::map::{PoseSampler, TileMap};
use crate::rng::ScenarioRng;

/// Parameters for one placement run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Number of poses to produce
    pub count: usize,
    /// Minimum distance between base poses (meters)
    pub min_dist: f64,
    /// Heading jitter bound (radians)
    pub theta_tol_rad: f64,
    /// Lateral jitter bound (meters)
    pub lateral_tol_m: f64,
    /// Restrict candidates to straight road tiles
    pub only_straight: bool,
    /// Candidate draws allowed before reporting infeasibility
    pub max_attempts: usize,
}

impl PlacementParams {
    pub fn from_config(config: &PlacementConfig, count: usize) -> Self {
        Self {
            count,
            min_dist: config.min_dist,
            theta_tol_rad: config.theta_tol_rad(),
            lateral_tol_m: config.dist_tol_m,
            only_straight: config.only_straight,
            max_attempts: config.max_attempts,
        }
    }
}

/// One accepted robot placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Pose as drawn by the sampler, used for the separation test
    pub base: Pose2D,
    /// Final pose after jitter
    pub pose: Pose2D,
}

impl Placement {
    /// Jitter applied to the base pose: `base⁻¹ ∘ pose`
    pub fn jitter(&self) -> Pose2D {
        self.base.relative_to(self.pose)
    }
}

/// Pure lateral shift plus heading rotation
#[inline]
pub fn jitter_transform(lateral: f64, theta: f64) -> Pose2D {
    Pose2D::from_translation_angle([0.0, lateral], theta)
}

/// Draw `params.count` mutually separated, jittered robot poses.
///
/// Placements are returned in acceptance order; callers assign roles from
/// that order. Fails with [`Error::PlacementInfeasible`] once
/// `params.max_attempts` candidates have been drawn without completing.
pub fn place_robots<S: PoseSampler + ?Sized>(
    map: &TileMap,
    sampler: &S,
    params: &PlacementParams,
    rng: &mut ScenarioRng,
) -> Result<Vec<Placement>> {
    let mut placements: Vec<Placement> = Vec::with_capacity(params.count);
    let mut attempts = 0;

    while placements.len() < params.count {
        if attempts >= params.max_attempts {
            log::warn!(
                "Placement gave up: {}/{} robots after {} attempts (min_dist={})",
                placements.len(),
                params.count,
                attempts,
                params.min_dist
            );
            return Err(Error::PlacementInfeasible {
                placed: placements.len(),
                requested: params.count,
                attempts,
            });
        }
        attempts += 1;

        let candidate = sampler.sample_candidate(map, params.only_straight, rng)?;
        if !far_enough(placements.iter().map(|p| &p.base), candidate, params.min_dist) {
            continue;
        }

        let theta = rng.symmetric(params.theta_tol_rad);
        let lateral = rng.symmetric(params.lateral_tol_m);
        placements.push(Placement {
            base: candidate,
            pose: candidate * jitter_transform(lateral, theta),
        });
    }

    log::debug!(
        "Placed {} robots in {} attempts",
        placements.len(),
        attempts
    );
    Ok(placements)
}

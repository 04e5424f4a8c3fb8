//! Rejection-sampling placement of mutually separated poses.
//!
//! ```text
//! candidate ← sampler ──► far enough from every accepted base pose?
//!                          │ no: redraw (counts against max_attempts)
//!                          ▼ yes
//!                jitter: base ∘ (0, δy, δθ) ──► accepted
//! ```
//!
//! The separation test runs on base poses; jitter is applied after
//! acceptance and may bring two robots slightly closer than `min_dist`.

mod decorations;
mod robots;

pub use decorations::{DECORATION_KIND, DecorationParams, place_decorations};
pub use robots::{Placement, PlacementParams, jitter_transform, place_robots};

use crate::core::Pose2D;

/// Whether `candidate` is at least `min_dist` from every pose in `accepted`
pub fn far_enough<'a, I>(accepted: I, candidate: Pose2D, min_dist: f64) -> bool
where
    I: IntoIterator<Item = &'a Pose2D>,
{
    accepted
        .into_iter()
        .all(|p| p.distance_to(candidate) >= min_dist)
}

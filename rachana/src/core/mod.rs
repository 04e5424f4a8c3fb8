//! Planar geometry used by placement.
//!
//! - [`Pose2D`]: rigid transform in SE(2) (position + heading)
//! - [`Twist2D`]: planar velocity attached to a robot configuration
//! - [`math`]: angle helpers

pub mod math;
mod pose;

pub use math::{deg_to_rad, normalize_angle};
pub use pose::{Pose2D, Twist2D};

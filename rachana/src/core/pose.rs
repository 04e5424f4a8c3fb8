//! 2D pose type for robot start placements.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use super::math::{angle_diff, normalize_angle};
use serde::{Deserialize, Serialize};

/// A 2D pose: an element of the plane isometry group SE(2).
///
/// Uses the ROS REP-103 coordinate convention:
/// - Position: (x, y) in meters
/// - Theta: heading angle in radians, counter-clockwise from X-axis
///
/// # Composition
///
/// Poses compose with `*` (apply the right operand in the left operand's frame):
/// ```
/// use rachana::core::Pose2D;
///
/// let pose_a = Pose2D::new(1.0, 0.0, std::f64::consts::FRAC_PI_2);
/// let pose_b = Pose2D::new(1.0, 0.0, 0.0);
/// let combined = pose_a * pose_b;
/// assert!((combined.y - 1.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f64,
    /// Y position in meters.
    pub y: f64,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose. Theta is normalized to [-π, π).
    #[inline]
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Create a pose from a translation vector and a heading.
    #[inline]
    pub fn from_translation_angle(t: [f64; 2], theta: f64) -> Self {
        Self::new(t[0], t[1], theta)
    }

    /// Translation component.
    #[inline]
    pub fn translation(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Rotation component.
    #[inline]
    pub fn angle(self) -> f64 {
        self.theta
    }

    /// Transform a point from this pose's local frame to the world frame.
    #[inline]
    pub fn transform_point(self, point: [f64; 2]) -> [f64; 2] {
        let (sin, cos) = self.theta.sin_cos();
        [
            self.x + point[0] * cos - point[1] * sin,
            self.y + point[0] * sin + point[1] * cos,
        ]
    }

    /// Compose this pose with another (chain transformations).
    ///
    /// Equivalent to the matrix product `self * other`.
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let [x, y] = self.transform_point(other.translation());
        Self::new(x, y, self.theta + other.theta)
    }

    /// Compute the inverse of this pose.
    ///
    /// `pose.compose(pose.inverse()) ≈ Pose2D::identity()`
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// Relative pose from `self` to `other`: `self.inverse() * other`.
    #[inline]
    pub fn relative_to(self, other: Pose2D) -> Self {
        self.inverse().compose(other)
    }

    /// Planar distance between two poses.
    ///
    /// Norm of the translation of `self⁻¹ ∘ other`, which equals the
    /// Euclidean distance between the two positions.
    #[inline]
    pub fn distance_to(self, other: Pose2D) -> f64 {
        let [dx, dy] = self.relative_to(other).translation();
        dx.hypot(dy)
    }

    /// Check if this pose is approximately equal to another.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f64, angle_epsilon: f64) -> bool {
        (self.x - other.x).abs() <= pos_epsilon
            && (self.y - other.y).abs() <= pos_epsilon
            && angle_diff(self.theta, other.theta).abs() <= angle_epsilon
    }
}

impl std::ops::Mul for Pose2D {
    type Output = Self;

    /// Compose two poses (same as `compose`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

/// Planar velocity (linear vector + angular rate) in the body frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Twist2D {
    /// Linear velocity [vx, vy] in m/s
    pub linear: [f64; 2],
    /// Angular velocity in rad/s
    pub angular: f64,
}

impl Twist2D {
    /// Build a twist from linear and angular components.
    #[inline]
    pub const fn from_linear_angular(linear: [f64; 2], angular: f64) -> Self {
        Self { linear, angular }
    }

    /// Robot at rest.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_linear_angular([0.0, 0.0], 0.0)
    }
}

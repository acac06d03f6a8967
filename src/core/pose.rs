//! 2D pose type for robot position and orientation.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use serde::{Deserialize, Serialize};

use super::math::{angle_diff, normalize_angle};
use super::point::Point2D;

/// A 2D pose representing position and orientation.
///
/// - Position: (x, y) in meters
/// - Theta: heading angle in radians, counter-clockwise from the X axis
///
/// The planner's metric is purely linear: `theta` is carried along as
/// payload and never enters distance computations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    ///
    /// # Arguments
    /// * `x` - X position in meters
    /// * `y` - Y position in meters
    /// * `theta` - Heading angle in radians (will be normalized to [-π, π))
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create a pose at a position, facing forward (theta 0).
    #[inline]
    pub fn from_position(position: Point2D) -> Self {
        Self::new(position.x, position.y, 0.0)
    }

    /// Get the position as a Point2D.
    #[inline]
    pub fn position(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Euclidean distance between the positions of two poses.
    ///
    /// This is the planner's metric; heading does not contribute.
    #[inline]
    pub fn linear_distance(self, other: Pose2D) -> f32 {
        self.position().distance(other.position())
    }

    /// Direction angle from this pose's position to another's
    /// (radians, CCW from +X).
    #[inline]
    pub fn angle_to(self, other: Pose2D) -> f32 {
        self.position().angle_to(other.position())
    }

    /// Check if this pose is approximately equal to another.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f32, angle_epsilon: f32) -> bool {
        (self.x - other.x).abs() <= pos_epsilon
            && (self.y - other.y).abs() <= pos_epsilon
            && angle_diff(self.theta, other.theta).abs() <= angle_epsilon
    }
}

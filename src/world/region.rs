//! Polygonal free-space region with inflation-based erosion.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

use super::polygon::Polygon2D;
use super::WorldError;

/// The collision region of a planar world.
///
/// Free space is the boundary footprint eroded by `inflation_radius`
/// with contained obstacle sub-footprints (also grown by the same
/// radius) subtracted. Erosion is realized as a clearance test against
/// the boundary and obstacle segments rather than by constructing
/// offset polygons; the two formulations are equivalent for point
/// queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanarRegion {
    boundary: Polygon2D,
    obstacles: Vec<Polygon2D>,
    inflation_radius: f32,
}

impl PlanarRegion {
    /// Create a region from its outer footprint.
    ///
    /// # Arguments
    /// * `boundary` - Outer footprint polygon
    /// * `inflation_radius` - Robot radius used to erode free space
    pub fn new(boundary: Polygon2D, inflation_radius: f32) -> Self {
        Self {
            boundary,
            obstacles: Vec::new(),
            inflation_radius,
        }
    }

    /// Add an obstacle sub-footprint, builder style.
    pub fn with_obstacle(mut self, obstacle: Polygon2D) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Add an obstacle sub-footprint.
    pub fn add_obstacle(&mut self, obstacle: Polygon2D) {
        self.obstacles.push(obstacle);
    }

    /// Outer footprint polygon.
    pub fn boundary(&self) -> &Polygon2D {
        &self.boundary
    }

    /// Obstacle sub-footprints.
    pub fn obstacles(&self) -> &[Polygon2D] {
        &self.obstacles
    }

    /// Inflation radius eroding free space.
    pub fn inflation_radius(&self) -> f32 {
        self.inflation_radius
    }

    /// Check that this region can support sampling and queries.
    ///
    /// # Errors
    /// Returns [`WorldError::DegenerateRegion`] when the boundary has
    /// fewer than three vertices, an obstacle does, or the inflation
    /// radius is negative.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.boundary.vertices().len() < 3 {
            return Err(WorldError::DegenerateRegion(format!(
                "boundary has {} vertices, need at least 3",
                self.boundary.vertices().len()
            )));
        }
        if let Some(obs) = self.obstacles.iter().find(|o| o.vertices().len() < 3) {
            return Err(WorldError::DegenerateRegion(format!(
                "obstacle has {} vertices, need at least 3",
                obs.vertices().len()
            )));
        }
        if self.inflation_radius < 0.0 {
            return Err(WorldError::DegenerateRegion(format!(
                "inflation radius {} is negative",
                self.inflation_radius
            )));
        }
        Ok(())
    }

    /// Check whether a point lies in the eroded free space.
    pub fn is_point_free(&self, point: Point2D) -> bool {
        if !self.boundary.contains(point) {
            return false;
        }
        if self.inflation_radius > 0.0
            && self.boundary.distance_to_boundary(point) < self.inflation_radius
        {
            return false;
        }
        for obstacle in &self.obstacles {
            if obstacle.contains(point) {
                return false;
            }
            if self.inflation_radius > 0.0
                && obstacle.distance_to_boundary(point) < self.inflation_radius
            {
                return false;
            }
        }
        true
    }

    /// Axis-aligned bounding box of the footprint.
    pub fn bounding_box(&self) -> (Point2D, Point2D) {
        self.boundary.bounding_box()
    }
}

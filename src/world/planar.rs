//! Default planar world: seeded rejection sampler over a polygonal region.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::core::math::TWO_PI;
use crate::core::{Point2D, Pose2D};

use super::region::PlanarRegion;
use super::{World, WorldError};

/// Configuration for [`PlanarWorld`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanarWorldConfig {
    /// Rejection attempts before the sampler reports free space as
    /// exhausted.
    #[serde(default = "defaults::max_sample_attempts")]
    pub max_sample_attempts: usize,

    /// Step width for sampling along a segment during path collision
    /// checks (meters).
    #[serde(default = "defaults::collision_check_step")]
    pub collision_check_step: f32,

    /// Random seed for deterministic sampling (0 for OS entropy).
    #[serde(default)]
    pub seed: u64,
}

impl Default for PlanarWorldConfig {
    fn default() -> Self {
        Self {
            max_sample_attempts: defaults::max_sample_attempts(),
            collision_check_step: defaults::collision_check_step(),
            seed: 0,
        }
    }
}

impl PlanarWorldConfig {
    /// Set the sampler seed, builder style.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the collision check step width, builder style.
    pub fn with_collision_check_step(mut self, step: f32) -> Self {
        self.collision_check_step = step;
        self
    }
}

mod defaults {
    pub fn max_sample_attempts() -> usize {
        1000
    }

    pub fn collision_check_step() -> f32 {
        0.05
    }
}

/// A 2D world of polygonal obstacles implementing [`World`].
///
/// Free poses are drawn by rejection sampling inside the region's
/// bounding box; segment collision checks sample the segment at a
/// fixed step width.
#[derive(Clone, Debug)]
pub struct PlanarWorld {
    region: PlanarRegion,
    config: PlanarWorldConfig,
    rng: StdRng,
}

impl PlanarWorld {
    /// Create a world over a region.
    pub fn new(region: PlanarRegion, config: PlanarWorldConfig) -> Self {
        let rng = if config.seed == 0 {
            StdRng::from_os_rng()
        } else {
            StdRng::seed_from_u64(config.seed)
        };
        Self {
            region,
            config,
            rng,
        }
    }

    /// Create a world with default configuration.
    pub fn with_defaults(region: PlanarRegion) -> Self {
        Self::new(region, PlanarWorldConfig::default())
    }

    /// The underlying region.
    pub fn region(&self) -> &PlanarRegion {
        &self.region
    }

    /// Restart the sampler stream from a seed.
    ///
    /// Two worlds (or one world reseeded between calls) produce the
    /// same sample sequence for the same seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl World for PlanarWorld {
    fn sample_free_pose_uniform(&mut self) -> Result<Pose2D, WorldError> {
        let (min, max) = self.region.bounding_box();
        let width = max.x - min.x;
        let height = max.y - min.y;

        for _ in 0..self.config.max_sample_attempts {
            let x = min.x + self.rng.random::<f32>() * width;
            let y = min.y + self.rng.random::<f32>() * height;
            if self.region.is_point_free(Point2D::new(x, y)) {
                let theta = -PI + self.rng.random::<f32>() * TWO_PI;
                return Ok(Pose2D::new(x, y, theta));
            }
        }

        Err(WorldError::FreeSpaceExhausted {
            attempts: self.config.max_sample_attempts,
        })
    }

    fn is_pose_collision_free(&self, pose: Pose2D) -> Result<bool, WorldError> {
        Ok(self.region.is_point_free(pose.position()))
    }

    fn is_path_collision_free(&self, from: Pose2D, to: Pose2D) -> Result<bool, WorldError> {
        let a = from.position();
        let b = to.position();
        let length = a.distance(b);

        if length < 1e-3 {
            return Ok(self.region.is_point_free(a));
        }

        let num_samples = (length / self.config.collision_check_step).ceil().max(2.0) as usize;
        for k in 0..=num_samples {
            let t = k as f32 / num_samples as f32;
            let sample = a + (b - a) * t;
            if !self.region.is_point_free(sample) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

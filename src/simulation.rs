//! Synthetic velocity measurements.
//!
//! An object moving with a constant true velocity is observed by a velocity sensor with zero mean Gaussian noise on
//! each axis. The random source is supplied by the caller so a seeded generator reproduces a run exactly.

use nalgebra::Vector2;
use rand_core::RngCore;
use rand_distr::{Distribution, Normal};

use crate::error::FilterError;

/// A noisy sensor observing a constant velocity.
#[derive(Debug, Clone, Copy)]
pub struct VelocitySensor {
    velocity: Vector2<f64>,
    noise: Normal<f64>,
}

impl VelocitySensor {
    /// Sensor observing the true velocity (vx, vy) with noise standard deviation `noise_std` on each axis.
    pub fn new(vx: f64, vy: f64, noise_std: f64) -> Result<VelocitySensor, FilterError> {
        let noise = Normal::new(0.0, noise_std)
            .map_err(|e| FilterError::InvalidConfiguration(format!("sensor noise: {}", e)))?;
        Ok(VelocitySensor {
            velocity: Vector2::new(vx, vy),
            noise,
        })
    }

    /// The true velocity.
    pub fn velocity(&self) -> &Vector2<f64> {
        &self.velocity
    }

    /// A single measurement [dx, dy].
    pub fn sample<R: RngCore + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        Vector2::new(
            self.velocity[0] + self.noise.sample(rng),
            self.velocity[1] + self.noise.sample(rng),
        )
    }

    /// `m` measurements in time order.
    pub fn measurements<R: RngCore + ?Sized>(&self, rng: &mut R, m: usize) -> Vec<Vector2<f64>> {
        (0..m).map(|_| self.sample(rng)).collect()
    }
}

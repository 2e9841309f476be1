//! Configuration of the constant velocity filter.
//!
//! The time step and noise parameters are fixed for the lifetime of a filter. The initial estimate defaults to a
//! state at rest at the origin about which nothing is known, a large variance on every state.

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Initial variance of each state when none is configured.
pub const DEFAULT_INITIAL_VARIANCE: f64 = 1000.0;

/// Parameters of a [`CvFilter`](../engine/struct.CvFilter.html).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvConfig {
    /// Time step between filter steps, > 0
    pub dt: f64,
    /// Acceleration noise standard deviation, > 0
    pub process_noise_std: f64,
    /// Observation noise standard deviation of the x and y velocity, >= 0
    pub measurement_noise_std: [f64; 2],
    /// Initial state [x, y, dx, dy]
    #[serde(default)]
    pub initial_state: [f64; 4],
    /// Initial variance of each state
    #[serde(default = "default_covariance_diagonal")]
    pub initial_covariance_diagonal: [f64; 4],
}

fn default_covariance_diagonal() -> [f64; 4] {
    [DEFAULT_INITIAL_VARIANCE; 4]
}

impl CvConfig {
    /// Configuration with the default initial estimate.
    pub fn new(dt: f64, process_noise_std: f64, measurement_noise_std: [f64; 2]) -> Self {
        CvConfig {
            dt,
            process_noise_std,
            measurement_noise_std,
            initial_state: [0.0; 4],
            initial_covariance_diagonal: default_covariance_diagonal(),
        }
    }

    pub fn with_initial_state(mut self, initial_state: [f64; 4]) -> Self {
        self.initial_state = initial_state;
        self
    }

    pub fn with_initial_covariance_diagonal(mut self, initial_covariance_diagonal: [f64; 4]) -> Self {
        self.initial_covariance_diagonal = initial_covariance_diagonal;
        self
    }

    /// Checks the parameters describe a usable filter.
    ///
    /// A zero measurement noise is accepted, it describes an exactly known velocity channel.
    pub fn validate(&self) -> Result<(), FilterError> {
        // NaN fails every comparison, so the conditions are written to reject it.
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(invalid(format!("dt must be positive and finite, got {}", self.dt)));
        }
        if !(self.process_noise_std > 0.0 && self.process_noise_std.is_finite()) {
            return Err(invalid(format!(
                "process_noise_std must be positive and finite, got {}",
                self.process_noise_std
            )));
        }
        for (i, std) in self.measurement_noise_std.iter().enumerate() {
            if !(*std >= 0.0 && std.is_finite()) {
                return Err(invalid(format!(
                    "measurement_noise_std[{}] must be non-negative and finite, got {}",
                    i, std
                )));
            }
        }
        for (i, x) in self.initial_state.iter().enumerate() {
            if !x.is_finite() {
                return Err(invalid(format!("initial_state[{}] must be finite, got {}", i, x)));
            }
        }
        for (i, var) in self.initial_covariance_diagonal.iter().enumerate() {
            if !(*var >= 0.0 && var.is_finite()) {
                return Err(invalid(format!(
                    "initial_covariance_diagonal[{}] must be non-negative and finite, got {}",
                    i, var
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> FilterError {
    FilterError::InvalidConfiguration(message)
}

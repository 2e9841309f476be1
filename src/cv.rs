#![allow(non_snake_case)]

//! Constant velocity model.
//!
//! The state is x = [x, y, dx, dy]. Over a time step dt the position advances by the velocity and the velocity is
//! unchanged:
//!
//! ```text
//! x(k+1) = x(k) + dx(k).dt
//! y(k+1) = y(k) + dy(k).dt
//! dx(k+1) = dx(k)
//! dy(k+1) = dy(k)
//! ```
//!
//! An unknown acceleration disturbance with standard deviation sigma_a enters every state through the coupling
//! G = [dt^2/2, dt^2/2, dt, dt]', giving the process noise Q = G.G'.sigma_a^2.
//! The velocities are observed directly with independent noise on each channel.

use na::{Matrix2x4, Matrix4, U2, U4, Vector1, Vector2, Vector4};
use nalgebra as na;

use crate::config::CvConfig;
use crate::models::{LinearObserveModel, LinearPredictModel};
use crate::noise::{CorrelatedNoise, CoupledNoise, UncorrelatedNoise};

/// The fixed matrices of a constant velocity filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CvModel {
    /// Time step
    pub dt: f64,
    /// Dynamics, A
    pub predict: LinearPredictModel<f64, U4>,
    /// Process noise, Q
    pub predict_noise: CorrelatedNoise<f64, U4>,
    /// Observation of the velocities, H
    pub observe: LinearObserveModel<f64, U4, U2>,
    /// Observation noise, R
    pub observe_noise: CorrelatedNoise<f64, U2>,
}

impl CvModel {
    pub fn new(dt: f64, process_noise_std: f64, measurement_noise_std: [f64; 2]) -> CvModel {
        let coupled = CoupledNoise {
            q: Vector1::new(process_noise_std * process_noise_std),
            G: Self::noise_coupling(dt),
        };
        let uncorrelated = UncorrelatedNoise {
            q: Vector2::new(
                measurement_noise_std[0] * measurement_noise_std[0],
                measurement_noise_std[1] * measurement_noise_std[1],
            ),
        };

        CvModel {
            dt,
            predict: LinearPredictModel {
                Fx: Self::transition(dt),
            },
            predict_noise: CorrelatedNoise::from_coupled(&coupled),
            observe: LinearObserveModel {
                Hx: Self::observation(),
            },
            observe_noise: CorrelatedNoise::from_uncorrelated(&uncorrelated),
        }
    }

    /// The model a configuration describes. The configuration is not validated here.
    pub fn from_config(config: &CvConfig) -> CvModel {
        CvModel::new(config.dt, config.process_noise_std, config.measurement_noise_std)
    }

    /// State transition over `dt`.
    #[rustfmt::skip]
    pub fn transition(dt: f64) -> Matrix4<f64> {
        Matrix4::new(
            1.0, 0.0, dt, 0.0,
            0.0, 1.0, 0.0, dt,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Coupling of an acceleration disturbance into the state over `dt`.
    pub fn noise_coupling(dt: f64) -> Vector4<f64> {
        let half_dt2 = 0.5 * dt * dt;
        Vector4::new(half_dt2, half_dt2, dt, dt)
    }

    /// Selects the velocities from the state.
    #[rustfmt::skip]
    pub fn observation() -> Matrix2x4<f64> {
        Matrix2x4::new(
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

//! The constant velocity Kalman filter engine.
//!
//! A [`CvFilter`] owns its state estimate x and covariance P. Each [`step`](CvFilter::step) consumes one velocity
//! measurement and makes exactly one predict and observe cycle:
//!
//! ```text
//! x = A.x                  P = A.P.A' + Q
//! S = H.P.H' + R           K = P.H'.pinv(S)
//! y = z - H.x
//! x = x + K.y              P = (I - K.H).P
//! ```
//!
//! The updated P is symmetrized and any diagonal element rounded below zero is set to zero.
//!
//! A step is atomic. It either completes and updates x and P together, or it fails and leaves both untouched.
//! Filters share nothing, independent filters may be stepped on different threads.

use na::{Matrix4, Matrix4x2, U4, Vector2, Vector4};
use nalgebra as na;
use tracing::{debug, trace, warn};

use crate::config::CvConfig;
use crate::cv::CvModel;
use crate::error::FilterError;
use crate::models::{KalmanEstimator, KalmanState, LinearObserver, LinearPredictor};

/// Innovation covariance reciprocal condition numbers below this are reported as degenerate.
pub const LIMIT_DEGENERATE: f64 = f64::EPSILON * 1e5;

/// The result of one filter step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    /// Corrected state estimate [x, y, dx, dy]
    pub state: Vector4<f64>,
    /// Diagonal of the corrected covariance, the variance of each state
    pub covariance_diagonal: Vector4<f64>,
    /// Kalman gain applied, one column per observed velocity
    pub gain: Matrix4x2<f64>,
    /// Innovation, the measurement less its prediction
    pub innovation: Vector2<f64>,
    /// Reciprocal condition number of the innovation covariance
    pub innovation_rcond: f64,
}

impl StepOutput {
    /// The gain applied to the innovation of observation channel `channel`.
    pub fn gain_column(&self, channel: usize) -> Vector4<f64> {
        self.gain.column(channel).into_owned()
    }
}

/// Kalman filter for the constant velocity model.
#[derive(Debug, Clone)]
pub struct CvFilter {
    model: CvModel,
    estimate: KalmanState<f64, U4>,
    steps: u64,
}

impl CvFilter {
    /// Constructs a filter. Fails with `InvalidConfiguration` when the configuration is not usable.
    pub fn new(config: CvConfig) -> Result<CvFilter, FilterError> {
        config.validate()?;

        let mut estimate = KalmanState::new_zero(U4);
        estimate.init(&KalmanState {
            x: Vector4::from_column_slice(&config.initial_state),
            X: Matrix4::from_diagonal(&Vector4::from_column_slice(&config.initial_covariance_diagonal)),
        })?;

        debug!(
            dt = config.dt,
            process_noise_std = config.process_noise_std,
            measurement_noise_x = config.measurement_noise_std[0],
            measurement_noise_y = config.measurement_noise_std[1],
            "constant velocity filter constructed"
        );

        Ok(CvFilter {
            model: CvModel::from_config(&config),
            estimate,
            steps: 0,
        })
    }

    /// Predicts forward one time step and observes the velocity measurement `[dx, dy]`.
    ///
    /// Fails with `InvalidMeasurement` if the measurement does not have two finite components.
    pub fn step(&mut self, measurement: &[f64]) -> Result<StepOutput, FilterError> {
        let z = match measurement {
            [dx, dy] if dx.is_finite() && dy.is_finite() => Vector2::new(*dx, *dy),
            [_, _] => return Err(self.reject(format!("non finite measurement {:?}", measurement))),
            _ => {
                return Err(self.reject(format!(
                    "expected 2 components, got {}",
                    measurement.len()
                )))
            }
        };

        let mut next = self.estimate.clone();
        next.predict(&self.model.predict, &self.model.predict_noise)?;

        let innovation = z - &self.model.observe.Hx * &next.x;
        let gain = next.observe_innovation(&self.model.observe, &self.model.observe_noise, &innovation)?;

        if gain.rcond < LIMIT_DEGENERATE {
            debug!(step = self.steps, rcond = gain.rcond, "degenerate innovation covariance");
        }

        self.estimate = next;
        self.steps += 1;
        trace!(
            step = self.steps,
            innovation_x = innovation[0],
            innovation_y = innovation[1],
            "filter step"
        );

        Ok(StepOutput {
            state: self.estimate.x.clone(),
            covariance_diagonal: self.estimate.X.diagonal(),
            gain: gain.W,
            innovation,
            innovation_rcond: gain.rcond,
        })
    }

    /// Steps the filter through a sequence of measurements in order.
    ///
    /// Stops at the first measurement that fails, the steps before it have been made.
    pub fn run<I, M>(&mut self, measurements: I) -> Result<Vec<StepOutput>, FilterError>
    where
        I: IntoIterator<Item = M>,
        M: AsRef<[f64]>,
    {
        measurements
            .into_iter()
            .map(|z| self.step(z.as_ref()))
            .collect()
    }

    /// Current state estimate [x, y, dx, dy].
    pub fn state(&self) -> &Vector4<f64> {
        &self.estimate.x
    }

    /// Current state covariance.
    pub fn covariance(&self) -> &Matrix4<f64> {
        &self.estimate.X
    }

    /// Copy of the current state and covariance.
    pub fn kalman_state(&self) -> KalmanState<f64, U4> {
        self.estimate.clone()
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn model(&self) -> &CvModel {
        &self.model
    }

    fn reject(&self, message: String) -> FilterError {
        warn!(step = self.steps, %message, "measurement rejected");
        FilterError::InvalidMeasurement(message)
    }
}

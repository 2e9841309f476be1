#![allow(non_snake_case)]

//! Bayesian estimation models.
//!
//! State representations are modeled as structs.
//! Common Bayesian discrete system estimation operations are defined as traits.

use na::{allocator::Allocator, DefaultAllocator, Dim, MatrixMN, MatrixN, RealField, VectorN};
use nalgebra as na;

use crate::noise::CorrelatedNoise;

/// Kalman State.
///
/// Linear representation as a state vector and the state covariance (symmetric positive semi-definite) matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct KalmanState<N: RealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// State vector
    pub x: VectorN<N, D>,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: MatrixN<N, D>,
}

/// A state estimator.
///
pub trait Estimator<N: RealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D>,
{
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<VectorN<N, D>, &'static str>;
}

/// A Kalman filter (estimator).
///
/// The linear Kalman state representation x,X is used to represent the system.
pub trait KalmanEstimator<N: RealField, D: Dim>: Estimator<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// Initialise the estimator with a KalmanState.
    ///
    /// Returns the reciprocal condition number of the covariance diagonal.
    fn init(&mut self, state: &KalmanState<N, D>) -> Result<N, &'static str>;

    /// The estimator's estimate of the system's KalmanState.
    ///
    /// Also returns the reciprocal condition number of the covariance diagonal, as `init` does.
    fn kalman_state(&self) -> Result<(N, KalmanState<N, D>), &'static str>;
}

/// A linear predictor.
///
/// Uses a Linear model with additive noise.
pub trait LinearPredictor<N: RealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    /// State prediction with a linear prediction model and additive noise.
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N, D>,
        noise: &CorrelatedNoise<N, D>,
    ) -> Result<(), &'static str>;
}

/// A linear observer with correlated observation noise.
///
/// Uses a Linear observation model with correlated additive observation noise.
pub trait LinearObserver<N: RealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, ZD, D> + Allocator<N, D, ZD> + Allocator<N, ZD, ZD> + Allocator<N, ZD>,
{
    /// Observation given the innovation `s`, the observation less its prediction.
    ///
    /// Returns the gain that was applied.
    fn observe_innovation(
        &mut self,
        obs: &LinearObserveModel<N, D, ZD>,
        noise: &CorrelatedNoise<N, ZD>,
        s: &VectorN<N, ZD>,
    ) -> Result<ObserveGain<N, D, ZD>, &'static str>;
}

/// Linear prediction model.
///
/// Prediction is represented by a state transition matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearPredictModel<N: RealField, D: Dim>
where
    DefaultAllocator: Allocator<N, D, D>,
{
    /// State tramsition matrix
    pub Fx: MatrixN<N, D>,
}

/// Linear observation model.
///
/// Observation is represented by an observation matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearObserveModel<N: RealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, ZD, D>,
{
    /// Observation matrix
    pub Hx: MatrixMN<N, ZD, D>,
}

/// The gain applied by an observation.
#[derive(PartialEq, Clone, Debug)]
pub struct ObserveGain<N: RealField, D: Dim, ZD: Dim>
where
    DefaultAllocator: Allocator<N, D, ZD>,
{
    /// Kalman gain, X.Hx'.inv(S)
    pub W: MatrixMN<N, D, ZD>,
    /// Reciprocal condition number of the innovation covariance S
    pub rcond: N,
}

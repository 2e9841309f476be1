#![allow(non_snake_case)]

//! Covariance state estimation.
//!
//! A discrete Bayesian estimator that uses a Kalman state representation [`KalmanState`] of the system for estimation.
//! The Kalman state is simply the x,X pair the dimensions of both are the dimensions of the system.
//!
//! The observation computes the Kalman gain with the pseudo-inverse of the innovation covariance. A singular
//! innovation covariance, as results from an exactly known observation, gives a finite gain.
//! After the update X is made exactly symmetric and diagonal elements rounded below zero are set to zero.
//!
//! [`KalmanState`]: ../../models/struct.KalmanState.html

use na::storage::Storage;
use na::{allocator::Allocator, DefaultAllocator, Dim, DimDiff, DimMin, DimSub, MatrixN, RealField, VectorN, U1};
use nalgebra as na;

use crate::linalg::{pinv, rcond};
use crate::matrix::{check_non_negativ, symmetrize};
use crate::models::{
    Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearObserver, LinearPredictModel,
    LinearPredictor, ObserveGain,
};
use crate::noise::CorrelatedNoise;

impl<N: RealField, D: Dim> KalmanState<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    pub fn new_zero(d: D) -> KalmanState<N, D> {
        KalmanState {
            x: VectorN::zeros_generic(d, U1),
            X: MatrixN::zeros_generic(d, d),
        }
    }
}

impl<N: RealField, D: Dim> Estimator<N, D> for KalmanState<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    fn state(&self) -> Result<VectorN<N, D>, &'static str> {
        Ok(self.x.clone())
    }
}

impl<N: RealField, D: Dim> KalmanEstimator<N, D> for KalmanState<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    fn init(&mut self, state: &KalmanState<N, D>) -> Result<N, &'static str> {
        let rcond = rcond::rcond_symetric(&state.X);
        check_non_negativ(rcond, "X not PSD")?;

        self.x = state.x.clone();
        self.X = state.X.clone();

        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<(N, KalmanState<N, D>), &'static str> {
        Ok((
            rcond::rcond_symetric(&self.X),
            KalmanState {
                x: self.x.clone(),
                X: self.X.clone(),
            },
        ))
    }
}

impl<N: RealField, D: Dim> LinearPredictor<N, D> for KalmanState<N, D>
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N, D>,
        noise: &CorrelatedNoise<N, D>,
    ) -> Result<(), &'static str> {
        self.x = &pred.Fx * &self.x;
        // X = Fx.X.Fx' + Q
        self.X = &pred.Fx * &self.X * pred.Fx.transpose() + &noise.Q;

        Ok(())
    }
}

impl<N: RealField, D: Dim, ZD> LinearObserver<N, D, ZD> for KalmanState<N, D>
where
    ZD: DimMin<ZD, Output = ZD> + DimSub<U1>,
    DefaultAllocator: Allocator<N, D, D>
        + Allocator<N, ZD, ZD>
        + Allocator<N, ZD, D>
        + Allocator<N, D, ZD>
        + Allocator<N, D>
        + Allocator<N, ZD>
        + Allocator<N, DimDiff<ZD, U1>>,
{
    fn observe_innovation(
        &mut self,
        obs: &LinearObserveModel<N, D, ZD>,
        noise: &CorrelatedNoise<N, ZD>,
        s: &VectorN<N, ZD>,
    ) -> Result<ObserveGain<N, D, ZD>, &'static str> {
        let XHt = &self.X * obs.Hx.transpose();
        // S = Hx.X.Hx' + R
        let S = &obs.Hx * &XHt + &noise.Q;

        // Pseudo-inverse innovation covariance
        let (rcond, SI) = pinv::pseudo_inverse(S)?;

        // Kalman gain, X.Hx'.SI
        let W = XHt * SI;

        // State update
        self.x += &W * s;
        // X = (I - W.Hx).X
        let d = self.X.data.shape().0;
        let IWH = MatrixN::<N, D>::identity_generic(d, d) - &W * &obs.Hx;
        self.X = IWH * &self.X;
        // The product is only symmetric to rounding, badly so when W.Hx projects a channel exactly
        symmetrize(&mut self.X);
        for i in 0..self.X.nrows() {
            if self.X[(i, i)] < N::zero() {
                self.X[(i, i)] = N::zero();
            }
        }

        Ok(ObserveGain { W, rcond })
    }
}

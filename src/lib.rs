//!
//! cv_estimate: constant velocity Kalman filtering.
//! Copyright (c) 2024 the cv_estimate authors
//!
//! A moving object is tracked in the plane by a linear Kalman filter. The state is the object's position and
//! velocity, x = [x, y, dx, dy]. Only the two velocity components are observed, for example a vehicle in a tunnel that
//! has lost its position fix but still knows its speed and heading. The position follows from the constant velocity
//! model x(k+1) = A.x(k).
//!
//! The library is layered the way a Bayesian estimation library is usually layered:
//! the state representation and estimation operations are defined generically in [`models`], [`noise`] and
//! [`estimators`] for any dimension, numerical helpers live in [`linalg`] and [`matrix`], and the constant velocity
//! problem itself is assembled in [`cv`], configured with [`config`] and run step by step by the [`engine`].
//! [`simulation`] provides a synthetic measurement source for experiments and tests.
//!
//! The Kalman gain is computed with a pseudo-inverse of the innovation covariance. A measurement channel may therefore
//! be fully trusted (zero observation noise) and the filter stays well defined even when the innovation covariance is
//! singular.
//!
//! # Licensing
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
//! including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
//! and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
//! WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


pub mod models;
pub mod noise;
pub mod matrix;
pub mod linalg;
pub mod estimators;
pub mod cv;
pub mod config;
pub mod error;
pub mod engine;
pub mod simulation;

pub use config::CvConfig;
pub use engine::{CvFilter, StepOutput};
pub use error::FilterError;

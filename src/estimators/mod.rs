//! A collection of Bayesian state estimators.

pub mod covariance;

//! Errors reported by the constant velocity filter.

use thiserror::Error;

/// Failures of filter construction and of a filter step.
///
/// A degenerate innovation covariance is not among them, the pseudo-inverse gain handles it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// The configuration was rejected, no filter was constructed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The measurement was rejected, the filter state is unchanged.
    #[error("invalid measurement: {0}")]
    InvalidMeasurement(String),

    /// A numerical operation of the underlying estimator failed.
    #[error("numeric failure: {0}")]
    Numeric(&'static str),
}

impl From<&'static str> for FilterError {
    fn from(message: &'static str) -> Self {
        FilterError::Numeric(message)
    }
}

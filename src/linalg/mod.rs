//! Linear algebra used by the estimators.

pub mod pinv;
pub mod rcond;

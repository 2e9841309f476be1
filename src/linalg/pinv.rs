//! Pseudo-inverse of square matrices.
//!
//! The Moore-Penrose pseudo-inverse is computed from a singular value decomposition. Singular values below a cutoff
//! relative to the largest singular value are treated as zero, so a singular or badly conditioned matrix still has a
//! finite minimum norm inverse.

use na::linalg::SVD;
use na::{allocator::Allocator, DefaultAllocator, DimDiff, DimMin, DimSub, MatrixN, RealField, U1};
use nalgebra as na;

use super::rcond;

/// Relative singular value cutoff.
pub const PINV_RCOND: f64 = 1e-15;

/// Pseudo-inverse of the square matrix `m`.
///
/// Returns the reciprocal condition number of `m` estimated from its singular values, and the pseudo-inverse.
pub fn pseudo_inverse<N: RealField, D>(m: MatrixN<N, D>) -> Result<(N, MatrixN<N, D>), &'static str>
where
    D: DimMin<D, Output = D> + DimSub<U1>,
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D> + Allocator<N, DimDiff<D, U1>>,
{
    let svd = SVD::new(m, true, true);

    let (smin, smax) = rcond::min_max(&svd.singular_values).unwrap_or((N::zero(), N::zero()));
    let rcond = rcond::rcond_min_max(smin, smax);
    if rcond < N::zero() {
        return Err("pseudo inverse of a non numeric matrix");
    }

    let eps = smax * na::convert::<f64, N>(PINV_RCOND);
    let inverse = svd.pseudo_inverse(eps)?;
    Ok((rcond, inverse))
}

//! Reciprocal condition numbers.
//!
//! Covariances are judged by rcond = min/max over their diagonal, and innovation covariances over their singular
//! values. An rcond of 0 marks a singular or empty matrix. A negative rcond marks a negative or NaN element, it is
//! the smallest element rather than a ratio.

use nalgebra::{allocator::Allocator, DefaultAllocator, Dim, MatrixN, RealField, VectorN};

/// Smallest and largest elements of `dv`, `None` when it is empty.
///
/// A NaN element gives a smallest element of -1.
pub fn min_max<N: RealField, R: Dim>(dv: &VectorN<N, R>) -> Option<(N, N)>
where
    DefaultAllocator: Allocator<N, R>,
{
    let first = *dv.iter().next()?;
    let mut lo = first;
    let mut hi = first;
    for d in dv.iter() {
        if *d != *d {
            return Some((-N::one(), hi));
        }
        if *d < lo {
            lo = *d;
        }
        if *d > hi {
            hi = *d;
        }
    }
    Some((lo, hi))
}

/// rcond from the smallest and largest elements.
pub fn rcond_min_max<N: RealField>(lo: N, hi: N) -> N {
    if lo < N::zero() {
        return lo;
    }
    let rcond = lo / hi;
    // 0/0 and inf/inf
    if rcond != rcond {
        N::zero()
    } else {
        rcond
    }
}

/// rcond of a diagonal matrix given as a vector, or of a vector of singular values.
pub fn rcond_vec<N: RealField, R: Dim>(dv: &VectorN<N, R>) -> N
where
    DefaultAllocator: Allocator<N, R>,
{
    match min_max(dv) {
        Some((lo, hi)) => rcond_min_max(lo, hi),
        None => N::zero(),
    }
}

/// rcond of a symmetric matrix estimated from its diagonal, off diagonal elements are ignored.
///
/// A covariance with a negative or NaN diagonal element is never PSD.
pub fn rcond_symetric<N: RealField, D: Dim>(sm: &MatrixN<N, D>) -> N
where
    DefaultAllocator: Allocator<N, D, D> + Allocator<N, D>,
{
    rcond_vec(&sm.diagonal())
}

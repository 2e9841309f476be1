//! Matrix helpers shared by the estimators and noise models.

use na::storage::{Storage, StorageMut};
use na::{Dim, Matrix, RealField, SquareMatrix, Vector};
use nalgebra as na;
use nalgebra::constraint::{DimEq, ShapeConstraint};

/// Computes the quadratic form `self = alpha * lhs * mid * lhs.transpose() + beta * self`.
///
/// 'mid' is a diagonal matrix represented by a Vector.
pub fn quadform_tr<N: RealField, D1, S, R3, C3, S3, D4, S4>(
    mat: &mut SquareMatrix<N, D1, S>,
    alpha: N,
    lhs: &Matrix<N, R3, C3, S3>,
    mid: &Vector<N, D4, S4>,
    beta: N,
) where
    D1: Dim,
    S: StorageMut<N, D1, D1>,
    R3: Dim,
    C3: Dim,
    D4: Dim,
    S3: Storage<N, R3, C3>,
    S4: Storage<N, D4>,
    ShapeConstraint: DimEq<D1, R3> + DimEq<C3, D4>,
{
    mat.ger(alpha * mid[0], &lhs.column(0), &lhs.column(0), beta);

    for j in 1..mid.nrows() {
        mat.ger(alpha * mid[j], &lhs.column(j), &lhs.column(j), N::one());
    }
}

/// Largest absolute difference between a square matrix and its transpose.
///
/// NaN when the matrix holds a NaN off the diagonal.
pub fn asymmetry<N: RealField, D: Dim, S: Storage<N, D, D>>(mat: &SquareMatrix<N, D, S>) -> N {
    let mut worst = N::zero();
    for i in 0..mat.nrows() {
        for j in (i + 1)..mat.ncols() {
            let d = mat[(i, j)] - mat[(j, i)];
            if d != d {
                return d;
            }
            if d > worst {
                worst = d;
            } else if -d > worst {
                worst = -d;
            }
        }
    }
    worst
}

/// Makes a square matrix exactly symmetric, `mat = (mat + mat') / 2`.
///
/// Returns the asymmetry removed.
pub fn symmetrize<N: RealField, D: Dim, S: StorageMut<N, D, D>>(mat: &mut SquareMatrix<N, D, S>) -> N {
    let removed = asymmetry(mat);
    let half = na::convert::<f64, N>(0.5);
    for i in 0..mat.nrows() {
        for j in (i + 1)..mat.ncols() {
            let m = (mat[(i, j)] + mat[(j, i)]) * half;
            mat[(i, j)] = m;
            mat[(j, i)] = m;
        }
    }
    removed
}

/// Checks a the reciprocal condition number is >= 0 .
///
/// IEC 559 NaN values are never true
pub fn check_non_negativ<'a, N: RealField>(rcond: N, message: &'a str) -> Result<N, &'a str> {
    if rcond >= N::zero() {
        Ok(rcond)
    } else {
        Err(message)
    }
}

//! Householder tridiagonalization of symmetric matrices
//!
//! Reduces a symmetric `A` to a symmetric tridiagonal `T` by a sequence of
//! orthogonal similarity transforms, `T = Qᵀ·A·Q`. `T` has the same
//! eigenvalues as `A` and feeds the shifted QR iteration in [`crate::qr`];
//! `Q` seeds its eigenvector accumulator.
//!
//! # Example
//!
//! ```
//! use nume_eigen::{householder_tridiagonalize, Matrix};
//!
//! let a = Matrix::from_rows(&[
//!     vec![4.0, 1.0, -2.0, 2.0],
//!     vec![1.0, 2.0, 0.0, 1.0],
//!     vec![-2.0, 0.0, 3.0, -2.0],
//!     vec![2.0, 1.0, -2.0, -1.0],
//! ]).unwrap();
//!
//! let result = householder_tridiagonalize(&a).unwrap();
//! let t = result.tridiagonal();
//! assert_eq!(*t.get(3, 0).unwrap(), 0.0);
//! assert_eq!(*t.get(0, 2).unwrap(), 0.0);
//! ```

use tracing::{debug, instrument};

use crate::tolerances::{NUMERICAL_ZERO, SYMMETRY_TOLERANCE};
use crate::{EigenError, Matrix, Result, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output of [`householder_tridiagonalize`]
///
/// Satisfies `Qᵀ·A·Q = T` and `Qᵀ·Q = I` up to rounding.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HouseholderResult {
    orthogonal: Matrix<f64>,
    tridiagonal: Matrix<f64>,
}

impl HouseholderResult {
    /// Accumulated reflector product `Q` (orthonormal columns)
    pub fn orthogonal(&self) -> &Matrix<f64> {
        &self.orthogonal
    }

    /// Symmetric tridiagonal `T`
    pub fn tridiagonal(&self) -> &Matrix<f64> {
        &self.tridiagonal
    }

    /// Split into `(Q, T)`
    pub fn into_parts(self) -> (Matrix<f64>, Matrix<f64>) {
        (self.orthogonal, self.tridiagonal)
    }
}

/// Reduce a symmetric matrix to tridiagonal form
///
/// For each pivot column `j` in `0..n-2` the entries below the sub-diagonal
/// are annihilated by a reflector `H = I − 2·v·vᵀ`, applied as `A ← H·A·H`
/// and accumulated as `Q ← Q·H`. Columns that are already reduced (norm
/// below the numerical-zero threshold) are skipped.
///
/// # Errors
///
/// - `EmptyMatrix` / `NotSquare` for malformed input
/// - `NonFinite` if any entry is NaN/∞
/// - `NotSymmetric` with the first offending `(row, col)`
#[instrument(level = "debug", skip_all, fields(n = matrix.rows()))]
pub fn householder_tridiagonalize(matrix: &Matrix<f64>) -> Result<HouseholderResult> {
    if matrix.is_empty() {
        return Err(EigenError::EmptyMatrix);
    }
    matrix.require_square()?;
    if !matrix.is_finite() {
        return Err(EigenError::NonFinite);
    }
    if let Some((row, col)) = matrix.first_asymmetry(SYMMETRY_TOLERANCE) {
        return Err(EigenError::NotSymmetric { row, col });
    }

    let n = matrix.rows();
    let mut a = matrix.clone();
    let mut q = Matrix::identity(n);

    for j in 0..n.saturating_sub(2) {
        let Some(v) = reflector_vector(&a, j)? else {
            debug!(column = j, "Column already reduced, skipping reflector");
            continue;
        };

        let h = reflector(&v);
        a = h.matmul(&a)?.matmul(&h)?;
        q = q.matmul(&h)?;

        for i in (j + 2)..n {
            a.set(i, j, 0.0);
            a.set(j, i, 0.0);
        }

        debug!(column = j, subdiagonal = a.at(j + 1, j), "Applied reflector");
    }

    Ok(HouseholderResult {
        orthogonal: q,
        tridiagonal: a,
    })
}

/// Unit Householder vector annihilating `a[j+2.., j]`, or `None` when the
/// sub-column is already zero
fn reflector_vector(a: &Matrix<f64>, j: usize) -> Result<Option<Vector<f64>>> {
    let n = a.rows();
    let mut w = vec![0.0; n];
    for (i, wi) in w.iter_mut().enumerate().skip(j + 1) {
        *wi = a.at(i, j);
    }

    let norm = w.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm < NUMERICAL_ZERO {
        return Ok(None);
    }

    // Adding with the pivot's sign avoids cancellation
    let sign = if w[j + 1] >= 0.0 { 1.0 } else { -1.0 };
    w[j + 1] += sign * norm;

    Vector::from_vec(w).normalize().map(Some)
}

/// `I − 2·v·vᵀ` for unit `v`
fn reflector(v: &Vector<f64>) -> Matrix<f64> {
    let n = v.len();
    let v = v.as_slice();
    let mut h = Matrix::identity(n);
    for i in 0..n {
        for k in 0..n {
            let value = h.at(i, k) - 2.0 * v[i] * v[k];
            h.set(i, k, value);
        }
    }
    h
}

//! Shifted QR iteration on symmetric tridiagonal matrices
//!
//! Each step subtracts a Wilkinson shift, factors the shifted matrix with
//! `n − 1` Givens rotations, recombines as `R·Q` and adds the shift back.
//! The product of the per-step orthogonal factors, seeded with the
//! Householder `Q`, converges to the eigenvector matrix of the original
//! input.
//!
//! # Example
//!
//! ```
//! use nume_eigen::{qr_eigen_solve, Matrix};
//!
//! let t = Matrix::from_rows(&[
//!     vec![2.0, -1.0, 0.0],
//!     vec![-1.0, 2.0, -1.0],
//!     vec![0.0, -1.0, 2.0],
//! ]).unwrap();
//!
//! let eigen = qr_eigen_solve(&t, &Matrix::identity(3), 1000, 1e-12).unwrap();
//! assert!(eigen.converged());
//! assert!(eigen.residual(&t).unwrap() < 1e-9);
//! ```

use tracing::{debug, info, instrument, warn};

use crate::tolerances::{NUMERICAL_ZERO, SYMMETRY_TOLERANCE};
use crate::{EigenDecomposition, EigenError, Matrix, Result};

/// Givens rotation `(c, s)` that zeroes `b` in `(a, b)`
///
/// Applying `[[c, s], [−s, c]]` to `(a, b)` yields `(r, 0)`. Computed through
/// the smaller-over-larger ratio to avoid overflow, with `c ≥ 0`.
///
/// # Example
///
/// ```
/// use nume_eigen::qr::givens_rotation;
///
/// let (c, s) = givens_rotation(3.0, 4.0);
/// assert!((-s * 3.0 + c * 4.0).abs() < 1e-15);
/// assert!((c * c + s * s - 1.0).abs() < 1e-15);
/// ```
pub fn givens_rotation(a: f64, b: f64) -> (f64, f64) {
    if b.abs() < NUMERICAL_ZERO {
        return (1.0, 0.0);
    }

    if b.abs() > a.abs() {
        let t = a / b;
        let s = 1.0 / (1.0 + t * t).sqrt();
        let c = s * t;
        if c < 0.0 {
            (-c, -s)
        } else {
            (c, s)
        }
    } else {
        let t = b / a;
        let c = 1.0 / (1.0 + t * t).sqrt();
        (c, c * t)
    }
}

/// Wilkinson shift from the trailing 2×2 of the lowest unreduced block
///
/// Returns the eigenvalue of `[[a, b], [c, d]]` closest to `d`, or `d`
/// itself when the block has complex eigenvalues.
pub(crate) fn wilkinson_shift(a: &Matrix<f64>, tolerance: f64) -> f64 {
    let mut hi = a.rows() - 1;
    while hi > 0 && a.at(hi, hi - 1).abs() <= tolerance {
        hi -= 1;
    }
    if hi == 0 {
        return a.at(0, 0);
    }

    let (p, q) = (a.at(hi - 1, hi - 1), a.at(hi - 1, hi));
    let (r, d) = (a.at(hi, hi - 1), a.at(hi, hi));

    let trace = p + d;
    let det = p * d - q * r;
    let discriminant = trace * trace - 4.0 * det;
    if discriminant < 0.0 {
        return d;
    }

    let root = discriminant.sqrt();
    let high = (trace + root) / 2.0;
    let low = (trace - root) / 2.0;
    if (high - d).abs() < (low - d).abs() {
        high
    } else {
        low
    }
}

fn is_converged(a: &Matrix<f64>, tolerance: f64) -> bool {
    (0..a.rows().saturating_sub(1)).all(|i| a.at(i + 1, i).abs() <= tolerance)
}

/// Eigen-decomposition of a symmetric tridiagonal matrix
///
/// `orthogonal` seeds the eigenvector accumulator: pass the `Q` from
/// Householder reduction to obtain eigenvectors of the original matrix, or
/// the identity for eigenvectors of `tridiagonal` itself.
///
/// Stops as soon as every sub-diagonal entry is at most `tolerance`. The
/// check runs before each step, so converged input costs zero iterations.
/// An exhausted budget is not an error: the result reports
/// `converged() == false`.
///
/// # Errors
///
/// - `EmptyMatrix` / `NotSquare` for malformed `tridiagonal`
/// - `DimensionMismatch` if `orthogonal` is not the same shape
/// - `InvalidInput` if `tolerance` is negative or not finite
/// - `NonFinite` for NaN/∞ entries
/// - `NotSymmetric` / `NotTridiagonal` with the first offending entry
#[instrument(level = "debug", skip(tridiagonal, orthogonal), fields(n = tridiagonal.rows()))]
pub fn qr_eigen_solve(
    tridiagonal: &Matrix<f64>,
    orthogonal: &Matrix<f64>,
    max_iterations: usize,
    tolerance: f64,
) -> Result<EigenDecomposition> {
    validate(tridiagonal, orthogonal, tolerance)?;

    let n = tridiagonal.rows();
    let mut a = tridiagonal.clone();
    let mut v = orthogonal.clone();
    let mut iterations = 0;
    let mut converged = false;

    loop {
        if is_converged(&a, tolerance) {
            converged = true;
            break;
        }
        if iterations >= max_iterations {
            break;
        }

        let shift = wilkinson_shift(&a, tolerance);
        let step = qr_step(&mut a, shift)?;
        v = v.matmul(&step)?;
        iterations += 1;

        debug!(iteration = iterations, shift, "QR step");
    }

    if converged {
        info!(iterations, "QR iteration converged");
    } else {
        warn!(
            max_iterations,
            "QR iteration budget exhausted, returning current diagonal"
        );
    }

    let eigenvalues = (0..n).map(|i| a.at(i, i)).collect();
    Ok(EigenDecomposition::new(eigenvalues, v, iterations, converged))
}

/// One shifted step: `A ← R·Q + shift·I`, returning `Q`
fn qr_step(a: &mut Matrix<f64>, shift: f64) -> Result<Matrix<f64>> {
    let n = a.rows();
    let mut r = a.shifted(shift)?;
    let mut q = Matrix::identity(n);

    for i in 0..n - 1 {
        let sub = r.at(i + 1, i);
        if sub.abs() <= NUMERICAL_ZERO {
            continue;
        }
        let (c, s) = givens_rotation(r.at(i, i), sub);

        for k in 0..n {
            let (upper, lower) = (r.at(i, k), r.at(i + 1, k));
            r.set(i, k, c * upper + s * lower);
            r.set(i + 1, k, -s * upper + c * lower);
        }
        for k in 0..n {
            let (left, right) = (q.at(k, i), q.at(k, i + 1));
            q.set(k, i, c * left + s * right);
            q.set(k, i + 1, -s * left + c * right);
        }
    }

    *a = r.matmul(&q)?.shifted(-shift)?;
    Ok(q)
}

fn validate(tridiagonal: &Matrix<f64>, orthogonal: &Matrix<f64>, tolerance: f64) -> Result<()> {
    if tridiagonal.is_empty() {
        return Err(EigenError::EmptyMatrix);
    }
    tridiagonal.require_square()?;

    let n = tridiagonal.rows();
    if orthogonal.rows() != n {
        return Err(EigenError::DimensionMismatch {
            expected: n,
            actual: orthogonal.rows(),
        });
    }
    if orthogonal.cols() != n {
        return Err(EigenError::DimensionMismatch {
            expected: n,
            actual: orthogonal.cols(),
        });
    }

    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(EigenError::InvalidInput(format!(
            "tolerance must be finite and non-negative, got {}",
            tolerance
        )));
    }
    if !tridiagonal.is_finite() || !orthogonal.is_finite() {
        return Err(EigenError::NonFinite);
    }

    if let Some((row, col)) = tridiagonal.first_asymmetry(SYMMETRY_TOLERANCE) {
        return Err(EigenError::NotSymmetric { row, col });
    }
    if let Some((row, col)) = tridiagonal.first_off_band(SYMMETRY_TOLERANCE) {
        return Err(EigenError::NotTridiagonal { row, col });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laplacian_3() -> Matrix<f64> {
        Matrix::from_rows(&[[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]).unwrap()
    }

    fn sorted(values: &[f64]) -> Vec<f64> {
        let mut values = values.to_vec();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    }

    // =========================================================================
    // Givens rotations
    // =========================================================================

    #[test]
    fn test_givens_zeroes_second_component() {
        let cases = [
            (3.0, 4.0),
            (4.0, 3.0),
            (-3.0, 4.0),
            (3.0, -4.0),
            (-5.0, -1.0),
            (1e-3, 7.0),
            (0.0, 2.0),
        ];
        for (a, b) in cases {
            let (c, s) = givens_rotation(a, b);
            assert!((c * c + s * s - 1.0).abs() < 1e-14, "not a rotation for {:?}", (a, b));
            assert!((-s * a + c * b).abs() < 1e-14, "b not zeroed for {:?}", (a, b));
            assert!(c >= 0.0, "c < 0 for {:?}", (a, b));
        }
    }

    #[test]
    fn test_givens_negligible_b_is_identity() {
        assert_eq!(givens_rotation(5.0, 1e-16), (1.0, 0.0));
        assert_eq!(givens_rotation(0.0, 0.0), (1.0, 0.0));
    }

    // =========================================================================
    // Wilkinson shift
    // =========================================================================

    #[test]
    fn test_wilkinson_shift_picks_root_closest_to_d() {
        // [[2, 1], [1, 2]] has eigenvalues 1 and 3, d = 2 is equidistant: low wins
        let m = Matrix::from_rows(&[[2.0, 1.0], [1.0, 2.0]]).unwrap();
        assert!((wilkinson_shift(&m, 1e-12) - 1.0).abs() < 1e-15);

        // [[1, 1], [1, 3]]: eigenvalues 2 ± √2, closest to 3 is 2 + √2
        let m = Matrix::from_rows(&[[1.0, 1.0], [1.0, 3.0]]).unwrap();
        assert!((wilkinson_shift(&m, 1e-12) - (2.0 + 2f64.sqrt())).abs() < 1e-14);
    }

    #[test]
    fn test_wilkinson_shift_complex_block_falls_back_to_d() {
        // trace² − 4·det = 0.25 − 16 < 0
        let complex = Matrix::from_rows(&[[0.0, -2.0], [2.0, 0.5]]).unwrap();
        assert_eq!(wilkinson_shift(&complex, 1e-12), 0.5);
    }

    #[test]
    fn test_wilkinson_shift_skips_deflated_rows() {
        // Bottom eigenvalue 9 already split off; the shift comes from the
        // upper 2×2 block [[1, 1], [1, 3]]
        let m = Matrix::from_rows(&[[1.0, 1.0, 0.0], [1.0, 3.0, 0.0], [0.0, 0.0, 9.0]]).unwrap();
        assert!((wilkinson_shift(&m, 1e-12) - (2.0 + 2f64.sqrt())).abs() < 1e-14);
    }

    // =========================================================================
    // QR iteration
    // =========================================================================

    #[test]
    fn test_qr_converges_on_laplacian() {
        let t = laplacian_3();
        let eigen = qr_eigen_solve(&t, &Matrix::identity(3), 1000, 1e-12).unwrap();

        assert!(eigen.converged());
        assert!(eigen.iterations() > 0);
        let values = sorted(eigen.eigenvalues());
        let expected = [2.0 - 2f64.sqrt(), 2.0, 2.0 + 2f64.sqrt()];
        for (got, want) in values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-10, "{} vs {}", got, want);
        }
        assert!(eigen.residual(&t).unwrap() < 1e-9);
    }

    #[test]
    fn test_qr_eigenvectors_orthonormal() {
        let eigen = qr_eigen_solve(&laplacian_3(), &Matrix::identity(3), 1000, 1e-12).unwrap();
        let v = eigen.eigenvectors();
        let vtv = v.transpose().matmul(v).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((vtv.at(i, j) - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_qr_already_converged_is_idempotent() {
        let d = Matrix::from_rows(&[[5.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        let eigen = qr_eigen_solve(&d, &Matrix::identity(3), 1000, 1e-12).unwrap();

        assert_eq!(eigen.iterations(), 0);
        assert!(eigen.converged());
        assert_eq!(eigen.eigenvalues(), &[5.0, 3.0, 1.0]);
        assert_eq!(eigen.eigenvectors(), &Matrix::identity(3));

        // Feeding a converged result back in performs no further steps
        let t = laplacian_3();
        let first = qr_eigen_solve(&t, &Matrix::identity(3), 1000, 1e-12).unwrap();
        let mut diagonal = Matrix::zeros(3, 3);
        for (i, &value) in first.eigenvalues().iter().enumerate() {
            diagonal.set(i, i, value);
        }
        let again = qr_eigen_solve(&diagonal, first.eigenvectors(), 1000, 1e-12).unwrap();
        assert_eq!(again.iterations(), 0);
        assert_eq!(again.eigenvalues(), first.eigenvalues());
    }

    #[test]
    fn test_qr_budget_exhausted_is_not_error() {
        let eigen = qr_eigen_solve(&laplacian_3(), &Matrix::identity(3), 0, 1e-12).unwrap();
        assert_eq!(eigen.iterations(), 0);
        assert!(!eigen.converged());
        assert_eq!(eigen.eigenvalues(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_qr_one_by_one() {
        let m = Matrix::from_rows(&[[-4.0]]).unwrap();
        let eigen = qr_eigen_solve(&m, &Matrix::identity(1), 10, 1e-12).unwrap();
        assert_eq!(eigen.eigenvalues(), &[-4.0]);
        assert_eq!(eigen.iterations(), 0);
    }

    #[test]
    fn test_qr_validation() {
        let t = laplacian_3();
        let q = Matrix::identity(3);

        assert_eq!(
            qr_eigen_solve(&Matrix::new(0, 0), &q, 10, 1e-12),
            Err(EigenError::EmptyMatrix)
        );
        assert_eq!(
            qr_eigen_solve(&t, &Matrix::identity(2), 10, 1e-12),
            Err(EigenError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(matches!(
            qr_eigen_solve(&t, &q, 10, -1.0),
            Err(EigenError::InvalidInput(_))
        ));
        assert!(matches!(
            qr_eigen_solve(&t, &q, 10, f64::NAN),
            Err(EigenError::InvalidInput(_))
        ));

        let full = Matrix::from_rows(&[[2.0, 1.0, 1.0], [1.0, 2.0, 1.0], [1.0, 1.0, 2.0]]).unwrap();
        assert_eq!(
            qr_eigen_solve(&full, &q, 10, 1e-12),
            Err(EigenError::NotTridiagonal { row: 0, col: 2 })
        );

        let skew = Matrix::from_rows(&[[2.0, 1.0, 0.0], [-1.0, 2.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        assert_eq!(
            qr_eigen_solve(&skew, &q, 10, 1e-12),
            Err(EigenError::NotSymmetric { row: 1, col: 0 })
        );
    }
}

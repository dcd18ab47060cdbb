//! Full eigen-decomposition of symmetric matrices
//!
//! Householder tridiagonalization followed by Wilkinson-shifted QR
//! iteration. Also hosts the correspondence resolver used by the shifted
//! power methods to recover the eigenvector of the original matrix that
//! belongs to a given eigenvalue.
//!
//! # Example
//!
//! ```
//! use nume_eigen::{complete_eigen_decomposition, Matrix};
//!
//! let m = Matrix::from_rows(&[
//!     vec![4.0, 1.0, -2.0, 2.0],
//!     vec![1.0, 2.0, 0.0, 1.0],
//!     vec![-2.0, 0.0, 3.0, -2.0],
//!     vec![2.0, 1.0, -2.0, -1.0],
//! ]).unwrap();
//!
//! let eigen = complete_eigen_decomposition(&m, 1000, 1e-12).unwrap();
//! assert!(eigen.converged());
//!
//! for (value, vector) in eigen.iter() {
//!     let av = m.matvec(&vector).unwrap();
//!     let lv = vector.scale(value);
//!     assert!(av.sub(&lv).unwrap().norm_l2() < 1e-9);
//! }
//! ```

use tracing::{debug, instrument, warn};

use crate::tolerances::{DEFAULT_QR_MAX_ITERATIONS, DEFAULT_QR_TOLERANCE};
use crate::{householder_tridiagonalize, qr_eigen_solve, EigenError, Matrix, Result, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Eigenvalues and eigenvectors of a symmetric matrix
///
/// Column `i` of [`eigenvectors`](Self::eigenvectors) belongs to
/// `eigenvalues()[i]`. Pairs come out in the order the QR iteration leaves
/// them; use [`sorted_descending`](Self::sorted_descending) for a
/// magnitude-independent ordering.
///
/// # Properties
///
/// For the input `A`:
/// - `A·vᵢ ≈ λᵢ·vᵢ` (see [`residual`](Self::residual))
/// - `Vᵀ·V ≈ I`
/// - `V·diag(λ)·Vᵀ ≈ A` (see [`reconstruct`](Self::reconstruct))
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DecompositionParts"))]
pub struct EigenDecomposition {
    eigenvalues: Vec<f64>,
    eigenvectors: Matrix<f64>,
    iterations: usize,
    converged: bool,
}

/// Wire form of [`EigenDecomposition`] before the shapes are checked
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DecompositionParts {
    eigenvalues: Vec<f64>,
    eigenvectors: Matrix<f64>,
    iterations: usize,
    converged: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<DecompositionParts> for EigenDecomposition {
    type Error = EigenError;

    fn try_from(parts: DecompositionParts) -> Result<Self> {
        let n = parts.eigenvalues.len();
        let (rows, cols) = parts.eigenvectors.shape();
        if rows != n || cols != n {
            return Err(EigenError::DimensionMismatch {
                expected: n,
                actual: if rows != n { rows } else { cols },
            });
        }
        Ok(Self::new(
            parts.eigenvalues,
            parts.eigenvectors,
            parts.iterations,
            parts.converged,
        ))
    }
}

impl EigenDecomposition {
    pub(crate) fn new(
        eigenvalues: Vec<f64>,
        eigenvectors: Matrix<f64>,
        iterations: usize,
        converged: bool,
    ) -> Self {
        Self {
            eigenvalues,
            eigenvectors,
            iterations,
            converged,
        }
    }

    /// Eigenvalues, in iteration order
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Eigenvector matrix, one eigenvector per column
    pub fn eigenvectors(&self) -> &Matrix<f64> {
        &self.eigenvectors
    }

    /// QR transformation steps performed
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// False if the iteration budget ran out before every sub-diagonal
    /// entry dropped below the tolerance
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns an iterator over (eigenvalue, eigenvector) pairs
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::{complete_eigen_decomposition, Matrix};
    ///
    /// let m = Matrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 1.0]]).unwrap();
    /// let eigen = complete_eigen_decomposition(&m, 100, 1e-12).unwrap();
    ///
    /// for (value, vector) in eigen.iter() {
    ///     println!("λ = {}, v = {:?}", value, vector.as_slice());
    /// }
    /// ```
    pub fn iter(&self) -> EigenIterator<'_> {
        EigenIterator {
            eigen: self,
            index: 0,
        }
    }

    /// Returns the number of eigenvalue/eigenvector pairs
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Returns true if there are no eigenvalues
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Eigenvector `i` as a Vector, or None if out of bounds
    pub fn eigenvector(&self, i: usize) -> Option<Vector<f64>> {
        if i >= self.eigenvalues.len() {
            return None;
        }
        self.eigenvectors.column(i)
    }

    /// Largest `‖A·vᵢ − λᵢ·vᵢ‖` over all pairs
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `matrix` does not match the
    /// decomposition's dimension.
    pub fn residual(&self, matrix: &Matrix<f64>) -> Result<f64> {
        if matrix.rows() != self.len() || matrix.cols() != self.len() {
            return Err(EigenError::DimensionMismatch {
                expected: self.len(),
                actual: matrix.rows().max(matrix.cols()),
            });
        }

        let mut worst: f64 = 0.0;
        for (value, vector) in self.iter() {
            let av = matrix.matvec(&vector)?;
            let error = av.sub(&vector.scale(value))?.norm_l2();
            worst = worst.max(error);
        }
        Ok(worst)
    }

    /// Reconstruct the original matrix from eigendecomposition
    ///
    /// Computes `V × D × V^T` where D is the diagonal matrix of eigenvalues.
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::{complete_eigen_decomposition, Matrix};
    ///
    /// let m = Matrix::from_rows(&[vec![4.0, 2.0], vec![2.0, 4.0]]).unwrap();
    /// let eigen = complete_eigen_decomposition(&m, 100, 1e-12).unwrap();
    /// let reconstructed = eigen.reconstruct().unwrap();
    ///
    /// assert!((reconstructed.get(0, 1).unwrap() - 2.0).abs() < 1e-10);
    /// ```
    pub fn reconstruct(&self) -> Result<Matrix<f64>> {
        let n = self.len();

        let mut vd = self.eigenvectors.clone();
        for (col, &lambda) in self.eigenvalues.iter().enumerate() {
            for row in 0..n {
                let value = vd.at(row, col) * lambda;
                vd.set(row, col, value);
            }
        }

        vd.matmul(&self.eigenvectors.transpose())
    }

    /// Copy with pairs ordered by descending eigenvalue
    pub fn sorted_descending(&self) -> Self {
        let n = self.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| self.eigenvalues[b].total_cmp(&self.eigenvalues[a]));

        let mut eigenvectors = Matrix::zeros(self.eigenvectors.rows(), n);
        for (new_col, &old_col) in order.iter().enumerate() {
            for row in 0..self.eigenvectors.rows() {
                eigenvectors.set(row, new_col, self.eigenvectors.at(row, old_col));
            }
        }

        Self {
            eigenvalues: order.iter().map(|&i| self.eigenvalues[i]).collect(),
            eigenvectors,
            iterations: self.iterations,
            converged: self.converged,
        }
    }
}

/// Iterator over eigenvalue-eigenvector pairs
pub struct EigenIterator<'a> {
    eigen: &'a EigenDecomposition,
    index: usize,
}

impl<'a> Iterator for EigenIterator<'a> {
    type Item = (f64, Vector<f64>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.eigen.len() {
            return None;
        }

        let value = self.eigen.eigenvalues[self.index];
        let vector = self.eigen.eigenvector(self.index)?;
        self.index += 1;

        Some((value, vector))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.eigen.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for EigenIterator<'a> {}

/// All eigenpairs of a symmetric matrix
///
/// Householder reduction followed by [`qr_eigen_solve`] seeded with the
/// reflector product, so the eigenvectors belong to `matrix` itself.
///
/// # Errors
///
/// Those of [`householder_tridiagonalize`] and [`qr_eigen_solve`].
#[instrument(level = "debug", skip(matrix), fields(n = matrix.rows()))]
pub fn complete_eigen_decomposition(
    matrix: &Matrix<f64>,
    max_iterations: usize,
    tolerance: f64,
) -> Result<EigenDecomposition> {
    let (q, t) = householder_tridiagonalize(matrix)?.into_parts();
    debug!("Tridiagonal form computed");
    qr_eigen_solve(&t, &q, max_iterations, tolerance)
}

/// Eigenvector of `matrix` whose eigenvalue is nearest to `target`
///
/// Runs a full decomposition with the default QR tolerance and budget,
/// then picks the column with minimal `|λᵢ − target|`. Cost is that of the
/// full decomposition, so this is meant for small matrices.
///
/// # Errors
///
/// Those of [`complete_eigen_decomposition`]; in particular `NotSymmetric`.
///
/// # Example
///
/// ```
/// use nume_eigen::{resolve_eigenvector, Matrix, Vector};
///
/// let m = Matrix::from_rows(&[vec![2.0, 0.0], vec![0.0, 5.0]]).unwrap();
/// let v = resolve_eigenvector(&m, 4.6).unwrap();
/// assert!(v.is_parallel_to(&Vector::from_slice(&[0.0, 1.0]), 1e-12));
/// ```
#[instrument(level = "debug", skip(matrix), fields(n = matrix.rows()))]
pub fn resolve_eigenvector(matrix: &Matrix<f64>, target: f64) -> Result<Vector<f64>> {
    let eigen =
        complete_eigen_decomposition(matrix, DEFAULT_QR_MAX_ITERATIONS, DEFAULT_QR_TOLERANCE)?;
    if !eigen.converged() {
        warn!("Decomposition did not converge, eigenvector may be inaccurate");
    }

    let (index, &value) = eigen
        .eigenvalues()
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
        .ok_or(EigenError::EmptyMatrix)?;

    debug!(index, eigenvalue = value, "Resolved eigenvector");
    eigen.eigenvector(index).ok_or(EigenError::EmptyMatrix)
}

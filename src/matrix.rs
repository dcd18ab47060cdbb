//! Dense matrix operations
//!
//! Provides the small set of dense linear algebra primitives the eigen
//! solvers are built on: products, transpose, spectral shift, inversion and
//! structural checks.
//!
//! # Example
//!
//! ```
//! use nume_eigen::Matrix;
//!
//! let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).unwrap();
//! assert_eq!(m.shape(), (2, 2));
//! assert_eq!(m.get(1, 0), Some(&5.0));
//! ```

use crate::tolerances::NUMERICAL_ZERO;
use crate::{EigenError, Result, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 2D matrix with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row.
///
/// # Storage Layout
///
/// For a 2x3 matrix:
/// ```text
/// [[a, b, c],
///  [d, e, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
///
/// Operations return new matrices; the solvers never mutate a matrix they
/// were handed.
///
/// Deserialization runs the same length check as [`Matrix::from_vec`], so a
/// decoded matrix is always well formed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixParts<T>"))]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Wire form of [`Matrix`] before the shape is checked
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct MatrixParts<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<MatrixParts<T>> for Matrix<T> {
    type Error = EigenError;

    fn try_from(parts: MatrixParts<T>) -> Result<Self> {
        check_shape(parts.rows, parts.cols, parts.data.len())?;
        Ok(Matrix {
            rows: parts.rows,
            cols: parts.cols,
            data: parts.data,
        })
    }
}

fn check_shape(rows: usize, cols: usize, len: usize) -> Result<()> {
    match rows.checked_mul(cols) {
        Some(expected) if expected == len => Ok(()),
        expected => Err(EigenError::InvalidInput(format!(
            "Data length {} does not match matrix dimensions {}x{} (expected {})",
            len,
            rows,
            cols,
            expected.map_or_else(|| "overflow".to_string(), |e| e.to_string())
        ))),
    }
}

impl Matrix<f64> {
    /// Creates a new zero-filled matrix
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::new(3, 4);
    /// assert_eq!(m.rows(), 3);
    /// assert_eq!(m.cols(), 4);
    /// ```
    pub fn new(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        check_shape(rows, cols, data.len())?;
        Ok(Matrix { rows, cols, data })
    }

    /// Creates a matrix from a slice by copying the data
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `data.len() != rows * cols`
    pub fn from_slice(rows: usize, cols: usize, data: &[f64]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix from row-major "array of arrays" input
    ///
    /// This is the shape front-ends collect matrices in. Dimensions are
    /// inferred from the input.
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` if there are no rows or the first row is empty
    /// - `DimensionMismatch` if rows have different lengths
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(EigenError::EmptyMatrix);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(EigenError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Matrix {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Returns the matrix as a vector of rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.to_vec())
            .collect()
    }

    /// Creates a matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix::new(rows, cols)
    }

    /// Creates an identity matrix (square matrix with 1s on diagonal)
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::identity(3);
    /// assert_eq!(m.get(0, 0), Some(&1.0));
    /// assert_eq!(m.get(0, 1), Some(&0.0));
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Matrix {
            rows: n,
            cols: n,
            data,
        }
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// True if rows == cols
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True if the matrix has no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets a reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&f64> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            self.data.get(row * self.cols + col)
        }
    }

    /// Gets a mutable reference to an element at (row, col)
    ///
    /// Returns `None` if indices are out of bounds
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row >= self.rows || col >= self.cols {
            None
        } else {
            let idx = row * self.cols + col;
            self.data.get_mut(idx)
        }
    }

    /// Returns a reference to the underlying data
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Unchecked element read for the solver inner loops
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Unchecked element write for the solver inner loops
    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Extracts column `col` as a vector, or `None` if out of bounds
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.column(1).unwrap().as_slice(), &[2.0, 4.0]);
    /// ```
    pub fn column(&self, col: usize) -> Option<Vector<f64>> {
        if col >= self.cols {
            return None;
        }
        let data: Vec<f64> = (0..self.rows).map(|row| self.at(row, col)).collect();
        Some(Vector::from_vec(data))
    }

    /// Matrix multiplication
    ///
    /// Computes `C = A × B` where A is `m×n`, B is `n×p`, and C is `m×p`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    ///
    /// // [[1, 2],   [[5, 6],   [[19, 22],
    /// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn matmul(&self, other: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.cols != other.rows {
            return Err(EigenError::DimensionMismatch {
                expected: self.cols,
                actual: other.rows,
            });
        }

        let mut result = Matrix::zeros(self.rows, other.cols);

        // i-k-j order: row k of B is contiguous, so the inner loop streams
        for i in 0..self.rows {
            let out_row = i * other.cols;
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if a_ik == 0.0 {
                    continue;
                }
                let b_row = k * other.cols;
                for j in 0..other.cols {
                    result.data[out_row + j] += a_ik * other.data[b_row + j];
                }
            }
        }

        Ok(result)
    }

    /// Matrix-vector multiplication: `A × v`
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `v.len() != self.cols()`
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::{Matrix, Vector};
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(m.matvec(&v).unwrap().as_slice(), &[14.0, 32.0]);
    /// ```
    pub fn matvec(&self, v: &Vector<f64>) -> Result<Vector<f64>> {
        if v.len() != self.cols {
            return Err(EigenError::DimensionMismatch {
                expected: self.cols,
                actual: v.len(),
            });
        }

        let v_slice = v.as_slice();
        let result: Vec<f64> = self
            .data
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().zip(v_slice).map(|(a, b)| a * b).sum())
            .collect();

        Ok(Vector::from_vec(result))
    }

    /// Transpose the matrix (swap rows and columns)
    pub fn transpose(&self) -> Matrix<f64> {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: f64) -> Matrix<f64> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|x| x * factor).collect(),
        }
    }

    /// Element-wise subtraction `self - other`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if shapes differ
    pub fn sub(&self, other: &Matrix<f64>) -> Result<Matrix<f64>> {
        if self.shape() != other.shape() {
            return Err(EigenError::InvalidInput(format!(
                "Cannot subtract {}x{} matrix from {}x{} matrix",
                other.rows, other.cols, self.rows, self.cols
            )));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Spectral shift: returns `self − shift·I`
    ///
    /// Eigenvalues move by `−shift`; eigenvectors are unchanged.
    ///
    /// # Errors
    ///
    /// Returns `NotSquare` for non-square matrices
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).unwrap();
    /// let shifted = m.shifted(4.0).unwrap();
    /// assert_eq!(shifted.as_slice(), &[-2.0, 3.0, 5.0, 0.0]);
    /// ```
    pub fn shifted(&self, shift: f64) -> Result<Matrix<f64>> {
        self.require_square()?;
        let mut result = self.clone();
        for i in 0..self.rows {
            result.data[i * self.cols + i] -= shift;
        }
        Ok(result)
    }

    /// Matrix inverse by Gauss-Jordan elimination with partial pivoting
    ///
    /// # Errors
    ///
    /// - `EmptyMatrix` / `NotSquare` for malformed input
    /// - `SingularMatrix` if a pivot falls below the numerical-zero threshold
    ///   relative to the largest entry magnitude, so the test does not depend
    ///   on the overall scale of the matrix
    ///
    /// # Example
    ///
    /// ```
    /// use nume_eigen::Matrix;
    ///
    /// let m = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
    /// let inv = m.inverse().unwrap();
    /// let product = m.matmul(&inv).unwrap();
    /// assert!((product.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
    /// assert!(product.get(0, 1).unwrap().abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Matrix<f64>> {
        if self.is_empty() {
            return Err(EigenError::EmptyMatrix);
        }
        self.require_square()?;

        let n = self.rows;
        let threshold = NUMERICAL_ZERO * self.max_abs();
        let mut a = self.data.clone();
        let mut inv = Matrix::identity(n).data;

        for col in 0..n {
            let pivot_row = (col..n)
                .max_by(|&r1, &r2| a[r1 * n + col].abs().total_cmp(&a[r2 * n + col].abs()))
                .unwrap_or(col);

            let pivot = a[pivot_row * n + col];
            if !(pivot.abs() > threshold) {
                return Err(EigenError::SingularMatrix);
            }

            if pivot_row != col {
                for k in 0..n {
                    a.swap(col * n + k, pivot_row * n + k);
                    inv.swap(col * n + k, pivot_row * n + k);
                }
            }

            let inv_pivot = 1.0 / pivot;
            for k in 0..n {
                a[col * n + k] *= inv_pivot;
                inv[col * n + k] *= inv_pivot;
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = a[row * n + col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..n {
                    a[row * n + k] -= factor * a[col * n + k];
                    inv[row * n + k] -= factor * inv[col * n + k];
                }
            }
        }

        Matrix::from_vec(n, n, inv)
    }

    /// Largest absolute entry (0 for an empty matrix)
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0, |acc, x| acc.max(x.abs()))
    }

    /// Frobenius norm
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    /// True if every entry is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Symmetry check with relative tolerance
    ///
    /// Entries are compared against `tolerance · max|aᵢⱼ|`, so the check is
    /// invariant under scaling of the matrix.
    /// Non-square matrices are never symmetric.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.first_asymmetry(tolerance).is_none()
    }

    /// First `(row, col)` with `row > col` whose mirror entry differs, if any
    pub(crate) fn first_asymmetry(&self, tolerance: f64) -> Option<(usize, usize)> {
        if !self.is_square() {
            return Some((0, 0));
        }
        let scale = self.max_abs();
        if scale == 0.0 {
            return None;
        }
        let limit = tolerance * scale;
        for i in 0..self.rows {
            for j in 0..i {
                if (self.at(i, j) - self.at(j, i)).abs() > limit {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// First `(row, col)` outside the tridiagonal band exceeding the tolerance
    ///
    /// The tolerance is relative to the largest entry magnitude.
    pub(crate) fn first_off_band(&self, tolerance: f64) -> Option<(usize, usize)> {
        let scale = self.max_abs();
        if scale == 0.0 {
            return None;
        }
        let limit = tolerance * scale;
        for i in 0..self.rows {
            for j in 0..self.cols {
                if i.abs_diff(j) > 1 && self.at(i, j).abs() > limit {
                    return Some((i, j));
                }
            }
        }
        None
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(EigenError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

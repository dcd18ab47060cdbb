//! Error types for eigenvalue computations

use thiserror::Error;

/// Result type for eigen operations
pub type Result<T> = std::result::Result<T, EigenError>;

/// Errors that can occur while setting up or running an eigen solver
///
/// Non-convergence is deliberately absent: iterative solvers return their
/// best estimate together with a `converged` flag instead of failing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EigenError {
    /// Initial guess is the zero vector, so power iteration has no direction
    #[error("Initial guess cannot be the zero vector")]
    ZeroInitialGuess,

    /// Matrix has no rows or no columns
    #[error("Matrix cannot be empty")]
    EmptyMatrix,

    /// Matrix is not square
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Dimension mismatch between operands
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Matrix inversion hit a pivot below the numerical-zero threshold
    #[error("Matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// Matrix is not symmetric; `(row, col)` is the first offending entry
    #[error("Matrix is not symmetric: entry ({row}, {col}) differs from ({col}, {row})")]
    NotSymmetric {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
    },

    /// Matrix has a non-negligible entry outside the tridiagonal band
    #[error("Matrix is not tridiagonal: entry ({row}, {col}) is outside the band")]
    NotTridiagonal {
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
    },

    /// Input contains NaN or infinity
    #[error("Input contains non-finite values")]
    NonFinite,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_initial_guess_error() {
        let err = EigenError::ZeroInitialGuess;
        assert_eq!(err.to_string(), "Initial guess cannot be the zero vector");
    }

    #[test]
    fn test_not_square_error() {
        let err = EigenError::NotSquare { rows: 2, cols: 3 };
        assert_eq!(err.to_string(), "Matrix must be square, got 2x3");
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let err = EigenError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 2");
    }

    #[test]
    fn test_not_symmetric_error() {
        let err = EigenError::NotSymmetric { row: 0, col: 2 };
        assert_eq!(
            err.to_string(),
            "Matrix is not symmetric: entry (0, 2) differs from (2, 0)"
        );
    }

    #[test]
    fn test_invalid_input_error() {
        let err = EigenError::InvalidInput("epsilon must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: epsilon must be positive");
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(EigenError::SingularMatrix, EigenError::SingularMatrix);
        assert_ne!(EigenError::SingularMatrix, EigenError::EmptyMatrix);
    }
}

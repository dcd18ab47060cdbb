//! Nume-Eigen: Dense Eigenvalue Solvers
//!
//! Eigenvalues and eigenvectors of small, dense, real matrices for
//! numerical-methods coursework:
//!
//! 1. **Power iteration** - regular, inverse, and shifted ("farthest" /
//!    "nearest") variants sharing one normalized-iteration core
//! 2. **Householder tridiagonalization** - orthogonal reduction of a
//!    symmetric matrix to tridiagonal form
//! 3. **Shifted QR iteration** - Wilkinson-shifted QR with Givens rotations,
//!    producing every eigenvalue and an orthonormal eigenvector matrix
//!
//! # Design Principles
//!
//! - **No panics on numeric input**: every entry point validates and returns `Result`
//! - **Pure functions**: inputs are borrowed, never mutated; no global state
//! - **Confidence is reported**: non-convergence is a flag, not an error
//! - **Structured logging**: `tracing` spans and events, subscriber left to the caller
//!
//! # Quick Start
//!
//! ```rust
//! use nume_eigen::{complete_eigen_decomposition, regular_power, ConvergenceCriteria, Matrix, Vector};
//!
//! let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).unwrap();
//! let guess = Vector::from_slice(&[1.0, 1.0]);
//!
//! let dominant = regular_power(&m, &guess, &ConvergenceCriteria::default()).unwrap();
//! assert!((dominant.eigenvalue - 7.0).abs() < 1e-4);
//!
//! let s = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
//! let eigen = complete_eigen_decomposition(&s, 1000, 1e-12).unwrap();
//! assert!(eigen.residual(&s).unwrap() < 1e-10);
//! ```

pub mod criteria;
pub mod eigen;
pub mod error;
pub mod householder;
pub mod matrix;
pub mod power;
pub mod qr;
pub mod tolerances;
pub mod vector;

pub use criteria::ConvergenceCriteria;
pub use eigen::{complete_eigen_decomposition, resolve_eigenvector, EigenDecomposition, EigenIterator};
pub use error::{EigenError, Result};
pub use householder::{householder_tridiagonalize, HouseholderResult};
pub use matrix::Matrix;
pub use power::{
    farthest_eigenvalue_power, inverse_power, nearest_eigenvalue_power, power_method,
    regular_power, PowerMethodKind, PowerResult,
};
pub use qr::qr_eigen_solve;
pub use vector::Vector;

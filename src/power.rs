//! Power iteration family
//!
//! Extracts a single eigenpair by repeated matrix-vector multiplication with
//! renormalization. Four variants share one iteration core:
//!
//! | Variant   | Matrix iterated        | Converges to                     |
//! |-----------|------------------------|----------------------------------|
//! | Regular   | `M`                    | largest-magnitude eigenvalue     |
//! | Inverse   | `M⁻¹`                  | smallest-magnitude eigenvalue    |
//! | Farthest  | `M − s·I`              | eigenvalue farthest from `s`     |
//! | Nearest   | `(M − s·I)⁻¹`          | eigenvalue nearest to `s`        |
//!
//! # Example
//!
//! ```
//! use nume_eigen::{regular_power, ConvergenceCriteria, Matrix, Vector};
//!
//! let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).unwrap();
//! let guess = Vector::from_slice(&[1.0, 1.0]);
//! let criteria = ConvergenceCriteria::new(1e-5, 100).unwrap();
//!
//! let result = regular_power(&m, &guess, &criteria).unwrap();
//! assert!((result.eigenvalue - 7.0).abs() < 1e-4);
//! assert!(result.eigenvector.is_parallel_to(&Vector::from_slice(&[0.6, 1.0]), 1e-4));
//! ```

use tracing::{debug, info, instrument, warn};

use crate::tolerances::{RELATIVE_ERROR_FLOOR, SYMMETRY_TOLERANCE};
use crate::{eigen, ConvergenceCriteria, EigenError, Matrix, Result, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which power-iteration variant to run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PowerMethodKind {
    /// Largest-magnitude eigenvalue
    Regular,
    /// Smallest-magnitude eigenvalue
    Inverse,
    /// Eigenvalue farthest from `shift`
    Farthest {
        /// Spectral shift
        shift: f64,
    },
    /// Eigenvalue nearest to `shift` (shift-and-invert)
    Nearest {
        /// Spectral shift
        shift: f64,
    },
}

/// Outcome of a power-iteration run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PowerResult {
    /// Eigenvalue estimate of the original matrix
    pub eigenvalue: f64,
    /// L2-normalized eigenvector estimate
    pub eigenvector: Vector<f64>,
    /// Iterations performed by the shared core
    pub iterations: usize,
    /// Relative change of the eigenvalue estimate in the last iteration
    /// (`+∞` if fewer than two estimates were produced)
    pub relative_error: f64,
    /// True if the run stopped on `epsilon` (or on a vanishing product)
    /// rather than on the iteration budget
    pub converged: bool,
}

/// Run the variant selected by `kind`
///
/// # Errors
///
/// Same as the variant being dispatched to.
///
/// # Example
///
/// ```
/// use nume_eigen::{power_method, ConvergenceCriteria, Matrix, PowerMethodKind, Vector};
///
/// let m = Matrix::from_rows(&[vec![2.0, 3.0], vec![5.0, 4.0]]).unwrap();
/// let guess = Vector::from_slice(&[1.0, 1.0]);
///
/// let smallest = power_method(PowerMethodKind::Inverse, &m, &guess, &ConvergenceCriteria::strict())
///     .unwrap();
/// assert!((smallest.eigenvalue + 1.0).abs() < 1e-9);
/// ```
pub fn power_method(
    kind: PowerMethodKind,
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    match kind {
        PowerMethodKind::Regular => regular_power(matrix, initial_guess, criteria),
        PowerMethodKind::Inverse => inverse_power(matrix, initial_guess, criteria),
        PowerMethodKind::Farthest { shift } => {
            farthest_eigenvalue_power(matrix, initial_guess, shift, criteria)
        }
        PowerMethodKind::Nearest { shift } => {
            nearest_eigenvalue_power(matrix, initial_guess, shift, criteria)
        }
    }
}

/// Regular power method: the eigenvalue of largest magnitude
///
/// # Errors
///
/// - `EmptyMatrix`, `NotSquare`, `DimensionMismatch` for malformed input
/// - `ZeroInitialGuess` if every component of the guess is zero
/// - `NonFinite` if the matrix or guess contains NaN/∞
/// - `InvalidInput` for invalid criteria
#[instrument(level = "debug", skip_all, fields(n = matrix.rows(), epsilon = criteria.epsilon))]
pub fn regular_power(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    validate_inputs(matrix, initial_guess, criteria)?;

    let result = iterate_power(matrix, initial_guess, criteria)?;

    info!(
        eigenvalue = result.eigenvalue,
        iterations = result.iterations,
        converged = result.converged,
        "Finished the regular power method"
    );
    Ok(result)
}

/// Inverse power method: the eigenvalue of smallest magnitude
///
/// Iterates on `M⁻¹`, whose dominant eigenvalue is `1/λ_min`. The eigenvector
/// is shared between `M` and `M⁻¹`, so it is reported unchanged. With a zero
/// iteration budget there is no estimate to invert and the eigenvalue is NaN.
///
/// # Errors
///
/// As [`regular_power`], plus `SingularMatrix` if `M` cannot be inverted.
#[instrument(level = "debug", skip_all, fields(n = matrix.rows(), epsilon = criteria.epsilon))]
pub fn inverse_power(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    validate_inputs(matrix, initial_guess, criteria)?;

    let inverse = matrix.inverse()?;
    debug!("Inverse matrix computed");

    let core = iterate_power(&inverse, initial_guess, criteria)?;
    let eigenvalue = if core.iterations == 0 {
        f64::NAN
    } else {
        1.0 / core.eigenvalue
    };

    info!(
        eigenvalue,
        iterations = core.iterations,
        converged = core.converged,
        "Finished the inverse power method"
    );
    Ok(PowerResult { eigenvalue, ..core })
}

/// Power method on `M − shift·I`: the eigenvalue farthest from `shift`
///
/// The reported eigenvector comes from [`eigen::resolve_eigenvector`] when
/// `M` is symmetric; otherwise the iteration's own vector is kept.
///
/// # Errors
///
/// As [`regular_power`], plus `NonFinite` for a non-finite shift.
#[instrument(
    level = "debug",
    skip(matrix, initial_guess, criteria),
    fields(n = matrix.rows(), epsilon = criteria.epsilon)
)]
pub fn farthest_eigenvalue_power(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    shift: f64,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    validate_inputs(matrix, initial_guess, criteria)?;
    if !shift.is_finite() {
        return Err(EigenError::NonFinite);
    }

    let shifted = matrix.shifted(shift)?;
    let core = iterate_power(&shifted, initial_guess, criteria)?;

    let eigenvalue = core.eigenvalue + shift;
    let eigenvector =
        corresponding_eigenvector(matrix, eigenvalue, core.iterations, core.eigenvector)?;

    info!(
        eigenvalue,
        iterations = core.iterations,
        converged = core.converged,
        "Finished the farthest eigenvalue power method"
    );
    Ok(PowerResult {
        eigenvalue,
        eigenvector,
        ..core
    })
}

/// Inverse power method on `M − shift·I`: the eigenvalue nearest to `shift`
///
/// # Errors
///
/// As [`inverse_power`]. `SingularMatrix` is returned when `shift` is
/// (numerically) an eigenvalue of `M`.
#[instrument(
    level = "debug",
    skip(matrix, initial_guess, criteria),
    fields(n = matrix.rows(), epsilon = criteria.epsilon)
)]
pub fn nearest_eigenvalue_power(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    shift: f64,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    validate_inputs(matrix, initial_guess, criteria)?;
    if !shift.is_finite() {
        return Err(EigenError::NonFinite);
    }

    let shifted = matrix.shifted(shift)?;
    let inner = inverse_power(&shifted, initial_guess, criteria)?;

    let eigenvalue = inner.eigenvalue + shift;
    let eigenvector =
        corresponding_eigenvector(matrix, eigenvalue, inner.iterations, inner.eigenvector)?;

    info!(
        eigenvalue,
        iterations = inner.iterations,
        converged = inner.converged,
        "Finished the nearest eigenvalue power method"
    );
    Ok(PowerResult {
        eigenvalue,
        eigenvector,
        ..inner
    })
}

/// Pick the eigenvector reported by a shifted variant
///
/// Without a single iteration there is no estimate to resolve against, so
/// the normalized guess is returned as is.
fn corresponding_eigenvector(
    matrix: &Matrix<f64>,
    eigenvalue: f64,
    iterations: usize,
    iterated: Vector<f64>,
) -> Result<Vector<f64>> {
    if iterations == 0 {
        return Ok(iterated);
    }
    if matrix.is_symmetric(SYMMETRY_TOLERANCE) {
        return eigen::resolve_eigenvector(matrix, eigenvalue);
    }

    // M and M − s·I share eigenvectors, so the iterate is still usable
    warn!(
        eigenvalue,
        "Matrix is not symmetric, keeping the power iteration eigenvector"
    );
    Ok(iterated)
}

fn validate_inputs(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    criteria: &ConvergenceCriteria,
) -> Result<()> {
    criteria.validate()?;

    if matrix.is_empty() {
        return Err(EigenError::EmptyMatrix);
    }
    matrix.require_square()?;

    if initial_guess.len() != matrix.cols() {
        return Err(EigenError::DimensionMismatch {
            expected: matrix.cols(),
            actual: initial_guess.len(),
        });
    }
    if initial_guess.is_zero() {
        return Err(EigenError::ZeroInitialGuess);
    }
    if !matrix.is_finite() || !initial_guess.is_finite() {
        return Err(EigenError::NonFinite);
    }

    Ok(())
}

/// Shared normalized-iteration core
///
/// Inputs must already be validated. `λ = y·v` uses the unnormalized product
/// and the previous unit vector; the first step has nothing to compare
/// against and never stops the loop.
fn iterate_power(
    matrix: &Matrix<f64>,
    initial_guess: &Vector<f64>,
    criteria: &ConvergenceCriteria,
) -> Result<PowerResult> {
    let mut eigenvector = initial_guess.normalize()?;
    let mut eigenvalue = 0.0;
    let mut previous: Option<f64> = None;
    let mut relative_error = f64::INFINITY;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < criteria.max_iterations {
        iterations += 1;

        let y = matrix.matvec(&eigenvector)?;
        let norm_y = y.norm_l2();
        if norm_y == 0.0 {
            warn!(
                iteration = iterations,
                "Product vanished, stopping with the last estimate"
            );
            converged = true;
            break;
        }

        let estimate = y.dot(&eigenvector)?;
        eigenvector = y.normalize()?;

        if let Some(prev) = previous {
            let scale = estimate.abs().max(prev.abs()).max(RELATIVE_ERROR_FLOOR);
            relative_error = (estimate - prev).abs() / scale;
        }
        previous = Some(estimate);
        eigenvalue = estimate;

        debug!(
            iteration = iterations,
            eigenvalue, relative_error, "Power iteration step"
        );

        if relative_error < criteria.epsilon {
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            max_iterations = criteria.max_iterations,
            relative_error, "Iteration budget exhausted, returning best estimate"
        );
    }

    Ok(PowerResult {
        eigenvalue,
        eigenvector,
        iterations,
        relative_error,
        converged,
    })
}

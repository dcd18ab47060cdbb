//! Numerical thresholds shared by the solvers
//!
//! All values assume IEEE 754 double precision (~15.9 significant digits).

/// Magnitude below which a norm, pivot or sub-diagonal entry is treated as zero.
///
/// Used by Householder reflector construction and Givens rotations. Matrix
/// inversion scales it by the largest entry magnitude.
pub const NUMERICAL_ZERO: f64 = 1e-14;

/// Floor for the denominator of the power-iteration relative error.
///
/// Keeps `|λ_new − λ_old| / max(|λ_new|, |λ_old|, floor)` finite when both
/// estimates are zero.
pub const RELATIVE_ERROR_FLOOR: f64 = 1e-15;

/// Relative tolerance for symmetry and tridiagonal-band checks.
///
/// Scaled by `max|aᵢⱼ|`; 1e-10 leaves room for the rounding left
/// behind by a user who symmetrized by hand.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Default sub-diagonal threshold for shifted QR iteration.
pub const DEFAULT_QR_TOLERANCE: f64 = 1e-12;

/// Default QR iteration budget.
///
/// Wilkinson-shifted QR typically needs 2-3 steps per eigenvalue; the budget
/// only matters for pathological inputs.
pub const DEFAULT_QR_MAX_ITERATIONS: usize = 1000;

/// Default power-iteration convergence threshold (interactive default).
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Default power-iteration budget (interactive default).
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

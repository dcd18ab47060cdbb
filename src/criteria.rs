//! Convergence configuration for the iterative solvers
//!
//! # Examples
//!
//! ```
//! use nume_eigen::ConvergenceCriteria;
//!
//! // Interactive defaults: epsilon = 1e-6, 100 iterations
//! let defaults = ConvergenceCriteria::default();
//! assert_eq!(defaults.max_iterations, 100);
//!
//! // Custom configuration using builder pattern
//! let custom = ConvergenceCriteria::new(1e-10, 500)
//!     .unwrap()
//!     .with_max_iterations(1000)
//!     .build();
//! assert_eq!(custom.max_iterations, 1000);
//! ```

use crate::tolerances::{DEFAULT_EPSILON, DEFAULT_MAX_ITERATIONS};
use crate::{EigenError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stopping rule for power iteration
///
/// Iteration stops when the relative change of the eigenvalue estimate
/// drops below `epsilon`, or after `max_iterations` steps, whichever comes
/// first. Running out of iterations is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvergenceCriteria {
    /// Relative error threshold, must be finite and > 0
    pub epsilon: f64,
    /// Iteration budget
    pub max_iterations: usize,
}

impl Default for ConvergenceCriteria {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ConvergenceCriteria {
    /// Create validated criteria
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `epsilon` is not finite and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::ConvergenceCriteria;
    ///
    /// assert!(ConvergenceCriteria::new(1e-5, 100).is_ok());
    /// assert!(ConvergenceCriteria::new(0.0, 100).is_err());
    /// assert!(ConvergenceCriteria::new(f64::NAN, 100).is_err());
    /// ```
    pub fn new(epsilon: f64, max_iterations: usize) -> Result<Self> {
        let criteria = Self {
            epsilon,
            max_iterations,
        };
        criteria.validate()?;
        Ok(criteria)
    }

    /// Tight tolerance with a generous budget
    pub fn strict() -> Self {
        Self {
            epsilon: 1e-12,
            max_iterations: 10_000,
        }
    }

    /// Loose tolerance with a small budget, for quick previews
    pub fn relaxed() -> Self {
        Self {
            epsilon: 1e-4,
            max_iterations: 50,
        }
    }

    /// Set the relative error threshold
    ///
    /// Not validated here; the solvers call [`validate`](Self::validate).
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Finalize the builder chain
    pub fn build(self) -> Self {
        self
    }

    /// Check that `epsilon` is finite and positive
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the offending value.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(EigenError::InvalidInput(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

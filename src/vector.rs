//! Dense vector type

use crate::{EigenError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dense real vector
///
/// # Examples
///
/// ```
/// use nume_eigen::Vector;
///
/// let v = Vector::from_slice(&[3.0, 4.0]);
/// assert_eq!(v.norm_l2(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T>
where
    T: Clone,
{
    /// Create vector from slice
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v.len(), 3);
    /// ```
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create vector taking ownership of `data`
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get underlying data as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the vector and return its data
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get vector length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if vector is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let v: Vector<f64> = Vector::from_slice(&[]);
    /// assert!(v.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to element `i`, or `None` if out of bounds
    pub fn get(&self, i: usize) -> Option<&T> {
        self.data.get(i)
    }
}

impl Vector<f64> {
    /// Create a zero vector of length `n`
    pub fn zeros(n: usize) -> Self {
        Self { data: vec![0.0; n] }
    }

    /// Dot product
    ///
    /// # Errors
    ///
    /// Returns [`EigenError::DimensionMismatch`] if lengths differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> Result<f64> {
        self.check_len(other)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum())
    }

    /// Euclidean (L2) norm
    ///
    /// Elements are divided by the largest magnitude before squaring, so
    /// the result neither overflows nor underflows for finite input.
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let big = Vector::from_slice(&[3e200, 4e200]);
    /// assert!((big.norm_l2() / 5e200 - 1.0).abs() < 1e-15);
    /// ```
    pub fn norm_l2(&self) -> f64 {
        let largest = self.data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
        if largest == 0.0 || !largest.is_finite() {
            return self.data.iter().map(|x| x * x).sum::<f64>().sqrt();
        }
        largest
            * self
                .data
                .iter()
                .map(|x| {
                    let r = x / largest;
                    r * r
                })
                .sum::<f64>()
                .sqrt()
    }

    /// Multiply every element by `factor`
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            data: self.data.iter().map(|x| x * factor).collect(),
        }
    }

    /// Element-wise subtraction `self - other`
    ///
    /// # Errors
    ///
    /// Returns [`EigenError::DimensionMismatch`] if lengths differ.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
        })
    }

    /// Scale to unit L2 norm
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let v = Vector::from_slice(&[3.0, 4.0]).normalize().unwrap();
    /// assert!((v.as_slice()[0] - 0.6).abs() < 1e-12);
    /// assert!((v.as_slice()[1] - 0.8).abs() < 1e-12);
    /// ```
    pub fn normalize(&self) -> Result<Self> {
        let norm = self.norm_l2();
        if norm == 0.0 {
            return Err(EigenError::InvalidInput(
                "Cannot normalize the zero vector".to_string(),
            ));
        }
        Ok(Self {
            data: self.data.iter().map(|x| x / norm).collect(),
        })
    }

    /// True if every element is exactly zero
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|&x| x == 0.0)
    }

    /// True if every element is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }

    /// Sign-agnostic direction comparison
    ///
    /// Normalizes both vectors and checks that they agree element-wise within
    /// `tolerance`, either directly or after flipping one of them. Eigenvectors
    /// are only defined up to a scalar, so this is how they are compared.
    ///
    /// Returns `false` when lengths differ or either vector is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use nume_eigen::Vector;
    ///
    /// let a = Vector::from_slice(&[3.0 / 5.0, 1.0]);
    /// let b = Vector::from_slice(&[-0.6, -1.0]);
    /// assert!(a.is_parallel_to(&b, 1e-12));
    /// ```
    pub fn is_parallel_to(&self, other: &Self, tolerance: f64) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (Ok(a), Ok(b)) = (self.normalize(), other.normalize()) else {
            return false;
        };

        let same = a
            .data
            .iter()
            .zip(b.data.iter())
            .all(|(x, y)| (x - y).abs() <= tolerance);
        let flipped = a
            .data
            .iter()
            .zip(b.data.iter())
            .all(|(x, y)| (x + y).abs() <= tolerance);

        same || flipped
    }

    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(EigenError::DimensionMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let v = Vector::from_slice(&[1.0]);
        assert_eq!(v.get(0), Some(&1.0));
        assert_eq!(v.get(1), None);
    }

    #[test]
    fn test_dot() {
        let a = Vector::from_slice(&[1.0, -2.0]);
        let b = Vector::from_slice(&[3.0, 4.0]);
        assert_eq!(a.dot(&b).unwrap(), -5.0);
    }

    #[test]
    fn test_dot_size_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[1.0]);
        assert_eq!(
            a.dot(&b),
            Err(EigenError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_norm_and_scale() {
        let v = Vector::from_slice(&[3.0, 4.0]);
        assert_eq!(v.norm_l2(), 5.0);
        assert_eq!(v.scale(2.0).as_slice(), &[6.0, 8.0]);
    }

    #[test]
    fn test_norm_extreme_magnitudes() {
        let huge = Vector::from_slice(&[1e200, 1e200]);
        assert!((huge.norm_l2() / (2f64.sqrt() * 1e200) - 1.0).abs() < 1e-15);

        let tiny = Vector::from_slice(&[1e-200, 1e-200]);
        assert!((tiny.norm_l2() / (2f64.sqrt() * 1e-200) - 1.0).abs() < 1e-15);

        for v in [huge, tiny] {
            let unit = v.normalize().unwrap();
            assert!((unit.norm_l2() - 1.0).abs() < 1e-15);
            assert!((unit.as_slice()[0] - 0.5f64.sqrt()).abs() < 1e-15);
        }
    }

    #[test]
    fn test_norm_non_finite() {
        assert_eq!(Vector::from_slice(&[1.0, f64::INFINITY]).norm_l2(), f64::INFINITY);
        assert!(Vector::from_slice(&[0.0, f64::NAN]).norm_l2().is_nan());
    }

    #[test]
    fn test_sub() {
        let a = Vector::from_slice(&[5.0, 5.0]);
        let b = Vector::from_slice(&[1.0, 2.0]);
        assert_eq!(a.sub(&b).unwrap().as_slice(), &[4.0, 3.0]);
    }

    #[test]
    fn test_normalize_zero_vector() {
        let v = Vector::zeros(3);
        assert!(v.is_zero());
        assert!(matches!(v.normalize(), Err(EigenError::InvalidInput(_))));
    }

    #[test]
    fn test_is_finite() {
        assert!(Vector::from_slice(&[1.0, 2.0]).is_finite());
        assert!(!Vector::from_slice(&[1.0, f64::NAN]).is_finite());
    }

    #[test]
    fn test_is_parallel_rejects_orthogonal() {
        let a = Vector::from_slice(&[1.0, 0.0]);
        let b = Vector::from_slice(&[0.0, 1.0]);
        assert!(!a.is_parallel_to(&b, 1e-9));
        assert!(!a.is_parallel_to(&Vector::zeros(2), 1e-9));
        assert!(!a.is_parallel_to(&Vector::from_slice(&[1.0, 0.0, 0.0]), 1e-9));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_normalize_has_unit_norm(
                data in proptest::collection::vec(-100.0f64..100.0, 1..16)
            ) {
                let v = Vector::from_slice(&data);
                prop_assume!(v.norm_l2() > 1e-6);
                let unit = v.normalize().unwrap();
                prop_assert!((unit.norm_l2() - 1.0).abs() < 1e-12);
                prop_assert!(unit.is_parallel_to(&v, 1e-9));
            }

            #[test]
            fn prop_scaled_vector_is_parallel(
                data in proptest::collection::vec(-10.0f64..10.0, 1..8),
                factor in prop_oneof![-5.0f64..-0.1, 0.1f64..5.0]
            ) {
                let v = Vector::from_slice(&data);
                prop_assume!(v.norm_l2() > 1e-3);
                prop_assert!(v.is_parallel_to(&v.scale(factor), 1e-9));
            }
        }
    }
}

//! Amplitude vectors.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonConfig;
use crate::error::{StateError, StateResult};

/// Epsilon below which a real or imaginary component counts as zero.
pub const COMPONENT_EPSILON: f64 = 1e-9;

/// A complex state vector over `n` qubits.
///
/// Qubit 0 is the least significant bit of an amplitude index. The vector is
/// immutable once constructed; algebraic operations return new vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeVector {
    amplitudes: Vec<Complex64>,
    num_used_gates: usize,
}

impl AmplitudeVector {
    /// Create a vector from raw amplitudes.
    ///
    /// The length must be a power of two. Normalisation is not checked; use
    /// [`AmplitudeVector::from_backend`] for simulator output.
    pub fn new(amplitudes: Vec<Complex64>, num_used_gates: usize) -> StateResult<Self> {
        if !amplitudes.len().is_power_of_two() {
            return Err(StateError::InvalidLength(amplitudes.len()));
        }
        Ok(Self {
            amplitudes,
            num_used_gates,
        })
    }

    /// Create a vector from backend output, rejecting non-normalised states.
    pub fn from_backend(
        amplitudes: Vec<Complex64>,
        num_used_gates: usize,
        tolerance: f64,
    ) -> StateResult<Self> {
        let vector = Self::new(amplitudes, num_used_gates)?;
        let sum: f64 = vector.amplitudes.iter().map(Complex64::norm_sqr).sum();
        if (sum - 1.0).abs() > tolerance {
            return Err(StateError::NotNormalized(sum));
        }
        Ok(vector)
    }

    /// The all-zero basis state |0…0⟩ over `num_qubits` qubits.
    pub fn create_zero(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_used_gates: 0,
        }
    }

    /// Amplitude at basis index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn at(&self, i: usize) -> Complex64 {
        self.amplitudes[i]
    }

    /// All amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Number of amplitudes (2^n).
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: a vector holds at least one amplitude.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Number of qubits the vector spans.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Number of gates used to produce this vector.
    pub fn num_used_gates(&self) -> usize {
        self.num_used_gates
    }

    /// Measurement probabilities, rounded to `decimals` places.
    pub fn to_probabilities(&self, decimals: u32) -> Vec<f64> {
        let scale = 10f64.powi(decimals as i32);
        self.amplitudes
            .iter()
            .map(|a| (a.norm_sqr() * scale).round() / scale)
            .collect()
    }

    /// True if every amplitude is zero.
    pub fn is_zero(&self) -> bool {
        self.amplitudes.iter().all(|a| is_zero_component(a.re) && is_zero_component(a.im))
    }

    /// True if no amplitude has an imaginary part.
    pub fn is_real(&self) -> bool {
        self.amplitudes.iter().all(|a| is_zero_component(a.im))
    }

    /// True if no amplitude has a real part.
    pub fn is_imag(&self) -> bool {
        self.amplitudes.iter().all(|a| is_zero_component(a.re))
    }

    /// True if exactly one basis state carries a non-zero amplitude.
    pub fn is_classical(&self) -> bool {
        self.amplitudes
            .iter()
            .filter(|a| !is_zero_component(a.re) || !is_zero_component(a.im))
            .count()
            == 1
    }

    /// True if some amplitude has both a real and an imaginary part.
    pub fn is_complex(&self) -> bool {
        self.amplitudes
            .iter()
            .any(|a| !is_zero_component(a.re) && !is_zero_component(a.im))
    }

    /// Tolerance-based equality against a vector at least as long as `self`.
    ///
    /// With `config.force_equal` set the result is `true` without comparing,
    /// unless `ignore_override` is passed.
    pub fn is_equal_to(
        &self,
        other: &AmplitudeVector,
        config: &ComparisonConfig,
        ignore_override: bool,
    ) -> StateResult<bool> {
        if other.len() < self.len() {
            return Err(StateError::LengthMismatch {
                this: self.len(),
                other: other.len(),
            });
        }
        if config.force_equal && !ignore_override {
            return Ok(true);
        }
        let diff = self.get_diff(other)?;
        Ok(diff.iter().all(|d| d.norm() <= config.tolerance))
    }

    /// Element-wise `self - other`, zero-padding `self` if shorter.
    pub fn get_diff(&self, other: &AmplitudeVector) -> StateResult<Vec<Complex64>> {
        if self.len() > other.len() {
            return Err(StateError::LengthMismatch {
                this: self.len(),
                other: other.len(),
            });
        }
        let zero = Complex64::new(0.0, 0.0);
        Ok(other
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, b)| self.amplitudes.get(i).copied().unwrap_or(zero) - b)
            .collect())
    }
}

#[inline]
fn is_zero_component(value: f64) -> bool {
    value.abs() < COMPONENT_EPSILON
}

impl fmt::Display for AmplitudeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.num_qubits().max(1);
        for (i, a) in self.amplitudes.iter().enumerate() {
            let sign = if a.im < 0.0 { '-' } else { '+' };
            writeln!(
                f,
                "|{i:0width$b}⟩ {:+.3}{sign}{:.3}i",
                a.re,
                a.im.abs()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_create_zero() {
        let v = AmplitudeVector::create_zero(2);
        assert_eq!(v.len(), 4);
        assert_eq!(v.num_qubits(), 2);
        assert_eq!(v.at(0), c(1.0, 0.0));
        assert!(v.is_classical());
        assert!(v.is_real());
        assert!(!v.is_complex());
    }

    #[test]
    fn test_invalid_length() {
        let err = AmplitudeVector::new(vec![c(1.0, 0.0); 3], 0).unwrap_err();
        assert!(matches!(err, StateError::InvalidLength(3)));
    }

    #[test]
    fn test_from_backend_rejects_unnormalised() {
        let err = AmplitudeVector::from_backend(vec![c(1.0, 0.0), c(1.0, 0.0)], 0, 1e-6)
            .unwrap_err();
        assert!(matches!(err, StateError::NotNormalized(s) if (s - 2.0).abs() < 1e-12));

        let ok = AmplitudeVector::from_backend(
            vec![c(FRAC_1_SQRT_2, 0.0), c(0.0, FRAC_1_SQRT_2)],
            1,
            1e-6,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_probabilities_rounded() {
        let v = AmplitudeVector::new(vec![c(FRAC_1_SQRT_2, 0.0), c(0.0, -FRAC_1_SQRT_2)], 1)
            .unwrap();
        assert_eq!(v.to_probabilities(3), vec![0.5, 0.5]);
    }

    #[test]
    fn test_classification() {
        let imag = AmplitudeVector::new(vec![c(0.0, 1.0), c(0.0, 0.0)], 0).unwrap();
        assert!(imag.is_imag());
        assert!(!imag.is_real());
        assert!(imag.is_classical());

        let mixed = AmplitudeVector::new(vec![c(0.5, 0.5), c(0.5, 0.5)], 0).unwrap();
        assert!(mixed.is_complex());
        assert!(!mixed.is_classical());

        let zero = AmplitudeVector::new(vec![c(0.0, 0.0); 2], 0).unwrap();
        assert!(zero.is_zero());
        assert!(!zero.is_classical());
    }

    #[test]
    fn test_equality_with_tolerance() {
        let a = AmplitudeVector::new(vec![c(1.0, 0.0), c(0.0, 0.0)], 0).unwrap();
        let b = AmplitudeVector::new(vec![c(0.95, 0.0), c(0.05, 0.0)], 0).unwrap();
        let loose = ComparisonConfig::default();
        let tight = ComparisonConfig::with_tolerance(0.01);
        assert!(a.is_equal_to(&b, &loose, false).unwrap());
        assert!(!a.is_equal_to(&b, &tight, false).unwrap());
    }

    #[test]
    fn test_equality_override() {
        let a = AmplitudeVector::create_zero(1);
        let b = AmplitudeVector::new(vec![c(0.0, 0.0), c(1.0, 0.0)], 0).unwrap();
        let forced = ComparisonConfig::default().with_force_equal(true);
        assert!(a.is_equal_to(&b, &forced, false).unwrap());
        assert!(!a.is_equal_to(&b, &forced, true).unwrap());
    }

    #[test]
    fn test_shorter_self_is_padded() {
        let short = AmplitudeVector::create_zero(1);
        let long = AmplitudeVector::create_zero(2);
        let cfg = ComparisonConfig::default();
        assert!(short.is_equal_to(&long, &cfg, true).unwrap());
        assert_eq!(short.get_diff(&long).unwrap().len(), 4);

        assert!(matches!(
            long.is_equal_to(&short, &cfg, true),
            Err(StateError::LengthMismatch { this: 4, other: 2 })
        ));
        assert!(long.get_diff(&short).is_err());
    }

    #[test]
    fn test_display_labels_basis_states() {
        let v = AmplitudeVector::create_zero(2);
        let text = v.to_string();
        assert!(text.starts_with("|00⟩ +1.000+0.000i"));
        assert_eq!(text.lines().count(), 4);
    }
}

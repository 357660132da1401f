//! Rational phases modulo 2π.

use num_rational::Rational64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A phase angle stored as a rational multiple of π, always normalised into
/// the half-open interval `[0, 2)`.
///
/// `Phase::new(1, 4)` is the T angle π/4, `Phase::new(1, 1)` is π.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Rational64", into = "Rational64")]
pub struct Phase(Rational64);

impl Phase {
    /// Create the phase `numer/denom · π`, reduced modulo 2.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn new(numer: i64, denom: i64) -> Self {
        Self::from_rational(Rational64::new(numer, denom))
    }

    /// Create a phase from a rational multiple of π.
    pub fn from_rational(value: Rational64) -> Self {
        let two = Rational64::from_integer(2);
        let mut r = value % two;
        if r < Rational64::zero() {
            r += two;
        }
        Phase(r)
    }

    /// The zero phase.
    pub fn zero() -> Self {
        Phase(Rational64::zero())
    }

    /// The phase π.
    pub fn pi() -> Self {
        Phase(Rational64::one())
    }

    /// The underlying rational in `[0, 2)`.
    pub fn to_rational(self) -> Rational64 {
        self.0
    }

    /// Numerator of the reduced fraction.
    pub fn numer(self) -> i64 {
        *self.0.numer()
    }

    /// Denominator of the reduced fraction.
    pub fn denom(self) -> i64 {
        *self.0.denom()
    }

    /// Whether this phase is zero (the gate is an identity).
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Whether this phase is exactly π (a Pauli Z or X).
    pub fn is_pi(self) -> bool {
        self.0.is_one()
    }

    /// Whether this is a multiple of π/2.
    pub fn is_clifford(self) -> bool {
        matches!(self.denom(), 1 | 2)
    }

    /// Whether this is a multiple of π/4 (the Clifford+T phases).
    pub fn is_clifford_t(self) -> bool {
        matches!(self.denom(), 1 | 2 | 4)
    }

    /// The angle in radians.
    pub fn to_radians(self) -> f64 {
        self.numer() as f64 / self.denom() as f64 * PI
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Rational64> for Phase {
    fn from(value: Rational64) -> Self {
        Self::from_rational(value)
    }
}

impl From<Phase> for Rational64 {
    fn from(phase: Phase) -> Self {
        phase.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.numer(), self.denom()) {
            (0, _) => write!(f, "0"),
            (1, 1) => write!(f, "π"),
            (n, 1) => write!(f, "{n}π"),
            (1, d) => write!(f, "π/{d}"),
            (n, d) => write!(f, "{n}π/{d}"),
        }
    }
}

impl std::ops::Add for Phase {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Phase::from_rational(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Phase {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Phase::from_rational(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Phase {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Phase::from_rational(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalisation() {
        assert_eq!(Phase::new(5, 2), Phase::new(1, 2));
        assert_eq!(Phase::new(-1, 4), Phase::new(7, 4));
        assert_eq!(Phase::new(4, 1), Phase::zero());
        assert_eq!(Phase::new(-2, 1), Phase::zero());
        assert_eq!(Phase::new(2, 4).denom(), 2);
    }

    #[test]
    fn test_arithmetic_wraps() {
        let t = Phase::new(1, 4);
        assert_eq!(t + t, Phase::new(1, 2));
        assert_eq!(Phase::new(7, 4) + t, Phase::zero());
        assert_eq!(-Phase::new(1, 2), Phase::new(3, 2));
        assert_eq!(Phase::new(1, 4) - Phase::new(1, 2), Phase::new(7, 4));
        assert!((Phase::new(1, 2) + Phase::new(1, 2)).is_pi());
    }

    #[test]
    fn test_classification() {
        assert!(Phase::new(3, 2).is_clifford());
        assert!(!Phase::new(1, 4).is_clifford());
        assert!(Phase::new(5, 4).is_clifford_t());
        assert!(!Phase::new(1, 8).is_clifford_t());
        assert!(Phase::zero().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Phase::zero().to_string(), "0");
        assert_eq!(Phase::pi().to_string(), "π");
        assert_eq!(Phase::new(1, 4).to_string(), "π/4");
        assert_eq!(Phase::new(3, 2).to_string(), "3π/2");
    }

    #[test]
    fn test_serde_normalises_input() {
        let phase: Phase = serde_json::from_str("[9, 4]").unwrap();
        assert_eq!(phase, Phase::new(1, 4));
        assert_eq!(serde_json::to_string(&phase).unwrap(), "[1,4]");
    }
}

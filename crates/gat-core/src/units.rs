//! Compile-time unit safety for distribution equipment ratings.
//!
//! Transformer and line ratings mix volts, kilovolt-amperes and per-unit
//! values in the same formulas (`Z_base = V² / (S · 1000)`). Keeping them as
//! raw `f64` invites kVA/VA or kV/V slips, so each gets a newtype.
//!
//! All types use `#[repr(transparent)]` and carry no runtime overhead.
//!
//! # Usage
//!
//! ```
//! use gat_core::units::{KilovoltAmperes, Volts};
//!
//! let v = Volts(120.0);
//! let s = KilovoltAmperes(25.0);
//!
//! // Base impedance in ohms
//! let z_base = v.squared() / s.to_volt_amperes();
//! assert!((z_base - 0.576).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Macro to implement common arithmetic operations for unit types
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.4} {}", self.0, $unit_name)
            }
        }

        impl $type {
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// True for an exact zero, the "not defined" marker in ratings
            #[inline]
            pub fn is_zero(self) -> bool {
                self.0 == 0.0
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

// =============================================================================
// Voltage Units
// =============================================================================

/// Voltage magnitude in volts (V)
///
/// Distribution transformer ratings are given in volts (e.g. 7200 V primary,
/// 120 V secondary).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Volts(pub f64);

impl_unit_ops!(Volts, "V");

impl Volts {
    /// V², the numerator of every base-impedance formula
    #[inline]
    pub fn squared(self) -> f64 {
        self.0 * self.0
    }
}

// =============================================================================
// Power Units
// =============================================================================

/// Apparent power in kilovolt-amperes (kVA)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KilovoltAmperes(pub f64);

impl_unit_ops!(KilovoltAmperes, "kVA");

impl KilovoltAmperes {
    /// Convert to volt-amperes (S · 1000)
    #[inline]
    pub fn to_volt_amperes(self) -> f64 {
        self.0 * 1000.0
    }
}

/// Base impedance in ohms for a rated voltage and apparent power:
/// `Z_base = V² / (S · 1000)`.
#[inline]
pub fn base_impedance_ohms(voltage: Volts, rating: KilovoltAmperes) -> f64 {
    voltage.squared() / rating.to_volt_amperes()
}

// =============================================================================
// Tests
// =============================================================================

//! # Unit Types
//!
//! Type-safe wrappers for the SI quantities the moving load engine reports.
//! These are lightweight f64 newtypes; the engine itself works in plain
//! consistent scalars (m, kN, kN·m) and the wrappers are used at the edges
//! where values get labelled and printed.
//!
//! ## Units
//!
//! - Length: metres (m)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-metres (kN·m)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{KiloNewtons, Meters};
//!
//! let w = KiloNewtons(30.0) + KiloNewtons(20.0);
//! assert_eq!(w.to_string(), "50.00 kN");
//! assert_eq!(Meters(4.5).to_string(), "4.50 m");
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

impl Mul<Meters> for KiloNewtons {
    type Output = KiloNewtonMeters;
    fn mul(self, rhs: Meters) -> Self::Output {
        KiloNewtonMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic and display (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_quantity {
    ($type:ty, $symbol:literal) => {
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

        impl $type {
            /// Unit symbol used when printing
            pub const SYMBOL: &'static str = $symbol;

            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }

        /// Two decimals unless the caller asks for a different precision.
        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let precision = f.precision().unwrap_or(2);
                write!(f, "{:.*} {}", precision, self.0, $symbol)
            }
        }
    };
}

impl_quantity!(Meters, "m");
impl_quantity!(KiloNewtons, "kN");
impl_quantity!(KiloNewtonMeters, "kN·m");

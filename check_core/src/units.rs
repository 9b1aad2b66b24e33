//! # Unit Types
//!
//! Type-safe wrappers for the SI engineering units used by the design codes.
//! They are plain f64 newtypes: JSON stays clean (just numbers) and there is no
//! runtime overhead.
//!
//! ## Base Units
//!
//! The evaluation engine itself works in coherent SI base units so that code
//! equations can be written without conversion factors:
//!
//! - Length: metres (m)
//! - Force: newtons (N)
//! - Stress: pascals (Pa)
//! - Moment: newton-metres (Nm)
//!
//! Practice (and section tables) use millimetres, kilonewtons and megapascals,
//! so the wrappers below convert between the two at the edges.
//!
//! ## Example
//!
//! ```rust
//! use check_core::units::{Kilonewtons, Meters, Millimeters, Newtons};
//!
//! let depth: Meters = Millimeters(304.0).into();
//! assert!((depth.0 - 0.304).abs() < 1e-12);
//!
//! let force: Kilonewtons = Newtons(12_500.0).into();
//! assert_eq!(force.0, 12.5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1.0e6)
    }
}

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMeters> for KilonewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KilonewtonMeters(nm.0 / 1000.0)
    }
}

impl From<KilonewtonMeters> for NewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1000.0)
    }
}

/// Raw value access and a `Display` carrying the unit symbol
macro_rules! unit_value {
    ($type:ty, $symbol:literal) => {
        impl $type {
            pub fn value(self) -> f64 {
                self.0
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $symbol),
                    None => write!(f, "{} {}", self.0, $symbol),
                }
            }
        }
    };
}

unit_value!(Meters, "m");
unit_value!(Millimeters, "mm");
unit_value!(Newtons, "N");
unit_value!(Kilonewtons, "kN");
unit_value!(Pascals, "Pa");
unit_value!(Megapascals, "MPa");
unit_value!(NewtonMeters, "Nm");
unit_value!(KilonewtonMeters, "kNm");

/// Convert a length in millimetres to metres (raw f64)
#[inline]
pub fn mm(value: f64) -> f64 {
    Meters::from(Millimeters(value)).0
}

/// Convert a stress in megapascals to pascals (raw f64)
#[inline]
pub fn mpa(value: f64) -> f64 {
    Pascals::from(Megapascals(value)).0
}

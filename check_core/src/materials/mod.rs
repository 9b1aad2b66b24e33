//! # Materials
//!
//! Structural steel material data: grade strengths by plate thickness and the
//! elastic constants used by the buckling equations.
//!
//! ## Example
//!
//! ```rust
//! use check_core::materials::{SteelGrade, SteelMaterial};
//!
//! let steel = SteelMaterial::new(SteelGrade::C350L0);
//! assert_eq!(steel.elastic_modulus, 200.0e9);
//! assert_eq!(steel.shear_modulus, 80.0e9);
//! ```

pub mod steel;

pub use steel::SteelGrade;

use serde::{Deserialize, Serialize};

/// Young's modulus of structural steel (Pa)
pub const STEEL_ELASTIC_MODULUS: f64 = 200.0e9;

/// Shear modulus of structural steel (Pa)
pub const STEEL_SHEAR_MODULUS: f64 = 80.0e9;

/// A steel grade with its elastic constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    pub grade: SteelGrade,
    /// E (Pa)
    pub elastic_modulus: f64,
    /// G (Pa)
    pub shear_modulus: f64,
}

impl SteelMaterial {
    pub fn new(grade: SteelGrade) -> Self {
        Self {
            grade,
            elastic_modulus: STEEL_ELASTIC_MODULUS,
            shear_modulus: STEEL_SHEAR_MODULUS,
        }
    }
}

//! Structural Steel Grades
//!
//! Minimum yield and tensile strengths of the steel grades used in Australian
//! practice. Hot-rolled and plate grades lose strength as the plate gets
//! thicker, so strengths are looked up per plate thickness.
//!
//! ## Data Source
//!
//! - AS/NZS 3679.1: hot-rolled bars and sections (Grade 300, Grade 350)
//! - AS/NZS 3678: hot-rolled plates (Grade 250)
//! - AS/NZS 1163: cold-formed hollow sections (C250L0, C350L0, C450L0)
//!
//! ## Example
//!
//! ```rust
//! use check_core::materials::SteelGrade;
//!
//! // 310UB40.4 flange (10.2 mm) and web (6.1 mm)
//! let grade = SteelGrade::Grade300;
//! assert_eq!(grade.yield_strength(0.0102), 320.0e6);
//! assert_eq!(grade.tensile_strength(0.0102), 440.0e6);
//!
//! // Thicker plates have lower yield strength
//! assert_eq!(grade.yield_strength(0.020), 280.0e6);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::mpa;

/// Thickness band: `(max thickness in mm, fy in MPa, fu in MPa)`
type Band = (f64, f64, f64);

const GRADE_300: &[Band] = &[(11.0, 320.0, 440.0), (17.0, 300.0, 440.0), (f64::INFINITY, 280.0, 440.0)];
const GRADE_350: &[Band] = &[(11.0, 360.0, 480.0), (40.0, 340.0, 480.0), (f64::INFINITY, 330.0, 480.0)];
const GRADE_250: &[Band] = &[(8.0, 280.0, 410.0), (12.0, 260.0, 410.0), (f64::INFINITY, 250.0, 410.0)];
const C250L0: &[Band] = &[(f64::INFINITY, 250.0, 320.0)];
const C350L0: &[Band] = &[(f64::INFINITY, 350.0, 430.0)];
const C450L0: &[Band] = &[(f64::INFINITY, 450.0, 500.0)];

/// Structural steel grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// AS/NZS 3679.1 Grade 300 (universal beams and columns)
    #[serde(rename = "300")]
    Grade300,
    /// AS/NZS 3679.1 Grade 350
    #[serde(rename = "350")]
    Grade350,
    /// AS/NZS 3678 Grade 250 plate
    #[serde(rename = "250")]
    Grade250,
    /// AS/NZS 1163 C250L0
    C250L0,
    /// AS/NZS 1163 C350L0 (circular hollow sections)
    C350L0,
    /// AS/NZS 1163 C450L0 (rectangular and square hollow sections)
    C450L0,
}

impl SteelGrade {
    pub const ALL: [SteelGrade; 6] = [
        SteelGrade::Grade300,
        SteelGrade::Grade350,
        SteelGrade::Grade250,
        SteelGrade::C250L0,
        SteelGrade::C350L0,
        SteelGrade::C450L0,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SteelGrade::Grade300 => "Grade 300",
            SteelGrade::Grade350 => "Grade 350",
            SteelGrade::Grade250 => "Grade 250",
            SteelGrade::C250L0 => "C250L0",
            SteelGrade::C350L0 => "C350L0",
            SteelGrade::C450L0 => "C450L0",
        }
    }

    fn bands(&self) -> &'static [Band] {
        match self {
            SteelGrade::Grade300 => GRADE_300,
            SteelGrade::Grade350 => GRADE_350,
            SteelGrade::Grade250 => GRADE_250,
            SteelGrade::C250L0 => C250L0,
            SteelGrade::C350L0 => C350L0,
            SteelGrade::C450L0 => C450L0,
        }
    }

    fn band(&self, thickness_m: f64) -> Band {
        let t_mm = thickness_m * 1000.0;
        let bands = self.bands();
        bands
            .iter()
            .copied()
            .find(|(max_t, _, _)| t_mm <= max_t + 1e-6)
            .unwrap_or(bands[bands.len() - 1])
    }

    /// Minimum yield stress fy (Pa) for a plate of the given thickness (m)
    pub fn yield_strength(&self, thickness_m: f64) -> f64 {
        mpa(self.band(thickness_m).1)
    }

    /// Minimum tensile strength fu (Pa) for a plate of the given thickness (m)
    pub fn tensile_strength(&self, thickness_m: f64) -> f64 {
        mpa(self.band(thickness_m).2)
    }

    /// Governing (minimum) strengths over a set of plate thicknesses.
    ///
    /// Returns `(fy, fu)` in Pa.
    pub fn strengths_for(&self, thicknesses_m: &[f64]) -> (f64, f64) {
        thicknesses_m.iter().fold((f64::INFINITY, f64::INFINITY), |(fy, fu), &t| {
            (fy.min(self.yield_strength(t)), fu.min(self.tensile_strength(t)))
        })
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

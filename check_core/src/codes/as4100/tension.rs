//! Members subject to axial tension (AS 4100 7.2).

use serde::{Deserialize, Serialize};

use crate::codes::as4100::clauses::As4100Clause;
use crate::codes::Capacity;
use crate::forces::Action;
use crate::sections::SectionProperties;

/// Nominal section capacity in tension Nt = min(Ag·fy, αu·kt·An·fu)
pub fn nominal_capacity(section: &SectionProperties, alpha_u: f64, k_t: f64) -> (f64, f64) {
    let yield_capacity = section.area_gross * section.fy;
    let fracture_capacity = alpha_u * k_t * section.area_net * section.fu;
    (yield_capacity, fracture_capacity)
}

pub fn capacity(section: &SectionProperties, action: Action, phi: f64, alpha_u: f64, k_t: f64) -> Capacity {
    let (yield_capacity, fracture_capacity) = nominal_capacity(section, alpha_u, k_t);
    Capacity::new(action, yield_capacity.min(fracture_capacity), phi, As4100Clause::Tension.id()).with_all([
        ("Nt_yield", yield_capacity),
        ("Nt_fracture", fracture_capacity),
        ("kt", k_t),
    ])
}

/// Minimum areas to carry a design tension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredAreas {
    /// Gross area for yielding, N*/(φ·fy)
    pub gross: f64,
    /// Net area for fracture, N*/(φ·αu·kt·fu)
    pub net: f64,
}

/// Areas a section needs to carry `n_star` in tension
pub fn required_areas(n_star: f64, fy: f64, fu: f64, phi: f64, alpha_u: f64, k_t: f64) -> RequiredAreas {
    let n_star = n_star.abs();
    RequiredAreas {
        gross: n_star / (phi * fy),
        net: n_star / (phi * alpha_u * k_t * fu),
    }
}

//! # Members Subject to Axial Compression (AS 4100 Section 6)
//!
//! ## Design Equations
//!
//! | Quantity | Equation |
//! |----------|----------|
//! | Ns | kf·An·fy |
//! | λn | (le/r)√kf·√(fy/250) |
//! | αa | 2100(λn − 13.5) / (λn² − 15.3λn + 2050) |
//! | λ | λn + αa·αb |
//! | η | 0.00326(λ − 13.5) ≥ 0 |
//! | ξ | [(λ/90)² + 1 + η] / [2(λ/90)²] |
//! | αc | ξ[1 − √(1 − (90/(ξλ))²)] |
//! | Nc | αc·Ns ≤ Ns |

use serde::{Deserialize, Serialize};

use crate::codes::as4100::classification::form_factor;
use crate::codes::as4100::clauses::As4100Clause;
use crate::codes::Capacity;
use crate::forces::Action;
use crate::member::{Axis, Restraint};
use crate::sections::{Fabrication, SectionProperties};

/// Slenderness at and below which αc = 1 exactly
const PLATEAU_SLENDERNESS: f64 = 13.5;

/// Nominal section capacity in compression Ns = kf·An·fy (6.2.1)
pub fn section_capacity(section: &SectionProperties, kf: f64) -> f64 {
    kf * section.area_net * section.fy
}

/// Modified member slenderness λn (6.3.3)
pub fn modified_slenderness(effective_length: f64, radius_of_gyration: f64, kf: f64, fy: f64) -> f64 {
    (effective_length / radius_of_gyration) * kf.sqrt() * (fy / 250.0e6).sqrt()
}

/// Member section constant αb (Table 6.3.3(1)/(2)), by fabrication and
/// whether the section is fully effective
pub fn member_section_constant(fabrication: Fabrication, kf: f64) -> f64 {
    let fully_effective = kf >= 1.0;
    match (fabrication, fully_effective) {
        (Fabrication::HotFinished | Fabrication::StressRelieved, true) => -1.0,
        (Fabrication::HotFinished | Fabrication::StressRelieved, false) => -0.5,
        (Fabrication::ColdFormed, _) => -0.5,
        (Fabrication::HotRolled, true) => 0.0,
        (Fabrication::HotRolled, false) => 0.5,
        (Fabrication::LightlyWelded | Fabrication::HeavilyWelded, true) => 0.5,
        (Fabrication::LightlyWelded | Fabrication::HeavilyWelded, false) => 1.0,
    }
}

/// Points on the column curve for one slenderness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnCurve {
    pub alpha_a: f64,
    pub lambda: f64,
    pub eta: f64,
    pub xi: f64,
    /// Member slenderness reduction factor αc
    pub alpha_c: f64,
}

/// Member slenderness reduction factor αc (6.3.3)
pub fn slenderness_reduction(lambda_n: f64, alpha_b: f64) -> ColumnCurve {
    let alpha_a = 2100.0 * (lambda_n - 13.5) / (lambda_n * lambda_n - 15.3 * lambda_n + 2050.0);
    let lambda = lambda_n + alpha_a * alpha_b;
    if lambda <= PLATEAU_SLENDERNESS {
        return ColumnCurve {
            alpha_a,
            lambda,
            eta: 0.0,
            xi: f64::INFINITY,
            alpha_c: 1.0,
        };
    }

    let eta = 0.00326 * (lambda - PLATEAU_SLENDERNESS);
    let ratio = (lambda / 90.0).powi(2);
    let xi = (ratio + 1.0 + eta) / (2.0 * ratio);
    let inner = (1.0 - (90.0 / (xi * lambda)).powi(2)).max(0.0);
    let alpha_c = (xi * (1.0 - inner.sqrt())).min(1.0);

    ColumnCurve {
        alpha_a,
        lambda,
        eta,
        xi,
        alpha_c,
    }
}

/// Compression capacity for buckling about one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCompression {
    pub axis: Axis,
    pub effective_length: f64,
    pub lambda_n: f64,
    pub curve: ColumnCurve,
    /// Nominal member capacity Nc (N)
    pub nc: f64,
}

/// Nominal member capacity for flexural buckling about `axis`
pub fn axis_capacity(section: &SectionProperties, restraint: &Restraint, axis: Axis) -> AxisCompression {
    let kf = form_factor(section).kf;
    let ns = section_capacity(section, kf);
    let effective_length = restraint.effective_length(axis);
    let lambda_n = modified_slenderness(effective_length, section.r(axis), kf, section.fy);
    let curve = slenderness_reduction(lambda_n, member_section_constant(section.fabrication, kf));
    AxisCompression {
        axis,
        effective_length,
        lambda_n,
        curve,
        nc: curve.alpha_c * ns,
    }
}

/// Design compression capacity: the lesser of the two axis capacities.
///
/// Reported under 6.2 when buckling does not reduce the section capacity,
/// under 6.3.3 otherwise.
pub fn capacity(section: &SectionProperties, restraint: &Restraint, action: Action, phi: f64) -> Capacity {
    let ff = form_factor(section);
    let ns = section_capacity(section, ff.kf);
    let major = axis_capacity(section, restraint, Axis::Major);
    let minor = axis_capacity(section, restraint, Axis::Minor);
    let governing = if minor.nc <= major.nc { minor } else { major };

    let clause = if governing.curve.alpha_c < 1.0 {
        As4100Clause::MemberCompression
    } else {
        As4100Clause::SectionCompression
    };
    tracing::trace!(section = %section.id, axis = governing.axis.display_name(), alpha_c = governing.curve.alpha_c, "compression capacity");

    Capacity::new(action, governing.nc, phi, clause.id()).with_all([
        ("kf", ff.kf),
        ("Ae", ff.area_effective),
        ("Ns", ns),
        ("alpha_b", member_section_constant(section.fabrication, ff.kf)),
        ("lambda_n_major", major.lambda_n),
        ("alpha_c_major", major.curve.alpha_c),
        ("lambda_n_minor", minor.lambda_n),
        ("alpha_c_minor", minor.curve.alpha_c),
    ])
}

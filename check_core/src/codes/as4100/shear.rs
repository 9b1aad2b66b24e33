//! Shear capacity of webs (AS 4100 5.10, 5.11) and the shear and bending
//! interaction of 5.12.3.

use crate::codes::as4100::clauses::As4100Clause;
use crate::codes::Capacity;
use crate::errors::{DesignError, DesignResult};
use crate::forces::Action;
use crate::member::Axis;
use crate::sections::{SectionProperties, SectionShape};

/// Web slenderness above which a web is not unstiffened-checkable (5.10.1)
pub const WEB_SLENDERNESS_LIMIT: f64 = 180.0;

/// Web slenderness below which the web yields before buckling (5.11.2)
pub const WEB_YIELD_SLENDERNESS: f64 = 82.0;

/// Moment utilisation below which shear capacity is not reduced
pub const SHEAR_BENDING_THRESHOLD: f64 = 0.75;

/// (dp/tw)√(fy/250)
pub fn web_slenderness(clear_depth: f64, web_thickness: f64, fy: f64) -> f64 {
    (clear_depth / web_thickness) * (fy / 250.0e6).sqrt()
}

/// Vw = 0.6·fy·Aw (5.11.4)
pub fn shear_yield(fy: f64, shear_area: f64) -> f64 {
    0.6 * fy * shear_area
}

/// αv = (82/slenderness)² (5.11.5.1)
pub fn shear_buckling_factor(slenderness: f64) -> f64 {
    (WEB_YIELD_SLENDERNESS / slenderness).powi(2).min(1.0)
}

/// Shear yield of a plate at its interface with a connected component,
/// 0.6·fy·t·I/Q (5.11.4)
pub fn interface_shear(thickness: f64, fy: f64, first_moment: f64, second_moment: f64) -> f64 {
    0.6 * fy * thickness * second_moment / first_moment
}

/// Shear capacity limited by the welds connecting a component, Σvw·I/Q,
/// with `weld_capacities` per unit length (N/m)
pub fn weld_limited_shear(weld_capacities: &[f64], first_moment: f64, second_moment: f64) -> f64 {
    weld_capacities.iter().sum::<f64>() * second_moment / first_moment
}

/// Non-uniform shear factor 2/(0.9 + f*vm/f*va) ≤ 1 (5.11.3), from the
/// maximum and average elastic shear stresses
pub fn non_uniform_shear_factor(max_stress: f64, average_stress: f64) -> f64 {
    (2.0 / (0.9 + max_stress / average_stress)).min(1.0)
}

/// Ratio of maximum to average elastic shear stress in the plates resisting
/// shear along `axis`
pub fn shear_stress_ratio(shape: &SectionShape, axis: Axis) -> f64 {
    match (shape, axis) {
        // flanges act as rectangles in shear
        (SectionShape::ISection { .. }, Axis::Minor) => 1.5,
        (SectionShape::SolidCircle { .. }, _) => 4.0 / 3.0,
        _ => 1.0,
    }
}

/// Panel width and thickness of the plates resisting shear along `axis`.
///
/// Minor-axis shear on an I-section is carried by the flanges; each half
/// flange is an outstand from the web, measured as in classification.
fn shear_plates(shape: &SectionShape, axis: Axis) -> Option<(f64, f64)> {
    match (*shape, axis) {
        (
            SectionShape::ISection {
                depth,
                flange_thickness,
                web_thickness,
                ..
            },
            Axis::Major,
        ) => Some((depth - 2.0 * flange_thickness, web_thickness)),
        (
            SectionShape::ISection {
                flange_width,
                flange_thickness,
                web_thickness,
                ..
            },
            Axis::Minor,
        ) => Some(((flange_width - web_thickness) / 2.0, flange_thickness)),
        (SectionShape::Rhs { depth, thickness, .. }, Axis::Major) => Some((depth - 2.0 * thickness, thickness)),
        (SectionShape::Rhs { width, thickness, .. }, Axis::Minor) => Some((width - 2.0 * thickness, thickness)),
        (SectionShape::Chs { .. }, _) | (SectionShape::SolidCircle { .. }, _) => None,
    }
}

/// Design shear capacity for shear acting along `axis`.
///
/// Shear along the major axis is resisted by the webs, along the minor axis
/// by the flanges of an I-section or the short walls of an RHS. Plates with
/// a non-uniform shear stress distribution are reduced by αvma (5.11.3).
pub fn capacity(section: &SectionProperties, axis: Axis, action: Action, phi: f64) -> DesignResult<Capacity> {
    let stress_ratio = shear_stress_ratio(&section.shape, axis);
    let alpha_vma = non_uniform_shear_factor(stress_ratio, 1.0);

    match section.shape {
        SectionShape::Chs { .. } => {
            // 5.11.4(b): Vw = 0.36·fy·Ae
            let vw = 0.36 * section.fy * section.area_gross;
            return Ok(Capacity::new(action, vw, phi, As4100Clause::ShearYield.id()).with("Ae", section.area_gross));
        }
        SectionShape::SolidCircle { .. } => {
            let aw = section.shear_area(axis);
            let vw = shear_yield(section.fy, aw);
            return Ok(Capacity::new(action, alpha_vma * vw, phi, As4100Clause::ShearYield.id()).with_all([
                ("Aw", aw),
                ("Vw", vw),
                ("fvm_fva", stress_ratio),
                ("alpha_vma", alpha_vma),
            ]));
        }
        _ => {}
    }

    let Some((panel_width, thickness)) = shear_plates(&section.shape, axis) else {
        return Err(DesignError::inapplicable(
            As4100Clause::ShearYield.id().to_string(),
            format!("no shear capacity rule for a {}", section.shape.display_name()),
        ));
    };

    let slenderness = web_slenderness(panel_width, thickness, section.fy);
    if slenderness > WEB_SLENDERNESS_LIMIT {
        return Err(DesignError::inapplicable(
            As4100Clause::WebSlenderness.id().to_string(),
            format!("web slenderness {slenderness:.1} exceeds {WEB_SLENDERNESS_LIMIT} for an unstiffened web"),
        ));
    }

    let aw = section.shear_area(axis);
    let vw = shear_yield(section.fy, aw);

    if slenderness <= WEB_YIELD_SLENDERNESS {
        let mut cap = Capacity::new(action, alpha_vma * vw, phi, As4100Clause::ShearYield.id())
            .with_all([("Aw", aw), ("web_slenderness", slenderness)]);
        if alpha_vma < 1.0 {
            cap = cap.with_all([("Vw", vw), ("fvm_fva", stress_ratio), ("alpha_vma", alpha_vma)]);
        }
        return Ok(cap);
    }

    let alpha_v = shear_buckling_factor(slenderness);
    Ok(Capacity::new(action, alpha_vma * alpha_v * vw, phi, As4100Clause::ShearBuckling.id()).with_all([
        ("Aw", aw),
        ("web_slenderness", slenderness),
        ("Vw", vw),
        ("alpha_v", alpha_v),
        ("alpha_vma", alpha_vma),
    ]))
}

/// Utilisation of a web under coincident shear and major-axis bending
/// (5.12.3).
///
/// φVvm = φVv while M*/φMs ≤ 0.75, then φVv·(2.2 − 1.6·M*/φMs), so the
/// ratio is V*/φVvm. Past M* = φMs the web has no reduced capacity left to
/// report and the ratio is the larger of V*/(0.6·φVv) and M*/φMs.
pub fn shear_bending_ratio(v_star: f64, m_star: f64, phi_vv: f64, phi_ms: f64) -> f64 {
    let v = v_star.abs() / phi_vv;
    let m = m_star.abs() / phi_ms;
    if m <= SHEAR_BENDING_THRESHOLD {
        v
    } else if m <= 1.0 {
        v / (2.2 - 1.6 * m)
    } else {
        (v / 0.6).max(m)
    }
}

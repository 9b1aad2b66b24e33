//! # Members Subject to Bending (AS 4100 Section 5)
//!
//! Section moment capacity (5.2) and member moment capacity of segments
//! without full lateral restraint (5.6.1).
//!
//! ## Design Equations
//!
//! | Quantity | Equation |
//! |----------|----------|
//! | Ms | fy·Ze |
//! | le | kt·kl·kr·l |
//! | Mo | √[(π²EIy/le²)(GJ + π²EIw/le²)] |
//! | αs | 0.6[√((Ms/Mo)² + 3) − Ms/Mo] |
//! | αm | 1.7M*m / √(M2*² + M3*² + M4*²) ≤ 2.5 |
//! | Mb | αm·αs·Ms ≤ Ms |

use std::f64::consts::PI;

use crate::codes::as4100::classification::{classify_bending, effective_section_modulus, Slenderness};
use crate::codes::as4100::clauses::As4100Clause;
use crate::codes::Capacity;
use crate::errors::{DesignError, DesignResult};
use crate::forces::Action;
use crate::member::{Axis, LateralRestraint, Restraint, RestraintCode};
use crate::profile::Profile;
use crate::sections::{SectionProperties, SectionShape};

/// Upper limit of the moment modification factor
pub const ALPHA_M_MAX: f64 = 2.5;

/// Section moment capacity and how it was reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionMoment {
    /// Nominal section moment capacity Ms (Nm)
    pub ms: f64,
    pub ze: f64,
    pub slenderness: Slenderness,
}

/// Nominal section moment capacity Ms = fy·Ze (5.2.1)
pub fn section_moment(section: &SectionProperties, axis: Axis) -> SectionMoment {
    let slenderness = classify_bending(section, axis);
    let ze = effective_section_modulus(section, axis, &slenderness);
    SectionMoment {
        ms: section.fy * ze,
        ze,
        slenderness,
    }
}

/// Twist restraint factor kt (Table 5.6.3(1))
pub fn twist_restraint_factor(code: RestraintCode, shape: &SectionShape, length: f64) -> f64 {
    let (d1, tf, tw, webs) = match *shape {
        SectionShape::ISection {
            depth,
            flange_thickness,
            web_thickness,
            ..
        } => (depth - 2.0 * flange_thickness, flange_thickness, web_thickness, 1.0),
        SectionShape::Rhs { depth, thickness, .. } => (depth - 2.0 * thickness, thickness, thickness, 2.0),
        SectionShape::Chs { .. } | SectionShape::SolidCircle { .. } => return 1.0,
    };
    let term = (d1 / length) * (tf / (2.0 * tw)).powi(3) / webs;
    1.0 + f64::from(code.partial_ends()) * term
}

/// Elastic buckling moment Mo for an effective length `le` (5.6.1.1)
pub fn reference_buckling_moment(section: &SectionProperties, le: f64) -> f64 {
    let pi2 = PI * PI;
    let minor = pi2 * section.e * section.i_minor / (le * le);
    let torsion = section.g * section.j + pi2 * section.e * section.iw / (le * le);
    (minor * torsion).sqrt()
}

/// Slenderness reduction factor αs
pub fn slenderness_reduction_factor(ms: f64, mo: f64) -> f64 {
    let ratio = ms / mo;
    0.6 * ((ratio * ratio + 3.0).sqrt() - ratio)
}

/// Moment modification factor αm from a segment's moment diagram
/// (5.6.1.1(a)(iii)), using the quarter points of the segment.
///
/// A diagram that is zero at all three quarter points but not elsewhere
/// gets the 2.5 cap; an empty diagram gets 1.0.
pub fn moment_modification_factor(moment: &Profile) -> DesignResult<f64> {
    let (_, m_max) = moment.max_abs();
    let m_max = m_max.abs();
    let m2 = moment.value_at(0.25)?;
    let m3 = moment.value_at(0.5)?;
    let m4 = moment.value_at(0.75)?;
    let denominator = (m2 * m2 + m3 * m3 + m4 * m4).sqrt();

    if denominator == 0.0 {
        return Ok(if m_max > 0.0 { ALPHA_M_MAX } else { 1.0 });
    }
    Ok((1.7 * m_max / denominator).min(ALPHA_M_MAX))
}

fn section_capacity(section: &SectionProperties, axis: Axis, action: Action, phi: f64) -> (Capacity, SectionMoment) {
    let sm = section_moment(section, axis);
    let s = sm.slenderness;
    let capacity = Capacity::new(action, sm.ms, phi, As4100Clause::SectionMoment.id())
        .with_classification(s.class)
        .with_all([("Ze", sm.ze), ("lambda_s", s.lambda_s), ("lambda_sp", s.lambda_sp), ("lambda_sy", s.lambda_sy)]);
    (capacity, sm)
}

/// Design moment capacity of a segment about `axis`.
///
/// Returns the section capacity (5.2) when lateral-torsional buckling cannot
/// occur: minor-axis bending, full lateral restraint, or circular sections.
/// Otherwise returns the member capacity (5.6.1), with αm taken from the
/// restraint when supplied, else from `diagram_alpha_m`, else 1.0.
///
/// # Errors
///
/// Inapplicable rule when a segment with an unrestrained end (FU, PU) has no
/// supplied αm; the quarter-point formula does not cover cantilevers.
pub fn capacity(
    section: &SectionProperties,
    restraint: &Restraint,
    axis: Axis,
    action: Action,
    diagram_alpha_m: Option<f64>,
    phi: f64,
) -> DesignResult<Capacity> {
    let (section_cap, sm) = section_capacity(section, axis, action, phi);

    let (code, k_l, k_r, supplied_alpha_m) = match restraint.lateral {
        LateralRestraint::Full => return Ok(section_cap),
        LateralRestraint::Segment { code, k_l, k_r, alpha_m } => (code, k_l, k_r, alpha_m),
    };

    if axis == Axis::Minor || section.shape.is_circular() {
        return Ok(section_cap);
    }

    if code.has_unrestrained_end() && supplied_alpha_m.is_none() {
        return Err(DesignError::inapplicable(
            As4100Clause::MemberMoment.id().to_string(),
            format!("{code} segment requires a supplied moment modification factor"),
        ));
    }

    let alpha_m = supplied_alpha_m.or(diagram_alpha_m).unwrap_or(1.0);
    let k_t = twist_restraint_factor(code, &section.shape, restraint.length);
    let le = k_t * k_l * k_r * restraint.length;
    let mo = reference_buckling_moment(section, le);
    let alpha_s = slenderness_reduction_factor(sm.ms, mo);
    let mb = (alpha_m * alpha_s * sm.ms).min(sm.ms);

    tracing::trace!(section = %section.id, %code, le, mo, alpha_s, alpha_m, "member moment capacity");

    Ok(Capacity::new(action, mb, phi, As4100Clause::MemberMoment.id())
        .with_classification(sm.slenderness.class)
        .with_all([
            ("Ms", sm.ms),
            ("Ze", sm.ze),
            ("kt", k_t),
            ("kl", k_l),
            ("kr", k_r),
            ("le", le),
            ("Mo", mo),
            ("alpha_s", alpha_s),
            ("alpha_m", alpha_m),
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::ForceKind;
    use crate::sections::SectionLibrary;
    use approx::assert_relative_eq;

    fn ub() -> &'static SectionProperties {
        SectionLibrary::builtin().lookup("310UB40.4").unwrap()
    }

    fn action() -> Action {
        Action::of(ForceKind::MomentMajor, 1.0)
    }

    #[test]
    fn test_section_moment_compact() {
        let section = ub();
        let sm = section_moment(section, Axis::Major);
        assert_relative_eq!(sm.ms, section.fy * section.s_major.min(1.5 * section.z_major));
    }

    #[test]
    fn test_alpha_m_uniform_moment() {
        let uniform = Profile::constant(100.0);
        // 1.7 / sqrt(3)
        assert_relative_eq!(moment_modification_factor(&uniform).unwrap(), 0.9815, epsilon = 1e-4);
    }

    #[test]
    fn test_alpha_m_parabolic_moment() {
        // simply supported UDL, M = 4 Mmax x(1-x)
        let parabola = Profile::sampled(40, |x| 4.0 * x * (1.0 - x)).unwrap();
        let am = moment_modification_factor(&parabola).unwrap();
        // 1.7 / sqrt(0.75² + 1 + 0.75²)
        assert_relative_eq!(am, 1.7 / (0.5625f64 * 2.0 + 1.0).sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_alpha_m_zero_quarter_points() {
        let spike = Profile::linear(&[(0.0, 0.0), (0.1, 5.0), (0.2, 0.0), (1.0, 0.0)]).unwrap();
        assert_eq!(moment_modification_factor(&spike).unwrap(), ALPHA_M_MAX);
        assert_eq!(moment_modification_factor(&Profile::zero()).unwrap(), 1.0);
    }

    #[test]
    fn test_alpha_s_limits() {
        // very stocky: Mo >> Ms gives αs close to 1
        assert!(slenderness_reduction_factor(1.0, 1.0e6) > 0.999);
        assert!(slenderness_reduction_factor(10.0, 1.0) < 0.1);
    }

    #[test]
    fn test_full_restraint_gives_section_capacity() {
        let section = ub();
        let cap = capacity(section, &Restraint::new(6.0), Axis::Major, action(), None, 0.9).unwrap();
        assert_eq!(cap.clause, As4100Clause::SectionMoment.id());
        assert_relative_eq!(cap.value, 0.9 * section_moment(section, Axis::Major).ms);
    }

    #[test]
    fn test_member_capacity_decreases_with_length() {
        let section = ub();
        let at = |length: f64| {
            let restraint = Restraint::new(length).with_lateral(LateralRestraint::segment(RestraintCode::Ff));
            capacity(section, &restraint, Axis::Major, action(), None, 0.9).unwrap()
        };
        let short = at(2.0);
        let long = at(8.0);
        assert_eq!(long.clause, As4100Clause::MemberMoment.id());
        assert!(long.value < short.value);
        assert!(short.value <= 0.9 * short.intermediates["Ms"] + 1e-6);
    }

    #[test]
    fn test_twist_restraint_factor() {
        let section = ub();
        assert_eq!(twist_restraint_factor(RestraintCode::Ff, &section.shape, 4.0), 1.0);
        let fp = twist_restraint_factor(RestraintCode::Fp, &section.shape, 4.0);
        let pp = twist_restraint_factor(RestraintCode::Pp, &section.shape, 4.0);
        assert!(fp > 1.0);
        assert_relative_eq!(pp - 1.0, 2.0 * (fp - 1.0), max_relative = 1e-12);
    }

    #[test]
    fn test_cantilever_needs_supplied_alpha_m() {
        let section = ub();
        let restraint = Restraint::new(3.0).with_lateral(LateralRestraint::segment(RestraintCode::Fu));
        let err = capacity(section, &restraint, Axis::Major, action(), Some(1.2), 0.9).unwrap_err();
        assert_eq!(err.error_code(), "INAPPLICABLE_RULE");

        let supplied = Restraint::new(3.0).with_lateral(LateralRestraint::Segment {
            code: RestraintCode::Fu,
            k_l: 1.0,
            k_r: 1.0,
            alpha_m: Some(1.25),
        });
        let cap = capacity(section, &supplied, Axis::Major, action(), None, 0.9).unwrap();
        assert_eq!(cap.intermediates["alpha_m"], 1.25);
    }

    #[test]
    fn test_minor_axis_on_cantilever_is_section_capacity() {
        let section = ub();
        let restraint = Restraint::new(2.0).with_lateral(LateralRestraint::segment(RestraintCode::Pu));
        let cap = capacity(section, &restraint, Axis::Minor, action(), None, 0.9).unwrap();
        assert_eq!(cap.clause, As4100Clause::SectionMoment.id());
        assert_relative_eq!(cap.value, 0.9 * section_moment(section, Axis::Minor).ms);
    }

    #[test]
    fn test_minor_axis_is_section_capacity() {
        let section = ub();
        let restraint = Restraint::new(8.0).with_lateral(LateralRestraint::segment(RestraintCode::Ff));
        let cap = capacity(section, &restraint, Axis::Minor, action(), None, 0.9).unwrap();
        assert_eq!(cap.clause, As4100Clause::SectionMoment.id());
    }
}

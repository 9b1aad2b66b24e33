//! # Combined Actions (AS 4100 Section 8, 5.12.3)
//!
//! Every clause is expressed as a utilisation ratio: the ratio is 1.0 exactly
//! when the design actions sit on the clause's capacity surface. Reduced
//! capacities such as Mrx = Msx(1 − N*/φNs) are folded into the ratio, so a
//! ratio stays finite when the axial load alone exceeds the section capacity.
//!
//! ## Notation
//!
//! - `n` = N*/φNs (compression) or N*/φNt (tension)
//! - `mx`, `my` = M*/φMs about each axis
//! - `mbx` = Mx*/φMbx

use serde::{Deserialize, Serialize};

use crate::codes::as4100::clauses::As4100Clause;
use crate::codes::as4100::shear::shear_bending_ratio;

/// Exponent of the member biaxial interaction (8.4.5)
pub const MEMBER_BIAXIAL_EXPONENT: f64 = 1.4;

/// Design actions at one position (N, Nm); axial is positive in tension
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Demands {
    pub axial: f64,
    pub moment_major: f64,
    pub moment_minor: f64,
    pub shear_major: f64,
}

/// Design capacities (φR) entering the interaction clauses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedCapacities {
    /// φNs
    pub section_compression: f64,
    /// φNt
    pub tension: f64,
    /// φNc for buckling about the major axis
    pub member_compression_major: f64,
    /// φNc for buckling about the minor axis
    pub member_compression_minor: f64,
    /// φMsx
    pub section_moment_major: f64,
    /// φMsy
    pub section_moment_minor: f64,
    /// φMbx
    pub member_moment_major: f64,
    /// φVv along the major axis; `None` for sections without webs
    pub web_shear: Option<f64>,
    /// Compact doubly symmetric I-section with kf = 1, eligible for the
    /// higher-tier section interaction forms
    pub compact_i_section: bool,
}

fn ratio(demand: f64, capacity: f64) -> f64 {
    let demand = demand.abs();
    if demand == 0.0 {
        0.0
    } else if capacity > 0.0 {
        demand / capacity
    } else {
        f64::MAX
    }
}

struct Utilisations {
    compression: bool,
    /// N*/φNs or N*/φNt
    n: f64,
    mx: f64,
    my: f64,
}

impl Utilisations {
    fn new(d: &Demands, c: &CombinedCapacities) -> Self {
        let compression = d.axial < 0.0;
        let axial_capacity = if compression { c.section_compression } else { c.tension };
        Self {
            compression,
            n: ratio(d.axial, axial_capacity),
            mx: ratio(d.moment_major, c.section_moment_major),
            my: ratio(d.moment_minor, c.section_moment_minor),
        }
    }
}

/// 8.3.2: axial force with major-axis bending
pub fn section_uniaxial_major(d: &Demands, c: &CombinedCapacities) -> f64 {
    let u = Utilisations::new(d, c);
    if c.compact_i_section {
        // Mrx = 1.18·Msx(1 − n) ≤ Msx
        u.mx.max(u.mx / 1.18 + u.n)
    } else {
        u.n + u.mx
    }
}

/// 8.3.3: axial force with minor-axis bending
pub fn section_uniaxial_minor(d: &Demands, c: &CombinedCapacities) -> f64 {
    let u = Utilisations::new(d, c);
    if c.compact_i_section {
        // Mry = 1.19·Msy(1 − n²) ≤ Msy
        u.my.max(u.my / 1.19 + u.n * u.n)
    } else {
        u.n + u.my
    }
}

/// 8.3.4: biaxial bending, section capacity
pub fn section_biaxial(d: &Demands, c: &CombinedCapacities) -> f64 {
    let u = Utilisations::new(d, c);
    let linear = u.n + u.mx + u.my;
    if !c.compact_i_section || u.n >= 1.0 {
        return linear;
    }

    let rx = (1.18 * (1.0 - u.n)).min(1.0);
    let ry = (1.19 * (1.0 - u.n * u.n)).min(1.0);
    let gamma = (1.4 + u.n).min(2.0);
    ((u.mx / rx).powf(gamma) + (u.my / ry).powf(gamma)).powf(1.0 / gamma)
}

/// 8.4.2.2: in-plane member capacity in compression; the larger of the two
/// axes. Not evaluated for tension.
pub fn member_in_plane(d: &Demands, c: &CombinedCapacities) -> Option<f64> {
    if d.axial >= 0.0 {
        return None;
    }
    let u = Utilisations::new(d, c);
    let x = ratio(d.axial, c.member_compression_major) + u.mx;
    let y = ratio(d.axial, c.member_compression_minor) + u.my;
    Some(x.max(y))
}

/// 8.4.4: out-of-plane member capacity for major-axis bending
pub fn member_out_of_plane(d: &Demands, c: &CombinedCapacities) -> f64 {
    let mbx = ratio(d.moment_major, c.member_moment_major);
    let u = Utilisations::new(d, c);
    if u.compression {
        ratio(d.axial, c.member_compression_minor) + mbx
    } else {
        // Mox = Mbx(1 + N*/φNt) ≤ Mrx = Msx(1 − N*/φNt)
        (mbx / (1.0 + u.n)).max(u.mx + u.n)
    }
}

/// 8.4.5: biaxial bending, member capacity
pub fn member_biaxial(d: &Demands, c: &CombinedCapacities) -> f64 {
    let u = Utilisations::new(d, c);
    let mbx = ratio(d.moment_major, c.member_moment_major);
    let exponent = MEMBER_BIAXIAL_EXPONENT;

    if u.compression {
        let nx = ratio(d.axial, c.member_compression_major);
        let ny = ratio(d.axial, c.member_compression_minor);
        if nx >= 1.0 || ny >= 1.0 {
            return nx.max(ny) + mbx.max(u.mx) + u.my;
        }
        // Mcx = min(Mix, Mox), Miy
        let ux = (u.mx / (1.0 - nx)).max(mbx / (1.0 - ny));
        let uy = u.my / (1.0 - ny);
        (ux.powf(exponent) + uy.powf(exponent)).powf(1.0 / exponent)
    } else {
        if u.n >= 1.0 {
            return u.n + u.mx + u.my;
        }
        // Mtx = min(Mrx, Mox), Mry
        let ux = (u.mx / (1.0 - u.n)).max(mbx / (1.0 + u.n));
        let uy = u.my / (1.0 - u.n);
        (ux.powf(exponent) + uy.powf(exponent)).powf(1.0 / exponent)
    }
}

/// Every applicable interaction clause, in clause order
pub fn evaluate(d: &Demands, c: &CombinedCapacities) -> Vec<(As4100Clause, f64)> {
    let mut ratios = vec![
        (As4100Clause::SectionUniaxialMajor, section_uniaxial_major(d, c)),
        (As4100Clause::SectionUniaxialMinor, section_uniaxial_minor(d, c)),
        (As4100Clause::SectionBiaxial, section_biaxial(d, c)),
    ];
    if let Some(in_plane) = member_in_plane(d, c) {
        ratios.push((As4100Clause::MemberInPlane, in_plane));
    }
    ratios.push((As4100Clause::MemberOutOfPlane, member_out_of_plane(d, c)));
    ratios.push((As4100Clause::MemberBiaxial, member_biaxial(d, c)));
    if let Some(phi_vv) = c.web_shear {
        ratios.push((
            As4100Clause::ShearAndBending,
            shear_bending_ratio(d.shear_major, d.moment_major, phi_vv, c.section_moment_major),
        ));
    }
    ratios
}

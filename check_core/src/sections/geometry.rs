//! # Cross-Section Property Formulas
//!
//! Closed-form geometric properties of the supported section shapes, in SI
//! base units (m, m², m³, m⁴, m⁶). Root radii and corner radii are ignored,
//! which slightly underestimates tabulated values for rolled sections.
//!
//! ## Notation
//!
//! - `A` = gross area
//! - `I` = second moment of area
//! - `Z` = elastic section modulus (I / c)
//! - `S` = plastic section modulus
//! - `r` = radius of gyration √(I/A)
//! - `J` = torsion constant
//! - `Iw` = warping constant
//!
//! ## References
//!
//! - AS 4100 Supplement 1, Commentary C5.6
//! - Roark's Formulas for Stress and Strain, 8th Edition, Chapter 10

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Geometric properties of a shape, independent of material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeProperties {
    pub area: f64,
    pub i_major: f64,
    pub i_minor: f64,
    pub z_major: f64,
    pub z_minor: f64,
    pub s_major: f64,
    pub s_minor: f64,
    pub j: f64,
    pub iw: f64,
    /// Area resisting shear parallel to the major-axis web(s)
    pub shear_area_major: f64,
    /// Area resisting shear parallel to the minor axis (flanges)
    pub shear_area_minor: f64,
}

impl ShapeProperties {
    pub fn r_major(&self) -> f64 {
        (self.i_major / self.area).sqrt()
    }

    pub fn r_minor(&self) -> f64 {
        (self.i_minor / self.area).sqrt()
    }
}

// =============================================================================
// DOUBLY SYMMETRIC I-SECTION
// =============================================================================

/// Doubly symmetric I-section without root fillets
///
/// ```text
///     ┌─────bf─────┐
///     └────┐  ┌────┘ tf
///          │  │
///        d │tw│
///          │  │
///     ┌────┘  └────┐
///     └────────────┘
/// ```
///
/// # Example
/// ```rust
/// use check_core::sections::geometry::i_section;
///
/// // 310UB40.4: d = 304, bf = 165, tf = 10.2, tw = 6.1 (mm)
/// let p = i_section(0.304, 0.165, 0.0102, 0.0061);
/// assert!((p.area - 5.03e-3).abs() < 0.1e-3);
/// assert!((p.i_major - 83.6e-6).abs() < 3.0e-6);
/// ```
pub fn i_section(d: f64, bf: f64, tf: f64, tw: f64) -> ShapeProperties {
    let dw = d - 2.0 * tf;
    let area = 2.0 * bf * tf + dw * tw;

    let i_major = (bf * d.powi(3) - (bf - tw) * dw.powi(3)) / 12.0;
    let i_minor = 2.0 * tf * bf.powi(3) / 12.0 + dw * tw.powi(3) / 12.0;

    let s_major = bf * tf * (d - tf) + tw * dw * dw / 4.0;
    let s_minor = tf * bf * bf / 2.0 + dw * tw * tw / 4.0;

    let j = (2.0 * bf * tf.powi(3) + dw * tw.powi(3)) / 3.0;
    let iw = i_minor * (d - tf).powi(2) / 4.0;

    ShapeProperties {
        area,
        i_major,
        i_minor,
        z_major: i_major / (d / 2.0),
        z_minor: i_minor / (bf / 2.0),
        s_major,
        s_minor,
        j,
        iw,
        shear_area_major: d * tw,
        shear_area_minor: 2.0 * bf * tf,
    }
}

// =============================================================================
// CIRCULAR HOLLOW SECTION
// =============================================================================

/// Circular hollow section of outside diameter `d_o` and wall `t`
pub fn chs(d_o: f64, t: f64) -> ShapeProperties {
    let d_i = d_o - 2.0 * t;
    let area = PI / 4.0 * (d_o * d_o - d_i * d_i);
    let i = PI / 64.0 * (d_o.powi(4) - d_i.powi(4));
    let z = i / (d_o / 2.0);
    let s = (d_o.powi(3) - d_i.powi(3)) / 6.0;

    ShapeProperties {
        area,
        i_major: i,
        i_minor: i,
        z_major: z,
        z_minor: z,
        s_major: s,
        s_minor: s,
        j: 2.0 * i,
        iw: 0.0,
        shear_area_major: area,
        shear_area_minor: area,
    }
}

// =============================================================================
// RECTANGULAR / SQUARE HOLLOW SECTION
// =============================================================================

/// Rectangular hollow section, depth `d` (major axis), width `b`, wall `t`.
/// Corners are taken as square.
pub fn rhs(d: f64, b: f64, t: f64) -> ShapeProperties {
    let di = d - 2.0 * t;
    let bi = b - 2.0 * t;
    let area = b * d - bi * di;

    let i_major = (b * d.powi(3) - bi * di.powi(3)) / 12.0;
    let i_minor = (d * b.powi(3) - di * bi.powi(3)) / 12.0;

    let s_major = (b * d * d - bi * di * di) / 4.0;
    let s_minor = (d * b * b - di * bi * bi) / 4.0;

    // Bredt-Batho thin-walled closed section
    let enclosed = (b - t) * (d - t);
    let perimeter = 2.0 * ((b - t) + (d - t));
    let j = 4.0 * enclosed * enclosed * t / perimeter;

    ShapeProperties {
        area,
        i_major,
        i_minor,
        z_major: i_major / (d / 2.0),
        z_minor: i_minor / (b / 2.0),
        s_major,
        s_minor,
        j,
        iw: 0.0,
        shear_area_major: 2.0 * di * t,
        shear_area_minor: 2.0 * bi * t,
    }
}

// =============================================================================
// SOLID CIRCULAR BAR
// =============================================================================

/// Solid round bar of diameter `d`
pub fn solid_circle(d: f64) -> ShapeProperties {
    let area = PI * d * d / 4.0;
    let i = PI * d.powi(4) / 64.0;
    let z = PI * d.powi(3) / 32.0;
    let s = d.powi(3) / 6.0;

    ShapeProperties {
        area,
        i_major: i,
        i_minor: i,
        z_major: z,
        z_minor: z,
        s_major: s,
        s_minor: s,
        j: 2.0 * i,
        iw: 0.0,
        shear_area_major: area,
        shear_area_minor: area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_i_section_matches_hand_calc() {
        // 200 x 100 x 10 flange x 5 web
        let p = i_section(0.2, 0.1, 0.01, 0.005);
        assert_relative_eq!(p.area, 2.0 * 0.1 * 0.01 + 0.18 * 0.005, max_relative = 1e-12);
        assert_relative_eq!(
            p.i_major,
            (0.1 * 0.2_f64.powi(3) - 0.095 * 0.18_f64.powi(3)) / 12.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(p.z_major, p.i_major / 0.1, max_relative = 1e-12);
        assert!(p.s_major > p.z_major);
        assert!(p.r_minor() < p.r_major());
    }

    #[test]
    fn test_310ub40_close_to_tables() {
        let p = i_section(0.304, 0.165, 0.0102, 0.0061);
        // Tabulated: Zx = 549e3 mm³, Sx = 633e3 mm³, Iy = 7.65e6 mm⁴
        assert_relative_eq!(p.z_major, 549.0e-6, max_relative = 0.04);
        assert_relative_eq!(p.s_major, 633.0e-6, max_relative = 0.04);
        assert_relative_eq!(p.i_minor, 7.65e-6, max_relative = 0.04);
    }

    #[test]
    fn test_chs() {
        let p = chs(0.1683, 0.0071);
        // Tabulated A = 3.60e3 mm², Z = 138e3 mm³
        assert_relative_eq!(p.area, 3.60e-3, max_relative = 0.01);
        assert_relative_eq!(p.z_major, 138.0e-6, max_relative = 0.02);
        assert_eq!(p.i_major, p.i_minor);
    }

    #[test]
    fn test_square_hollow_is_symmetric() {
        let p = rhs(0.1, 0.1, 0.005);
        assert_relative_eq!(p.i_major, p.i_minor, max_relative = 1e-12);
        assert_relative_eq!(p.area, 0.1 * 0.1 - 0.09 * 0.09, max_relative = 1e-12);
        assert!(p.j > p.i_major);
    }

    #[test]
    fn test_solid_circle_shape_factor() {
        let p = solid_circle(0.05);
        assert_relative_eq!(p.s_major / p.z_major, 16.0 / (3.0 * PI), max_relative = 1e-12);
    }
}

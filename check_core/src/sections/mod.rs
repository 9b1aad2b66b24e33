//! # Section Properties
//!
//! Geometric and material data of a cross-section, keyed by a section id.
//! The evaluation engine only reads these values; where they come from is up
//! to the [`SectionProvider`] handed to the orchestrator.
//!
//! All values are SI base units: m, m², m³, m⁴, m⁶, Pa.
//!
//! ## Example
//!
//! ```rust
//! use check_core::materials::SteelGrade;
//! use check_core::sections::{Fabrication, SectionProperties, SectionShape};
//!
//! let shape = SectionShape::ISection {
//!     depth: 0.304,
//!     flange_width: 0.165,
//!     flange_thickness: 0.0102,
//!     web_thickness: 0.0061,
//! };
//! let section = SectionProperties::from_shape("310UB40.4", shape, SteelGrade::Grade300, Fabrication::HotRolled)
//!     .unwrap()
//!     .with_holes(0.022, 4, 0.0102)
//!     .unwrap();
//!
//! assert_eq!(section.fy, 320.0e6);
//! assert!(section.area_net < section.area_gross);
//! ```

pub mod geometry;
pub mod library;

pub use geometry::ShapeProperties;
pub use library::SectionLibrary;

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::materials::{SteelGrade, SteelMaterial};
use crate::member::Axis;

/// Cross-section shape and plate dimensions (m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionShape {
    /// Doubly symmetric I-section (UB, UC, WB, WC)
    ISection {
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    },
    /// Circular hollow section
    Chs { outside_diameter: f64, thickness: f64 },
    /// Rectangular or square hollow section; `depth` is measured along the
    /// major-axis web
    Rhs { depth: f64, width: f64, thickness: f64 },
    /// Solid round bar
    SolidCircle { diameter: f64 },
}

impl SectionShape {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionShape::ISection { .. } => "I-section",
            SectionShape::Chs { .. } => "CHS",
            SectionShape::Rhs { .. } => "RHS",
            SectionShape::SolidCircle { .. } => "Solid round",
        }
    }

    /// Plate thicknesses that set the grade strength
    pub fn plate_thicknesses(&self) -> Vec<f64> {
        match *self {
            SectionShape::ISection {
                flange_thickness,
                web_thickness,
                ..
            } => vec![flange_thickness, web_thickness],
            SectionShape::Chs { thickness, .. } | SectionShape::Rhs { thickness, .. } => {
                vec![thickness]
            }
            SectionShape::SolidCircle { diameter } => vec![diameter],
        }
    }

    /// Has one or more webs (I-sections and RHS)
    pub fn has_web(&self) -> bool {
        matches!(self, SectionShape::ISection { .. } | SectionShape::Rhs { .. })
    }

    /// Circular sections do not buckle laterally
    pub fn is_circular(&self) -> bool {
        matches!(self, SectionShape::Chs { .. } | SectionShape::SolidCircle { .. })
    }

    fn validate(&self) -> DesignResult<()> {
        let positive = |name: &str, v: f64| -> DesignResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(DesignError::invalid_input(name, v.to_string(), "dimension must be positive"))
            }
        };

        match *self {
            SectionShape::ISection {
                depth,
                flange_width,
                flange_thickness,
                web_thickness,
            } => {
                positive("depth", depth)?;
                positive("flange_width", flange_width)?;
                positive("flange_thickness", flange_thickness)?;
                positive("web_thickness", web_thickness)?;
                if 2.0 * flange_thickness >= depth || web_thickness >= flange_width {
                    return Err(DesignError::invalid_input(
                        "section",
                        format!("{self:?}"),
                        "plates do not form an I-section",
                    ));
                }
            }
            SectionShape::Chs {
                outside_diameter,
                thickness,
            } => {
                positive("outside_diameter", outside_diameter)?;
                positive("thickness", thickness)?;
                if 2.0 * thickness >= outside_diameter {
                    return Err(DesignError::invalid_input(
                        "thickness",
                        thickness.to_string(),
                        "wall must be thinner than half the diameter",
                    ));
                }
            }
            SectionShape::Rhs {
                depth,
                width,
                thickness,
            } => {
                positive("depth", depth)?;
                positive("width", width)?;
                positive("thickness", thickness)?;
                if 2.0 * thickness >= depth.min(width) {
                    return Err(DesignError::invalid_input(
                        "thickness",
                        thickness.to_string(),
                        "wall must be thinner than half the smaller side",
                    ));
                }
            }
            SectionShape::SolidCircle { diameter } => positive("diameter", diameter)?,
        }
        Ok(())
    }

    fn properties(&self) -> ShapeProperties {
        match *self {
            SectionShape::ISection {
                depth,
                flange_width,
                flange_thickness,
                web_thickness,
            } => geometry::i_section(depth, flange_width, flange_thickness, web_thickness),
            SectionShape::Chs {
                outside_diameter,
                thickness,
            } => geometry::chs(outside_diameter, thickness),
            SectionShape::Rhs {
                depth,
                width,
                thickness,
            } => geometry::rhs(depth, width, thickness),
            SectionShape::SolidCircle { diameter } => geometry::solid_circle(diameter),
        }
    }
}

/// How the section was made; sets the residual stress pattern the design
/// code uses for classification and column curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fabrication {
    HotRolled,
    /// Hot-finished hollow section
    HotFinished,
    ColdFormed,
    LightlyWelded,
    HeavilyWelded,
    StressRelieved,
}

impl Fabrication {
    pub fn display_name(&self) -> &'static str {
        match self {
            Fabrication::HotRolled => "Hot-rolled",
            Fabrication::HotFinished => "Hot-finished",
            Fabrication::ColdFormed => "Cold-formed",
            Fabrication::LightlyWelded => "Lightly welded",
            Fabrication::HeavilyWelded => "Heavily welded",
            Fabrication::StressRelieved => "Stress-relieved",
        }
    }
}

/// Complete section data read by the design codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub id: String,
    pub shape: SectionShape,
    pub fabrication: Fabrication,
    pub grade: SteelGrade,

    // === Areas ===
    /// Gross area Ag (m²)
    pub area_gross: f64,
    /// Net area An after hole deductions (m²)
    pub area_net: f64,
    pub shear_area_major: f64,
    pub shear_area_minor: f64,

    // === Flexural properties ===
    pub i_major: f64,
    pub i_minor: f64,
    /// Elastic modulus Zx (m³)
    pub z_major: f64,
    pub z_minor: f64,
    /// Plastic modulus Sx (m³)
    pub s_major: f64,
    pub s_minor: f64,
    pub r_major: f64,
    pub r_minor: f64,

    // === Torsional properties ===
    pub j: f64,
    pub iw: f64,

    // === Material ===
    /// Yield stress fy (Pa), minimum over the section's plates
    pub fy: f64,
    /// Tensile strength fu (Pa)
    pub fu: f64,
    /// Young's modulus E (Pa)
    pub e: f64,
    /// Shear modulus G (Pa)
    pub g: f64,
}

impl SectionProperties {
    /// Compute properties from shape dimensions and grade
    pub fn from_shape(
        id: impl Into<String>,
        shape: SectionShape,
        grade: SteelGrade,
        fabrication: Fabrication,
    ) -> DesignResult<Self> {
        shape.validate()?;
        let p = shape.properties();
        let (fy, fu) = grade.strengths_for(&shape.plate_thicknesses());
        let steel = SteelMaterial::new(grade);

        Ok(Self {
            id: id.into(),
            shape,
            fabrication,
            grade,
            area_gross: p.area,
            area_net: p.area,
            shear_area_major: p.shear_area_major,
            shear_area_minor: p.shear_area_minor,
            i_major: p.i_major,
            i_minor: p.i_minor,
            z_major: p.z_major,
            z_minor: p.z_minor,
            s_major: p.s_major,
            s_minor: p.s_minor,
            r_major: p.r_major(),
            r_minor: p.r_minor(),
            j: p.j,
            iw: p.iw,
            fy,
            fu,
            e: steel.elastic_modulus,
            g: steel.shear_modulus,
        })
    }

    /// Deduct `count` bolt holes of `diameter` through plates of `thickness`
    /// from the net area
    pub fn with_holes(mut self, diameter: f64, count: u32, thickness: f64) -> DesignResult<Self> {
        let deduction = diameter * thickness * count as f64;
        if !(deduction.is_finite() && deduction >= 0.0) {
            return Err(DesignError::invalid_input(
                "holes",
                format!("{count} x {diameter} m through {thickness} m"),
                "hole dimensions must be non-negative",
            ));
        }
        let net = self.area_net - deduction;
        if net <= 0.0 {
            return Err(DesignError::invalid_input(
                "holes",
                format!("{deduction} m² deducted from {} m²", self.area_net),
                "holes remove the whole section",
            ));
        }
        self.area_net = net;
        Ok(self)
    }

    pub fn z(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Major => self.z_major,
            Axis::Minor => self.z_minor,
        }
    }

    pub fn s(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Major => self.s_major,
            Axis::Minor => self.s_minor,
        }
    }

    pub fn r(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Major => self.r_major,
            Axis::Minor => self.r_minor,
        }
    }

    pub fn shear_area(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Major => self.shear_area_major,
            Axis::Minor => self.shear_area_minor,
        }
    }
}

impl std::fmt::Display for SectionProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {}): A={:.0} mm², Zx={:.0}e3 mm³, fy={:.0} MPa",
            self.id,
            self.shape.display_name(),
            self.grade,
            self.area_gross * 1.0e6,
            self.z_major * 1.0e6,
            self.fy / 1.0e6
        )
    }
}

/// Source of section properties for the evaluation engine
pub trait SectionProvider: Sync {
    fn properties(&self, section_id: &str) -> DesignResult<&SectionProperties>;
}

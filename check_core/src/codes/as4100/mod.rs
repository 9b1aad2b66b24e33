//! # AS 4100 Steel Structures
//!
//! [`As4100`] implements [`DesignCode`] for hot-rolled, welded and
//! cold-formed steel sections (AS 4100 Sections 5 to 8).
//!
//! ## Modules
//!
//! - [`clauses`]: clause registry and clause order
//! - [`classification`]: element slenderness, section class, Ze and kf
//! - [`bending`]: section and member moment capacity
//! - [`shear`]: web shear capacity and shear-bending interaction
//! - [`compression`]: section and member compression capacity
//! - [`tension`]: section tension capacity
//! - [`combined`]: combined-action interaction ratios
//!
//! ## Example
//!
//! ```rust
//! use check_core::codes::as4100::As4100;
//! use check_core::codes::DesignCode;
//! use check_core::forces::{Action, ForceKind};
//! use check_core::member::Restraint;
//! use check_core::sections::{SectionLibrary, SectionProvider};
//!
//! let code = As4100::default();
//! let section = SectionLibrary::builtin().properties("310UB40.4").unwrap();
//! let moment = code
//!     .section_capacity(section, &Restraint::new(6.0), Action::of(ForceKind::MomentMajor, 1.0))
//!     .unwrap();
//! assert_eq!(moment.clause.to_string(), "AS4100 5.2");
//! ```

pub mod bending;
pub mod classification;
pub mod clauses;
pub mod combined;
pub mod compression;
pub mod shear;
pub mod tension;

use serde::{Deserialize, Serialize};

pub use clauses::As4100Clause;

use crate::codes::{Capacity, ClauseId, ClauseRatio, DesignCode, Interaction, SectionClass, TieBreak};
use crate::errors::{DesignError, DesignResult};
use crate::forces::{Action, ForceKind};
use crate::member::{Axis, Restraint, Segment};
use crate::sections::{SectionProperties, SectionShape};

use combined::{CombinedCapacities, Demands};

/// Capacity reduction factors and tension factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct As4100Params {
    /// Capacity reduction factor φ (Table 3.4)
    pub phi: f64,
    /// Tension fracture factor αu
    pub alpha_u: f64,
    /// Connection correction factor kt (7.3)
    pub k_t: f64,
}

impl Default for As4100Params {
    fn default() -> Self {
        Self {
            phi: 0.9,
            alpha_u: 0.85,
            k_t: 1.0,
        }
    }
}

impl As4100Params {
    pub fn validate(&self) -> DesignResult<()> {
        for (name, value) in [("phi", self.phi), ("alpha_u", self.alpha_u), ("k_t", self.k_t)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(DesignError::config(format!("as4100.{name} must be in (0, 1], got {value}")));
            }
        }
        Ok(())
    }
}

/// AS 4100 design code strategy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct As4100 {
    pub params: As4100Params,
    pub tie_break: TieBreak,
}

impl As4100 {
    pub fn new(params: As4100Params, tie_break: TieBreak) -> Self {
        Self { params, tie_break }
    }

    fn phi(&self) -> f64 {
        self.params.phi
    }

    /// Capacities entering the combined-action clauses of a segment
    pub fn combined_capacities(&self, segment: &Segment, section: &SectionProperties) -> DesignResult<CombinedCapacities> {
        let phi = self.phi();
        let restraint = segment.restraint();
        let kf = classification::form_factor(section).kf;

        let section_compression = phi * compression::section_capacity(section, kf);
        let tension = tension::capacity(section, Action::tension(), phi, self.params.alpha_u, self.params.k_t).value;
        let member_compression_major = phi * compression::axis_capacity(section, restraint, Axis::Major).nc;
        let member_compression_minor = phi * compression::axis_capacity(section, restraint, Axis::Minor).nc;

        let major = bending::section_moment(section, Axis::Major);
        let minor = bending::section_moment(section, Axis::Minor);
        let member_moment_major = self
            .segment_capacity(segment, section, Action::of(ForceKind::MomentMajor, 1.0))?
            .value;

        // without a web shear capacity only 5.12.3 drops out
        let web_shear = if section.shape.has_web() {
            match shear::capacity(section, Axis::Major, Action::of(ForceKind::ShearMajor, 1.0), phi) {
                Ok(cap) => Some(cap.value),
                Err(e) if e.is_per_position() => {
                    tracing::debug!(section = %section.id, error = %e, "no web shear capacity for interaction");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let compact_i_section = matches!(section.shape, SectionShape::ISection { .. })
            && kf >= 1.0
            && major.slenderness.class == SectionClass::Compact
            && minor.slenderness.class == SectionClass::Compact;

        Ok(CombinedCapacities {
            section_compression,
            tension,
            member_compression_major,
            member_compression_minor,
            section_moment_major: phi * major.ms,
            section_moment_minor: phi * minor.ms,
            member_moment_major,
            web_shear,
            compact_i_section,
        })
    }
}

impl DesignCode for As4100 {
    fn name(&self) -> &str {
        clauses::CODE_NAME
    }

    fn clause_order(&self) -> Vec<ClauseId> {
        As4100Clause::ALL.iter().map(|c| c.id()).collect()
    }

    fn section_capacity(
        &self,
        section: &SectionProperties,
        restraint: &Restraint,
        action: Action,
    ) -> DesignResult<Capacity> {
        restraint.validate()?;
        let phi = self.phi();
        match action.kind {
            ForceKind::Axial if action.is_tension() => Ok(tension::capacity(
                section,
                action,
                phi,
                self.params.alpha_u,
                self.params.k_t,
            )),
            ForceKind::Axial => Ok(compression::capacity(section, restraint, action, phi)),
            ForceKind::MomentMajor => bending::capacity(section, restraint, Axis::Major, action, None, phi),
            ForceKind::MomentMinor => bending::capacity(section, restraint, Axis::Minor, action, None, phi),
            ForceKind::ShearMajor => shear::capacity(section, Axis::Major, action, phi),
            ForceKind::ShearMinor => shear::capacity(section, Axis::Minor, action, phi),
            ForceKind::Torsion => Err(DesignError::inapplicable(
                As4100Clause::Torsion.id().to_string(),
                "AS 4100 has no torsion capacity rule",
            )),
        }
    }

    fn segment_capacity(
        &self,
        segment: &Segment,
        section: &SectionProperties,
        action: Action,
    ) -> DesignResult<Capacity> {
        if action.kind != ForceKind::MomentMajor {
            return self.section_capacity(section, segment.restraint(), action);
        }
        segment.restraint().validate()?;
        let alpha_m = bending::moment_modification_factor(segment.forces().get(ForceKind::MomentMajor))?;
        bending::capacity(section, segment.restraint(), Axis::Major, action, Some(alpha_m), self.phi())
    }

    fn interaction_ratio(
        &self,
        segment: &Segment,
        local_position: f64,
        section: &SectionProperties,
    ) -> DesignResult<Interaction> {
        let demands = Demands {
            axial: segment.force_at(ForceKind::Axial, local_position)?,
            moment_major: segment.force_at(ForceKind::MomentMajor, local_position)?,
            moment_minor: segment.force_at(ForceKind::MomentMinor, local_position)?,
            shear_major: segment.force_at(ForceKind::ShearMajor, local_position)?,
        };
        let capacities = self.combined_capacities(segment, section)?;

        let ratios = combined::evaluate(&demands, &capacities)
            .into_iter()
            .map(|(clause, ratio)| ClauseRatio::new(clause.id(), ratio))
            .collect();

        Interaction::resolve(ratios, self.tie_break).ok_or_else(|| {
            DesignError::inapplicable(
                self.interaction_clause().to_string(),
                "no interaction clause applies",
            )
        })
    }

    fn clause_for(&self, kind: ForceKind) -> ClauseId {
        As4100Clause::for_kind(kind).id()
    }

    fn interaction_clause(&self) -> ClauseId {
        As4100Clause::SectionUniaxialMajor.id()
    }
}

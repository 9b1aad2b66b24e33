//! # AS 4100 Clause Registry
//!
//! Every AS 4100 clause the strategy can report, with its number, title and
//! position in the clause order. Results are sorted by this order, and ties
//! between interaction clauses are resolved by it.

use serde::{Deserialize, Serialize};

use crate::codes::ClauseId;
use crate::forces::ForceKind;

/// Code name used in every AS 4100 [`ClauseId`]
pub const CODE_NAME: &str = "AS4100";

/// Clause families of AS 4100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum As4100Clause {
    // -------------------------------------------------------------------------
    // Section 5: Members subject to bending
    // -------------------------------------------------------------------------
    /// Ms = fy·Ze
    SectionMoment,
    /// Mb = αm·αs·Ms ≤ Ms
    MemberMoment,
    /// Unstiffened web slenderness limit
    WebSlenderness,
    /// Vw = 0.6·fy·Aw (CHS: 0.36·fy·Ae)
    ShearYield,
    /// Vb = αv·Vw
    ShearBuckling,

    // -------------------------------------------------------------------------
    // Section 6: Members subject to axial compression
    // -------------------------------------------------------------------------
    /// Ns = kf·An·fy
    SectionCompression,
    /// Nc = αc·Ns
    MemberCompression,

    // -------------------------------------------------------------------------
    // Section 7: Members subject to axial tension
    // -------------------------------------------------------------------------
    /// Nt = min(Ag·fy, 0.85·kt·An·fu)
    Tension,

    // -------------------------------------------------------------------------
    // Section 8: Members subject to combined actions
    // -------------------------------------------------------------------------
    /// Axial force and major-axis bending, section capacity
    SectionUniaxialMajor,
    /// Axial force and minor-axis bending, section capacity
    SectionUniaxialMinor,
    /// Biaxial bending, section capacity
    SectionBiaxial,
    /// In-plane member capacity
    MemberInPlane,
    /// Out-of-plane member capacity
    MemberOutOfPlane,
    /// Biaxial bending, member capacity
    MemberBiaxial,

    // -------------------------------------------------------------------------
    // Combined bending and shear
    // -------------------------------------------------------------------------
    /// Web shear capacity reduced for coincident bending
    ShearAndBending,

    /// No AS 4100 capacity rule exists for torsion
    Torsion,
}

impl As4100Clause {
    /// Clause order
    pub const ALL: [As4100Clause; 16] = [
        As4100Clause::SectionMoment,
        As4100Clause::MemberMoment,
        As4100Clause::WebSlenderness,
        As4100Clause::ShearYield,
        As4100Clause::ShearBuckling,
        As4100Clause::SectionCompression,
        As4100Clause::MemberCompression,
        As4100Clause::Tension,
        As4100Clause::SectionUniaxialMajor,
        As4100Clause::SectionUniaxialMinor,
        As4100Clause::SectionBiaxial,
        As4100Clause::MemberInPlane,
        As4100Clause::MemberOutOfPlane,
        As4100Clause::MemberBiaxial,
        As4100Clause::ShearAndBending,
        As4100Clause::Torsion,
    ];

    /// Interaction family, in clause order
    pub const INTERACTION: [As4100Clause; 7] = [
        As4100Clause::SectionUniaxialMajor,
        As4100Clause::SectionUniaxialMinor,
        As4100Clause::SectionBiaxial,
        As4100Clause::MemberInPlane,
        As4100Clause::MemberOutOfPlane,
        As4100Clause::MemberBiaxial,
        As4100Clause::ShearAndBending,
    ];

    pub fn number(&self) -> &'static str {
        match self {
            As4100Clause::SectionMoment => "5.2",
            As4100Clause::MemberMoment => "5.6.1",
            As4100Clause::WebSlenderness => "5.10",
            As4100Clause::ShearYield => "5.11.4",
            As4100Clause::ShearBuckling => "5.11.5",
            As4100Clause::SectionCompression => "6.2",
            As4100Clause::MemberCompression => "6.3.3",
            As4100Clause::Tension => "7.2",
            As4100Clause::SectionUniaxialMajor => "8.3.2",
            As4100Clause::SectionUniaxialMinor => "8.3.3",
            As4100Clause::SectionBiaxial => "8.3.4",
            As4100Clause::MemberInPlane => "8.4.2.2",
            As4100Clause::MemberOutOfPlane => "8.4.4",
            As4100Clause::MemberBiaxial => "8.4.5",
            As4100Clause::ShearAndBending => "5.12.3",
            As4100Clause::Torsion => "torsion",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            As4100Clause::SectionMoment => "Section moment capacity",
            As4100Clause::MemberMoment => "Member moment capacity (segments without full lateral restraint)",
            As4100Clause::WebSlenderness => "Minimum web thickness",
            As4100Clause::ShearYield => "Shear yield capacity of a web",
            As4100Clause::ShearBuckling => "Shear buckling capacity of a web",
            As4100Clause::SectionCompression => "Nominal section capacity in compression",
            As4100Clause::MemberCompression => "Nominal member capacity in compression",
            As4100Clause::Tension => "Nominal section capacity in tension",
            As4100Clause::SectionUniaxialMajor => "Uniaxial bending about the major principal x-axis",
            As4100Clause::SectionUniaxialMinor => "Uniaxial bending about the minor principal y-axis",
            As4100Clause::SectionBiaxial => "Biaxial bending, section capacity",
            As4100Clause::MemberInPlane => "In-plane capacity, elastic analysis",
            As4100Clause::MemberOutOfPlane => "Out-of-plane capacity",
            As4100Clause::MemberBiaxial => "Biaxial bending, member capacity",
            As4100Clause::ShearAndBending => "Proportioning method, shear and bending interaction",
            As4100Clause::Torsion => "Torsion (no capacity clause)",
        }
    }

    /// Position in the clause order, starting at 1
    pub fn ordinal(&self) -> u16 {
        As4100Clause::ALL
            .iter()
            .position(|c| c == self)
            .map_or(u16::MAX, |i| i as u16 + 1)
    }

    pub fn id(&self) -> ClauseId {
        ClauseId::new(CODE_NAME, self.number(), self.ordinal())
    }

    /// Clause family for single-action checks of a force kind
    pub fn for_kind(kind: ForceKind) -> Self {
        match kind {
            ForceKind::Axial => As4100Clause::SectionCompression,
            ForceKind::ShearMajor | ForceKind::ShearMinor => As4100Clause::ShearYield,
            ForceKind::MomentMajor | ForceKind::MomentMinor => As4100Clause::SectionMoment,
            ForceKind::Torsion => As4100Clause::Torsion,
        }
    }
}

impl std::fmt::Display for As4100Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", CODE_NAME, self.number(), self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_follow_clause_order() {
        for (i, clause) in As4100Clause::ALL.iter().enumerate() {
            assert_eq!(clause.ordinal(), i as u16 + 1);
        }
        assert!(As4100Clause::SectionMoment.id() < As4100Clause::MemberCompression.id());
    }

    #[test]
    fn test_all_clauses_have_metadata() {
        for clause in As4100Clause::ALL {
            assert!(!clause.number().is_empty());
            assert!(!clause.title().is_empty());
        }
    }

    #[test]
    fn test_interaction_family_is_ordered() {
        let ordinals: Vec<u16> = As4100Clause::INTERACTION.iter().map(|c| c.ordinal()).collect();
        let mut sorted = ordinals.clone();
        sorted.sort_unstable();
        assert_eq!(ordinals, sorted);
    }
}

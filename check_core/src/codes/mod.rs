//! # Design Codes
//!
//! A design code turns section properties, restraint metadata and internal
//! actions into capacities and interaction ratios. Each code is a
//! [`DesignCode`] strategy; the member model never branches on which code is
//! in use.
//!
//! ## Architecture
//!
//! - [`DesignCode`]: the strategy trait (stateless apart from parameters)
//! - [`Capacity`]: a factored capacity with its clause, classification and
//!   every intermediate value of its derivation
//! - [`Interaction`]: the ratios of all interaction clauses evaluated at one
//!   position, plus the governing one
//! - [`ClauseId`]: clause reference carrying its place in the code's clause
//!   order, so results sort the same way the code lists them
//!
//! ## Codes
//!
//! - [`as4100`]: AS 4100 Steel Structures

pub mod as4100;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::DesignResult;
use crate::forces::{Action, ForceKind};
use crate::member::{Restraint, Segment};
use crate::sections::SectionProperties;

/// Ratios closer than this are treated as equal when picking the governing
/// interaction clause
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Reference to a clause of a design code.
///
/// Ordered by `ordinal` (the position in the code's clause order) first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClauseId {
    /// Short code name, e.g. "AS4100"
    pub code: String,
    /// Clause number, e.g. "5.6.1"
    pub clause: String,
    /// Position in the code's clause order
    pub ordinal: u16,
}

impl ClauseId {
    pub fn new(code: impl Into<String>, clause: impl Into<String>, ordinal: u16) -> Self {
        Self {
            code: code.into(),
            clause: clause.into(),
            ordinal,
        }
    }
}

impl Ord for ClauseId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ordinal
            .cmp(&other.ordinal)
            .then_with(|| self.clause.cmp(&other.clause))
            .then_with(|| self.code.cmp(&other.code))
    }
}

impl PartialOrd for ClauseId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for ClauseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code, self.clause)
    }
}

/// Local buckling classification of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionClass {
    Compact,
    NonCompact,
    Slender,
}

impl SectionClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionClass::Compact => "compact",
            SectionClass::NonCompact => "non-compact",
            SectionClass::Slender => "slender",
        }
    }
}

/// A factored design capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub action: Action,
    /// Design capacity φR (N or Nm)
    pub value: f64,
    /// Nominal capacity R
    pub nominal: f64,
    /// Capacity reduction factor φ
    pub phi: f64,
    /// Clause that produced the governing value
    pub clause: ClauseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<SectionClass>,
    /// Named intermediate values (λn, αc, Mo, αs, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub intermediates: BTreeMap<String, f64>,
}

impl Capacity {
    pub fn new(action: Action, nominal: f64, phi: f64, clause: ClauseId) -> Self {
        Self {
            action,
            value: phi * nominal,
            nominal,
            phi,
            clause,
            classification: None,
            intermediates: BTreeMap::new(),
        }
    }

    pub fn with_classification(mut self, class: SectionClass) -> Self {
        self.classification = Some(class);
        self
    }

    /// Record an intermediate value
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.intermediates.insert(name.to_string(), value);
        self
    }

    /// Record several intermediate values
    pub fn with_all<'a>(mut self, values: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        for (name, value) in values {
            self.intermediates.insert(name.to_string(), value);
        }
        self
    }

    /// Demand-to-capacity ratio of `demand` (by magnitude)
    pub fn ratio(&self, demand: f64) -> f64 {
        let demand = demand.abs();
        if demand == 0.0 {
            0.0
        } else if self.value > 0.0 {
            demand / self.value
        } else {
            f64::MAX
        }
    }
}

/// How equal interaction ratios are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The clause listed first in the code's clause order governs
    #[default]
    FirstListed,
    /// The clause listed last governs
    LastListed,
}

/// Ratio of one interaction clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseRatio {
    pub clause: ClauseId,
    pub ratio: f64,
}

impl ClauseRatio {
    pub fn new(clause: ClauseId, ratio: f64) -> Self {
        Self { clause, ratio }
    }
}

/// Interaction clauses evaluated at one position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub governing: ClauseRatio,
    pub evaluated: Vec<ClauseRatio>,
}

impl Interaction {
    /// Pick the governing clause: largest ratio, ties within
    /// [`TIE_TOLERANCE`] resolved by `tie_break` over the clause order.
    ///
    /// Returns `None` when nothing was evaluated.
    pub fn resolve(mut evaluated: Vec<ClauseRatio>, tie_break: TieBreak) -> Option<Self> {
        evaluated.sort_by(|a, b| a.clause.cmp(&b.clause));
        let max = evaluated
            .iter()
            .map(|c| c.ratio)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut tied = evaluated.iter().filter(|c| max - c.ratio <= TIE_TOLERANCE);
        let governing = match tie_break {
            TieBreak::FirstListed => tied.next(),
            TieBreak::LastListed => tied.last(),
        }?
        .clone();

        Some(Self {
            governing,
            evaluated,
        })
    }
}

/// A design code strategy.
///
/// Implementations are pure: the same inputs always give the same capacities,
/// so they can be shared across threads.
pub trait DesignCode: Send + Sync {
    /// Short code name, e.g. "AS4100"
    fn name(&self) -> &str;

    /// Every clause the code can report, in the order the code lists them
    fn clause_order(&self) -> Vec<ClauseId>;

    /// Capacity of a section for a single action, given the restraint of the
    /// segment it sits in.
    ///
    /// Fails with an inapplicable-rule error when the code has no rule for
    /// the action or the rule's preconditions do not hold.
    fn section_capacity(
        &self,
        section: &SectionProperties,
        restraint: &Restraint,
        action: Action,
    ) -> DesignResult<Capacity>;

    /// Capacity of a segment for a single action.
    ///
    /// Codes whose capacities depend on the shape of the force diagrams
    /// override this; the default ignores the diagrams.
    fn segment_capacity(
        &self,
        segment: &Segment,
        section: &SectionProperties,
        action: Action,
    ) -> DesignResult<Capacity> {
        self.section_capacity(section, segment.restraint(), action)
    }

    /// Combined-action ratios at a local position of a segment
    fn interaction_ratio(
        &self,
        segment: &Segment,
        local_position: f64,
        section: &SectionProperties,
    ) -> DesignResult<Interaction>;

    /// Clause family reported for a force kind when its check is inconclusive
    fn clause_for(&self, kind: ForceKind) -> ClauseId;

    /// Clause family reported for an inconclusive interaction check
    fn interaction_clause(&self) -> ClauseId;
}

/// Selectable design codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignCodeId {
    #[default]
    As4100,
}

impl DesignCodeId {
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignCodeId::As4100 => "AS 4100 Steel Structures",
        }
    }
}

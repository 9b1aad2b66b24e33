//! Member segment: one section and one restraint condition, with a set of
//! force diagrams per load case, mapped onto the member's global coordinate
//! by a start offset.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::forces::{ForceKind, ForceSet, LoadCaseId, DEFAULT_LOAD_CASE};
use crate::member::restraint::{Axis, AxisRestraint, Restraint};

/// Relative slack allowed when mapping a global position onto a segment
pub(crate) const POSITION_TOLERANCE: f64 = 1e-9;

static NO_FORCES: Lazy<ForceSet> = Lazy::new(ForceSet::new);

/// Serialized segment: either `forces` (the default case) or a `load_cases`
/// map keyed by case id
#[derive(Debug, Clone, Deserialize)]
struct SegmentData {
    section_id: String,
    restraint: Restraint,
    #[serde(default)]
    forces: Option<ForceSet>,
    #[serde(default)]
    load_cases: BTreeMap<LoadCaseId, ForceSet>,
}

impl TryFrom<SegmentData> for Segment {
    type Error = DesignError;

    fn try_from(data: SegmentData) -> Result<Self, Self::Error> {
        let cases = match (data.forces, data.load_cases.is_empty()) {
            (Some(_), false) => {
                return Err(DesignError::invalid_input(
                    "segment",
                    data.section_id,
                    "give either forces or load_cases, not both",
                ))
            }
            (Some(forces), true) => BTreeMap::from([(DEFAULT_LOAD_CASE, forces)]),
            (None, true) => BTreeMap::from([(DEFAULT_LOAD_CASE, ForceSet::new())]),
            (None, false) => data.load_cases,
        };
        Ok(Self {
            start: 0.0,
            section_id: data.section_id,
            restraint: data.restraint,
            load_cases: cases,
        })
    }
}

/// A contiguous part of a member with uniform section and restraint.
///
/// Immutable once built; the start offset is assigned when the segment is
/// placed into a [`Member`](crate::member::Member). Always carries at least
/// one load case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentData")]
pub struct Segment {
    #[serde(skip_serializing)]
    start: f64,
    section_id: String,
    restraint: Restraint,
    load_cases: BTreeMap<LoadCaseId, ForceSet>,
}

impl Segment {
    /// New segment starting at 0.0 with `forces` as the default load case;
    /// `restraint.length` is the segment length.
    pub fn new(section_id: impl Into<String>, restraint: Restraint, forces: ForceSet) -> Self {
        Self {
            start: 0.0,
            section_id: section_id.into(),
            restraint,
            load_cases: BTreeMap::from([(DEFAULT_LOAD_CASE, forces)]),
        }
    }

    /// New segment with one force set per load case.
    ///
    /// # Errors
    ///
    /// Invalid input when no case is given.
    pub fn with_cases(
        section_id: impl Into<String>,
        restraint: Restraint,
        cases: impl IntoIterator<Item = (LoadCaseId, ForceSet)>,
    ) -> DesignResult<Self> {
        let section_id = section_id.into();
        let load_cases: BTreeMap<LoadCaseId, ForceSet> = cases.into_iter().collect();
        if load_cases.is_empty() {
            return Err(DesignError::invalid_input(
                "load_cases",
                section_id,
                "a segment needs at least one load case",
            ));
        }
        Ok(Self {
            start: 0.0,
            section_id,
            restraint,
            load_cases,
        })
    }

    /// Add or replace the forces of one load case
    pub fn with_case(mut self, case: LoadCaseId, forces: ForceSet) -> Self {
        self.load_cases.insert(case, forces);
        self
    }

    /// Load case ids in ascending order
    pub fn load_cases(&self) -> impl Iterator<Item = LoadCaseId> + '_ {
        self.load_cases.keys().copied()
    }

    /// Forces of one load case; `None` when the segment is not loaded in it
    pub fn case_forces(&self, case: LoadCaseId) -> Option<&ForceSet> {
        self.load_cases.get(&case)
    }

    /// This segment restricted to one load case. A case the segment does not
    /// carry gives zero forces.
    pub fn for_case(&self, case: LoadCaseId) -> Segment {
        let forces = self.load_cases.get(&case).cloned().unwrap_or_default();
        Self {
            start: self.start,
            section_id: self.section_id.clone(),
            restraint: self.restraint,
            load_cases: BTreeMap::from([(case, forces)]),
        }
    }

    /// Copy of this segment placed at a global start offset
    pub fn placed_at(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    pub fn restraint(&self) -> &Restraint {
        &self.restraint
    }

    pub fn restraint_for(&self, axis: Axis) -> &AxisRestraint {
        self.restraint.axis(axis)
    }

    /// Forces of the lowest-numbered load case; the only case of a
    /// [`for_case`](Self::for_case) view
    pub fn forces(&self) -> &ForceSet {
        self.load_cases.values().next().unwrap_or(&*NO_FORCES)
    }

    /// Segment length (m)
    pub fn length(&self) -> f64 {
        self.restraint.length
    }

    /// Global start position (m)
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Global end position (m)
    pub fn end(&self) -> f64 {
        self.start + self.length()
    }

    /// Internal action at a local (normalised) position
    pub fn force_at(&self, kind: ForceKind, local_position: f64) -> DesignResult<f64> {
        self.forces().value_at(kind, local_position)
    }

    pub fn to_global(&self, local_position: f64) -> f64 {
        if local_position == 1.0 {
            return self.end();
        }
        self.start + local_position * self.length()
    }

    /// Map a global position onto [0, 1].
    ///
    /// Positions within a relative 1e-9 of the segment ends are clamped.
    pub fn to_local(&self, global_position: f64) -> DesignResult<f64> {
        let slack = POSITION_TOLERANCE * self.length().max(1.0);
        if !global_position.is_finite()
            || global_position < self.start - slack
            || global_position > self.end() + slack
        {
            return Err(DesignError::domain(
                format!("segment '{}'", self.section_id),
                global_position,
                self.start,
                self.end(),
            ));
        }
        let local = (global_position - self.start) / self.length();
        Ok(local.clamp(0.0, 1.0))
    }

    /// True if `global_position` lies on the closed interval [start, end]
    pub fn touches(&self, global_position: f64) -> bool {
        self.to_local(global_position).is_ok()
    }
}

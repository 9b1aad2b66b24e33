//! # Members
//!
//! A [`Member`] is an ordered run of [`Segment`]s covering the member length
//! with no gaps or overlaps. Each segment owns its section id, restraint
//! metadata and internal force diagrams; the member maps global positions
//! (metres from the member start) onto segments and collects the positions
//! that need checking.
//!
//! Segments may carry several load cases. The position helpers read each
//! segment's first case; [`Member::for_case`] gives a single-case view.
//!
//! ## Example
//!
//! ```rust
//! use check_core::forces::{ForceKind, ForceSet};
//! use check_core::member::{MemberBuilder, Restraint};
//! use check_core::profile::Profile;
//!
//! let moment = Profile::linear(&[(0.0, 0.0), (1.0, 40.0e3)]).unwrap();
//! let member = MemberBuilder::new("B1", 6.0)
//!     .segment("310UB40.4", Restraint::new(3.0), ForceSet::new().with(ForceKind::MomentMajor, moment.clone()))
//!     .segment("250UB31.4", Restraint::new(3.0), ForceSet::new().with(ForceKind::MomentMajor, moment.scaled(-1.0)))
//!     .build()
//!     .unwrap();
//!
//! // Shared boundaries belong to the segment on the right
//! let (index, _, local) = member.segment_containing(3.0).unwrap();
//! assert_eq!((index, local), (1, 0.0));
//! assert_eq!(member.segments_at(3.0).len(), 2);
//! ```

pub mod restraint;
pub mod segment;

pub use restraint::{Axis, AxisRestraint, LateralRestraint, Restraint, RestraintCode};
pub use segment::Segment;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::forces::{ForceKind, ForceSet, LoadCaseId};
use segment::POSITION_TOLERANCE;

/// Serialized member: segments are placed end to end in listed order.
#[derive(Debug, Clone, Deserialize)]
struct MemberData {
    label: String,
    length: f64,
    segments: Vec<Segment>,
}

impl TryFrom<MemberData> for Member {
    type Error = DesignError;

    fn try_from(data: MemberData) -> Result<Self, Self::Error> {
        let mut builder = MemberBuilder::new(data.label, data.length);
        for segment in data.segments {
            builder = builder.push(segment);
        }
        builder.build()
    }
}

/// A beam or column made of one or more segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MemberData")]
pub struct Member {
    label: String,
    length: f64,
    segments: Vec<Segment>,
}

impl Member {
    /// Assemble a member from placed segments.
    ///
    /// Fails with a geometry error when there are no segments, a segment has
    /// non-positive length, the first segment does not start at 0, consecutive
    /// segments leave a gap or overlap, or the lengths do not add up to
    /// `length`.
    pub fn new(label: impl Into<String>, length: f64, segments: Vec<Segment>) -> DesignResult<Self> {
        let label = label.into();
        if segments.is_empty() {
            return Err(DesignError::geometry(format!("member '{label}' has no segments")));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(DesignError::geometry(format!(
                "member '{label}' length must be positive, got {length}"
            )));
        }

        let tol = POSITION_TOLERANCE * length;
        for (i, segment) in segments.iter().enumerate() {
            segment.restraint().validate().map_err(|e| match e {
                DesignError::Geometry { reason } => {
                    DesignError::geometry(format!("segment {i}: {reason}"))
                }
                other => other,
            })?;
        }

        if segments[0].start().abs() > tol {
            return Err(DesignError::geometry(format!(
                "first segment starts at {} instead of 0",
                segments[0].start()
            )));
        }

        for (i, pair) in segments.windows(2).enumerate() {
            let gap = pair[1].start() - pair[0].end();
            if gap > tol {
                return Err(DesignError::geometry(format!(
                    "gap of {gap} m between segments {i} and {}",
                    i + 1
                )));
            }
            if gap < -tol {
                return Err(DesignError::geometry(format!(
                    "segments {i} and {} overlap by {} m",
                    i + 1,
                    -gap
                )));
            }
        }

        let total: f64 = segments.iter().map(Segment::length).sum();
        if (total - length).abs() > tol {
            return Err(DesignError::geometry(format!(
                "segment lengths sum to {total} m but member '{label}' is {length} m long"
            )));
        }

        Ok(Self {
            label,
            length,
            segments,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn tolerance(&self) -> f64 {
        POSITION_TOLERANCE * self.length
    }

    fn check_domain(&self, global_position: f64) -> DesignResult<()> {
        let tol = self.tolerance();
        if !global_position.is_finite()
            || global_position < -tol
            || global_position > self.length + tol
        {
            return Err(DesignError::domain(
                format!("member '{}'", self.label),
                global_position,
                0.0,
                self.length,
            ));
        }
        Ok(())
    }

    /// The segment owning a global position, with the local position on it.
    ///
    /// Segments own `[start, end)`; the last segment also owns the member end.
    pub fn segment_containing(&self, global_position: f64) -> DesignResult<(usize, &Segment, f64)> {
        self.check_domain(global_position)?;
        let tol = self.tolerance();
        let count = self
            .segments
            .partition_point(|s| s.start() <= global_position + tol);
        let index = count.saturating_sub(1);
        let segment = &self.segments[index];
        let local = segment.to_local(global_position)?;
        Ok((index, segment, local))
    }

    /// Every segment touching a global position (two at an internal boundary)
    pub fn segments_at(&self, global_position: f64) -> Vec<(usize, &Segment, f64)> {
        if self.check_domain(global_position).is_err() {
            return Vec::new();
        }
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.to_local(global_position).ok().map(|local| (i, s, local)))
            .collect()
    }

    /// Every load case carried by any segment, ascending
    pub fn load_cases(&self) -> Vec<LoadCaseId> {
        let cases: BTreeSet<LoadCaseId> = self.segments.iter().flat_map(Segment::load_cases).collect();
        cases.into_iter().collect()
    }

    /// This member restricted to one load case; segments not loaded in the
    /// case carry zero forces
    pub fn for_case(&self, case: LoadCaseId) -> Member {
        Member {
            label: self.label.clone(),
            length: self.length,
            segments: self.segments.iter().map(|s| s.for_case(case)).collect(),
        }
    }

    /// Segment boundaries including both member ends
    pub fn boundaries(&self) -> Vec<f64> {
        let mut positions: Vec<f64> = self.segments.iter().map(Segment::start).collect();
        positions.push(self.length);
        positions
    }

    /// Positions where `kind` can govern: every segment's extrema plus all
    /// segment boundaries, sorted and de-duplicated.
    pub fn critical_positions(&self, kind: ForceKind) -> Vec<f64> {
        let mut positions = self.boundaries();
        for segment in &self.segments {
            positions.extend(
                segment
                    .forces()
                    .get(kind)
                    .extrema()
                    .into_iter()
                    .map(|(local, _)| segment.to_global(local)),
            );
        }
        self.merge_positions(positions)
    }

    /// All breakpoints of the given kinds plus segment boundaries
    pub fn breakpoint_positions(&self, kinds: &[ForceKind]) -> Vec<f64> {
        let mut positions = self.boundaries();
        for segment in &self.segments {
            positions.extend(
                segment
                    .forces()
                    .breakpoint_positions(kinds)
                    .into_iter()
                    .map(|local| segment.to_global(local)),
            );
        }
        self.merge_positions(positions)
    }

    /// Global positions where `kind` changes sign
    pub fn sign_changes(&self, kind: ForceKind) -> Vec<f64> {
        let positions = self
            .segments
            .iter()
            .flat_map(|segment| {
                segment
                    .forces()
                    .get(kind)
                    .sign_changes()
                    .into_iter()
                    .map(move |local| segment.to_global(local))
            })
            .collect();
        self.merge_positions(positions)
    }

    /// `count` evenly spaced interior positions
    pub fn assessment_positions(&self, count: usize) -> Vec<f64> {
        let spacing = self.length / (count + 1) as f64;
        (1..=count).map(|i| i as f64 * spacing).collect()
    }

    /// Sort and drop positions closer than the member tolerance
    pub fn merge_positions(&self, mut positions: Vec<f64>) -> Vec<f64> {
        let tol = self.tolerance();
        positions.sort_by(f64::total_cmp);
        positions.dedup_by(|later, earlier| (*later - *earlier).abs() <= tol);
        positions
    }
}

/// Chains segments end to end and validates the result
#[derive(Debug, Clone)]
pub struct MemberBuilder {
    label: String,
    length: f64,
    segments: Vec<Segment>,
}

impl MemberBuilder {
    pub fn new(label: impl Into<String>, length: f64) -> Self {
        Self {
            label: label.into(),
            length,
            segments: Vec::new(),
        }
    }

    /// Append a segment after the previous one
    pub fn segment(
        self,
        section_id: impl Into<String>,
        restraint: Restraint,
        forces: ForceSet,
    ) -> Self {
        self.push(Segment::new(section_id, restraint, forces))
    }

    /// Append an existing segment, re-placing it after the previous one
    pub fn push(mut self, segment: Segment) -> Self {
        let start = self.segments.last().map_or(0.0, Segment::end);
        self.segments.push(segment.placed_at(start));
        self
    }

    pub fn build(self) -> DesignResult<Member> {
        Member::new(self.label, self.length, self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;

    fn two_span() -> Member {
        let m = Profile::linear(&[(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)]).unwrap();
        MemberBuilder::new("M1", 5.0)
            .segment("A", Restraint::new(2.0), ForceSet::new().with(ForceKind::MomentMajor, m.clone()))
            .segment("B", Restraint::new(3.0), ForceSet::new().with(ForceKind::MomentMajor, m.scaled(-1.0)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_segment_containing_is_total() {
        let member = two_span();
        for i in 0..=500 {
            let x = 5.0 * i as f64 / 500.0;
            let (index, segment, local) = member.segment_containing(x).unwrap();
            assert!((0.0..=1.0).contains(&local));
            assert!((segment.to_global(local) - x).abs() < 1e-9);
            assert!(index < 2);
        }
    }

    #[test]
    fn test_boundary_resolves_right() {
        let member = two_span();
        let (index, _, local) = member.segment_containing(2.0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(local, 0.0);

        let (index, _, local) = member.segment_containing(5.0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(local, 1.0);

        let at = member.segments_at(2.0);
        assert_eq!(at.len(), 2);
        assert_eq!((at[0].0, at[0].2), (0, 1.0));
        assert_eq!((at[1].0, at[1].2), (1, 0.0));
    }

    #[test]
    fn test_outside_member_is_domain_error() {
        let member = two_span();
        assert_eq!(
            member.segment_containing(5.1).unwrap_err().error_code(),
            "DOMAIN_ERROR"
        );
        assert!(member.segments_at(-1.0).is_empty());
    }

    #[test]
    fn test_critical_positions() {
        let member = two_span();
        assert_eq!(member.critical_positions(ForceKind::MomentMajor), vec![0.0, 1.0, 2.0, 3.5, 5.0]);
        assert_eq!(member.critical_positions(ForceKind::Axial), vec![0.0, 2.0, 5.0]);
    }

    #[test]
    fn test_geometry_errors() {
        let forces = ForceSet::new();
        assert!(Member::new("empty", 1.0, vec![]).is_err());

        let gap = vec![
            Segment::new("A", Restraint::new(1.0), forces.clone()),
            Segment::new("A", Restraint::new(1.0), forces.clone()).placed_at(1.5),
        ];
        let err = Member::new("gap", 2.5, gap).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRY_ERROR");

        let overlap = vec![
            Segment::new("A", Restraint::new(1.0), forces.clone()),
            Segment::new("A", Restraint::new(1.0), forces.clone()).placed_at(0.5),
        ];
        assert!(Member::new("overlap", 1.5, overlap).is_err());

        let short = MemberBuilder::new("short", 3.0)
            .segment("A", Restraint::new(1.0), forces.clone())
            .build();
        assert!(short.is_err());

        let zero = MemberBuilder::new("zero", 1.0)
            .segment("A", Restraint::new(0.0), forces.clone())
            .segment("A", Restraint::new(1.0), forces)
            .build();
        assert_eq!(zero.unwrap_err().error_code(), "GEOMETRY_ERROR");
    }

    #[test]
    fn test_sign_changes_global() {
        let v = Profile::linear(&[(0.0, 10.0), (1.0, -10.0)]).unwrap();
        let member = MemberBuilder::new("V", 4.0)
            .segment("A", Restraint::new(4.0), ForceSet::new().with(ForceKind::ShearMajor, v))
            .build()
            .unwrap();
        assert_eq!(member.sign_changes(ForceKind::ShearMajor), vec![2.0]);
    }

    #[test]
    fn test_assessment_positions() {
        let member = two_span();
        assert_eq!(member.assessment_positions(4), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(member.assessment_positions(0).is_empty());
    }

    #[test]
    fn test_member_json_places_segments() {
        let json = r#"{
            "label": "J1",
            "length": 5.0,
            "segments": [
                {"section_id": "A", "restraint": {"length": 2.0}},
                {"section_id": "B", "restraint": {"length": 3.0}}
            ]
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.segments()[1].start(), 2.0);

        let bad = json.replace("\"length\": 5.0", "\"length\": 6.0");
        assert!(serde_json::from_str::<Member>(&bad).is_err());
    }

    #[test]
    fn test_load_cases_span_segments() {
        let left = Segment::new("A", Restraint::new(2.0), ForceSet::new())
            .with_case(2, ForceSet::constant(&[(ForceKind::Axial, 1.0)]));
        let right = Segment::with_cases(
            "B",
            Restraint::new(3.0),
            [(5, ForceSet::constant(&[(ForceKind::Axial, 2.0)]))],
        )
        .unwrap();
        let member = MemberBuilder::new("M2", 5.0).push(left).push(right).build().unwrap();
        assert_eq!(member.load_cases(), vec![0, 2, 5]);

        let five = member.for_case(5);
        assert_eq!(five.segments()[1].start(), 2.0);
        assert_eq!(five.segments()[0].force_at(ForceKind::Axial, 0.5).unwrap(), 0.0);
        assert_eq!(five.segments()[1].force_at(ForceKind::Axial, 0.5).unwrap(), 2.0);
    }
}

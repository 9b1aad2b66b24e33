//! # Check Results
//!
//! One [`CheckResult`] per (position, segment, check), collected into an
//! [`Evaluation`] with an overall [`Verdict`].
//!
//! A result is `Pass` when its ratio is at most 1 + tolerance, `Fail` when it
//! exceeds that, and `Inconclusive` when the design code could not evaluate
//! the check at that position (no capacity rule, outside a diagram's domain).
//! Inconclusive results are never counted as passes.
//!
//! ## Example Output
//!
//! ```json
//! {
//!   "position": 3.0,
//!   "segment": 0,
//!   "section_id": "310UB40.4",
//!   "local_position": 0.5,
//!   "load_case": 0,
//!   "kind": { "force": "moment_major" },
//!   "clause": { "code": "AS4100", "clause": "5.6.1", "ordinal": 2 },
//!   "demand": 90000.0,
//!   "capacity": 112400.0,
//!   "ratio": 0.80,
//!   "status": { "status": "pass" }
//! }
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codes::{Capacity, ClauseId, Interaction, SectionClass};
use crate::forces::{ForceKind, LoadCaseId};

/// What a result checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Single-action check of one force kind
    Force(ForceKind),
    /// Combined-action check
    Interaction,
}

impl CheckKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckKind::Force(kind) => kind.display_name(),
            CheckKind::Interaction => "Combined actions",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// The check could not be evaluated; never a pass
    Inconclusive { reason: String },
}

impl CheckStatus {
    pub fn from_ratio(ratio: f64, tolerance: f64) -> Self {
        if ratio <= 1.0 + tolerance {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Inconclusive { .. } => "INCONCLUSIVE",
        }
    }
}

/// Where a check was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Global position along the member (m)
    pub position: f64,
    /// Index of the segment in the member
    pub segment: usize,
    /// Normalised position within the segment
    pub local_position: f64,
    pub load_case: LoadCaseId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub position: f64,
    pub segment: usize,
    pub section_id: String,
    pub local_position: f64,
    #[serde(default)]
    pub load_case: LoadCaseId,
    pub kind: CheckKind,
    /// Governing clause, or the clause family for inconclusive checks
    pub clause: ClauseId,
    /// Design action (N or Nm, signed); absent for interaction and
    /// inconclusive checks
    pub demand: Option<f64>,
    /// Design capacity φR
    pub capacity: Option<f64>,
    pub ratio: Option<f64>,
    pub status: CheckStatus,
    /// Section class the capacity was derived for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<SectionClass>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub intermediates: BTreeMap<String, f64>,
}

impl CheckResult {
    /// Result of a single-action check
    pub fn from_capacity(
        at: Location,
        section_id: &str,
        kind: ForceKind,
        demand: f64,
        capacity: Capacity,
        tolerance: f64,
    ) -> Self {
        let ratio = capacity.ratio(demand);
        Self {
            position: at.position,
            segment: at.segment,
            section_id: section_id.to_string(),
            local_position: at.local_position,
            load_case: at.load_case,
            kind: CheckKind::Force(kind),
            clause: capacity.clause,
            demand: Some(demand),
            capacity: Some(capacity.value),
            ratio: Some(ratio),
            status: CheckStatus::from_ratio(ratio, tolerance),
            classification: capacity.classification,
            intermediates: capacity.intermediates,
        }
    }

    /// Result of a combined-action check; every evaluated clause ratio is kept
    /// in the intermediates under its clause number
    pub fn from_interaction(at: Location, section_id: &str, interaction: Interaction, tolerance: f64) -> Self {
        let ratio = interaction.governing.ratio;
        let intermediates = interaction
            .evaluated
            .iter()
            .map(|c| (c.clause.clause.clone(), c.ratio))
            .collect();
        Self {
            position: at.position,
            segment: at.segment,
            section_id: section_id.to_string(),
            local_position: at.local_position,
            load_case: at.load_case,
            kind: CheckKind::Interaction,
            clause: interaction.governing.clause,
            demand: None,
            capacity: None,
            ratio: Some(ratio),
            status: CheckStatus::from_ratio(ratio, tolerance),
            classification: None,
            intermediates,
        }
    }

    pub fn inconclusive(
        at: Location,
        section_id: &str,
        kind: CheckKind,
        clause: ClauseId,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            position: at.position,
            segment: at.segment,
            section_id: section_id.to_string(),
            local_position: at.local_position,
            load_case: at.load_case,
            kind,
            clause,
            demand: None,
            capacity: None,
            ratio: None,
            status: CheckStatus::Inconclusive { reason: reason.into() },
            classification: None,
            intermediates: BTreeMap::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }

    pub fn failed(&self) -> bool {
        self.status == CheckStatus::Fail
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self.status, CheckStatus::Inconclusive { .. })
    }

    /// Report order: position, clause order, segment, check kind, load case
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.position
            .total_cmp(&other.position)
            .then_with(|| self.clause.cmp(&other.clause))
            .then_with(|| self.segment.cmp(&other.segment))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.load_case.cmp(&other.load_case))
    }
}

/// Overall outcome of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pass,
    Fail,
    Inconclusive,
}

impl Verdict {
    /// Fail if anything failed, else inconclusive if anything was
    /// inconclusive, else pass
    pub fn from_results(results: &[CheckResult]) -> Self {
        if results.iter().any(CheckResult::failed) {
            Verdict::Fail
        } else if results.iter().any(CheckResult::is_inconclusive) {
            Verdict::Inconclusive
        } else {
            Verdict::Pass
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Inconclusive => "INCONCLUSIVE",
        };
        write!(f, "{name}")
    }
}

/// All results of one member against one design code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub member: String,
    pub code: String,
    pub tolerance: f64,
    /// Sorted by [`CheckResult::report_order`]
    pub results: Vec<CheckResult>,
    pub verdict: Verdict,
}

impl Evaluation {
    /// Sort the results and derive the verdict
    pub fn new(member: impl Into<String>, code: impl Into<String>, tolerance: f64, mut results: Vec<CheckResult>) -> Self {
        results.sort_by(CheckResult::report_order);
        let verdict = Verdict::from_results(&results);
        Self {
            member: member.into(),
            code: code.into(),
            tolerance,
            results,
            verdict,
        }
    }

    /// Result with the highest ratio; the first in report order on ties
    pub fn governing(&self) -> Option<&CheckResult> {
        let mut governing: Option<&CheckResult> = None;
        for result in &self.results {
            let Some(ratio) = result.ratio else { continue };
            if governing.and_then(|g| g.ratio).map_or(true, |best| ratio > best) {
                governing = Some(result);
            }
        }
        governing
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.failed())
    }

    pub fn inconclusive(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| r.is_inconclusive())
    }

    pub fn summary(&self) -> Summary {
        let governing = self.governing().map(|g| Governing {
            kind: g.kind,
            clause: g.clause.clone(),
            position: g.position,
            load_case: g.load_case,
            ratio: g.ratio.unwrap_or_default(),
        });
        Summary {
            member: self.member.clone(),
            code: self.code.clone(),
            verdict: self.verdict,
            checks: self.results.len(),
            passed: self.results.iter().filter(|r| r.passed()).count(),
            failed: self.failures().count(),
            inconclusive: self.inconclusive().count(),
            governing,
        }
    }
}

/// Governing check of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Governing {
    pub kind: CheckKind,
    pub clause: ClauseId,
    pub position: f64,
    pub load_case: LoadCaseId,
    pub ratio: f64,
}

/// Counts and governing check of an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub member: String,
    pub code: String,
    pub verdict: Verdict,
    pub checks: usize,
    pub passed: usize,
    pub failed: usize,
    pub inconclusive: usize,
    pub governing: Option<Governing>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}]: {} ({} checks, {} pass, {} fail, {} inconclusive)",
            self.member, self.code, self.verdict, self.checks, self.passed, self.failed, self.inconclusive
        )?;
        if let Some(g) = &self.governing {
            write!(
                f,
                "; governing {} {} at {:.3} m in case {}, ratio {:.3}",
                g.kind, g.clause, g.position, g.load_case, g.ratio
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::ClauseRatio;
    use crate::forces::Action;

    fn clause(name: &str, ordinal: u16) -> ClauseId {
        ClauseId::new("TEST", name, ordinal)
    }

    fn at(position: f64) -> Location {
        Location {
            position,
            segment: 0,
            local_position: position / 4.0,
            load_case: 0,
        }
    }

    fn moment_result(position: f64, demand: f64) -> CheckResult {
        let capacity = Capacity::new(Action::of(ForceKind::MomentMajor, 1.0), 100.0, 1.0, clause("5.2", 1));
        CheckResult::from_capacity(at(position), "S", ForceKind::MomentMajor, demand, capacity, 1e-6)
    }

    #[test]
    fn test_status_tolerance() {
        assert_eq!(CheckStatus::from_ratio(1.0 + 5e-7, 1e-6), CheckStatus::Pass);
        assert_eq!(CheckStatus::from_ratio(1.0 + 2e-6, 1e-6), CheckStatus::Fail);
        assert!(moment_result(1.0, 100.0).passed());
        assert!(moment_result(1.0, -101.0).failed());
    }

    #[test]
    fn test_verdict() {
        let pass = moment_result(1.0, 50.0);
        let fail = moment_result(2.0, 150.0);
        let unknown = CheckResult::inconclusive(at(3.0), "S", CheckKind::Interaction, clause("8.3.2", 2), "no rule");

        assert_eq!(Verdict::from_results(&[pass.clone()]), Verdict::Pass);
        assert_eq!(Verdict::from_results(&[pass.clone(), unknown.clone()]), Verdict::Inconclusive);
        assert_eq!(Verdict::from_results(&[pass, unknown, fail]), Verdict::Fail);
    }

    #[test]
    fn test_evaluation_sorts_and_summarises() {
        let results = vec![
            moment_result(3.0, 60.0),
            moment_result(1.0, 90.0),
            moment_result(2.0, 90.0),
        ];
        let evaluation = Evaluation::new("B1", "TEST", 1e-6, results);
        let positions: Vec<f64> = evaluation.results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1.0, 2.0, 3.0]);

        let governing = evaluation.governing().unwrap();
        assert_eq!(governing.position, 1.0);

        let summary = evaluation.summary();
        assert_eq!(summary.checks, 3);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.verdict, Verdict::Pass);
        assert!(summary.to_string().contains("B1 [TEST]: PASS"));
    }

    #[test]
    fn test_governing_spans_load_cases() {
        let mut heavy = moment_result(1.0, 120.0);
        heavy.load_case = 2;
        let light = moment_result(1.0, 40.0);
        let evaluation = Evaluation::new("B2", "TEST", 1e-6, vec![heavy, light]);

        assert_eq!(evaluation.results[0].load_case, 0);
        assert_eq!(evaluation.verdict, Verdict::Fail);
        let summary = evaluation.summary();
        assert_eq!(summary.governing.as_ref().map(|g| g.load_case), Some(2));
        assert!(summary.to_string().contains("in case 2"));
    }

    #[test]
    fn test_interaction_result_keeps_clause_ratios() {
        let interaction = Interaction::resolve(
            vec![
                ClauseRatio::new(clause("8.3.2", 1), 0.4),
                ClauseRatio::new(clause("8.4.4", 2), 0.7),
            ],
            Default::default(),
        )
        .unwrap();
        let result = CheckResult::from_interaction(at(2.0), "S", interaction, 1e-6);
        assert_eq!(result.clause.clause, "8.4.4");
        assert_eq!(result.intermediates["8.3.2"], 0.4);
        assert!(result.demand.is_none());
        assert!(result.passed());
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(moment_result(1.0, 50.0)).unwrap();
        assert_eq!(json["kind"]["force"], "moment_major");
        assert_eq!(json["status"]["status"], "pass");
    }
}

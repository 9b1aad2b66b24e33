//! # Design Check Orchestrator
//!
//! Drives a [`DesignCode`] over a [`Member`]:
//!
//! 1. validate the configuration and resolve every segment's section
//!    (a missing section aborts before any check runs)
//! 2. per load case, collect the positions each configured force kind can
//!    govern at, plus evenly spaced assessment points
//! 3. evaluate one check per (load case, position, touching segment, check
//!    kind) in parallel; at an internal boundary both segments are checked
//! 4. turn per-position errors into inconclusive results
//! 5. sort into report order and derive the verdict
//!
//! ## Example
//!
//! ```rust
//! use check_core::config::CheckConfig;
//! use check_core::forces::{ForceKind, ForceSet};
//! use check_core::member::{MemberBuilder, Restraint};
//! use check_core::orchestrator::check;
//! use check_core::profile::Profile;
//! use check_core::results::Verdict;
//! use check_core::sections::SectionLibrary;
//!
//! // 6 m simply supported beam, 10 kN/m
//! let (w, l) = (10.0e3, 6.0);
//! let forces = ForceSet::new()
//!     .with(ForceKind::MomentMajor, Profile::sampled(24, |x| w * l * l / 2.0 * x * (1.0 - x)).unwrap())
//!     .with(ForceKind::ShearMajor, Profile::linear(&[(0.0, w * l / 2.0), (1.0, -w * l / 2.0)]).unwrap());
//! let member = MemberBuilder::new("B1", l)
//!     .segment("310UB40.4", Restraint::new(l), forces)
//!     .build()
//!     .unwrap();
//!
//! let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
//! assert_eq!(evaluation.verdict, Verdict::Pass);
//! ```

use rayon::prelude::*;

use crate::codes::DesignCode;
use crate::config::CheckConfig;
use crate::errors::DesignResult;
use crate::forces::{Action, ForceKind, LoadCaseId};
use crate::member::{Member, Segment};
use crate::results::{CheckKind, CheckResult, Evaluation, Location};
use crate::sections::{SectionProperties, SectionProvider};

/// Force kinds whose breakpoints set the interaction positions
pub const INTERACTION_KINDS: [ForceKind; 4] = [
    ForceKind::Axial,
    ForceKind::MomentMajor,
    ForceKind::MomentMinor,
    ForceKind::ShearMajor,
];

/// One check to run
#[derive(Debug, Clone, Copy)]
struct WorkItem {
    at: Location,
    /// Index into the load case views
    view: usize,
    kind: CheckKind,
}

/// Evaluate a member with the design code selected by `config`
pub fn check(member: &Member, sections: &dyn SectionProvider, config: &CheckConfig) -> DesignResult<Evaluation> {
    let code = config.design_code();
    evaluate(member, code.as_ref(), sections, config)
}

/// Evaluate every configured check of a member.
///
/// # Errors
///
/// Fails without producing results when the configuration is invalid or a
/// segment's section cannot be resolved. Errors that only affect one
/// position become inconclusive results instead.
pub fn evaluate(
    member: &Member,
    code: &dyn DesignCode,
    sections: &dyn SectionProvider,
    config: &CheckConfig,
) -> DesignResult<Evaluation> {
    config.validate()?;

    let resolved: Vec<&SectionProperties> = member
        .segments()
        .iter()
        .map(|segment| sections.properties(segment.section_id()))
        .collect::<DesignResult<_>>()?;

    let views: Vec<(LoadCaseId, Member)> = member
        .load_cases()
        .into_iter()
        .map(|case| (case, member.for_case(case)))
        .collect();
    let items: Vec<WorkItem> = views
        .iter()
        .enumerate()
        .flat_map(|(view, (case, single))| work_items(single, *case, view, config))
        .collect();
    tracing::debug!(
        member = member.label(),
        code = code.name(),
        load_cases = views.len(),
        checks = items.len(),
        "evaluating member"
    );

    let results: Vec<CheckResult> = items
        .par_iter()
        .map(|item| {
            let segment = &views[item.view].1.segments()[item.at.segment];
            run_check(item, segment, resolved[item.at.segment], code, config.tolerance)
        })
        .collect::<DesignResult<_>>()?;

    let evaluation = Evaluation::new(member.label(), code.name(), config.tolerance, results);
    let summary = evaluation.summary();
    tracing::info!(
        member = member.label(),
        verdict = %evaluation.verdict,
        checks = summary.checks,
        failed = summary.failed,
        inconclusive = summary.inconclusive,
        "member evaluated"
    );
    Ok(evaluation)
}

/// Evaluate independent members in parallel, one outcome per member in input
/// order
pub fn evaluate_all(
    members: &[Member],
    code: &dyn DesignCode,
    sections: &dyn SectionProvider,
    config: &CheckConfig,
) -> Vec<DesignResult<Evaluation>> {
    members
        .par_iter()
        .map(|member| evaluate(member, code, sections, config))
        .collect()
}

fn work_items(member: &Member, load_case: LoadCaseId, view: usize, config: &CheckConfig) -> Vec<WorkItem> {
    let assessment = member.assessment_positions(config.assessment_points);
    let mut items = Vec::new();

    let mut push_at = |positions: Vec<f64>, kind: CheckKind| {
        for position in member.merge_positions(positions) {
            for (segment, _, local_position) in member.segments_at(position) {
                items.push(WorkItem {
                    at: Location {
                        position,
                        segment,
                        local_position,
                        load_case,
                    },
                    view,
                    kind,
                });
            }
        }
    };

    for &kind in &config.force_kinds {
        let mut positions = member.critical_positions(kind);
        positions.extend_from_slice(&assessment);
        tracing::debug!(load_case, kind = kind.display_name(), positions = positions.len(), "critical positions");
        push_at(positions, CheckKind::Force(kind));
    }

    if config.interaction {
        let mut positions = member.breakpoint_positions(&INTERACTION_KINDS);
        positions.extend(member.critical_positions(ForceKind::MomentMajor));
        positions.extend_from_slice(&assessment);
        push_at(positions, CheckKind::Interaction);
    }

    items
}

fn run_check(
    item: &WorkItem,
    segment: &Segment,
    section: &SectionProperties,
    code: &dyn DesignCode,
    tolerance: f64,
) -> DesignResult<CheckResult> {
    let at = item.at;
    let local = at.local_position;

    let (outcome, clause) = match item.kind {
        CheckKind::Force(kind) => {
            let outcome = segment.force_at(kind, local).and_then(|demand| {
                let capacity = code.segment_capacity(segment, section, Action::of(kind, demand))?;
                Ok(CheckResult::from_capacity(at, section.id.as_str(), kind, demand, capacity, tolerance))
            });
            (outcome, code.clause_for(kind))
        }
        CheckKind::Interaction => {
            let outcome = code
                .interaction_ratio(segment, local, section)
                .map(|interaction| CheckResult::from_interaction(at, section.id.as_str(), interaction, tolerance));
            (outcome, code.interaction_clause())
        }
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(e) if e.is_per_position() => {
            tracing::warn!(
                position = at.position,
                segment = at.segment,
                load_case = at.load_case,
                check = %item.kind,
                error = %e,
                "check inconclusive"
            );
            Ok(CheckResult::inconclusive(at, section.id.as_str(), item.kind, clause, e.to_string()))
        }
        Err(e) => Err(e),
    }
}

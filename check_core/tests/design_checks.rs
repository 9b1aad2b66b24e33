//! End-to-end checks of members against AS 4100 and a stub design code.

use approx::assert_relative_eq;

use check_core::codes::{Capacity, ClauseId, ClauseRatio, DesignCode, Interaction, SectionClass, TieBreak};
use check_core::config::CheckConfig;
use check_core::errors::{DesignError, DesignResult};
use check_core::forces::{Action, ForceKind, ForceSet};
use check_core::materials::SteelGrade;
use check_core::member::{Member, MemberBuilder, Restraint, Segment};
use check_core::orchestrator::{check, evaluate};
use check_core::profile::Profile;
use check_core::results::{CheckKind, CheckResult, CheckStatus, Verdict};
use check_core::sections::{Fabrication, SectionLibrary, SectionProperties, SectionShape};

fn udl_forces(w: f64, l: f64) -> ForceSet {
    ForceSet::new()
        .with(
            ForceKind::MomentMajor,
            Profile::sampled(24, |x| w * l * l / 2.0 * x * (1.0 - x)).unwrap(),
        )
        .with(
            ForceKind::ShearMajor,
            Profile::linear(&[(0.0, w * l / 2.0), (1.0, -w * l / 2.0)]).unwrap(),
        )
}

fn results_of(results: &[CheckResult], kind: CheckKind) -> Vec<&CheckResult> {
    results.iter().filter(|r| r.kind == kind).collect()
}

#[test]
fn test_simply_supported_udl_governs_at_midspan() {
    let (w, l) = (20.0e3, 6.0);
    let member = MemberBuilder::new("B1", l)
        .segment("310UB40.4", Restraint::new(l), udl_forces(w, l))
        .build()
        .unwrap();

    let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
    assert_eq!(evaluation.verdict, Verdict::Pass);

    let moments = results_of(&evaluation.results, CheckKind::Force(ForceKind::MomentMajor));
    let governing = moments
        .iter()
        .max_by(|a, b| a.ratio.unwrap().total_cmp(&b.ratio.unwrap()))
        .unwrap();
    assert_relative_eq!(governing.position, l / 2.0);
    assert_relative_eq!(governing.demand.unwrap(), w * l * l / 8.0, max_relative = 1e-12);
    assert_eq!(governing.clause.clause, "5.2");
}

#[test]
fn test_segments_of_different_class_checked_at_shared_boundary() {
    let slender = SectionProperties::from_shape(
        "310WB-THIN",
        SectionShape::ISection {
            depth: 0.31,
            flange_width: 0.3,
            flange_thickness: 0.008,
            web_thickness: 0.006,
        },
        SteelGrade::Grade300,
        Fabrication::LightlyWelded,
    )
    .unwrap();
    let library: SectionLibrary = [SectionLibrary::builtin().lookup("310UB40.4").unwrap().clone(), slender]
        .into_iter()
        .collect();

    let moment = ForceSet::constant(&[(ForceKind::MomentMajor, 50.0e3)]);
    let member = MemberBuilder::new("B2", 6.0)
        .segment("310UB40.4", Restraint::new(3.0), moment.clone())
        .segment("310WB-THIN", Restraint::new(3.0), moment)
        .build()
        .unwrap();

    let config = CheckConfig {
        force_kinds: vec![ForceKind::MomentMajor],
        interaction: false,
        ..Default::default()
    };
    let evaluation = check(&member, &library, &config).unwrap();

    let at_boundary: Vec<&CheckResult> = evaluation.results.iter().filter(|r| r.position == 3.0).collect();
    assert_eq!(at_boundary.len(), 2);
    assert_eq!(at_boundary[0].segment, 0);
    assert_eq!(at_boundary[1].segment, 1);
    assert_eq!(at_boundary[0].local_position, 1.0);
    assert_eq!(at_boundary[1].local_position, 0.0);
    assert_eq!(at_boundary[0].classification, Some(SectionClass::Compact));
    assert_eq!(at_boundary[1].classification, Some(SectionClass::Slender));
    assert_ne!(at_boundary[0].capacity, at_boundary[1].capacity);
}

#[test]
fn test_slender_column_uses_member_buckling() {
    let member = MemberBuilder::new("C1", 6.0)
        .segment(
            "200UC52.2",
            Restraint::new(6.0),
            ForceSet::constant(&[(ForceKind::Axial, -300.0e3)]),
        )
        .build()
        .unwrap();
    let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();

    let axial = results_of(&evaluation.results, CheckKind::Force(ForceKind::Axial));
    assert!(!axial.is_empty());
    for result in axial {
        assert_eq!(result.clause.clause, "6.3.3");
        assert!(result.intermediates["alpha_c_minor"] < 1.0);
        assert!(result.passed());
    }
}

#[test]
fn test_query_outside_domain_fails() {
    let profile = Profile::linear(&[(0.0, 1.0), (1.0, 2.0)]).unwrap();
    assert!(matches!(profile.value_at(1.5), Err(DesignError::Domain { .. })));
    assert!(matches!(profile.value_at(-0.1), Err(DesignError::Domain { .. })));
}

#[test]
fn test_evaluation_is_repeatable() {
    let member = MemberBuilder::new("B3", 8.0)
        .segment("410UB53.7", Restraint::new(4.0), udl_forces(15.0e3, 4.0))
        .segment("410UB53.7", Restraint::new(4.0), udl_forces(15.0e3, 4.0))
        .build()
        .unwrap();
    let config = CheckConfig {
        assessment_points: 7,
        ..Default::default()
    };
    let first = check(&member, SectionLibrary::builtin(), &config).unwrap();
    let second = check(&member, SectionLibrary::builtin(), &config).unwrap();
    assert_eq!(first, second);
    assert!(first
        .results
        .windows(2)
        .all(|w| w[0].report_order(&w[1]) != std::cmp::Ordering::Greater));
}

#[test]
fn test_larger_demand_never_lowers_ratios() {
    let base = ForceSet::constant(&[(ForceKind::Axial, -100.0e3)])
        .with(
            ForceKind::MomentMajor,
            Profile::sampled(16, |x| 120.0e3 * x * (1.0 - x)).unwrap(),
        )
        .with(
            ForceKind::ShearMajor,
            Profile::linear(&[(0.0, 30.0e3), (1.0, -30.0e3)]).unwrap(),
        );
    let build = |factor: f64| -> Member {
        MemberBuilder::new("BC", 4.0)
            .segment("250UB31.4", Restraint::new(4.0), base.scaled(factor))
            .build()
            .unwrap()
    };

    let ratios = |factor: f64| -> Vec<f64> {
        check(&build(factor), SectionLibrary::builtin(), &CheckConfig::default())
            .unwrap()
            .results
            .iter()
            .map(|r| r.ratio.unwrap())
            .collect()
    };

    let mut previous = ratios(1.0);
    for factor in [1.5, 2.0, 3.0] {
        let current = ratios(factor);
        assert_eq!(current.len(), previous.len());
        for (now, before) in current.iter().zip(&previous) {
            assert!(now + 1e-12 >= *before, "ratio fell from {before} to {now} at x{factor}");
        }
        previous = current;
    }
}

#[test]
fn test_member_from_json() {
    let json = r#"{
        "label": "B4",
        "length": 5.0,
        "segments": [
            {
                "section_id": "250UB31.4",
                "restraint": {
                    "length": 2.0,
                    "lateral": { "type": "segment", "code": "FF" }
                },
                "forces": {
                    "moment_major": {
                        "breakpoints": [
                            { "position": 0.0, "value": 0.0 },
                            { "position": 1.0, "value": 40000.0 }
                        ]
                    }
                }
            },
            {
                "section_id": "250UB31.4",
                "restraint": { "length": 3.0 },
                "forces": {
                    "moment_major": {
                        "breakpoints": [
                            { "position": 0.0, "value": 40000.0 },
                            { "position": 1.0, "value": 0.0 }
                        ]
                    }
                }
            }
        ]
    }"#;
    let member: Member = serde_json::from_str(json).unwrap();
    assert_eq!(member.segments()[1].start(), 2.0);

    let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
    let at_peak = evaluation
        .results
        .iter()
        .filter(|r| r.position == 2.0 && r.kind == CheckKind::Force(ForceKind::MomentMajor))
        .map(|r| r.clause.clause.as_str())
        .collect::<Vec<_>>();
    assert_eq!(at_peak, vec!["5.2", "5.6.1"]);

    let round_trip: serde_json::Value = serde_json::to_value(&evaluation).unwrap();
    assert_eq!(round_trip["member"], "B4");
    assert_eq!(round_trip["code"], "AS4100");
}

#[test]
fn test_heavier_load_case_governs() {
    let l = 6.0;
    let segment = Segment::with_cases(
        "310UB40.4",
        Restraint::new(l),
        [(1, udl_forces(5.0e3, l)), (2, udl_forces(80.0e3, l))],
    )
    .unwrap();
    let member = MemberBuilder::new("B5", l).push(segment).build().unwrap();

    let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
    assert_eq!(evaluation.verdict, Verdict::Fail);
    assert!(evaluation.results.iter().any(|r| r.load_case == 1));
    assert!(evaluation.failures().all(|r| r.load_case == 2));

    let governing = evaluation.governing().unwrap();
    assert_eq!(governing.load_case, 2);
    assert_relative_eq!(governing.position, l / 2.0);

    let light = member.for_case(1);
    let light_only = check(&light, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
    assert_eq!(light_only.verdict, Verdict::Pass);
}

// ============================================================================
// Stub design code
// ============================================================================

fn clause(name: &str, ordinal: u16) -> ClauseId {
    ClauseId::new("STUB", name, ordinal)
}

/// Moment capacity 100, everything else 1000; minor shear has no rule and
/// torsion breaks the whole run. Both interaction clauses report the same
/// ratio so ties are always resolved by the tie-break.
struct StubCode {
    tie_break: TieBreak,
}

impl DesignCode for StubCode {
    fn name(&self) -> &str {
        "STUB"
    }

    fn clause_order(&self) -> Vec<ClauseId> {
        vec![clause("A", 1), clause("B", 2), clause("X", 3)]
    }

    fn section_capacity(
        &self,
        _section: &SectionProperties,
        _restraint: &Restraint,
        action: Action,
    ) -> DesignResult<Capacity> {
        match action.kind {
            ForceKind::MomentMajor => Ok(Capacity::new(action, 100.0, 1.0, clause("A", 1))),
            ForceKind::ShearMinor => Err(DesignError::inapplicable("STUB X", "no rule for minor shear")),
            ForceKind::Torsion => Err(DesignError::geometry("stub cannot handle torsion")),
            _ => Ok(Capacity::new(action, 1000.0, 1.0, clause("B", 2))),
        }
    }

    fn interaction_ratio(
        &self,
        segment: &Segment,
        local_position: f64,
        _section: &SectionProperties,
    ) -> DesignResult<Interaction> {
        let ratio = segment.force_at(ForceKind::MomentMajor, local_position)?.abs() / 100.0;
        Interaction::resolve(
            vec![ClauseRatio::new(clause("B", 2), ratio), ClauseRatio::new(clause("A", 1), ratio)],
            self.tie_break,
        )
        .ok_or_else(|| DesignError::inapplicable("STUB A", "nothing evaluated"))
    }

    fn clause_for(&self, _kind: ForceKind) -> ClauseId {
        clause("X", 3)
    }

    fn interaction_clause(&self) -> ClauseId {
        clause("A", 1)
    }
}

fn stub_member(moment: f64) -> Member {
    MemberBuilder::new("S1", 2.0)
        .segment(
            "200UC52.2",
            Restraint::new(2.0),
            ForceSet::constant(&[(ForceKind::MomentMajor, moment)]),
        )
        .build()
        .unwrap()
}

#[test]
fn test_tie_break_selects_clause() {
    let config = CheckConfig {
        force_kinds: vec![ForceKind::MomentMajor],
        ..Default::default()
    };
    let member = stub_member(50.0);

    for (tie_break, expected) in [(TieBreak::FirstListed, "A"), (TieBreak::LastListed, "B")] {
        let code = StubCode { tie_break };
        let evaluation = evaluate(&member, &code, SectionLibrary::builtin(), &config).unwrap();
        let interactions = results_of(&evaluation.results, CheckKind::Interaction);
        assert!(!interactions.is_empty());
        for result in interactions {
            assert_eq!(result.clause.clause, expected);
            assert_relative_eq!(result.ratio.unwrap(), 0.5);
        }
    }
}

#[test]
fn test_missing_rule_is_inconclusive_not_pass() {
    let code = StubCode {
        tie_break: TieBreak::FirstListed,
    };
    let config = CheckConfig {
        force_kinds: vec![ForceKind::MomentMajor, ForceKind::ShearMinor],
        interaction: false,
        ..Default::default()
    };
    let evaluation = evaluate(&stub_member(50.0), &code, SectionLibrary::builtin(), &config).unwrap();

    let shear = results_of(&evaluation.results, CheckKind::Force(ForceKind::ShearMinor));
    assert_eq!(shear.len(), 2);
    for result in shear {
        assert!(matches!(result.status, CheckStatus::Inconclusive { ref reason } if reason.contains("minor shear")));
        assert_eq!(result.clause.clause, "X");
        assert!(!result.passed());
    }
    assert_eq!(evaluation.verdict, Verdict::Inconclusive);

    // a failure outranks inconclusive checks
    let failing = evaluate(&stub_member(150.0), &code, SectionLibrary::builtin(), &config).unwrap();
    assert_eq!(failing.verdict, Verdict::Fail);
    assert_eq!(failing.governing().unwrap().ratio, Some(1.5));
}

#[test]
fn test_non_positional_error_aborts() {
    let code = StubCode {
        tie_break: TieBreak::FirstListed,
    };
    let config = CheckConfig {
        force_kinds: vec![ForceKind::Torsion],
        interaction: false,
        ..Default::default()
    };
    let err = evaluate(&stub_member(50.0), &code, SectionLibrary::builtin(), &config).unwrap_err();
    assert_eq!(err.error_code(), "GEOMETRY_ERROR");
}

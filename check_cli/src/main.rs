//! # Beamcheck CLI
//!
//! Evaluates a member against the built-in section library and prints a
//! results table followed by the full evaluation as JSON.
//!
//! ```text
//! check_cli [MEMBER.json] [CONFIG.toml]
//! ```
//!
//! With no arguments a simply supported demo beam is checked. Set `RUST_LOG`
//! (e.g. `RUST_LOG=check_core=debug`) for evaluation logs on stderr.

use std::process::ExitCode;

use check_core::config::CheckConfig;
use check_core::forces::{ForceKind, ForceSet};
use check_core::member::{LateralRestraint, Member, MemberBuilder, Restraint, RestraintCode};
use check_core::orchestrator::check;
use check_core::profile::Profile;
use check_core::results::{CheckKind, CheckResult, CheckStatus, Evaluation, Verdict};
use check_core::sections::SectionLibrary;
use check_core::units::{KilonewtonMeters, Kilonewtons, NewtonMeters, Newtons};
use check_core::{DesignError, DesignResult};
use tracing_subscriber::EnvFilter;

/// 7.5 m simply supported 410UB53.7 under 18 kN/m, restrained at midspan
fn demo_member() -> DesignResult<Member> {
    let (w, l) = (18.0e3, 7.5);
    let half = l / 2.0;
    let moment = move |x0: f64| {
        move |x: f64| {
            let z = x0 + x * half;
            w * z * (l - z) / 2.0
        }
    };
    let shear = |z: f64| w * (l / 2.0 - z);
    let lateral = LateralRestraint::segment(RestraintCode::Ff);

    let left = ForceSet::new()
        .with(ForceKind::MomentMajor, Profile::sampled(12, moment(0.0))?)
        .with(ForceKind::ShearMajor, Profile::linear(&[(0.0, shear(0.0)), (1.0, shear(half))])?);
    let right = ForceSet::new()
        .with(ForceKind::MomentMajor, Profile::sampled(12, moment(half))?)
        .with(ForceKind::ShearMajor, Profile::linear(&[(0.0, shear(half)), (1.0, shear(l))])?);

    MemberBuilder::new("DEMO-B1", l)
        .segment("410UB53.7", Restraint::new(half).with_lateral(lateral), left)
        .segment("410UB53.7", Restraint::new(half).with_lateral(lateral), right)
        .build()
}

fn read_file(path: &str) -> DesignResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DesignError::invalid_input("path", path, format!("cannot read file: {e}")))
}

fn load_member(path: &str) -> DesignResult<Member> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|e| DesignError::invalid_input("member", path, e.to_string()))
}

fn load_config(path: &str) -> DesignResult<CheckConfig> {
    let text = read_file(path)?;
    if path.ends_with(".json") {
        CheckConfig::from_json_str(&text)
    } else {
        CheckConfig::from_toml_str(&text)
    }
}

fn format_demand(result: &CheckResult) -> String {
    match (result.kind, result.demand) {
        (CheckKind::Force(kind), Some(demand)) if kind.is_moment() || kind == ForceKind::Torsion => {
            format!("{:>13}", format!("{:.1}", KilonewtonMeters::from(NewtonMeters(demand))))
        }
        (_, Some(demand)) => format!("{:>13}", format!("{:.1}", Kilonewtons::from(Newtons(demand)))),
        (_, None) => format!("{:>13}", "-"),
    }
}

fn format_capacity(result: &CheckResult) -> String {
    match (result.kind, result.capacity) {
        (CheckKind::Force(kind), Some(capacity)) if kind.is_moment() => {
            format!("{:>13}", format!("{:.1}", KilonewtonMeters::from(NewtonMeters(capacity))))
        }
        (_, Some(capacity)) => format!("{:>13}", format!("{:.1}", Kilonewtons::from(Newtons(capacity)))),
        (_, None) => format!("{:>13}", "-"),
    }
}

fn print_table(evaluation: &Evaluation) {
    println!("═══════════════════════════════════════════════════════════════════════════════");
    println!("  {} - {}", evaluation.member, evaluation.code);
    println!("═══════════════════════════════════════════════════════════════════════════════");
    println!(
        "{:>7}  {:>3}  {:>4}  {:<18} {:<10} {:>13} {:>13} {:>7}  {}",
        "x (m)", "seg", "case", "check", "clause", "demand", "capacity", "ratio", "status"
    );
    for result in &evaluation.results {
        let ratio = result
            .ratio
            .map_or_else(|| "-".to_string(), |r| format!("{r:.3}"));
        println!(
            "{:>7.3}  {:>3}  {:>4}  {:<18} {:<10} {} {} {:>7}  {}",
            result.position,
            result.segment,
            result.load_case,
            result.kind.display_name(),
            result.clause.clause,
            format_demand(result),
            format_capacity(result),
            ratio,
            result.status.display_name()
        );
    }
    println!();
    println!("{}", evaluation.summary());
    for result in evaluation.inconclusive() {
        if let CheckStatus::Inconclusive { reason } = &result.status {
            println!(
                "  inconclusive at {:.3} m, case {} ({}): {}",
                result.position, result.load_case, result.kind, reason
            );
        }
    }
}

fn run(args: &[String]) -> DesignResult<Evaluation> {
    let member = match args.first() {
        Some(path) => load_member(path)?,
        None => {
            println!("No member file given, running the built-in demo beam.");
            println!();
            demo_member()?
        }
    };
    let config = match args.get(1) {
        Some(path) => load_config(path)?,
        None => CheckConfig::default(),
    };
    check(&member, SectionLibrary::builtin(), &config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(evaluation) => {
            print_table(&evaluation);
            println!();
            match serde_json::to_string_pretty(&evaluation) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "failed to serialize evaluation"),
            }
            match evaluation.verdict {
                Verdict::Pass => ExitCode::SUCCESS,
                Verdict::Fail => ExitCode::from(1),
                Verdict::Inconclusive => ExitCode::from(3),
            }
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "evaluation aborted");
            eprintln!("error [{}]: {e}", e.error_code());
            ExitCode::from(2)
        }
    }
}

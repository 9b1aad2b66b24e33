//! # check_core - Member Design-Check Engine
//!
//! `check_core` decides whether a structural member (beam or column) satisfies
//! a design code's strength rules, given its cross-sections, restraints and
//! the internal force and moment diagrams from an analysis. It does not
//! perform structural analysis.
//!
//! ## Design Philosophy
//!
//! - **Exact diagrams**: force diagrams are breakpoint data with an
//!   interpolation rule, queried exactly at breakpoints
//! - **Pluggable codes**: design codes are [`codes::DesignCode`] strategies;
//!   the member model never branches on which code is in use
//! - **JSON-First**: members, sections, configs and results all serialize
//! - **Rich Errors**: structured [`DesignError`] variants; errors at a single
//!   position become inconclusive results, never silent passes
//!
//! ## Quick Start
//!
//! ```rust
//! use check_core::config::CheckConfig;
//! use check_core::forces::{ForceKind, ForceSet};
//! use check_core::member::{MemberBuilder, Restraint};
//! use check_core::orchestrator::check;
//! use check_core::results::Verdict;
//! use check_core::sections::SectionLibrary;
//!
//! // 3 m column, 400 kN compression
//! let member = MemberBuilder::new("C1", 3.0)
//!     .segment(
//!         "200UC52.2",
//!         Restraint::new(3.0),
//!         ForceSet::constant(&[(ForceKind::Axial, -400.0e3)]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let evaluation = check(&member, SectionLibrary::builtin(), &CheckConfig::default()).unwrap();
//! assert_eq!(evaluation.verdict, Verdict::Pass);
//! println!("{}", evaluation.summary());
//! ```
//!
//! ## Modules
//!
//! - [`profile`] - Position-indexed diagrams
//! - [`forces`] - Force kinds and the six-diagram force set
//! - [`member`] - Segments, restraints and the member
//! - [`sections`] - Section properties, geometry and the section library
//! - [`materials`] - Steel grades
//! - [`codes`] - Design code strategy trait and AS 4100
//! - [`results`] - Check results and verdicts
//! - [`orchestrator`] - Runs a design code over a member
//! - [`config`] - Evaluation options
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod codes;
pub mod config;
pub mod errors;
pub mod forces;
pub mod materials;
pub mod member;
pub mod orchestrator;
pub mod profile;
pub mod results;
pub mod sections;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use codes::{DesignCode, TieBreak};
pub use config::CheckConfig;
pub use errors::{DesignError, DesignResult};
pub use forces::{ForceKind, ForceSet, LoadCaseId};
pub use member::{Member, MemberBuilder, Segment};
pub use orchestrator::{check, evaluate, evaluate_all};
pub use profile::Profile;
pub use results::{CheckResult, Evaluation, Verdict};
pub use sections::{SectionLibrary, SectionProperties, SectionProvider};

//! # Internal Forces
//!
//! The six internal actions of a member segment, each held as a
//! [`Profile`] over the segment's normalised length.
//!
//! ## Sign Conventions
//!
//! - **Axial**: positive = tension, negative = compression
//! - **Moments/shears**: sign is carried through but capacities are symmetric,
//!   so checks compare magnitudes
//!
//! ## Axes
//!
//! "Major" is the section x-axis (strong-axis bending, shear parallel to the
//! web), "minor" the section y-axis.

use serde::{Deserialize, Serialize};

use crate::errors::DesignResult;
use crate::profile::{Breakpoint, Interpolation, Profile};

/// The kind of internal action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceKind {
    /// Axial force N (tension positive)
    Axial,
    /// Shear acting with major-axis bending (Vy)
    ShearMajor,
    /// Shear acting with minor-axis bending (Vx)
    ShearMinor,
    /// Bending moment about the major axis (Mx)
    MomentMajor,
    /// Bending moment about the minor axis (My)
    MomentMinor,
    /// Torsion T
    Torsion,
}

impl ForceKind {
    pub const ALL: [ForceKind; 6] = [
        ForceKind::Axial,
        ForceKind::ShearMajor,
        ForceKind::ShearMinor,
        ForceKind::MomentMajor,
        ForceKind::MomentMinor,
        ForceKind::Torsion,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ForceKind::Axial => "Axial",
            ForceKind::ShearMajor => "Shear (major)",
            ForceKind::ShearMinor => "Shear (minor)",
            ForceKind::MomentMajor => "Moment (major)",
            ForceKind::MomentMinor => "Moment (minor)",
            ForceKind::Torsion => "Torsion",
        }
    }

    /// Design action symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            ForceKind::Axial => "N*",
            ForceKind::ShearMajor => "Vy*",
            ForceKind::ShearMinor => "Vx*",
            ForceKind::MomentMajor => "Mx*",
            ForceKind::MomentMinor => "My*",
            ForceKind::Torsion => "T*",
        }
    }

    pub fn is_moment(&self) -> bool {
        matches!(self, ForceKind::MomentMajor | ForceKind::MomentMinor)
    }

    pub fn is_shear(&self) -> bool {
        matches!(self, ForceKind::ShearMajor | ForceKind::ShearMinor)
    }
}

impl std::fmt::Display for ForceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sign of an action at a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    Positive,
    Negative,
}

/// A force kind together with its sense, i.e. what a capacity is computed for.
///
/// Axial capacity depends on the sense (tension vs compression); the other
/// kinds carry it for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ForceKind,
    pub sense: Sense,
}

impl Action {
    pub fn new(kind: ForceKind, sense: Sense) -> Self {
        Self { kind, sense }
    }

    /// Action for a demand value; zero counts as positive.
    pub fn of(kind: ForceKind, value: f64) -> Self {
        let sense = if value < 0.0 {
            Sense::Negative
        } else {
            Sense::Positive
        };
        Self { kind, sense }
    }

    pub fn tension() -> Self {
        Self::new(ForceKind::Axial, Sense::Positive)
    }

    pub fn compression() -> Self {
        Self::new(ForceKind::Axial, Sense::Negative)
    }

    pub fn is_tension(&self) -> bool {
        self.kind == ForceKind::Axial && self.sense == Sense::Positive
    }

    pub fn is_compression(&self) -> bool {
        self.kind == ForceKind::Axial && self.sense == Sense::Negative
    }
}

/// Identifier of a load case
pub type LoadCaseId = u32;

/// Case that forces given without a case id belong to
pub const DEFAULT_LOAD_CASE: LoadCaseId = 0;

/// Internal force diagrams of one segment.
///
/// Components that are not given default to a zero profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceSet {
    pub axial: Profile,
    pub shear_major: Profile,
    pub shear_minor: Profile,
    pub moment_major: Profile,
    pub moment_minor: Profile,
    pub torsion: Profile,
}

impl ForceSet {
    /// All components zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Constant diagrams for the listed kinds, zero elsewhere
    pub fn constant(values: &[(ForceKind, f64)]) -> Self {
        values
            .iter()
            .fold(Self::default(), |set, &(kind, value)| {
                set.with(kind, Profile::constant(value))
            })
    }

    /// Replace one component
    pub fn with(mut self, kind: ForceKind, profile: Profile) -> Self {
        *self.get_mut(kind) = profile;
        self
    }

    pub fn get(&self, kind: ForceKind) -> &Profile {
        match kind {
            ForceKind::Axial => &self.axial,
            ForceKind::ShearMajor => &self.shear_major,
            ForceKind::ShearMinor => &self.shear_minor,
            ForceKind::MomentMajor => &self.moment_major,
            ForceKind::MomentMinor => &self.moment_minor,
            ForceKind::Torsion => &self.torsion,
        }
    }

    fn get_mut(&mut self, kind: ForceKind) -> &mut Profile {
        match kind {
            ForceKind::Axial => &mut self.axial,
            ForceKind::ShearMajor => &mut self.shear_major,
            ForceKind::ShearMinor => &mut self.shear_minor,
            ForceKind::MomentMajor => &mut self.moment_major,
            ForceKind::MomentMinor => &mut self.moment_minor,
            ForceKind::Torsion => &mut self.torsion,
        }
    }

    /// Value of one component at a normalised position
    pub fn value_at(&self, kind: ForceKind, position: f64) -> DesignResult<f64> {
        self.get(kind).value_at(position)
    }

    /// Build from a force table with rows `[position, vx, vy, n, mx, my, t]`.
    ///
    /// Positions are normalised (0.0 to 1.0) and ascending. `vy` pairs with
    /// major-axis bending `mx`, `vx` with minor-axis bending `my`.
    ///
    /// ```rust
    /// use check_core::forces::{ForceKind, ForceSet};
    /// use check_core::profile::Interpolation;
    ///
    /// let rows = [
    ///     [0.0, 0.0, 50.0e3, -100.0e3, 0.0, 0.0, 0.0],
    ///     [0.5, 0.0, 0.0, -100.0e3, 25.0e3, 0.0, 0.0],
    ///     [1.0, 0.0, -50.0e3, -100.0e3, 0.0, 0.0, 0.0],
    /// ];
    /// let forces = ForceSet::from_rows(&rows, Interpolation::Linear).unwrap();
    /// assert_eq!(forces.value_at(ForceKind::MomentMajor, 0.5).unwrap(), 25.0e3);
    /// assert_eq!(forces.value_at(ForceKind::Axial, 0.2).unwrap(), -100.0e3);
    /// ```
    pub fn from_rows(rows: &[[f64; 7]], interpolation: Interpolation) -> DesignResult<Self> {
        const COLUMNS: [(usize, ForceKind); 6] = [
            (1, ForceKind::ShearMinor),
            (2, ForceKind::ShearMajor),
            (3, ForceKind::Axial),
            (4, ForceKind::MomentMajor),
            (5, ForceKind::MomentMinor),
            (6, ForceKind::Torsion),
        ];

        let mut set = Self::default();
        for (column, kind) in COLUMNS {
            let breakpoints = rows
                .iter()
                .map(|row| Breakpoint::new(row[0], row[column]))
                .collect();
            set = set.with(kind, Profile::new(breakpoints, interpolation)?);
        }
        Ok(set)
    }

    /// Every component multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        ForceKind::ALL.iter().fold(Self::default(), |set, &kind| {
            set.with(kind, self.get(kind).scaled(factor))
        })
    }

    /// Union of the breakpoint positions of the given kinds, sorted
    pub fn breakpoint_positions(&self, kinds: &[ForceKind]) -> Vec<f64> {
        let mut positions: Vec<f64> = kinds
            .iter()
            .flat_map(|&kind| self.get(kind).positions())
            .collect();
        positions.sort_by(f64::total_cmp);
        positions.dedup();
        positions
    }
}

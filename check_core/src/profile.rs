//! # Position-Indexed Profiles
//!
//! A [`Profile`] is a piecewise diagram over the normalised domain [0, 1]:
//! an ordered list of breakpoints plus an interpolation rule. Internal force
//! and moment diagrams of a segment are stored this way so they can be queried
//! exactly at arbitrary positions and scanned for their critical points
//! without sampling.
//!
//! ## Interpolation
//!
//! - [`Interpolation::Linear`]: straight lines between breakpoints (shear under
//!   distributed load, moment under point loads).
//! - [`Interpolation::Step`]: the value of the last breakpoint at or before the
//!   query position holds until the next breakpoint (shear under point loads).
//!
//! Neither rule can overshoot its neighbouring breakpoint values, so every
//! maximum and minimum of a profile sits on a breakpoint.
//!
//! ## Example
//!
//! ```rust
//! use check_core::profile::{Interpolation, Profile};
//!
//! // Moment diagram of a simply supported beam with a central point load
//! let moment = Profile::linear(&[(0.0, 0.0), (0.5, 25.0e3), (1.0, 0.0)]).unwrap();
//!
//! assert_eq!(moment.value_at(0.5).unwrap(), 25.0e3);
//! assert_eq!(moment.value_at(0.25).unwrap(), 12.5e3);
//! assert_eq!(moment.max(), (0.5, 25.0e3));
//! assert!(moment.value_at(1.5).is_err());
//! assert_eq!(moment.interpolation(), Interpolation::Linear);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Lower bound of the profile domain
pub const DOMAIN_START: f64 = 0.0;

/// Upper bound of the profile domain
pub const DOMAIN_END: f64 = 1.0;

/// How values are obtained between breakpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Straight line between neighbouring breakpoints
    #[default]
    Linear,
    /// Piecewise constant, held from each breakpoint to the next
    Step,
}

/// A single (position, value) pair of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub position: f64,
    pub value: f64,
}

impl Breakpoint {
    pub fn new(position: f64, value: f64) -> Self {
        Self { position, value }
    }
}

/// Serialized form of a profile, validated on the way in
#[derive(Debug, Clone, Deserialize)]
struct ProfileData {
    breakpoints: Vec<Breakpoint>,
    #[serde(default)]
    interpolation: Interpolation,
}

impl TryFrom<ProfileData> for Profile {
    type Error = DesignError;

    fn try_from(data: ProfileData) -> Result<Self, Self::Error> {
        Profile::new(data.breakpoints, data.interpolation)
    }
}

/// Piecewise diagram over the normalised domain [0, 1].
///
/// Invariants (checked by [`Profile::new`]):
/// - at least two breakpoints, all finite
/// - positions strictly increasing, first at 0.0 and last at 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileData")]
pub struct Profile {
    breakpoints: Vec<Breakpoint>,
    interpolation: Interpolation,
}

impl Default for Profile {
    fn default() -> Self {
        Self::zero()
    }
}

impl Profile {
    /// Build a profile from breakpoints, validating the domain invariants.
    pub fn new(breakpoints: Vec<Breakpoint>, interpolation: Interpolation) -> DesignResult<Self> {
        if breakpoints.len() < 2 {
            return Err(DesignError::invalid_input(
                "breakpoints",
                breakpoints.len().to_string(),
                "a profile needs at least two breakpoints (at 0.0 and 1.0)",
            ));
        }

        for bp in &breakpoints {
            if !bp.position.is_finite() || !bp.value.is_finite() {
                return Err(DesignError::invalid_input(
                    "breakpoints",
                    format!("({}, {})", bp.position, bp.value),
                    "positions and values must be finite",
                ));
            }
            if bp.position < DOMAIN_START || bp.position > DOMAIN_END {
                return Err(DesignError::domain(
                    "profile breakpoints",
                    bp.position,
                    DOMAIN_START,
                    DOMAIN_END,
                ));
            }
        }

        for pair in breakpoints.windows(2) {
            if pair[1].position <= pair[0].position {
                return Err(DesignError::invalid_input(
                    "breakpoints",
                    format!("{} then {}", pair[0].position, pair[1].position),
                    "positions must be strictly increasing",
                ));
            }
        }

        let first = breakpoints[0].position;
        let last = breakpoints[breakpoints.len() - 1].position;
        if first != DOMAIN_START || last != DOMAIN_END {
            return Err(DesignError::invalid_input(
                "breakpoints",
                format!("[{first}, {last}]"),
                "breakpoints must span the whole domain [0, 1]",
            ));
        }

        Ok(Self {
            breakpoints,
            interpolation,
        })
    }

    /// Linear profile from `(position, value)` pairs
    pub fn linear(points: &[(f64, f64)]) -> DesignResult<Self> {
        Self::from_pairs(points, Interpolation::Linear)
    }

    /// Step profile from `(position, value)` pairs
    pub fn step(points: &[(f64, f64)]) -> DesignResult<Self> {
        Self::from_pairs(points, Interpolation::Step)
    }

    fn from_pairs(points: &[(f64, f64)], interpolation: Interpolation) -> DesignResult<Self> {
        let breakpoints = points
            .iter()
            .map(|&(position, value)| Breakpoint::new(position, value))
            .collect();
        Self::new(breakpoints, interpolation)
    }

    /// Constant value over the whole domain
    pub fn constant(value: f64) -> Self {
        Self {
            breakpoints: vec![
                Breakpoint::new(DOMAIN_START, value),
                Breakpoint::new(DOMAIN_END, value),
            ],
            interpolation: Interpolation::Linear,
        }
    }

    /// Identically zero profile
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// Sample `f` at `intervals + 1` evenly spaced positions and join the
    /// samples linearly.
    ///
    /// Useful for closed-form diagrams, e.g. `w·L²/2·x(1-x)` for a uniformly
    /// loaded span. The profile is exact at the sample positions only.
    pub fn sampled(intervals: usize, f: impl Fn(f64) -> f64) -> DesignResult<Self> {
        if intervals == 0 {
            return Err(DesignError::invalid_input(
                "intervals",
                "0",
                "at least one interval is required",
            ));
        }
        let breakpoints = (0..=intervals)
            .map(|i| {
                let x = if i == intervals {
                    DOMAIN_END
                } else {
                    i as f64 / intervals as f64
                };
                Breakpoint::new(x, f(x))
            })
            .collect();
        Self::new(breakpoints, Interpolation::Linear)
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Breakpoint positions in increasing order
    pub fn positions(&self) -> Vec<f64> {
        self.breakpoints.iter().map(|bp| bp.position).collect()
    }

    /// True when every breakpoint value is zero
    pub fn is_zero(&self) -> bool {
        self.breakpoints.iter().all(|bp| bp.value == 0.0)
    }

    /// Value at a normalised position.
    ///
    /// Exact at breakpoints. Fails with a domain error for positions outside
    /// [0, 1] or NaN.
    pub fn value_at(&self, position: f64) -> DesignResult<f64> {
        if !(DOMAIN_START..=DOMAIN_END).contains(&position) {
            return Err(DesignError::domain(
                "profile",
                position,
                DOMAIN_START,
                DOMAIN_END,
            ));
        }

        // Number of breakpoints at or before `position`; at least 1 since the
        // first breakpoint sits on 0.0.
        let idx = self.breakpoints.partition_point(|bp| bp.position <= position);
        let left = self.breakpoints[idx - 1];
        if left.position == position || idx == self.breakpoints.len() {
            return Ok(left.value);
        }

        match self.interpolation {
            Interpolation::Step => Ok(left.value),
            Interpolation::Linear => {
                let right = self.breakpoints[idx];
                let t = (position - left.position) / (right.position - left.position);
                Ok(left.value + t * (right.value - left.value))
            }
        }
    }

    /// Local maxima and minima plus both domain endpoints, sorted by position.
    ///
    /// A plateau that forms an extremum is reported once, at the first
    /// breakpoint that reaches it.
    pub fn extrema(&self) -> Vec<(f64, f64)> {
        let bps = &self.breakpoints;
        let last_idx = bps.len() - 1;
        let mut indices = vec![0];

        let mut last_direction = 0.0_f64;
        let mut run_start = 0;
        for i in 1..bps.len() {
            let delta = bps[i].value - bps[i - 1].value;
            if delta == 0.0 {
                continue;
            }
            let direction = delta.signum();
            if last_direction != 0.0 && direction != last_direction && run_start != 0 {
                indices.push(run_start);
            }
            last_direction = direction;
            run_start = i;
        }

        // Trailing plateau reached from below or above
        if run_start != 0 && run_start != last_idx {
            indices.push(run_start);
        }
        indices.push(last_idx);
        indices.dedup();

        indices
            .into_iter()
            .map(|i| (bps[i].position, bps[i].value))
            .collect()
    }

    /// Largest value and where it first occurs
    pub fn max(&self) -> (f64, f64) {
        self.pick(|candidate, best| candidate > best)
    }

    /// Smallest value and where it first occurs
    pub fn min(&self) -> (f64, f64) {
        self.pick(|candidate, best| candidate < best)
    }

    /// Largest absolute value (signed) and where it first occurs
    pub fn max_abs(&self) -> (f64, f64) {
        self.pick(|candidate, best| candidate.abs() > best.abs())
    }

    fn pick(&self, better: impl Fn(f64, f64) -> bool) -> (f64, f64) {
        let extrema = self.extrema();
        let mut best = extrema[0];
        for &candidate in &extrema[1..] {
            if better(candidate.1, best.1) {
                best = candidate;
            }
        }
        best
    }

    /// Positions where the diagram changes sign.
    ///
    /// Linear profiles report the interpolated root between two breakpoints of
    /// opposite sign; when the diagram rests on zero before changing sign, the
    /// first zero breakpoint is reported. Step profiles report the breakpoint
    /// where the level stops having the old sign.
    pub fn sign_changes(&self) -> Vec<f64> {
        let bps = &self.breakpoints;
        let mut changes = Vec::new();
        let mut last_nonzero: Option<usize> = None;

        for (i, bp) in bps.iter().enumerate() {
            if bp.value == 0.0 {
                continue;
            }
            if let Some(prev) = last_nonzero {
                if bps[prev].value.signum() != bp.value.signum() {
                    let adjacent = prev + 1 == i;
                    let position = match self.interpolation {
                        Interpolation::Linear if adjacent => {
                            let a = bps[prev];
                            a.position - a.value * (bp.position - a.position) / (bp.value - a.value)
                        }
                        _ => bps[prev + 1].position,
                    };
                    changes.push(position);
                }
            }
            last_nonzero = Some(i);
        }

        changes
    }

    /// Copy of this profile with every value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            breakpoints: self
                .breakpoints
                .iter()
                .map(|bp| Breakpoint::new(bp.position, bp.value * factor))
                .collect(),
            interpolation: self.interpolation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Profile {
        Profile::linear(&[(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)]).unwrap()
    }

    #[test]
    fn test_value_at_breakpoints_is_exact() {
        let p = Profile::linear(&[(0.0, 1.1), (0.3, -7.3), (0.7, 2.9), (1.0, 0.1)]).unwrap();
        for bp in p.breakpoints() {
            assert_eq!(p.value_at(bp.position).unwrap(), bp.value);
        }
    }

    #[test]
    fn test_linear_interpolation() {
        let p = triangle();
        assert_relative_eq!(p.value_at(0.25).unwrap(), 5.0);
        assert_relative_eq!(p.value_at(0.75).unwrap(), 5.0);
    }

    #[test]
    fn test_step_interpolation() {
        let p = Profile::step(&[(0.0, 5.0), (0.5, -5.0), (1.0, -5.0)]).unwrap();
        assert_eq!(p.value_at(0.0).unwrap(), 5.0);
        assert_eq!(p.value_at(0.49).unwrap(), 5.0);
        assert_eq!(p.value_at(0.5).unwrap(), -5.0);
        assert_eq!(p.value_at(1.0).unwrap(), -5.0);
    }

    #[test]
    fn test_step_rejects_repeated_position() {
        let err = Profile::step(&[(0.0, 5.0), (0.5, 5.0), (0.5, -5.0), (1.0, -5.0)]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_outside_domain_is_domain_error() {
        let p = triangle();
        for x in [1.5, -0.1, f64::NAN] {
            let err = p.value_at(x).unwrap_err();
            assert_eq!(err.error_code(), "DOMAIN_ERROR");
        }
    }

    #[test]
    fn test_invalid_breakpoints() {
        assert!(Profile::linear(&[(0.0, 1.0)]).is_err());
        assert!(Profile::linear(&[(0.0, 1.0), (0.6, 1.0), (0.4, 1.0), (1.0, 1.0)]).is_err());
        assert!(Profile::linear(&[(0.1, 1.0), (1.0, 1.0)]).is_err());
        assert!(Profile::linear(&[(0.0, f64::NAN), (1.0, 1.0)]).is_err());

        let err = Profile::linear(&[(0.0, 1.0), (1.2, 1.0)]).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_extrema_include_endpoints_and_peak() {
        let extrema = triangle().extrema();
        assert_eq!(extrema, vec![(0.0, 0.0), (0.5, 10.0), (1.0, 0.0)]);
    }

    #[test]
    fn test_extrema_plateau_reported_once() {
        let p = Profile::linear(&[(0.0, 0.0), (0.25, 4.0), (0.5, 4.0), (0.75, 4.0), (1.0, 0.0)])
            .unwrap();
        assert_eq!(p.extrema(), vec![(0.0, 0.0), (0.25, 4.0), (1.0, 0.0)]);
    }

    #[test]
    fn test_extrema_trailing_plateau() {
        let p = Profile::linear(&[(0.0, 0.0), (0.5, 6.0), (1.0, 6.0)]).unwrap();
        assert_eq!(p.extrema(), vec![(0.0, 0.0), (0.5, 6.0), (1.0, 6.0)]);
        assert_eq!(p.max(), (0.5, 6.0));
    }

    #[test]
    fn test_extrema_bound_every_interval() {
        let p = Profile::linear(&[
            (0.0, 2.0),
            (0.2, -3.0),
            (0.4, -1.0),
            (0.6, 5.0),
            (0.8, 5.0),
            (1.0, -2.0),
        ])
        .unwrap();
        let extrema = p.extrema();
        for pair in extrema.windows(2) {
            let (lo, hi) = (pair[0].1.min(pair[1].1), pair[0].1.max(pair[1].1));
            for i in 0..=100 {
                let x = pair[0].0 + (pair[1].0 - pair[0].0) * i as f64 / 100.0;
                let v = p.value_at(x).unwrap();
                assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
            }
        }
    }

    #[test]
    fn test_max_min_max_abs() {
        let p = Profile::linear(&[(0.0, 3.0), (0.4, -8.0), (1.0, 5.0)]).unwrap();
        assert_eq!(p.max(), (1.0, 5.0));
        assert_eq!(p.min(), (0.4, -8.0));
        assert_eq!(p.max_abs(), (0.4, -8.0));
    }

    #[test]
    fn test_sign_changes_linear() {
        let p = Profile::linear(&[(0.0, 10.0), (1.0, -10.0)]).unwrap();
        let changes = p.sign_changes();
        assert_eq!(changes.len(), 1);
        assert_relative_eq!(changes[0], 0.5);
    }

    #[test]
    fn test_sign_changes_through_zero_breakpoint() {
        let p = Profile::linear(&[(0.0, -1.0), (0.3, 0.0), (0.6, 0.0), (1.0, 2.0)]).unwrap();
        assert_eq!(p.sign_changes(), vec![0.3]);
    }

    #[test]
    fn test_sign_changes_step() {
        let p = Profile::step(&[(0.0, 5.0), (0.4, -5.0), (1.0, -5.0)]).unwrap();
        assert_eq!(p.sign_changes(), vec![0.4]);
        assert!(Profile::constant(3.0).sign_changes().is_empty());
    }

    #[test]
    fn test_sampled_hits_midspan() {
        let p = Profile::sampled(20, |x| 0.5 * x * (1.0 - x)).unwrap();
        assert_eq!(p.breakpoints().len(), 21);
        assert_eq!(p.max(), (0.5, 0.125));
    }

    #[test]
    fn test_scaled() {
        let p = triangle().scaled(-2.0);
        assert_eq!(p.min(), (0.5, -20.0));
        assert!(Profile::zero().is_zero());
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"{"breakpoints":[{"position":0.0,"value":1.0},{"position":1.0,"value":2.0}],"interpolation":"step"}"#;
        let p: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(p.interpolation(), Interpolation::Step);

        let bad = r#"{"breakpoints":[{"position":0.0,"value":1.0},{"position":0.5,"value":2.0}]}"#;
        assert!(serde_json::from_str::<Profile>(bad).is_err());
    }
}

//! Restraint metadata of a member segment.
//!
//! Captures what a design code needs to turn a segment into effective lengths:
//! the segment (restraint) length, effective-length factors for flexural
//! buckling about each axis, and the lateral restraint condition used for
//! lateral-torsional buckling.

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// Principal axis of a cross-section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Section x-axis (strong axis)
    Major,
    /// Section y-axis (weak axis)
    Minor,
}

impl Axis {
    pub fn display_name(&self) -> &'static str {
        match self {
            Axis::Major => "major",
            Axis::Minor => "minor",
        }
    }
}

/// Flexural buckling restraint about one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRestraint {
    /// Member effective length factor ke (1.0 for pinned-pinned)
    pub effective_length_factor: f64,
}

impl Default for AxisRestraint {
    fn default() -> Self {
        Self {
            effective_length_factor: 1.0,
        }
    }
}

/// Restraint condition at the two ends of a segment for lateral-torsional
/// buckling.
///
/// F = fully restrained, P = partially restrained, L = laterally restrained
/// (rotation only), U = unrestrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestraintCode {
    #[serde(rename = "FF")]
    Ff,
    #[serde(rename = "FP")]
    Fp,
    #[serde(rename = "FL")]
    Fl,
    #[serde(rename = "FU")]
    Fu,
    #[serde(rename = "PP")]
    Pp,
    #[serde(rename = "PL")]
    Pl,
    #[serde(rename = "PU")]
    Pu,
    #[serde(rename = "LL")]
    Ll,
}

impl RestraintCode {
    pub const ALL: [RestraintCode; 8] = [
        RestraintCode::Ff,
        RestraintCode::Fp,
        RestraintCode::Fl,
        RestraintCode::Fu,
        RestraintCode::Pp,
        RestraintCode::Pl,
        RestraintCode::Pu,
        RestraintCode::Ll,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RestraintCode::Ff => "FF",
            RestraintCode::Fp => "FP",
            RestraintCode::Fl => "FL",
            RestraintCode::Fu => "FU",
            RestraintCode::Pp => "PP",
            RestraintCode::Pl => "PL",
            RestraintCode::Pu => "PU",
            RestraintCode::Ll => "LL",
        }
    }

    /// One end of the segment is free (cantilever-like)
    pub fn has_unrestrained_end(&self) -> bool {
        matches!(self, RestraintCode::Fu | RestraintCode::Pu)
    }

    /// Number of partially restrained ends
    pub fn partial_ends(&self) -> u8 {
        match self {
            RestraintCode::Pp => 2,
            RestraintCode::Fp | RestraintCode::Pl | RestraintCode::Pu => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for RestraintCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lateral-torsional restraint of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LateralRestraint {
    /// Continuous lateral restraint; lateral buckling cannot occur
    #[default]
    Full,
    /// Segment between lateral restraints
    Segment {
        /// End restraint condition
        code: RestraintCode,
        /// Load height factor kl
        #[serde(default = "unit_factor")]
        k_l: f64,
        /// Lateral rotation restraint factor kr
        #[serde(default = "unit_factor")]
        k_r: f64,
        /// Moment modification factor; derived from the moment diagram when absent
        #[serde(default)]
        alpha_m: Option<f64>,
    },
}

fn unit_factor() -> f64 {
    1.0
}

impl LateralRestraint {
    /// Segment restrained at both ends with default factors
    pub fn segment(code: RestraintCode) -> Self {
        LateralRestraint::Segment {
            code,
            k_l: 1.0,
            k_r: 1.0,
            alpha_m: None,
        }
    }
}

/// Restraint metadata of one segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Restraint {
    /// Segment length (m)
    pub length: f64,
    #[serde(default)]
    pub major: AxisRestraint,
    #[serde(default)]
    pub minor: AxisRestraint,
    #[serde(default)]
    pub lateral: LateralRestraint,
}

impl Restraint {
    /// Pinned about both axes, fully laterally restrained
    pub fn new(length: f64) -> Self {
        Self {
            length,
            major: AxisRestraint::default(),
            minor: AxisRestraint::default(),
            lateral: LateralRestraint::Full,
        }
    }

    pub fn with_effective_length_factor(mut self, axis: Axis, factor: f64) -> Self {
        match axis {
            Axis::Major => self.major.effective_length_factor = factor,
            Axis::Minor => self.minor.effective_length_factor = factor,
        }
        self
    }

    pub fn with_lateral(mut self, lateral: LateralRestraint) -> Self {
        self.lateral = lateral;
        self
    }

    pub fn axis(&self, axis: Axis) -> &AxisRestraint {
        match axis {
            Axis::Major => &self.major,
            Axis::Minor => &self.minor,
        }
    }

    /// Flexural buckling effective length ke·l (m)
    pub fn effective_length(&self, axis: Axis) -> f64 {
        self.axis(axis).effective_length_factor * self.length
    }

    pub fn validate(&self) -> DesignResult<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(DesignError::geometry(format!(
                "segment length must be positive, got {}",
                self.length
            )));
        }
        for axis in [Axis::Major, Axis::Minor] {
            let ke = self.axis(axis).effective_length_factor;
            if !(ke.is_finite() && ke > 0.0) {
                return Err(DesignError::invalid_input(
                    format!("{}.effective_length_factor", axis.display_name()),
                    ke.to_string(),
                    "must be positive",
                ));
            }
        }
        if let LateralRestraint::Segment { k_l, k_r, alpha_m, .. } = self.lateral {
            if !(k_l.is_finite() && k_l > 0.0) || !(k_r.is_finite() && k_r > 0.0) {
                return Err(DesignError::invalid_input(
                    "lateral",
                    format!("k_l={k_l}, k_r={k_r}"),
                    "factors must be positive",
                ));
            }
            if let Some(am) = alpha_m {
                if !(am.is_finite() && am > 0.0) {
                    return Err(DesignError::invalid_input(
                        "lateral.alpha_m",
                        am.to_string(),
                        "must be positive",
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_length() {
        let r = Restraint::new(4.0).with_effective_length_factor(Axis::Minor, 0.7);
        assert_eq!(r.effective_length(Axis::Major), 4.0);
        assert!((r.effective_length(Axis::Minor) - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_restraint_codes() {
        assert!(RestraintCode::Fu.has_unrestrained_end());
        assert!(!RestraintCode::Ff.has_unrestrained_end());
        assert_eq!(RestraintCode::Pp.partial_ends(), 2);
        assert_eq!(RestraintCode::Fp.partial_ends(), 1);
        assert_eq!(RestraintCode::Ll.to_string(), "LL");
    }

    #[test]
    fn test_validate() {
        assert!(Restraint::new(3.0).validate().is_ok());
        assert!(Restraint::new(0.0).validate().is_err());
        assert!(Restraint::new(3.0)
            .with_effective_length_factor(Axis::Major, -1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_lateral_serde() {
        let json = r#"{"type":"segment","code":"FP","alpha_m":1.13}"#;
        let lateral: LateralRestraint = serde_json::from_str(json).unwrap();
        assert_eq!(
            lateral,
            LateralRestraint::Segment {
                code: RestraintCode::Fp,
                k_l: 1.0,
                k_r: 1.0,
                alpha_m: Some(1.13)
            }
        );
    }
}

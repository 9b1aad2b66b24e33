//! # Check Configuration
//!
//! Options of an evaluation run, loadable from TOML or JSON. Every field has a
//! default, so an empty document is a valid configuration.
//!
//! ```toml
//! design_code = "as4100"
//! tolerance = 1e-6
//! force_kinds = ["axial", "moment_major", "shear_major"]
//! interaction = true
//! assessment_points = 9
//! tie_break = "first_listed"
//!
//! [as4100]
//! phi = 0.9
//! alpha_u = 0.85
//! k_t = 1.0
//! ```

use serde::{Deserialize, Serialize};

use crate::codes::as4100::{As4100, As4100Params};
use crate::codes::{DesignCode, DesignCodeId, TieBreak};
use crate::errors::{DesignError, DesignResult};
use crate::forces::ForceKind;

/// Upper bound on evenly spaced assessment points per member
pub const MAX_ASSESSMENT_POINTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub design_code: DesignCodeId,
    /// Ratios up to 1 + tolerance pass
    pub tolerance: f64,
    /// Force kinds given a single-action check
    pub force_kinds: Vec<ForceKind>,
    /// Evaluate combined-action checks
    pub interaction: bool,
    /// Evenly spaced interior positions added to the critical positions
    pub assessment_points: usize,
    pub tie_break: TieBreak,
    pub as4100: As4100Params,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            design_code: DesignCodeId::default(),
            tolerance: 1e-6,
            force_kinds: ForceKind::ALL
                .into_iter()
                .filter(|k| *k != ForceKind::Torsion)
                .collect(),
            interaction: true,
            assessment_points: 0,
            tie_break: TieBreak::default(),
            as4100: As4100Params::default(),
        }
    }
}

impl CheckConfig {
    pub fn from_toml_str(s: &str) -> DesignResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| DesignError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> DesignResult<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| DesignError::config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DesignResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(DesignError::config(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if self.force_kinds.is_empty() && !self.interaction {
            return Err(DesignError::config("nothing to check: no force kinds and interaction disabled"));
        }
        for (i, kind) in self.force_kinds.iter().enumerate() {
            if self.force_kinds[..i].contains(kind) {
                return Err(DesignError::config(format!("force kind '{}' listed twice", kind.display_name())));
            }
        }
        if self.assessment_points > MAX_ASSESSMENT_POINTS {
            return Err(DesignError::config(format!(
                "assessment_points must be at most {MAX_ASSESSMENT_POINTS}, got {}",
                self.assessment_points
            )));
        }
        match self.design_code {
            DesignCodeId::As4100 => self.as4100.validate(),
        }
    }

    /// Strategy for the selected design code
    pub fn design_code(&self) -> Box<dyn DesignCode> {
        match self.design_code {
            DesignCodeId::As4100 => Box::new(As4100::new(self.as4100, self.tie_break)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.force_kinds.len(), 5);
        assert!(!config.force_kinds.contains(&ForceKind::Torsion));
        assert!(config.interaction);
        assert_eq!(config.tie_break, TieBreak::FirstListed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_documents_use_defaults() {
        assert_eq!(CheckConfig::from_toml_str("").unwrap(), CheckConfig::default());
        assert_eq!(CheckConfig::from_json_str("{}").unwrap(), CheckConfig::default());
    }

    #[test]
    fn test_toml_overrides() {
        let config = CheckConfig::from_toml_str(
            r#"
            tolerance = 0.01
            force_kinds = ["moment_major", "torsion"]
            tie_break = "last_listed"
            assessment_points = 9

            [as4100]
            phi = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.force_kinds, vec![ForceKind::MomentMajor, ForceKind::Torsion]);
        assert_eq!(config.tie_break, TieBreak::LastListed);
        assert_eq!(config.assessment_points, 9);
        assert_eq!(config.as4100.phi, 0.8);
        assert_eq!(config.as4100.alpha_u, 0.85);
        assert_eq!(config.design_code().name(), "AS4100");
    }

    #[test]
    fn test_invalid_configs() {
        for doc in [
            "tolerance = -1.0",
            "force_kinds = [\"axial\", \"axial\"]",
            "force_kinds = []\ninteraction = false",
            "design_code = \"eurocode\"",
            "[as4100]\nphi = 0.0",
        ] {
            let err = CheckConfig::from_toml_str(doc).unwrap_err();
            assert_eq!(err.error_code(), "CONFIG_ERROR", "{doc}");
        }
    }
}

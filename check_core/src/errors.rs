//! # Error Types
//!
//! Structured error types for check_core. Every variant carries enough
//! context to tell a caller (human or program) what went wrong and where.
//!
//! Errors fall in two groups:
//!
//! - **Construction-time** (`Geometry`, `PropertyLookup`, `InvalidInput`,
//!   `Config`): the member, section set or configuration is unusable and no
//!   evaluation may start.
//! - **Per-position** (`Domain`, `InapplicableRule`): a single check could not
//!   be completed. The orchestrator turns these into inconclusive check
//!   results instead of aborting the whole evaluation.
//!
//! ## Example
//!
//! ```rust
//! use check_core::errors::{DesignError, DesignResult};
//!
//! fn validate_length(length_m: f64) -> DesignResult<()> {
//!     if length_m <= 0.0 {
//!         return Err(DesignError::geometry(format!(
//!             "segment length must be positive, got {length_m}"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for check_core operations
pub type DesignResult<T> = Result<T, DesignError>;

/// Structured error type for design-check operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DesignError {
    /// A position query fell outside the valid domain of a profile or member
    #[error("Position {position} is outside the domain [{min}, {max}] of {context}")]
    Domain {
        context: String,
        position: f64,
        min: f64,
        max: f64,
    },

    /// Member/segment assembly invariants violated (gaps, overlaps, length mismatch)
    #[error("Invalid member geometry: {reason}")]
    Geometry { reason: String },

    /// A code clause's preconditions do not hold for this section/segment
    #[error("Clause {clause} is not applicable: {reason}")]
    InapplicableRule { clause: String, reason: String },

    /// Section properties missing for a referenced section id
    #[error("Section properties not found for '{section_id}'")]
    PropertyLookup { section_id: String },

    /// An input value is invalid (out of range, NaN, wrong ordering)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl DesignError {
    /// Create a Domain error
    pub fn domain(context: impl Into<String>, position: f64, min: f64, max: f64) -> Self {
        DesignError::Domain {
            context: context.into(),
            position,
            min,
            max,
        }
    }

    /// Create a Geometry error
    pub fn geometry(reason: impl Into<String>) -> Self {
        DesignError::Geometry {
            reason: reason.into(),
        }
    }

    /// Create an InapplicableRule error
    pub fn inapplicable(clause: impl Into<String>, reason: impl Into<String>) -> Self {
        DesignError::InapplicableRule {
            clause: clause.into(),
            reason: reason.into(),
        }
    }

    /// Create a PropertyLookup error
    pub fn property_lookup(section_id: impl Into<String>) -> Self {
        DesignError::PropertyLookup {
            section_id: section_id.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        DesignError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        DesignError::Config {
            reason: reason.into(),
        }
    }

    /// Errors that belong to a single check position.
    ///
    /// The orchestrator converts these into inconclusive results; every other
    /// variant aborts the evaluation.
    pub fn is_per_position(&self) -> bool {
        matches!(
            self,
            DesignError::Domain { .. } | DesignError::InapplicableRule { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DesignError::Domain { .. } => "DOMAIN_ERROR",
            DesignError::Geometry { .. } => "GEOMETRY_ERROR",
            DesignError::InapplicableRule { .. } => "INAPPLICABLE_RULE",
            DesignError::PropertyLookup { .. } => "PROPERTY_LOOKUP_ERROR",
            DesignError::InvalidInput { .. } => "INVALID_INPUT",
            DesignError::Config { .. } => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = DesignError::inapplicable("AS4100 5.6.1", "segment has an unrestrained end");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InapplicableRule"));
        let roundtrip: DesignError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(DesignError::geometry("gap").error_code(), "GEOMETRY_ERROR");
        assert_eq!(DesignError::property_lookup("310UB40.4").error_code(), "PROPERTY_LOOKUP_ERROR");
        assert_eq!(DesignError::domain("profile", 1.5, 0.0, 1.0).error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_per_position_classification() {
        assert!(DesignError::domain("profile", 1.5, 0.0, 1.0).is_per_position());
        assert!(DesignError::inapplicable("AS4100 5.10", "web too slender").is_per_position());
        assert!(!DesignError::geometry("overlap").is_per_position());
        assert!(!DesignError::property_lookup("missing").is_per_position());
    }

    #[test]
    fn test_display_messages() {
        let e = DesignError::domain("moment_major profile", 1.5, 0.0, 1.0);
        assert_eq!(
            e.to_string(),
            "Position 1.5 is outside the domain [0, 1] of moment_major profile"
        );
    }
}

//! Section Library
//!
//! In-memory table of [`SectionProperties`] keyed by section id, plus a small
//! built-in set of common Australian sections for demos and tests.
//!
//! Properties of the built-in sections are computed from nominal plate
//! dimensions (see [`geometry`](super::geometry)), not copied from
//! manufacturer tables.
//!
//! ## Example
//!
//! ```rust
//! use check_core::sections::{SectionLibrary, SectionProvider};
//!
//! let library = SectionLibrary::builtin();
//! let ub = library.lookup("310ub40.4").unwrap();
//! assert_eq!(ub.id, "310UB40.4");
//!
//! assert!(library.properties("999UB1").is_err());
//! assert!(!library.search("310").is_empty());
//! ```

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::materials::SteelGrade;
use crate::sections::{Fabrication, SectionProperties, SectionProvider, SectionShape};
use crate::units::mm;

/// Section properties keyed by upper-cased id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionLibrary {
    sections: HashMap<String, SectionProperties>,
    /// Free-form data version tag
    pub version: Option<String>,
}

static BUILTIN: Lazy<SectionLibrary> = Lazy::new(build_builtin);

impl SectionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared library of common sections
    pub fn builtin() -> &'static SectionLibrary {
        &BUILTIN
    }

    /// Insert (or replace) a section
    pub fn insert(&mut self, section: SectionProperties) {
        self.sections.insert(section.id.to_uppercase(), section);
    }

    /// Look up a section by id (case-insensitive)
    pub fn lookup(&self, id: &str) -> DesignResult<&SectionProperties> {
        self.sections
            .get(&id.to_uppercase())
            .ok_or_else(|| DesignError::property_lookup(id))
    }

    /// Sections whose id starts with `prefix` (case-insensitive), sorted by id
    pub fn search(&self, prefix: &str) -> Vec<&SectionProperties> {
        let prefix = prefix.to_uppercase();
        let mut found: Vec<&SectionProperties> = self
            .sections
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, section)| section)
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sections.values().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl SectionProvider for SectionLibrary {
    fn properties(&self, section_id: &str) -> DesignResult<&SectionProperties> {
        self.lookup(section_id)
    }
}

impl FromIterator<SectionProperties> for SectionLibrary {
    fn from_iter<T: IntoIterator<Item = SectionProperties>>(iter: T) -> Self {
        let mut library = Self::new();
        for section in iter {
            library.insert(section);
        }
        library
    }
}

// ============================================================================
// Built-in Common Sections
// ============================================================================

fn build_builtin() -> SectionLibrary {
    // (id, d, bf, tf, tw) in mm
    let i_sections = [
        ("410UB53.7", 403.0, 178.0, 10.9, 7.6),
        ("310UB40.4", 304.0, 165.0, 10.2, 6.1),
        ("250UB31.4", 252.0, 146.0, 8.6, 6.1),
        ("200UC52.2", 206.0, 204.0, 12.5, 8.0),
        ("150UC30.0", 158.0, 153.0, 9.4, 6.6),
    ];
    // (id, do, t) in mm
    let circular = [("168.3x7.1CHS", 168.3, 7.1), ("114.3x4.8CHS", 114.3, 4.8)];
    // (id, d, b, t) in mm
    let rectangular = [("100x100x5SHS", 100.0, 100.0, 5.0), ("150x50x3RHS", 150.0, 50.0, 3.0)];

    let mut candidates = Vec::new();
    for (id, d, bf, tf, tw) in i_sections {
        let shape = SectionShape::ISection {
            depth: mm(d),
            flange_width: mm(bf),
            flange_thickness: mm(tf),
            web_thickness: mm(tw),
        };
        candidates.push(SectionProperties::from_shape(id, shape, SteelGrade::Grade300, Fabrication::HotRolled));
    }
    for (id, d_o, t) in circular {
        let shape = SectionShape::Chs {
            outside_diameter: mm(d_o),
            thickness: mm(t),
        };
        candidates.push(SectionProperties::from_shape(id, shape, SteelGrade::C350L0, Fabrication::ColdFormed));
    }
    for (id, d, b, t) in rectangular {
        let shape = SectionShape::Rhs {
            depth: mm(d),
            width: mm(b),
            thickness: mm(t),
        };
        candidates.push(SectionProperties::from_shape(id, shape, SteelGrade::C450L0, Fabrication::ColdFormed));
    }

    let mut library = SectionLibrary::new();
    for candidate in candidates {
        match candidate {
            Ok(section) => library.insert(section),
            Err(e) => tracing::warn!(error = %e, "skipping built-in section"),
        }
    }
    library.version = Some("builtin-common".to_string());
    library
}

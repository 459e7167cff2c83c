//! Validation functionality
//!
//! Provides validation logic for:
//! - Document structure (required version, database, collections, field types)
//! - References between schema elements (opt-in, warnings only)

pub mod diagnostics;
pub mod references;
pub mod structure;

pub use diagnostics::{Diagnostic, Severity, ValidationResult};
pub use references::ReferenceValidator;
pub use structure::{StructureValidator, validate_noml};

use serde::{Deserialize, Serialize};

/// Options controlling which validation passes run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Cross-check enum names, reference targets, keys and indexes.
    /// Findings are reported as warnings.
    pub check_references: bool,
}

impl ValidationOptions {
    /// Create options with every optional pass disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reference checks
    pub fn check_references(mut self, enabled: bool) -> Self {
        self.check_references = enabled;
        self
    }
}

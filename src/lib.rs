//! NOML SDK - Parser and validator for NOML schema documents
//!
//! NOML describes NoSQL (Firestore) database structures in YAML. Provides:
//! - Parsing of NOML text into a shareable document tree
//! - Structural validation with path-addressed errors and warnings
//! - A typed schema model for rendering and code generation
//! - Optional reference checks between schema elements

pub mod cli;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use import::{
    ImportError, NomlDocument, NomlImporter, ParseOutcome, ParseReport, parse_and_validate,
};
pub use validation::{
    Diagnostic, ReferenceValidator, Severity, StructureValidator, ValidationOptions,
    ValidationResult, validate_noml,
};

// Re-export models
pub use models::{CollectionDef, EnumDef, FieldDef, FieldKind, FirestoreType, NomlSchema};

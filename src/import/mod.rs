//! Import functionality
//!
//! Parses NOML YAML text into a document and runs validation over it.

pub mod noml;

pub use noml::{NomlDocument, NomlImporter, ParseOutcome, ParseReport, parse_and_validate};

/// Error during import
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    /// The text is not valid YAML; carries the deserializer's message
    #[error("{0}")]
    Syntax(String),
    /// The document parsed but a recognized key has a shape the typed model cannot read
    #[error("Schema model error: {0}")]
    Model(String),
}

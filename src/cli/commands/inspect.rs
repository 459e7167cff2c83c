//! Inspect command implementation

use super::load_input;
use crate::cli::error::CliError;
use crate::cli::output::format_schema_summary;
use crate::import::{NomlImporter, ParseOutcome};

/// Handle the inspect command
///
/// Prints a summary of the schema. Structural errors do not stop the
/// summary, matching the best-effort rendering of invalid documents.
pub fn handle_inspect(input: &str) -> Result<(), CliError> {
    let content = load_input(input)?;

    match NomlImporter::new().parse_and_validate(&content) {
        ParseOutcome::Empty => Err(CliError::InvalidArgument("Input is empty".to_string())),
        ParseOutcome::SyntaxFailure { message } => Err(CliError::ParseError(message)),
        ParseOutcome::Parsed {
            document,
            validation,
        } => {
            let schema = document
                .to_schema()
                .map_err(|e| CliError::ParseError(e.to_string()))?;
            print!("{}", format_schema_summary(&schema));
            if !validation.valid {
                eprintln!(
                    "⚠️  Schema has {} structural error(s); run `validate` for details",
                    validation.errors.len()
                );
            }
            Ok(())
        }
    }
}

//! Validate command implementation

use super::load_input;
use crate::cli::error::CliError;
use crate::cli::output::{OutputFormat, format_report_json, format_validation_text};
use crate::import::{NomlImporter, ParseOutcome};
use crate::validation::ValidationOptions;

/// Handle the validate command
///
/// Prints the outcome in the requested format and fails unless the input
/// parsed into a document without errors.
pub fn handle_validate(
    input: &str,
    format: OutputFormat,
    options: ValidationOptions,
) -> Result<(), CliError> {
    let content = load_input(input)?;
    let outcome = NomlImporter::with_options(options).parse_and_validate(&content);

    match format {
        OutputFormat::Text => print!("{}", format_validation_text(&outcome)),
        OutputFormat::Json => println!("{}", format_report_json(&outcome)?),
    }

    check_outcome(&outcome)
}

fn check_outcome(outcome: &ParseOutcome) -> Result<(), CliError> {
    match outcome {
        ParseOutcome::Empty => Err(CliError::InvalidArgument("Input is empty".to_string())),
        ParseOutcome::SyntaxFailure { message } => Err(CliError::ParseError(message.clone())),
        ParseOutcome::Parsed { validation, .. } if !validation.valid => Err(
            CliError::ValidationError(format!("{} error(s)", validation.errors.len())),
        ),
        ParseOutcome::Parsed { .. } => Ok(()),
    }
}

//! noml-cli entry point

use clap::{Parser, Subcommand};
use noml_sdk::cli::CliConfig;
use noml_sdk::cli::commands::{inspect::handle_inspect, validate::handle_validate};
use noml_sdk::cli::output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Parse and validate NOML schema documents
#[derive(Parser, Debug)]
#[command(name = "noml-cli", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a NOML document
    Validate {
        /// Input file, or `-` for stdin
        input: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also check references between schema elements
        #[arg(long)]
        check_references: bool,

        /// Configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a summary of a NOML document
    Inspect {
        /// Input file, or `-` for stdin
        input: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate {
            input,
            format,
            check_references,
            config,
        } => {
            let config = CliConfig::load_or_default(config.as_deref())?;
            let mut options = config.validation;
            if check_references {
                options.check_references = true;
            }
            handle_validate(&input, format, options)?;
        }
        Commands::Inspect { input } => handle_inspect(&input)?,
    }

    Ok(())
}

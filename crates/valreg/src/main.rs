use clap::{Parser, Subcommand};
use std::path::PathBuf;
use valreg_lib::commands::{self, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "valreg",
    about = "Rule-driven record validator",
    version,
    long_about = "Validates JSON and YAML records against validators declared in a rule file.\n\nExamples:\n  valreg validate --rules users.rules.yml data/           # Validate every document in data/\n  valreg validate --rules app.rules.yml -t User users.json  # Pick a target explicitly\n  valreg validate --rules users.rules.yml --format json users.yml\n  valreg rules users.rules.yml                            # Show what a rule file registers"
)]
struct Valreg {
    #[command(subcommand)]
    command: Commands,

    /// Run in verbose mode with detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run in debug mode, logging every registration and validation run
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate documents against a rule file
    Validate {
        /// Rule file declaring the validators
        #[arg(short, long)]
        rules: PathBuf,

        /// Target to validate against (defaults to the rule file's only target)
        #[arg(short, long)]
        target: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Document file or directory of documents
        path: PathBuf,
    },

    /// Check a rule file and list its targets and validators
    Rules {
        /// Rule file to check
        path: PathBuf,
    },
}

fn main() {
    let cli = Valreg::parse();

    logging::set_log_level(logging::LogLevel::from_flags(cli.verbose, cli.debug));
    if cli.debug {
        logging::debug("Debug mode enabled - showing detailed logs");
    }

    match &cli.command {
        Commands::Validate {
            rules,
            target,
            format,
            path,
        } => {
            match commands::validate_documents(
                rules,
                target.as_deref(),
                path,
                *format,
                cli.verbose || cli.debug,
            ) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Rules { path } => {
            commands::describe_rules(path).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
        }
    }
}

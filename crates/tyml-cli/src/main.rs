//! # tyml CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tyml_cli::check::{run_check, CheckArgs, POSITION_NOTE};
use tyml_cli::defaults::{run_defaults, DefaultsArgs};

/// tyml: schema-typed YAML data values.
///
/// Compiles a schema document into a type and default values, then
/// completes and checks data-values documents against it.
#[derive(Parser, Debug)]
#[command(name = "tyml", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the default data values of a schema.
    Defaults(DefaultsArgs),

    /// Complete and check data-values files against a schema.
    #[command(after_help = POSITION_NOTE)]
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tyml starting");

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Defaults(args) => run_defaults(&args, &mut stdout),
        Commands::Check(args) => run_check(&args, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_help_explains_file_only_positions() {
        let mut cli = Cli::command();
        let check = cli.find_subcommand_mut("check").unwrap();
        let help = check.render_long_help().to_string();
        assert!(help.contains(POSITION_NOTE.split(':').next().unwrap()));
    }

    #[test]
    fn check_accepts_repeated_values_files() {
        let cli = Cli::try_parse_from([
            "tyml", "check", "--schema", "s.yml", "--values", "a.yml", "--values", "b.yml",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check subcommand");
        };
        assert_eq!(args.values.len(), 2);
    }
}

//! docsmith CLI - Documentation site generator.
//!
//! Provides commands for:
//! - `build`: Render Markdown sections and the command reference into a site

mod commands;
mod error;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// docsmith - Documentation site generator.
#[derive(Parser)]
#[command(name = "docsmith", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the documentation site.
    #[command(
        long_about = "Render the specification and example sections of the source directory, \
                      then write one reference page per docsmith command.",
        after_help = "docsmith build --description \"My Tool\" --base-url /docs/ -o site/"
    )]
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(&Cli::command()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_args() {
        let cli = Cli::try_parse_from([
            "docsmith",
            "build",
            "-s",
            "documentation",
            "-o",
            "public/",
            "--description",
            "Tool",
            "--no-cli-reference",
            "-v",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command;
        assert!(args.verbose);
    }
}

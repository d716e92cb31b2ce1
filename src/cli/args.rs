//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::probe::PackageLookup;

/// Envcheck - Verify that build and runtime dependencies are installed.
#[derive(Debug, Parser)]
#[command(name = "envcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to catalog descriptor (overrides .envcheck/catalog.yml)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show raw probe output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only show the summary and install help
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check all dependencies (default if no command specified)
    Check(CheckArgs),

    /// List the catalog entries for this platform
    Catalog(CatalogArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Per-probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Where to write the JSON report
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Do not write the JSON report
    #[arg(long, conflicts_with = "report")]
    pub no_report: bool,

    /// How language packages are detected
    #[arg(long, value_enum)]
    pub package_lookup: Option<PackageLookup>,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CatalogArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["envcheck"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn check_flags_parse() {
        let cli = Cli::parse_from([
            "envcheck",
            "check",
            "--timeout",
            "3",
            "--report",
            "out/report.json",
            "--package-lookup",
            "pip",
        ]);
        let Some(Commands::Check(args)) = cli.command else {
            panic!("Expected check command");
        };
        assert_eq!(args.timeout, Some(3));
        assert_eq!(args.report, Some(PathBuf::from("out/report.json")));
        assert_eq!(args.package_lookup, Some(PackageLookup::Pip));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["envcheck", "catalog", "--json", "--catalog", "c.yml", "-q"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("c.yml")));
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Catalog(CatalogArgs { json: true }))));
    }

    #[test]
    fn report_and_no_report_conflict() {
        let result = Cli::try_parse_from(["envcheck", "check", "--report", "r.json", "--no-report"]);
        assert!(result.is_err());
    }
}

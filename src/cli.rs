//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

use crate::models::{Hypothesis, Page};

/// Storelens - scripted analytics report for the Superstore dataset
///
/// Load the retail transactions CSV and render one of six report
/// pages; the Analysis page tests one of eight fixed hypotheses with
/// charts and a conclusion.
///
/// Examples:
///   storelens --page overview
///   storelens --page analysis --hypothesis same-day-returns
///   storelens --data ./superstore_dataset2011-2015.csv --interactive
///   storelens --page analysis --hypothesis tables-losses --output report.md
///   storelens --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the transactions CSV (ISO-8859-1 encoded)
    ///
    /// Defaults to the path in .storelens.toml, or
    /// superstore_dataset2011-2015.csv in the current directory.
    #[arg(short, long, value_name = "FILE", env = "STORELENS_DATA")]
    pub data: Option<PathBuf>,

    /// Report page to render
    #[arg(short, long, value_enum, default_value = "overview")]
    pub page: Page,

    /// Hypothesis to test on the Analysis page
    ///
    /// Only meaningful with --page analysis. Without it, the Analysis
    /// page lists the available hypotheses.
    #[arg(long, value_enum, value_name = "NAME")]
    pub hypothesis: Option<Hypothesis>,

    /// Run the interactive navigation menu instead of a one-shot render
    #[arg(short, long)]
    pub interactive: bool,

    /// Write the rendered page to a report file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format for --output (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .storelens.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Load the dataset, print its schema and row count, and exit
    #[arg(long)]
    pub inspect: bool,

    /// Generate a default .storelens.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for saved reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format with structured chart data
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.hypothesis.is_some() && self.page != Page::Analysis {
            return Err("--hypothesis is only meaningful with --page analysis".to_string());
        }

        if self.interactive && self.output.is_some() {
            return Err("--interactive renders to the terminal; --output is not supported".to_string());
        }

        if let Some(ref data) = self.data {
            if !data.exists() {
                return Err(format!("Dataset file does not exist: {}", data.display()));
            }
            if !data.is_file() {
                return Err(format!("Dataset path is not a file: {}", data.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            page: Page::Overview,
            hypothesis: None,
            interactive: false,
            output: None,
            format: OutputFormat::Markdown,
            config: None,
            verbose: false,
            quiet: false,
            inspect: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_conflicting_verbosity() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_hypothesis_requires_analysis_page() {
        let mut args = make_args();
        args.hypothesis = Some(Hypothesis::TechnologyMargin);
        assert!(args.validate().is_err());

        args.page = Page::Analysis;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_interactive_conflicts_with_output() {
        let mut args = make_args();
        args.interactive = true;
        args.output = Some(PathBuf::from("report.md"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_missing_dataset_path_rejected() {
        let mut args = make_args();
        args.data = Some(PathBuf::from("no-such-file.csv"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}

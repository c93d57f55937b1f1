//! Storelens - scripted analytics report for retail transactions
//!
//! A CLI tool that loads the Superstore transactions dataset and
//! renders six pre-scripted report pages; the Analysis page tests
//! eight fixed hypotheses with charts and conclusions.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (dataset missing/malformed, config, I/O)

mod analysis;
mod charts;
mod cli;
mod config;
mod data;
mod models;
mod pages;
mod report;

use anyhow::{Context, Result};
use charts::RenderOptions;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use data::{Dataset, LoadOptions};
use models::{Hypothesis, Page, Report, ReportMetadata};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Storelens v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Render the report
    match run(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .storelens.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".storelens.toml");

    if path.exists() {
        eprintln!("⚠️  .storelens.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .storelens.toml")?;

    println!("✅ Created .storelens.toml with default settings.");
    println!("   Edit it to customize the dataset path and chart sizing.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow. Returns exit code.
fn run(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let data_path = PathBuf::from(&config.data.path);

    // Step 1: Load the dataset (any failure here is fatal)
    if !args.quiet {
        println!("📥 Loading dataset: {}", data_path.display());
    }
    let load_options = LoadOptions {
        show_progress: config.data.show_progress,
    };
    let dataset = data::load_dataset(&data_path, &load_options)
        .with_context(|| format!("Failed to load dataset from {}", data_path.display()))?;

    // Handle --inspect: print schema and exit
    if args.inspect {
        return handle_inspect(&dataset);
    }

    let render_options = RenderOptions::from(&config.charts);

    // Interactive navigation menu
    if args.interactive {
        let stdin = io::stdin();
        return run_interactive(stdin.lock(), &dataset, &render_options);
    }

    // Step 2: One-shot render of the selected page
    let content = pages::render(args.page, &dataset, args.hypothesis, &render_options);

    match args.output {
        Some(ref output) => {
            // Structured chart data only travels in the JSON form.
            let analysis = match args.format {
                OutputFormat::Json => args
                    .hypothesis
                    .map(|h| analysis::analyze(h, dataset.rows())),
                OutputFormat::Markdown => None,
            };

            let report = Report {
                metadata: ReportMetadata {
                    dataset: config.data.path.clone(),
                    generated_at: Utc::now(),
                    rows: dataset.len(),
                    page: args.page,
                    hypothesis: args.hypothesis,
                },
                content,
                analysis,
            };

            let rendered = match args.format {
                OutputFormat::Json => report::generate_json_report(&report)?,
                OutputFormat::Markdown => report::generate_markdown_report(&report),
            };

            std::fs::write(output, &rendered)
                .with_context(|| format!("Failed to write report to {}", output.display()))?;

            println!("\n✅ Report saved to: {}", output.display());
        }
        None => {
            println!("\n{}", content);
        }
    }

    Ok(0)
}

/// Handle --inspect: print the dataset schema and row count, exit.
fn handle_inspect(dataset: &Dataset) -> Result<i32> {
    println!("\n🔍 Inspecting dataset (no page rendered)...\n");
    println!("   Source: {}", dataset.path().display());
    println!("   Transactions: {}", dataset.len());
    if let Some((min, max)) = dataset.date_range() {
        println!("   Order dates: {} to {}", min, max);
    }

    println!("   Columns:");
    for column in Dataset::columns() {
        println!("     - {}", column);
    }

    println!("\n✅ Inspection complete.");
    Ok(0)
}

/// Result of the page menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageCommand {
    Go(Page),
    Quit,
}

/// Result of the hypothesis menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HypothesisCommand {
    Test(Hypothesis),
    Back,
}

/// Run the interactive navigation loop. One full re-render per
/// selection; no state carries over between selections.
fn run_interactive<R: BufRead>(
    mut input: R,
    dataset: &Dataset,
    options: &RenderOptions,
) -> Result<i32> {
    println!("\n📊 Interactive report. Type a number to navigate, q to quit.");

    loop {
        println!("\nNavigation");
        for (i, page) in Page::all().iter().enumerate() {
            println!("  {}. {}", i + 1, page.title());
        }
        println!("  q. Quit");

        let Some(line) = prompt(&mut input, "Go to> ")? else {
            break;
        };
        let Some(command) = parse_page_choice(&line) else {
            println!("Unrecognized choice: {}", line.trim());
            continue;
        };
        let page = match command {
            PageCommand::Quit => break,
            PageCommand::Go(page) => page,
        };

        // The Analysis page needs a hypothesis selection of its own.
        let hypothesis = if page == Page::Analysis {
            match select_hypothesis(&mut input)? {
                Some(HypothesisCommand::Test(h)) => Some(h),
                Some(HypothesisCommand::Back) => continue,
                None => break,
            }
        } else {
            None
        };

        println!("\n{}", pages::render(page, dataset, hypothesis, options));
    }

    Ok(0)
}

/// Prompt for a hypothesis until the input resolves. Returns `None` on
/// end of input.
fn select_hypothesis<R: BufRead>(input: &mut R) -> Result<Option<HypothesisCommand>> {
    loop {
        println!("\nSelect a hypothesis to test:");
        for (i, hypothesis) in Hypothesis::all().iter().enumerate() {
            println!("  {}. {}", i + 1, hypothesis.label());
        }
        println!("  b. Back");

        let Some(line) = prompt(input, "Hypothesis> ")? else {
            return Ok(None);
        };
        match parse_hypothesis_choice(&line) {
            Some(command) => return Ok(Some(command)),
            None => println!("Unrecognized choice: {}", line.trim()),
        }
    }
}

/// Print a prompt and read one line. Returns `None` on end of input.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn parse_page_choice(input: &str) -> Option<PageCommand> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Some(PageCommand::Quit);
    }
    let number: usize = input.parse().ok()?;
    Page::all()
        .get(number.checked_sub(1)?)
        .copied()
        .map(PageCommand::Go)
}

fn parse_hypothesis_choice(input: &str) -> Option<HypothesisCommand> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("b") || input.eq_ignore_ascii_case("back") {
        return Some(HypothesisCommand::Back);
    }
    let number: usize = input.parse().ok()?;
    Hypothesis::all()
        .get(number.checked_sub(1)?)
        .copied()
        .map(HypothesisCommand::Test)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .storelens.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_choice() {
        assert_eq!(parse_page_choice("1"), Some(PageCommand::Go(Page::Overview)));
        assert_eq!(
            parse_page_choice(" 4 "),
            Some(PageCommand::Go(Page::Analysis))
        );
        assert_eq!(parse_page_choice("q"), Some(PageCommand::Quit));
        assert_eq!(parse_page_choice("QUIT"), Some(PageCommand::Quit));
        assert_eq!(parse_page_choice("0"), None);
        assert_eq!(parse_page_choice("7"), None);
        assert_eq!(parse_page_choice("nonsense"), None);
    }

    #[test]
    fn test_parse_hypothesis_choice() {
        assert_eq!(
            parse_hypothesis_choice("1"),
            Some(HypothesisCommand::Test(Hypothesis::TechnologyMargin))
        );
        assert_eq!(
            parse_hypothesis_choice("8"),
            Some(HypothesisCommand::Test(Hypothesis::TablesLosses))
        );
        assert_eq!(parse_hypothesis_choice("b"), Some(HypothesisCommand::Back));
        assert_eq!(parse_hypothesis_choice("9"), None);
    }
}

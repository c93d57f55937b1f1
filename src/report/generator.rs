//! Markdown and JSON report generation.
//!
//! Wraps a rendered page in report metadata for saving to disk. The
//! JSON form carries the structured chart specifications; the Markdown
//! form carries the rendered text.

use crate::models::Report;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    output.push_str("# Storelens Report\n\n");
    output.push_str(&generate_metadata_section(report));
    output.push_str(&report.content);
    if !report.content.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(report: &Report) -> String {
    let metadata = &report.metadata;
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.dataset));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Transactions:** {}\n", metadata.rows));
    section.push_str(&format!("- **Page:** {}\n", metadata.page));
    if let Some(hypothesis) = metadata.hypothesis {
        section.push_str(&format!("- **Hypothesis:** {}\n", hypothesis.label()));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "\n---\n\n*Report generated by storelens*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a Markdown report to a file.
#[allow(dead_code)] // Convenience wrapper
pub fn write_markdown_report(report: &Report, path: &Path) -> Result<()> {
    let content = generate_markdown_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis;
    use crate::models::{Hypothesis, Page, ReportMetadata, Transaction};
    use chrono::{NaiveDate, Utc};

    fn create_test_report() -> Report {
        let rows = vec![Transaction::new(
            "Technology".to_string(),
            "Phones".to_string(),
            "Central".to_string(),
            "Consumer".to_string(),
            "Same Day".to_string(),
            NaiveDate::from_ymd_opt(2011, 1, 3).unwrap(),
            400.0,
            120.0,
            0.0,
            12.0,
        )];
        let analysis = analysis::analyze(Hypothesis::TechnologyMargin, &rows);

        Report {
            metadata: ReportMetadata {
                dataset: "superstore.csv".to_string(),
                generated_at: Utc::now(),
                rows: rows.len(),
                page: Page::Analysis,
                hypothesis: Some(Hypothesis::TechnologyMargin),
            },
            content: "# Analysis\n\nrendered body\n".to_string(),
            analysis: Some(analysis),
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Storelens Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("superstore.csv"));
        assert!(markdown.contains("Technology products have the highest profit margin."));
        assert!(markdown.contains("rendered body"));
    }

    #[test]
    fn test_metadata_section_skips_absent_hypothesis() {
        let mut report = create_test_report();
        report.metadata.page = Page::Overview;
        report.metadata.hypothesis = None;

        let section = generate_metadata_section(&report);
        assert!(section.contains("- **Page:** Overview"));
        assert!(!section.contains("Hypothesis:"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"dataset\""));
        assert!(json.contains("\"analysis\""));
        assert!(json.contains("\"charts\""));
        assert!(json.contains("\"conclusion\""));
    }
}

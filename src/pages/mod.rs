//! Page rendering for the six navigation targets.
//!
//! Five pages are static text; Analysis delegates to the hypothesis
//! routines and renders their charts and conclusion. Rendering is a
//! pure function of the table and the selection; nothing is retained
//! between renders.

use crate::analysis;
use crate::charts::RenderOptions;
use crate::data::Dataset;
use crate::models::{Hypothesis, Page};

const OVERVIEW: &str = "\
This dashboard analyzes sales and profit data to identify insights for \
improving business performance. Our goals include:

- Identifying the most profitable product categories and regions.
- Optimizing product offerings and strategies.
- Understanding seasonal trends to enhance sales planning.
- Evaluating the impact of different shipping methods on returns.
- Analyzing weekday vs. weekend performance to tailor marketing efforts.
- Comparing sales and profit contributions by customer segments.
- Assessing performance across product sub-categories to identify areas for improvement.
- Investigating specific sub-categories, like Tables, to uncover reasons for losses.";

const RESEARCH_QUESTIONS: &str = "\
Our research focuses on the following questions:

- Which product categories have the highest profit margins?
- How do sales vary by region and month?
- What is the return rate for same-day shipping?
- How do sales and profit vary by day of the week?
- Which segment generates more sales and profit?
- Do all product sub-categories generate positive results?
- What causes losses in specific sub-categories like Tables?";

const HYPOTHESIS_INTRO: &str = "We formulated the following hypothesis:";

const CONCLUSIONS: &str = "\
Based on our analysis, we draw the following conclusions:

- Technology products are the most profitable category.
- The Central region leads in total sales.
- Sales peak during November and December.
- Same-day shipping has the lowest return rate.
- Weekday profits surpass weekend profits.
- Consumer segment generates higher sales, but Corporate segment yields more profit.
- All product sub-categories generate positive results.
- Losses in the Tables sub-category are due to high discounts and shipping costs.";

const RECOMMENDATIONS: &str = "\
To improve business performance, we recommend:

- Focus on promoting technology products to maximize profits.
- Allocate more resources to the Central region to sustain high sales.
- Prepare for peak sales in November and December with adequate inventory and staffing.
- Encourage same-day shipping to minimize returns.
- Strategize to boost weekend sales and profits.
- Leverage the profitability of the Corporate segment by offering tailored solutions.
- Monitor sub-categories like Tables for high discounts and shipping costs, and adjust strategies accordingly.";

/// Render a page selection to Markdown-flavoured text.
///
/// `hypothesis` only matters for the Analysis page; without one, the
/// page lists the available hypotheses instead of running a routine.
pub fn render(
    page: Page,
    dataset: &Dataset,
    hypothesis: Option<Hypothesis>,
    options: &RenderOptions,
) -> String {
    let body = match page {
        Page::Overview => OVERVIEW.to_string(),
        Page::ResearchQuestions => RESEARCH_QUESTIONS.to_string(),
        Page::Hypothesis => hypothesis_list(),
        Page::Analysis => render_analysis(dataset, hypothesis, options),
        Page::Conclusions => CONCLUSIONS.to_string(),
        Page::Recommendations => RECOMMENDATIONS.to_string(),
    };

    format!("# {}\n\n{}\n", page.title(), body)
}

fn hypothesis_list() -> String {
    let mut body = String::from(HYPOTHESIS_INTRO);
    body.push_str("\n\n");
    // The Tables loss investigation is an analysis view, not one of
    // the formulated hypotheses, so it is absent from this page.
    for (i, hypothesis) in Hypothesis::all().iter().take(7).enumerate() {
        body.push_str(&format!("{}. {}\n", i + 1, hypothesis.label()));
    }
    body.trim_end().to_string()
}

fn render_analysis(
    dataset: &Dataset,
    hypothesis: Option<Hypothesis>,
    options: &RenderOptions,
) -> String {
    let Some(hypothesis) = hypothesis else {
        let mut body = String::from("Select a hypothesis to test:\n\n");
        for (i, candidate) in Hypothesis::all().iter().enumerate() {
            body.push_str(&format!("{}. {}\n", i + 1, candidate.label()));
        }
        body.push_str("\nPass --hypothesis <name> to run one.");
        return body;
    };

    let output = analysis::analyze(hypothesis, dataset.rows());

    let mut body = format!("Hypothesis: {}\n\n", hypothesis.label());
    for chart in &output.charts {
        body.push_str(&chart.render_text(options));
        body.push('\n');
    }
    body.push_str(&output.conclusion);
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn sample_dataset() -> Dataset {
        let rows = vec![
            Transaction::new(
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
            ),
            Transaction::new(
                "Furniture".to_string(),
                "Tables".to_string(),
                "East".to_string(),
                "Corporate".to_string(),
                "First Class".to_string(),
                NaiveDate::from_ymd_opt(2011, 6, 5).unwrap(),
                731.9,
                -105.2,
                0.4,
                55.3,
            ),
        ];
        Dataset::from_rows(rows, PathBuf::from("sample.csv"))
    }

    #[test]
    fn test_every_page_renders_non_empty() {
        let dataset = sample_dataset();
        for page in Page::all() {
            let content = render(page, &dataset, None, &RenderOptions::default());
            assert!(!content.trim().is_empty(), "{:?} rendered empty", page);
            assert!(content.starts_with(&format!("# {}", page.title())));
        }
    }

    #[test]
    fn test_hypothesis_page_lists_the_formulated_seven() {
        let dataset = sample_dataset();
        let content = render(Page::Hypothesis, &dataset, None, &RenderOptions::default());
        for hypothesis in Hypothesis::all().iter().take(7) {
            assert!(content.contains(hypothesis.label()));
        }
        assert!(!content.contains(Hypothesis::TablesLosses.label()));
    }

    #[test]
    fn test_analysis_without_selection_lists_options() {
        let dataset = sample_dataset();
        let content = render(Page::Analysis, &dataset, None, &RenderOptions::default());
        assert!(content.contains("Select a hypothesis to test:"));
        assert!(content.contains(Hypothesis::TablesLosses.label()));
    }

    #[test]
    fn test_analysis_with_selection_renders_chart_and_conclusion() {
        let dataset = sample_dataset();
        let content = render(
            Page::Analysis,
            &dataset,
            Some(Hypothesis::TechnologyMargin),
            &RenderOptions::default(),
        );
        assert!(content.contains("Total Profit by Category"));
        assert!(content.contains(
            "**Conclusion:** Supported. Technology products have the highest profit margin."
        ));
    }

    #[test]
    fn test_static_pages_ignore_selection() {
        let dataset = sample_dataset();
        let with = render(
            Page::Overview,
            &dataset,
            Some(Hypothesis::TablesLosses),
            &RenderOptions::default(),
        );
        let without = render(Page::Overview, &dataset, None, &RenderOptions::default());
        assert_eq!(with, without);
    }
}

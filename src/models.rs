//! Data models for the retail analytics report.
//!
//! This module contains the core data structures used throughout
//! the application: transaction records, the closed page and
//! hypothesis enumerations, and the report types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::charts::ChartSpec;

/// One row of the transactions table.
///
/// The last two fields are derived from `order_date` when the row is
/// built and are never present in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Product taxonomy, top level (e.g. "Technology").
    pub category: String,
    /// Product taxonomy, second level (e.g. "Tables").
    pub sub_category: String,
    /// Sales region (e.g. "Central").
    pub region: String,
    /// Customer classification (e.g. "Consumer", "Corporate").
    pub segment: String,
    /// Shipping method used for the order (e.g. "Same Day").
    pub ship_mode: String,
    /// Calendar date the order was placed.
    pub order_date: NaiveDate,
    /// Sale amount in dataset currency.
    pub sales: f64,
    /// Signed profit amount; negative values are losses.
    pub profit: f64,
    /// Discount applied, as a fraction (0.2 = 20%).
    pub discount: f64,
    /// Shipping cost in dataset currency.
    pub shipping_cost: f64,
    /// Derived: month of the order date (1-12).
    pub order_month: u32,
    /// Derived: weekday name of the order date (e.g. "Monday").
    pub order_day: String,
}

impl Transaction {
    /// Build a transaction from its source columns, computing the
    /// derived calendar columns.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        category: String,
        sub_category: String,
        region: String,
        segment: String,
        ship_mode: String,
        order_date: NaiveDate,
        sales: f64,
        profit: f64,
        discount: f64,
        shipping_cost: f64,
    ) -> Self {
        let order_month = order_date.month();
        let order_day = order_date.format("%A").to_string();
        Self {
            category,
            sub_category,
            region,
            segment,
            ship_mode,
            order_date,
            sales,
            profit,
            discount,
            shipping_cost,
            order_month,
            order_day,
        }
    }
}

/// The six navigation pages. The set is closed; the CLI and the
/// interactive menu only ever produce one of these values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    /// Dashboard goals and scope.
    #[default]
    Overview,
    /// The questions the analysis sets out to answer.
    ResearchQuestions,
    /// The formulated hypotheses, as a list.
    Hypothesis,
    /// Hypothesis testing: charts plus a conclusion per hypothesis.
    Analysis,
    /// Conclusions drawn across all hypotheses.
    Conclusions,
    /// Business recommendations.
    Recommendations,
}

impl Page {
    /// Human-readable page title.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::ResearchQuestions => "Research Questions",
            Page::Hypothesis => "Hypothesis",
            Page::Analysis => "Analysis",
            Page::Conclusions => "Conclusions",
            Page::Recommendations => "Recommendations",
        }
    }

    /// All pages, in sidebar order.
    pub fn all() -> [Page; 6] {
        [
            Page::Overview,
            Page::ResearchQuestions,
            Page::Hypothesis,
            Page::Analysis,
            Page::Conclusions,
            Page::Recommendations,
        ]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// The eight testable hypotheses offered on the Analysis page.
///
/// Labels are fixed; `label()` returns the exact wording the report
/// presents to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Hypothesis {
    /// Total profit by product category.
    TechnologyMargin,
    /// Total sales by region.
    EastRegionSales,
    /// Total sales by order month.
    SeasonalPeaks,
    /// Return percentage by shipping mode.
    SameDayReturns,
    /// Total profit by day of the week.
    WeekdayProfits,
    /// Sales and profit split by customer segment.
    SegmentSplit,
    /// Sales and profit by product sub-category.
    SubCategoryResults,
    /// Loss drivers inside the Tables sub-category.
    TablesLosses,
}

impl Hypothesis {
    /// The exact hypothesis wording shown in the selector and report.
    pub fn label(&self) -> &'static str {
        match self {
            Hypothesis::TechnologyMargin => "Technology products have the highest profit margin.",
            Hypothesis::EastRegionSales => "The East region has the highest sales.",
            Hypothesis::SeasonalPeaks => "Sales peak in certain months.",
            Hypothesis::SameDayReturns => "Same-day shipping has the lowest return rate.",
            Hypothesis::WeekdayProfits => "Weekday profits are higher than weekends.",
            Hypothesis::SegmentSplit => {
                "Consumer segment generates more sales but corporate segment yields higher profits."
            }
            Hypothesis::SubCategoryResults => {
                "All product sub-categories generate positive results."
            }
            Hypothesis::TablesLosses => {
                "Finding the Reason for Losses in the Tables Sub Category"
            }
        }
    }

    /// All hypotheses, in selector order.
    pub fn all() -> [Hypothesis; 8] {
        [
            Hypothesis::TechnologyMargin,
            Hypothesis::EastRegionSales,
            Hypothesis::SeasonalPeaks,
            Hypothesis::SameDayReturns,
            Hypothesis::WeekdayProfits,
            Hypothesis::SegmentSplit,
            Hypothesis::SubCategoryResults,
            Hypothesis::TablesLosses,
        ]
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The result of running one hypothesis against the loaded table:
/// one or more chart specifications plus the fixed conclusion text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Which hypothesis was tested.
    pub hypothesis: Hypothesis,
    /// Charts produced by the aggregation routine.
    pub charts: Vec<ChartSpec>,
    /// The conclusion sentence. This is a fixed literal chosen by the
    /// report author; it is never derived from the computed values.
    pub conclusion: String,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the dataset the report was built from.
    pub dataset: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of transactions in the table.
    pub rows: usize,
    /// Which page was rendered.
    pub page: Page,
    /// Which hypothesis was selected, for Analysis reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<Hypothesis>,
}

/// A complete rendered report for one page selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// Rendered page content (Markdown-flavoured text).
    pub content: String,
    /// Structured analysis output, when the page was Analysis with a
    /// selected hypothesis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisOutput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_columns() {
        // 2011-01-03 was a Monday
        let t = Transaction::new(
            "Technology".to_string(),
            "Phones".to_string(),
            "Central".to_string(),
            "Consumer".to_string(),
            "Same Day".to_string(),
            NaiveDate::from_ymd_opt(2011, 1, 3).unwrap(),
            100.0,
            20.0,
            0.0,
            5.0,
        );
        assert_eq!(t.order_month, 1);
        assert_eq!(t.order_day, "Monday");
    }

    #[test]
    fn test_page_set_is_closed() {
        let pages = Page::all();
        assert_eq!(pages.len(), 6);
        assert_eq!(pages[0], Page::Overview);
        assert_eq!(pages[5], Page::Recommendations);
    }

    #[test]
    fn test_page_titles() {
        assert_eq!(Page::ResearchQuestions.title(), "Research Questions");
        assert_eq!(Page::Analysis.to_string(), "Analysis");
    }

    #[test]
    fn test_hypothesis_labels_are_fixed() {
        assert_eq!(
            Hypothesis::TechnologyMargin.label(),
            "Technology products have the highest profit margin."
        );
        assert_eq!(
            Hypothesis::SegmentSplit.label(),
            "Consumer segment generates more sales but corporate segment yields higher profits."
        );
        assert_eq!(
            Hypothesis::TablesLosses.label(),
            "Finding the Reason for Losses in the Tables Sub Category"
        );
    }

    #[test]
    fn test_hypothesis_set_is_closed() {
        assert_eq!(Hypothesis::all().len(), 8);
    }
}

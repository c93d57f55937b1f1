//! The eight hypothesis routines and their dispatcher.
//!
//! Each routine is a pure function of the loaded table: group, reduce,
//! build chart specifications, attach the fixed conclusion. Routines do
//! not interact and share no state beyond the table itself.
//!
//! Conclusions are literal constants chosen by the report author. They
//! are intentionally not checked against the computed aggregates; a
//! hypothesis renders the same sentence whatever the data says.

use crate::analysis::aggregator::{negative_share_by, sum_by};
use crate::charts::{ChartSpec, ScatterPoint};
use crate::models::{AnalysisOutput, Hypothesis, Transaction};

/// Run one hypothesis against the table.
pub fn analyze(hypothesis: Hypothesis, rows: &[Transaction]) -> AnalysisOutput {
    let charts = match hypothesis {
        Hypothesis::TechnologyMargin => profit_by_category(rows),
        Hypothesis::EastRegionSales => sales_by_region(rows),
        Hypothesis::SeasonalPeaks => sales_by_month(rows),
        Hypothesis::SameDayReturns => return_rate_by_ship_mode(rows),
        Hypothesis::WeekdayProfits => profit_by_weekday(rows),
        Hypothesis::SegmentSplit => segment_sales_and_profit(rows),
        Hypothesis::SubCategoryResults => sub_category_results(rows),
        Hypothesis::TablesLosses => tables_loss_drivers(rows),
    };

    AnalysisOutput {
        hypothesis,
        charts,
        conclusion: conclusion(hypothesis).to_string(),
    }
}

/// The fixed conclusion sentence for a hypothesis.
pub fn conclusion(hypothesis: Hypothesis) -> &'static str {
    match hypothesis {
        Hypothesis::TechnologyMargin => {
            "**Conclusion:** Supported. Technology products have the highest profit margin."
        }
        Hypothesis::EastRegionSales => {
            "**Conclusion:** Not supported. The Central region has the highest sales."
        }
        Hypothesis::SeasonalPeaks => {
            "**Conclusion:** Supported. Sales peak in November and December."
        }
        Hypothesis::SameDayReturns => {
            "**Conclusion:** Supported. Same-day shipping has the lowest return rate."
        }
        Hypothesis::WeekdayProfits => {
            "**Conclusion:** Supported. Weekday profits are higher than weekends."
        }
        Hypothesis::SegmentSplit => {
            "**Conclusion:** Not Supported. Consumer segment generates more sales, and more profits as well"
        }
        Hypothesis::SubCategoryResults => {
            "**Conclusion:** Partially Supported. All product sub-categories except tables generate positive results."
        }
        Hypothesis::TablesLosses => {
            "**Conclusion:** Losses in the Tables sub-category are influenced by high discounts and shipping costs."
        }
    }
}

fn profit_by_category(rows: &[Transaction]) -> Vec<ChartSpec> {
    let totals = sum_by(rows, |t| t.category.clone(), |t| t.profit);
    vec![ChartSpec::bar(
        "Total Profit by Category",
        "Category",
        "Total Profit",
        totals,
    )]
}

fn sales_by_region(rows: &[Transaction]) -> Vec<ChartSpec> {
    let totals = sum_by(rows, |t| t.region.clone(), |t| t.sales);
    vec![ChartSpec::bar(
        "Total Sales by Region",
        "Region",
        "Total Sales",
        totals,
    )]
}

fn sales_by_month(rows: &[Transaction]) -> Vec<ChartSpec> {
    let totals = sum_by(rows, |t| t.order_month, |t| t.sales);
    let labelled = totals
        .into_iter()
        .map(|(month, value)| (month.to_string(), value))
        .collect();
    vec![ChartSpec::line(
        "Total Sales by Month",
        "Month",
        "Total Sales",
        labelled,
    )]
}

fn return_rate_by_ship_mode(rows: &[Transaction]) -> Vec<ChartSpec> {
    // A negative-profit transaction stands in for a returned order.
    let shares = negative_share_by(rows, |t| t.ship_mode.clone(), |t| t.profit);
    vec![ChartSpec::bar(
        "Return Percentage by Shipping Mode",
        "Shipping Mode",
        "Return Percentage",
        shares,
    )]
}

fn profit_by_weekday(rows: &[Transaction]) -> Vec<ChartSpec> {
    let totals = sum_by(rows, |t| t.order_day.clone(), |t| t.profit);
    vec![ChartSpec::bar(
        "Total Profit by Day of the Week",
        "Day of the Week",
        "Total Profit",
        totals,
    )]
}

fn segment_sales_and_profit(rows: &[Transaction]) -> Vec<ChartSpec> {
    let sales = sum_by(rows, |t| t.segment.clone(), |t| t.sales);
    let profit = sum_by(rows, |t| t.segment.clone(), |t| t.profit);
    vec![
        ChartSpec::bar("Total Sales by Segment", "Segment", "Total Sales", sales),
        ChartSpec::bar("Total Profit by Segment", "Segment", "Total Profit", profit),
    ]
}

fn sub_category_results(rows: &[Transaction]) -> Vec<ChartSpec> {
    let sales = sum_by(rows, |t| t.sub_category.clone(), |t| t.sales);
    let profit = sum_by(rows, |t| t.sub_category.clone(), |t| t.profit);
    vec![
        ChartSpec::bar(
            "Total Sales by Sub-Category",
            "Sub-Category",
            "Total Sales",
            sales,
        ),
        ChartSpec::bar(
            "Total Profit by Sub-Category",
            "Sub-Category",
            "Total Profit",
            profit,
        ),
    ]
}

fn tables_loss_drivers(rows: &[Transaction]) -> Vec<ChartSpec> {
    let tables: Vec<&Transaction> = rows
        .iter()
        .filter(|t| t.sub_category == "Tables")
        .collect();

    let profits: Vec<f64> = tables.iter().map(|t| t.profit).collect();

    let discount_profit: Vec<ScatterPoint> = tables
        .iter()
        .map(|t| ScatterPoint { x: t.discount, y: t.profit, size: None })
        .collect();

    let shipping_profit: Vec<ScatterPoint> = tables
        .iter()
        .map(|t| ScatterPoint { x: t.shipping_cost, y: t.profit, size: None })
        .collect();

    let discount_profit_sized: Vec<ScatterPoint> = tables
        .iter()
        .map(|t| ScatterPoint {
            x: t.discount,
            y: t.profit,
            size: Some(t.shipping_cost),
        })
        .collect();

    vec![
        ChartSpec::histogram(
            "Profit Distribution for Tables",
            "Profit",
            "Frequency",
            &profits,
            30,
        ),
        ChartSpec::scatter(
            "Discount vs Profit for Tables",
            "Discount (in %)",
            "Profit",
            discount_profit,
        ),
        ChartSpec::scatter(
            "Shipping Cost vs Profit for Tables",
            "Shipping Cost",
            "Profit",
            shipping_profit,
        ),
        ChartSpec::scatter(
            "Discount and Shipping Cost vs Profit for Tables",
            "Discount (in %)",
            "Profit",
            discount_profit_sized,
        ),
    ]
}

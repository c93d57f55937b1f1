//! Chart specifications and terminal rendering.
//!
//! Charts are built as plain data (`ChartSpec`) by the aggregation
//! routines, serialized as-is into JSON reports, and rendered to
//! fixed-width text for the terminal and Markdown reports.

use serde::{Deserialize, Serialize};

/// Kind of chart a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Histogram,
    Scatter,
}

/// One labelled value in a categorical chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
}

/// One point in a scatter chart, with an optional size encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

/// Chart payload: either labelled values or raw points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartData {
    Categories(Vec<CategoryValue>),
    Points(Vec<ScatterPoint>),
}

/// A complete chart specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
}

/// Rendering knobs for the text output surface.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Width of the value bar in characters.
    pub bar_width: usize,
    /// Columns of the scatter grid.
    pub scatter_columns: usize,
    /// Rows of the scatter grid.
    pub scatter_rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bar_width: 40,
            scatter_columns: 60,
            scatter_rows: 20,
        }
    }
}

impl From<&crate::config::ChartsConfig> for RenderOptions {
    fn from(config: &crate::config::ChartsConfig) -> Self {
        Self {
            bar_width: config.bar_width,
            scatter_columns: config.scatter_columns,
            scatter_rows: config.scatter_rows,
        }
    }
}

impl ChartSpec {
    /// Build a bar chart from labelled values.
    pub fn bar(title: &str, x_label: &str, y_label: &str, values: Vec<(String, f64)>) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data: categories(values),
        }
    }

    /// Build a line chart from labelled values.
    pub fn line(title: &str, x_label: &str, y_label: &str, values: Vec<(String, f64)>) -> Self {
        Self {
            kind: ChartKind::Line,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data: categories(values),
        }
    }

    /// Build a histogram over raw samples with equal-width bins.
    pub fn histogram(
        title: &str,
        x_label: &str,
        y_label: &str,
        samples: &[f64],
        bins: usize,
    ) -> Self {
        Self {
            kind: ChartKind::Histogram,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data: ChartData::Categories(bin_samples(samples, bins)),
        }
    }

    /// Build a scatter chart from points.
    pub fn scatter(title: &str, x_label: &str, y_label: &str, points: Vec<ScatterPoint>) -> Self {
        Self {
            kind: ChartKind::Scatter,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            data: ChartData::Points(points),
        }
    }

    /// Render the chart to fixed-width text.
    pub fn render_text(&self, options: &RenderOptions) -> String {
        let mut out = String::new();
        out.push_str(&format!("**{}**\n", self.title));
        out.push_str(&format!("x: {} | y: {}\n\n", self.x_label, self.y_label));

        match &self.data {
            ChartData::Categories(values) => {
                out.push_str(&render_categories(values, options.bar_width))
            }
            ChartData::Points(points) => out.push_str(&render_points(
                points,
                options.scatter_columns,
                options.scatter_rows,
            )),
        }

        out
    }
}

fn categories(values: Vec<(String, f64)>) -> ChartData {
    ChartData::Categories(
        values
            .into_iter()
            .map(|(label, value)| CategoryValue { label, value })
            .collect(),
    )
}

/// Partition samples into `bins` equal-width buckets over [min, max].
fn bin_samples(samples: &[f64], bins: usize) -> Vec<CategoryValue> {
    if samples.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    // Degenerate distribution: every sample lands in one bucket.
    let width = if span > 0.0 { span / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for &sample in samples {
        let index = (((sample - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + width * i as f64;
            let hi = min + width * (i + 1) as f64;
            CategoryValue {
                label: format!("[{:.0}, {:.0})", lo, hi),
                value: count as f64,
            }
        })
        .collect()
}

fn render_categories(values: &[CategoryValue], bar_width: usize) -> String {
    if values.is_empty() {
        return "(no data)\n".to_string();
    }

    let label_width = values.iter().map(|v| v.label.len()).max().unwrap_or(0);
    let max_abs = values
        .iter()
        .map(|v| v.value.abs())
        .fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    for entry in values {
        let filled = if max_abs > 0.0 {
            ((entry.value.abs() / max_abs) * bar_width as f64).round() as usize
        } else {
            0
        };
        // Losses render with a hollow bar so sign survives the scaling.
        let glyph = if entry.value < 0.0 { '░' } else { '█' };
        let bar: String = std::iter::repeat(glyph).take(filled).collect();
        out.push_str(&format!(
            "{:>width$} │{:<bar_width$} {:.2}\n",
            entry.label,
            bar,
            entry.value,
            width = label_width,
            bar_width = bar_width,
        ));
    }
    out
}

fn render_points(points: &[ScatterPoint], columns: usize, rows: usize) -> String {
    if points.is_empty() {
        return "(no data)\n".to_string();
    }

    let columns = columns.max(10);
    let rows = rows.max(5);

    let x_min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let x_max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let y_min = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let y_max = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };
    let y_span = if y_max > y_min { y_max - y_min } else { 1.0 };

    // Points carrying a size encoding split around the median size.
    let mut sizes: Vec<f64> = points.iter().filter_map(|p| p.size).collect();
    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let size_median = sizes.get(sizes.len() / 2).copied();

    let mut grid = vec![vec![' '; columns]; rows];
    for point in points {
        let col = (((point.x - x_min) / x_span) * (columns - 1) as f64).round() as usize;
        let row = (((point.y - y_min) / y_span) * (rows - 1) as f64).round() as usize;
        let glyph = match (point.size, size_median) {
            (Some(s), Some(m)) if s >= m => '●',
            (Some(_), _) => '·',
            _ => '•',
        };
        grid[rows - 1 - row][col.min(columns - 1)] = glyph;
    }

    let mut out = String::new();
    out.push_str(&format!("y range: {:.2} to {:.2}\n", y_min, y_max));
    for row in &grid {
        out.push('│');
        out.extend(row.iter());
        out.push('\n');
    }
    out.push('└');
    out.extend(std::iter::repeat('─').take(columns));
    out.push('\n');
    out.push_str(&format!("x range: {:.2} to {:.2}\n", x_min, x_max));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_renders_labels_and_values() {
        let chart = ChartSpec::bar(
            "Total Profit by Category",
            "Category",
            "Total Profit",
            vec![
                ("Furniture".to_string(), 100.0),
                ("Technology".to_string(), 400.0),
            ],
        );

        let text = chart.render_text(&RenderOptions::default());
        assert!(text.contains("Total Profit by Category"));
        assert!(text.contains("Furniture"));
        assert!(text.contains("Technology"));
        assert!(text.contains("400.00"));
    }

    #[test]
    fn test_negative_bars_use_hollow_glyph() {
        let chart = ChartSpec::bar(
            "Profit",
            "Sub-Category",
            "Total Profit",
            vec![
                ("Phones".to_string(), 50.0),
                ("Tables".to_string(), -50.0),
            ],
        );

        let text = chart.render_text(&RenderOptions::default());
        assert!(text.contains('░'));
        assert!(text.contains('█'));
    }

    #[test]
    fn test_histogram_bins_partition_samples() {
        let samples: Vec<f64> = (0..90).map(|i| i as f64).collect();
        let chart = ChartSpec::histogram("Profit Distribution", "Profit", "Frequency", &samples, 30);

        match chart.data {
            ChartData::Categories(bins) => {
                assert_eq!(bins.len(), 30);
                let total: f64 = bins.iter().map(|b| b.value).sum();
                assert_eq!(total, 90.0);
            }
            ChartData::Points(_) => panic!("histogram must bin into categories"),
        }
    }

    #[test]
    fn test_histogram_of_identical_samples() {
        let samples = [5.0, 5.0, 5.0];
        let chart = ChartSpec::histogram("Degenerate", "x", "n", &samples, 30);

        match chart.data {
            ChartData::Categories(bins) => {
                let total: f64 = bins.iter().map(|b| b.value).sum();
                assert_eq!(total, 3.0);
            }
            ChartData::Points(_) => panic!("histogram must bin into categories"),
        }
    }

    #[test]
    fn test_scatter_grid_dimensions() {
        let points = vec![
            ScatterPoint { x: 0.0, y: 0.0, size: None },
            ScatterPoint { x: 0.5, y: 100.0, size: None },
            ScatterPoint { x: 0.8, y: -60.0, size: None },
        ];
        let chart = ChartSpec::scatter("Discount vs Profit", "Discount", "Profit", points);

        let options = RenderOptions { bar_width: 40, scatter_columns: 30, scatter_rows: 10 };
        let text = chart.render_text(&options);
        // 10 grid rows plus axis and range lines
        assert_eq!(text.lines().filter(|l| l.starts_with('│')).count(), 10);
        assert!(text.contains("x range: 0.00 to 0.80"));
    }

    #[test]
    fn test_empty_chart_renders_placeholder() {
        let chart = ChartSpec::bar("Empty", "x", "y", Vec::new());
        let text = chart.render_text(&RenderOptions::default());
        assert!(text.contains("(no data)"));
    }
}

//! Chart rendering to PNG.
//!
//! RULE: every chart is written to disk before it is offered to a
//! display. Display failures are logged and swallowed; a failed save
//! aborts the run.

use crate::{
    analyzer::{Analysis, CorrelationMatrix, Distribution, GroupRevenue},
    config::AnalysisConfig,
    error::{AnalysisError, AnalysisResult},
};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};

type DrawResult = Result<(), Box<dyn Error>>;

const FONT: &str = "sans-serif";
const BAR_HALF_WIDTH: f64 = 0.4;

// ── Seams ────────────────────────────────────────────────────────────────────

/// One figure that knows how to draw itself into a file.
pub trait Chart {
    /// Stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    fn file_name(&self) -> &str;

    fn draw(&self, path: &Path) -> AnalysisResult<()>;
}

/// Where saved charts are shown after persistence.
pub trait ChartDisplay {
    fn show(&self, path: &Path) -> anyhow::Result<()>;
}

/// No screen attached: showing a chart is a logged no-op.
pub struct HeadlessDisplay;

impl ChartDisplay for HeadlessDisplay {
    fn show(&self, path: &Path) -> anyhow::Result<()> {
        log::debug!("headless: not displaying {}", path.display());
        Ok(())
    }
}

pub struct Renderer<'a> {
    output_dir: PathBuf,
    display: &'a dyn ChartDisplay,
}

impl<'a> Renderer<'a> {
    pub fn new(output_dir: impl Into<PathBuf>, display: &'a dyn ChartDisplay) -> Self {
        Self {
            output_dir: output_dir.into(),
            display,
        }
    }

    /// Save each chart, then offer it to the display.
    /// Returns the written paths in chart order.
    pub fn render_all(&self, charts: &[Box<dyn Chart + '_>]) -> AnalysisResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(charts.len());
        for chart in charts {
            let path = self.output_dir.join(chart.file_name());
            chart.draw(&path)?;
            log::info!("saved {} chart to {}", chart.name(), path.display());

            if let Err(e) = self.display.show(&path) {
                log::warn!("could not display {}: {e:#}", chart.name());
            }
            written.push(path);
        }
        Ok(written)
    }
}

/// The four charts of a standard run, in output order.
pub fn standard_charts<'a>(analysis: &'a Analysis, config: &'a AnalysisConfig) -> Vec<Box<dyn Chart + 'a>> {
    vec![
        Box::new(CategoryRevenueChart {
            revenue: &analysis.revenue_by_category,
            currency: &config.currency,
            file_name: &config.charts.by_category,
        }),
        Box::new(CityRevenueChart {
            revenue: &analysis.revenue_by_city,
            currency: &config.currency,
            file_name: &config.charts.by_city,
        }),
        Box::new(CorrelationHeatmap {
            matrix: &analysis.correlation,
            file_name: &config.charts.correlation,
        }),
        Box::new(DistributionChart {
            distribution: &analysis.total_distribution,
            currency: &config.currency,
            file_name: &config.charts.distribution,
        }),
    ]
}

fn render_error(chart: &'static str, err: Box<dyn Error>) -> AnalysisError {
    AnalysisError::Render {
        chart,
        message: err.to_string(),
    }
}

// ── Charts ───────────────────────────────────────────────────────────────────

/// Horizontal bars, highest revenue on top.
pub struct CategoryRevenueChart<'a> {
    pub revenue: &'a [GroupRevenue],
    pub currency: &'a str,
    pub file_name: &'a str,
}

impl CategoryRevenueChart<'_> {
    fn draw_inner(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = self.revenue.len();
        let x_max = axis_max(self.revenue.iter().map(|g| g.revenue));
        // rank 0 is drawn at the top slot
        let slot = |rank: usize| (n - 1 - rank) as f64;
        let label_for = |v: &f64| slot_label(*v, n, |s| self.revenue[n - 1 - s].key.as_str());

        let mut chart = ChartBuilder::on(&root)
            .caption("Total revenue by product category", (FONT, 26))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(130)
            .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&label_for)
            .x_label_formatter(&|v| format!("{v:.0}"))
            .x_desc(format!("Revenue ({})", self.currency))
            .y_desc("Product category")
            .draw()?;

        chart.draw_series(self.revenue.iter().enumerate().map(|(rank, g)| {
            let y = slot(rank);
            Rectangle::new(
                [(0.0, y - BAR_HALF_WIDTH), (g.revenue, y + BAR_HALF_WIDTH)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Chart for CategoryRevenueChart<'_> {
    fn name(&self) -> &'static str {
        "sales_by_category"
    }

    fn file_name(&self) -> &str {
        self.file_name
    }

    fn draw(&self, path: &Path) -> AnalysisResult<()> {
        self.draw_inner(path).map_err(|e| render_error(self.name(), e))
    }
}

/// Vertical bars, one per city.
pub struct CityRevenueChart<'a> {
    pub revenue: &'a [GroupRevenue],
    pub currency: &'a str,
    pub file_name: &'a str,
}

impl CityRevenueChart<'_> {
    fn draw_inner(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let n = self.revenue.len();
        let y_max = axis_max(self.revenue.iter().map(|g| g.revenue));
        let label_for = |v: &f64| slot_label(*v, n, |s| self.revenue[s].key.as_str());

        let mut chart = ChartBuilder::on(&root)
            .caption("Revenue by city", (FONT, 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&label_for)
            .y_label_formatter(&|v| format!("{v:.0}"))
            .x_desc("City")
            .y_desc(format!("Revenue ({})", self.currency))
            .draw()?;

        chart.draw_series(self.revenue.iter().enumerate().map(|(i, g)| {
            let x = i as f64;
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, g.revenue)],
                GREEN.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Chart for CityRevenueChart<'_> {
    fn name(&self) -> &'static str {
        "sales_by_city"
    }

    fn file_name(&self) -> &str {
        self.file_name
    }

    fn draw(&self, path: &Path) -> AnalysisResult<()> {
        self.draw_inner(path).map_err(|e| render_error(self.name(), e))
    }
}

/// Annotated heatmap; row 0 is drawn at the top.
pub struct CorrelationHeatmap<'a> {
    pub matrix: &'a CorrelationMatrix,
    pub file_name: &'a str,
}

impl CorrelationHeatmap<'_> {
    fn draw_inner(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let k = self.matrix.size();
        let span = -0.5f64..(k as f64 - 0.5);
        let labels = &self.matrix.labels;
        let col_label = |v: &f64| slot_label(*v, k, |s| labels[s].name());
        let row_label = |v: &f64| slot_label(*v, k, |s| labels[k - 1 - s].name());

        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation matrix", (FONT, 24))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(100)
            .build_cartesian_2d(span.clone(), span)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k)
            .y_labels(k)
            .x_label_formatter(&col_label)
            .y_label_formatter(&row_label)
            .draw()?;

        let cells: Vec<(f64, f64, f64)> = (0..k)
            .flat_map(|r| (0..k).map(move |c| (r, c)))
            .map(|(r, c)| (c as f64, (k - 1 - r) as f64, self.matrix.get(r, c)))
            .collect();

        chart.draw_series(cells.iter().map(|&(x, y, value)| {
            Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                coolwarm(value).filled(),
            )
        }))?;

        let annotation = (FONT, 22)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(cells.iter().map(|&(x, y, value)| {
            Text::new(annotate(value), (x, y), annotation.clone())
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Chart for CorrelationHeatmap<'_> {
    fn name(&self) -> &'static str {
        "correlation_matrix"
    }

    fn file_name(&self) -> &str {
        self.file_name
    }

    fn draw(&self, path: &Path) -> AnalysisResult<()> {
        self.draw_inner(path).map_err(|e| render_error(self.name(), e))
    }
}

/// Histogram of transaction totals with the density overlay.
pub struct DistributionChart<'a> {
    pub distribution: &'a Distribution,
    pub currency: &'a str,
    pub file_name: &'a str,
}

impl DistributionChart<'_> {
    fn draw_inner(&self, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let hist = &self.distribution.histogram;
        let x_min = hist.edges.first().copied().unwrap_or(0.0);
        let x_max = hist.edges.last().copied().unwrap_or(1.0);
        let peak = self
            .distribution
            .density
            .iter()
            .map(|(_, d)| *d)
            .fold(hist.max_count() as f64, f64::max);
        let y_max = axis_max(std::iter::once(peak));

        let mut chart = ChartBuilder::on(&root)
            .caption("Distribution of transaction revenue", (FONT, 26))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|v| format!("{v:.0}"))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .x_desc(format!("Revenue ({})", self.currency))
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(hist.counts.iter().enumerate().map(|(i, count)| {
            Rectangle::new(
                [(hist.edges[i], 0.0), (hist.edges[i + 1], *count as f64)],
                BLUE.mix(0.45).filled(),
            )
        }))?;

        if !self.distribution.density.is_empty() {
            chart.draw_series(LineSeries::new(
                self.distribution.density.iter().copied(),
                BLUE.stroke_width(2),
            ))?;
        }

        root.present()?;
        Ok(())
    }
}

impl Chart for DistributionChart<'_> {
    fn name(&self) -> &'static str {
        "sales_distribution"
    }

    fn file_name(&self) -> &str {
        self.file_name
    }

    fn draw(&self, path: &Path) -> AnalysisResult<()> {
        self.draw_inner(path).map_err(|e| render_error(self.name(), e))
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Upper axis bound with 5% headroom; never zero.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.filter(|v| v.is_finite()).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

/// Label for an integer slot on a float axis, empty between slots.
fn slot_label<'s>(value: f64, slots: usize, label: impl Fn(usize) -> &'s str) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded as usize >= slots {
        return String::new();
    }
    label(rounded as usize).to_string()
}

fn annotate(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Diverging blue-white-red palette over [-1, 1]; NaN is grey.
pub fn coolwarm(value: f64) -> RGBColor {
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    if value.is_nan() {
        return RGBColor(160, 160, 160);
    }
    let v = value.clamp(-1.0, 1.0);
    let (from, to, t) = if v < 0.0 { (MID, COLD, -v) } else { (MID, WARM, v) };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        assert_eq!(coolwarm(5.0), coolwarm(1.0));
        assert_eq!(coolwarm(f64::NAN), RGBColor(160, 160, 160));
    }

    #[test]
    fn slot_labels_only_on_integer_positions() {
        let names = ["a", "b", "c"];
        assert_eq!(slot_label(1.0, 3, |i| names[i]), "b");
        assert_eq!(slot_label(0.5, 3, |i| names[i]), "");
        assert_eq!(slot_label(3.0, 3, |i| names[i]), "");
        assert_eq!(slot_label(-1.0, 3, |i| names[i]), "");
    }

    #[test]
    fn axis_max_has_headroom_and_floor() {
        assert!((axis_max([10.0, 20.0].into_iter()) - 21.0).abs() < 1e-12);
        assert_eq!(axis_max(std::iter::empty()), 1.0);
        assert_eq!(axis_max([f64::NAN].into_iter()), 1.0);
    }

    #[test]
    fn annotations_use_two_decimals() {
        assert_eq!(annotate(0.123_456), "0.12");
        assert_eq!(annotate(1.0), "1.00");
        assert_eq!(annotate(f64::NAN), "nan");
    }
}

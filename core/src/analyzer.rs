//! Aggregate statistics over a cleaned table.
//!
//! Grouping is a single pass that accumulates `total` per key. Category
//! revenue keeps first-encounter order before a stable descending sort,
//! so ties never reorder between runs.

use crate::{
    dataset::{CleanTable, Column},
    error::{AnalysisError, AnalysisResult},
    stats::{self, Histogram},
    types::Amount,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of x positions the density overlay is sampled at.
pub const DENSITY_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRevenue {
    pub key: String,
    pub revenue: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<Column>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// True when `m[i][j] == m[j][i]` for every pair (NaN equals NaN).
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        let n = self.size();
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self.values[i][j], self.values[j][i]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }
}

/// Histogram of `total` plus a density curve scaled to histogram counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub histogram: Histogram,
    pub density: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub row_count: usize,
    pub mean_total: Amount,
    pub std_total: Amount,
    pub revenue_by_category: Vec<GroupRevenue>,
    pub revenue_by_city: Vec<GroupRevenue>,
    pub correlation: CorrelationMatrix,
    pub total_distribution: Distribution,
}

impl Analysis {
    pub fn top_category(&self) -> Option<&GroupRevenue> {
        self.revenue_by_category.first()
    }

    /// Correlation between unit price and quantity.
    pub fn price_quantity_correlation(&self) -> f64 {
        self.correlation.get(0, 1)
    }
}

pub fn analyze(table: &CleanTable, histogram_bins: usize) -> AnalysisResult<Analysis> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    let totals = table.totals();
    let mean_total = stats::mean(&totals);
    let std_total = stats::population_std(&totals);

    let analysis = Analysis {
        row_count: table.len(),
        mean_total,
        std_total,
        revenue_by_category: revenue_by_category(table),
        revenue_by_city: revenue_by_city(table),
        correlation: correlation(table),
        total_distribution: distribution(&totals, histogram_bins),
    };

    log::debug!(
        "analyzed {} rows: mean={:.2} std={:.2} categories={} cities={}",
        analysis.row_count,
        analysis.mean_total,
        analysis.std_total,
        analysis.revenue_by_category.len(),
        analysis.revenue_by_city.len()
    );
    Ok(analysis)
}

/// Revenue per category, highest first; ties keep first-seen order.
pub fn revenue_by_category(table: &CleanTable) -> Vec<GroupRevenue> {
    let mut groups: Vec<GroupRevenue> = Vec::new();
    for row in table.rows() {
        match groups.iter_mut().find(|g| g.key == row.product_category) {
            Some(group) => group.revenue += row.total(),
            None => groups.push(GroupRevenue {
                key: row.product_category.clone(),
                revenue: row.total(),
            }),
        }
    }
    // sort_by is stable
    groups.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    groups
}

/// Revenue per city, ordered by city name.
pub fn revenue_by_city(table: &CleanTable) -> Vec<GroupRevenue> {
    let mut sums: BTreeMap<&str, Amount> = BTreeMap::new();
    for row in table.rows() {
        *sums.entry(row.city.as_str()).or_insert(0.0) += row.total();
    }
    sums.into_iter()
        .map(|(key, revenue)| GroupRevenue {
            key: key.to_string(),
            revenue,
        })
        .collect()
}

pub fn correlation(table: &CleanTable) -> CorrelationMatrix {
    let columns: Vec<Vec<f64>> = Column::NUMERIC
        .into_iter()
        .map(|c| table.numeric_column(c))
        .collect();
    CorrelationMatrix {
        labels: Column::NUMERIC.to_vec(),
        values: stats::correlation_matrix(&columns),
    }
}

fn distribution(totals: &[f64], bins: usize) -> Distribution {
    let histogram = stats::histogram(totals, bins);
    let scale = totals.len() as f64 * histogram.bin_width();
    let density = stats::gaussian_kde(totals, DENSITY_POINTS)
        .into_iter()
        .map(|(x, d)| (x, d * scale))
        .collect();
    Distribution { histogram, density }
}

//! Descriptive statistics: pure functions over `f64` slices.
//!
//! No dependencies on the table types. Undefined results (empty input,
//! zero variance) are reported as NaN, never as a silent 0.0.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Sample standard deviation (divides by n - 1).
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn centered_sum_of_squares(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum()
}

/// Pearson correlation of two equally long series.
///
/// NaN when either series has zero variance, when lengths differ,
/// or when fewer than two pairs exist. Clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let mx = mean(x);
    let my = mean(y);
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Square correlation matrix over `columns`.
///
/// Symmetric by construction (only the upper triangle is computed).
/// The diagonal is exactly 1.0 for a column with variance, NaN otherwise.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let k = columns.len();
    let mut matrix = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        let has_variance = columns[i].len() >= 2 && centered_sum_of_squares(&columns[i]) > 0.0;
        matrix[i][i] = if has_variance { 1.0 } else { f64::NAN };
        for j in (i + 1)..k {
            let r = pearson(&columns[i], &columns[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    matrix
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if !self.counts.is_empty() => (hi - lo) / self.counts.len() as f64,
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    if lo > hi {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values.iter().filter(|v| v.is_finite()) {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Histogram { edges, counts }
}

/// Scott's rule bandwidth for a Gaussian KDE: sample std * n^(-1/5).
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    sample_std(values) * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density estimate sampled at `points` evenly spaced
/// x positions over the data range. Empty when the bandwidth is
/// undefined (fewer than two values or zero variance).
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let h = scott_bandwidth(values);
    if !h.is_finite() || h <= 0.0 || points < 2 {
        return Vec::new();
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * PI).sqrt());
    let step = (hi - lo) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / h).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}

//! Plain-text formatting of cleaner and analyzer results.
//!
//! Every function here is pure: values in, `String` out. Printing is
//! left to the pipeline.

use crate::{
    analyzer::{Analysis, CorrelationMatrix, GroupRevenue},
    cleaner::MissingReport,
    dataset::{Column, ColumnType},
};
use std::fmt::Write;

pub fn missing_values(report: &MissingReport) -> String {
    let mut out = String::from("Missing values:\n");
    for (column, count) in &report.counts {
        let _ = writeln!(out, "  {:<18}{count:>6}", column.name());
    }
    out
}

pub fn column_types(types: &[(Column, ColumnType)]) -> String {
    let mut out = String::from("Column types:\n");
    for (column, ty) in types {
        let _ = writeln!(out, "  {:<18}{ty:>12}", column.name());
    }
    out
}

pub fn summary_stats(analysis: &Analysis) -> String {
    format!(
        "Mean revenue per transaction: {:.2}\nStandard deviation of revenue: {:.2}\n",
        analysis.mean_total, analysis.std_total
    )
}

pub fn revenue_table(title: &str, groups: &[GroupRevenue]) -> String {
    let mut out = format!("{title}:\n");
    for group in groups {
        let _ = writeln!(out, "  {:<18}{:>12.2}", group.key, group.revenue);
    }
    out
}

pub fn correlation_matrix(matrix: &CorrelationMatrix) -> String {
    let mut out = String::from("Correlation matrix:\n");
    let _ = write!(out, "  {:<18}", "");
    for label in &matrix.labels {
        let _ = write!(out, "{:>12}", label.name());
    }
    out.push('\n');
    for (r, label) in matrix.labels.iter().enumerate() {
        let _ = write!(out, "  {:<18}", label.name());
        for c in 0..matrix.size() {
            let _ = write!(out, "{:>12.4}", matrix.get(r, c));
        }
        out.push('\n');
    }
    out
}

/// The three-line conclusion: top category, mean revenue, and the
/// price/quantity correlation.
pub fn conclusions(analysis: &Analysis, currency: &str) -> [String; 3] {
    let top = match analysis.top_category() {
        Some(g) => format!("1. Top category: {} with revenue {:.2} {currency}", g.key, g.revenue),
        None => "1. Top category: none".to_string(),
    };
    [
        top,
        format!("2. Mean revenue per transaction: {:.2} {currency}", analysis.mean_total),
        format!(
            "3. Correlation between unit price and quantity: {:.2}",
            analysis.price_quantity_correlation()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Distribution;
    use crate::stats::Histogram;

    fn analysis() -> Analysis {
        Analysis {
            row_count: 3,
            mean_total: 123.4,
            std_total: 10.0,
            revenue_by_category: vec![
                GroupRevenue { key: "Home".into(), revenue: 900.5 },
                GroupRevenue { key: "Sports".into(), revenue: 100.0 },
            ],
            revenue_by_city: vec![GroupRevenue { key: "Kazan".into(), revenue: 1000.5 }],
            correlation: CorrelationMatrix {
                labels: Column::NUMERIC.to_vec(),
                values: vec![
                    vec![1.0, -0.034, 0.6],
                    vec![-0.034, 1.0, 0.7],
                    vec![0.6, 0.7, 1.0],
                ],
            },
            total_distribution: Distribution {
                histogram: Histogram { edges: vec![0.0, 1.0], counts: vec![3] },
                density: Vec::new(),
            },
        }
    }

    #[test]
    fn conclusions_read_top_category_and_off_diagonal() {
        let lines = conclusions(&analysis(), "₽");
        assert_eq!(lines[0], "1. Top category: Home with revenue 900.50 ₽");
        assert_eq!(lines[1], "2. Mean revenue per transaction: 123.40 ₽");
        assert_eq!(lines[2], "3. Correlation between unit price and quantity: -0.03");
    }

    #[test]
    fn revenue_table_lists_groups_in_given_order() {
        let a = analysis();
        let text = revenue_table("Revenue by category", &a.revenue_by_category);
        let home = text.find("Home").unwrap();
        let sports = text.find("Sports").unwrap();
        assert!(text.starts_with("Revenue by category:\n"));
        assert!(home < sports);
        assert!(text.contains("900.50"));
    }

    #[test]
    fn correlation_matrix_has_header_and_three_rows() {
        let text = correlation_matrix(&analysis().correlation);
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().contains("unit_price"));
        assert!(text.contains("-0.0340"));
    }
}

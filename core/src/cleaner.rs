//! Missing-value scan, column type report and date normalization.
//!
//! The cleaner never imputes or drops rows. Missing values are only
//! counted: an empty string in a text column, a non-finite value in a
//! float column. Integer and date columns cannot hold a missing value.

use crate::{
    dataset::{CleanTable, Column, ColumnType, DateCell, RawTable, Table},
    error::{AnalysisError, AnalysisResult},
};
use chrono::{NaiveDate, NaiveDateTime};

/// Per-column missing-value counts, in `Column::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReport {
    pub counts: Vec<(Column, usize)>,
}

impl MissingReport {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn count(&self, column: Column) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

pub fn missing_values<D>(table: &Table<D>) -> MissingReport {
    let counts = Column::ALL
        .into_iter()
        .map(|column| {
            let missing = table
                .rows()
                .iter()
                .filter(|row| match (row.text(column), row.numeric(column)) {
                    (Some(text), _) => text.is_empty(),
                    // quantity is an integer column and cannot be missing
                    (_, Some(value)) => column != Column::Quantity && !value.is_finite(),
                    _ => false,
                })
                .count();
            (column, missing)
        })
        .collect();
    MissingReport { counts }
}

/// Resolved type of every column, in `Column::ALL` order.
pub fn column_types<D: DateCell>(_table: &Table<D>) -> Vec<(Column, ColumnType)> {
    Column::ALL
        .into_iter()
        .map(|column| {
            let ty = match column {
                Column::AccountId => ColumnType::Text,
                Column::UnitPrice | Column::Total => ColumnType::Float64,
                Column::Quantity => ColumnType::Int64,
                Column::Date => D::COLUMN_TYPE,
                _ => ColumnType::Categorical,
            };
            (column, ty)
        })
        .collect()
}

/// Convert every raw calendar triple to midnight `NaiveDateTime`.
/// Fails on the first date outside calendar bounds.
pub fn normalize_dates(table: RawTable) -> AnalysisResult<CleanTable> {
    let rows = table
        .into_rows()
        .into_iter()
        .map(|row| {
            let raw = row.date;
            let datetime = NaiveDate::from_ymd_opt(raw.year, raw.month, raw.day)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| AnalysisError::DateOutOfBounds {
                    account_id: row.account_id.clone(),
                    year: raw.year,
                    month: raw.month,
                    day: raw.day,
                })?;
            Ok(row.with_date::<NaiveDateTime>(datetime))
        })
        .collect::<AnalysisResult<Vec<_>>>()?;
    Ok(CleanTable::new(rows))
}

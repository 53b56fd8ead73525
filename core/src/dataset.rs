//! The transaction table and its column schema.
//!
//! A table is typed by how it stores dates: the generator emits
//! `RawTable` (unvalidated calendar triples) and the cleaner turns it
//! into `CleanTable` (`NaiveDateTime`). Only a clean table reaches the
//! analyzer.
//!
//! RULE: `total` is never stored. It is recomputed from
//! `unit_price * quantity` on every read.

use crate::types::{AccountId, Amount};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Schema ───────────────────────────────────────────────────────────────────

/// Every column of the table, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    AccountId,
    Branch,
    City,
    CustomerType,
    Gender,
    ProductCategory,
    UnitPrice,
    Quantity,
    Date,
    Total,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::AccountId,
        Column::Branch,
        Column::City,
        Column::CustomerType,
        Column::Gender,
        Column::ProductCategory,
        Column::UnitPrice,
        Column::Quantity,
        Column::Date,
        Column::Total,
    ];

    /// Columns that enter the correlation matrix, in matrix order.
    pub const NUMERIC: [Column; 3] = [Column::UnitPrice, Column::Quantity, Column::Total];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AccountId => "account_id",
            Self::Branch => "branch",
            Self::City => "city",
            Self::CustomerType => "customer_type",
            Self::Gender => "gender",
            Self::ProductCategory => "product_category",
            Self::UnitPrice => "unit_price",
            Self::Quantity => "quantity",
            Self::Date => "date",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Resolved storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Categorical,
    Float64,
    Int64,
    Date,
    DateTime,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::Categorical => "categorical",
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::Date => "date",
            Self::DateTime => "datetime",
        };
        f.pad(label)
    }
}

// ── Dates ────────────────────────────────────────────────────────────────────

/// A calendar triple as drawn by the generator. Not validated:
/// `2023-02-30` is representable here and rejected by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for RawDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A date representation that can live in the `date` column.
pub trait DateCell: Clone + fmt::Debug {
    const COLUMN_TYPE: ColumnType;
}

impl DateCell for RawDate {
    const COLUMN_TYPE: ColumnType = ColumnType::Date;
}

impl DateCell for NaiveDateTime {
    const COLUMN_TYPE: ColumnType = ColumnType::DateTime;
}

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction<D> {
    pub account_id: AccountId,
    pub branch: String,
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_category: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub date: D,
}

pub type RawTransaction = Transaction<RawDate>;
pub type CleanTransaction = Transaction<NaiveDateTime>;

impl<D> Transaction<D> {
    /// Revenue of this sale.
    pub fn total(&self) -> Amount {
        self.unit_price * f64::from(self.quantity)
    }

    /// Value of a numeric column, `None` for non-numeric columns.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        match column {
            Column::UnitPrice => Some(self.unit_price),
            Column::Quantity => Some(f64::from(self.quantity)),
            Column::Total => Some(self.total()),
            _ => None,
        }
    }

    /// Value of a text column, `None` for non-text columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::AccountId => Some(&self.account_id),
            Column::Branch => Some(&self.branch),
            Column::City => Some(&self.city),
            Column::CustomerType => Some(&self.customer_type),
            Column::Gender => Some(&self.gender),
            Column::ProductCategory => Some(&self.product_category),
            _ => None,
        }
    }

    /// Same record with its date replaced.
    pub fn with_date<E>(self, date: E) -> Transaction<E> {
        Transaction {
            account_id: self.account_id,
            branch: self.branch,
            city: self.city,
            customer_type: self.customer_type,
            gender: self.gender,
            product_category: self.product_category,
            unit_price: self.unit_price,
            quantity: self.quantity,
            date,
        }
    }
}

// ── Table ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Table<D> {
    rows: Vec<Transaction<D>>,
}

pub type RawTable = Table<RawDate>;
pub type CleanTable = Table<NaiveDateTime>;

impl<D> Table<D> {
    pub fn new(rows: Vec<Transaction<D>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction<D>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Transaction<D>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialize a numeric column. Empty for non-numeric columns.
    pub fn numeric_column(&self, column: Column) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.numeric(column)).collect()
    }

    pub fn totals(&self) -> Vec<Amount> {
        self.numeric_column(Column::Total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTransaction {
        Transaction {
            account_id: "ACC-0001".into(),
            branch: "A".into(),
            city: "Kazan".into(),
            customer_type: "Member".into(),
            gender: "Female".into(),
            product_category: "Home".into(),
            unit_price: 12.5,
            quantity: 4,
            date: RawDate { year: 2023, month: 3, day: 9 },
        }
    }

    #[test]
    fn total_tracks_price_and_quantity() {
        let mut txn = sample();
        assert_eq!(txn.total(), 50.0);
        txn.quantity = 2;
        assert_eq!(txn.total(), 25.0);
    }

    #[test]
    fn numeric_accessor_covers_exactly_three_columns() {
        let txn = sample();
        let numeric: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|c| txn.numeric(*c).is_some())
            .collect();
        assert_eq!(numeric, Column::NUMERIC.to_vec());
    }

    #[test]
    fn raw_date_formats_zero_padded() {
        assert_eq!(sample().date.to_string(), "2023-03-09");
    }
}

//! Cleaner: missing-value counts, type report and calendar validation.

use sales_core::{
    cleaner,
    config::{AnalysisConfig, DateSpan, IntRange},
    dataset::{Column, ColumnType, RawDate, RawTable, Transaction},
    error::AnalysisError,
    generator::TransactionGenerator,
    rng::{RngBank, StageSlot},
};

fn generate(config: &AnalysisConfig) -> RawTable {
    let mut rng = RngBank::new(config.seed).for_stage(StageSlot::Generator);
    TransactionGenerator::new(config).generate(&mut rng).unwrap()
}

fn row(id: &str, category: &str, price: f64, date: RawDate) -> Transaction<RawDate> {
    Transaction {
        account_id: id.into(),
        branch: "A".into(),
        city: "Kazan".into(),
        customer_type: "Member".into(),
        gender: "Male".into(),
        product_category: category.into(),
        unit_price: price,
        quantity: 2,
        date,
    }
}

const MARCH_1: RawDate = RawDate { year: 2023, month: 3, day: 1 };

#[test]
fn generated_data_has_no_missing_values() {
    let report = cleaner::missing_values(&generate(&AnalysisConfig::default_test()));
    assert_eq!(report.counts.len(), Column::ALL.len());
    assert_eq!(report.total(), 0);
    assert!(report.counts.iter().all(|(_, n)| *n == 0));
}

#[test]
fn empty_strings_and_nan_prices_are_counted_not_dropped() {
    let table = RawTable::new(vec![
        row("ACC-0001", "", 10.0, MARCH_1),
        row("ACC-0002", "Home", f64::NAN, MARCH_1),
        row("ACC-0003", "", 12.0, MARCH_1),
    ]);
    let report = cleaner::missing_values(&table);

    assert_eq!(report.count(Column::ProductCategory), 2);
    assert_eq!(report.count(Column::UnitPrice), 1);
    // total is derived from the NaN price
    assert_eq!(report.count(Column::Total), 1);
    assert_eq!(report.count(Column::Quantity), 0);
    assert_eq!(report.total(), 4);

    let cleaned = cleaner::normalize_dates(table).unwrap();
    assert_eq!(cleaned.len(), 3, "cleaner must not drop rows");
}

#[test]
fn date_column_type_changes_on_normalization() {
    let raw = generate(&AnalysisConfig::default_test());
    let before = cleaner::column_types(&raw);
    assert!(before.contains(&(Column::Date, ColumnType::Date)));

    let clean = cleaner::normalize_dates(raw).unwrap();
    let after = cleaner::column_types(&clean);
    assert!(after.contains(&(Column::Date, ColumnType::DateTime)));
    assert!(after.contains(&(Column::UnitPrice, ColumnType::Float64)));
    assert!(after.contains(&(Column::Quantity, ColumnType::Int64)));
    assert!(after.contains(&(Column::AccountId, ColumnType::Text)));
    assert!(after.contains(&(Column::City, ColumnType::Categorical)));
}

#[test]
fn normalized_dates_are_midnight_of_the_same_day() {
    let clean = cleaner::normalize_dates(RawTable::new(vec![row("ACC-0001", "Home", 10.0, MARCH_1)])).unwrap();
    assert_eq!(clean.rows()[0].date.to_string(), "2023-03-01 00:00:00");
}

#[test]
fn wider_day_range_surfaces_calendar_violation() {
    let config = AnalysisConfig {
        dates: DateSpan {
            year: 2023,
            months: IntRange { min: 2, max: 2 },
            days: IntRange { min: 29, max: 31 },
        },
        ..AnalysisConfig::default_test()
    };
    let raw = generate(&config);
    let err = cleaner::normalize_dates(raw).unwrap_err();
    match err {
        AnalysisError::DateOutOfBounds { year, month, day, .. } => {
            assert_eq!((year, month), (2023, 2));
            assert!((29..=31).contains(&day));
        }
        other => panic!("expected DateOutOfBounds, got {other:?}"),
    }
}

#[test]
fn leap_day_is_valid_in_leap_year() {
    let leap = RawDate { year: 2024, month: 2, day: 29 };
    let clean = cleaner::normalize_dates(RawTable::new(vec![row("ACC-0001", "Home", 10.0, leap)])).unwrap();
    assert_eq!(clean.rows()[0].date.to_string(), "2024-02-29 00:00:00");
}

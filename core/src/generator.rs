//! Synthetic transaction generation.
//!
//! Draw order is column by column (every branch, then every city, ...)
//! and finally one (month, day) pair per row. Changing the order changes
//! every dataset produced from a given seed.

use crate::{
    config::AnalysisConfig,
    dataset::{RawDate, RawTable, Transaction},
    error::AnalysisResult,
    rng::StageRng,
};

pub struct TransactionGenerator<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> TransactionGenerator<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Produce `n_transactions` independent records.
    pub fn generate(&self, rng: &mut StageRng) -> AnalysisResult<RawTable> {
        self.config.validate()?;
        let n = self.config.n_transactions;

        let branches = sample_column(rng, n, &self.config.branches);
        let cities = sample_column(rng, n, &self.config.cities);
        let customer_types = sample_column(rng, n, &self.config.customer_types);
        let genders = sample_column(rng, n, &self.config.genders);
        let categories = sample_column(rng, n, &self.config.product_categories);

        let price = self.config.unit_price;
        let unit_prices: Vec<f64> = (0..n)
            .map(|_| round_cents(rng.uniform(price.min, price.max)))
            .collect();

        let qty = self.config.quantity;
        let quantities: Vec<u32> = (0..n).map(|_| rng.int_inclusive(qty.min, qty.max)).collect();

        let span = self.config.dates;
        let dates: Vec<RawDate> = (0..n)
            .map(|_| {
                let month = rng.int_inclusive(span.months.min, span.months.max);
                let day = rng.int_inclusive(span.days.min, span.days.max);
                RawDate { year: span.year, month, day }
            })
            .collect();

        let rows = branches
            .into_iter()
            .zip(cities)
            .zip(customer_types)
            .zip(genders)
            .zip(categories)
            .zip(unit_prices)
            .zip(quantities)
            .zip(dates)
            .enumerate()
            .map(
                |(i, (((((((branch, city), customer_type), gender), product_category), unit_price), quantity), date))| {
                    Transaction {
                        account_id: account_id(&self.config.account_prefix, i + 1),
                        branch,
                        city,
                        customer_type,
                        gender,
                        product_category,
                        unit_price,
                        quantity,
                        date,
                    }
                },
            )
            .collect();

        log::debug!("{}: generated {n} transactions", rng.name);
        Ok(RawTable::new(rows))
    }
}

/// `ACC-0001`, `ACC-0002`, ... Sequences past 9999 simply widen.
pub fn account_id(prefix: &str, sequence: usize) -> String {
    format!("{prefix}-{sequence:04}")
}

fn sample_column(rng: &mut StageRng, n: usize, values: &[String]) -> Vec<String> {
    (0..n).map(|_| rng.pick(values).clone()).collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

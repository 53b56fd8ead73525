use crate::{
    error::{AnalysisError, AnalysisResult},
    types::Seed,
};
use serde::{Deserialize, Serialize};

/// Half-open float range `[min, max)` used for uniform sampling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

/// Closed integer range `[min, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Dates are drawn as independent month and day values within one year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub year: i32,
    pub months: IntRange,
    pub days: IntRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartFiles {
    pub by_category: String,
    pub by_city: String,
    pub correlation: String,
    pub distribution: String,
}

/// Every constant a run needs. The binary always uses `standard()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub seed: Seed,
    pub n_transactions: usize,
    pub account_prefix: String,
    pub branches: Vec<String>,
    pub cities: Vec<String>,
    pub customer_types: Vec<String>,
    pub genders: Vec<String>,
    pub product_categories: Vec<String>,
    pub unit_price: FloatRange,
    pub quantity: IntRange,
    pub dates: DateSpan,
    pub histogram_bins: usize,
    pub currency: String,
    pub charts: ChartFiles,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl AnalysisConfig {
    /// The fixed run: 1000 transactions from seed 42 over 2023.
    pub fn standard() -> Self {
        Self {
            seed: 42,
            n_transactions: 1000,
            account_prefix: "ACC".into(),
            branches: strings(&["A", "B", "C"]),
            cities: strings(&["Moscow", "Saint Petersburg", "Kazan"]),
            customer_types: strings(&["Member", "Normal"]),
            genders: strings(&["Male", "Female"]),
            product_categories: strings(&["Electronics", "Fashion", "Groceries", "Home", "Sports"]),
            unit_price: FloatRange { min: 10.0, max: 100.0 },
            quantity: IntRange { min: 1, max: 9 },
            dates: DateSpan {
                year: 2023,
                months: IntRange { min: 1, max: 12 },
                days: IntRange { min: 1, max: 28 },
            },
            histogram_bins: 30,
            currency: "₽".into(),
            charts: ChartFiles {
                by_category: "sales_by_category.png".into(),
                by_city: "sales_by_city.png".into(),
                correlation: "correlation_matrix.png".into(),
                distribution: "sales_distribution.png".into(),
            },
        }
    }

    /// Small deterministic config for tests.
    pub fn default_test() -> Self {
        Self {
            seed: 7,
            n_transactions: 200,
            ..Self::standard()
        }
    }

    /// Parse a (possibly partial) JSON override. Missing keys fall
    /// back to `standard()`. The result is validated.
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sampling bounds the generator cannot honour.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.n_transactions == 0 {
            return Err(AnalysisError::EmptyDataset);
        }

        for (field, values) in [
            ("branch", &self.branches),
            ("city", &self.cities),
            ("customer_type", &self.customer_types),
            ("gender", &self.genders),
            ("product_category", &self.product_categories),
        ] {
            if values.is_empty() {
                return Err(AnalysisError::EmptyValueSet { field });
            }
        }

        let price = self.unit_price;
        if !price.min.is_finite() || !price.max.is_finite() || price.min > price.max {
            return Err(AnalysisError::InvalidRange {
                field: "unit_price",
                min: price.min,
                max: price.max,
            });
        }

        check_int_range("quantity", self.quantity, 0, u32::MAX)?;
        check_int_range("month", self.dates.months, 1, 12)?;
        check_int_range("day", self.dates.days, 1, 31)?;

        if self.histogram_bins == 0 {
            return Err(AnalysisError::InvalidRange {
                field: "histogram_bins",
                min: 1.0,
                max: 0.0,
            });
        }
        Ok(())
    }
}

fn check_int_range(field: &'static str, range: IntRange, floor: u32, ceil: u32) -> AnalysisResult<()> {
    if range.min > range.max || range.min < floor || range.max > ceil {
        return Err(AnalysisError::InvalidRange {
            field,
            min: f64::from(range.min),
            max: f64::from(range.max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_is_valid() {
        AnalysisConfig::standard().validate().unwrap();
        AnalysisConfig::default_test().validate().unwrap();
    }

    #[test]
    fn partial_json_overrides_standard() {
        let config = AnalysisConfig::from_json_str(r#"{"seed": 99, "n_transactions": 10}"#).unwrap();
        assert_eq!(config.seed, 99);
        assert_eq!(config.n_transactions, 10);
        assert_eq!(config.product_categories.len(), 5);
        assert_eq!(config.charts.by_city, "sales_by_city.png");
    }

    #[test]
    fn inverted_price_range_rejected() {
        let config = AnalysisConfig {
            unit_price: FloatRange { min: 50.0, max: 10.0 },
            ..AnalysisConfig::default_test()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidRange { field: "unit_price", .. })
        ));
    }

    #[test]
    fn month_thirteen_rejected() {
        let err = AnalysisConfig::from_json_str(
            r#"{"dates": {"year": 2023, "months": {"min": 1, "max": 13}, "days": {"min": 1, "max": 28}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRange { field: "month", .. }));
    }

    #[test]
    fn empty_value_set_rejected() {
        let config = AnalysisConfig {
            cities: Vec::new(),
            ..AnalysisConfig::default_test()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::EmptyValueSet { field: "city" })
        ));
    }

    #[test]
    fn zero_transactions_rejected() {
        let config = AnalysisConfig {
            n_transactions: 0,
            ..AnalysisConfig::default_test()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::EmptyDataset)));
    }
}

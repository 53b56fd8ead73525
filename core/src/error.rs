use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Invalid range for '{field}': [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Value set for '{field}' is empty")]
    EmptyValueSet { field: &'static str },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Date out of calendar bounds for {account_id}: {year:04}-{month:02}-{day:02}")]
    DateOutOfBounds {
        account_id: String,
        year: i32,
        month: u32,
        day: u32,
    },

    #[error("Render error in '{chart}': {message}")]
    Render {
        chart: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

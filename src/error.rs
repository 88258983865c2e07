use thiserror::Error;

/// Errors raised while loading the salary dataset or the configuration.
/// Wrapped causes are left out of the messages; `{:#}` prints the chain.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("JSON deserialization failed")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("TOML deserialization failed")]
    Toml(#[from] toml::de::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' has type {found}, expected {expected}")]
    ColumnType {
        column: String,
        found: String,
        expected: &'static str,
    },

    #[error("Null value in column '{column}' at row {row}")]
    NullCell { column: String, row: usize },

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

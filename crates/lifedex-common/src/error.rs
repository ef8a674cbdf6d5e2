use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifedexError {
    #[error("Dataset format error: {0}")]
    DataFormat(String),

    #[error("Column not found in dataset: {0}")]
    MissingColumn(String),

    #[error("No categories to rank")]
    EmptyCategorySet,

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LifedexError>;

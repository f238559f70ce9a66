use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Checkout cancelled")]
    Cancelled,
    #[error("Checkout failed: {0}")]
    UnitFailed(String),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;

//! Error types shared by the library modules.
//!
//! Most calculations degrade to safe defaults instead of failing, so this
//! enum only covers the places where a caller handed us something we cannot
//! work with (unknown product names, out-of-range quantities, broken files).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Unknown country code: {0}")]
    UnknownCountryCode(String),

    #[error("Quantity {quantity} for '{product}' is outside the allowed range 0-{max}")]
    QuantityOutOfRange {
        product: String,
        quantity: u32,
        max: u32,
    },

    #[error("Food catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;

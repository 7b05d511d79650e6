use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImmoFinanceError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Insufficient equity: acquisition costs of {acquisition_costs} exceed \
         the available equity by {shortfall}"
    )]
    InsufficientEquity {
        acquisition_costs: Decimal,
        shortfall: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ImmoFinanceError {
    fn from(e: serde_json::Error) -> Self {
        ImmoFinanceError::SerializationError(e.to_string())
    }
}

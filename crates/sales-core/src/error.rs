use sales_domain::SaleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Human-readable detail without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            CoreError::Storage(message)
            | CoreError::Serde(message)
            | CoreError::InvalidOperation(message) => message.clone(),
            CoreError::Io(err) => err.to_string(),
            CoreError::Validation(err) => err.to_string(),
            CoreError::SaleNotFound(id) => format!("sale #{id} does not exist"),
        }
    }
}

/// Reasons a sale candidate is rejected before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product and Customer are required")]
    MissingLabel,
    #[error("Profit cannot be greater than sales amount")]
    ProfitExceedsSales,
    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,
    #[error("Quantity {0} exceeds the supported maximum")]
    QuantityTooLarge(i64),
    #[error("Sales and profit must be non-negative amounts")]
    InvalidAmount,
}

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid product: {0}")]
    InvalidProduct(String),
    #[error("invalid promotion: {0}")]
    InvalidPromotion(String),
    #[error("`{0}` is a non-physical product and cannot hold a quantity other than zero")]
    NonStockedQuantity(String),
    #[error("not enough stock for `{product}`: requested {requested}, available {available}")]
    InsufficientStock { product: String, requested: u32, available: u32 },
    #[error("cannot order more than {maximum} of `{product}` at a time (requested {requested})")]
    PurchaseLimitExceeded { product: String, maximum: u32, requested: u32 },
    #[error("unknown product `{0}`")]
    UnknownProduct(ProductId),
    #[error("`{0}` is not available for purchase")]
    InactiveProduct(String),
    #[error("product id `{0}` is already in the catalog")]
    DuplicateProduct(ProductId),
    #[error("an order needs at least one line")]
    EmptyOrder,
    #[error("price of {quantity} x `{product}` is too large to compute")]
    PriceOverflow { product: String, quantity: u32 },
    #[error("order total is too large to compute")]
    OrderTotalOverflow,
    #[error("combined quantity of `{0}` in one order is too large")]
    QuantityOverflow(ProductId),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl DomainError {
    /// Short message for the shopper, without internal ids or a trailing period.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientStock { product, available, .. } => {
                format!("Not enough stock for '{product}'. Available: {available}")
            }
            Self::PurchaseLimitExceeded { product, maximum, .. } => {
                format!("Cannot order more than {maximum} of '{product}' at a time")
            }
            Self::UnknownProduct(_) => "That product is not in the store".to_string(),
            Self::InactiveProduct(name) => format!("'{name}' is not available right now"),
            Self::EmptyOrder => "The order is empty".to_string(),
            Self::PriceOverflow { product, .. } => {
                format!("The price of '{product}' is too large for that quantity")
            }
            Self::OrderTotalOverflow => "The order total is too large".to_string(),
            Self::QuantityOverflow(_) => "Too many units of one product in this order".to_string(),
            other => other.to_string(),
        }
    }
}

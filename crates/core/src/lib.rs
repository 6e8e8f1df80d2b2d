pub mod config;
pub mod domain;
pub mod errors;
pub mod store;

pub use config::{AppConfig, ConfigError, LoadOptions, LogFormat};
pub use domain::order::{OrderLine, OrderReceipt, ReceiptLine};
pub use domain::product::{Product, ProductId, ProductKind};
pub use domain::promotion::Promotion;
pub use errors::{ApplicationError, DomainError};
pub use store::Catalog;

pub mod catalog;
pub mod pricing;
pub mod seed;

pub use catalog::Catalog;
pub use pricing::{price_line, price_order, PricingResult, PricingTrace, PricingTraceStep};
pub use seed::{build_catalog, builtin_seeds, default_catalog, ProductSeed, SeedKind, SeedPromotion};

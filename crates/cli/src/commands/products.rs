use rust_decimal::Decimal;
use serde::Serialize;
use storefront_core::config::LoadOptions;
use storefront_core::Product;

use crate::commands::{load_store, CommandResult};
use crate::render::Renderer;

#[derive(Debug, Serialize)]
struct ProductView {
    number: usize,
    id: String,
    name: String,
    price: Decimal,
    quantity: Option<u32>,
    max_per_order: Option<u32>,
    promotion: Option<String>,
}

impl ProductView {
    fn new(number: usize, product: &Product) -> Self {
        Self {
            number,
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price(),
            quantity: product.is_stocked().then_some(product.quantity()),
            max_per_order: product.purchase_limit(),
            promotion: product.promotion().map(|promotion| promotion.name()),
        }
    }
}

pub fn run(options: &LoadOptions, json_output: bool) -> CommandResult {
    let (config, catalog) = match load_store("products", options) {
        Ok(loaded) => loaded,
        Err(failure) => return failure,
    };
    let products = catalog.list();

    if json_output {
        let views: Vec<ProductView> = products
            .iter()
            .enumerate()
            .map(|(index, product)| ProductView::new(index + 1, product))
            .collect();
        return match serde_json::to_string_pretty(&views) {
            Ok(output) => CommandResult::text(output),
            Err(error) => CommandResult::failure(
                "products",
                "serialization",
                format!("could not render products: {error}"),
                4,
            ),
        };
    }

    if products.is_empty() {
        return CommandResult::text("No active products available!");
    }
    CommandResult::text(Renderer::from_config(&config.shop).product_lines(&products))
}

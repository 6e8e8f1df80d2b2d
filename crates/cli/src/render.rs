use colored::Colorize;
use rust_decimal::Decimal;
use storefront_core::config::ShopConfig;
use storefront_core::Product;

const BORDER_WIDTH: usize = 50;

const BANNER: &[&str] = &[
    r"  ____  _                  __                 _   ",
    r" / ___|| |_ ___  _ __ ___ / _|_ __ ___  _ __ | |_ ",
    r" \___ \| __/ _ \| '__/ _ \ |_| '__/ _ \| '_ \| __|",
    r"  ___) | || (_) | | |  __/  _| | | (_) | | | | |_ ",
    r" |____/ \__\___/|_|  \___|_| |_|  \___/|_| |_|\__|",
];

/// Terminal styling for the shop. With color off every helper returns plain text.
#[derive(Clone, Debug)]
pub struct Renderer {
    color: bool,
    currency: String,
}

impl Renderer {
    pub fn new(color: bool, currency: impl Into<String>) -> Self {
        Self { color, currency: currency.into() }
    }

    pub fn from_config(shop: &ShopConfig) -> Self {
        Self::new(shop.color, shop.currency_symbol.clone())
    }

    pub fn plain() -> Self {
        Self::new(false, "$")
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.bright_blue().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn notice(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn banner(&self) -> String {
        BANNER.iter().map(|line| self.accent(line)).collect::<Vec<_>>().join("\n")
    }

    pub fn header(&self, title: &str) -> String {
        let border = self.accent(&"=".repeat(BORDER_WIDTH));
        let title = format!("{title:^BORDER_WIDTH$}");
        let title = if self.color { title.bright_blue().bold().to_string() } else { title };
        format!("{border}\n{title}\n{border}")
    }

    pub fn money(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.currency, amount)
    }

    /// Numbered listing, one product per line, starting at 1.
    pub fn product_lines(&self, products: &[&Product]) -> String {
        products
            .iter()
            .enumerate()
            .map(|(index, product)| {
                format!(
                    "{} {}",
                    self.accent(&format!("{}.", index + 1)),
                    product.describe(&self.currency)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

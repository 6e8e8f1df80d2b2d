use std::io::{BufRead, Write};

use anyhow::Result;
use storefront_core::{DomainError, OrderLine, OrderReceipt, Product, ProductId};

use super::{Flow, Session};

const PRODUCT_PROMPT: &str = "Enter product number (or 0 to finish order): ";

enum ProductPick {
    Product(ProductId),
    Finish,
    EndOfInput,
}

/// What the quantity prompt needs to know about one product, given the cart so far.
struct Offer {
    name: String,
    stocked: bool,
    limit: Option<u32>,
    remaining_stock: u32,
    in_cart: u32,
}

impl Offer {
    fn new(product: &Product, in_cart: u32) -> Self {
        Self {
            name: product.name().to_string(),
            stocked: product.is_stocked(),
            limit: product.purchase_limit(),
            remaining_stock: product.quantity().saturating_sub(in_cart),
            in_cart,
        }
    }

    /// Units that could still be added to the cart.
    fn headroom(&self) -> u32 {
        let mut headroom = u32::MAX - self.in_cart;
        if let Some(limit) = self.limit {
            headroom = headroom.min(limit.saturating_sub(self.in_cart));
        }
        if self.stocked {
            headroom = headroom.min(self.remaining_stock);
        }
        headroom
    }
}

/// The cart holds at most one line per product.
fn quantity_in_cart(cart: &[OrderLine], product_id: &ProductId) -> u32 {
    cart.iter()
        .find(|line| &line.product_id == product_id)
        .map_or(0, |line| line.quantity)
}

fn add_to_cart(
    cart: &mut Vec<OrderLine>,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), DomainError> {
    match cart.iter_mut().find(|line| line.product_id == product_id) {
        Some(line) => {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(DomainError::QuantityOverflow(product_id))?;
        }
        None => cart.push(OrderLine::new(product_id, quantity)),
    }
    Ok(())
}

impl<R, W> Session<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(super) fn checkout(&mut self) -> Result<Flow> {
        writeln!(self.output, "{}", self.renderer.header("NEW ORDER"))?;

        let offered: Vec<ProductId> =
            self.catalog.list().iter().map(|product| product.id().clone()).collect();
        if offered.is_empty() {
            writeln!(self.output, "{}", self.renderer.notice("No products available to order!"))?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "{}", self.renderer.notice("Available products:"))?;
        let listing = self.renderer.product_lines(&self.catalog.list());
        writeln!(self.output, "{listing}")?;

        let mut cart: Vec<OrderLine> = Vec::new();
        loop {
            let product_id = match self.pick_product(&offered, &cart)? {
                ProductPick::Product(product_id) => product_id,
                ProductPick::Finish => break,
                ProductPick::EndOfInput => return Ok(Flow::EndOfInput),
            };

            let Some(offer) = self.offer_for(&product_id, &cart) else {
                continue;
            };
            let Some(quantity) = self.pick_quantity(&offer)? else {
                return Ok(Flow::EndOfInput);
            };

            if let Err(error) = add_to_cart(&mut cart, product_id, quantity) {
                writeln!(self.output, "{}", self.renderer.notice(&error.user_message()))?;
                continue;
            }
            let added = format!("Added {quantity} x {} to your order.", offer.name);
            writeln!(self.output, "{}", self.renderer.accent(&added))?;
        }

        self.submit(&cart)?;
        Ok(Flow::Continue)
    }

    fn offer_for(&self, product_id: &ProductId, cart: &[OrderLine]) -> Option<Offer> {
        self.catalog
            .find(product_id)
            .map(|product| Offer::new(product, quantity_in_cart(cart, product_id)))
    }

    fn pick_product(
        &mut self,
        offered: &[ProductId],
        cart: &[OrderLine],
    ) -> Result<ProductPick> {
        loop {
            writeln!(self.output)?;
            let Some(input) = self.prompt(PRODUCT_PROMPT)? else {
                return Ok(ProductPick::EndOfInput);
            };
            if input == "0" {
                return Ok(ProductPick::Finish);
            }

            let Ok(number) = input.parse::<usize>() else {
                let message = "Invalid input. Please enter a number for the product.";
                writeln!(self.output, "{}", self.renderer.notice(message))?;
                continue;
            };
            let Some(product_id) = number.checked_sub(1).and_then(|index| offered.get(index))
            else {
                let message = "Invalid product number. Please try again.";
                writeln!(self.output, "{}", self.renderer.notice(message))?;
                continue;
            };
            let Some(offer) = self.offer_for(product_id, cart) else {
                continue;
            };

            if offer.headroom() == 0 {
                let message = if offer.limit == Some(1) {
                    format!(
                        "Warning: '{}' is limited to one per order and is already in your cart. \
                         Please choose another product.",
                        offer.name
                    )
                } else {
                    format!(
                        "No more '{}' can be added to this order. Please choose another product.",
                        offer.name
                    )
                };
                writeln!(self.output, "{}", self.renderer.notice(&message))?;
                continue;
            }

            return Ok(ProductPick::Product(product_id.clone()));
        }
    }

    /// Reads a quantity the cart can take. `None` at end of input.
    fn pick_quantity(&mut self, offer: &Offer) -> Result<Option<u32>> {
        let available = if offer.stocked {
            format!(" (Available: {})", offer.remaining_stock)
        } else {
            String::new()
        };
        let prompt = format!("Enter quantity for {}{available}: ", offer.name);

        loop {
            let Some(input) = self.prompt(&prompt)? else {
                return Ok(None);
            };

            let quantity = match input.parse::<i64>() {
                Ok(value) if value <= 0 => {
                    let message = "Quantity must be a positive number. Please try again.";
                    writeln!(self.output, "{}", self.renderer.notice(message))?;
                    continue;
                }
                Ok(value) => u32::try_from(value).ok(),
                Err(_) => None,
            };
            let Some(quantity) = quantity else {
                let message = "Invalid input for quantity. Please enter a number.";
                writeln!(self.output, "{}", self.renderer.notice(message))?;
                continue;
            };

            if let Some(limit) = offer.limit {
                if offer.in_cart.saturating_add(quantity) > limit {
                    let message = format!(
                        "Error: Cannot order more than {limit} of '{}' at a time. Please try again.",
                        offer.name
                    );
                    writeln!(self.output, "{}", self.renderer.notice(&message))?;
                    continue;
                }
            }

            if offer.stocked && quantity > offer.remaining_stock {
                let message = format!(
                    "Not enough stock for '{}'. Available: {}. Please try again.",
                    offer.name, offer.remaining_stock
                );
                writeln!(self.output, "{}", self.renderer.notice(&message))?;
                continue;
            }

            if quantity > offer.headroom() {
                let message = format!(
                    "Cannot add {quantity} more of '{}' to this order. Please try again.",
                    offer.name
                );
                writeln!(self.output, "{}", self.renderer.notice(&message))?;
                continue;
            }

            return Ok(Some(quantity));
        }
    }

    fn submit(&mut self, cart: &[OrderLine]) -> Result<()> {
        if cart.is_empty() {
            writeln!(self.output, "{}", self.renderer.notice("Order cancelled or empty."))?;
            return Ok(());
        }

        match self.catalog.place_order(cart) {
            Ok(receipt) => {
                self.summary.orders_placed += 1;
                self.summary.revenue = self.summary.revenue.saturating_add(receipt.total);
                self.print_receipt(&receipt)
            }
            Err(error) => {
                self.summary.orders_failed += 1;
                let message = format!(
                    "Error during order processing: {}. Order cancelled.",
                    error.user_message()
                );
                writeln!(self.output, "{}", self.renderer.notice(&message))?;
                Ok(())
            }
        }
    }

    fn print_receipt(&mut self, receipt: &OrderReceipt) -> Result<()> {
        writeln!(self.output, "{}", self.renderer.header("ORDER SUMMARY"))?;
        for line in &receipt.lines {
            let mut entry = format!(
                "{} x {}: {}",
                line.quantity,
                line.name,
                self.renderer.money(line.total)
            );
            if let Some(promotion) = &line.promotion {
                entry.push_str(&format!(
                    " ({promotion} saved {})",
                    self.renderer.money(line.discount)
                ));
            }
            writeln!(self.output, "{entry}")?;
        }
        writeln!(
            self.output,
            "{} {}",
            self.renderer.notice("Order completed! Total price:"),
            self.renderer.accent(&self.renderer.money(receipt.total))
        )?;
        Ok(())
    }
}

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::order::{merge_lines, OrderLine, OrderReceipt};
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;
use crate::store::pricing::price_order;

/// Ordered, in-memory product list that orders are placed against.
#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
    next_order_number: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self { products: Vec::new(), next_order_number: 1 }
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut catalog = Self::default();
        for product in products {
            catalog.add_product(product)?;
        }
        Ok(catalog)
    }

    pub fn add_product(&mut self, product: Product) -> Result<(), DomainError> {
        if self.position(product.id()).is_some() {
            return Err(DomainError::DuplicateProduct(product.id().clone()));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn remove_product(&mut self, product_id: &ProductId) -> Option<Product> {
        let index = self.position(product_id)?;
        Some(self.products.remove(index))
    }

    /// Active products in catalog order.
    pub fn list(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.is_active()).collect()
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == product_id)
    }

    pub fn find_mut(&mut self, product_id: &ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|product| product.id() == product_id)
    }

    pub fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id() == product_id)
    }

    pub fn total_quantity(&self) -> u64 {
        self.products.iter().map(|product| u64::from(product.quantity())).sum()
    }

    /// Buys `amount` units of one product and returns what they cost.
    pub fn order(&mut self, product_id: &ProductId, amount: u32) -> Result<Decimal, DomainError> {
        self.place_order(&[OrderLine::new(product_id.clone(), amount)])
            .map(|receipt| receipt.total)
    }

    /// Places a multi-line order. Either every line is bought or none is.
    pub fn place_order(&mut self, lines: &[OrderLine]) -> Result<OrderReceipt, DomainError> {
        match self.try_place_order(lines) {
            Ok(receipt) => {
                tracing::info!(
                    event_name = "store.order.placed",
                    order_number = receipt.order_number,
                    line_count = receipt.lines.len(),
                    units = receipt.units(),
                    total = %receipt.total,
                    "order placed"
                );
                Ok(receipt)
            }
            Err(error) => {
                tracing::warn!(
                    event_name = "store.order.rejected",
                    line_count = lines.len(),
                    error = %error,
                    "order rejected"
                );
                Err(error)
            }
        }
    }

    fn try_place_order(&mut self, lines: &[OrderLine]) -> Result<OrderReceipt, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::EmptyOrder);
        }

        let mut resolved = Vec::new();
        for line in merge_lines(lines)? {
            let index = self
                .position(&line.product_id)
                .ok_or_else(|| DomainError::UnknownProduct(line.product_id.clone()))?;
            self.products[index].check_purchase(line.quantity)?;
            resolved.push((index, line.quantity));
        }

        let pricing = {
            let items: Vec<(&Product, u32)> = resolved
                .iter()
                .map(|(index, quantity)| (&self.products[*index], *quantity))
                .collect();
            price_order(&items)?
        };

        for (index, quantity) in &resolved {
            self.products[*index].buy(*quantity)?;
        }

        let order_number = self.next_order_number;
        self.next_order_number += 1;

        Ok(OrderReceipt {
            order_number,
            lines: pricing.lines,
            subtotal: pricing.subtotal,
            discount_total: pricing.discount_total,
            total: pricing.total,
            placed_at: Utc::now(),
            trace: pricing.trace,
        })
    }
}

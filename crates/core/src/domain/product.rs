use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::promotion::Promotion;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    Stocked,
    /// Non-physical goods: no stock is tracked and quantity stays at zero.
    NonStocked,
    /// Stocked goods with a per-order ceiling.
    Limited { maximum: u32 },
}

/// Built only through the validating constructors; config files go through `ProductSeed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Decimal,
    quantity: u32,
    active: bool,
    kind: ProductKind,
    promotion: Option<Promotion>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        Self::build(id.into(), name.into(), price, quantity, ProductKind::Stocked)
    }

    pub fn non_stocked(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        Self::build(id.into(), name.into(), price, 0, ProductKind::NonStocked)
    }

    pub fn limited(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        maximum: u32,
    ) -> Result<Self, DomainError> {
        Self::build(id.into(), name.into(), price, quantity, ProductKind::Limited { maximum })
    }

    fn build(
        id: String,
        name: String,
        price: Decimal,
        quantity: u32,
        kind: ProductKind,
    ) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::InvalidProduct("product id cannot be empty".to_string()));
        }
        if name.trim().is_empty() {
            return Err(DomainError::InvalidProduct("name cannot be empty".to_string()));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::InvalidProduct(format!(
                "price of `{name}` cannot be negative"
            )));
        }

        Ok(Self { id: ProductId(id), name, price, quantity, active: true, kind, promotion: None })
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Result<Self, DomainError> {
        self.set_promotion(promotion)?;
        Ok(self)
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    pub fn set_promotion(&mut self, promotion: Promotion) -> Result<(), DomainError> {
        promotion.validate()?;
        self.promotion = Some(promotion);
        Ok(())
    }

    pub fn clear_promotion(&mut self) {
        self.promotion = None;
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_stocked(&self) -> bool {
        self.kind != ProductKind::NonStocked
    }

    pub fn purchase_limit(&self) -> Option<u32> {
        match self.kind {
            ProductKind::Limited { maximum } => Some(maximum),
            _ => None,
        }
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), DomainError> {
        if !self.is_stocked() {
            return Err(DomainError::NonStockedQuantity(self.name.clone()));
        }

        self.quantity = quantity;
        if quantity == 0 {
            self.active = false;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Checks that `amount` units could be bought right now, without touching stock.
    pub fn check_purchase(&self, amount: u32) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::InactiveProduct(self.name.clone()));
        }

        if let ProductKind::Limited { maximum } = self.kind {
            if amount > maximum {
                return Err(DomainError::PurchaseLimitExceeded {
                    product: self.name.clone(),
                    maximum,
                    requested: amount,
                });
            }
        }

        if self.is_stocked() && amount > self.quantity {
            return Err(DomainError::InsufficientStock {
                product: self.name.clone(),
                requested: amount,
                available: self.quantity,
            });
        }

        Ok(())
    }

    /// Price of `amount` units, promotion included.
    pub fn price_for(&self, amount: u32) -> Result<Decimal, DomainError> {
        let price = match &self.promotion {
            Some(promotion) => promotion.apply(self.price, amount),
            None => self.price.checked_mul(Decimal::from(amount)),
        };
        price.ok_or_else(|| DomainError::PriceOverflow {
            product: self.name.clone(),
            quantity: amount,
        })
    }

    pub fn buy(&mut self, amount: u32) -> Result<Decimal, DomainError> {
        self.check_purchase(amount)?;
        let price = self.price_for(amount)?;

        if self.is_stocked() {
            self.quantity -= amount;
            if self.quantity == 0 {
                self.active = false;
            }
        }

        Ok(price)
    }

    /// One-line listing entry with prices shown in `currency`.
    pub fn describe(&self, currency: &str) -> String {
        let mut line = format!("{}, Price: {currency}{:.2}", self.name, self.price);
        match self.kind {
            ProductKind::Stocked => line.push_str(&format!(", Quantity: {}", self.quantity)),
            ProductKind::NonStocked => line.push_str(", non-physical product - Not Stocked"),
            ProductKind::Limited { maximum } => line
                .push_str(&format!(", Quantity: {}, Max Purchase: {maximum}", self.quantity)),
        }
        if let Some(promotion) = &self.promotion {
            line.push_str(&format!(", Promotion: {promotion}"));
        }
        line
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

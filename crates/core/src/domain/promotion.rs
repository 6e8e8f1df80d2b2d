use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Pricing rule attached to a single product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Promotion {
    /// Every second unit is sold at half price.
    SecondHalfPrice,
    /// Every third unit is free.
    ThirdOneFree,
    PercentDiscount { percent: Decimal },
}

impl Promotion {
    pub fn percent_discount(percent: Decimal) -> Result<Self, DomainError> {
        let promotion = Self::PercentDiscount { percent };
        promotion.validate()?;
        Ok(promotion)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if let Self::PercentDiscount { percent } = self {
            if *percent < Decimal::ZERO || *percent > Decimal::ONE_HUNDRED {
                return Err(DomainError::InvalidPromotion(format!(
                    "percent discount must be in range 0..=100, got {percent}"
                )));
            }
        }
        Ok(())
    }

    pub fn name(&self) -> String {
        match self {
            Self::SecondHalfPrice => "Second Half price!".to_string(),
            Self::ThirdOneFree => "Third One Free!".to_string(),
            Self::PercentDiscount { percent } => format!("{}% off!", percent.normalize()),
        }
    }

    /// Price of `quantity` units at `unit_price` with this promotion applied.
    /// `None` when the result does not fit in a `Decimal`.
    pub fn apply(&self, unit_price: Decimal, quantity: u32) -> Option<Decimal> {
        let units = Decimal::from(quantity);
        match self {
            Self::SecondHalfPrice => {
                let half_priced = Decimal::from(quantity / 2);
                let full_priced = units - half_priced;
                let half_price = unit_price.checked_div(Decimal::TWO)?;
                unit_price
                    .checked_mul(full_priced)?
                    .checked_add(half_price.checked_mul(half_priced)?)
            }
            Self::ThirdOneFree => {
                let payable = Decimal::from(quantity - quantity / 3);
                unit_price.checked_mul(payable)
            }
            Self::PercentDiscount { percent } => {
                let kept = (Decimal::ONE_HUNDRED - *percent).checked_div(Decimal::ONE_HUNDRED)?;
                unit_price.checked_mul(kept)?.checked_mul(units)
            }
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

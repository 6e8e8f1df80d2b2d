use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::order::ReceiptLine;
use crate::domain::product::Product;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTraceStep {
    pub stage: String,
    pub detail: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTrace {
    pub steps: Vec<PricingTraceStep>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Decimal,
    pub discount_total: Decimal,
    pub total: Decimal,
    pub trace: PricingTrace,
}

pub fn price_line(product: &Product, quantity: u32) -> Result<ReceiptLine, DomainError> {
    let subtotal = product.price().checked_mul(Decimal::from(quantity)).ok_or_else(|| {
        DomainError::PriceOverflow { product: product.name().to_string(), quantity }
    })?;
    let total = product.price_for(quantity)?;

    Ok(ReceiptLine {
        product_id: product.id().clone(),
        name: product.name().to_string(),
        quantity,
        unit_price: product.price(),
        subtotal,
        discount: subtotal - total,
        total,
        promotion: product.promotion().map(|promotion| promotion.name()),
    })
}

fn checked_sum(mut amounts: impl Iterator<Item = Decimal>) -> Result<Decimal, DomainError> {
    amounts.try_fold(Decimal::ZERO, |sum, amount| {
        sum.checked_add(amount).ok_or(DomainError::OrderTotalOverflow)
    })
}

pub fn price_order(items: &[(&Product, u32)]) -> Result<PricingResult, DomainError> {
    let lines = items
        .iter()
        .map(|(product, quantity)| price_line(product, *quantity))
        .collect::<Result<Vec<_>, _>>()?;

    let subtotal = checked_sum(lines.iter().map(|line| line.subtotal))?;
    let discount_total = checked_sum(lines.iter().map(|line| line.discount))?;
    let total = subtotal - discount_total;

    let mut steps: Vec<PricingTraceStep> = lines
        .iter()
        .map(|line| PricingTraceStep {
            stage: format!("line:{}", line.product_id),
            detail: match &line.promotion {
                Some(promotion) => format!("{} x {} with {promotion}", line.quantity, line.name),
                None => format!("{} x {}", line.quantity, line.name),
            },
            amount: line.total,
        })
        .collect();
    steps.push(PricingTraceStep {
        stage: "total".to_string(),
        detail: "sum(line totals)".to_string(),
        amount: total,
    });

    Ok(PricingResult { lines, subtotal, discount_total, total, trace: PricingTrace { steps } })
}

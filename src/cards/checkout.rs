use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::rules::DiscountResult;

const CENTS: u32 = 2;

/// Amounts charged once a discount has been applied to a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    pub original_amount: Decimal,
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
    pub benefit: Option<String>,
}

impl PurchaseQuote {
    /// Apply `discount` to `amount`, rounding both the discount and the final
    /// charge to cents with round-half-to-even.
    pub fn price(amount: Decimal, discount: &DiscountResult) -> Self {
        let discount_applied = round_cents(amount * discount.rate);
        let final_amount = round_cents(amount - discount_applied);

        Self {
            original_amount: amount,
            discount_applied,
            final_amount,
            benefit: discount.benefit.clone(),
        }
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointNearestEven)
}

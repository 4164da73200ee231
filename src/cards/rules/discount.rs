use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::CardTier;

const MON_WED: &[Weekday] = &[Weekday::Mon, Weekday::Tue, Weekday::Wed];
const MON_FRI: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];
const SATURDAY: &[Weekday] = &[Weekday::Sat];
const WEEKEND: &[Weekday] = &[Weekday::Sat, Weekday::Sun];

const ABROAD: DiscountRule = DiscountRule {
    condition: DiscountCondition::Abroad,
    rate_percent: 5,
    label: "Abroad 5%",
};

const GOLD_RULES: &[DiscountRule] = &[DiscountRule {
    condition: DiscountCondition::DaysOver {
        days: MON_WED,
        threshold: 100,
    },
    rate_percent: 15,
    label: "Mon-Wed 15%",
}];

const PLATINUM_RULES: &[DiscountRule] = &[
    ABROAD,
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: MON_WED,
            threshold: 100,
        },
        rate_percent: 20,
        label: "Mon-Wed 20%",
    },
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: SATURDAY,
            threshold: 200,
        },
        rate_percent: 30,
        label: "Saturday 30%",
    },
];

const BLACK_RULES: &[DiscountRule] = &[
    ABROAD,
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: MON_WED,
            threshold: 100,
        },
        rate_percent: 25,
        label: "Mon-Wed 25%",
    },
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: SATURDAY,
            threshold: 200,
        },
        rate_percent: 35,
        label: "Saturday 35%",
    },
];

const WHITE_RULES: &[DiscountRule] = &[
    ABROAD,
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: MON_FRI,
            threshold: 100,
        },
        rate_percent: 25,
        label: "Mon-Fri 25%",
    },
    DiscountRule {
        condition: DiscountCondition::DaysOver {
            days: WEEKEND,
            threshold: 200,
        },
        rate_percent: 35,
        label: "Weekend 35%",
    },
];

/// Trigger for a single discount rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountCondition {
    /// Purchase country differs from the client's residence country.
    Abroad,
    /// Purchase falls on one of `days` and the amount strictly exceeds `threshold`.
    DaysOver {
        days: &'static [Weekday],
        threshold: u32,
    },
}

/// One row of a tier's discount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountRule {
    pub condition: DiscountCondition,
    pub rate_percent: u32,
    pub label: &'static str,
}

impl DiscountRule {
    pub fn rate(&self) -> Decimal {
        Decimal::new(i64::from(self.rate_percent), 2)
    }

    fn matches(
        &self,
        amount: Decimal,
        weekday: Weekday,
        purchase_country: &str,
        client_country: &str,
    ) -> bool {
        match self.condition {
            DiscountCondition::Abroad => purchase_country != client_country,
            DiscountCondition::DaysOver { days, threshold } => {
                days.contains(&weekday) && amount > Decimal::from(threshold)
            }
        }
    }
}

/// Discount rate and the benefit label of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub rate: Decimal,
    pub benefit: Option<String>,
}

impl DiscountResult {
    pub fn none() -> Self {
        Self {
            rate: Decimal::ZERO,
            benefit: None,
        }
    }

    pub fn is_discounted(&self) -> bool {
        !self.rate.is_zero()
    }
}

impl From<&DiscountRule> for DiscountResult {
    fn from(rule: &DiscountRule) -> Self {
        Self {
            rate: rule.rate(),
            benefit: Some(rule.label.to_string()),
        }
    }
}

/// Ordered discount table for `tier`. Earlier rows take priority.
pub fn discount_rules(tier: CardTier) -> &'static [DiscountRule] {
    match tier {
        CardTier::Classic => &[],
        CardTier::Gold => GOLD_RULES,
        CardTier::Platinum => PLATINUM_RULES,
        CardTier::Black => BLACK_RULES,
        CardTier::White => WHITE_RULES,
    }
}

/// Compute the discount for an authorized purchase.
///
/// The first matching rule wins and rules never stack. For Platinum, Black and
/// White the abroad rule sits first, so a foreign purchase earns 5% even when a
/// weekday or weekend rule would pay more. `purchase_date` is read in whatever
/// calendar the caller supplied; no timezone conversion happens here.
pub fn calculate_discount(
    tier: CardTier,
    amount: Decimal,
    purchase_date: NaiveDateTime,
    purchase_country: &str,
    client_country: &str,
) -> DiscountResult {
    let weekday = purchase_date.weekday();

    discount_rules(tier)
        .iter()
        .find(|rule| rule.matches(amount, weekday, purchase_country, client_country))
        .map(DiscountResult::from)
        .unwrap_or_else(DiscountResult::none)
}

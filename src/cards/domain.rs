use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::rules::{self, DiscountResult, Verdict};

/// Loyalty card levels, from the entry-level Classic card up to White.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardTier {
    Classic,
    Gold,
    Platinum,
    Black,
    White,
}

impl CardTier {
    pub const ALL: [CardTier; 5] = [
        CardTier::Classic,
        CardTier::Gold,
        CardTier::Platinum,
        CardTier::Black,
        CardTier::White,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CardTier::Classic => "Classic",
            CardTier::Gold => "Gold",
            CardTier::Platinum => "Platinum",
            CardTier::Black => "Black",
            CardTier::White => "White",
        }
    }

    /// Enrollment and usage constraints attached to the tier.
    pub fn policy(self) -> TierPolicy {
        match self {
            CardTier::Classic => TierPolicy {
                minimum_income: None,
                requires_membership: false,
                restricts_banned_countries: false,
            },
            CardTier::Gold => TierPolicy {
                minimum_income: Some(dec!(500)),
                requires_membership: false,
                restricts_banned_countries: false,
            },
            CardTier::Platinum => TierPolicy {
                minimum_income: Some(dec!(1000)),
                requires_membership: true,
                restricts_banned_countries: false,
            },
            CardTier::Black | CardTier::White => TierPolicy {
                minimum_income: Some(dec!(2000)),
                requires_membership: true,
                restricts_banned_countries: true,
            },
        }
    }
}

impl fmt::Display for CardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CardTier {
    type Err = InvalidInput;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CardTier::ALL
            .into_iter()
            .find(|tier| tier.label() == value)
            .ok_or_else(|| InvalidInput::UnknownTier(value.to_string()))
    }
}

/// Per-tier enrollment dial consumed by the eligibility evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    pub minimum_income: Option<Decimal>,
    pub requires_membership: bool,
    /// Black and White holders may neither reside in nor purchase from a banned country.
    pub restricts_banned_countries: bool,
}

/// Caller contract violations. These never surface as business rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("unknown card tier '{0}'")]
    UnknownTier(String),
    #[error("purchase amount must be positive, found {0}")]
    NonPositiveAmount(Decimal),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("unparseable purchase date '{0}'")]
    InvalidDate(String),
}

/// Registration attempt as seen by the eligibility evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub tier: CardTier,
    pub monthly_income: Decimal,
    pub is_member: bool,
    pub country: String,
}

impl EligibilityRequest {
    pub fn evaluate(&self) -> Verdict {
        rules::evaluate_eligibility(
            self.tier,
            self.monthly_income,
            self.is_member,
            &self.country,
        )
    }
}

/// Purchase attempt as seen by the authorizer and the discount calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseContext {
    pub tier: CardTier,
    pub amount: Decimal,
    pub purchase_date: NaiveDateTime,
    pub purchase_country: String,
    pub client_country: String,
}

impl PurchaseContext {
    pub fn authorize(&self) -> Verdict {
        rules::authorize_purchase(self.tier, &self.purchase_country)
    }

    pub fn discount(&self) -> DiscountResult {
        rules::calculate_discount(
            self.tier,
            self.amount,
            self.purchase_date,
            &self.purchase_country,
            &self.client_country,
        )
    }
}

/// Parse a purchase timestamp into the calendar-local date-time it names.
///
/// Accepts RFC 3339 (the offset is kept, so the weekday is the one the caller
/// wrote), a naive `YYYY-MM-DDTHH:MM[:SS[.f]]` timestamp, or a bare date.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDateTime, InvalidInput> {
    let trimmed = raw.trim();

    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(stamp.naive_local());
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(stamp);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()))
        .map_err(|_| InvalidInput::InvalidDate(raw.to_string()))
}

pub(crate) fn deserialize_purchase_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_purchase_date(&raw).map_err(serde::de::Error::custom)
}

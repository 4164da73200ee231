use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::domain::CardTier;

/// Outcome of the eligibility evaluator and the purchase authorizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Approved { message: String },
    Rejected(RejectionReason),
}

impl Verdict {
    pub(crate) fn approved(message: &str) -> Self {
        Verdict::Approved {
            message: message.to_string(),
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, Verdict::Approved { .. })
    }

    pub fn message(&self) -> String {
        match self {
            Verdict::Approved { message } => message.clone(),
            Verdict::Rejected(reason) => reason.summary(),
        }
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Verdict::Approved { .. } => None,
            Verdict::Rejected(reason) => Some(reason),
        }
    }
}

/// Business reasons a registration or purchase is turned down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    InsufficientIncome { tier: CardTier, required: Decimal },
    MembershipRequired { tier: CardTier },
    BannedResidence { tier: CardTier, country: String },
    BannedPurchaseCountry { tier: CardTier, country: String },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            RejectionReason::InsufficientIncome { tier, required } => format!(
                "income too low for {tier}: minimum monthly income is {required} USD"
            ),
            RejectionReason::MembershipRequired { tier } => {
                format!("{tier} card requires membership program enrollment")
            }
            RejectionReason::BannedResidence { tier, country } => {
                format!("client with {tier} card cannot reside in {country}")
            }
            RejectionReason::BannedPurchaseCountry { tier, country } => {
                format!("client with {tier} card cannot purchase from {country}")
            }
        }
    }
}

use rust_decimal::Decimal;

use super::super::domain::CardTier;
use super::reference::is_banned_country;
use super::verdict::{RejectionReason, Verdict};

const ELIGIBLE: &str = "client eligible";

/// Decide whether an applicant may enroll in `tier`.
///
/// Checks run in a fixed order (income, membership, residence) and the first
/// failure is reported. Negative incomes are not rejected up front; they simply
/// fail whichever income floor the tier carries.
pub fn evaluate_eligibility(
    tier: CardTier,
    monthly_income: Decimal,
    is_member: bool,
    country: &str,
) -> Verdict {
    let policy = tier.policy();

    if let Some(required) = policy.minimum_income {
        if monthly_income < required {
            return Verdict::Rejected(RejectionReason::InsufficientIncome { tier, required });
        }
    }

    if policy.requires_membership && !is_member {
        return Verdict::Rejected(RejectionReason::MembershipRequired { tier });
    }

    if policy.restricts_banned_countries && is_banned_country(country) {
        return Verdict::Rejected(RejectionReason::BannedResidence {
            tier,
            country: country.to_string(),
        });
    }

    Verdict::approved(ELIGIBLE)
}

use super::super::domain::CardTier;
use super::reference::is_banned_country;
use super::verdict::{RejectionReason, Verdict};

const AUTHORIZED: &str = "purchase authorized";

/// Decide whether a holder of `tier` may purchase from `purchase_country`.
///
/// Only restricted tiers (Black, White) are ever refused; lower tiers may shop
/// from banned countries.
pub fn authorize_purchase(tier: CardTier, purchase_country: &str) -> Verdict {
    if tier.policy().restricts_banned_countries && is_banned_country(purchase_country) {
        return Verdict::Rejected(RejectionReason::BannedPurchaseCountry {
            tier,
            country: purchase_country.to_string(),
        });
    }

    Verdict::approved(AUTHORIZED)
}

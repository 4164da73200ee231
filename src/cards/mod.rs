//! Loyalty card program: tier eligibility, purchase authorization and discounts.
//!
//! The decision logic lives in [`rules`] and is pure. [`service`] and [`router`]
//! wrap it with client storage and an HTTP surface.

pub mod checkout;
pub mod domain;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use checkout::PurchaseQuote;
pub use domain::{
    parse_purchase_date, CardTier, EligibilityRequest, InvalidInput, PurchaseContext, TierPolicy,
};
pub use repository::{ClientId, ClientRecord, ClientRepository, PurchaseRecord, RepositoryError};
pub use router::card_router;
pub use rules::{
    authorize_purchase, calculate_discount, evaluate_eligibility, DiscountResult,
    RejectionReason, Verdict,
};
pub use service::{
    CardProgramService, CardServiceError, ClientRegistration, PurchaseOutcome, PurchaseReceipt,
    PurchaseRequest, RegistrationOutcome,
};

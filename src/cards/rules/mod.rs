//! Pure decision procedures for the card program.
//!
//! None of these functions touch I/O or shared mutable state, so callers may
//! invoke them from any thread without coordination.

mod authorization;
mod discount;
mod eligibility;
pub mod reference;
mod verdict;

pub use authorization::authorize_purchase;
pub use discount::{
    calculate_discount, discount_rules, DiscountCondition, DiscountResult, DiscountRule,
};
pub use eligibility::evaluate_eligibility;
pub use reference::{is_banned_country, BANNED_COUNTRIES};
pub use verdict::{RejectionReason, Verdict};

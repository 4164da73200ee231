use super::common::*;
use chrono::Weekday;
use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::cards::domain::{CardTier, InvalidInput};
use crate::cards::repository::{ClientId, RepositoryError};
use crate::cards::rules::RejectionReason;
use crate::cards::service::{
    CardProgramService, CardServiceError, PurchaseOutcome, PurchaseRequest, RegistrationOutcome,
};

#[test]
fn register_assigns_sequential_ids() {
    let (repository, service) = service();

    let first = service
        .register(registration(CardTier::Classic, dec!(300), false, "USA"))
        .expect("registration succeeds");
    let second = service
        .register(registration(CardTier::Gold, dec!(700), false, "USA"))
        .expect("registration succeeds");

    match (first, second) {
        (
            RegistrationOutcome::Registered { client: a, message },
            RegistrationOutcome::Registered { client: b, .. },
        ) => {
            assert_eq!(a.id, ClientId(1));
            assert_eq!(b.id, ClientId(2));
            assert_eq!(message, "client eligible");
        }
        other => panic!("expected two registrations, got {other:?}"),
    }
    assert_eq!(repository.client_count(), 2);
}

#[test]
fn rejected_registration_is_not_stored() {
    let (repository, service) = service();

    let outcome = service
        .register(registration(CardTier::Black, dec!(2500), true, "China"))
        .expect("evaluation completes");

    assert_eq!(
        outcome,
        RegistrationOutcome::Rejected(RejectionReason::BannedResidence {
            tier: CardTier::Black,
            country: "China".to_string(),
        })
    );
    assert_eq!(repository.client_count(), 0);
}

#[test]
fn register_requires_name_and_country() {
    let (_, service) = service();
    let mut blank_name = registration(CardTier::Classic, dec!(100), false, "USA");
    blank_name.name = "  ".to_string();

    match service.register(blank_name) {
        Err(CardServiceError::InvalidInput(InvalidInput::MissingField("name"))) => {}
        other => panic!("expected missing name, got {other:?}"),
    }

    match service.register(registration(CardTier::Classic, dec!(100), false, "")) {
        Err(CardServiceError::InvalidInput(InvalidInput::MissingField("country"))) => {}
        other => panic!("expected missing country, got {other:?}"),
    }
}

#[test]
fn purchase_prices_and_records_discount() {
    let (repository, service) = service();
    let client = register_ok(&service, CardTier::Platinum, "USA");

    let outcome = service
        .purchase(purchase(client, dec!(150), on(Weekday::Wed), "USA"))
        .expect("purchase completes");

    let receipt = match outcome {
        PurchaseOutcome::Approved(receipt) => receipt,
        other => panic!("expected approval, got {other:?}"),
    };
    assert_eq!(receipt.client_id, client);
    assert_eq!(receipt.quote.discount_applied, dec!(30));
    assert_eq!(receipt.quote.final_amount, dec!(120));
    assert_eq!(receipt.quote.benefit.as_deref(), Some("Mon-Wed 20%"));

    let history = service.purchases(&client).expect("history loads");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].currency, "USD");
    assert_eq!(history[0].final_amount, dec!(120));
    assert_eq!(repository.purchase_count(), 1);
}

#[test]
fn purchase_uses_client_residence_for_abroad_rule() {
    let (_, service) = service();
    let client = register_ok(&service, CardTier::White, "USA");

    let outcome = service
        .purchase(purchase(client, dec!(300), on(Weekday::Sun), "Italy"))
        .expect("purchase completes");

    match outcome {
        PurchaseOutcome::Approved(receipt) => {
            assert_eq!(receipt.quote.benefit.as_deref(), Some("Abroad 5%"));
            assert_eq!(receipt.quote.final_amount, dec!(285));
        }
        other => panic!("expected approval, got {other:?}"),
    }
}

#[test]
fn banned_purchase_is_rejected_and_not_recorded() {
    let (repository, service) = service();
    let client = register_ok(&service, CardTier::Black, "USA");

    let outcome = service
        .purchase(purchase(client, dec!(200), on(Weekday::Wed), "China"))
        .expect("authorization completes");

    assert_eq!(
        outcome,
        PurchaseOutcome::Rejected(RejectionReason::BannedPurchaseCountry {
            tier: CardTier::Black,
            country: "China".to_string(),
        })
    );
    assert_eq!(repository.purchase_count(), 0);
}

#[test]
fn purchase_rejects_non_positive_amounts() {
    let (_, service) = service();
    let client = register_ok(&service, CardTier::Gold, "USA");

    match service.purchase(purchase(client, dec!(0), on(Weekday::Mon), "USA")) {
        Err(CardServiceError::InvalidInput(InvalidInput::NonPositiveAmount(amount))) => {
            assert_eq!(amount, dec!(0));
        }
        other => panic!("expected invalid amount, got {other:?}"),
    }
}

#[test]
fn purchase_payload_accepts_minute_precision_dates() {
    let request: PurchaseRequest = serde_json::from_str(
        r#"{"clientId":1,"amount":150,"purchaseDate":"2025-10-13T10:00","purchaseCountry":"USA"}"#,
    )
    .expect("payload parses");

    let monday_ten = chrono::NaiveDate::from_ymd_opt(2025, 10, 13)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .expect("valid purchase time");
    assert_eq!(request.purchase_date, monday_ten);
    assert_eq!(request.currency, "USD");
}

#[test]
fn purchase_for_unknown_client_is_not_found() {
    let (_, service) = service();

    match service.purchase(purchase(ClientId(42), dec!(10), on(Weekday::Mon), "USA")) {
        Err(CardServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn repository_failures_propagate() {
    let service = CardProgramService::new(Arc::new(UnavailableRepository));

    match service.register(registration(CardTier::Classic, dec!(100), false, "USA")) {
        Err(CardServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

fn register_ok(service: &CardProgramService<MemoryRepository>, tier: CardTier, country: &str) -> ClientId {
    match service
        .register(registration(tier, dec!(3000), true, country))
        .expect("registration succeeds")
    {
        RegistrationOutcome::Registered { client, .. } => client.id,
        other => panic!("expected registration, got {other:?}"),
    }
}

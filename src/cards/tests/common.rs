use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::cards::domain::CardTier;
use crate::cards::repository::{
    ClientId, ClientRecord, ClientRepository, PurchaseRecord, RepositoryError,
};
use crate::cards::service::{CardProgramService, ClientRegistration, PurchaseRequest};

/// Noon on the given weekday during the week starting Monday 2025-10-13.
pub(super) fn on(weekday: Weekday) -> NaiveDateTime {
    let monday = NaiveDate::from_ymd_opt(2025, 10, 13).expect("valid date");
    let offset = u64::from(weekday.num_days_from_monday());
    monday
        .checked_add_days(chrono::Days::new(offset))
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid purchase time")
}

pub(super) fn registration(
    tier: CardTier,
    income: Decimal,
    is_member: bool,
    country: &str,
) -> ClientRegistration {
    ClientRegistration {
        name: format!("{tier} applicant"),
        country: country.to_string(),
        monthly_income: income,
        is_member,
        tier,
    }
}

pub(super) fn purchase(
    client_id: ClientId,
    amount: Decimal,
    purchase_date: NaiveDateTime,
    purchase_country: &str,
) -> PurchaseRequest {
    PurchaseRequest {
        client_id,
        amount,
        currency: "USD".to_string(),
        purchase_date,
        purchase_country: purchase_country.to_string(),
    }
}

pub(super) fn service() -> (Arc<MemoryRepository>, CardProgramService<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CardProgramService::new(repository.clone());
    (repository, service)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    clients: Mutex<HashMap<ClientId, ClientRecord>>,
    purchases: Mutex<Vec<PurchaseRecord>>,
}

impl MemoryRepository {
    pub(super) fn client_count(&self) -> usize {
        self.clients.lock().expect("clients mutex poisoned").len()
    }

    pub(super) fn purchase_count(&self) -> usize {
        self.purchases.lock().expect("purchases mutex poisoned").len()
    }
}

impl ClientRepository for MemoryRepository {
    fn insert_client(&self, record: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        let mut guard = self.clients.lock().expect("clients mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_client(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        let guard = self.clients.lock().expect("clients mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_purchase(&self, record: PurchaseRecord) -> Result<PurchaseRecord, RepositoryError> {
        let mut guard = self.purchases.lock().expect("purchases mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }

    fn purchases_for(&self, id: &ClientId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        let guard = self.purchases.lock().expect("purchases mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| record.client_id == *id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl ClientRepository for UnavailableRepository {
    fn insert_client(&self, _record: ClientRecord) -> Result<ClientRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_client(&self, _id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_purchase(&self, _record: PurchaseRecord) -> Result<PurchaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn purchases_for(&self, _id: &ClientId) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

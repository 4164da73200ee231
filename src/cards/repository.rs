use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::CardTier;

/// Identifier assigned to a client once registration is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

/// Registered card holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    pub is_member: bool,
    pub tier: CardTier,
}

/// Approved purchase along with the pricing that was charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub client_id: ClientId,
    pub amount: Decimal,
    pub currency: String,
    pub purchase_date: NaiveDateTime,
    pub purchase_country: String,
    pub discount_applied: Decimal,
    pub final_amount: Decimal,
    pub benefit: Option<String>,
}

/// Storage seam so the service can run against any backing store.
pub trait ClientRepository: Send + Sync {
    fn insert_client(&self, record: ClientRecord) -> Result<ClientRecord, RepositoryError>;
    fn fetch_client(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError>;
    fn insert_purchase(&self, record: PurchaseRecord) -> Result<PurchaseRecord, RepositoryError>;
    fn purchases_for(&self, id: &ClientId) -> Result<Vec<PurchaseRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

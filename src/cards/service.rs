use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::checkout::PurchaseQuote;
use super::domain::{
    deserialize_purchase_date, CardTier, EligibilityRequest, InvalidInput, PurchaseContext,
};
use super::repository::{
    ClientId, ClientRecord, ClientRepository, PurchaseRecord, RepositoryError,
};
use super::rules::{RejectionReason, Verdict};

/// Inbound registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRegistration {
    pub name: String,
    pub country: String,
    pub monthly_income: Decimal,
    #[serde(rename = "viseClub")]
    pub is_member: bool,
    #[serde(rename = "cardType")]
    pub tier: CardTier,
}

/// Inbound purchase payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub client_id: ClientId,
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(deserialize_with = "deserialize_purchase_date")]
    pub purchase_date: NaiveDateTime,
    pub purchase_country: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered { client: ClientRecord, message: String },
    Rejected(RejectionReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Approved(PurchaseReceipt),
    Rejected(RejectionReason),
}

/// Priced purchase returned to the caller after it has been recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    pub client_id: ClientId,
    pub quote: PurchaseQuote,
}

/// Composes the rule engine with client storage for registration and checkout.
pub struct CardProgramService<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> CardProgramService<R>
where
    R: ClientRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_client_id(&self) -> ClientId {
        ClientId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Evaluate a registration and store the client when eligible.
    pub fn register(
        &self,
        registration: ClientRegistration,
    ) -> Result<RegistrationOutcome, CardServiceError> {
        require_text("name", &registration.name)?;
        require_text("country", &registration.country)?;

        let request = EligibilityRequest {
            tier: registration.tier,
            monthly_income: registration.monthly_income,
            is_member: registration.is_member,
            country: registration.country.clone(),
        };

        let message = match request.evaluate() {
            Verdict::Approved { message } => message,
            Verdict::Rejected(reason) => {
                warn!(tier = %request.tier, reason = %reason.summary(), "registration rejected");
                return Ok(RegistrationOutcome::Rejected(reason));
            }
        };

        let record = ClientRecord {
            id: self.next_client_id(),
            name: registration.name,
            country: registration.country,
            monthly_income: registration.monthly_income,
            is_member: registration.is_member,
            tier: registration.tier,
        };
        let client = self.repository.insert_client(record)?;
        info!(client_id = client.id.0, tier = %client.tier, "client registered");

        Ok(RegistrationOutcome::Registered { client, message })
    }

    /// Authorize a purchase, price it and record it.
    pub fn purchase(&self, request: PurchaseRequest) -> Result<PurchaseOutcome, CardServiceError> {
        if request.amount <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveAmount(request.amount).into());
        }
        require_text("purchaseCountry", &request.purchase_country)?;

        let client = self.client(&request.client_id)?;
        let context = PurchaseContext {
            tier: client.tier,
            amount: request.amount,
            purchase_date: request.purchase_date,
            purchase_country: request.purchase_country.clone(),
            client_country: client.country.clone(),
        };

        if let Verdict::Rejected(reason) = context.authorize() {
            warn!(
                client_id = client.id.0,
                reason = %reason.summary(),
                "purchase rejected"
            );
            return Ok(PurchaseOutcome::Rejected(reason));
        }

        let quote = PurchaseQuote::price(request.amount, &context.discount());
        self.repository.insert_purchase(PurchaseRecord {
            client_id: client.id,
            amount: request.amount,
            currency: request.currency,
            purchase_date: request.purchase_date,
            purchase_country: request.purchase_country,
            discount_applied: quote.discount_applied,
            final_amount: quote.final_amount,
            benefit: quote.benefit.clone(),
        })?;
        info!(
            client_id = client.id.0,
            discount = %quote.discount_applied,
            benefit = quote.benefit.as_deref().unwrap_or("none"),
            "purchase approved"
        );

        Ok(PurchaseOutcome::Approved(PurchaseReceipt {
            client_id: client.id,
            quote,
        }))
    }

    pub fn client(&self, id: &ClientId) -> Result<ClientRecord, CardServiceError> {
        let record = self
            .repository
            .fetch_client(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn purchases(&self, id: &ClientId) -> Result<Vec<PurchaseRecord>, CardServiceError> {
        self.client(id)?;
        Ok(self.repository.purchases_for(id)?)
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), InvalidInput> {
    if value.trim().is_empty() {
        Err(InvalidInput::MissingField(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CardServiceError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

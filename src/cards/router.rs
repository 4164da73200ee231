use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use super::domain::CardTier;
use super::repository::{ClientId, ClientRecord, ClientRepository, PurchaseRecord, RepositoryError};
use super::rules::RejectionReason;
use super::service::{
    CardProgramService, CardServiceError, ClientRegistration, PurchaseOutcome, PurchaseReceipt,
    PurchaseRequest, RegistrationOutcome,
};

/// Router exposing client registration and purchase endpoints.
pub fn card_router<R>(service: Arc<CardProgramService<R>>) -> Router
where
    R: ClientRepository + 'static,
{
    Router::new()
        .route("/client", post(register_handler::<R>))
        .route("/client/:client_id", get(client_handler::<R>))
        .route("/client/:client_id/purchases", get(purchases_handler::<R>))
        .route("/purchase", post(purchase_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisteredView {
    pub(crate) client_id: ClientId,
    pub(crate) name: String,
    pub(crate) card_type: CardTier,
    pub(crate) status: &'static str,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClientView {
    pub(crate) client_id: ClientId,
    pub(crate) name: String,
    pub(crate) country: String,
    pub(crate) monthly_income: Decimal,
    pub(crate) vise_club: bool,
    pub(crate) card_type: CardTier,
}

impl From<ClientRecord> for ClientView {
    fn from(record: ClientRecord) -> Self {
        Self {
            client_id: record.id,
            name: record.name,
            country: record.country,
            monthly_income: record.monthly_income,
            vise_club: record.is_member,
            card_type: record.tier,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchaseView {
    pub(crate) client_id: ClientId,
    pub(crate) original_amount: Decimal,
    pub(crate) discount_applied: Decimal,
    pub(crate) final_amount: Decimal,
    pub(crate) benefit: Option<String>,
}

impl From<PurchaseReceipt> for PurchaseView {
    fn from(receipt: PurchaseReceipt) -> Self {
        Self {
            client_id: receipt.client_id,
            original_amount: receipt.quote.original_amount,
            discount_applied: receipt.quote.discount_applied,
            final_amount: receipt.quote.final_amount,
            benefit: receipt.quote.benefit,
        }
    }
}

impl From<PurchaseRecord> for PurchaseView {
    fn from(record: PurchaseRecord) -> Self {
        Self {
            client_id: record.client_id,
            original_amount: record.amount,
            discount_applied: record.discount_applied,
            final_amount: record.final_amount,
            benefit: record.benefit,
        }
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<CardProgramService<R>>>,
    Json(registration): Json<ClientRegistration>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.register(registration) {
        Ok(RegistrationOutcome::Registered { client, message }) => {
            let view = RegisteredView {
                client_id: client.id,
                name: client.name,
                card_type: client.tier,
                status: "Registered",
                message,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Ok(RegistrationOutcome::Rejected(reason)) => rejected(&reason),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn purchase_handler<R>(
    State(service): State<Arc<CardProgramService<R>>>,
    Json(request): Json<PurchaseRequest>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.purchase(request) {
        Ok(PurchaseOutcome::Approved(receipt)) => {
            let payload = json!({
                "status": "Approved",
                "purchase": PurchaseView::from(receipt),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Ok(PurchaseOutcome::Rejected(reason)) => rejected(&reason),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn client_handler<R>(
    State(service): State<Arc<CardProgramService<R>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.client(&ClientId(client_id)) {
        Ok(record) => (StatusCode::OK, Json(ClientView::from(record))).into_response(),
        Err(error) => service_error(error),
    }
}

pub(crate) async fn purchases_handler<R>(
    State(service): State<Arc<CardProgramService<R>>>,
    Path(client_id): Path<u64>,
) -> Response
where
    R: ClientRepository + 'static,
{
    match service.purchases(&ClientId(client_id)) {
        Ok(records) => {
            let views: Vec<PurchaseView> = records.into_iter().map(PurchaseView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => service_error(error),
    }
}

fn rejected(reason: &RejectionReason) -> Response {
    let payload = json!({
        "status": "Rejected",
        "error": reason.summary(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn service_error(error: CardServiceError) -> Response {
    let (status, message) = match &error {
        CardServiceError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
        CardServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "client not found".to_string())
        }
        CardServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "client already exists".to_string())
        }
        CardServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    };

    let payload = json!({
        "status": "Rejected",
        "error": message,
    });
    (status, Json(payload)).into_response()
}

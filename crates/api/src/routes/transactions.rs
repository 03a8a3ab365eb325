//! Transaction lifecycle routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;
use fluxo_core::transaction::{TransactionKind, TransactionStatus};
use fluxo_db::{
    entities::transactions,
    repositories::transaction::{
        CreateTransactionInput, TransactionFilter, TransactionRepository, UpdateTransactionInput,
    },
};
use fluxo_shared::{AppError, types::{PageRequest, PageResponse}};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/mark-overdue", post(mark_overdue))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", patch(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
        .route("/transactions/{id}/pay", post(pay_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by status.
    pub status: Option<String>,
    /// Filter by kind.
    pub kind: Option<String>,
    /// Filter by linked client.
    pub client_id: Option<Uuid>,
    /// Filter by due date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by due date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Transaction kind.
    pub kind: String,
    /// Initial status; defaults to pending.
    pub status: Option<String>,
    /// Description of the transaction.
    pub description: String,
    /// Amount as a decimal string, e.g. `"150.00"`.
    pub amount: String,
    /// Due date (YYYY-MM-DD).
    pub due_date: NaiveDate,
    /// Payment date, for transactions recorded after the fact.
    pub payment_date: Option<NaiveDate>,
    /// Optional linked client.
    pub client_id: Option<Uuid>,
    /// Optional notes.
    pub notes: Option<String>,
}

/// Request body for updating a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New description.
    pub description: Option<String>,
    /// New amount as a decimal string.
    pub amount: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New payment date.
    pub payment_date: Option<NaiveDate>,
    /// New linked client.
    pub client_id: Option<Uuid>,
    /// New notes.
    pub notes: Option<String>,
}

/// Request body for paying a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct PayTransactionRequest {
    /// Payment date, defaults to today when omitted.
    pub payment_date: Option<NaiveDate>,
}

/// Response for a single transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Kind.
    pub kind: String,
    /// Status.
    pub status: String,
    /// Description.
    pub description: String,
    /// Amount, formatted to two decimal places.
    pub amount: String,
    /// Due date.
    pub due_date: NaiveDate,
    /// Payment date, if paid.
    pub payment_date: Option<NaiveDate>,
    /// Linked client, if any.
    pub client_id: Option<Uuid>,
    /// Notes.
    pub notes: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        let kind: TransactionKind = model.kind.into();
        let status: TransactionStatus = model.status.into();
        Self {
            id: model.id,
            kind: kind.as_str().to_owned(),
            status: status.as_str().to_owned(),
            description: model.description,
            amount: format!("{:.2}", model.amount),
            due_date: model.due_date,
            payment_date: model.payment_date,
            client_id: model.client_id,
            notes: model.notes,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions` - List transactions with filters.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let status = match parse_status(query.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };
    let kind = match parse_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };

    let filter = TransactionFilter {
        status: status.map(Into::into),
        kind: kind.map(Into::into),
        client_id: query.client_id,
        due_from: query.from,
        due_to: query.to,
    };

    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        limit: query.limit.unwrap_or(defaults.limit),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list(filter, page).await {
        Ok(page) => {
            let page = PageResponse {
                data: page
                    .data
                    .into_iter()
                    .map(TransactionResponse::from)
                    .collect(),
                meta: page.meta,
            };
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/transactions` - Create a new transaction.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Response {
    let Some(kind) = TransactionKind::parse(&payload.kind) else {
        return invalid_field(&format!("Invalid transaction kind: {}", payload.kind));
    };
    let status = match parse_status(payload.status.as_deref()) {
        Ok(status) => status,
        Err(response) => return response,
    };
    let Ok(amount) = Decimal::from_str(&payload.amount) else {
        return invalid_field(&format!("Invalid amount: {}", payload.amount));
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = CreateTransactionInput {
        kind: kind.into(),
        status: status.map(Into::into),
        description: payload.description,
        amount,
        due_date: payload.due_date,
        payment_date: payload.payment_date,
        client_id: payload.client_id,
        notes: payload.notes,
    };

    match repo.create(input).await {
        Ok(model) => (StatusCode::CREATED, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/transactions/{id}` - Get a transaction by ID.
async fn get_transaction(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// PATCH `/transactions/{id}` - Update a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Response {
    let status = match payload.status.as_deref() {
        Some(s) => match TransactionStatus::parse(s) {
            Some(status) => Some(status),
            None => return invalid_field(&format!("Invalid status: {s}")),
        },
        None => None,
    };
    let amount = match payload.amount.as_deref() {
        Some(raw) => match Decimal::from_str(raw) {
            Ok(amount) => Some(amount),
            Err(_) => return invalid_field(&format!("Invalid amount: {raw}")),
        },
        None => None,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    let input = UpdateTransactionInput {
        description: payload.description,
        amount,
        status: status.map(Into::into),
        due_date: payload.due_date,
        payment_date: payload.payment_date,
        client_id: payload.client_id,
        notes: payload.notes,
    };

    match repo.update(id, input).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/transactions/{id}/pay` - Mark a transaction as paid.
async fn pay_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Option<Json<PayTransactionRequest>>,
) -> Response {
    let payment_date = payload.and_then(|Json(body)| body.payment_date);

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.pay(id, payment_date).await {
        Ok(model) => (StatusCode::OK, Json(TransactionResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/transactions/{id}` - Soft-delete a transaction.
async fn delete_transaction(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/transactions/mark-overdue` - Promote past-due pending transactions.
async fn mark_overdue(State(state): State<AppState>) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());
    match repo.mark_overdue(chrono::Utc::now().date_naive()).await {
        Ok(updated) => (StatusCode::OK, Json(json!({ "updated": updated }))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_status(raw: Option<&str>) -> Result<Option<TransactionStatus>, Response> {
    match raw {
        None => Ok(None),
        Some(s) => TransactionStatus::parse(s)
            .map(Some)
            .ok_or_else(|| invalid_field(&format!("Invalid status: {s}"))),
    }
}

fn parse_kind(raw: Option<&str>) -> Result<Option<TransactionKind>, Response> {
    match raw {
        None => Ok(None),
        Some(s) => TransactionKind::parse(s)
            .map(Some)
            .ok_or_else(|| invalid_field(&format!("Invalid kind: {s}"))),
    }
}

fn invalid_field(message: &str) -> Response {
    error_response(&AppError::Validation(message.to_owned()))
}

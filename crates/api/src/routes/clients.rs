//! Client management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;
use fluxo_db::{
    entities::clients,
    repositories::client::{ClientFilter, ClientRepository, CreateClientInput, UpdateClientInput},
};
use fluxo_shared::types::{PageRequest, PageResponse};

/// Creates the client routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/{id}", get(get_client))
        .route("/clients/{id}", patch(update_client))
        .route("/clients/{id}", delete(delete_client))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing clients.
#[derive(Debug, Deserialize)]
pub struct ListClientsQuery {
    /// Substring match on name or email.
    pub search: Option<String>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

/// Request body for creating a client.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional identity document.
    pub document: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}

/// Request body for updating a client.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClientRequest {
    /// New name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New document.
    pub document: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// Activate or deactivate the client.
    pub is_active: Option<bool>,
}

/// Response for a single client.
#[derive(Debug, Serialize)]
pub struct ClientResponse {
    /// Client ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Identity document.
    pub document: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Whether the client is active.
    pub is_active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl From<clients::Model> for ClientResponse {
    fn from(model: clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone: model.phone,
            document: model.document,
            address: model.address,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/clients` - List clients.
async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Response {
    let filter = ClientFilter {
        search: query.search,
        is_active: query.is_active,
    };
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        limit: query.limit.unwrap_or(defaults.limit),
    };

    let repo = ClientRepository::new((*state.db).clone());
    match repo.list(filter, page).await {
        Ok(page) => {
            let page = PageResponse {
                data: page.data.into_iter().map(ClientResponse::from).collect(),
                meta: page.meta,
            };
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => error_response(&e.into()),
    }
}

/// POST `/clients` - Create a new client.
async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Response {
    let repo = ClientRepository::new((*state.db).clone());
    let input = CreateClientInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        document: payload.document,
        address: payload.address,
    };

    match repo.create(input).await {
        Ok(model) => (StatusCode::CREATED, Json(ClientResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// GET `/clients/{id}` - Get a client by ID.
async fn get_client(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = ClientRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(model) => (StatusCode::OK, Json(ClientResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// PATCH `/clients/{id}` - Update a client.
async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClientRequest>,
) -> Response {
    let repo = ClientRepository::new((*state.db).clone());
    let input = UpdateClientInput {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        document: payload.document,
        address: payload.address,
        is_active: payload.is_active,
    };

    match repo.update(id, input).await {
        Ok(model) => (StatusCode::OK, Json(ClientResponse::from(model))).into_response(),
        Err(e) => error_response(&e.into()),
    }
}

/// DELETE `/clients/{id}` - Soft-delete a client.
async fn delete_client(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = ClientRepository::new((*state.db).clone());
    match repo.soft_delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e.into()),
    }
}

//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::AppState;
use fluxo_shared::AppError;

pub mod clients;
pub mod health;
pub mod reports;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(transactions::routes())
        .merge(clients::routes())
        .merge(reports::routes())
}

/// Maps an application error to an HTTP response.
///
/// Server-side failures are logged and reported with a generic message;
/// everything else carries the error text through to the client.
pub(crate) fn error_response(e: &AppError) -> Response {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %e, "Request failed");
        return (
            status,
            Json(json!({
                "error": e.error_code(),
                "message": "An error occurred"
            })),
        )
            .into_response();
    }

    (
        status,
        Json(json!({
            "error": e.error_code(),
            "message": e.to_string()
        })),
    )
        .into_response()
}

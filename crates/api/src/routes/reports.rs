//! Cashflow report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::AppState;
use crate::routes::error_response;
use fluxo_core::reports::CashflowService;
use fluxo_db::repositories::report::ReportRepository;
use fluxo_shared::AppError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/cashflow", get(cashflow))
}

/// Query parameters for the cashflow report.
#[derive(Debug, Deserialize)]
pub struct CashflowQuery {
    /// Range start (YYYY-MM-DD), inclusive.
    pub from: NaiveDate,
    /// Range end (YYYY-MM-DD), inclusive.
    pub to: NaiveDate,
}

/// GET `/reports/cashflow` - Aggregate paid transactions over a date range.
///
/// An inverted range is not an error; it just produces an empty report.
async fn cashflow(State(state): State<AppState>, Query(query): Query<CashflowQuery>) -> Response {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.paid_between(query.from, query.to).await {
        Ok(rows) => {
            let report = CashflowService::cashflow(query.from, query.to, &rows);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(e) => error_response(&AppError::Database(e.to_string())),
    }
}

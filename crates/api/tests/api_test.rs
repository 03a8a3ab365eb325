//! End-to-end API tests driving the router over an in-memory SQLite
//! database, without binding a socket.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

use fluxo_api::{AppState, create_router};
use fluxo_db::migration::{Migrator, MigratorTrait};

/// One connection only so the whole pool shares the same in-memory database.
async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");

    create_router(AppState { db: Arc::new(db) })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    // Extractor rejections come back as plain text, not JSON.
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn patch_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

async fn create_transaction(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, post_json("/api/v1/transactions", &body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app().await;

    let (status, body) = send(&app, get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fluxo");
}

#[tokio::test]
async fn create_get_and_list_transaction() {
    let app = test_app().await;

    let created = create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Consulting invoice",
            "amount": "150.00",
            "due_date": "2025-03-15"
        }),
    )
    .await;
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["amount"], "150.00");
    assert_eq!(created["payment_date"], Value::Null);

    let id = created["id"].as_str().expect("id").to_owned();
    let (status, fetched) = send(&app, get(&format!("/api/v1/transactions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["description"], "Consulting invoice");

    let (status, page) = send(&app, get("/api/v1/transactions")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["id"], created["id"]);
}

#[tokio::test]
async fn create_accepts_backfilled_paid_transaction() {
    let app = test_app().await;

    let created = create_transaction(
        &app,
        json!({
            "kind": "PAYABLE",
            "status": "PAID",
            "description": "Imported ledger entry",
            "amount": "35.50",
            "due_date": "2025-01-10",
            "payment_date": "2025-01-08"
        }),
    )
    .await;

    assert_eq!(created["status"], "PAID");
    assert_eq!(created["payment_date"], "2025-01-08");
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/transactions",
            &json!({
                "kind": "SIDEWAYS",
                "description": "x",
                "amount": "10.00",
                "due_date": "2025-03-15"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/transactions",
            &json!({
                "kind": "PAYABLE",
                "description": "Rent",
                "amount": "0.00",
                "due_date": "2025-03-15"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn pay_defaults_to_today_and_allows_explicit_date() {
    let app = test_app().await;

    let created = create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Invoice",
            "amount": "99.90",
            "due_date": "2025-03-15"
        }),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, paid) = send(
        &app,
        post_json(
            &format!("/api/v1/transactions/{id}/pay"),
            &json!({ "payment_date": "2025-03-10" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "PAID");
    assert_eq!(paid["payment_date"], "2025-03-10");

    // Paying without a body defaults the payment date to today.
    let other = create_transaction(
        &app,
        json!({
            "kind": "PAYABLE",
            "description": "Rent",
            "amount": "1200.00",
            "due_date": "2025-04-01"
        }),
    )
    .await;
    let other_id = other["id"].as_str().expect("id").to_owned();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/v1/transactions/{other_id}/pay"))
        .body(Body::empty())
        .expect("build request");
    let (status, paid) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "PAID");
    assert_eq!(
        paid["payment_date"],
        chrono::Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn update_enforces_transition_rules() {
    let app = test_app().await;

    let created = create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Invoice",
            "amount": "50.00",
            "due_date": "2025-03-15"
        }),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, cancelled) = send(
        &app,
        patch_json(
            &format!("/api/v1/transactions/{id}"),
            &json!({ "status": "CANCELLED" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "CANCELLED");

    // Cancelled is terminal on the update path.
    let (status, body) = send(
        &app,
        patch_json(
            &format!("/api/v1/transactions/{id}"),
            &json!({ "status": "PENDING" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn delete_hides_transaction() {
    let app = test_app().await;

    let created = create_transaction(
        &app,
        json!({
            "kind": "PAYABLE",
            "description": "Rent",
            "amount": "1200.00",
            "due_date": "2025-04-01"
        }),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, _) = send(&app, delete(&format!("/api/v1/transactions/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get(&format!("/api/v1/transactions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn mark_overdue_promotes_past_due() {
    let app = test_app().await;
    let today = chrono::Utc::now().date_naive();
    let yesterday = today - chrono::Duration::days(1);

    let created = create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Late invoice",
            "amount": "80.00",
            "due_date": yesterday.to_string()
        }),
    )
    .await;
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, body) = send(
        &app,
        post_json("/api/v1/transactions/mark-overdue", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 1);

    let (_, fetched) = send(&app, get(&format!("/api/v1/transactions/{id}"))).await;
    assert_eq!(fetched["status"], "OVERDUE");

    // A second sweep finds nothing left to promote.
    let (_, body) = send(
        &app,
        post_json("/api/v1/transactions/mark-overdue", &json!({})),
    )
    .await;
    assert_eq!(body["updated"], 0);
}

#[tokio::test]
async fn client_crud_and_email_conflict() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        post_json(
            "/api/v1/clients",
            &json!({
                "name": "Acme Corp",
                "email": "billing@acme.test",
                "phone": "11987654321"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    assert_eq!(created["is_active"], true);
    let id = created["id"].as_str().expect("id").to_owned();

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/clients",
            &json!({
                "name": "Acme Duplicate",
                "email": "billing@acme.test"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");

    let (status, updated) = send(
        &app,
        patch_json(
            &format!("/api/v1/clients/{id}"),
            &json!({ "is_active": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);

    let (status, _) = send(&app, delete(&format!("/api/v1/clients/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&format!("/api/v1/clients/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_validation_errors() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/clients",
            &json!({
                "name": "Al",
                "email": "al@example.test"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/clients",
            &json!({
                "name": "Alice Smith",
                "email": "not-an-email"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn cashflow_report_buckets_by_payment_date() {
    let app = test_app().await;

    let receivable = create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Invoice",
            "amount": "100.00",
            "due_date": "2025-01-05"
        }),
    )
    .await;
    let payable = create_transaction(
        &app,
        json!({
            "kind": "PAYABLE",
            "description": "Supplies",
            "amount": "40.00",
            "due_date": "2025-01-05"
        }),
    )
    .await;

    for item in [&receivable, &payable] {
        let id = item["id"].as_str().expect("id");
        let (status, _) = send(
            &app,
            post_json(
                &format!("/api/v1/transactions/{id}/pay"),
                &json!({ "payment_date": "2025-01-05" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // A pending transaction in range must not show up.
    create_transaction(
        &app,
        json!({
            "kind": "RECEIVABLE",
            "description": "Unpaid invoice",
            "amount": "500.00",
            "due_date": "2025-01-05"
        }),
    )
    .await;

    let (status, report) = send(
        &app,
        get("/api/v1/reports/cashflow?from=2025-01-01&to=2025-01-31"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["period"]["from"], "2025-01-01");
    assert_eq!(report["period"]["to"], "2025-01-31");
    assert_eq!(report["totals"]["received"], "100.00");
    assert_eq!(report["totals"]["paid"], "40.00");
    assert_eq!(report["totals"]["balance"], "60.00");

    let timeline = report["timeline"].as_array().expect("timeline");
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0]["date"], "2025-01-05");
    assert_eq!(timeline[0]["in"], "100.00");
    assert_eq!(timeline[0]["out"], "40.00");
}

#[tokio::test]
async fn cashflow_inverted_range_is_empty() {
    let app = test_app().await;

    let (status, report) = send(
        &app,
        get("/api/v1/reports/cashflow?from=2025-02-01&to=2025-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totals"]["received"], "0.00");
    assert_eq!(report["totals"]["paid"], "0.00");
    assert_eq!(report["totals"]["balance"], "0.00");
    assert_eq!(report["timeline"].as_array().expect("timeline").len(), 0);
}

#[tokio::test]
async fn cashflow_requires_range_parameters() {
    let app = test_app().await;

    let (status, _) = send(&app, get("/api/v1/reports/cashflow?from=2025-01-01")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

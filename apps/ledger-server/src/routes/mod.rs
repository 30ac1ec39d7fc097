//! # HTTP Routes
//!
//! ```text
//! GET    /health
//! GET    /api/invoices                 POST /api/invoices
//! GET    /api/invoices/{id}            PUT  /api/invoices/{id}    DELETE /api/invoices/{id}
//! GET    /api/invoices/search/{term}
//! GET    /api/invoices/view?search=&month=&day=&category=
//! GET    /api/deposits                 POST /api/deposits
//! GET    /api/deposits/{id}            PUT  /api/deposits/{id}    DELETE /api/deposits/{id}
//! GET    /api/deposits/month/{month}
//! GET    /api/statistics
//! GET    /api/reconciliation/{month}
//! ```

pub mod deposit;
pub mod invoice;
pub mod report;

use axum::routing::get;
use axum::Router;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Every route, before state and middleware are attached.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(report::health))
        // Invoices
        .route("/api/invoices", get(invoice::list).post(invoice::create))
        .route("/api/invoices/view", get(invoice::view))
        .route("/api/invoices/search/{term}", get(invoice::search))
        .route(
            "/api/invoices/{id}",
            get(invoice::get_by_id).put(invoice::update).delete(invoice::delete),
        )
        // Deposits
        .route("/api/deposits", get(deposit::list).post(deposit::create))
        .route("/api/deposits/month/{month}", get(deposit::by_month))
        .route(
            "/api/deposits/{id}",
            get(deposit::get_by_id).put(deposit::update).delete(deposit::delete),
        )
        // Reports
        .route("/api/statistics", get(report::statistics))
        .route("/api/reconciliation/{month}", get(report::reconciliation))
}

/// Record ids are integers; anything else is a validation error on `id`.
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| {
        ApiError::invalid_field("id", format!("Invalid input: id '{}' is not an integer", raw))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use ledger_db::{Database, DbConfig};

    use super::parse_id;
    use crate::service::LedgerService;
    use crate::state::AppState;

    async fn app() -> Router {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        crate::router(AppState::new(LedgerService::new(db)), false)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn invoice_body(code: &str, quantity: f64) -> Value {
        json!({
            "code": code,
            "controlNumber": "CTRL-9",
            "date": "2025-03-05",
            "time": "08:30",
            "quantity": quantity,
            "unit": "Gallons",
            "category": "low-sulfur diesel",
            "unitPrice": 3.5,
            "surchargeA": 1.5,
            "surchargeB": 2,
            "surchargeC": "8",
            "notes": "Truck plate ABC-123"
        })
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.missing_fields, vec!["id"]);
    }

    #[tokio::test]
    async fn test_invoice_round_trip_over_http() {
        let app = app().await;

        let (status, body) =
            send(&app, "POST", "/api/invoices", Some(invoice_body("GEN-1", 100.0))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["taxedSales"], 350.0);
        assert_eq!(body["total"], 361.5);
        assert_eq!(body["message"], "Invoice created successfully");
        let id = body["id"].as_i64().unwrap();

        let uri = format!("/api/invoices/{}", id);
        let (status, body) = send(&app, "PUT", &uri, Some(invoice_body("GEN-1", 200.0))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 711.5);

        let (status, body) = send(&app, "GET", "/api/invoices/search/gen", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "DELETE", &format!("/api/invoices/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "GEN-1");

        let (status, body) = send(&app, "GET", &format!("/api/invoices/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = app().await;

        send(&app, "POST", "/api/invoices", Some(invoice_body("DUP", 1.0))).await;
        let (status, body) =
            send(&app, "POST", "/api/invoices", Some(invoice_body("DUP", 2.0))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");

        let (status, body) =
            send(&app, "POST", "/api/invoices", Some(json!({ "code": "X" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["missingFields"].as_array().unwrap().len(), 10);

        let unknown_field = json!({ "amount": 5, "color": "red" });
        let (status, body) = send(&app, "POST", "/api/deposits", Some(unknown_field)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, "GET", "/api/invoices/seven", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["missingFields"], json!(["id"]));

        let (status, _) = send(&app, "DELETE", "/api/deposits/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let app = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/deposits")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_deposits_and_reports() {
        let app = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/deposits",
            Some(json!({
                "amount": "300",
                "date": "2025-03-31",
                "description": "Cash sales deposit",
                "reference": "DEP-1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["amount"], 300.0);
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, "GET", &format!("/api/deposits/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reference"], "DEP-1");

        send(&app, "POST", "/api/invoices", Some(invoice_body("GEN-2", 100.0))).await;

        let (_, body) = send(&app, "GET", "/api/deposits/month/03", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "GET", "/api/deposits/month/march", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/api/statistics", None).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["dieselCount"], 1);
        assert_eq!(body["totals"]["total"], 361.5);

        let (_, body) = send(&app, "GET", "/api/reconciliation/2025-03", None).await;
        assert_eq!(body["invoicedTotal"], 361.5);
        assert_eq!(body["depositedTotal"], 300.0);
        assert_eq!(body["difference"], 61.5);

        let (status, body) =
            send(&app, "GET", "/api/invoices/view?month=03&category=OTHER", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}

//! HTTP request handlers for the billing API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::build_monthly_report;
use crate::error::EngineError;

use super::request::MonthlyBillingRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/billing/monthly", post(monthly_billing_handler))
        .with_state(state)
}

/// Handler for POST /billing/monthly.
///
/// Bills every person in the request for the requested month. People whose
/// month cannot be billed are listed in the report's `errors` and the
/// response is still 200.
async fn monthly_billing_handler(
    State(state): State<AppState>,
    payload: Result<Json<MonthlyBillingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing monthly billing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    // One snapshot per run; later config changes do not affect this request
    let params = match state.config().snapshot() {
        Ok(params) => params,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Billing configuration unavailable"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let MonthlyBillingRequest {
        year,
        month,
        mut snapshot,
    } = request;
    snapshot
        .holidays
        .extend(state.config().holidays().iter().cloned());
    let people = snapshot.people.len();

    let result = tokio::task::spawn_blocking(move || {
        build_monthly_report(&snapshot, year, month, &params)
    })
    .await
    .unwrap_or_else(|err| {
        Err(EngineError::CalculationError {
            message: format!("billing task failed: {}", err),
        })
    });

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                year,
                month,
                people,
                errors = report.errors.len(),
                grand_total = %report.grand_total,
                duration_us = report.duration_us,
                "Monthly billing completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Monthly billing failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BillingConfig, ConfigLoader, PricingConfig};
    use crate::models::BillingReport;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/comedor").expect("Failed to load config");
        AppState::new(config)
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/billing/monthly")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const OCTOBER_REQUEST: &str = r#"{
        "year": 2024,
        "month": 10,
        "people": [{ "id": "alu_001", "name": "Ana", "kind": "child", "family_id": "fam_01" }],
        "enrollments": [{
            "id": "ins_001",
            "person_id": "alu_001",
            "weekdays": ["monday", "tuesday", "wednesday", "thursday"],
            "daily_price": "5.50",
            "start_date": "2024-09-09"
        }]
    }"#;

    #[tokio::test]
    async fn test_valid_request_returns_report() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post(OCTOBER_REQUEST)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: BillingReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report.total_business_days, 23);
        assert_eq!(report.discount_config_id, "curso_2024_2025");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].billable_days, 19);
        assert_eq!(report.rows[0].final_total, Decimal::new(8569, 2));
    }

    #[tokio::test]
    async fn test_configured_holidays_are_applied() {
        let router = create_router(create_test_state());
        let body = OCTOBER_REQUEST.replace("\"month\": 10", "\"month\": 11");

        let response = router.oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        // November 2024 has 21 weekdays; 1 November is a configured holiday
        assert_eq!(json["total_business_days"], 20);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post("{ not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post(r#"{ "year": 2024, "people": [] }"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let body = OCTOBER_REQUEST.replace("\"month\": 10", "\"month\": 13");

        let response = router.oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_PERIOD");
    }

    #[tokio::test]
    async fn test_missing_configuration_returns_422() {
        let config = BillingConfig::new(
            vec![],
            PricingConfig {
                one_time_price: Decimal::new(620, 2),
            },
            vec![],
        );
        let router = create_router(AppState::new(ConfigLoader::from_config(config)));

        let response = router.oneshot(post(OCTOBER_REQUEST)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MISSING_CONFIGURATION");
    }

    #[tokio::test]
    async fn test_unreadable_date_is_reported_per_person() {
        let router = create_router(create_test_state());
        let body = OCTOBER_REQUEST.replace(
            "\"enrollments\"",
            r#""absences": [{ "id": "baja_x", "person_id": "alu_001", "dates": ["2024/10/08"] }],
            "enrollments""#,
        );

        let response = router.oneshot(post(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["rows"].as_array().unwrap().len(), 0);
        assert_eq!(json["errors"][0]["code"], "AMBIGUOUS_DATE_ENCODING");
    }
}

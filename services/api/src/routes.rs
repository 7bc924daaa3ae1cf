use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use claims_review::workflows::claims::{
    claim_router, ClaimRepository, ClaimReviewService, ClaimSnapshot, EvaluationView,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Ad-hoc claim attributes scored without touching the repository.
#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationPreviewRequest {
    pub(crate) hours_worked: Decimal,
    pub(crate) hourly_rate: Decimal,
    #[serde(default)]
    pub(crate) has_document: bool,
    #[serde(default)]
    pub(crate) notes_length: usize,
    #[serde(default)]
    pub(crate) submitted_at: Option<DateTime<Utc>>,
}

pub(crate) fn with_claim_routes<R>(service: Arc<ClaimReviewService<R>>) -> axum::Router
where
    R: ClaimRepository + 'static,
{
    claim_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/evaluations/preview",
            axum::routing::post(evaluation_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn evaluation_preview_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<EvaluationPreviewRequest>,
) -> Json<EvaluationView> {
    Json(preview(&state, request, Utc::now()))
}

fn preview(state: &AppState, request: EvaluationPreviewRequest, now: DateTime<Utc>) -> EvaluationView {
    let snapshot = ClaimSnapshot {
        hours_worked: request.hours_worked,
        hourly_rate: request.hourly_rate,
        has_document: request.has_document,
        notes_length: request.notes_length,
        submitted_at: request.submitted_at.unwrap_or(now),
        now,
    };
    state.evaluator.evaluate(&snapshot).view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use claims_review::workflows::claims::ClaimEvaluator;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;

    fn state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            evaluator: Arc::new(ClaimEvaluator::default()),
        }
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = readiness_endpoint(Extension(state(false)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = readiness_endpoint(Extension(state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn preview_scores_without_storage() {
        let now = Utc::now();
        let request = EvaluationPreviewRequest {
            hours_worked: Decimal::from(800),
            hourly_rate: Decimal::from(150),
            has_document: false,
            notes_length: 0,
            submitted_at: Some(now - Duration::days(45)),
        };

        let view = preview(&state(true), request, now);

        assert!(!view.is_valid);
        assert_eq!(view.risk_score, 100);
        assert_eq!(view.risk_level, "High");
        assert_eq!(
            view.warnings.last().map(String::as_str),
            Some("Claim is 45 days old - urgent review required")
        );
    }
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ClaimId, ClaimStatusView, ClaimSubmission, Reviewer, ReviewerRole};
use super::repository::{ClaimRepository, RepositoryError};
use super::service::{ClaimReviewService, ReviewServiceError};

/// Router builder exposing HTTP endpoints for intake, evaluation, and review.
pub fn claim_router<R>(service: Arc<ClaimReviewService<R>>) -> Router
where
    R: ClaimRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/claims",
            post(submit_handler::<R>).get(queue_handler::<R>),
        )
        .route("/api/v1/claims/:claim_id", get(status_handler::<R>))
        .route(
            "/api/v1/claims/:claim_id/evaluation",
            get(evaluation_handler::<R>),
        )
        .route(
            "/api/v1/claims/:claim_id/approve",
            post(approve_handler::<R>),
        )
        .route("/api/v1/claims/:claim_id/reject", post(reject_handler::<R>))
        .route(
            "/api/v1/claims/:claim_id/auto-approve",
            post(auto_approve_handler::<R>),
        )
        .with_state(service)
}

/// Body accepted by the rejection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectionRequest {
    pub name: String,
    pub role: ReviewerRole,
    #[serde(default)]
    pub reason: String,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    axum::Json(submission): axum::Json<ClaimSubmission>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.submit(submission, Utc::now()) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn queue_handler<R>(State(service): State<Arc<ClaimReviewService<R>>>) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.review_queue() {
        Ok(claims) => {
            let views: Vec<ClaimStatusView> =
                claims.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    Path(claim_id): Path<String>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.get(&ClaimId(claim_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluation_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    Path(claim_id): Path<String>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.evaluate(&ClaimId(claim_id), Utc::now()) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    Path(claim_id): Path<String>,
    axum::Json(reviewer): axum::Json<Reviewer>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.approve(&ClaimId(claim_id), &reviewer, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    Path(claim_id): Path<String>,
    axum::Json(request): axum::Json<RejectionRequest>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    let reviewer = Reviewer {
        name: request.name,
        role: request.role,
    };
    match service.reject(&ClaimId(claim_id), &reviewer, &request.reason, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn auto_approve_handler<R>(
    State(service): State<Arc<ClaimReviewService<R>>>,
    Path(claim_id): Path<String>,
) -> Response
where
    R: ClaimRepository + 'static,
{
    match service.auto_approve(&ClaimId(claim_id), Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ReviewServiceError) -> Response {
    let status = match &error {
        ReviewServiceError::Intake(_)
        | ReviewServiceError::InvalidClaim { .. }
        | ReviewServiceError::NotAutoApprovable
        | ReviewServiceError::MissingRejectionReason => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReviewServiceError::Repository(RepositoryError::Conflict)
        | ReviewServiceError::AlreadyReviewed { .. }
        | ReviewServiceError::ManagerApprovalRequired { .. } => StatusCode::CONFLICT,
        ReviewServiceError::Unauthorized { .. } => StatusCode::FORBIDDEN,
        ReviewServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ClaimId, ClaimRecord, ClaimStatus, ClaimStatusView, ClaimSubmission, Reviewer, ReviewerRole,
};
use super::evaluation::{ClaimEvaluator, EvaluationConfig, EvaluationResult, EvaluationView};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{ClaimRepository, RepositoryError};

/// Reviewer name recorded when the system approves a claim on its own.
pub const AUTO_APPROVAL_REVIEWER: &str = "System (Auto-Approved)";

/// Service composing the intake guard, repository, and claim evaluator.
pub struct ClaimReviewService<R> {
    guard: Arc<IntakeGuard>,
    repository: Arc<R>,
    evaluator: Arc<ClaimEvaluator>,
}

static CLAIM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_claim_id() -> ClaimId {
    let id = CLAIM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ClaimId(format!("claim-{id:06}"))
}

impl<R> ClaimReviewService<R>
where
    R: ClaimRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: EvaluationConfig) -> Self {
        Self::with_guard(IntakeGuard::default(), repository, config)
    }

    pub fn with_guard(guard: IntakeGuard, repository: Arc<R>, config: EvaluationConfig) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
            evaluator: Arc::new(ClaimEvaluator::new(config)),
        }
    }

    pub fn evaluator(&self) -> &ClaimEvaluator {
        &self.evaluator
    }

    /// Accept a new claim, returning the stored pending record.
    pub fn submit(
        &self,
        submission: ClaimSubmission,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, ReviewServiceError> {
        let record = self
            .guard
            .record_from_submission(next_claim_id(), submission, now)?;
        let stored = self.repository.insert(record)?;

        info!(
            claim_id = %stored.id.0,
            lecturer = %stored.lecturer_name,
            total_amount = %stored.total_amount(),
            "claim submitted"
        );
        Ok(stored)
    }

    pub fn get(&self, claim_id: &ClaimId) -> Result<ClaimRecord, ReviewServiceError> {
        let record = self
            .repository
            .fetch(claim_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Run the validation rules and risk score against the stored claim.
    pub fn evaluate(
        &self,
        claim_id: &ClaimId,
        now: DateTime<Utc>,
    ) -> Result<ClaimEvaluation, ReviewServiceError> {
        let record = self.get(claim_id)?;
        let result = self.evaluator.evaluate(&record.snapshot(now));

        info!(
            claim_id = %record.id.0,
            valid = result.is_valid(),
            risk_score = result.risk_score(),
            warnings = result.warnings().len(),
            "claim evaluated"
        );
        Ok(ClaimEvaluation { record, result })
    }

    /// All claims, newest submission first.
    pub fn review_queue(&self) -> Result<Vec<ClaimRecord>, ReviewServiceError> {
        let mut claims = self.repository.list()?;
        claims.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(claims)
    }

    pub fn claims_for(&self, lecturer_name: &str) -> Result<Vec<ClaimRecord>, ReviewServiceError> {
        let mut claims = self.review_queue()?;
        claims.retain(|claim| claim.lecturer_name == lecturer_name.trim());
        Ok(claims)
    }

    /// Manually approve a pending claim on behalf of `reviewer`.
    pub fn approve(
        &self,
        claim_id: &ClaimId,
        reviewer: &Reviewer,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, ReviewServiceError> {
        ensure_reviewer(reviewer)?;
        let ClaimEvaluation { mut record, result } = self.evaluate(claim_id, now)?;
        ensure_pending(&record)?;

        if !result.is_valid() {
            warn!(claim_id = %record.id.0, errors = ?result.errors(), "approval refused for invalid claim");
            return Err(ReviewServiceError::InvalidClaim {
                errors: result.errors().to_vec(),
            });
        }

        if result.requires_manager_approval() && !reviewer.role.can_escalate() {
            warn!(
                claim_id = %record.id.0,
                role = reviewer.role.label(),
                "approval requires manager"
            );
            return Err(ReviewServiceError::ManagerApprovalRequired {
                warnings: result.warnings().to_vec(),
            });
        }

        record.status = ClaimStatus::Approved;
        record.reviewed_at = Some(now);
        record.reviewed_by = Some(reviewer.name.clone());
        self.store_review(record.clone())?;

        info!(claim_id = %record.id.0, reviewer = %reviewer.name, "claim approved");
        Ok(record)
    }

    pub fn reject(
        &self,
        claim_id: &ClaimId,
        reviewer: &Reviewer,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, ReviewServiceError> {
        ensure_reviewer(reviewer)?;
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ReviewServiceError::MissingRejectionReason);
        }

        let mut record = self.get(claim_id)?;
        ensure_pending(&record)?;

        record.status = ClaimStatus::Rejected;
        record.reviewed_at = Some(now);
        record.reviewed_by = Some(reviewer.name.clone());
        record.rejection_reason = Some(reason.to_string());
        self.store_review(record.clone())?;

        info!(claim_id = %record.id.0, reviewer = %reviewer.name, "claim rejected");
        Ok(record)
    }

    /// Approve without a human reviewer when the claim meets the low-risk criteria.
    pub fn auto_approve(
        &self,
        claim_id: &ClaimId,
        now: DateTime<Utc>,
    ) -> Result<ClaimRecord, ReviewServiceError> {
        let ClaimEvaluation { mut record, result } = self.evaluate(claim_id, now)?;
        ensure_pending(&record)?;

        if !result.auto_approval_eligible() {
            return Err(ReviewServiceError::NotAutoApprovable);
        }

        record.status = ClaimStatus::Approved;
        record.reviewed_at = Some(now);
        record.reviewed_by = Some(AUTO_APPROVAL_REVIEWER.to_string());
        self.store_review(record.clone())?;

        info!(claim_id = %record.id.0, "claim auto-approved");
        Ok(record)
    }

    fn store_review(&self, record: ClaimRecord) -> Result<(), ReviewServiceError> {
        let claim_id = record.id.clone();
        self.repository
            .transition(ClaimStatus::Pending, record)
            .map_err(|error| {
                if matches!(error, RepositoryError::Conflict) {
                    warn!(claim_id = %claim_id.0, "claim reviewed concurrently; decision discarded");
                }
                ReviewServiceError::from(error)
            })
    }
}

fn ensure_reviewer(reviewer: &Reviewer) -> Result<(), ReviewServiceError> {
    if reviewer.role.can_review() {
        Ok(())
    } else {
        Err(ReviewServiceError::Unauthorized {
            role: reviewer.role,
        })
    }
}

fn ensure_pending(record: &ClaimRecord) -> Result<(), ReviewServiceError> {
    match record.status {
        ClaimStatus::Pending => Ok(()),
        status => Err(ReviewServiceError::AlreadyReviewed { status }),
    }
}

/// A stored claim paired with its current evaluation.
#[derive(Debug, Clone)]
pub struct ClaimEvaluation {
    pub record: ClaimRecord,
    pub result: EvaluationResult,
}

impl ClaimEvaluation {
    pub fn view(&self) -> ClaimEvaluationView {
        ClaimEvaluationView {
            claim: self.record.status_view(),
            evaluation: self.result.view(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClaimEvaluationView {
    pub claim: ClaimStatusView,
    pub evaluation: EvaluationView,
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("role {} may not review claims", .role.label())]
    Unauthorized { role: ReviewerRole },
    #[error("claim has already been {}", .status.label())]
    AlreadyReviewed { status: ClaimStatus },
    #[error("claim failed validation: {}", .errors.join(", "))]
    InvalidClaim { errors: Vec<String> },
    #[error("This claim requires Manager approval due to: {}", .warnings.join(", "))]
    ManagerApprovalRequired { warnings: Vec<String> },
    #[error("claim does not meet auto-approval criteria")]
    NotAutoApprovable,
    #[error("a rejection reason is required")]
    MissingRejectionReason,
}

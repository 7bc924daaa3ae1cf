//! Lecturer claim intake, evaluation, and review.
//!
//! The evaluator is a pure function over a [`ClaimSnapshot`]; the service wraps it with the
//! repository lookups and status transitions the review screens need.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ClaimId, ClaimRecord, ClaimStatus, ClaimStatusView, ClaimSubmission, DocumentDescriptor,
    Reviewer, ReviewerRole,
};
pub use evaluation::{
    AutoApprovalCriteria, ClaimEvaluator, ClaimSnapshot, EvaluationConfig, EvaluationResult,
    EvaluationView, RiskLevel, RiskWeights,
};
pub use intake::{IntakeGuard, IntakePolicy, IntakeViolation};
pub use repository::{ClaimRepository, RepositoryError};
pub use router::{claim_router, RejectionRequest};
pub use service::{
    ClaimEvaluation, ClaimEvaluationView, ClaimReviewService, ReviewServiceError,
    AUTO_APPROVAL_REVIEWER,
};

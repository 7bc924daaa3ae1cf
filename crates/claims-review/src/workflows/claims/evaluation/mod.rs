mod config;
mod outcome;
mod risk;
mod rules;

pub use config::{AutoApprovalCriteria, EvaluationConfig, RiskWeights};
pub use outcome::{EvaluationResult, EvaluationView, RiskLevel};

use chrono::{DateTime, Utc};
use outcome::EvaluationBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attributes of a claim frozen at the moment of evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSnapshot {
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub has_document: bool,
    pub notes_length: usize,
    pub submitted_at: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

impl ClaimSnapshot {
    /// Always derived from hours and rate, never read from storage.
    pub fn total_amount(&self) -> Decimal {
        self.hours_worked.saturating_mul(self.hourly_rate)
    }

    /// Whole days elapsed since submission, truncated toward zero.
    pub fn days_since_submission(&self) -> i64 {
        self.now.signed_duration_since(self.submitted_at).num_days()
    }
}

/// Stateless evaluator applying the validation rules and risk weights to a snapshot.
#[derive(Debug, Clone, Default)]
pub struct ClaimEvaluator {
    config: EvaluationConfig,
}

impl ClaimEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn evaluate(&self, claim: &ClaimSnapshot) -> EvaluationResult {
        let total_amount = claim.total_amount();

        let findings = rules::apply_rules(claim, total_amount, &self.config, EvaluationBuilder::new());
        let findings = risk::apply_risk(claim, total_amount, &self.config.risk, findings);

        findings.finish()
    }
}

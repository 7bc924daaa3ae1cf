use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::domain::{ClaimId, ClaimRecord, ClaimStatus, ClaimSubmission};

/// Validation errors raised before a claim is accepted.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("lecturer name is required")]
    MissingLecturerName,
    #[error("hours worked must be between {min} and {max} (found {found})")]
    HoursOutOfRange {
        min: Decimal,
        max: Decimal,
        found: Decimal,
    },
    #[error("hourly rate must be between {min} and {max} (found {found})")]
    RateOutOfRange {
        min: Decimal,
        max: Decimal,
        found: Decimal,
    },
}

/// Inclusive bounds enforced on submitted hours and rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    pub min_hours: Decimal,
    pub max_hours: Decimal,
    pub min_hourly_rate: Decimal,
    pub max_hourly_rate: Decimal,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            min_hours: Decimal::ONE,
            max_hours: Decimal::from(744),
            min_hourly_rate: Decimal::ONE,
            max_hourly_rate: Decimal::from(10_000),
        }
    }
}

/// Guard responsible for producing pending `ClaimRecord` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn record_from_submission(
        &self,
        id: ClaimId,
        submission: ClaimSubmission,
        submitted_at: DateTime<Utc>,
    ) -> Result<ClaimRecord, IntakeViolation> {
        let lecturer_name = submission.lecturer_name.trim().to_string();
        if lecturer_name.is_empty() {
            return Err(IntakeViolation::MissingLecturerName);
        }

        let policy = &self.policy;
        if submission.hours_worked < policy.min_hours || submission.hours_worked > policy.max_hours
        {
            return Err(IntakeViolation::HoursOutOfRange {
                min: policy.min_hours,
                max: policy.max_hours,
                found: submission.hours_worked,
            });
        }

        if submission.hourly_rate < policy.min_hourly_rate
            || submission.hourly_rate > policy.max_hourly_rate
        {
            return Err(IntakeViolation::RateOutOfRange {
                min: policy.min_hourly_rate,
                max: policy.max_hourly_rate,
                found: submission.hourly_rate,
            });
        }

        let additional_notes = submission
            .additional_notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        let document = submission
            .document
            .filter(|document| !document.storage_key.trim().is_empty());

        Ok(ClaimRecord {
            id,
            lecturer_name,
            hours_worked: submission.hours_worked,
            hourly_rate: submission.hourly_rate,
            additional_notes,
            document,
            status: ClaimStatus::Pending,
            submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            rejection_reason: None,
        })
    }
}

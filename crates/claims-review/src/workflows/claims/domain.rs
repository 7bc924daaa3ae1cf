use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::evaluation::ClaimSnapshot;

/// Identifier wrapper for submitted claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimId(pub String);

/// Lecturer supplied payload captured at intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub document: Option<DocumentDescriptor>,
}

/// Metadata for an attachment held by the external file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub storage_key: String,
    pub original_file_name: String,
}

/// Lifecycle of a claim from submission through review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }
}

/// Stored claim as handed over by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub lecturer_name: String,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub additional_notes: Option<String>,
    pub document: Option<DocumentDescriptor>,
    pub status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewed_by: Option<String>,
    pub rejection_reason: Option<String>,
}

impl ClaimRecord {
    pub fn total_amount(&self) -> Decimal {
        self.hours_worked.saturating_mul(self.hourly_rate)
    }

    pub fn has_document(&self) -> bool {
        self.document
            .as_ref()
            .map(|document| !document.storage_key.trim().is_empty())
            .unwrap_or(false)
    }

    /// Length of the notes in UTF-16 code units.
    pub fn notes_length(&self) -> usize {
        self.additional_notes
            .as_deref()
            .map(|notes| notes.encode_utf16().count())
            .unwrap_or(0)
    }

    /// Freeze the evaluated attributes of this record at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> ClaimSnapshot {
        ClaimSnapshot {
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            has_document: self.has_document(),
            notes_length: self.notes_length(),
            submitted_at: self.submitted_at,
            now,
        }
    }

    pub fn status_view(&self) -> ClaimStatusView {
        ClaimStatusView {
            claim_id: self.id.clone(),
            lecturer_name: self.lecturer_name.clone(),
            status: self.status.label(),
            hours_worked: self.hours_worked,
            hourly_rate: self.hourly_rate,
            total_amount: self.total_amount(),
            submitted_at: self.submitted_at,
            reviewed_at: self.reviewed_at,
            reviewed_by: self.reviewed_by.clone(),
            rejection_reason: self.rejection_reason.clone(),
        }
    }
}

/// Sanitized representation of a claim's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimStatusView {
    pub claim_id: ClaimId,
    pub lecturer_name: String,
    pub status: &'static str,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub total_amount: Decimal,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// Roles issued by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewerRole {
    Lecturer,
    Coordinator,
    Manager,
    #[serde(rename = "HR", alias = "Hr")]
    Hr,
}

impl ReviewerRole {
    pub const fn label(self) -> &'static str {
        match self {
            ReviewerRole::Lecturer => "Lecturer",
            ReviewerRole::Coordinator => "Coordinator",
            ReviewerRole::Manager => "Manager",
            ReviewerRole::Hr => "HR",
        }
    }

    pub const fn can_review(self) -> bool {
        matches!(
            self,
            ReviewerRole::Coordinator | ReviewerRole::Manager | ReviewerRole::Hr
        )
    }

    /// Roles allowed to approve claims flagged for manager approval.
    pub const fn can_escalate(self) -> bool {
        matches!(self, ReviewerRole::Manager | ReviewerRole::Hr)
    }
}

/// Authenticated caller acting on a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub name: String,
    pub role: ReviewerRole,
}

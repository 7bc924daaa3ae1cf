use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::workflows::claims::domain::{
    ClaimId, ClaimRecord, ClaimStatus, ClaimSubmission, DocumentDescriptor, Reviewer,
    ReviewerRole,
};
use crate::workflows::claims::evaluation::{ClaimEvaluator, ClaimSnapshot};
use crate::workflows::claims::repository::{ClaimRepository, RepositoryError};
use crate::workflows::claims::{claim_router, ClaimReviewService, EvaluationConfig};

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn review_day() -> DateTime<Utc> {
    at(2025, 3, 14)
}

pub(super) fn snapshot(hours: i64, rate: i64, has_document: bool) -> ClaimSnapshot {
    snapshot_decimal(Decimal::from(hours), Decimal::from(rate), has_document)
}

pub(super) fn snapshot_decimal(hours: Decimal, rate: Decimal, has_document: bool) -> ClaimSnapshot {
    ClaimSnapshot {
        hours_worked: hours,
        hourly_rate: rate,
        has_document,
        notes_length: 0,
        submitted_at: review_day(),
        now: review_day(),
    }
}

pub(super) fn aged(mut claim: ClaimSnapshot, days: i64) -> ClaimSnapshot {
    claim.submitted_at = claim.now - Duration::days(days);
    claim
}

pub(super) fn evaluator() -> ClaimEvaluator {
    ClaimEvaluator::default()
}

pub(super) fn timesheet() -> DocumentDescriptor {
    DocumentDescriptor {
        storage_key: "uploads/2025/03/timesheet-march.pdf".to_string(),
        original_file_name: "timesheet-march.pdf".to_string(),
    }
}

pub(super) fn submission(hours: i64, rate: i64) -> ClaimSubmission {
    ClaimSubmission {
        lecturer_name: "Thandi Mokoena".to_string(),
        hours_worked: Decimal::from(hours),
        hourly_rate: Decimal::from(rate),
        additional_notes: Some("Second semester tutorials".to_string()),
        document: Some(timesheet()),
    }
}

pub(super) fn undocumented_submission(hours: i64, rate: i64) -> ClaimSubmission {
    let mut submission = submission(hours, rate);
    submission.document = None;
    submission
}

pub(super) fn coordinator() -> Reviewer {
    Reviewer {
        name: "Pieter Coordinator".to_string(),
        role: ReviewerRole::Coordinator,
    }
}

pub(super) fn manager() -> Reviewer {
    Reviewer {
        name: "Naledi Manager".to_string(),
        role: ReviewerRole::Manager,
    }
}

pub(super) fn lecturer() -> Reviewer {
    Reviewer {
        name: "Thandi Mokoena".to_string(),
        role: ReviewerRole::Lecturer,
    }
}

pub(super) fn build_service() -> (ClaimReviewService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ClaimReviewService::new(repository.clone(), EvaluationConfig::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<HashMap<ClaimId, ClaimRecord>>>,
}

impl ClaimRepository for MemoryRepository {
    fn insert(&self, record: ClaimRecord) -> Result<ClaimRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn transition(
        &self,
        expected: ClaimStatus,
        record: ClaimRecord,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(stored) if stored.status == expected => {
                *stored = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ClaimId) -> Result<Option<ClaimRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Lets another reviewer's decision land between a service's read and its write.
#[derive(Default)]
pub(super) struct InterleavedRepository {
    pub(super) inner: MemoryRepository,
    competing: Mutex<Option<ClaimRecord>>,
}

impl InterleavedRepository {
    pub(super) fn decide_first(&self, record: ClaimRecord) {
        *self.competing.lock().expect("competing mutex poisoned") = Some(record);
    }
}

impl ClaimRepository for InterleavedRepository {
    fn insert(&self, record: ClaimRecord) -> Result<ClaimRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn transition(
        &self,
        expected: ClaimStatus,
        record: ClaimRecord,
    ) -> Result<(), RepositoryError> {
        let competing = self.competing.lock().expect("competing mutex poisoned").take();
        if let Some(competing) = competing {
            self.inner.transition(ClaimStatus::Pending, competing)?;
        }
        self.inner.transition(expected, record)
    }

    fn fetch(&self, id: &ClaimId) -> Result<Option<ClaimRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, RepositoryError> {
        self.inner.list()
    }
}

pub(super) struct ConflictRepository;

impl ClaimRepository for ConflictRepository {
    fn insert(&self, _record: ClaimRecord) -> Result<ClaimRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn transition(
        &self,
        _expected: ClaimStatus,
        _record: ClaimRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ClaimId) -> Result<Option<ClaimRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ClaimRepository for UnavailableRepository {
    fn insert(&self, _record: ClaimRecord) -> Result<ClaimRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn transition(
        &self,
        _expected: ClaimStatus,
        _record: ClaimRecord,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ClaimId) -> Result<Option<ClaimRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ClaimRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn claim_router_with_service(
    service: ClaimReviewService<MemoryRepository>,
) -> axum::Router {
    claim_router(Arc::new(service))
}

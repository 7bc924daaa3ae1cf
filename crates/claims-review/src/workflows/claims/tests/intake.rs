use super::common::*;
use crate::workflows::claims::domain::{ClaimId, ClaimStatus, DocumentDescriptor};
use crate::workflows::claims::intake::{IntakeGuard, IntakePolicy, IntakeViolation};
use rust_decimal::Decimal;

fn claim_id() -> ClaimId {
    ClaimId("claim-intake".to_string())
}

#[test]
fn guard_requires_lecturer_name() {
    let mut submission = submission(10, 150);
    submission.lecturer_name = "   ".to_string();

    match IntakeGuard::default().record_from_submission(claim_id(), submission, review_day()) {
        Err(IntakeViolation::MissingLecturerName) => {}
        other => panic!("expected missing lecturer name, got {other:?}"),
    }
}

#[test]
fn guard_enforces_hour_bounds() {
    let guard = IntakeGuard::default();

    for hours in [0, 745] {
        match guard.record_from_submission(claim_id(), submission(hours, 150), review_day()) {
            Err(IntakeViolation::HoursOutOfRange { found, .. }) => {
                assert_eq!(found, Decimal::from(hours))
            }
            other => panic!("expected hours violation for {hours}, got {other:?}"),
        }
    }

    assert!(guard
        .record_from_submission(claim_id(), submission(744, 10), review_day())
        .is_ok());
}

#[test]
fn guard_enforces_rate_bounds() {
    let guard = IntakeGuard::default();

    match guard.record_from_submission(claim_id(), submission(10, 10_001), review_day()) {
        Err(IntakeViolation::RateOutOfRange { max, .. }) => {
            assert_eq!(max, Decimal::from(10_000))
        }
        other => panic!("expected rate violation, got {other:?}"),
    }
}

#[test]
fn guard_respects_custom_policy() {
    let guard = IntakeGuard::with_policy(IntakePolicy {
        max_hours: Decimal::from(200),
        ..IntakePolicy::default()
    });

    assert!(matches!(
        guard.record_from_submission(claim_id(), submission(201, 150), review_day()),
        Err(IntakeViolation::HoursOutOfRange { .. })
    ));
    assert!(guard
        .record_from_submission(claim_id(), submission(200, 150), review_day())
        .is_ok());
}

#[test]
fn guard_produces_pending_record_with_cleaned_fields() {
    let mut submission = submission(12, 180);
    submission.lecturer_name = "  Thandi Mokoena ".to_string();
    submission.additional_notes = Some("   ".to_string());
    submission.document = Some(DocumentDescriptor {
        storage_key: " ".to_string(),
        original_file_name: "empty.pdf".to_string(),
    });

    let record = IntakeGuard::default()
        .record_from_submission(claim_id(), submission, review_day())
        .expect("valid submission");

    assert_eq!(record.lecturer_name, "Thandi Mokoena");
    assert_eq!(record.status, ClaimStatus::Pending);
    assert_eq!(record.submitted_at, review_day());
    assert!(record.additional_notes.is_none());
    assert!(record.document.is_none());
    assert!(!record.has_document());
    assert_eq!(record.total_amount(), Decimal::from(2160));
}

#[test]
fn snapshot_counts_note_characters() {
    let mut submission = submission(12, 180);
    submission.additional_notes = Some("Déjà vu workshop".to_string());

    let record = IntakeGuard::default()
        .record_from_submission(claim_id(), submission, review_day())
        .expect("valid submission");
    let snapshot = record.snapshot(review_day());

    assert_eq!(snapshot.notes_length, 16);
    assert!(snapshot.has_document);
    assert_eq!(snapshot.now, review_day());
}

#[test]
fn notes_length_counts_utf16_units() {
    let mut submission = submission(12, 180);
    // 24 book emoji take two UTF-16 units each
    submission.additional_notes = Some(format!("Slides {}", "\u{1F4DA}".repeat(24)));

    let record = IntakeGuard::default()
        .record_from_submission(claim_id(), submission, review_day())
        .expect("valid submission");

    assert_eq!(record.notes_length(), 55);
    assert!(record.snapshot(review_day()).notes_length > 50);
}

use rust_decimal::Decimal;

use super::config::RiskWeights;
use super::outcome::EvaluationBuilder;
use super::ClaimSnapshot;

/// Score pass. Contributions are additive; clamping happens when the builder finishes.
pub(crate) fn apply_risk(
    claim: &ClaimSnapshot,
    total_amount: Decimal,
    weights: &RiskWeights,
    mut findings: EvaluationBuilder,
) -> EvaluationBuilder {
    if claim.hours_worked > weights.elevated_hours {
        findings = findings.adjust_score(weights.elevated_hours_points);
    }
    if claim.hours_worked > weights.excessive_hours {
        findings = findings.adjust_score(weights.excessive_hours_points);
    }

    if claim.hourly_rate > weights.premium_rate {
        findings = findings.adjust_score(weights.premium_rate_points);
    }
    if claim.hourly_rate < weights.low_rate {
        findings = findings.adjust_score(weights.low_rate_points);
    }

    if total_amount > weights.large_amount {
        findings = findings.adjust_score(weights.large_amount_points);
    }
    if total_amount > weights.very_large_amount {
        findings = findings.adjust_score(weights.very_large_amount_points);
    }

    if claim.has_document {
        findings = findings.adjust_score(weights.document_credit.saturating_neg());
    }
    if claim.notes_length > weights.detailed_notes_length {
        findings = findings.adjust_score(weights.detailed_notes_credit.saturating_neg());
    }

    findings
}

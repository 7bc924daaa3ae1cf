use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Thresholds applied by the validation rules and the risk score.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub standard_monthly_hours: Decimal,
    pub minimum_hours: Decimal,
    pub maximum_monthly_hours: Decimal,
    pub high_hourly_rate: Decimal,
    pub minimum_hourly_rate: Decimal,
    pub escalation_amount: Decimal,
    pub maximum_amount: Decimal,
    pub documentation_amount: Decimal,
    pub stale_after_days: i64,
    pub auto_approval: AutoApprovalCriteria,
    pub risk: RiskWeights,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            standard_monthly_hours: Decimal::from(160),
            minimum_hours: Decimal::ONE,
            maximum_monthly_hours: Decimal::from(744),
            high_hourly_rate: Decimal::from(1000),
            minimum_hourly_rate: Decimal::ONE_HUNDRED,
            escalation_amount: Decimal::from(50_000),
            maximum_amount: Decimal::from(100_000),
            documentation_amount: Decimal::from(5_000),
            stale_after_days: 30,
            auto_approval: AutoApprovalCriteria::default(),
            risk: RiskWeights::default(),
        }
    }
}

/// Inclusive bounds a claim must sit within to skip manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoApprovalCriteria {
    pub max_hours: Decimal,
    pub min_hourly_rate: Decimal,
    pub max_hourly_rate: Decimal,
    pub max_amount: Decimal,
}

impl Default for AutoApprovalCriteria {
    fn default() -> Self {
        Self {
            max_hours: Decimal::from(40),
            min_hourly_rate: Decimal::from(150),
            max_hourly_rate: Decimal::from(500),
            max_amount: Decimal::from(10_000),
        }
    }
}

/// Additive risk contributions. Thresholds are exclusive lower bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub elevated_hours: Decimal,
    pub elevated_hours_points: i16,
    pub excessive_hours: Decimal,
    pub excessive_hours_points: i16,
    pub premium_rate: Decimal,
    pub premium_rate_points: i16,
    pub low_rate: Decimal,
    pub low_rate_points: i16,
    pub large_amount: Decimal,
    pub large_amount_points: i16,
    pub very_large_amount: Decimal,
    pub very_large_amount_points: i16,
    pub document_credit: i16,
    pub detailed_notes_length: usize,
    pub detailed_notes_credit: i16,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            elevated_hours: Decimal::from(160),
            elevated_hours_points: 30,
            excessive_hours: Decimal::from(200),
            excessive_hours_points: 20,
            premium_rate: Decimal::from(800),
            premium_rate_points: 25,
            low_rate: Decimal::ONE_HUNDRED,
            low_rate_points: 15,
            large_amount: Decimal::from(30_000),
            large_amount_points: 20,
            very_large_amount: Decimal::from(50_000),
            very_large_amount_points: 30,
            document_credit: 20,
            detailed_notes_length: 50,
            detailed_notes_credit: 10,
        }
    }
}

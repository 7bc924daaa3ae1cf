use rust_decimal::Decimal;

use super::config::EvaluationConfig;
use super::outcome::EvaluationBuilder;
use super::ClaimSnapshot;

/// Validation pass. Every rule runs; findings accumulate in rule order.
pub(crate) fn apply_rules(
    claim: &ClaimSnapshot,
    total_amount: Decimal,
    config: &EvaluationConfig,
    mut findings: EvaluationBuilder,
) -> EvaluationBuilder {
    let hours = claim.hours_worked;
    let rate = claim.hourly_rate;

    if hours > config.standard_monthly_hours {
        findings = findings
            .warn(format!(
                "Hours worked ({}) exceeds standard monthly limit ({} hours)",
                hours.normalize(),
                config.standard_monthly_hours.normalize()
            ))
            .escalate();
    }

    if hours < config.minimum_hours {
        findings = findings.warn("Very low hours claimed".to_string());
    }

    if hours > config.maximum_monthly_hours {
        findings = findings.error(format!(
            "Hours worked exceeds maximum possible hours in a month ({})",
            config.maximum_monthly_hours.normalize()
        ));
    }

    if rate > config.high_hourly_rate {
        findings = findings
            .warn(format!("Hourly rate ({}) is unusually high", format_rand(rate)))
            .escalate();
    }

    if rate < config.minimum_hourly_rate {
        findings = findings.warn(format!(
            "Hourly rate ({}) is below recommended minimum rate",
            format_rand(rate)
        ));
    }

    if total_amount > config.escalation_amount {
        findings = findings
            .warn(format!(
                "Total amount ({}) exceeds {}",
                format_rand(total_amount),
                format_rand(config.escalation_amount)
            ))
            .escalate();
    }

    if total_amount > config.maximum_amount {
        findings = findings.error(format!(
            "Total amount exceeds maximum allowed ({})",
            format_rand(config.maximum_amount)
        ));
    }

    if total_amount > config.documentation_amount && !claim.has_document {
        findings = findings.warn(format!(
            "Supporting documentation missing for claim over {}",
            format_rand(config.documentation_amount)
        ));
    }

    let criteria = &config.auto_approval;
    if hours <= criteria.max_hours
        && rate >= criteria.min_hourly_rate
        && rate <= criteria.max_hourly_rate
        && total_amount <= criteria.max_amount
        && claim.has_document
    {
        findings = findings.auto_approvable();
    }

    let days_outstanding = claim.days_since_submission();
    if days_outstanding > config.stale_after_days {
        findings = findings.warn(format!(
            "Claim is {days_outstanding} days old - urgent review required"
        ));
    }

    findings
}

/// Render an amount in rand with thousands grouping, e.g. `R50,000` or `R1,234.50`.
///
/// Never rounds: sub-cent digits are kept so a message cannot contradict its threshold.
pub(crate) fn format_rand(amount: Decimal) -> String {
    let exact = amount.abs().normalize().to_string();
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };

    match fraction.len() {
        0 => format!("{sign}R{grouped}"),
        1 => format!("{sign}R{grouped}.{fraction}0"),
        _ => format!("{sign}R{grouped}.{fraction}"),
    }
}

use serde::Serialize;

const MAX_RISK_SCORE: i32 = 100;

/// Findings produced by a single evaluation. Only the evaluator constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    is_valid: bool,
    warnings: Vec<String>,
    errors: Vec<String>,
    requires_manager_approval: bool,
    auto_approval_eligible: bool,
    risk_score: u8,
}

impl EvaluationResult {
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn requires_manager_approval(&self) -> bool {
        self.requires_manager_approval
    }

    pub fn auto_approval_eligible(&self) -> bool {
        self.auto_approval_eligible
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn view(&self) -> EvaluationView {
        let level = self.risk_level();
        EvaluationView {
            is_valid: self.is_valid,
            warnings: self.warnings.clone(),
            errors: self.errors.clone(),
            requires_manager_approval: self.requires_manager_approval,
            auto_approval_eligible: self.auto_approval_eligible,
            risk_score: self.risk_score,
            risk_level: level.label(),
            risk_level_color: level.color(),
        }
    }
}

/// Serialized evaluation including the derived risk presentation.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub requires_manager_approval: bool,
    pub auto_approval_eligible: bool,
    pub risk_score: u8,
    pub risk_level: &'static str,
    pub risk_level_color: &'static str,
}

/// Coarse banding of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Presentation hint consumed by the review screens.
    pub const fn color(self) -> &'static str {
        match self {
            RiskLevel::Low => "success",
            RiskLevel::Medium => "warning",
            RiskLevel::High => "danger",
        }
    }
}

/// Accumulates findings across the rule and score passes.
#[derive(Debug, Default)]
pub(crate) struct EvaluationBuilder {
    warnings: Vec<String>,
    errors: Vec<String>,
    requires_manager_approval: bool,
    auto_approval_eligible: bool,
    raw_score: i32,
}

impl EvaluationBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn warn(mut self, message: String) -> Self {
        self.warnings.push(message);
        self
    }

    pub(crate) fn error(mut self, message: String) -> Self {
        self.errors.push(message);
        self
    }

    pub(crate) fn escalate(mut self) -> Self {
        self.requires_manager_approval = true;
        self
    }

    pub(crate) fn auto_approvable(mut self) -> Self {
        self.auto_approval_eligible = true;
        self
    }

    pub(crate) fn adjust_score(mut self, points: i16) -> Self {
        self.raw_score += i32::from(points);
        self
    }

    pub(crate) fn finish(self) -> EvaluationResult {
        let is_valid = self.errors.is_empty();
        let risk_score = self.raw_score.clamp(0, MAX_RISK_SCORE) as u8;

        EvaluationResult {
            is_valid,
            warnings: self.warnings,
            errors: self.errors,
            requires_manager_approval: self.requires_manager_approval,
            // an invalid claim can never be auto-approved
            auto_approval_eligible: self.auto_approval_eligible && is_valid,
            risk_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn builder_clamps_score_both_ways() {
        let low = EvaluationBuilder::new().adjust_score(-30).finish();
        assert_eq!(low.risk_score(), 0);

        let high = EvaluationBuilder::new()
            .adjust_score(90)
            .adjust_score(50)
            .finish();
        assert_eq!(high.risk_score(), 100);
        assert_eq!(high.risk_level().color(), "danger");
    }

    #[test]
    fn builder_withholds_auto_approval_from_invalid_results() {
        let result = EvaluationBuilder::new()
            .auto_approvable()
            .error("over limit".to_string())
            .finish();

        assert!(!result.is_valid());
        assert!(!result.auto_approval_eligible());
    }
}

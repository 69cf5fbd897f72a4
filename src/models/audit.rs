//! Audit trace models.
//!
//! Every tax and benefit calculation records the rules it applied as an
//! ordered list of [`AuditStep`]s, so a display layer can explain how each
//! figure was derived.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the Income Tax Act section behind this rule.
    pub section_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag inputs that were accepted but look wrong, such as
/// deductions larger than the salary they are deducted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::AuditTrace;
///
/// let mut trace = AuditTrace::default();
/// trace.record(
///     "cess",
///     "Health and Education Cess",
///     "Finance Act",
///     serde_json::json!({ "tax": "1000" }),
///     serde_json::json!({ "cess": "40" }),
///     "4% of 1000 = 40",
/// );
/// assert_eq!(trace.steps[0].step_number, 1);
/// assert!(trace.find("cess").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    #[serde(default)]
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the steps already recorded.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        section_ref: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            section_ref: section_ref.to_string(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: impl Into<String>, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message: message.into(),
            severity: severity.to_string(),
        });
    }

    /// Returns the first step recorded for `rule_id`.
    pub fn find(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|step| step.rule_id == rule_id)
    }

    /// Returns true if a warning with `code` was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trace() -> AuditTrace {
        let mut trace = AuditTrace::default();
        trace.record(
            "standard_deduction",
            "Standard Deduction",
            "16(ia)",
            serde_json::json!({ "annual_salary": "1500000" }),
            serde_json::json!({ "taxable_income": "1425000" }),
            "1500000 - 75000 = 1425000",
        );
        trace.record(
            "slab_tax",
            "Slab Tax",
            "115BAC",
            serde_json::json!({ "taxable_income": "1425000" }),
            serde_json::json!({ "tax": "93750" }),
            "Slab tax on 1425000 = 93750",
        );
        trace
    }

    #[test]
    fn test_steps_are_numbered_in_order() {
        let trace = sample_trace();
        let numbers: Vec<u32> = trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_find_returns_matching_step() {
        let trace = sample_trace();
        let step = trace.find("slab_tax").unwrap();
        assert_eq!(step.section_ref, "115BAC");
        assert!(trace.find("rebate_87a").is_none());
    }

    #[test]
    fn test_warnings_are_tracked() {
        let mut trace = sample_trace();
        assert!(!trace.has_warning("negative_taxable_income"));
        trace.warn("negative_taxable_income", "Deductions exceed salary", "medium");
        assert!(trace.has_warning("negative_taxable_income"));
    }

    #[test]
    fn test_audit_trace_serialization() {
        let trace = sample_trace();
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"rule_id\":\"standard_deduction\""));
        assert!(json.contains("\"section_ref\":\"16(ia)\""));
        assert!(json.contains("\"warnings\":[]"));

        let parsed: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, trace);
    }
}

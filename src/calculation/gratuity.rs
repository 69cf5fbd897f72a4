//! Gratuity under the Payment of Gratuity Act, and its section 10(10) exemption.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxRules;
use crate::models::{AuditTrace, GratuityInput};

use super::exemption::split_exemption;

/// The result of a gratuity calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityResult {
    /// Gratuity payable.
    pub gratuity_amount: Decimal,
    /// Portion exempt from tax.
    pub tax_exempt_amount: Decimal,
    /// Portion above the exemption cap.
    pub taxable_amount: Decimal,
    /// How each figure was derived.
    pub audit: AuditTrace,
}

/// Calculates gratuity as `15 * monthly_basic * years / 26` and splits it at
/// the exemption cap.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_gratuity;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::GratuityInput;
/// use rust_decimal::Decimal;
///
/// let input = GratuityInput {
///     monthly_basic: Decimal::from(100_000),
///     years_of_service: Decimal::from(10),
/// };
/// let result = calculate_gratuity(&input, &TaxRules::fy_2025_26());
///
/// assert_eq!(result.gratuity_amount.round_dp(2), Decimal::new(57_692_308, 2));
/// assert_eq!(result.taxable_amount, Decimal::ZERO);
/// ```
pub fn calculate_gratuity(input: &GratuityInput, rules: &TaxRules) -> GratuityResult {
    let exemptions = &rules.exemptions;
    let mut audit = AuditTrace::default();

    let gratuity_amount = exemptions.gratuity_days_of_wages
        * input.monthly_basic
        * input.years_of_service
        / exemptions.gratuity_working_days_per_month;
    audit.record(
        "gratuity_amount",
        "Gratuity Payable",
        "PGA 4(2)",
        serde_json::json!({
            "monthly_basic": input.monthly_basic.to_string(),
            "years_of_service": input.years_of_service.to_string()
        }),
        serde_json::json!({ "gratuity_amount": gratuity_amount.to_string() }),
        format!(
            "{} x ₹{} x {} years / {} = ₹{}",
            exemptions.gratuity_days_of_wages,
            input.monthly_basic,
            input.years_of_service,
            exemptions.gratuity_working_days_per_month,
            gratuity_amount.round_dp(2)
        ),
    );

    let split = split_exemption(gratuity_amount, exemptions.gratuity_cap);
    audit.record(
        "gratuity_exemption",
        "Gratuity Exemption",
        "10(10)",
        serde_json::json!({
            "gratuity_amount": gratuity_amount.to_string(),
            "cap": exemptions.gratuity_cap.to_string()
        }),
        serde_json::json!({
            "tax_exempt_amount": split.tax_exempt_amount.to_string(),
            "taxable_amount": split.taxable_amount.to_string()
        }),
        format!("Exempt up to ₹{}", exemptions.gratuity_cap),
    );

    debug!(
        gratuity_amount = %gratuity_amount,
        taxable_amount = %split.taxable_amount,
        "Gratuity calculated"
    );

    GratuityResult {
        gratuity_amount,
        tax_exempt_amount: split.tax_exempt_amount,
        taxable_amount: split.taxable_amount,
        audit,
    }
}

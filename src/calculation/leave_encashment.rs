//! Leave encashment and its section 10(10AA) exemption.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxRules;
use crate::models::{AuditTrace, LeaveEncashmentInput, PayBasis};

use super::exemption::split_exemption;

/// The result of a leave encashment calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEncashmentResult {
    /// Which pay figure the per-day amount was derived from.
    pub pay_basis: PayBasis,
    /// Pay for one day of leave.
    pub per_day_amount: Decimal,
    /// Total paid for the encashed leave.
    pub encashment_amount: Decimal,
    /// Portion exempt from tax.
    pub tax_exempt_amount: Decimal,
    /// Portion above the exemption cap.
    pub taxable_amount: Decimal,
    /// How each figure was derived.
    pub audit: AuditTrace,
}

/// Calculates leave encashment on annual pay.
///
/// The per-day rate is `pay_amount / 12 / 30` whichever [`PayBasis`] is
/// chosen; the basis is carried through to the result.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_leave_encashment;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::{LeaveEncashmentInput, PayBasis};
/// use rust_decimal::Decimal;
///
/// let input = LeaveEncashmentInput {
///     pay_amount: Decimal::from(720_000),
///     pay_basis: PayBasis::Basic,
///     number_of_leaves: Decimal::from(30),
/// };
/// let result = calculate_leave_encashment(&input, &TaxRules::fy_2025_26());
///
/// assert_eq!(result.per_day_amount, Decimal::from(2_000));
/// assert_eq!(result.encashment_amount, Decimal::from(60_000));
/// ```
pub fn calculate_leave_encashment(
    input: &LeaveEncashmentInput,
    rules: &TaxRules,
) -> LeaveEncashmentResult {
    let exemptions = &rules.exemptions;
    let mut audit = AuditTrace::default();

    let per_day_amount =
        input.pay_amount / exemptions.leave_months_per_year / exemptions.leave_days_per_month;
    let encashment_amount = per_day_amount * input.number_of_leaves;
    audit.record(
        "leave_encashment_amount",
        "Leave Encashment",
        "10(10AA)",
        serde_json::json!({
            "pay_amount": input.pay_amount.to_string(),
            "pay_basis": input.pay_basis,
            "number_of_leaves": input.number_of_leaves.to_string()
        }),
        serde_json::json!({
            "per_day_amount": per_day_amount.to_string(),
            "encashment_amount": encashment_amount.to_string()
        }),
        format!(
            "₹{} / {} / {} = ₹{} per day x {} days",
            input.pay_amount,
            exemptions.leave_months_per_year,
            exemptions.leave_days_per_month,
            per_day_amount.round_dp(2),
            input.number_of_leaves
        ),
    );

    let split = split_exemption(encashment_amount, exemptions.leave_encashment_cap);
    audit.record(
        "leave_encashment_exemption",
        "Leave Encashment Exemption",
        "10(10AA)",
        serde_json::json!({
            "encashment_amount": encashment_amount.to_string(),
            "cap": exemptions.leave_encashment_cap.to_string()
        }),
        serde_json::json!({
            "tax_exempt_amount": split.tax_exempt_amount.to_string(),
            "taxable_amount": split.taxable_amount.to_string()
        }),
        format!("Exempt up to ₹{}", exemptions.leave_encashment_cap),
    );

    debug!(
        pay_basis = ?input.pay_basis,
        encashment_amount = %encashment_amount,
        taxable_amount = %split.taxable_amount,
        "Leave encashment calculated"
    );

    LeaveEncashmentResult {
        pay_basis: input.pay_basis,
        per_day_amount,
        encashment_amount,
        tax_exempt_amount: split.tax_exempt_amount,
        taxable_amount: split.taxable_amount,
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn calculate(pay_amount: i64, pay_basis: PayBasis, leaves: i64) -> LeaveEncashmentResult {
        let input = LeaveEncashmentInput {
            pay_amount: d(pay_amount),
            pay_basis,
            number_of_leaves: d(leaves),
        };
        calculate_leave_encashment(&input, &TaxRules::fy_2025_26())
    }

    #[test]
    fn test_per_day_rate_and_amount() {
        let result = calculate(1_080_000, PayBasis::Basic, 45);

        assert_eq!(result.per_day_amount, d(3_000));
        assert_eq!(result.encashment_amount, d(135_000));
        assert_eq!(result.tax_exempt_amount, d(135_000));
        assert_eq!(result.taxable_amount, Decimal::ZERO);
    }

    #[test]
    fn test_pay_basis_does_not_change_amount() {
        let basic = calculate(1_080_000, PayBasis::Basic, 45);
        let gross = calculate(1_080_000, PayBasis::Gross, 45);

        assert_eq!(basic.encashment_amount, gross.encashment_amount);
        assert_eq!(gross.pay_basis, PayBasis::Gross);
    }

    #[test]
    fn test_encashment_above_cap() {
        // 72L / 360 = 20k per day, 300 days = 60L
        let result = calculate(7_200_000, PayBasis::Gross, 300);

        assert_eq!(result.encashment_amount, d(6_000_000));
        assert_eq!(result.tax_exempt_amount, d(2_000_000));
        assert_eq!(result.taxable_amount, d(4_000_000));
    }

    #[test]
    fn test_exempt_plus_taxable_equals_total() {
        let result = calculate(1_234_567, PayBasis::Basic, 17);
        assert_eq!(
            result.tax_exempt_amount + result.taxable_amount,
            result.encashment_amount
        );
    }
}

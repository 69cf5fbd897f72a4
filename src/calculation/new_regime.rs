//! New (default) regime income tax calculation.
//!
//! This module applies the section 115BAC slabs, the section 87A rebate and
//! marginal relief, cess and professional tax to a salary, and derives the
//! resulting in-hand pay.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxRules;
use crate::models::{AuditTrace, NewRegimeInput};

use super::in_hand::{InHandSalary, calculate_in_hand};
use super::slab_tax::calculate_slab_tax;

/// The result of a new-regime tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeResult {
    /// Gross annual salary.
    pub annual_salary: Decimal,
    /// Standard deduction applied.
    pub standard_deduction: Decimal,
    /// Salary after standard deduction and employer PF exclusion.
    pub taxable_income: Decimal,
    /// Tax from the slabs before rebate and relief.
    pub slab_tax: Decimal,
    /// Section 87A rebate; equals `slab_tax` at or below the rebate limit.
    pub rebate: Decimal,
    /// Whether marginal relief capped the tax.
    pub marginal_tax_relief: bool,
    /// Tax removed by marginal relief.
    pub marginal_relief_amount: Decimal,
    /// Income tax payable, before cess.
    pub tax: Decimal,
    /// Health and education cess on `tax`.
    pub cess: Decimal,
    /// Flat professional tax.
    pub professional_tax: Decimal,
    /// PF deducted from the quoted salary.
    pub total_pf: Decimal,
    /// Take-home pay.
    pub in_hand: InHandSalary,
    /// How each figure was derived.
    pub audit: AuditTrace,
}

/// Calculates income tax and in-hand salary under the new regime.
///
/// Steps, in order:
/// 1. Taxable income is salary minus the standard deduction, and minus the
///    employer PF when that is part of the quoted salary.
/// 2. Slab tax on the taxable income.
/// 3. Rebate: at or below the rebate limit the whole slab tax is rebated.
/// 4. Marginal relief: if the remaining tax is at least the relief threshold
///    and income is within the relief ceiling, the tax is replaced by the
///    income in excess of the rebate limit.
/// 5. Cess on the final tax, then professional tax and PF for in-hand pay.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_new_regime;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::{NewRegimeInput, PfContribution};
/// use rust_decimal::Decimal;
///
/// let rules = TaxRules::fy_2025_26();
/// let input = NewRegimeInput {
///     annual_salary: Decimal::from(1_500_000),
///     pf: PfContribution {
///         employee: Decimal::from(100_000),
///         employer: Decimal::from(100_000),
///         part_of_salary: false,
///     },
/// };
///
/// let result = calculate_new_regime(&input, &rules);
/// assert_eq!(result.taxable_income, Decimal::from(1_425_000));
/// assert_eq!(result.tax, Decimal::from(93_750));
/// assert!(!result.marginal_tax_relief);
/// ```
pub fn calculate_new_regime(input: &NewRegimeInput, tax_rules: &TaxRules) -> NewRegimeResult {
    let rules = &tax_rules.new_regime;
    let levies = &tax_rules.levies;
    let mut audit = AuditTrace::default();

    let after_standard_deduction = input.annual_salary - rules.standard_deduction;
    audit.record(
        "standard_deduction",
        "Standard Deduction",
        "16(ia)",
        serde_json::json!({
            "annual_salary": input.annual_salary.to_string(),
            "standard_deduction": rules.standard_deduction.to_string()
        }),
        serde_json::json!({ "income": after_standard_deduction.to_string() }),
        format!(
            "₹{} - ₹{} = ₹{}",
            input.annual_salary, rules.standard_deduction, after_standard_deduction
        ),
    );

    let excluded_pf = input.pf.excluded_from_taxable();
    let taxable_income = after_standard_deduction - excluded_pf;
    if input.pf.part_of_salary {
        audit.record(
            "employer_pf_exclusion",
            "Employer PF Exclusion",
            "17(1)",
            serde_json::json!({
                "income": after_standard_deduction.to_string(),
                "employer_pf": excluded_pf.to_string()
            }),
            serde_json::json!({ "taxable_income": taxable_income.to_string() }),
            format!(
                "Employer PF ₹{} is part of the quoted salary and not taxable",
                excluded_pf
            ),
        );
    }
    if taxable_income < Decimal::ZERO {
        audit.warn(
            "negative_taxable_income",
            format!("Taxable income is negative (₹{})", taxable_income),
            "medium",
        );
    }

    let slab_result = calculate_slab_tax(taxable_income, &rules.slabs);
    let slab_tax = slab_result.tax;
    audit.record(
        "slab_tax",
        "New Regime Slab Tax",
        "115BAC",
        serde_json::json!({ "taxable_income": taxable_income.to_string() }),
        serde_json::json!({
            "tax": slab_tax.to_string(),
            "bands": slab_result.portions.len()
        }),
        format!("Slab tax on ₹{} = ₹{}", taxable_income, slab_tax),
    );

    let (rebate, rebated_tax) = if taxable_income <= rules.rebate_income_limit {
        (slab_tax, Decimal::ZERO)
    } else {
        (Decimal::ZERO, slab_tax)
    };
    audit.record(
        "rebate_87a",
        "Section 87A Rebate",
        "87A",
        serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "rebate_income_limit": rules.rebate_income_limit.to_string(),
            "slab_tax": slab_tax.to_string()
        }),
        serde_json::json!({
            "rebate": rebate.to_string(),
            "tax": rebated_tax.to_string()
        }),
        if taxable_income <= rules.rebate_income_limit {
            format!(
                "Taxable income ₹{} is within ₹{}, full tax of ₹{} rebated",
                taxable_income, rules.rebate_income_limit, slab_tax
            )
        } else {
            format!(
                "Taxable income ₹{} exceeds ₹{}, no rebate",
                taxable_income, rules.rebate_income_limit
            )
        },
    );

    let marginal_tax_relief = rebated_tax >= rules.marginal_relief_min_tax
        && taxable_income <= rules.marginal_relief_income_ceiling;
    let tax = if marginal_tax_relief {
        taxable_income - rules.rebate_income_limit
    } else {
        rebated_tax
    };
    let marginal_relief_amount = rebated_tax - tax;
    if marginal_tax_relief {
        audit.record(
            "marginal_relief",
            "Marginal Relief",
            "87A",
            serde_json::json!({
                "taxable_income": taxable_income.to_string(),
                "tax": rebated_tax.to_string(),
                "marginal_relief_income_ceiling": rules.marginal_relief_income_ceiling.to_string()
            }),
            serde_json::json!({
                "tax": tax.to_string(),
                "relief": marginal_relief_amount.to_string()
            }),
            format!(
                "Tax ₹{} capped to income above ₹{}: ₹{}",
                rebated_tax, rules.rebate_income_limit, tax
            ),
        );
    }

    let cess = levies.cess_on(tax);
    audit.record(
        "cess",
        "Health and Education Cess",
        "Finance Act",
        serde_json::json!({
            "tax": tax.to_string(),
            "cess_rate_percent": levies.cess_rate_percent.to_string()
        }),
        serde_json::json!({ "cess": cess.to_string() }),
        format!("{}% of ₹{} = ₹{}", levies.cess_rate_percent, tax, cess),
    );

    let in_hand = calculate_in_hand(
        input.annual_salary,
        tax,
        cess,
        levies.professional_tax,
        &input.pf,
    );
    audit.record(
        "professional_tax",
        "Professional Tax",
        "16(iii)",
        serde_json::json!({ "professional_tax": levies.professional_tax.to_string() }),
        serde_json::json!({ "in_hand_annual": in_hand.annual.to_string() }),
        format!("Flat professional tax of ₹{}", levies.professional_tax),
    );

    debug!(
        annual_salary = %input.annual_salary,
        taxable_income = %taxable_income,
        tax = %tax,
        cess = %cess,
        marginal_tax_relief,
        "New regime tax calculated"
    );

    NewRegimeResult {
        annual_salary: input.annual_salary,
        standard_deduction: rules.standard_deduction,
        taxable_income,
        slab_tax,
        rebate,
        marginal_tax_relief,
        marginal_relief_amount,
        tax,
        cess,
        professional_tax: levies.professional_tax,
        total_pf: input.pf.total_paid(),
        in_hand,
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PfContribution;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn calculate(
        annual_salary: i64,
        employee_pf: i64,
        employer_pf: i64,
        part_of_salary: bool,
    ) -> NewRegimeResult {
        let rules = TaxRules::fy_2025_26();
        let input = NewRegimeInput {
            annual_salary: d(annual_salary),
            pf: PfContribution {
                employee: d(employee_pf),
                employer: d(employer_pf),
                part_of_salary,
            },
        };
        calculate_new_regime(&input, &rules)
    }

    /// Salary whose taxable income equals `taxable` with no PF in salary.
    fn calculate_taxable(taxable: i64) -> NewRegimeResult {
        calculate(taxable + 75_000, 0, 0, false)
    }

    #[test]
    fn test_fifteen_lakh_salary_without_pf_in_salary() {
        let result = calculate(1_500_000, 100_000, 100_000, false);

        assert_eq!(result.taxable_income, d(1_425_000));
        assert_eq!(result.slab_tax, d(93_750));
        assert_eq!(result.rebate, Decimal::ZERO);
        assert!(!result.marginal_tax_relief);
        assert_eq!(result.tax, d(93_750));
        assert_eq!(result.cess, d(3_750));
        assert_eq!(result.total_pf, d(100_000));
        assert_eq!(result.in_hand.annual, d(1_302_300));
        assert_eq!(result.in_hand.monthly, d(108_525));
    }

    #[test]
    fn test_employer_pf_excluded_when_part_of_salary() {
        let result = calculate(1_500_000, 100_000, 100_000, true);

        assert_eq!(result.taxable_income, d(1_325_000));
        // 60k + 15% of 1.25L
        assert_eq!(result.tax, d(78_750));
        assert_eq!(result.total_pf, d(200_000));
        assert!(result.audit.find("employer_pf_exclusion").is_some());
    }

    #[test]
    fn test_rebate_at_exact_threshold() {
        let result = calculate_taxable(1_200_000);

        assert_eq!(result.taxable_income, d(1_200_000));
        assert_eq!(result.slab_tax, d(60_000));
        assert_eq!(result.rebate, d(60_000));
        assert_eq!(result.tax, Decimal::ZERO);
        assert_eq!(result.cess, Decimal::ZERO);
        assert!(!result.marginal_tax_relief);
    }

    #[test]
    fn test_rebate_below_threshold() {
        let result = calculate_taxable(1_000_000);

        assert_eq!(result.slab_tax, d(40_000));
        assert_eq!(result.rebate, d(40_000));
        assert_eq!(result.tax, Decimal::ZERO);
    }

    #[test]
    fn test_marginal_relief_just_above_threshold() {
        let result = calculate_taxable(1_250_000);

        assert_eq!(result.slab_tax, d(67_500));
        assert_eq!(result.rebate, Decimal::ZERO);
        assert!(result.marginal_tax_relief);
        assert_eq!(result.tax, d(50_000));
        assert_eq!(result.marginal_relief_amount, d(17_500));
        assert_eq!(result.cess, d(2_000));
        assert!(result.audit.find("marginal_relief").is_some());
    }

    #[test]
    fn test_marginal_relief_at_ceiling() {
        let result = calculate_taxable(1_260_000);

        assert!(result.marginal_tax_relief);
        assert_eq!(result.slab_tax, d(69_000));
        assert_eq!(result.tax, d(60_000));
    }

    #[test]
    fn test_no_marginal_relief_above_ceiling() {
        let result = calculate_taxable(1_260_001);

        assert!(!result.marginal_tax_relief);
        assert_eq!(result.tax, result.slab_tax);
        assert_eq!(result.tax, Decimal::new(6_900_015, 2)); // 69000.15
        assert_eq!(result.marginal_relief_amount, Decimal::ZERO);
        assert!(result.audit.find("marginal_relief").is_none());
    }

    #[test]
    fn test_salary_below_standard_deduction_warns() {
        let result = calculate(50_000, 0, 0, false);

        assert_eq!(result.taxable_income, d(-25_000));
        assert_eq!(result.tax, Decimal::ZERO);
        assert!(result.audit.has_warning("negative_taxable_income"));
    }

    #[test]
    fn test_audit_steps_in_rule_order() {
        let result = calculate(1_500_000, 100_000, 100_000, false);
        let rule_ids: Vec<&str> = result
            .audit
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec!["standard_deduction", "slab_tax", "rebate_87a", "cess", "professional_tax"]
        );
        let slab_step = result.audit.find("slab_tax").unwrap();
        let recorded: Decimal = slab_step.output["tax"].as_str().unwrap().parse().unwrap();
        assert_eq!(recorded, d(93_750));
    }
}

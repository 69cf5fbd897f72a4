//! Old regime income tax calculation.
//!
//! The old regime trades lower slabs for the exemptions and deductions the new
//! regime drops: HRA, section 80C (capped, and shared with the employee PF),
//! 80D, 24(b), 80EE and anything else the employee claims. There is no
//! section 87A rebate or marginal relief here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxRules;
use crate::models::{AuditTrace, OldRegimeInput};

use super::in_hand::{InHandSalary, calculate_in_hand};
use super::slab_tax::calculate_slab_tax;

/// The result of an old-regime tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeResult {
    /// Gross annual salary.
    pub annual_salary: Decimal,
    /// Standard deduction applied.
    pub standard_deduction: Decimal,
    /// Section 80C investments claimed, before the cap.
    pub section_80c: Decimal,
    /// Employee PF counted towards section 80C.
    pub employee_pf_for_80c: Decimal,
    /// Section 80C deduction after the cap.
    pub total_80c: Decimal,
    /// All deductions subtracted after the standard deduction.
    pub total_deductions: Decimal,
    /// Income the slabs were applied to.
    pub taxable_income: Decimal,
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

/// Calculates income tax and in-hand salary under the old regime.
///
/// The employee PF contribution counts towards section 80C, and the combined
/// 80C figure is capped. Uncapped deductions are added on top and the total is
/// subtracted from salary after the standard deduction (and after the
/// employer PF, when that is part of the quoted salary).
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_old_regime;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::{Deductions, OldRegimeInput, PfContribution};
/// use rust_decimal::Decimal;
///
/// let input = OldRegimeInput {
///     annual_salary: Decimal::from(1_000_000),
///     deductions: Deductions {
///         hra: Decimal::from(100_000),
///         section_80d: Decimal::from(25_000),
///         section_80c: Decimal::from(100_000),
///         ..Default::default()
///     },
///     pf: PfContribution {
///         employee: Decimal::from(80_000),
///         employer: Decimal::from(80_000),
///         part_of_salary: false,
///     },
/// };
///
/// let result = calculate_old_regime(&input, &TaxRules::fy_2025_26());
/// assert_eq!(result.total_80c, Decimal::from(150_000));
/// assert_eq!(result.taxable_income, Decimal::from(675_000));
/// assert_eq!(result.tax, Decimal::from(47_500));
/// ```
pub fn calculate_old_regime(input: &OldRegimeInput, tax_rules: &TaxRules) -> OldRegimeResult {
    let rules = &tax_rules.old_regime;
    let levies = &tax_rules.levies;
    let deductions = &input.deductions;
    let mut audit = AuditTrace::default();

    let claimed_80c = deductions.section_80c + input.pf.employee;
    let total_80c = claimed_80c.min(rules.section_80c_cap);
    audit.record(
        "section_80c",
        "Section 80C Deduction",
        "80C",
        serde_json::json!({
            "section_80c": deductions.section_80c.to_string(),
            "employee_pf": input.pf.employee.to_string(),
            "cap": rules.section_80c_cap.to_string()
        }),
        serde_json::json!({ "total_80c": total_80c.to_string() }),
        if claimed_80c > rules.section_80c_cap {
            format!(
                "Claimed ₹{} (investments + employee PF) capped at ₹{}",
                claimed_80c, rules.section_80c_cap
            )
        } else {
            format!("Claimed ₹{} (investments + employee PF) within cap", claimed_80c)
        },
    );
    if claimed_80c > rules.section_80c_cap {
        audit.warn(
            "section_80c_capped",
            format!(
                "₹{} of section 80C claims exceed the cap and were ignored",
                claimed_80c - rules.section_80c_cap
            ),
            "low",
        );
    }

    let mut income = input.annual_salary - rules.standard_deduction;
    audit.record(
        "standard_deduction",
        "Standard Deduction",
        "16(ia)",
        serde_json::json!({
            "annual_salary": input.annual_salary.to_string(),
            "standard_deduction": rules.standard_deduction.to_string()
        }),
        serde_json::json!({ "income": income.to_string() }),
        format!(
            "₹{} - ₹{} = ₹{}",
            input.annual_salary, rules.standard_deduction, income
        ),
    );

    if input.pf.part_of_salary {
        let excluded_pf = input.pf.excluded_from_taxable();
        income -= excluded_pf;
        audit.record(
            "employer_pf_exclusion",
            "Employer PF Exclusion",
            "17(1)",
            serde_json::json!({ "employer_pf": excluded_pf.to_string() }),
            serde_json::json!({ "income": income.to_string() }),
            format!(
                "Employer PF ₹{} is part of the quoted salary and not taxable",
                excluded_pf
            ),
        );
    }

    let total_deductions = deductions.uncapped_total() + total_80c;
    let taxable_income = income - total_deductions;
    audit.record(
        "chapter_via_deductions",
        "Exemptions and Deductions",
        "10(13A), 24(b), 80C, 80D, 80EE",
        serde_json::json!({
            "hra": deductions.hra.to_string(),
            "section_80d": deductions.section_80d.to_string(),
            "section_24": deductions.section_24.to_string(),
            "section_80ee": deductions.section_80ee.to_string(),
            "other": deductions.other.to_string(),
            "total_80c": total_80c.to_string()
        }),
        serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "taxable_income": taxable_income.to_string()
        }),
        format!(
            "₹{} - ₹{} deductions = ₹{}",
            income, total_deductions, taxable_income
        ),
    );
    if taxable_income < Decimal::ZERO {
        audit.warn(
            "negative_taxable_income",
            format!("Taxable income is negative (₹{})", taxable_income),
            "medium",
        );
    }

    let slab_result = calculate_slab_tax(taxable_income, &rules.slabs);
    let tax = slab_result.tax;
    audit.record(
        "slab_tax",
        "Old Regime Slab Tax",
        "Finance Act",
        serde_json::json!({ "taxable_income": taxable_income.to_string() }),
        serde_json::json!({
            "tax": tax.to_string(),
            "bands": slab_result.portions.len()
        }),
        format!("Slab tax on ₹{} = ₹{}", taxable_income, tax),
    );

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
        total_deductions = %total_deductions,
        taxable_income = %taxable_income,
        tax = %tax,
        "Old regime tax calculated"
    );

    OldRegimeResult {
        annual_salary: input.annual_salary,
        standard_deduction: rules.standard_deduction,
        section_80c: deductions.section_80c,
        employee_pf_for_80c: input.pf.employee,
        total_80c,
        total_deductions,
        taxable_income,
        tax,
        cess,
        professional_tax: levies.professional_tax,
        total_pf: input.pf.total_paid(),
        in_hand,
        audit,
    }
}

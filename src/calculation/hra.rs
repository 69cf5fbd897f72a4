//! House rent allowance exemption under section 10(13A).
//!
//! The exempt HRA is the least of:
//! - the HRA actually received,
//! - rent paid in excess of a share of basic salary (10%),
//! - a share of basic salary that depends on the city (50% metro, 40% elsewhere).
//!
//! [`calculate_optimal_rent`] finds the rent at which the exemption stops
//! growing, and [`calculate_hra_exemption`] evaluates the exemption for a
//! given rent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TaxRules;
use crate::models::{AuditTrace, HraInput};

/// The result of an optimal rent calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalRentResult {
    /// Annual basic salary.
    pub basic_salary: Decimal,
    /// HRA received, or the city percentage of basic when not supplied.
    pub actual_hra: Decimal,
    /// City percentage of basic salary.
    pub percent_of_basic: Decimal,
    /// Annual rent that maximises the exemption.
    pub optimal_rent: Decimal,
    /// `optimal_rent / 12`, rounded up to the next rupee.
    pub monthly_optimal_rent: Decimal,
    /// Rent in excess of the basic salary offset at the optimal rent.
    pub rent_excess: Decimal,
    /// Exempt HRA at the optimal rent.
    pub hra_exemption: Decimal,
    /// HRA left taxable at the optimal rent.
    pub taxable_hra: Decimal,
    /// How each figure was derived.
    pub audit: AuditTrace,
}

/// The exemption for a specific rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraExemptionResult {
    /// Annual rent paid.
    pub annual_rent_paid: Decimal,
    /// HRA received, or the city percentage of basic when not supplied.
    pub actual_hra: Decimal,
    /// City percentage of basic salary.
    pub percent_of_basic: Decimal,
    /// Rent paid in excess of the basic salary offset, never negative.
    pub rent_excess: Decimal,
    /// Exempt HRA.
    pub hra_exemption: Decimal,
    /// HRA left taxable.
    pub taxable_hra: Decimal,
    /// How each figure was derived.
    pub audit: AuditTrace,
}

struct HraLimits {
    actual_hra: Decimal,
    percent_of_basic: Decimal,
    rent_offset: Decimal,
}

fn hra_limits(input: &HraInput, rules: &TaxRules, audit: &mut AuditTrace) -> HraLimits {
    let city_percent = rules.hra.city_percent(input.city);
    let percent_of_basic = input.basic_salary * city_percent / Decimal::ONE_HUNDRED;
    let actual_hra = input.hra_provided.unwrap_or(percent_of_basic);
    let rent_offset = input.basic_salary * rules.hra.rent_offset_percent / Decimal::ONE_HUNDRED;

    audit.record(
        "hra_limits",
        "HRA Exemption Limits",
        "10(13A)",
        serde_json::json!({
            "basic_salary": input.basic_salary.to_string(),
            "hra_provided": input.hra_provided.map(|hra| hra.to_string()),
            "city": input.city
        }),
        serde_json::json!({
            "actual_hra": actual_hra.to_string(),
            "percent_of_basic": percent_of_basic.to_string(),
            "rent_offset": rent_offset.to_string()
        }),
        format!(
            "{}% of basic = ₹{}, rent counts above ₹{}",
            city_percent, percent_of_basic, rent_offset
        ),
    );
    if input.hra_provided.is_none() {
        audit.warn(
            "hra_assumed",
            format!("HRA not supplied, assuming {}% of basic", city_percent),
            "low",
        );
    }

    HraLimits {
        actual_hra,
        percent_of_basic,
        rent_offset,
    }
}

/// Finds the annual rent that yields the largest HRA exemption.
///
/// Paying more than this rent does not increase the exemption, since the
/// lesser of the HRA received and the city percentage of basic caps it.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_optimal_rent;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::{CityType, HraInput};
/// use rust_decimal::Decimal;
///
/// let input = HraInput {
///     basic_salary: Decimal::from(600_000),
///     hra_provided: None,
///     city: CityType::Metro,
/// };
/// let result = calculate_optimal_rent(&input, &TaxRules::fy_2025_26());
///
/// assert_eq!(result.optimal_rent, Decimal::from(360_000));
/// assert_eq!(result.monthly_optimal_rent, Decimal::from(30_000));
/// assert_eq!(result.hra_exemption, Decimal::from(300_000));
/// ```
pub fn calculate_optimal_rent(input: &HraInput, rules: &TaxRules) -> OptimalRentResult {
    let mut audit = AuditTrace::default();
    let limits = hra_limits(input, rules, &mut audit);

    let optimal_rent = if limits.actual_hra > limits.percent_of_basic {
        limits.percent_of_basic + limits.rent_offset
    } else {
        limits.actual_hra + limits.rent_offset
    };
    let monthly_optimal_rent = (optimal_rent / Decimal::from(12)).ceil();
    audit.record(
        "optimal_rent",
        "Optimal Rent",
        "10(13A)",
        serde_json::json!({
            "actual_hra": limits.actual_hra.to_string(),
            "percent_of_basic": limits.percent_of_basic.to_string()
        }),
        serde_json::json!({
            "optimal_rent": optimal_rent.to_string(),
            "monthly_optimal_rent": monthly_optimal_rent.to_string()
        }),
        format!(
            "min(₹{}, ₹{}) + ₹{} = ₹{}",
            limits.actual_hra, limits.percent_of_basic, limits.rent_offset, optimal_rent
        ),
    );

    let rent_excess = optimal_rent - limits.rent_offset;
    let hra_exemption = limits
        .actual_hra
        .min(rent_excess)
        .min(limits.percent_of_basic);
    let taxable_hra = limits.actual_hra - hra_exemption;
    audit.record(
        "hra_exemption",
        "HRA Exemption",
        "10(13A)",
        serde_json::json!({ "rent_excess": rent_excess.to_string() }),
        serde_json::json!({
            "hra_exemption": hra_exemption.to_string(),
            "taxable_hra": taxable_hra.to_string()
        }),
        format!("Least of the three limits = ₹{}", hra_exemption),
    );

    debug!(
        basic_salary = %input.basic_salary,
        city = ?input.city,
        optimal_rent = %optimal_rent,
        hra_exemption = %hra_exemption,
        "Optimal rent calculated"
    );

    OptimalRentResult {
        basic_salary: input.basic_salary,
        actual_hra: limits.actual_hra,
        percent_of_basic: limits.percent_of_basic,
        optimal_rent,
        monthly_optimal_rent,
        rent_excess,
        hra_exemption,
        taxable_hra,
        audit,
    }
}

/// Calculates the HRA exemption for the rent actually paid.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_hra_exemption;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::{CityType, HraInput};
/// use rust_decimal::Decimal;
///
/// let input = HraInput {
///     basic_salary: Decimal::from(600_000),
///     hra_provided: Some(Decimal::from(240_000)),
///     city: CityType::Metro,
/// };
/// let result = calculate_hra_exemption(&input, Decimal::from(180_000), &TaxRules::fy_2025_26());
///
/// // 1.8L rent - 60k offset
/// assert_eq!(result.hra_exemption, Decimal::from(120_000));
/// assert_eq!(result.taxable_hra, Decimal::from(120_000));
/// ```
pub fn calculate_hra_exemption(
    input: &HraInput,
    annual_rent_paid: Decimal,
    rules: &TaxRules,
) -> HraExemptionResult {
    let mut audit = AuditTrace::default();
    let limits = hra_limits(input, rules, &mut audit);

    let rent_excess = (annual_rent_paid - limits.rent_offset).max(Decimal::ZERO);
    let hra_exemption = limits
        .actual_hra
        .min(rent_excess)
        .min(limits.percent_of_basic);
    let taxable_hra = limits.actual_hra - hra_exemption;
    audit.record(
        "hra_exemption",
        "HRA Exemption",
        "10(13A)",
        serde_json::json!({
            "annual_rent_paid": annual_rent_paid.to_string(),
            "rent_excess": rent_excess.to_string()
        }),
        serde_json::json!({
            "hra_exemption": hra_exemption.to_string(),
            "taxable_hra": taxable_hra.to_string()
        }),
        format!(
            "min(₹{}, ₹{}, ₹{}) = ₹{}",
            limits.actual_hra, rent_excess, limits.percent_of_basic, hra_exemption
        ),
    );
    if rent_excess.is_zero() {
        audit.warn(
            "rent_below_offset",
            format!(
                "Rent ₹{} does not exceed ₹{}, no HRA is exempt",
                annual_rent_paid, limits.rent_offset
            ),
            "medium",
        );
    }

    debug!(
        annual_rent_paid = %annual_rent_paid,
        hra_exemption = %hra_exemption,
        "HRA exemption calculated"
    );

    HraExemptionResult {
        annual_rent_paid,
        actual_hra: limits.actual_hra,
        percent_of_basic: limits.percent_of_basic,
        rent_excess,
        hra_exemption,
        taxable_hra,
        audit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CityType;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn input(basic: i64, hra: Option<i64>, city: CityType) -> HraInput {
        HraInput {
            basic_salary: d(basic),
            hra_provided: hra.map(d),
            city,
        }
    }

    #[test]
    fn test_metro_without_hra_assumes_half_of_basic() {
        let result = calculate_optimal_rent(
            &input(600_000, None, CityType::Metro),
            &TaxRules::fy_2025_26(),
        );

        assert_eq!(result.actual_hra, d(300_000));
        assert_eq!(result.percent_of_basic, d(300_000));
        assert_eq!(result.optimal_rent, d(360_000));
        assert_eq!(result.rent_excess, d(300_000));
        assert_eq!(result.hra_exemption, d(300_000));
        assert_eq!(result.taxable_hra, Decimal::ZERO);
        assert!(result.audit.has_warning("hra_assumed"));
    }

    #[test]
    fn test_non_metro_rounds_monthly_rent_up() {
        let result = calculate_optimal_rent(
            &input(600_000, Some(200_000), CityType::NonMetro),
            &TaxRules::fy_2025_26(),
        );

        assert_eq!(result.percent_of_basic, d(240_000));
        assert_eq!(result.optimal_rent, d(260_000));
        assert_eq!(result.monthly_optimal_rent, d(21_667));
        assert_eq!(result.hra_exemption, d(200_000));
    }

    #[test]
    fn test_hra_above_city_limit_is_partly_taxable() {
        let result = calculate_optimal_rent(
            &input(600_000, Some(400_000), CityType::Metro),
            &TaxRules::fy_2025_26(),
        );

        assert_eq!(result.optimal_rent, d(360_000));
        assert_eq!(result.hra_exemption, d(300_000));
        assert_eq!(result.taxable_hra, d(100_000));
    }

    #[test]
    fn test_exemption_at_optimal_rent_matches() {
        let rules = TaxRules::fy_2025_26();
        let hra_input = input(750_000, Some(275_000), CityType::NonMetro);

        let optimal = calculate_optimal_rent(&hra_input, &rules);
        let at_optimal = calculate_hra_exemption(&hra_input, optimal.optimal_rent, &rules);

        assert_eq!(at_optimal.hra_exemption, optimal.hra_exemption);
        assert_eq!(
            at_optimal.hra_exemption,
            optimal.actual_hra.min(optimal.percent_of_basic)
        );
    }

    #[test]
    fn test_paying_more_than_optimal_does_not_help() {
        let rules = TaxRules::fy_2025_26();
        let hra_input = input(600_000, Some(200_000), CityType::Metro);

        let optimal = calculate_optimal_rent(&hra_input, &rules);
        let above = calculate_hra_exemption(&hra_input, optimal.optimal_rent + d(50_000), &rules);

        assert_eq!(above.hra_exemption, optimal.hra_exemption);
    }

    #[test]
    fn test_rent_below_offset_exempts_nothing() {
        let result = calculate_hra_exemption(
            &input(600_000, Some(200_000), CityType::Metro),
            d(50_000),
            &TaxRules::fy_2025_26(),
        );

        assert_eq!(result.rent_excess, Decimal::ZERO);
        assert_eq!(result.hra_exemption, Decimal::ZERO);
        assert_eq!(result.taxable_hra, d(200_000));
        assert!(result.audit.has_warning("rent_below_offset"));
    }
}

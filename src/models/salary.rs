//! Salary input models for the two tax regimes.
//!
//! This module defines [`PfContribution`], [`Deductions`], and the
//! per-regime inputs [`NewRegimeInput`] and [`OldRegimeInput`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual provident fund contributions.
///
/// When `part_of_salary` is true the quoted annual salary already includes
/// the employer's contribution (a "cost to company" figure), so the employer
/// share is removed from taxable income and from in-hand pay.
///
/// # Example
///
/// ```
/// use salary_engine::models::PfContribution;
/// use rust_decimal::Decimal;
///
/// let pf = PfContribution {
///     employee: Decimal::from(21_600),
///     employer: Decimal::from(21_600),
///     part_of_salary: true,
/// };
/// assert_eq!(pf.total_paid(), Decimal::from(43_200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfContribution {
    /// Employee's annual PF contribution.
    pub employee: Decimal,
    /// Employer's annual PF contribution.
    pub employer: Decimal,
    /// Whether the employer contribution is included in the annual salary.
    #[serde(default)]
    pub part_of_salary: bool,
}

impl PfContribution {
    /// Returns the PF deducted from the quoted salary.
    ///
    /// Both shares when the employer contribution is part of the salary,
    /// otherwise only the employee share.
    pub fn total_paid(&self) -> Decimal {
        if self.part_of_salary {
            self.employee + self.employer
        } else {
            self.employee
        }
    }

    /// Returns the employer share to exclude from taxable income.
    pub fn excluded_from_taxable(&self) -> Decimal {
        if self.part_of_salary {
            self.employer
        } else {
            Decimal::ZERO
        }
    }
}

/// Input to the new-regime tax calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeInput {
    /// Gross annual salary.
    pub annual_salary: Decimal,
    /// Provident fund contributions.
    pub pf: PfContribution,
}

/// Chapter VI-A and other deductions claimed under the old regime.
///
/// All amounts are annual. `section_80c` excludes employee PF, which is
/// added separately before the 80C cap is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Exempt house rent allowance.
    #[serde(default)]
    pub hra: Decimal,
    /// Section 80D health insurance premiums.
    #[serde(default)]
    pub section_80d: Decimal,
    /// Section 24 home loan interest.
    #[serde(default)]
    pub section_24: Decimal,
    /// Section 80EE first-home loan interest.
    #[serde(default)]
    pub section_80ee: Decimal,
    /// Any other deductions.
    #[serde(default)]
    pub other: Decimal,
    /// Section 80C investments other than employee PF.
    #[serde(default)]
    pub section_80c: Decimal,
}

impl Deductions {
    /// Sum of every deduction except 80C, which is capped separately.
    pub fn uncapped_total(&self) -> Decimal {
        self.hra + self.section_80d + self.section_24 + self.section_80ee + self.other
    }
}

/// Input to the old-regime tax calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeInput {
    /// Gross annual salary.
    pub annual_salary: Decimal,
    /// Deductions claimed.
    #[serde(default)]
    pub deductions: Deductions,
    /// Provident fund contributions.
    pub pf: PfContribution,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pf(part_of_salary: bool) -> PfContribution {
        PfContribution {
            employee: Decimal::from(100_000),
            employer: Decimal::from(80_000),
            part_of_salary,
        }
    }

    #[test]
    fn test_total_paid_includes_employer_share_when_part_of_salary() {
        assert_eq!(pf(true).total_paid(), Decimal::from(180_000));
        assert_eq!(pf(false).total_paid(), Decimal::from(100_000));
    }

    #[test]
    fn test_excluded_from_taxable_only_when_part_of_salary() {
        assert_eq!(pf(true).excluded_from_taxable(), Decimal::from(80_000));
        assert_eq!(pf(false).excluded_from_taxable(), Decimal::ZERO);
    }

    #[test]
    fn test_deductions_uncapped_total_excludes_80c() {
        let deductions = Deductions {
            hra: Decimal::from(100_000),
            section_80d: Decimal::from(25_000),
            section_24: Decimal::from(200_000),
            section_80ee: Decimal::from(50_000),
            other: Decimal::from(10_000),
            section_80c: Decimal::from(150_000),
        };
        assert_eq!(deductions.uncapped_total(), Decimal::from(385_000));
    }

    #[test]
    fn test_old_regime_input_deductions_default_to_zero() {
        let json = r#"{
            "annual_salary": "1000000",
            "pf": { "employee": "50000", "employer": "50000" }
        }"#;
        let input: OldRegimeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.deductions, Deductions::default());
        assert!(!input.pf.part_of_salary);
    }
}

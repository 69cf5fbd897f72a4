//! Configuration types for tax and benefit rules.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML files, one [`TaxRules`] per financial year.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{CityType, TaxSlab, TaxSlabTable};

/// New (default) regime rules under section 115BAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeRules {
    /// Standard deduction from salary income.
    pub standard_deduction: Decimal,
    /// Marginal tax slabs.
    pub slabs: TaxSlabTable,
    /// Taxable income up to which the section 87A rebate wipes out the tax.
    pub rebate_income_limit: Decimal,
    /// Minimum post-rebate tax at which marginal relief is considered.
    pub marginal_relief_min_tax: Decimal,
    /// Taxable income above which marginal relief no longer applies.
    pub marginal_relief_income_ceiling: Decimal,
}

/// Old regime rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeRules {
    /// Standard deduction from salary income.
    pub standard_deduction: Decimal,
    /// Marginal tax slabs.
    pub slabs: TaxSlabTable,
    /// Cap on the combined section 80C deduction (investments plus employee PF).
    pub section_80c_cap: Decimal,
}

/// Levies applied on top of, or alongside, income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevyRules {
    /// Health and education cess, in percent of tax.
    pub cess_rate_percent: Decimal,
    /// Flat annual professional tax.
    pub professional_tax: Decimal,
}

impl LevyRules {
    /// Returns the cess payable on `tax`.
    pub fn cess_on(&self, tax: Decimal) -> Decimal {
        tax * self.cess_rate_percent / Decimal::ONE_HUNDRED
    }
}

/// Gratuity and leave encashment formula constants and exemption caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionRules {
    /// Maximum tax-exempt gratuity.
    pub gratuity_cap: Decimal,
    /// Days of wages paid per completed year of service.
    pub gratuity_days_of_wages: Decimal,
    /// Working days assumed per month.
    pub gratuity_working_days_per_month: Decimal,
    /// Maximum tax-exempt leave encashment.
    pub leave_encashment_cap: Decimal,
    /// Months per year used to derive the per-day rate.
    pub leave_months_per_year: Decimal,
    /// Days per month used to derive the per-day rate.
    pub leave_days_per_month: Decimal,
}

impl ExemptionRules {
    /// Checks that every constant the formulas divide by is positive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first non-positive divisor.
    pub fn validate(&self) -> EngineResult<()> {
        let divisors = [
            ("gratuity_working_days_per_month", self.gratuity_working_days_per_month),
            ("leave_months_per_year", self.leave_months_per_year),
            ("leave_days_per_month", self.leave_days_per_month),
        ];

        for (field, value) in divisors {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: format!("exemptions.{}", field),
                    message: format!("must be greater than zero, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// House rent allowance exemption percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraRules {
    /// Share of basic salary exempt in metro cities, in percent.
    pub metro_percent: Decimal,
    /// Share of basic salary exempt elsewhere, in percent.
    pub non_metro_percent: Decimal,
    /// Share of basic salary that rent must exceed before it counts, in percent.
    pub rent_offset_percent: Decimal,
}

impl HraRules {
    /// Returns the exemption ceiling percentage for `city`.
    pub fn city_percent(&self, city: CityType) -> Decimal {
        match city {
            CityType::Metro => self.metro_percent,
            CityType::NonMetro => self.non_metro_percent,
        }
    }
}

/// Every rule the calculators need for one financial year.
///
/// # Example
///
/// ```
/// use salary_engine::config::TaxRules;
/// use rust_decimal::Decimal;
///
/// let rules = TaxRules::fy_2025_26();
/// assert_eq!(rules.financial_year, "2025-26");
/// assert_eq!(rules.new_regime.standard_deduction, Decimal::from(75_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRules {
    /// First day the rules apply (1 April of the financial year).
    pub effective_date: NaiveDate,
    /// Financial-year label, e.g. "2025-26".
    pub financial_year: String,
    /// New regime rules.
    pub new_regime: NewRegimeRules,
    /// Old regime rules.
    pub old_regime: OldRegimeRules,
    /// Cess and professional tax.
    pub levies: LevyRules,
    /// Gratuity and leave encashment rules.
    pub exemptions: ExemptionRules,
    /// HRA rules.
    pub hra: HraRules,
}

impl TaxRules {
    /// Built-in rules for financial year 2025-26 (assessment year 2026-27).
    pub fn fy_2025_26() -> Self {
        fn d(n: i64) -> Decimal {
            Decimal::from(n)
        }

        Self {
            effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap_or_default(),
            financial_year: "2025-26".to_string(),
            new_regime: NewRegimeRules {
                standard_deduction: d(75_000),
                slabs: TaxSlabTable::from_trusted(vec![
                    TaxSlab::bounded(d(400_000), d(0)),
                    TaxSlab::bounded(d(800_000), d(5)),
                    TaxSlab::bounded(d(1_200_000), d(10)),
                    TaxSlab::bounded(d(1_600_000), d(15)),
                    TaxSlab::bounded(d(2_000_000), d(20)),
                    TaxSlab::bounded(d(2_400_000), d(25)),
                    TaxSlab::unbounded(d(30)),
                ]),
                rebate_income_limit: d(1_200_000),
                marginal_relief_min_tax: d(60_000),
                marginal_relief_income_ceiling: d(1_260_000),
            },
            old_regime: OldRegimeRules {
                standard_deduction: d(50_000),
                slabs: TaxSlabTable::from_trusted(vec![
                    TaxSlab::bounded(d(250_000), d(0)),
                    TaxSlab::bounded(d(500_000), d(5)),
                    TaxSlab::bounded(d(1_000_000), d(20)),
                    TaxSlab::unbounded(d(30)),
                ]),
                section_80c_cap: d(150_000),
            },
            levies: LevyRules {
                cess_rate_percent: d(4),
                professional_tax: d(200),
            },
            exemptions: ExemptionRules {
                gratuity_cap: d(2_000_000),
                gratuity_days_of_wages: d(15),
                gratuity_working_days_per_month: d(26),
                leave_encashment_cap: d(2_000_000),
                leave_months_per_year: d(12),
                leave_days_per_month: d(30),
            },
            hra: HraRules {
                metro_percent: d(50),
                non_metro_percent: d(40),
                rent_offset_percent: d(10),
            },
        }
    }
}

impl TaxRules {
    /// Checks the invariants serde cannot express on its own.
    ///
    /// Slab tables are already validated while deserializing.
    pub fn validate(&self) -> EngineResult<()> {
        self.exemptions.validate()
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::fy_2025_26()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_match_fy_2025_26() {
        let rules = TaxRules::fy_2025_26();
        assert_eq!(rules.effective_date, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(rules.new_regime.slabs.len(), 7);
        assert_eq!(rules.old_regime.slabs.len(), 4);
        assert_eq!(rules.new_regime.rebate_income_limit, Decimal::from(1_200_000));
        assert_eq!(rules.old_regime.section_80c_cap, Decimal::from(150_000));
        assert_eq!(rules.levies.professional_tax, Decimal::from(200));
    }

    #[test]
    fn test_builtin_slab_tables_are_valid() {
        let rules = TaxRules::fy_2025_26();
        assert!(TaxSlabTable::new(rules.new_regime.slabs.slabs().to_vec()).is_ok());
        assert!(TaxSlabTable::new(rules.old_regime.slabs.slabs().to_vec()).is_ok());
    }

    #[test]
    fn test_cess_on_tax() {
        let levies = TaxRules::fy_2025_26().levies;
        assert_eq!(levies.cess_on(Decimal::from(93_750)), Decimal::from(3_750));
        assert_eq!(levies.cess_on(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_hra_city_percent() {
        let hra = TaxRules::fy_2025_26().hra;
        assert_eq!(hra.city_percent(CityType::Metro), Decimal::from(50));
        assert_eq!(hra.city_percent(CityType::NonMetro), Decimal::from(40));
    }

    #[test]
    fn test_builtin_rules_pass_validation() {
        assert!(TaxRules::fy_2025_26().validate().is_ok());
    }

    #[test]
    fn test_zero_divisor_fails_validation() {
        let mut rules = TaxRules::fy_2025_26();
        rules.exemptions.leave_days_per_month = Decimal::ZERO;

        match rules.validate() {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "exemptions.leave_days_per_month");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }

        let mut rules = TaxRules::fy_2025_26();
        rules.exemptions.gratuity_working_days_per_month = Decimal::from(-26);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_default_is_latest_builtin() {
        assert_eq!(TaxRules::default(), TaxRules::fy_2025_26());
    }
}

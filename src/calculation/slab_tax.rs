//! Marginal slab tax computation.
//!
//! This module integrates a taxable income over a [`TaxSlabTable`], applying
//! each slab's rate only to the part of the income that falls inside its band.
//! Both the new and the old regime use it with their own table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TaxSlabTable;

/// The part of an income taxed inside one slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabPortion {
    /// Lower edge of the band.
    pub lower: Decimal,
    /// Upper edge of the band, `None` for the top band.
    pub upper: Option<Decimal>,
    /// Marginal rate in percent.
    pub rate_percent: Decimal,
    /// Income falling inside the band.
    pub amount: Decimal,
    /// Tax on `amount`.
    pub tax: Decimal,
}

/// The result of a slab tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTaxResult {
    /// Total tax across all bands.
    pub tax: Decimal,
    /// The bands the income reached, lowest first.
    pub portions: Vec<SlabPortion>,
}

/// Computes marginal tax on `taxable_income`.
///
/// Walks the slabs in ascending order, taxing at most the band width in each,
/// and stops once the income is used up. The top slab is unbounded and takes
/// whatever remains. Zero or negative income yields zero tax and no portions.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_slab_tax;
/// use salary_engine::config::TaxRules;
/// use rust_decimal::Decimal;
///
/// let rules = TaxRules::fy_2025_26();
/// let result = calculate_slab_tax(Decimal::from(1_425_000), &rules.new_regime.slabs);
///
/// // 5% of 4L + 10% of 4L + 15% of 2.25L
/// assert_eq!(result.tax, Decimal::from(93_750));
/// assert_eq!(result.portions.len(), 4);
/// ```
pub fn calculate_slab_tax(taxable_income: Decimal, table: &TaxSlabTable) -> SlabTaxResult {
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut previous_limit = Decimal::ZERO;
    let mut portions = Vec::new();

    for slab in table.slabs() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let amount = match slab.upper_limit {
            Some(limit) => (limit - previous_limit).min(remaining),
            None => remaining,
        };
        let slab_tax = amount * slab.rate_percent / Decimal::ONE_HUNDRED;

        portions.push(SlabPortion {
            lower: previous_limit,
            upper: slab.upper_limit,
            rate_percent: slab.rate_percent,
            amount,
            tax: slab_tax,
        });

        tax += slab_tax;
        remaining -= amount;
        if let Some(limit) = slab.upper_limit {
            previous_limit = limit;
        }
    }

    SlabTaxResult { tax, portions }
}

//! Exempt/taxable split for capped exemptions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount divided into its tax-exempt and taxable parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptionSplit {
    /// Portion up to the cap.
    pub tax_exempt_amount: Decimal,
    /// Portion above the cap, zero when the amount is within it.
    pub taxable_amount: Decimal,
}

/// Splits `amount` at `cap`.
///
/// `tax_exempt_amount + taxable_amount == amount` for every non-negative amount.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::split_exemption;
/// use rust_decimal::Decimal;
///
/// let split = split_exemption(Decimal::from(2_500_000), Decimal::from(2_000_000));
/// assert_eq!(split.tax_exempt_amount, Decimal::from(2_000_000));
/// assert_eq!(split.taxable_amount, Decimal::from(500_000));
/// ```
pub fn split_exemption(amount: Decimal, cap: Decimal) -> ExemptionSplit {
    ExemptionSplit {
        tax_exempt_amount: amount.min(cap),
        taxable_amount: (amount - cap).max(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_amount_below_cap_is_fully_exempt() {
        let split = split_exemption(d(576_923), d(2_000_000));
        assert_eq!(split.tax_exempt_amount, d(576_923));
        assert_eq!(split.taxable_amount, Decimal::ZERO);
    }

    #[test]
    fn test_amount_at_cap_is_fully_exempt() {
        let split = split_exemption(d(2_000_000), d(2_000_000));
        assert_eq!(split.tax_exempt_amount, d(2_000_000));
        assert_eq!(split.taxable_amount, Decimal::ZERO);
    }

    #[test]
    fn test_amount_above_cap_is_split() {
        let split = split_exemption(d(2_000_001), d(2_000_000));
        assert_eq!(split.tax_exempt_amount, d(2_000_000));
        assert_eq!(split.taxable_amount, d(1));
    }
}

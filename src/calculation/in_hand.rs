//! In-hand (take-home) salary after tax, cess, professional tax and PF.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PfContribution;

/// Take-home pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InHandSalary {
    /// Annual take-home pay.
    pub annual: Decimal,
    /// Annual take-home pay divided by twelve.
    pub monthly: Decimal,
}

/// Computes take-home pay from the quoted annual salary.
///
/// `annual = salary - tax - cess - professional_tax - pf.total_paid()`.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_in_hand;
/// use salary_engine::models::PfContribution;
/// use rust_decimal::Decimal;
///
/// let pf = PfContribution {
///     employee: Decimal::from(100_000),
///     employer: Decimal::from(100_000),
///     part_of_salary: false,
/// };
/// let in_hand = calculate_in_hand(
///     Decimal::from(1_500_000),
///     Decimal::from(93_750),
///     Decimal::from(3_750),
///     Decimal::from(200),
///     &pf,
/// );
/// assert_eq!(in_hand.annual, Decimal::from(1_302_300));
/// assert_eq!(in_hand.monthly, Decimal::from(108_525));
/// ```
pub fn calculate_in_hand(
    annual_salary: Decimal,
    tax: Decimal,
    cess: Decimal,
    professional_tax: Decimal,
    pf: &PfContribution,
) -> InHandSalary {
    let annual = annual_salary - tax - cess - professional_tax - pf.total_paid();

    InHandSalary {
        annual,
        monthly: annual / Decimal::from(12),
    }
}

//! Inputs for the retirement and leave benefit calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Input to the gratuity calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratuityInput {
    /// Last drawn monthly basic salary (plus dearness allowance).
    pub monthly_basic: Decimal,
    /// Completed years of service.
    pub years_of_service: Decimal,
}

/// Which pay figure a leave encashment is computed on.
///
/// The calculation itself does not depend on the basis; it is recorded so
/// the result can say what the per-day amount was derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayBasis {
    /// Annual basic salary.
    #[default]
    Basic,
    /// Annual gross salary.
    Gross,
}

/// Input to the leave encashment calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEncashmentInput {
    /// Annual pay on the chosen basis.
    pub pay_amount: Decimal,
    /// Which pay figure `pay_amount` is.
    #[serde(default)]
    pub pay_basis: PayBasis,
    /// Number of leave days being encashed.
    pub number_of_leaves: Decimal,
}

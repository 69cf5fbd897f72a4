//! Credit card reward structure models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Points earned on a given spend, e.g. "4 points per ₹150".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEarning {
    /// The spend that earns `points_earned`.
    pub spend_amount: Decimal,
    /// Points earned on `spend_amount`.
    pub points_earned: Decimal,
}

/// Conversion of reward points into airline miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirmilesConversion {
    /// Air miles received per reward point.
    pub points_to_airmiles: Decimal,
    /// Rupee value of one air mile.
    pub airmile_value: Decimal,
}

/// A credit card's complete reward structure.
///
/// # Example
///
/// ```
/// use salary_engine::models::{RewardCard, RewardEarning};
/// use rust_decimal::Decimal;
///
/// let card = RewardCard {
///     name: "Everyday Rewards".to_string(),
///     basic: RewardEarning {
///         spend_amount: Decimal::from(150),
///         points_earned: Decimal::from(4),
///     },
///     special: None,
///     point_value: Decimal::new(25, 2),
///     airmiles: None,
/// };
/// assert!(!card.has_airmiles());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCard {
    /// Display name of the card.
    pub name: String,
    /// Earning on regular spend.
    pub basic: RewardEarning,
    /// Earning on accelerated (special category) spend, if any.
    #[serde(default)]
    pub special: Option<RewardEarning>,
    /// Rupee value of one reward point.
    pub point_value: Decimal,
    /// Airmiles transfer option, if the card supports it.
    #[serde(default)]
    pub airmiles: Option<AirmilesConversion>,
}

impl RewardCard {
    /// Returns true if points can be transferred to air miles.
    pub fn has_airmiles(&self) -> bool {
        self.airmiles.is_some()
    }
}

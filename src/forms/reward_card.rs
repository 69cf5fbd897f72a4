//! Credit card reward form, also the record stored for a favorite card.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{amount_text, optional, required};
use crate::error::{EngineError, EngineResult};
use crate::models::{AirmilesConversion, RewardCard, RewardEarning};

/// The credit card reward form.
///
/// Name, spend, points and point value are required. The special category
/// needs both of its fields or neither; the airmiles fields are required only
/// when `has_airmiles` is ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardCardForm {
    /// Display name of the card.
    #[serde(default)]
    pub card_name: String,
    /// Reference spend for regular purchases.
    #[serde(default, deserialize_with = "amount_text")]
    pub spend_amount: Option<String>,
    /// Points earned on the reference spend.
    #[serde(default, deserialize_with = "amount_text")]
    pub points_earned: Option<String>,
    /// Rupee value of one point.
    #[serde(default, deserialize_with = "amount_text")]
    pub point_value: Option<String>,
    /// Reference spend for special category purchases.
    #[serde(default, deserialize_with = "amount_text")]
    pub special_spend_amount: Option<String>,
    /// Points earned on the special category reference spend.
    #[serde(default, deserialize_with = "amount_text")]
    pub special_points_earned: Option<String>,
    /// Whether points can be moved to air miles.
    #[serde(default)]
    pub has_airmiles: bool,
    /// Air miles per point.
    #[serde(default, deserialize_with = "amount_text")]
    pub points_to_airmiles: Option<String>,
    /// Rupee value of one air mile.
    #[serde(default, deserialize_with = "amount_text")]
    pub airmiles_value: Option<String>,
    /// Spend to project rewards for.
    #[serde(default, deserialize_with = "amount_text")]
    pub example_spend: Option<String>,
}

impl RewardCardForm {
    /// Returns the example spend, if one was entered.
    pub fn example_spend(&self) -> EngineResult<Option<Decimal>> {
        optional("example_spend", &self.example_spend)
    }
}

impl TryFrom<RewardCardForm> for RewardCard {
    type Error = EngineError;

    fn try_from(form: RewardCardForm) -> EngineResult<Self> {
        let name = form.card_name.trim();
        if name.is_empty() {
            return Err(EngineError::MissingField {
                field: "card_name".to_string(),
            });
        }

        let basic = RewardEarning {
            spend_amount: required("spend_amount", &form.spend_amount)?,
            points_earned: required("points_earned", &form.points_earned)?,
        };
        let point_value = required("point_value", &form.point_value)?;

        let special = match (
            optional("special_spend_amount", &form.special_spend_amount)?,
            optional("special_points_earned", &form.special_points_earned)?,
        ) {
            (Some(spend_amount), Some(points_earned)) => Some(RewardEarning {
                spend_amount,
                points_earned,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(EngineError::MissingField {
                    field: "special_points_earned".to_string(),
                });
            }
            (None, Some(_)) => {
                return Err(EngineError::MissingField {
                    field: "special_spend_amount".to_string(),
                });
            }
        };

        let airmiles = if form.has_airmiles {
            Some(AirmilesConversion {
                points_to_airmiles: required("points_to_airmiles", &form.points_to_airmiles)?,
                airmile_value: required("airmiles_value", &form.airmiles_value)?,
            })
        } else {
            None
        };

        Ok(RewardCard {
            name: name.to_string(),
            basic,
            special,
            point_value,
            airmiles,
        })
    }
}

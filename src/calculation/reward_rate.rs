//! Credit card reward rate calculations.
//!
//! A card earns points on spend; points are worth a fixed rupee value, or can
//! be transferred to air miles worth their own value. The reward rate is the
//! value returned per rupee spent, expressed as a percentage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AirmilesConversion, RewardCard, RewardEarning};

/// Reward rate when points are redeemed at their point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRate {
    /// Value returned per rupee spent, in percent.
    pub reward_percentage: Decimal,
    /// Points earned per rupee spent.
    pub points_per_rupee: Decimal,
    /// Rupee value of one point.
    pub value_per_point: Decimal,
}

/// Reward rate when points are transferred to air miles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirmilesRate {
    /// Air miles received for the points earned on the reference spend.
    pub airmiles_earned: Decimal,
    /// Rupee value of those air miles.
    pub reward_value: Decimal,
    /// Value returned per rupee spent, in percent.
    pub reward_percentage: Decimal,
    /// Air miles earned per rupee spent.
    pub airmiles_per_rupee: Decimal,
    /// Rupee value of one air mile.
    pub value_per_airmile: Decimal,
}

/// A rate that converts spend into reward units of some rupee value.
pub trait EarnRate {
    /// Reward units (points or air miles) earned per rupee.
    fn units_per_rupee(&self) -> Decimal;

    /// Rupee value of one reward unit.
    fn value_per_unit(&self) -> Decimal;

    /// Value returned per rupee spent, in percent.
    fn percentage(&self) -> Decimal;
}

impl EarnRate for RewardRate {
    fn units_per_rupee(&self) -> Decimal {
        self.points_per_rupee
    }

    fn value_per_unit(&self) -> Decimal {
        self.value_per_point
    }

    fn percentage(&self) -> Decimal {
        self.reward_percentage
    }
}

impl EarnRate for AirmilesRate {
    fn units_per_rupee(&self) -> Decimal {
        self.airmiles_per_rupee
    }

    fn value_per_unit(&self) -> Decimal {
        self.value_per_airmile
    }

    fn percentage(&self) -> Decimal {
        self.reward_percentage
    }
}

/// Rewards on an example monthly (or any) spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendProjection {
    /// Spend the projection was made for.
    pub spend: Decimal,
    /// Points or air miles earned.
    pub units_earned: Decimal,
    /// Rupee value of the units earned.
    pub reward_amount: Decimal,
}

/// Which way of earning and redeeming a summary row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    /// Regular spend, points redeemed at point value.
    Basic,
    /// Special category spend, points redeemed at point value.
    Special,
    /// Regular spend, points transferred to air miles.
    BasicAirmiles,
    /// Special category spend, points transferred to air miles.
    SpecialAirmiles,
}

/// One row of a card summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardVariant {
    /// What this row describes.
    pub kind: RewardKind,
    /// Value returned per rupee spent, in percent.
    pub reward_percentage: Decimal,
    /// Rewards on the example spend, when one was given.
    pub projection: Option<SpendProjection>,
}

/// Every reward option a card offers, and the best of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSummary {
    /// Display name of the card.
    pub card_name: String,
    /// Available options, basic first.
    pub variants: Vec<RewardVariant>,
    /// The option with the highest percentage; the earlier one wins a tie.
    pub best: RewardKind,
}

impl RewardSummary {
    /// Returns the row for `kind`, if the card offers it.
    pub fn variant(&self, kind: RewardKind) -> Option<&RewardVariant> {
        self.variants.iter().find(|variant| variant.kind == kind)
    }

    /// Returns the best row.
    pub fn best_variant(&self) -> Option<&RewardVariant> {
        self.variant(self.best)
    }
}

fn ensure_spend(metric: &str, spend: Decimal) -> EngineResult<()> {
    if spend.is_zero() {
        return Err(EngineError::UndefinedRate {
            metric: metric.to_string(),
            reason: "spend amount is zero".to_string(),
        });
    }
    Ok(())
}

fn overflow(metric: &str) -> EngineError {
    EngineError::UndefinedRate {
        metric: metric.to_string(),
        reason: "amounts are too large to compute".to_string(),
    }
}

/// Computes the reward rate for points redeemed at `point_value`.
///
/// # Errors
///
/// Returns [`EngineError::UndefinedRate`] if `earning.spend_amount` is zero,
/// or if the amounts are too large for the rate to be represented.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_reward_rate;
/// use salary_engine::models::RewardEarning;
/// use rust_decimal::Decimal;
///
/// // 10 points per ₹100, each point worth ₹0.50
/// let earning = RewardEarning {
///     spend_amount: Decimal::from(100),
///     points_earned: Decimal::from(10),
/// };
/// let rate = calculate_reward_rate(&earning, Decimal::new(5, 1)).unwrap();
/// assert_eq!(rate.reward_percentage, Decimal::from(5));
/// ```
pub fn calculate_reward_rate(
    earning: &RewardEarning,
    point_value: Decimal,
) -> EngineResult<RewardRate> {
    const METRIC: &str = "reward percentage";
    ensure_spend(METRIC, earning.spend_amount)?;

    let points_per_rupee = earning
        .points_earned
        .checked_div(earning.spend_amount)
        .ok_or_else(|| overflow(METRIC))?;
    let reward_percentage = earning
        .points_earned
        .checked_mul(point_value)
        .and_then(|value| value.checked_div(earning.spend_amount))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(METRIC))?;

    Ok(RewardRate {
        reward_percentage,
        points_per_rupee,
        value_per_point: point_value,
    })
}

/// Computes the reward rate when the points are transferred to air miles.
///
/// # Errors
///
/// Returns [`EngineError::UndefinedRate`] if `earning.spend_amount` is zero,
/// or if the amounts are too large for the rate to be represented.
pub fn calculate_airmiles_rate(
    earning: &RewardEarning,
    conversion: &AirmilesConversion,
) -> EngineResult<AirmilesRate> {
    const METRIC: &str = "airmiles reward percentage";
    ensure_spend(METRIC, earning.spend_amount)?;

    let airmiles_earned = earning
        .points_earned
        .checked_mul(conversion.points_to_airmiles)
        .ok_or_else(|| overflow(METRIC))?;
    let reward_value = airmiles_earned
        .checked_mul(conversion.airmile_value)
        .ok_or_else(|| overflow(METRIC))?;
    let reward_percentage = reward_value
        .checked_div(earning.spend_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(METRIC))?;
    let airmiles_per_rupee = airmiles_earned
        .checked_div(earning.spend_amount)
        .ok_or_else(|| overflow(METRIC))?;

    Ok(AirmilesRate {
        airmiles_earned,
        reward_value,
        reward_percentage,
        airmiles_per_rupee,
        value_per_airmile: conversion.airmile_value,
    })
}

/// Projects what `example_spend` earns at `rate`.
///
/// # Errors
///
/// Returns [`EngineError::UndefinedRate`] if the projected rewards are too
/// large to be represented.
pub fn project_example_spend<R: EarnRate>(
    rate: &R,
    example_spend: Decimal,
) -> EngineResult<SpendProjection> {
    const METRIC: &str = "example spend rewards";

    let units_earned = example_spend
        .checked_mul(rate.units_per_rupee())
        .ok_or_else(|| overflow(METRIC))?;
    let reward_amount = units_earned
        .checked_mul(rate.value_per_unit())
        .ok_or_else(|| overflow(METRIC))?;

    Ok(SpendProjection {
        spend: example_spend,
        units_earned,
        reward_amount,
    })
}

fn variant<R: EarnRate>(
    kind: RewardKind,
    rate: &R,
    example_spend: Option<Decimal>,
) -> EngineResult<RewardVariant> {
    Ok(RewardVariant {
        kind,
        reward_percentage: rate.percentage(),
        projection: example_spend
            .map(|spend| project_example_spend(rate, spend))
            .transpose()?,
    })
}

/// Summarises every reward option `card` offers.
///
/// Rows appear in the order basic, special, basic airmiles, special airmiles,
/// skipping those the card does not have.
///
/// # Errors
///
/// Returns [`EngineError::UndefinedRate`] if any reference spend is zero, or
/// if a rate or projection is too large to be represented.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{RewardKind, summarize_card};
/// use salary_engine::models::{AirmilesConversion, RewardCard, RewardEarning};
/// use rust_decimal::Decimal;
///
/// let card = RewardCard {
///     name: "Travel Card".to_string(),
///     basic: RewardEarning {
///         spend_amount: Decimal::from(100),
///         points_earned: Decimal::from(4),
///     },
///     special: None,
///     point_value: Decimal::new(25, 2),
///     airmiles: Some(AirmilesConversion {
///         points_to_airmiles: Decimal::ONE,
///         airmile_value: Decimal::ONE,
///     }),
/// };
///
/// let summary = summarize_card(&card, None).unwrap();
/// assert_eq!(summary.variants.len(), 2);
/// assert_eq!(summary.best, RewardKind::BasicAirmiles);
/// ```
pub fn summarize_card(
    card: &RewardCard,
    example_spend: Option<Decimal>,
) -> EngineResult<RewardSummary> {
    let mut variants = Vec::with_capacity(4);

    let basic = calculate_reward_rate(&card.basic, card.point_value)?;
    variants.push(variant(RewardKind::Basic, &basic, example_spend)?);

    if let Some(special) = &card.special {
        let rate = calculate_reward_rate(special, card.point_value)?;
        variants.push(variant(RewardKind::Special, &rate, example_spend)?);
    }

    if let Some(conversion) = &card.airmiles {
        let rate = calculate_airmiles_rate(&card.basic, conversion)?;
        variants.push(variant(RewardKind::BasicAirmiles, &rate, example_spend)?);

        if let Some(special) = &card.special {
            let rate = calculate_airmiles_rate(special, conversion)?;
            variants.push(variant(RewardKind::SpecialAirmiles, &rate, example_spend)?);
        }
    }

    let mut best = &variants[0];
    for candidate in &variants[1..] {
        if candidate.reward_percentage > best.reward_percentage {
            best = candidate;
        }
    }
    let best = best.kind;

    debug!(
        card = %card.name,
        variants = variants.len(),
        best = ?best,
        "Card reward summary calculated"
    );

    Ok(RewardSummary {
        card_name: card.name.clone(),
        variants,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn earning(spend: i64, points: i64) -> RewardEarning {
        RewardEarning {
            spend_amount: d(spend),
            points_earned: d(points),
        }
    }

    fn card(special: Option<RewardEarning>, airmiles: Option<AirmilesConversion>) -> RewardCard {
        RewardCard {
            name: "Test Card".to_string(),
            basic: earning(100, 10),
            special,
            point_value: Decimal::new(5, 1),
            airmiles,
        }
    }

    #[test]
    fn test_reward_rate() {
        let rate = calculate_reward_rate(&earning(150, 4), Decimal::new(25, 2)).unwrap();

        // 4 * 0.25 / 150 * 100
        assert_eq!(rate.reward_percentage.round_dp(2), Decimal::new(67, 2));
        assert_eq!(rate.value_per_point, Decimal::new(25, 2));
    }

    #[test]
    fn test_zero_spend_is_undefined() {
        let result = calculate_reward_rate(&earning(0, 4), Decimal::ONE);

        match result {
            Err(EngineError::UndefinedRate { metric, .. }) => {
                assert_eq!(metric, "reward percentage");
            }
            other => panic!("Expected UndefinedRate error, got {:?}", other),
        }
    }

    #[test]
    fn test_doubling_spend_halves_rate() {
        let single = calculate_reward_rate(&earning(200, 10), Decimal::ONE).unwrap();
        let double = calculate_reward_rate(&earning(400, 10), Decimal::ONE).unwrap();

        assert_eq!(double.reward_percentage * d(2), single.reward_percentage);
    }

    #[test]
    fn test_airmiles_rate_from_points() {
        let conversion = AirmilesConversion {
            points_to_airmiles: Decimal::new(5, 1),
            airmile_value: d(2),
        };
        let rate = calculate_airmiles_rate(&earning(100, 10), &conversion).unwrap();

        assert_eq!(rate.airmiles_earned, d(5));
        assert_eq!(rate.reward_value, d(10));
        assert_eq!(rate.reward_percentage, d(10));
        assert_eq!(rate.airmiles_per_rupee, Decimal::new(5, 2));
    }

    #[test]
    fn test_airmiles_zero_spend_is_undefined() {
        let conversion = AirmilesConversion {
            points_to_airmiles: Decimal::ONE,
            airmile_value: Decimal::ONE,
        };
        assert!(matches!(
            calculate_airmiles_rate(&earning(0, 10), &conversion),
            Err(EngineError::UndefinedRate { .. })
        ));
    }

    #[test]
    fn test_example_spend_projection() {
        let rate = calculate_reward_rate(&earning(100, 10), Decimal::new(5, 1)).unwrap();
        let projection = project_example_spend(&rate, d(50_000)).unwrap();

        assert_eq!(projection.units_earned, d(5_000));
        assert_eq!(projection.reward_amount, d(2_500));
    }

    #[test]
    fn test_summary_lists_all_variants_in_order() {
        let summary = summarize_card(
            &card(
                Some(earning(100, 50)),
                Some(AirmilesConversion {
                    points_to_airmiles: Decimal::ONE,
                    airmile_value: Decimal::ONE,
                }),
            ),
            Some(d(10_000)),
        )
        .unwrap();

        let kinds: Vec<RewardKind> = summary.variants.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RewardKind::Basic,
                RewardKind::Special,
                RewardKind::BasicAirmiles,
                RewardKind::SpecialAirmiles
            ]
        );
        // 50 points per 100 at ₹1 each
        assert_eq!(summary.best, RewardKind::SpecialAirmiles);
        assert_eq!(summary.best_variant().unwrap().reward_percentage, d(50));
        assert!(summary.variants.iter().all(|v| v.projection.is_some()));
    }

    #[test]
    fn test_summary_tie_keeps_first_variant() {
        // basic: 10 * 0.5 / 100 = 5%; airmiles: 10 * 0.25 * 2 / 100 = 5%
        let summary = summarize_card(
            &card(
                None,
                Some(AirmilesConversion {
                    points_to_airmiles: Decimal::new(25, 2),
                    airmile_value: d(2),
                }),
            ),
            None,
        )
        .unwrap();

        assert_eq!(summary.variants.len(), 2);
        assert_eq!(summary.best, RewardKind::Basic);
        assert!(summary.variant(RewardKind::Special).is_none());
        assert!(summary.variants[0].projection.is_none());
    }

    #[test]
    fn test_overflowing_reward_rate_is_undefined() {
        let earning = RewardEarning {
            spend_amount: Decimal::ONE,
            points_earned: Decimal::MAX,
        };

        match calculate_reward_rate(&earning, d(2)) {
            Err(EngineError::UndefinedRate { metric, reason }) => {
                assert_eq!(metric, "reward percentage");
                assert!(reason.contains("too large"));
            }
            other => panic!("Expected UndefinedRate error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_airmiles_rate_is_undefined() {
        let conversion = AirmilesConversion {
            points_to_airmiles: d(10),
            airmile_value: Decimal::ONE,
        };
        let earning = RewardEarning {
            spend_amount: Decimal::new(1, 20),
            points_earned: d(1_000_000),
        };

        assert!(matches!(
            calculate_airmiles_rate(&earning, &conversion),
            Err(EngineError::UndefinedRate { .. })
        ));
    }

    #[test]
    fn test_overflowing_projection_is_undefined() {
        let rate = calculate_reward_rate(&earning(1, 1_000_000), Decimal::ONE).unwrap();
        let result = summarize_card(
            &RewardCard {
                name: "Test Card".to_string(),
                basic: earning(1, 1_000_000),
                special: None,
                point_value: Decimal::ONE,
                airmiles: None,
            },
            Some(Decimal::MAX),
        );

        assert!(project_example_spend(&rate, Decimal::MAX).is_err());
        assert!(matches!(result, Err(EngineError::UndefinedRate { .. })));
    }

    #[test]
    fn test_summary_with_zero_special_spend_fails() {
        let result = summarize_card(&card(Some(earning(0, 5)), None), None);
        assert!(matches!(result, Err(EngineError::UndefinedRate { .. })));
    }
}

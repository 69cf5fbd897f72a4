//! Tax slab models.
//!
//! This module defines [`TaxSlab`] and [`TaxSlabTable`], the ordered band
//! definitions that drive marginal (slab) taxation under both regimes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A single income band and the marginal rate applied inside it.
///
/// The band runs from the previous slab's `upper_limit` (or zero) up to this
/// slab's `upper_limit`. A slab without an upper limit captures all
/// remaining income.
///
/// # Example
///
/// ```
/// use salary_engine::models::TaxSlab;
/// use rust_decimal::Decimal;
///
/// let slab = TaxSlab::bounded(Decimal::from(400_000), Decimal::ZERO);
/// assert!(!slab.is_unbounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// The cumulative income at which this band ends, or `None` for the top band.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,
    /// The marginal rate for this band, in percent (e.g. 5 for 5%).
    pub rate_percent: Decimal,
}

impl TaxSlab {
    /// Creates a band that ends at `upper_limit`.
    pub fn bounded(upper_limit: Decimal, rate_percent: Decimal) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate_percent,
        }
    }

    /// Creates the open-ended top band.
    pub fn unbounded(rate_percent: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate_percent,
        }
    }

    /// Returns true if this band has no upper limit.
    pub fn is_unbounded(&self) -> bool {
        self.upper_limit.is_none()
    }
}

/// An ordered, validated sequence of [`TaxSlab`]s.
///
/// Construction enforces:
/// - at least one slab,
/// - strictly increasing upper limits,
/// - exactly one unbounded slab, in last position,
/// - non-decreasing rates between 0 and 100 percent.
///
/// # Example
///
/// ```
/// use salary_engine::models::{TaxSlab, TaxSlabTable};
/// use rust_decimal::Decimal;
///
/// let table = TaxSlabTable::new(vec![
///     TaxSlab::bounded(Decimal::from(250_000), Decimal::ZERO),
///     TaxSlab::unbounded(Decimal::from(10)),
/// ])
/// .unwrap();
/// assert_eq!(table.len(), 2);
///
/// let unsorted = TaxSlabTable::new(vec![
///     TaxSlab::bounded(Decimal::from(500_000), Decimal::ZERO),
///     TaxSlab::bounded(Decimal::from(250_000), Decimal::from(5)),
///     TaxSlab::unbounded(Decimal::from(10)),
/// ]);
/// assert!(unsorted.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxSlab>", into = "Vec<TaxSlab>")]
pub struct TaxSlabTable {
    slabs: Vec<TaxSlab>,
}

impl TaxSlabTable {
    /// Validates and wraps a list of slabs in ascending order.
    pub fn new(slabs: Vec<TaxSlab>) -> EngineResult<Self> {
        let Some((last, bounded)) = slabs.split_last() else {
            return Err(invalid("a slab table needs at least one slab"));
        };

        if !last.is_unbounded() {
            return Err(invalid("the last slab must have no upper limit"));
        }

        let mut previous_limit = Decimal::ZERO;
        for (index, slab) in bounded.iter().enumerate() {
            let Some(limit) = slab.upper_limit else {
                return Err(invalid(&format!(
                    "slab {} has no upper limit but is not the last slab",
                    index + 1
                )));
            };
            if limit <= previous_limit {
                return Err(invalid(&format!(
                    "slab {} upper limit {} does not exceed {}",
                    index + 1,
                    limit,
                    previous_limit
                )));
            }
            previous_limit = limit;
        }

        let mut previous_rate = Decimal::ZERO;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.rate_percent < Decimal::ZERO || slab.rate_percent > Decimal::ONE_HUNDRED {
                return Err(invalid(&format!(
                    "slab {} rate {}% is outside 0..=100",
                    index + 1,
                    slab.rate_percent
                )));
            }
            if slab.rate_percent < previous_rate {
                return Err(invalid(&format!(
                    "slab {} rate {}% is lower than the previous {}%",
                    index + 1,
                    slab.rate_percent,
                    previous_rate
                )));
            }
            previous_rate = slab.rate_percent;
        }

        Ok(Self { slabs })
    }

    /// Wraps slabs already known to satisfy the table invariants.
    pub(crate) fn from_trusted(slabs: Vec<TaxSlab>) -> Self {
        debug_assert!(Self::new(slabs.clone()).is_ok());
        Self { slabs }
    }

    /// Returns the slabs in ascending order.
    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Returns the number of slabs.
    pub fn len(&self) -> usize {
        self.slabs.len()
    }

    /// Always false; a validated table holds at least one slab.
    pub fn is_empty(&self) -> bool {
        self.slabs.is_empty()
    }

    /// Returns the marginal rate applying to the next rupee above `income`.
    pub fn marginal_rate(&self, income: Decimal) -> Decimal {
        self.slabs
            .iter()
            .find(|slab| slab.upper_limit.is_none_or(|limit| income < limit))
            .map(|slab| slab.rate_percent)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxSlab>> for TaxSlabTable {
    type Error = EngineError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self, Self::Error> {
        Self::new(slabs)
    }
}

impl From<TaxSlabTable> for Vec<TaxSlab> {
    fn from(table: TaxSlabTable) -> Self {
        table.slabs
    }
}

fn invalid(message: &str) -> EngineError {
    EngineError::InvalidSlabTable {
        message: message.to_string(),
    }
}

//! Calculation logic for the salary engine.
//!
//! This module contains the calculators for Indian salary income tax under
//! the new and old regimes (slab tax, section 87A rebate and marginal relief,
//! deductions, cess and in-hand salary), gratuity and leave encashment with
//! their exemption caps, the HRA optimal rent and exemption, and credit card
//! reward rates.

mod exemption;
mod gratuity;
mod hra;
mod in_hand;
mod leave_encashment;
mod new_regime;
mod old_regime;
mod reward_rate;
mod slab_tax;

pub use exemption::{ExemptionSplit, split_exemption};
pub use gratuity::{GratuityResult, calculate_gratuity};
pub use hra::{
    HraExemptionResult, OptimalRentResult, calculate_hra_exemption, calculate_optimal_rent,
};
pub use in_hand::{InHandSalary, calculate_in_hand};
pub use leave_encashment::{LeaveEncashmentResult, calculate_leave_encashment};
pub use new_regime::{NewRegimeResult, calculate_new_regime};
pub use old_regime::{OldRegimeResult, calculate_old_regime};
pub use reward_rate::{
    AirmilesRate, EarnRate, RewardKind, RewardRate, RewardSummary, RewardVariant,
    SpendProjection, calculate_airmiles_rate, calculate_reward_rate, project_example_spend,
    summarize_card,
};
pub use slab_tax::{SlabPortion, SlabTaxResult, calculate_slab_tax};

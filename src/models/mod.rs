//! Core data models for the salary engine.
//!
//! This module contains the calculator inputs, the tax slab table shared by
//! both regimes, and the audit trace attached to calculation results.

mod audit;
mod benefits;
mod hra;
mod reward_card;
mod salary;
mod tax_slab;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use benefits::{GratuityInput, LeaveEncashmentInput, PayBasis};
pub use hra::{CityType, HraInput};
pub use reward_card::{AirmilesConversion, RewardCard, RewardEarning};
pub use salary::{Deductions, NewRegimeInput, OldRegimeInput, PfContribution};
pub use tax_slab::{TaxSlab, TaxSlabTable};

//! Salary, income tax and benefit calculators for Indian payroll
//!
//! This crate computes income tax and take-home pay under the new and old
//! regimes for FY 2025-26, gratuity and leave encashment with their tax
//! exemptions, the HRA optimal rent, and credit card reward rates. Tax rules
//! are loaded from effective-dated YAML files or taken from the built-in set.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod favorites;
pub mod format;
pub mod forms;
pub mod models;

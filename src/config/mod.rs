//! Tax rule configuration for the salary engine.
//!
//! Rules are grouped per financial year into a [`TaxRules`] value. They can
//! be loaded from effective-dated YAML files with [`ConfigLoader`], or taken
//! from the built-in [`TaxRules::fy_2025_26`].
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/india").unwrap();
//! println!("Latest rules: {}", loader.latest().unwrap().financial_year);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ExemptionRules, HraRules, LevyRules, NewRegimeRules, OldRegimeRules, TaxRules};

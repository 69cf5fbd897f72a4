//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading effective-dated
//! tax rules from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::TaxRules;

/// Loads and provides access to tax rules for one or more financial years.
///
/// # Directory Structure
///
/// ```text
/// config/india/
/// └── rules/
///     └── 2025-04-01.yaml  # Rules effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/india").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let rules = loader.rules_for(date).unwrap();
/// println!("Financial year: {}", rules.financial_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Rules sorted by effective date, oldest first.
    rules: Vec<TaxRules>,
}

impl ConfigLoader {
    /// Loads every rules file from `path/rules`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The rules directory is missing or holds no `.yaml` files (`ConfigNotFound`)
    /// - Any file contains invalid YAML, an invalid slab table, or a
    ///   non-positive formula divisor (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let rules_dir = path.as_ref().join("rules");
        let rules = Self::load_rules(&rules_dir)?;

        info!(
            path = %rules_dir.display(),
            files = rules.len(),
            "Loaded tax rules"
        );

        Ok(Self::from_rules(rules))
    }

    /// Creates a loader from rules already in memory.
    pub fn from_rules(rules: Vec<TaxRules>) -> Self {
        let mut sorted = rules;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self { rules: sorted }
    }

    /// Creates a loader holding only the built-in rules.
    pub fn builtin() -> Self {
        Self::from_rules(vec![TaxRules::fy_2025_26()])
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rule files from the rules directory.
    fn load_rules(rules_dir: &Path) -> EngineResult<Vec<TaxRules>> {
        let rules_dir_str = rules_dir.display().to_string();

        let entries = fs::read_dir(rules_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rules_dir_str.clone(),
        })?;

        let mut rules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rules_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file_rules = Self::load_yaml::<TaxRules>(&path)?;
                file_rules.validate().map_err(|e| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                rules.push(file_rules);
            }
        }

        if rules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", rules_dir_str),
            });
        }

        Ok(rules)
    }

    /// Returns all loaded rules, oldest first.
    pub fn all(&self) -> &[TaxRules] {
        &self.rules
    }

    /// Returns the most recent rules effective on or before `date`.
    pub fn rules_for(&self, date: NaiveDate) -> EngineResult<&TaxRules> {
        self.rules
            .iter()
            .rfind(|rules| rules.effective_date <= date)
            .ok_or_else(|| EngineError::rules_not_found_on(date))
    }

    /// Returns the rules labelled with `financial_year`, e.g. "2025-26".
    pub fn rules_for_year(&self, financial_year: &str) -> EngineResult<&TaxRules> {
        self.rules
            .iter()
            .find(|rules| rules.financial_year == financial_year)
            .ok_or_else(|| EngineError::rules_not_found_for_year(financial_year))
    }

    /// Returns the rules with the latest effective date.
    pub fn latest(&self) -> EngineResult<&TaxRules> {
        self.rules
            .last()
            .ok_or_else(|| EngineError::rules_not_found_for_year("latest"))
    }
}

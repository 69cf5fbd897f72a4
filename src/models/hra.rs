//! House rent allowance input models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// City classification used for the HRA exemption ceiling.
///
/// Metro cities (Delhi, Mumbai, Kolkata, Chennai) allow a higher share of
/// basic salary to be exempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CityType {
    /// One of the four metro cities.
    #[default]
    Metro,
    /// Any other city.
    NonMetro,
}

impl CityType {
    /// Parses the form value; `"metro"` is metro, anything else is not.
    pub fn from_form_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("metro") {
            CityType::Metro
        } else {
            CityType::NonMetro
        }
    }
}

/// Input to the HRA calculations.
///
/// When `hra_provided` is `None`, the allowance is assumed to equal the
/// city percentage of basic salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraInput {
    /// Annual basic salary.
    pub basic_salary: Decimal,
    /// Annual HRA received, if known.
    #[serde(default)]
    pub hra_provided: Option<Decimal>,
    /// Where the employee lives.
    #[serde(default)]
    pub city: CityType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_type_from_form_value() {
        assert_eq!(CityType::from_form_value("metro"), CityType::Metro);
        assert_eq!(CityType::from_form_value(" Metro "), CityType::Metro);
        assert_eq!(CityType::from_form_value("non-metro"), CityType::NonMetro);
        assert_eq!(CityType::from_form_value(""), CityType::NonMetro);
    }

    #[test]
    fn test_city_type_serialization() {
        assert_eq!(
            serde_json::to_string(&CityType::NonMetro).unwrap(),
            "\"non_metro\""
        );
    }
}

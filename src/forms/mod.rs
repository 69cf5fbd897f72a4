//! Raw form input for the calculators.
//!
//! Forms hold what a user typed: every amount is optional and may arrive as a
//! JSON number or as text such as `"₹15,00,000"`. Converting a form into its
//! model with `TryFrom` parses the amounts and checks required fields.
//!
//! # Example
//!
//! ```
//! use salary_engine::forms::NewRegimeForm;
//! use salary_engine::models::NewRegimeInput;
//! use rust_decimal::Decimal;
//!
//! let form: NewRegimeForm = serde_json::from_str(
//!     r#"{ "annual_salary": "15,00,000", "employee_pf": 100000, "employer_pf": "1,00,000" }"#,
//! ).unwrap();
//! let input = NewRegimeInput::try_from(form).unwrap();
//!
//! assert_eq!(input.annual_salary, Decimal::from(1_500_000));
//! assert!(!input.pf.part_of_salary);
//! ```

mod benefits;
mod hra;
mod reward_card;
mod salary;

pub use benefits::{GratuityForm, LeaveEncashmentForm};
pub use hra::HraForm;
pub use reward_card::RewardCardForm;
pub use salary::{NewRegimeForm, OldRegimeForm};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Largest amount a form field accepts: ₹1 lakh crore.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Normalizes a typed amount: drops the rupee sign, thousands separators and
/// whitespace.
fn normalize_amount(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '₹' && *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parses a typed amount for `field`.
///
/// Accepts Indian or international digit grouping (`"15,00,000"`,
/// `"1,500,000"`), a leading `₹` and surrounding whitespace.
///
/// # Errors
///
/// - [`EngineError::MissingField`] if nothing but separators was typed.
/// - [`EngineError::InvalidInput`] if the text is not a number, is negative,
///   or exceeds [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use salary_engine::forms::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("salary", " ₹15,00,000 ").unwrap(), Decimal::from(1_500_000));
/// assert!(parse_amount("salary", "").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> EngineResult<Decimal> {
    let normalized = normalize_amount(raw);
    if normalized.is_empty() {
        return Err(EngineError::MissingField {
            field: field.to_string(),
        });
    }

    let amount: Decimal = normalized.parse().map_err(|e| {
        warn!(field, input = %raw, "invalid amount: {}", e);
        EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("'{}' is not a number", raw.trim()),
        }
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        warn!(field, input = %raw, "negative amount rejected");
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "amount must not be negative".to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        warn!(field, input = %raw, "amount above limit rejected");
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: format!("amount must not exceed {}", MAX_AMOUNT),
        });
    }

    Ok(amount)
}

/// Parses a field the calculator cannot run without.
fn required(field: &str, value: &Option<String>) -> EngineResult<Decimal> {
    match value {
        Some(raw) => parse_amount(field, raw),
        None => Err(EngineError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Parses a field that may be left empty.
fn optional(field: &str, value: &Option<String>) -> EngineResult<Option<Decimal>> {
    match value {
        Some(raw) if !normalize_amount(raw).is_empty() => parse_amount(field, raw).map(Some),
        _ => Ok(None),
    }
}

/// Parses a field that counts as zero when left empty.
fn optional_or_zero(field: &str, value: &Option<String>) -> EngineResult<Decimal> {
    Ok(optional(field, value)?.unwrap_or(Decimal::ZERO))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

/// Deserializes an amount typed as text or sent as a number into its text.
fn amount_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawAmount>::deserialize(deserializer)?.map(|raw| match raw {
            RawAmount::Text(text) => text,
            RawAmount::Number(number) => number.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indian_grouping() {
        assert_eq!(
            parse_amount("salary", "15,00,000").unwrap(),
            Decimal::from(1_500_000)
        );
    }

    #[test]
    fn test_parse_strips_rupee_sign_and_whitespace() {
        assert_eq!(
            parse_amount("salary", "  ₹ 1,23,456.50 ").unwrap(),
            Decimal::new(12_345_650, 2)
        );
    }

    #[test]
    fn test_parse_empty_is_missing() {
        match parse_amount("monthly_basic", " , ") {
            Err(EngineError::MissingField { field }) => assert_eq!(field, "monthly_basic"),
            other => panic!("Expected MissingField error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_is_invalid() {
        match parse_amount("salary", "12 lakh") {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "salary");
                assert!(message.contains("12 lakh"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_is_invalid() {
        assert!(matches!(
            parse_amount("salary", "-5,000"),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_max_amount_is_one_lakh_crore() {
        assert_eq!(MAX_AMOUNT, Decimal::from(1_000_000_000_000u64));
        assert_eq!(parse_amount("salary", "1,00,000,00,00,000").unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn test_parse_above_limit_is_invalid() {
        match parse_amount("monthly_basic", "79228162514264337593543950335") {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "monthly_basic");
                assert!(message.contains("exceed"), "unexpected message: {}", message);
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
        assert!(parse_amount("salary", "1000000000000.01").is_err());
    }

    #[test]
    fn test_parse_negative_zero_is_zero() {
        assert_eq!(parse_amount("other", "-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_optional_blank_is_none() {
        assert_eq!(optional("hra", &Some("  ".to_string())).unwrap(), None);
        assert_eq!(optional("hra", &None).unwrap(), None);
        assert_eq!(optional_or_zero("hra", &None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_required_absent_is_missing() {
        assert!(matches!(
            required("annual_salary", &None),
            Err(EngineError::MissingField { .. })
        ));
    }
}

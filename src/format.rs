//! Display formatting for amounts and rates.
//!
//! Calculator results stay unrounded; rounding happens only here, when a
//! figure is shown. Rupee amounts use Indian digit grouping: the last three
//! digits, then groups of two (`₹15,00,000`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimal places, halves away from zero.
///
/// # Examples
///
/// ```
/// use salary_engine::format::round_half_up;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_half_up(Decimal::new(123_455, 3)), Decimal::new(12_346, 2));
/// assert_eq!(round_half_up(Decimal::new(-123_455, 3)), Decimal::new(-12_346, 2));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Inserts Indian thousands separators into a run of integer digits.
///
/// Anything other than ASCII digits is returned unchanged.
///
/// ```
/// use salary_engine::format::format_indian_grouping;
///
/// assert_eq!(format_indian_grouping("1500000"), "15,00,000");
/// assert_eq!(format_indian_grouping("999"), "999");
/// assert_eq!(format_indian_grouping("₹1500"), "₹1500");
/// ```
pub fn format_indian_grouping(digits: &str) -> String {
    if digits.len() <= 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

/// Formats a rupee amount for display.
///
/// At most two fractional digits are shown, rounded half-up, and trailing
/// fractional zeros are dropped.
///
/// # Examples
///
/// ```
/// use salary_engine::format::format_inr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_inr(Decimal::from(108_525)), "₹1,08,525");
/// assert_eq!(format_inr(Decimal::new(57_692_307_692, 5)), "₹5,76,923.08");
/// assert_eq!(format_inr(Decimal::from(-1_000)), "-₹1,000");
/// ```
pub fn format_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount).normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    match text.split_once('.') {
        Some((whole, fraction)) => {
            format!("{}₹{}.{}", sign, format_indian_grouping(whole), fraction)
        }
        None => format!("{}₹{}", sign, format_indian_grouping(&text)),
    }
}

/// Formats a percentage with two decimals.
///
/// ```
/// use salary_engine::format::format_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_percentage(Decimal::new(16_667, 4)), "1.67%");
/// assert_eq!(format_percentage(Decimal::from(5)), "5.00%");
/// ```
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{:.2}%", round_half_up(percentage))
}

//! Won amount formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with comma thousands separators.
///
/// Fractions are kept to at most three places with trailing zeros dropped.
///
/// # Example
///
/// ```
/// use wage_statement::export::group_thousands;
/// use rust_decimal::Decimal;
///
/// assert_eq!(group_thousands(Decimal::from(1468000)), "1,468,000");
/// assert_eq!(group_thousands(Decimal::from(-4400)), "-4,400");
/// assert_eq!(group_thousands(Decimal::new(12345, 1)), "1,234.5");
/// ```
pub fn group_thousands(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats an amount as won, e.g. `₩ 1,468,000`.
pub fn format_krw(amount: Decimal) -> String {
    format!("₩ {}", group_thousands(amount))
}

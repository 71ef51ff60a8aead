//! Decimal formatting utilities for human-readable display.
//!
//! Money and quantity columns, K/M/B/T abbreviations for large figures, and
//! percentages for P/L and daily change.

use rust_decimal::prelude::*;

fn scale(power: u32) -> Decimal {
    Decimal::from(10i64.pow(power))
}

/// Fixed-point display with thousands separators (`1,234.50`).
pub fn fixed(value: &Decimal, decimals: u32) -> String {
    let rounded = value.round_dp(decimals);
    super::num::group_thousands(&format!("{:.prec$}", rounded, prec = decimals as usize))
}

/// Dollar amount with two decimals (`$1,234.50`, `-$12.00`).
pub fn money(value: &Decimal) -> String {
    let body = fixed(&value.abs(), 2);
    if value.is_sign_negative() && !value.round_dp(2).is_zero() {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Quantity display: trailing zeros dropped (`10`, `0.5`, `1,250`).
pub fn quantity(value: &Decimal) -> String {
    super::num::display_formatted_string(&value.normalize().to_string())
}

/// Percent from a ratio (`0.0123` → `1.23%`).
pub fn ratio_percent(ratio: &Decimal) -> String {
    percent(&(ratio * Decimal::ONE_HUNDRED))
}

/// Percent from a value already expressed in percent points (`1.234` → `1.23%`).
pub fn percent(value: &Decimal) -> String {
    format!("{:.2}%", value.round_dp(2))
}

/// Percent with an explicit `+` for gains, used for daily change columns.
pub fn signed_percent(value: &Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{}", percent(value))
    } else {
        percent(value)
    }
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: Option<usize>, show_sign: Option<bool>) -> String {
    let digits = digits.unwrap_or(2);
    let show_sign = show_sign.unwrap_or(true);
    let sign = if show_sign && amount < &Decimal::ZERO {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    let (divisor, suffix) = if abs_amount >= scale(12) {
        (scale(12), "T")
    } else if abs_amount >= scale(9) {
        (scale(9), "B")
    } else if abs_amount >= scale(6) {
        (scale(6), "M")
    } else if abs_amount >= scale(3) {
        (scale(3), "K")
    } else {
        (Decimal::ONE, "")
    };

    format!(
        "{}{:.precision$}{}",
        sign,
        abs_amount / divisor,
        suffix,
        precision = digits
    )
}

//! US-dollar display formatting.
//!
//! Amounts are formatted the way an en-US browser formats USD: a `$` prefix,
//! comma thousands separators, a leading `-` for negatives and halves rounded
//! away from zero. Rounding happens on the exact binary value of the `f64`,
//! so `2.675` (stored as `2.67499…`) displays as `$2.67`.
//!
//! ```
//! use roofquote_core::pricing::{format_currency, format_currency_with_cents};
//!
//! assert_eq!(format_currency(12_500.0), "$12,500");
//! assert_eq!(format_currency_with_cents(138.712_863), "$138.71");
//! assert_eq!(format_currency(-1_234.5), "-$1,235");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

const SYMBOL: &str = "$";

/// Whole-dollar amount, e.g. `$12,500`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format_usd(amount, 0)
}

/// Amount with cents, e.g. `$138.71`.
#[must_use]
pub fn format_currency_with_cents(amount: f64) -> String {
    format_usd(amount, 2)
}

fn format_usd(amount: f64, decimals: u32) -> String {
    if amount.is_nan() {
        return format!("{SYMBOL}NaN");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{SYMBOL}∞");
    }

    let (negative, digits) = match Decimal::from_f64_retain(amount) {
        Some(value) => {
            let mut rounded =
                value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            // Amounts that round to zero never display as `-$0`.
            (rounded.is_sign_negative() && !rounded.is_zero(), rounded.abs().to_string())
        }
        // Beyond the decimal range; no sub-dollar precision is left anyway.
        None => (
            amount < 0.0,
            format!("{:.prec$}", amount.abs(), prec = decimals as usize),
        ),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(SYMBOL);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

//! Compact number formatting for displays.
//!
//! Values of a thousand or more are shown with two decimals and a `K`, `M`,
//! or `B` suffix; smaller values are floored to an integer. Rounding to the
//! two decimals is half-up and happens in fixed point, so the same amount
//! always formats the same way.

use crate::fixed::Amount;

const SUFFIXES: [(i64, &str); 3] = [(1_000_000_000, "B"), (1_000_000, "M"), (1_000, "K")];

/// Format an amount, e.g. `1234.5` → `"1.23K"`, `999.9` → `"999"`.
pub fn format_amount(v: Amount) -> String {
    for (unit, suffix) in SUFFIXES {
        if v >= Amount::from_num(unit) {
            let hundredths = v
                .saturating_div(Amount::from_num(unit / 100))
                .round()
                .saturating_to_num::<i64>();
            return format!("{}.{:02}{}", hundredths / 100, hundredths % 100, suffix);
        }
    }
    v.floor().saturating_to_num::<i64>().to_string()
}

/// A balance, floored before formatting.
pub fn format_currency(v: Amount) -> String {
    format_amount(v.floor())
}

/// A per-second rate, e.g. `"2 / sec"`. Not floored before scaling.
pub fn format_rate(v: Amount) -> String {
    format!("{} / sec", format_amount(v))
}

//! Display formatting for dashboard figures.

use crate::numeric::{round2, to_fixed};

/// Format an amount as US dollars: `$1,234.50`, `-$12.00`.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    let sign = if amount.is_sign_negative() && amount != 0.0 {
        "-"
    } else {
        ""
    };
    if amount.is_infinite() {
        return format!("{sign}$∞");
    }

    let cents = (round2(amount.abs()) * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    // A negative amount that rounds to zero cents prints without a sign.
    let sign = if cents == 0 { "" } else { sign };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// Format a 0-100 percentage with one decimal: `12.3%`.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", to_fixed(value, 1))
}

/// Format a ratio such as MER or ROAS with one decimal: `3.3x`.
pub fn format_multiplier(value: f64) -> String {
    format!("{}x", to_fixed(value, 1))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

//! BRL currency text in the pt-BR layout (`R$ 1.750,00`).

use tracing::warn;

pub const ZERO_BRL: &str = "R$ 0,00";

/// Formats an amount with two decimals, `.` grouping and `,` as decimal separator.
pub fn format_brl(amount: f64) -> String {
    if !amount.is_finite() {
        warn!(amount, "Refusing to format non-finite amount");
        return ZERO_BRL.to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}R$ {whole},{:02}", cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Reads an amount back out of currency text.
///
/// Only digits and commas are considered and the first comma is the decimal
/// point, so `R$ 1.750,00` reads as 1750.0. Returns `None` when no number remains.
pub fn parse_brl(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    let mut seen_point = false;
    let numeric: String = normalized
        .chars()
        .take_while(|c| match c {
            '.' if !seen_point => {
                seen_point = true;
                true
            }
            c => c.is_ascii_digit(),
        })
        .collect();

    numeric.parse::<f64>().ok()
}

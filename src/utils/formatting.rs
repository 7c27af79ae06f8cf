//! Formatting utilities used for CLI and export outputs.

/// `$1,234.50`. Negative values keep the sign in front of the symbol.
pub fn money(symbol: &str, amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    format!("{sign}{symbol}{whole}.{:02}", cents % 100)
}

/// Per-hour figures may be non-finite (shifts logged with zero hours).
pub fn rate(symbol: &str, value: f64) -> String {
    if value.is_finite() {
        format!("{}/h", money(symbol, value))
    } else {
        "n/a".to_string()
    }
}

pub fn hours(h: f64) -> String {
    format!("{h:.1}h")
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Placeholder shown when a mean has no defined inputs.
pub const PLACEHOLDER: &str = "n/a";

/// Compact money/quantity display: `774.4K` from one thousand up, whole numbers below.
pub fn compact(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1}K", value / 1000.0)
    } else {
        format!("{value:.0}")
    }
}

/// Thousands-separated count, e.g. `1,234`.
pub fn count(value: usize) -> String {
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

pub fn days(mean: Option<f64>) -> String {
    match mean {
        Some(value) => format!("{value:.2}"),
        None => PLACEHOLDER.to_string(),
    }
}

//! Number formatting for the KPI cards, chart labels and table.

/// Insert `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$123,457` – rounded to whole dollars.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&digits))
}

/// `1,234`
pub fn count(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Share of `part` in `total` with one decimal, `0.0%` when `total` is zero.
pub fn percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(999.4), "$999");
        assert_eq!(currency(123_456.7), "$123,457");
        assert_eq!(currency(1_000_000.0), "$1,000,000");
        assert_eq!(currency(-2_500.0), "-$2,500");
        assert_eq!(currency(f64::NAN), "$0");
    }

    #[test]
    fn test_count() {
        assert_eq!(count(0), "0");
        assert_eq!(count(999), "999");
        assert_eq!(count(1_000), "1,000");
        assert_eq!(count(133_349), "133,349");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), "33.3%");
        assert_eq!(percent(0, 0), "0.0%");
        assert_eq!(percent(4, 4), "100.0%");
    }
}

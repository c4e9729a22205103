//! Number and date formatting shared by messages and terminal views.

use chrono::NaiveDate;

/// Formats an integer with comma thousands separators: `10000` -> `"10,000"`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One decimal place with a percent sign: `83.333` -> `"83.3%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `part / total * 100`, or zero when `total` is zero.
pub fn percentage_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Renders an ISO date (optionally with a time part) as `Mon D`.
///
/// Unparseable input is returned unchanged.
pub fn short_month_day(raw: &str) -> String {
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(10_000), "10,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage_of(5, 0), 0.0);
        assert_eq!(format_percentage(percentage_of(1, 3)), "33.3%");
    }

    #[test]
    fn month_day_formatting() {
        assert_eq!(short_month_day("2024-03-04"), "Mar 4");
        assert_eq!(short_month_day("2024-12-25T10:00:00Z"), "Dec 25");
        assert_eq!(short_month_day("yesterday"), "yesterday");
    }
}

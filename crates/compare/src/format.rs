//! Display formatting for comparison cells and warning text.

use chrono::NaiveDate;

/// Format a dollar amount as whole dollars with thousands separators.
///
/// ```
/// use quotewise_compare::format::format_currency;
///
/// assert_eq!(format_currency(1_000_000.0), "$1,000,000");
/// assert_eq!(format_currency(2499.6), "$2,500");
/// ```
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

/// Format an ISO date (`2024-01-15`, optionally with a time part) as `Jan 15, 2024`.
///
/// Anything that does not parse is returned trimmed but otherwise unchanged.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);

    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Whole-number percentage of `part` relative to `whole`.
pub fn format_percent(part: f64, whole: f64) -> String {
    if whole == 0.0 {
        return "0%".to_string();
    }
    format!("{}%", ((part / whole) * 100.0).round() as i64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

/// Non-blank trimmed text, or `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(500.0), "$500");
        assert_eq!(format_currency(2500.0), "$2,500");
        assert_eq!(format_currency(400_000.0), "$400,000");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000");
        assert_eq!(format_currency(-1250.0), "-$1,250");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15"), "Jan 15, 2024");
        assert_eq!(format_date("2025-07-04T00:00:00Z"), "Jul 4, 2025");
        assert_eq!(format_date("01/15/2024"), "01/15/2024");
        assert_eq!(format_date("  TBD "), "TBD");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(600_000.0, 1_000_000.0), "60%");
        assert_eq!(format_percent(1.0, 0.0), "0%");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Acme ")), Some("Acme"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}

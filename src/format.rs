use crate::timezone::TimezoneContext;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for 1..=12; anything else renders as "Unknown".
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}

pub fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// "$1,234.56"; negatives as "-$1,234.56".
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}

/// Signed amount with an explicit "+" for positive values.
pub fn format_signed_currency(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

/// Short date for a timestamp column, "Never" when absent.
pub fn format_last_activity(tz: &TimezoneContext, timestamp: Option<&str>) -> String {
    match timestamp {
        Some(ts) if !ts.trim().is_empty() => tz.format(ts).date,
        _ => "Never".to_string(),
    }
}

/// Parse a user-typed amount, tolerating "$" and thousands separators.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_thousands_separators() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-45.5), "-$45.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
    }

    #[test]
    fn signed_currency_marks_gains() {
        assert_eq!(format_signed_currency(20.0), "+$20.00");
        assert_eq!(format_signed_currency(-20.0), "-$20.00");
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(13), "Unknown");
    }

    #[test]
    fn last_activity_defaults_to_never() {
        let tz = TimezoneContext::utc();
        assert_eq!(format_last_activity(&tz, None), "Never");
        assert_eq!(format_last_activity(&tz, Some("2025-01-15T10:00:00Z")), "Jan 15, 2025");
    }

    #[test]
    fn amounts_accept_currency_decoration() {
        assert_eq!(parse_amount(" $1,250.75 "), Some(1250.75));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }
}

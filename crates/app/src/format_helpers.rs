//! Shared formatting utilities for the UI layer.
//!
//! Dates arrive as ISO-8601 strings (e.g. "2026-01-20T21:35:00Z") and prices
//! as plain floats; everything here is string slicing and arithmetic with no
//! extra crate dependencies.

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format a daily price as "$1,250.00".
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// Format an ISO date string as "Jan 20, 2026".
///
/// Falls back to the first 10 characters if parsing fails.
pub fn format_date_human(date_str: &str) -> String {
    if date_str.len() < 10 {
        return date_str.to_string();
    }
    let year = &date_str[..4];
    let month = &date_str[5..7];
    let day = &date_str[8..10];

    let parsed_month = month
        .parse::<usize>()
        .ok()
        .filter(|m| (1..=12).contains(m));

    match parsed_month {
        Some(m) => {
            let day_num: u32 = day.parse().unwrap_or(0);
            format!("{} {}, {}", MONTH_NAMES[m - 1], day_num, year)
        }
        None => date_str[..10].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_groups_thousands() {
        assert_eq!(format_price(1250.0), "$1,250.00");
        assert_eq!(format_price(1_000_000.5), "$1,000,000.50");
    }

    #[test]
    fn price_handles_small_and_fractional_amounts() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(9.99), "$9.99");
        assert_eq!(format_price(45.5), "$45.50");
    }

    #[test]
    fn price_keeps_the_sign() {
        assert_eq!(format_price(-12.25), "-$12.25");
    }

    #[test]
    fn date_formats_iso_timestamps() {
        assert_eq!(format_date_human("2026-01-20T21:35:00Z"), "Jan 20, 2026");
        assert_eq!(format_date_human("2025-12-03T00:00:00+00:00"), "Dec 3, 2025");
    }

    #[test]
    fn date_falls_back_on_malformed_input() {
        assert_eq!(format_date_human("soon"), "soon");
        assert_eq!(format_date_human("2026-xx-20T00:00:00Z"), "2026-xx-20");
    }
}

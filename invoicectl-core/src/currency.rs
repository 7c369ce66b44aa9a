//! Currency formatting.
//!
//! Amounts live in the store as integer cents and are converted only at
//! the point of display.

use num_format::{Locale, ToFormattedString};

/// Format cents as an en-US dollar string, e.g. `150000` -> `"$1,500.00"`.
///
/// Total over `i64`; negative amounts get a leading minus (`"-$0.05"`).
pub fn format_currency(cents: i64) -> String {
    let magnitude = cents.unsigned_abs();
    let dollars = (magnitude / 100).to_formatted_string(&Locale::en);
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, dollars, magnitude % 100)
}

/// Convert cents to dollars for form inputs.
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(150000), "$1,500.00");
        assert_eq!(format_currency(123456789), "$1,234,567.89");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_currency(-5), "-$0.05");
        assert_eq!(format_currency(-100000), "-$1,000.00");
    }

    #[test]
    fn handles_extremes() {
        assert_eq!(format_currency(i64::MIN), "-$92,233,720,368,547,758.08");
        assert_eq!(format_currency(i64::MAX), "$92,233,720,368,547,758.07");
    }

    #[test]
    fn dollars_from_cents() {
        assert_eq!(cents_to_dollars(150000), 1500.0);
        assert_eq!(cents_to_dollars(1), 0.01);
    }
}

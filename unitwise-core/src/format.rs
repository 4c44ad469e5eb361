//! Display formatting for converted values

/// Default number of fractional digits shown for a converted value
pub const DEFAULT_FRACTION_DIGITS: u32 = 10;

/// Largest fractional digit count accepted from configuration
pub const MAX_FRACTION_DIGITS: u32 = 20;

/// Round `value` to at most `max_fraction_digits` fractional digits and drop
/// trailing zeros. No digit grouping, no locale.
pub fn format_number(value: f64, max_fraction_digits: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let digits = max_fraction_digits.min(MAX_FRACTION_DIGITS) as usize;
    let mut s = format!("{:.*}", digits, value);

    if s.contains('.') {
        let trimmed_len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed_len);
    }

    // Rounding a tiny negative value leaves "-0"
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

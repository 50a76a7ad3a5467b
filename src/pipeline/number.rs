//! # Numeric Normalizer
//!
//! Reduces decimal literals to at most three fractional digits.

/// Number of fractional digits kept after rounding.
pub const PRECISION: usize = 3;

/// Normalize a decimal literal: round to [`PRECISION`] fractional digits and
/// drop trailing zeros and a dangling decimal point.
///
/// Never fails: input that does not parse as a finite number is returned as
/// is, and so is input whose rounded form would be longer than the original.
///
/// ```
/// use svg_minifier::pipeline::number::normalize_number;
///
/// assert_eq!(normalize_number("1.000"), "1");
/// assert_eq!(normalize_number("0.1004"), "0.1");
/// assert_eq!(normalize_number("abc"), "abc");
/// ```
pub fn normalize_number(value: &str) -> String {
    let parsed = match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return value.to_string(),
    };

    let formatted = format!("{:.*}", PRECISION, parsed);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    let result = if trimmed == "-0" { "0" } else { trimmed };

    if result.len() > value.len() {
        value.to_string()
    } else {
        result.to_string()
    }
}

/// Normalize only when the literal has a fractional part.
pub fn normalize_if_fractional(value: &str) -> Option<String> {
    if value.contains('.') {
        Some(normalize_number(value))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_trailing_zeros() {
        assert_eq!(normalize_number("2.000"), "2");
        assert_eq!(normalize_number("1.000"), "1");
        assert_eq!(normalize_number("1.50"), "1.5");
        assert_eq!(normalize_number("100.0"), "100");
    }

    #[test]
    fn test_rounds_to_three_digits() {
        assert_eq!(normalize_number("0.1004"), "0.1");
        assert_eq!(normalize_number("3.14159"), "3.142");
        assert_eq!(normalize_number("-2.5"), "-2.5");
        assert_eq!(normalize_number("10.123456789"), "10.123");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(normalize_number("-0.0001"), "0");
    }

    #[test]
    fn test_unparseable_passthrough() {
        assert_eq!(normalize_number("abc"), "abc");
        assert_eq!(normalize_number("50%"), "50%");
        assert_eq!(normalize_number(""), "");
        assert_eq!(normalize_number("inf"), "inf");
    }

    #[test]
    fn test_never_longer_than_input() {
        assert_eq!(normalize_number("1e20"), "1e20");
        assert_eq!(normalize_number("1.5e2"), "150");
    }

    #[test]
    fn test_idempotent() {
        for input in ["2.000", "0.1004", "-2.5", "3.14159", "-0.0001", "abc", "12.9996", "0.0005"] {
            let once = normalize_number(input);
            assert_eq!(normalize_number(&once), once, "not idempotent for {}", input);
        }
    }

    #[test]
    fn test_only_fractional_literals() {
        assert_eq!(normalize_if_fractional("100"), None);
        assert_eq!(normalize_if_fractional("100.50"), Some("100.5".to_string()));
    }
}

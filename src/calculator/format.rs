//! Text formatting for numbers and operators.

use super::engine::Operator;

/// Format a number for the display and the expression line.
///
/// Uses ten fixed fractional digits, then strips trailing zeros and a
/// trailing decimal point. Never uses grouping or scientific notation.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// The symbol shown for an operator in the expression line.
pub fn operator_symbol(op: Operator) -> &'static str {
    match op {
        Operator::Add => "+",
        Operator::Subtract => "−",
        Operator::Multiply => "×",
        Operator::Divide => "÷",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(-0.75), "-0.75");
    }

    #[test]
    fn test_rounds_to_ten_places() {
        assert_eq!(format_number(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.6666666667");
        // cos(90°) is not exactly zero in floating point
        assert_eq!(format_number(6.123233995736766e-17), "0");
    }

    #[test]
    fn test_negative_zero_keeps_sign() {
        assert_eq!(format_number(-0.0), "-0");
        assert_eq!(format_number(-6.123233995736766e-17), "-0");
    }

    #[test]
    fn test_no_grouping_or_exponent() {
        assert_eq!(format_number(1_000_000.0), "1000000");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_operator_symbols() {
        assert_eq!(operator_symbol(Operator::Add), "+");
        assert_eq!(operator_symbol(Operator::Subtract), "−");
        assert_eq!(operator_symbol(Operator::Multiply), "×");
        assert_eq!(operator_symbol(Operator::Divide), "÷");
    }
}
